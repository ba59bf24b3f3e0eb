use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for docwright
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "docwright: documentation sites from prose, annotated sources and \
           components"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Generate the documentation site.
  Build {
    /// Path to the configuration file (TOML or JSON).
    #[arg(short, long, default_value = "docwright.toml")]
    config: PathBuf,

    /// Output directory, overriding the configured one.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Base path the site is served under, overriding the configured one.
    #[arg(short, long)]
    base: Option<String>,
  },

  /// Validate the configuration and run generation without writing output.
  Check {
    /// Path to the configuration file (TOML or JSON).
    #[arg(short, long, default_value = "docwright.toml")]
    config: PathBuf,
  },
}

impl Cli {
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_is_well_formed() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_build_overrides() {
    let cli = Cli::try_parse_from([
      "docwright",
      "build",
      "-c",
      "site/docwright.json",
      "-o",
      "public",
      "--base",
      "/lib/",
      "-v",
    ])
    .unwrap();
    assert!(cli.verbose);
    assert!(matches!(
      cli.command,
      Commands::Build { ref config, ref output_dir, ref base }
        if config == &PathBuf::from("site/docwright.json")
          && output_dir.as_deref() == Some(std::path::Path::new("public"))
          && base.as_deref() == Some("/lib/")
    ));
  }

  #[test]
  fn test_check_defaults_config_path() {
    let cli = Cli::try_parse_from(["docwright", "check"]).unwrap();
    assert!(matches!(
      cli.command,
      Commands::Check { ref config } if config == &PathBuf::from("docwright.toml")
    ));
  }
}
