use std::path::Path;

use color_eyre::eyre::{Context, Result};
use docwright::cli::{Cli, Commands};
use docwright_config::Config;
use docwright_model::LogReporter;
use docwright_plugin::PluginRegistry;
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  // No plugins ship with the binary; embedders register their own.
  let registry = PluginRegistry::new();

  match cli.command {
    Commands::Build {
      config,
      output_dir,
      base,
    } => {
      let mut config = load_config(&config)?;
      if let Some(output_dir) = output_dir {
        config.output_dir = output_dir;
      }
      if let Some(base) = base {
        config.base = base;
      }

      let output_dir = config.output_dir.clone();
      let summary = docwright::run(config, &registry, &LogReporter)
        .wrap_err("Failed to build documentation")?;
      info!(
        "Built {} pages into {} ({} search entries, {} files skipped)",
        summary.pages,
        output_dir.display(),
        summary.search_entries,
        summary.skipped
      );
    },

    Commands::Check { config } => {
      let config = load_config(&config)?;
      let summary = docwright::check(config, &registry, &LogReporter)
        .wrap_err("Configuration check failed")?;
      info!(
        "Configuration is valid: {} documents, {} files skipped",
        summary.documents, summary.skipped
      );
    },
  }

  Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
  Config::from_file(path).wrap_err_with(|| {
    format!("Failed to load configuration from {}", path.display())
  })
}
