//! `docwright`.
//!
//! Ties the pipeline together: plugins named in the configuration are
//! instantiated, the configuration is resolved through their `config` hooks,
//! the generator produces the document set and the site builder writes it
//! out. The binary is a thin wrapper around [`run`].
pub mod cli;
mod error;

use docwright_config::Config;
use docwright_generator::{Generator, create_processor};
use docwright_html::SiteBuilder;
use docwright_model::Reporter;
use docwright_plugin::{PluginPipeline, PluginRegistry};

pub use crate::error::DocwrightError;

/// What a run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
  /// HTML pages written.
  pub pages:          usize,
  /// Entries in the search index.
  pub search_entries: usize,
  /// Source files that produced no page.
  pub skipped:        usize,
}

/// Outcome of a generation-only pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
  pub documents: usize,
  pub skipped:   usize,
}

/// Pass `config` through the `config` hooks, validate the result and
/// announce it to `config_resolved`.
///
/// # Errors
///
/// Returns an error if a hook fails or the final configuration is invalid.
pub fn resolve_config(
  config: Config,
  pipeline: &PluginPipeline,
) -> Result<Config, DocwrightError> {
  let config = pipeline.apply_config(config)?;
  config.validate()?;
  pipeline.config_resolved(&config)?;
  log::debug!("Resolved configuration: {config:?}");
  Ok(config)
}

/// Generate and build the site described by `config`.
///
/// # Errors
///
/// Returns an error for an unknown plugin, an invalid configuration, a
/// failing hook, an output path collision or any failure writing the site.
/// Files that cannot be read or parsed are reported and skipped instead.
pub fn run(
  config: Config,
  registry: &PluginRegistry,
  reporter: &dyn Reporter,
) -> Result<BuildSummary, DocwrightError> {
  let pipeline = registry.instantiate(&config.plugins)?;
  let config = resolve_config(config, &pipeline)?;
  let processor = create_processor(&config);

  let generation =
    Generator::new(&config, &pipeline, &processor, reporter).run()?;
  let output = SiteBuilder::new(&config, &pipeline, &processor, reporter)
    .build(&generation.documents)?;

  Ok(BuildSummary {
    pages:          output.pages,
    search_entries: output.search_entries,
    skipped:        generation.skipped.len(),
  })
}

/// Resolve the configuration and run generation, writing nothing.
///
/// # Errors
///
/// Same as [`run`], minus the site-writing failures.
pub fn check(
  config: Config,
  registry: &PluginRegistry,
  reporter: &dyn Reporter,
) -> Result<CheckSummary, DocwrightError> {
  let pipeline = registry.instantiate(&config.plugins)?;
  let config = resolve_config(config, &pipeline)?;
  let processor = create_processor(&config);
  let generation =
    Generator::new(&config, &pipeline, &processor, reporter).run()?;

  Ok(CheckSummary {
    documents: generation.documents.len(),
    skipped:   generation.skipped.len(),
  })
}
