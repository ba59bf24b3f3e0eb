use docwright_config::ConfigError;
use docwright_generator::GenerateError;
use docwright_html::BuildError;
use docwright_plugin::PluginError;
use thiserror::Error;

/// Top-level error type for a docwright run.
///
/// Recoverable per-file problems never get here; they are reported and the
/// file is skipped. Everything in this enum aborts the run.
#[derive(Debug, Error)]
pub enum DocwrightError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Plugin(#[from] PluginError),

  #[error(transparent)]
  Generate(#[from] GenerateError),

  #[error(transparent)]
  Build(#[from] BuildError),
}
