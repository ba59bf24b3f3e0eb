use std::path::PathBuf;

use docwright_config::ConfigError;
use docwright_plugin::PluginError;
use thiserror::Error;

/// Fatal generation errors.
///
/// Per-file extraction failures are not errors here: they are reported and
/// the file is skipped.
#[derive(Debug, Error)]
pub enum GenerateError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(
    "Output path {path} is produced by both {} and {}",
    first.display(),
    second.display()
  )]
  OutputCollision {
    path:   String,
    first:  PathBuf,
    second: PathBuf,
  },

  #[error(transparent)]
  Plugin(#[from] PluginError),
}
