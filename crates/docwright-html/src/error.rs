use std::{io, path::PathBuf};

use docwright_plugin::PluginError;
use thiserror::Error;

/// Error type for site assembly.
///
/// Every variant aborts the build. Partial output may remain in the output
/// root; the next build clears it.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("Failed to write {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Template error: {0}")]
  Template(#[from] tera::Error),

  #[error("Failed to compile stylesheet: {0}")]
  Stylesheet(String),

  #[error("Failed to serialize search index: {0}")]
  Json(#[from] serde_json::Error),

  #[error(transparent)]
  Plugin(#[from] PluginError),

  #[error(
    "Refusing to clear output directory {}: it contains input root {}",
    output.display(),
    root.display()
  )]
  UnsafeOutputDir { output: PathBuf, root: PathBuf },

  #[error("Two documents resolve to the output path {path}")]
  OutputCollision { path: String },
}

impl BuildError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}
