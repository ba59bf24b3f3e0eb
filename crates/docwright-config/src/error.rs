use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type for docwright-config operations.
///
/// Every variant is fatal to a run: nothing downstream can proceed without a
/// valid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Configured {field} does not exist: {}", path.display())]
  MissingPath { field: &'static str, path: PathBuf },

  #[error("Unknown plugin: {0}")]
  UnknownPlugin(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serde error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),
}
