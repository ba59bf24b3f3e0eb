use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when extracting documentation from a source file.
///
/// Both variants are scoped to one file: callers report them and move on to
/// the next file.
#[derive(Debug, Error)]
pub enum ExtractionError {
  /// The source file could not be read from disk.
  #[error("failed to read `{path}`: {source}")]
  ReadFile {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The source could not be parsed.
  ///
  /// `oxc` recovers from many syntax errors and still yields a program; any
  /// reported error is treated as fatal for the file all the same, since a
  /// partial tree would silently drop declarations.
  #[error("failed to parse `{path}`: {message}")]
  Parse { path: PathBuf, message: String },
}
