//! Highlighting failures.

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// A code block that could not be colored.
///
/// Never fatal: the processor logs it and emits the block as plain text.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
  /// No grammar matches the fence's language tag.
  #[error("no grammar for code fence language `{0}`")]
  UnknownLanguage(String),
  /// The configured color theme is not bundled.
  #[error("unknown color theme `{0}`")]
  MissingTheme(String),
  #[error("could not color code block: {0}")]
  Render(String),
}
