//! Types for docwright-commonmark public API and internal use.
use serde::{Deserialize, Serialize};

/// Represents a heading in a Markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
  /// Heading text (inline content, no markdown formatting).
  pub text:  String,
  /// Heading level (1-6).
  pub level: u8,
  /// Slug used as the anchor ID.
  pub id:    String,
}

/// Result of Markdown processing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkdownResult {
  /// Rendered HTML output.
  pub html: String,

  /// Extracted headings (for `ToC`, navigation, search, etc).
  pub headers: Vec<Header>,

  /// Title of the document, if found (first H1).
  pub title: Option<String>,
}

/// Errors raised while rendering prose.
///
/// [`crate::MarkdownProcessor::render`] recovers from every variant by
/// emitting an inline placeholder; [`crate::MarkdownProcessor::try_render`]
/// surfaces them.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
  #[error("Failed to format HTML: {0}")]
  Format(#[from] std::fmt::Error),

  #[error("Failed to serialize HTML: {0}")]
  Serialize(#[from] std::io::Error),

  #[error("Renderer panicked: {0}")]
  Panic(String),
}
