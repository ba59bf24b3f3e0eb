use serde::{Deserialize, Serialize};

/// Prose-processing toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct MarkdownConfig {
  /// Annotate fenced code blocks with line numbers.
  pub line_numbers: bool,

  /// Recognize `::: tip` style admonition blocks.
  pub admonitions: bool,

  /// Replace `:shortcode:` tokens with glyphs.
  pub glyphs: bool,

  /// Give headings `id` attributes and a permalink anchor.
  pub anchors: bool,

  /// Enable syntax highlighting for fenced code blocks.
  pub highlight: bool,

  /// Highlighting theme pair.
  pub theme: HighlightTheme,
}

impl Default for MarkdownConfig {
  fn default() -> Self {
    Self {
      line_numbers: false,
      admonitions:  true,
      glyphs:       true,
      anchors:      true,
      highlight:    true,
      theme:        HighlightTheme::default(),
    }
  }
}

/// Light and dark highlighting themes, by syntect theme name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightTheme {
  pub light: String,
  pub dark:  String,
}

impl Default for HighlightTheme {
  fn default() -> Self {
    Self {
      light: "InspiredGitHub".to_string(),
      dark:  "base16-ocean.dark".to_string(),
    }
  }
}
