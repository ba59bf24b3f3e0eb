//! Syntax highlighting behind an injected [`SyntaxHighlighter`].
//!
//! The processor never depends on a concrete backend. With the `syntect`
//! feature (on by default) [`SyntectHighlighter`] is used unless the embedder
//! injects its own through
//! [`MarkdownProcessor::with_highlighter`](crate::MarkdownProcessor::with_highlighter).

pub mod error;
pub mod types;

pub use error::{SyntaxError, SyntaxResult};
pub use types::{FnHighlighter, SyntaxHighlighter, resolve_language};

#[cfg(feature = "syntect")] mod syntect;
#[cfg(feature = "syntect")] pub use syntect::SyntectHighlighter;

/// Create the default highlighter for the enabled features.
#[must_use]
pub fn create_default_highlighter(
  light_theme: Option<String>,
  dark_theme: Option<String>,
) -> Option<std::sync::Arc<dyn SyntaxHighlighter>> {
  #[cfg(feature = "syntect")]
  {
    Some(std::sync::Arc::new(SyntectHighlighter::new(light_theme, dark_theme)))
  }

  #[cfg(not(feature = "syntect"))]
  {
    let _ = (light_theme, dark_theme);
    log::debug!("No syntax highlighting backend compiled in");
    None
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_language_resolution() {
    assert_eq!(resolve_language("ts"), "js");
    assert_eq!(resolve_language("vue"), "html");
    assert_eq!(resolve_language("rust"), "rust");
  }

  #[test]
  fn test_fn_highlighter() {
    let highlighter =
      FnHighlighter::new(|code: &str, lang: &str| format!("[{lang}]{code}"));
    assert_eq!(highlighter.name(), "Function");
    assert_eq!(highlighter.highlight("x", "js").unwrap(), "[js]x");
    assert!(highlighter.theme_css().is_none());
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_syntect_highlight_simple() {
    let highlighter = SyntectHighlighter::default();
    let html = highlighter
      .highlight("fn main() {}\n", "rust")
      .expect("Failed to highlight code");
    assert!(html.contains("main"));
    assert!(html.contains("<span class="));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_syntect_unknown_language() {
    let highlighter = SyntectHighlighter::default();
    assert!(matches!(
      highlighter.highlight("x", "no-such-language"),
      Err(SyntaxError::UnknownLanguage(_))
    ));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_syntect_theme_css_has_dark_block() {
    let css = SyntectHighlighter::default()
      .theme_css()
      .expect("default themes are bundled");
    assert!(css.contains("prefers-color-scheme: dark"));
    assert!(SyntectHighlighter::available_themes().contains(&"InspiredGitHub".to_string()));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_syntect_missing_theme() {
    let highlighter = SyntectHighlighter::new(Some("Nope".to_string()), None);
    assert!(highlighter.theme_css().is_none());
  }
}
