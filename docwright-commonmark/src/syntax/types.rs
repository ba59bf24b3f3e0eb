//! Core types and traits for syntax highlighting.

use super::error::SyntaxResult;

/// Trait for syntax highlighting backends.
///
/// The processor hands every fenced code block with a language tag to the
/// injected highlighter and splices the returned HTML into the `<code>`
/// element. Implementations return inline markup only (spans), never the
/// surrounding `<pre>`.
pub trait SyntaxHighlighter: Send + Sync {
  /// Get the name of this highlighter backend
  fn name(&self) -> &'static str;

  /// Highlight `code` written in `language` (the fence info string).
  ///
  /// # Errors
  ///
  /// Returns an error when the language is unknown or highlighting fails.
  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String>;

  /// Stylesheet for the classes emitted by [`Self::highlight`], if the
  /// backend emits classes rather than inline styles.
  fn theme_css(&self) -> Option<String> {
    None
  }
}

/// Adapts a plain function into a [`SyntaxHighlighter`].
///
/// ```rust
/// use docwright_commonmark::{FnHighlighter, SyntaxHighlighter};
///
/// let upper = FnHighlighter::new(|code: &str, _lang: &str| code.to_uppercase());
/// assert_eq!(upper.highlight("let x", "js").ok().as_deref(), Some("LET X"));
/// ```
pub struct FnHighlighter<F> {
  func: F,
}

impl<F> FnHighlighter<F>
where
  F: Fn(&str, &str) -> String + Send + Sync,
{
  #[must_use]
  pub const fn new(func: F) -> Self {
    Self { func }
  }
}

impl<F> SyntaxHighlighter for FnHighlighter<F>
where
  F: Fn(&str, &str) -> String + Send + Sync,
{
  fn name(&self) -> &'static str {
    "Function"
  }

  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String> {
    Ok((self.func)(code, language))
  }
}

/// Map common fence tags onto the names a backend is likely to know.
#[must_use]
pub fn resolve_language(language: &str) -> &str {
  match language {
    "ts" | "typescript" | "tsx" | "jsx" | "mjs" | "cjs" | "mts" | "cts" => "js",
    "vue" | "svelte" => "html",
    "sh" | "shell" | "zsh" | "console" => "bash",
    "yml" => "yaml",
    "py" => "python",
    "rb" => "ruby",
    "md" => "markdown",
    other => other,
  }
}
