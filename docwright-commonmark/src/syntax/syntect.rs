//! Syntect-based syntax highlighting backend.
//!
//! Emits classed HTML (`<span class="source js">`) instead of inline styles so
//! that one page can carry both a light and a dark theme; the matching
//! stylesheet comes from [`SyntaxHighlighter::theme_css`].

use std::sync::OnceLock;

use syntect::{
  highlighting::{Theme, ThemeSet},
  html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style},
  parsing::SyntaxSet,
  util::LinesWithEndings,
};

use super::{
  error::{SyntaxError, SyntaxResult},
  types::{SyntaxHighlighter, resolve_language},
};

const DEFAULT_LIGHT_THEME: &str = "InspiredGitHub";
const DEFAULT_DARK_THEME: &str = "base16-ocean.dark";

/// Syntect-based syntax highlighter
pub struct SyntectHighlighter {
  light_theme: String,
  dark_theme:  String,
}

impl SyntectHighlighter {
  /// Create a new Syntect highlighter with a light and a dark theme.
  #[must_use]
  pub fn new(light_theme: Option<String>, dark_theme: Option<String>) -> Self {
    Self {
      light_theme: light_theme
        .unwrap_or_else(|| DEFAULT_LIGHT_THEME.to_string()),
      dark_theme:  dark_theme.unwrap_or_else(|| DEFAULT_DARK_THEME.to_string()),
    }
  }

  /// Get the syntect `SyntaxSet`.
  fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
  }

  /// Get the bundled syntect `ThemeSet`.
  fn theme_set() -> &'static ThemeSet {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(ThemeSet::load_defaults)
  }

  /// Look up a theme by name.
  fn theme(name: &str) -> SyntaxResult<&'static Theme> {
    Self::theme_set()
      .themes
      .get(name)
      .ok_or_else(|| SyntaxError::MissingTheme(name.to_string()))
  }

  /// Names of the bundled themes.
  #[must_use]
  pub fn available_themes() -> Vec<String> {
    Self::theme_set().themes.keys().cloned().collect()
  }

  fn css_for(name: &str) -> SyntaxResult<String> {
    let theme = Self::theme(name)?;
    css_for_theme_with_class_style(theme, ClassStyle::Spaced)
      .map_err(|e| SyntaxError::Render(e.to_string()))
  }
}

impl Default for SyntectHighlighter {
  fn default() -> Self {
    Self::new(None, None)
  }
}

impl SyntaxHighlighter for SyntectHighlighter {
  fn name(&self) -> &'static str {
    "Syntect"
  }

  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String> {
    let syntax_set = Self::syntax_set();
    let resolved = resolve_language(language);
    let syntax = syntax_set
      .find_syntax_by_token(resolved)
      .ok_or_else(|| SyntaxError::UnknownLanguage(language.to_string()))?;

    let mut generator = ClassedHTMLGenerator::new_with_class_style(
      syntax,
      syntax_set,
      ClassStyle::Spaced,
    );
    for line in LinesWithEndings::from(code) {
      generator
        .parse_html_for_line_which_includes_newline(line)
        .map_err(|e| SyntaxError::Render(e.to_string()))?;
    }
    Ok(generator.finalize())
  }

  /// Light theme rules, then dark theme rules scoped to
  /// `prefers-color-scheme: dark`.
  fn theme_css(&self) -> Option<String> {
    let light = Self::css_for(&self.light_theme)
      .map_err(|e| log::warn!("Light highlight theme unavailable: {e}"))
      .ok()?;
    let mut css = light;
    match Self::css_for(&self.dark_theme) {
      Ok(dark) => {
        css.push_str("\n@media (prefers-color-scheme: dark) {\n");
        css.push_str(&dark);
        css.push_str("\n}\n");
      },
      Err(e) => log::warn!("Dark highlight theme unavailable: {e}"),
    }
    Some(css)
  }
}
