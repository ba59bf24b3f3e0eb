//! Stylesheet and script synthesized on every build.
use std::{fs, path::Path};

use docwright_config::Config;
use docwright_templates as templates;

use crate::error::BuildError;

pub const ASSETS_DIR: &str = "assets";
pub const STYLESHEET_FILE: &str = "style.css";
pub const SCRIPT_FILE: &str = "main.js";

/// Compile the base stylesheet with the configured primary color and append
/// the highlight theme rules, if any.
///
/// # Errors
///
/// Returns [`BuildError::Stylesheet`] if the SCSS does not compile, which
/// usually means the configured color is not a valid CSS value.
pub fn stylesheet(
  config: &Config,
  theme_css: Option<&str>,
) -> Result<String, BuildError> {
  let color = config.theme.primary_color.trim();
  let source = format!("$primary-color: {color};\n{}", templates::STYLE_SCSS);
  let mut css = grass::from_string(source, &grass::Options::default())
    .map_err(|e| BuildError::Stylesheet(e.to_string()))?;

  if let Some(theme_css) = theme_css.filter(|css| !css.trim().is_empty()) {
    css.push_str("\n\n/* Syntax highlighting */\n");
    css.push_str(theme_css);
  }
  Ok(css)
}

/// Write `assets/style.css` and `assets/main.js` under `output_dir`.
///
/// # Errors
///
/// Returns an error if the stylesheet fails to compile or a file cannot be
/// written.
pub fn write_assets(
  output_dir: &Path,
  config: &Config,
  theme_css: Option<&str>,
) -> Result<(), BuildError> {
  let assets_dir = output_dir.join(ASSETS_DIR);
  fs::create_dir_all(&assets_dir)
    .map_err(|e| BuildError::io(&assets_dir, e))?;

  let css = stylesheet(config, theme_css)?;
  let css_path = assets_dir.join(STYLESHEET_FILE);
  fs::write(&css_path, css).map_err(|e| BuildError::io(&css_path, e))?;

  let js_path = assets_dir.join(SCRIPT_FILE);
  fs::write(&js_path, templates::MAIN_JS)
    .map_err(|e| BuildError::io(&js_path, e))?;

  log::debug!("Wrote assets to {}", assets_dir.display());
  Ok(())
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_primary_color_substitution() {
    let mut config = Config::default();
    config.theme.primary_color = "rebeccapurple".to_string();
    let css = stylesheet(&config, None).unwrap();
    assert!(css.contains("color: rebeccapurple"));
    assert!(!css.contains("$primary-color"));
  }

  #[test]
  fn test_theme_css_is_appended() {
    let css = stylesheet(&Config::default(), Some(".syntax-x { color: red; }"))
      .unwrap();
    assert!(css.ends_with(".syntax-x { color: red; }"));
  }

  #[test]
  fn test_invalid_color_fails() {
    let mut config = Config::default();
    config.theme.primary_color = "{".to_string();
    assert!(matches!(
      stylesheet(&config, None),
      Err(BuildError::Stylesheet(_))
    ));
  }
}
