use serde::{Deserialize, Serialize};

/// Presentation settings consumed by the site builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
  /// Primary color token substituted into the synthesized stylesheet.
  pub primary_color: String,

  /// Logo image, relative to the base path or absolute URL.
  pub logo: Option<String>,

  /// Repository URL shown in the navbar.
  pub repo: Option<String>,

  /// Edit link pattern for prose pages. `:path` is replaced with the source
  /// path relative to the documents root.
  pub edit_link: Option<String>,

  /// Text placed in the page footer.
  pub footer: Option<String>,

  pub social_links: Vec<SocialLink>,
}

impl Default for ThemeConfig {
  fn default() -> Self {
    Self {
      primary_color: "#3eaf7c".to_string(),
      logo:          None,
      repo:          None,
      edit_link:     None,
      footer:        None,
      social_links:  Vec::new(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
  /// Short label or icon name (e.g. `github`).
  pub icon: String,
  pub link: String,
}

impl ThemeConfig {
  /// Resolve the edit link for a prose source path.
  #[must_use]
  pub fn edit_link_for(&self, source_rel_path: &str) -> Option<String> {
    self
      .edit_link
      .as_ref()
      .map(|pattern| pattern.replace(":path", source_rel_path))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_edit_link_substitution() {
    let theme = ThemeConfig {
      edit_link: Some(
        "https://example.com/repo/edit/main/docs/:path".to_string(),
      ),
      ..Default::default()
    };
    assert_eq!(
      theme.edit_link_for("guide/intro.md").as_deref(),
      Some("https://example.com/repo/edit/main/docs/guide/intro.md")
    );
    assert_eq!(ThemeConfig::default().edit_link_for("x.md"), None);
  }
}
