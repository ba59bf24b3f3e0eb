//! Navigation bar and sidebar trees.
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A navbar entry. Either a direct link or a dropdown of nested items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
  pub text: String,

  /// Link target, relative to the base path unless it is an absolute URL.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link: Option<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub items: Vec<NavItem>,
}

/// A group of sidebar links. Groups are the only nesting level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarGroup {
  pub text: String,

  /// Whether the group can be folded by the reader.
  #[serde(default)]
  pub collapsible: bool,

  /// Initial state of a collapsible group.
  #[serde(default)]
  pub collapsed: bool,

  #[serde(default)]
  pub items: Vec<SidebarLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarLink {
  pub text: String,
  pub link: String,
}

impl NavItem {
  /// A nav item must point somewhere: a link, children, or both.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::Config`] for an item with neither.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.link.is_none() && self.items.is_empty() {
      return Err(ConfigError::Config(format!(
        "Navigation item '{}' needs a link or nested items",
        self.text
      )));
    }
    self.items.iter().try_for_each(Self::validate)
  }
}

impl SidebarGroup {
  /// # Errors
  ///
  /// Returns [`ConfigError::Config`] when a link in the group is empty.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if let Some(link) = self.items.iter().find(|link| link.link.is_empty()) {
      return Err(ConfigError::Config(format!(
        "Sidebar link '{}' in group '{}' has an empty target",
        link.text, self.text
      )));
    }
    Ok(())
  }
}

/// Whether a link leaves the site.
#[must_use]
pub fn is_external_link(link: &str) -> bool {
  link.starts_with("http://")
    || link.starts_with("https://")
    || link.starts_with("mailto:")
    || link.starts_with("//")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_nav_item_requires_target() {
    let item = NavItem {
      text:  "Guide".to_string(),
      link:  None,
      items: Vec::new(),
    };
    assert!(item.validate().is_err());

    let dropdown = NavItem {
      text:  "More".to_string(),
      link:  None,
      items: vec![NavItem {
        text:  "API".to_string(),
        link:  Some("api/index.html".to_string()),
        items: Vec::new(),
      }],
    };
    assert!(dropdown.validate().is_ok());
  }

  #[test]
  fn test_external_links() {
    assert!(is_external_link("https://example.com"));
    assert!(is_external_link("//cdn.example.com/x"));
    assert!(!is_external_link("guide/intro.html"));
    assert!(!is_external_link("/guide/intro.html"));
  }
}
