//! Link resolution relative to the page being rendered.
use std::path::Path;

use docwright_config::{Config, sidebar::is_external_link};

/// Relative prefix leading from `page_path` back to the site root.
///
/// `index.html` gets an empty prefix, `guide/intro.html` gets `../`.
#[must_use]
pub fn root_prefix(page_path: &str) -> String {
  let depth = page_path.split('/').filter(|s| !s.is_empty()).count();
  if depth <= 1 {
    String::new()
  } else {
    "../".repeat(depth - 1)
  }
}

/// Resolves site links as seen from one page.
///
/// With the default base `/` internal links are relative, so the output can
/// be browsed straight from disk. Any other base produces absolute links
/// under that base.
#[derive(Debug, Clone)]
pub struct PageLinks<'a> {
  config:  &'a Config,
  current: &'a str,
  prefix:  String,
}

impl<'a> PageLinks<'a> {
  #[must_use]
  pub fn new(config: &'a Config, current: &'a str) -> Self {
    Self {
      config,
      current,
      prefix: root_prefix(current),
    }
  }

  /// Href for a site-relative `link`. External links and fragments pass
  /// through untouched.
  #[must_use]
  pub fn resolve(&self, link: &str) -> String {
    if is_external_link(link) || link.starts_with('#') {
      return link.to_string();
    }
    if self.config.normalized_base() == "/" {
      format!("{}{}", self.prefix, link.trim_start_matches('/'))
    } else {
      self.config.site_link(link)
    }
  }

  /// Href of the site root.
  #[must_use]
  pub fn root(&self) -> String {
    self.resolve("")
  }

  /// Whether `link` points at the page being rendered.
  #[must_use]
  pub fn is_active(&self, link: &str) -> bool {
    if is_external_link(link) {
      return false;
    }
    let target = link
      .split(['#', '?'])
      .next()
      .unwrap_or_default()
      .trim_start_matches('/');
    if target.is_empty() {
      return false;
    }
    if target.ends_with('/') {
      return Path::new(target).join("index.html") == Path::new(self.current);
    }
    target == self.current
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_root_prefix() {
    assert_eq!(root_prefix("index.html"), "");
    assert_eq!(root_prefix("guide/intro.html"), "../");
    assert_eq!(root_prefix("api/utils/math.html"), "../../");
  }

  #[test]
  fn test_relative_links_with_default_base() {
    let config = Config::default();
    let links = PageLinks::new(&config, "guide/intro.html");
    assert_eq!(links.resolve("api/math.html"), "../api/math.html");
    assert_eq!(links.resolve("/index.html"), "../index.html");
    assert_eq!(links.resolve("https://x.dev"), "https://x.dev");
    assert_eq!(links.resolve("#usage"), "#usage");
    assert_eq!(links.root(), "../");
  }

  #[test]
  fn test_absolute_links_with_custom_base() {
    let config = Config {
      base: "/lib".to_string(),
      ..Config::default()
    };
    let links = PageLinks::new(&config, "guide/intro.html");
    assert_eq!(links.resolve("api/math.html"), "/lib/api/math.html");
    assert_eq!(links.root(), "/lib/");
  }

  #[test]
  fn test_active_link() {
    let config = Config::default();
    let links = PageLinks::new(&config, "guide/index.html");
    assert!(links.is_active("guide/index.html"));
    assert!(links.is_active("/guide/index.html#setup"));
    assert!(links.is_active("guide/"));
    assert!(!links.is_active("guide/intro.html"));
    assert!(!links.is_active(""));
  }
}
