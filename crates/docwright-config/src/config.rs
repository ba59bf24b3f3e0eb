use std::{
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
  error::ConfigError,
  markdown::MarkdownConfig,
  search::SearchConfig,
  sidebar::{NavItem, SidebarGroup},
  theme::ThemeConfig,
};

/// Configuration for the docwright generator.
///
/// [`Config`] is consumed, not owned, by the core: the command-line front end
/// builds one (usually through [`Config::from_file`]), plugins may replace it
/// through their `config` hook, and after [`Config::validate`] it is treated as
/// immutable for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Root directory of prose (Markdown) documents.
  pub docs_dir: Option<PathBuf>,

  /// Root directory of annotated source files.
  pub src_dir: Option<PathBuf>,

  /// Root directory of UI component files.
  pub components_dir: Option<PathBuf>,

  /// Output directory for the generated site. Cleared on every build.
  pub output_dir: PathBuf,

  /// Public base path the site is served from.
  pub base: String,

  /// Site title.
  pub title: String,

  /// Site description, used for the `description` meta tag.
  pub description: String,

  pub theme: ThemeConfig,

  /// Navbar entries.
  pub nav: Vec<NavItem>,

  /// Sidebar groups. When empty, the site builder derives one from the
  /// generated documents.
  pub sidebar: Vec<SidebarGroup>,

  pub markdown: MarkdownConfig,

  pub search: SearchConfig,

  pub api: ApiConfig,

  pub components: ComponentsConfig,

  /// Plugin names, in invocation order.
  pub plugins: Vec<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      docs_dir:       None,
      src_dir:        None,
      components_dir: None,
      output_dir:     PathBuf::from("dist"),
      base:           "/".to_string(),
      title:          "Documentation".to_string(),
      description:    String::new(),
      theme:          ThemeConfig::default(),
      nav:            Vec::new(),
      sidebar:        Vec::new(),
      markdown:       MarkdownConfig::default(),
      search:         SearchConfig::default(),
      api:            ApiConfig::default(),
      components:     ComponentsConfig::default(),
      plugins:        Vec::new(),
    }
  }
}

/// Settings for annotation extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  /// Only document declarations that are exported from their file.
  pub exported_only: bool,

  /// File extensions scanned under the source root.
  pub extensions: Vec<String>,

  /// Additional path fragments to skip, matched against the path relative to
  /// the source root.
  pub exclude: Vec<String>,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      exported_only: false,
      extensions:    ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs"]
        .map(String::from)
        .to_vec(),
      exclude:       Vec::new(),
    }
  }
}

/// Settings for component extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentsConfig {
  /// Extensions of template+script single-file components.
  pub sfc_extensions: Vec<String>,

  /// Extensions of function/class + JSX components.
  pub jsx_extensions: Vec<String>,
}

impl Default for ComponentsConfig {
  fn default() -> Self {
    Self {
      sfc_extensions: vec!["vue".to_string()],
      jsx_extensions: vec!["tsx".to_string(), "jsx".to_string()],
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON).
  ///
  /// Relative directories in the file are resolved against the directory
  /// containing it.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {e}",
        path.display()
      ))
    })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    let config: Self = match extension.as_deref() {
      Some("json") => {
        serde_json::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse JSON config from {}: {e}",
            path.display()
          ))
        })?
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse TOML config from {}: {e}",
            path.display()
          ))
        })?
      },
      Some(_) => {
        return Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )));
      },
      None => {
        return Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )));
      },
    };

    log::debug!("Loaded configuration from {}", path.display());
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.with_root(root))
  }

  /// Resolve every relative directory against `root`.
  #[must_use]
  pub fn with_root(mut self, root: &Path) -> Self {
    let resolve = |dir: &mut PathBuf| {
      if dir.is_relative() {
        *dir = root.join(&*dir);
      }
    };

    for dir in [
      self.docs_dir.as_mut(),
      self.src_dir.as_mut(),
      self.components_dir.as_mut(),
    ]
    .into_iter()
    .flatten()
    {
      resolve(dir);
    }
    resolve(&mut self.output_dir);
    self
  }

  /// Check that the configuration can drive a build.
  ///
  /// # Errors
  ///
  /// - [`ConfigError::Config`] when no input root is configured, or the
  ///   navigation/sidebar trees are malformed.
  /// - [`ConfigError::MissingPath`] when a configured root does not exist.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.docs_dir.is_none()
      && self.src_dir.is_none()
      && self.components_dir.is_none()
    {
      return Err(ConfigError::Config(
        "At least one of docs_dir, src_dir or components_dir must be provided."
          .to_string(),
      ));
    }

    for (field, dir) in self.input_roots() {
      if !dir.is_dir() {
        return Err(ConfigError::MissingPath {
          field,
          path: dir.to_path_buf(),
        });
      }
    }

    if self.output_dir.as_os_str().is_empty() {
      return Err(ConfigError::Config(
        "output_dir must not be empty".to_string(),
      ));
    }

    self.nav.iter().try_for_each(NavItem::validate)?;
    self.sidebar.iter().try_for_each(SidebarGroup::validate)?;

    Ok(())
  }

  /// Configured input roots with the name of the field they came from.
  #[must_use]
  pub fn input_roots(&self) -> Vec<(&'static str, &Path)> {
    [
      ("docs_dir", self.docs_dir.as_deref()),
      ("src_dir", self.src_dir.as_deref()),
      ("components_dir", self.components_dir.as_deref()),
    ]
    .into_iter()
    .filter_map(|(field, dir)| dir.map(|dir| (field, dir)))
    .collect()
  }

  /// The base path with exactly one leading and one trailing slash.
  #[must_use]
  pub fn normalized_base(&self) -> String {
    let trimmed = self.base.trim().trim_matches('/');
    if trimmed.is_empty() {
      "/".to_string()
    } else {
      format!("/{trimmed}/")
    }
  }

  /// Prefix a site-relative link with the base path.
  #[must_use]
  pub fn site_link(&self, link: &str) -> String {
    if crate::sidebar::is_external_link(link) {
      return link.to_string();
    }
    format!("{}{}", self.normalized_base(), link.trim_start_matches('/'))
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_from_toml_file_resolves_relative_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("docwright.toml");
    fs::write(
      &path,
      r##"
docs_dir = "docs"
output_dir = "out"
title = "My Lib"
plugins = ["a", "b"]

[theme]
primary_color = "#ff0000"

[[sidebar]]
text = "Guide"
collapsible = true
items = [{ text = "Intro", link = "guide/intro.html" }]

[search]
max_content_length = 200
"##,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.docs_dir, Some(dir.path().join("docs")));
    assert_eq!(config.output_dir, dir.path().join("out"));
    assert_eq!(config.title, "My Lib");
    assert_eq!(config.plugins, vec!["a", "b"]);
    assert_eq!(config.theme.primary_color, "#ff0000");
    assert!(config.sidebar[0].collapsible);
    assert_eq!(config.search.max_content_length, 200);
    assert!(config.search.enable);
    assert!(config.markdown.admonitions);
  }

  #[test]
  fn test_from_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("docwright.json");
    fs::write(&path, r#"{ "src_dir": "src", "base": "docs" }"#).unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.src_dir, Some(dir.path().join("src")));
    assert_eq!(config.normalized_base(), "/docs/");
  }

  #[test]
  fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("docwright.yaml");
    fs::write(&path, "title: x").unwrap();
    assert!(matches!(
      Config::from_file(&path),
      Err(ConfigError::Config(_))
    ));
  }

  #[test]
  fn test_validate_requires_a_root() {
    let config = Config::default();
    assert!(matches!(config.validate(), Err(ConfigError::Config(_))));
  }

  #[test]
  fn test_validate_missing_path_is_fatal() {
    let dir = tempdir().unwrap();
    let config = Config {
      docs_dir: Some(dir.path().join("missing")),
      ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(
      &err,
      ConfigError::MissingPath { field: "docs_dir", path } if *path == dir.path().join("missing")
    ));
  }

  #[test]
  fn test_site_link() {
    let config = Config {
      base: "/lib/".to_string(),
      ..Default::default()
    };
    assert_eq!(config.site_link("guide/a.html"), "/lib/guide/a.html");
    assert_eq!(config.site_link("/guide/a.html"), "/lib/guide/a.html");
    assert_eq!(config.site_link("https://x.dev"), "https://x.dev");
    assert_eq!(Config::default().normalized_base(), "/");
  }
}
