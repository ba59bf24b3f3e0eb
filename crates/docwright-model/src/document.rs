use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Open key-value bag attached to a [`DocumentNode`].
///
/// Insertion order is preserved so that front matter keys come out in the
/// order they were written.
pub type Metadata = IndexMap<String, MetaValue>;

/// Category of a generated document.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
  /// Rendered from a prose (Markdown) file.
  Prose,
  /// Rendered from annotated declarations in a source file.
  Api,
  /// Rendered from a UI component file.
  Component,
}

impl DocumentKind {
  /// Lowercase identifier, matching the serialized form.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Prose => "prose",
      Self::Api => "api",
      Self::Component => "component",
    }
  }
}

impl fmt::Display for DocumentKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A metadata or tag value: either a single string or a list of strings.
///
/// Unknown keys are carried opaquely; nothing in the pipeline assumes a
/// fixed schema beyond the convenience accessors on [`DocumentNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
  Single(String),
  List(Vec<String>),
}

impl MetaValue {
  /// The value when it is a single string.
  #[must_use]
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Single(value) => Some(value),
      Self::List(_) => None,
    }
  }

  /// All values as a slice-like iterator, single values yield once.
  pub fn iter(&self) -> impl Iterator<Item = &str> {
    let values: &[String] = match self {
      Self::Single(value) => std::slice::from_ref(value),
      Self::List(values) => values,
    };
    values.iter().map(String::as_str)
  }

  /// Append a value, turning a single value into a list.
  pub fn push(&mut self, value: String) {
    match self {
      Self::Single(existing) => {
        let first = std::mem::take(existing);
        *self = Self::List(vec![first, value]);
      },
      Self::List(values) => values.push(value),
    }
  }

  /// Interpret the value as a boolean flag (`true`, `yes`, `1`).
  #[must_use]
  pub fn is_truthy(&self) -> bool {
    self.as_str().is_some_and(|value| {
      matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
    })
  }
}

impl From<&str> for MetaValue {
  fn from(value: &str) -> Self {
    Self::Single(value.to_string())
  }
}

impl From<String> for MetaValue {
  fn from(value: String) -> Self {
    Self::Single(value)
  }
}

impl From<Vec<String>> for MetaValue {
  fn from(values: Vec<String>) -> Self {
    Self::List(values)
  }
}

/// Metadata key holding the source path of a document, relative to the root
/// it was found under.
pub const SOURCE_KEY: &str = "source";

/// The canonical unit of output.
///
/// Created once per source file during a generation pass and never patched
/// afterwards; the next pass regenerates the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
  /// Output-relative location, unique within a build (e.g.
  /// `guide/intro.html`).
  pub path:     String,
  /// Display title. May be empty, in which case the site builder derives one
  /// from the path.
  pub title:    String,
  /// Rendered HTML body.
  pub content:  String,
  pub kind:     DocumentKind,
  pub metadata: Metadata,
}

impl DocumentNode {
  #[must_use]
  pub fn new(
    path: impl Into<String>,
    title: impl Into<String>,
    content: impl Into<String>,
    kind: DocumentKind,
  ) -> Self {
    Self {
      path: path.into(),
      title: title.into(),
      content: content.into(),
      kind,
      metadata: Metadata::new(),
    }
  }

  /// Attach metadata, replacing any previous bag.
  #[must_use]
  pub fn with_metadata(mut self, metadata: Metadata) -> Self {
    self.metadata = metadata;
    self
  }

  /// Single-valued metadata lookup.
  #[must_use]
  pub fn meta_str(&self, key: &str) -> Option<&str> {
    self.metadata.get(key).and_then(MetaValue::as_str)
  }

  #[must_use]
  pub fn description(&self) -> Option<&str> {
    self.meta_str("description")
  }

  /// Tags, whether written as a single value or a list.
  #[must_use]
  pub fn tags(&self) -> Vec<&str> {
    self
      .metadata
      .get("tags")
      .map(|value| value.iter().collect())
      .unwrap_or_default()
  }

  /// Source path relative to its root, when the generator recorded one.
  #[must_use]
  pub fn source(&self) -> Option<&str> {
    self.meta_str(SOURCE_KEY)
  }

  #[must_use]
  pub fn is_draft(&self) -> bool {
    self.metadata.get("draft").is_some_and(MetaValue::is_truthy)
  }
}

/// Turn a file stem into a display title: `getting-started` becomes
/// `Getting Started`.
#[must_use]
pub fn humanize(stem: &str) -> String {
  stem
    .split(['-', '_', ' '])
    .filter(|word| !word.is_empty())
    .map(|word| {
      let mut chars = word.chars();
      chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
      })
    })
    .collect::<Vec<_>>()
    .join(" ")
}
