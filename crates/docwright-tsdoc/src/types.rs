use std::{fmt, path::PathBuf};

use docwright_model::MetaValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The six recognized declaration kinds.
///
/// Children of classes and interfaces only ever use [`Self::Function`] and
/// [`Self::Variable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
  Function,
  Class,
  Interface,
  Type,
  Variable,
  Enum,
}

impl AnnotationKind {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Function => "function",
      Self::Class => "class",
      Self::Interface => "interface",
      Self::Type => "type",
      Self::Variable => "variable",
      Self::Enum => "enum",
    }
  }
}

impl fmt::Display for AnnotationKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Source location of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
  pub file:   PathBuf,
  /// 1-based line of the declaration's first token.
  pub line:   u32,
  /// 1-based column of the declaration's first token.
  pub column: u32,
}

/// A parameter of a function, method or function-valued variable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Parameter {
  pub name:        String,
  /// Literal source text of the type annotation.
  pub type_text:   Option<String>,
  pub optional:    bool,
  /// Literal source text of the default value.
  pub default:     Option<String>,
  /// Text of the matching `@param` tag.
  pub description: Option<String>,
}

/// One documented program construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationNode {
  pub name:        String,
  pub kind:        AnnotationKind,
  /// First line of free text in the doc comment.
  pub description: String,
  /// Literal source text of the declaration head.
  pub signature:   String,
  pub parameters:  Vec<Parameter>,
  /// Literal source text of the return type.
  pub returns:     Option<String>,
  /// Literal source text of a declared type (variables, properties, aliases).
  pub type_text:   Option<String>,
  /// One entry per `@example` tag, code fences removed.
  pub examples:    Vec<String>,
  /// Every other tag; repeated tags collapse into a list.
  pub tags:        IndexMap<String, MetaValue>,
  pub source:      SourceLocation,
  /// Members of classes, interfaces, enums and object type aliases.
  pub children:    Vec<AnnotationNode>,
  /// Whether the declaration is exported from its file.
  pub exported:    bool,
}

impl AnnotationNode {
  /// An empty node of `kind` named `name` at `source`.
  #[must_use]
  pub fn new(
    name: impl Into<String>,
    kind: AnnotationKind,
    source: SourceLocation,
  ) -> Self {
    Self {
      name: name.into(),
      kind,
      description: String::new(),
      signature: String::new(),
      parameters: Vec::new(),
      returns: None,
      type_text: None,
      examples: Vec::new(),
      tags: IndexMap::new(),
      source,
      children: Vec::new(),
      exported: false,
    }
  }

  /// Whether the doc comment carries `@deprecated`.
  #[must_use]
  pub fn is_deprecated(&self) -> bool {
    self.tags.contains_key("deprecated")
  }

  /// Anchor-friendly identifier, unique within one file for top-level nodes.
  #[must_use]
  pub fn anchor(&self) -> String {
    format!("{}-{}", self.kind, self.name.to_lowercase())
  }
}
