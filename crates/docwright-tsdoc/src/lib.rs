//! `docwright-tsdoc`.
//!
//! Extracts JSDoc-style documentation from TypeScript and JavaScript sources.
//! Each top-level function, class, interface, type alias, variable and enum
//! becomes an [`AnnotationNode`]; class and interface members are attached as
//! children. Type descriptors are kept as the literal source text of the type
//! expression, without cross-file resolution.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//!
//! use docwright_tsdoc::{AnnotationKind, extract_from_source};
//!
//! let src = "/** Adds two numbers */\nexport function add(a: number, b: number): number { return a + b; }";
//! let nodes = extract_from_source(src, Path::new("math.ts")).unwrap();
//! assert_eq!(nodes[0].name, "add");
//! assert_eq!(nodes[0].kind, AnnotationKind::Function);
//! ```

pub mod comment;
pub mod error;
mod extractor;
pub mod syntax;
mod types;

use std::path::Path;

pub use comment::{DocComment, parse_doc_comment};
pub use error::ExtractionError;
pub use types::{AnnotationKind, AnnotationNode, Parameter, SourceLocation};

/// Extract annotation nodes from source text.
///
/// `path` selects the dialect (TypeScript, JSX, ...) from its extension and
/// fills in [`SourceLocation::file`]; unknown extensions parse as TypeScript.
///
/// # Errors
///
/// Returns [`ExtractionError::Parse`] if the text is not a valid module.
pub fn extract_from_source(
  src: &str,
  path: &Path,
) -> Result<Vec<AnnotationNode>, ExtractionError> {
  extractor::extract_nodes(src, path)
}

/// Extract annotation nodes from a single source file.
///
/// # Errors
///
/// Returns [`ExtractionError::ReadFile`] if the file cannot be read, or
/// [`ExtractionError::Parse`] if it does not parse.
pub fn extract_from_file(
  path: impl AsRef<Path>,
) -> Result<Vec<AnnotationNode>, ExtractionError> {
  let path = path.as_ref();
  let src = std::fs::read_to_string(path).map_err(|source| {
    ExtractionError::ReadFile {
      path: path.to_path_buf(),
      source,
    }
  })?;
  log::trace!("Extracting annotations from {}", path.display());
  extract_from_source(&src, path)
}
