//! `docwright-components`.
//!
//! Describes UI components in two authoring styles with one output shape,
//! [`ComponentDescription`]:
//!
//! - single-file components (`.vue`): see [`extract_sfc`]
//! - function, arrow or class components written with JSX: see
//!   [`extract_jsx`]
//!
//! Missing sections degrade to empty lists. Only a file that cannot be read
//! or parsed at all produces an [`ExtractionError`].
mod jsx;
mod literal;
mod sfc;
mod types;
mod utils;

use std::path::Path;

pub use docwright_tsdoc::ExtractionError;
pub use jsx::extract_jsx;
pub use sfc::extract_sfc;
pub use types::{ComponentDescription, EventDoc, PropDoc, SlotDoc};

/// The authoring style of a component file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStyle {
  /// Template, script and style sections in one file.
  SingleFile,
  /// A function, arrow or class component returning JSX.
  Jsx,
}

/// Read and describe one component file.
///
/// # Errors
///
/// Returns [`ExtractionError::ReadFile`] if the file cannot be read, or
/// [`ExtractionError::Parse`] if it cannot be parsed.
pub fn extract_component_file(
  path: impl AsRef<Path>,
  style: ComponentStyle,
) -> Result<ComponentDescription, ExtractionError> {
  let path = path.as_ref();
  let src = std::fs::read_to_string(path).map_err(|source| {
    ExtractionError::ReadFile {
      path: path.to_path_buf(),
      source,
    }
  })?;
  match style {
    ComponentStyle::SingleFile => extract_sfc(&src, path),
    ComponentStyle::Jsx => extract_jsx(&src, path),
  }
}
