//! Output path derivation.
use std::path::{Component, Path};

use docwright_model::DocumentKind;

/// Extension of every emitted page.
pub const OUTPUT_EXTENSION: &str = "html";

/// Namespace of pages generated from annotated sources.
pub const API_PREFIX: &str = "api";

/// Namespace of pages generated from component files.
pub const COMPONENT_PREFIX: &str = "components";

/// The output path of a source file, given relative to its category's root.
///
/// `guide/intro.md` becomes `guide/intro.html`, `utils/math.ts` becomes
/// `api/utils/math.html` and `Button.vue` becomes `components/Button.html`.
#[must_use]
pub fn output_path(rel: &Path, kind: DocumentKind) -> String {
  let mut path = rel.to_path_buf();
  path.set_extension(OUTPUT_EXTENSION);
  let path = slash_path(&path);
  match kind {
    DocumentKind::Prose => path,
    DocumentKind::Api => format!("{API_PREFIX}/{path}"),
    DocumentKind::Component => format!("{COMPONENT_PREFIX}/{path}"),
  }
}

/// A relative path joined with `/`, whatever the platform separator.
#[must_use]
pub fn slash_path(path: &Path) -> String {
  path
    .components()
    .filter_map(|component| {
      match component {
        Component::Normal(part) => Some(part.to_string_lossy()),
        _ => None,
      }
    })
    .collect::<Vec<_>>()
    .join("/")
}
