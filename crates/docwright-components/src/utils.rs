use std::path::Path;

use regex::Regex;

/// Component name derived from a file name (`src/Button.vue` -> `Button`).
#[must_use]
pub fn file_stem_name(path: &Path) -> String {
  path
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_default()
}

/// A regex that never matches, for patterns that failed to compile.
///
/// # Panics
///
/// Never in practice; the pattern is a constant known to compile.
#[must_use]
#[allow(clippy::expect_used, reason = "Constant pattern")]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}
