//! Candidate file discovery.
//!
//! Every root is walked in file-name order so that repeated runs over the
//! same tree visit files, and therefore emit documents, in the same order.
use std::path::{Path, PathBuf};

use docwright_config::{Config, ConfigError};
use walkdir::{DirEntry, WalkDir};

use crate::paths::slash_path;

/// Extensions of prose files.
const PROSE_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// Directory names holding tests rather than documented sources.
const TEST_DIRS: &[&str] = &["test", "tests", "__tests__", "__mocks__"];

/// Suffixes of type-declaration files.
const DECLARATION_SUFFIXES: &[&str] = &[".d.ts", ".d.mts", ".d.cts"];

/// The candidate files of one generation pass, per category.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceFiles {
  pub prose:      Vec<PathBuf>,
  pub api:        Vec<PathBuf>,
  pub components: Vec<PathBuf>,
}

impl SourceFiles {
  /// Walk every configured root.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::MissingPath`] if a configured root is not a
  /// directory.
  pub fn collect(config: &Config) -> Result<Self, ConfigError> {
    for (field, root) in config.input_roots() {
      if !root.is_dir() {
        return Err(ConfigError::MissingPath {
          field,
          path: root.to_path_buf(),
        });
      }
    }

    let output_dir = config.output_dir.as_path();
    let prose = config.docs_dir.as_deref().map_or_else(Vec::new, |root| {
      walk(root, output_dir, |path, _| has_extension(path, PROSE_EXTENSIONS))
    });

    let api = config.src_dir.as_deref().map_or_else(Vec::new, |root| {
      walk(root, output_dir, |path, rel| {
        has_extension(path, &config.api.extensions)
          && !is_excluded_source(rel, &config.api.exclude)
      })
    });

    let components =
      config
        .components_dir
        .as_deref()
        .map_or_else(Vec::new, |root| {
          walk(root, output_dir, |path, _| {
            has_extension(path, &config.components.sfc_extensions)
              || has_extension(path, &config.components.jsx_extensions)
          })
        });

    log::debug!(
      "Collected {} prose, {} source and {} component files",
      prose.len(),
      api.len(),
      components.len()
    );

    Ok(Self {
      prose,
      api,
      components,
    })
  }

  /// Every file, prose first, then sources, then components.
  #[must_use]
  pub fn all(&self) -> Vec<PathBuf> {
    self
      .prose
      .iter()
      .chain(&self.api)
      .chain(&self.components)
      .cloned()
      .collect()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.prose.len() + self.api.len() + self.components.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Files under `root` accepted by `keep`, which sees the path and the path
/// relative to `root`.
fn walk<F>(root: &Path, output_dir: &Path, keep: F) -> Vec<PathBuf>
where
  F: Fn(&Path, &Path) -> bool,
{
  let mut files = Vec::new();
  let walker = WalkDir::new(root)
    .follow_links(true)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|entry| !is_skipped_dir(entry, root, output_dir));

  for entry in walker {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        log::warn!("Skipping unreadable entry under {}: {e}", root.display());
        continue;
      },
    };
    if !entry.file_type().is_file() {
      continue;
    }
    let path = entry.path();
    let rel = path.strip_prefix(root).unwrap_or(path);
    if keep(path, rel) {
      files.push(path.to_path_buf());
    }
  }

  log::trace!("Found {} files under {}", files.len(), root.display());
  files
}

fn is_skipped_dir(entry: &DirEntry, root: &Path, output_dir: &Path) -> bool {
  if !entry.file_type().is_dir() || entry.path() == root {
    return false;
  }
  let name = entry.file_name().to_string_lossy();
  name.starts_with('.')
    || SKIPPED_DIRS.contains(&&*name)
    || entry.path() == output_dir
}

fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| {
      extensions
        .iter()
        .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(ext))
    })
}

/// Whether a source file, given relative to the source root, is a test,
/// a type declaration or explicitly excluded.
#[must_use]
pub fn is_excluded_source(rel: &Path, exclude: &[String]) -> bool {
  let in_test_dir = rel.parent().is_some_and(|parent| {
    parent.components().any(|component| {
      TEST_DIRS.contains(&&*component.as_os_str().to_string_lossy())
    })
  });
  if in_test_dir {
    return true;
  }

  let name = rel
    .file_name()
    .map(|name| name.to_string_lossy())
    .unwrap_or_default();
  if name.contains(".test.") || name.contains(".spec.") {
    return true;
  }
  if DECLARATION_SUFFIXES
    .iter()
    .any(|suffix| name.ends_with(suffix))
  {
    return true;
  }

  let rel = slash_path(rel);
  exclude
    .iter()
    .filter(|fragment| !fragment.is_empty())
    .any(|fragment| rel.contains(fragment.as_str()))
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
  use std::fs;

  use super::*;

  #[test]
  fn test_source_exclusions() {
    let none: &[String] = &[];
    assert!(is_excluded_source(Path::new("math.test.ts"), none));
    assert!(is_excluded_source(Path::new("math.spec.tsx"), none));
    assert!(is_excluded_source(Path::new("types/env.d.ts"), none));
    assert!(is_excluded_source(Path::new("__tests__/math.ts"), none));
    assert!(is_excluded_source(Path::new("lib/tests/util.ts"), none));
    assert!(!is_excluded_source(Path::new("lib/testing.ts"), none));
    assert!(!is_excluded_source(Path::new("math.ts"), none));

    let exclude = vec!["internal/".to_string()];
    assert!(is_excluded_source(Path::new("internal/hidden.ts"), &exclude));
  }

  #[test]
  fn test_collect_is_sorted_and_skips_output() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir_all(docs.join("guide")).unwrap();
    fs::create_dir_all(docs.join("out")).unwrap();
    fs::create_dir_all(docs.join("node_modules/pkg")).unwrap();
    for file in [
      "zeta.md",
      "alpha.md",
      "guide/intro.md",
      "out/old.md",
      "node_modules/pkg/readme.md",
      "notes.txt",
    ] {
      fs::write(docs.join(file), "# x\n").unwrap();
    }

    let config = Config {
      docs_dir: Some(docs.clone()),
      output_dir: docs.join("out"),
      ..Config::default()
    };
    let files = SourceFiles::collect(&config).unwrap();
    let rel: Vec<_> = files
      .prose
      .iter()
      .map(|path| slash_path(path.strip_prefix(&docs).unwrap()))
      .collect();
    assert_eq!(rel, vec!["alpha.md", "guide/intro.md", "zeta.md"]);
    assert!(files.api.is_empty());
    assert_eq!(files.len(), 3);
  }

  #[test]
  fn test_missing_root() {
    let config = Config {
      src_dir: Some(PathBuf::from("/definitely/not/here")),
      ..Config::default()
    };
    assert!(matches!(
      SourceFiles::collect(&config),
      Err(ConfigError::MissingPath { field: "src_dir", .. })
    ));
  }
}
