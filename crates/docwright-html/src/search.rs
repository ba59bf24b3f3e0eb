//! Search index emitted next to the pages.
use std::{fs, path::Path};

use docwright_commonmark::utils::{html_headings, html_to_plaintext, truncate_chars};
use docwright_model::DocumentNode;
use serde::{Deserialize, Serialize};

use crate::{error::BuildError, navigation::display_title};

pub const SEARCH_INDEX_FILE: &str = "search-index.json";

/// One searchable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndexItem {
  /// Equal to the page path.
  pub id:       String,
  pub title:    String,
  /// Plain text of the page, cut to the configured length.
  pub content:  String,
  pub path:     String,
  /// Heading texts in document order.
  pub headings: Vec<String>,
}

impl SearchIndexItem {
  #[must_use]
  pub fn from_document(document: &DocumentNode, max_content_length: usize) -> Self {
    let text = html_to_plaintext(&document.content);
    let (content, _) = truncate_chars(&text, max_content_length);
    Self {
      id: document.path.clone(),
      title: display_title(document),
      content,
      path: document.path.clone(),
      headings: html_headings(&document.content)
        .into_iter()
        .map(|header| header.text)
        .collect(),
    }
  }
}

/// Index every document, in document order.
#[must_use]
pub fn build_search_index(
  documents: &[DocumentNode],
  max_content_length: usize,
) -> Vec<SearchIndexItem> {
  documents
    .iter()
    .map(|document| SearchIndexItem::from_document(document, max_content_length))
    .collect()
}

/// Write `items` as a JSON array to `search-index.json` in `output_dir`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_search_index(
  output_dir: &Path,
  items: &[SearchIndexItem],
) -> Result<(), BuildError> {
  let path = output_dir.join(SEARCH_INDEX_FILE);
  let json = serde_json::to_string(items)?;
  fs::write(&path, json).map_err(|e| BuildError::io(&path, e))?;
  log::info!("Search index written with {} entries", items.len());
  Ok(())
}
