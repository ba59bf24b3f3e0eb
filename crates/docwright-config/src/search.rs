use serde::{Deserialize, Serialize};

/// Configuration for search functionality
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
  /// Whether `search-index.json` is emitted and the search box rendered
  pub enable: bool,

  /// Maximum number of characters of plain text kept per indexed page
  pub max_content_length: usize,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      enable:             true,
      max_content_length: 500,
    }
  }
}
