//! Small helpers for writing generated Markdown.

/// Wrap `text` in a code span, widening the fence when the text itself
/// contains backticks.
#[must_use]
pub fn inline_code(text: &str) -> String {
  let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
  if text.contains('`') {
    format!("`` {text} ``")
  } else {
    format!("`{text}`")
  }
}

/// Make `text` safe inside a GFM table cell.
#[must_use]
pub fn cell(text: &str) -> String {
  text
    .replace('|', "\\|")
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}
