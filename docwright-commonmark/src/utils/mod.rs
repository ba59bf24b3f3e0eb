use std::sync::LazyLock;

use kuchikikiki::{NodeRef, iter::NodeIterator};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use tendril::TendrilSink;

use crate::types::Header;

/// Characters left alone when percent-encoding a slug. Everything else that
/// survives the filter (CJK ideographs) is encoded as UTF-8.
const SLUG_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Slugify a string for use as an anchor ID.
///
/// Trims, lowercases, turns each whitespace run into a single `-`, drops every
/// character that is not an ASCII word character, a hyphen or a CJK ideograph,
/// and percent-encodes the result. The same text always yields the same slug;
/// slugs are never de-duplicated.
#[must_use]
pub fn slugify(text: &str) -> String {
  let lowered = text.trim().to_lowercase();

  let mut slug = String::with_capacity(lowered.len());
  let mut pending_hyphen = false;
  for c in lowered.chars() {
    if c.is_whitespace() {
      pending_hyphen = true;
      continue;
    }
    if pending_hyphen {
      slug.push('-');
      pending_hyphen = false;
    }
    if c.is_ascii_alphanumeric() || c == '_' || c == '-' || is_cjk(c) {
      slug.push(c);
    }
  }

  utf8_percent_encode(&slug, SLUG_ENCODE_SET).to_string()
}

const fn is_cjk(c: char) -> bool {
  matches!(c, '\u{4e00}'..='\u{9fa5}')
}

/// Strip Markdown syntax from raw text and truncate it to `max_chars`
/// characters, appending `...` when the text was cut.
///
/// Removes heading markers, emphasis markers, link syntax (keeping the link
/// text) and inline code markers.
#[must_use]
pub fn extract_excerpt(markdown: &str, max_chars: usize) -> String {
  static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s{0,3}#{1,6}\s*").unwrap_or_else(|e| {
      log::error!("Failed to compile HEADING_RE regex: {e}");
      never_matching_regex()
    })
  });
  static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").unwrap_or_else(|e| {
      log::error!("Failed to compile LINK_RE regex: {e}");
      never_matching_regex()
    })
  });
  static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*{1,3}|~~|(^|\s)_{1,3}|_{1,3}(\s|$|[.,;:!?)])")
      .unwrap_or_else(|e| {
        log::error!("Failed to compile EMPHASIS_RE regex: {e}");
        never_matching_regex()
      })
  });

  let text = HEADING_RE.replace_all(markdown, "");
  let text = LINK_RE.replace_all(&text, "$1");
  let text = EMPHASIS_RE.replace_all(&text, "$1$2");
  let text = text.replace('`', "");

  let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
  let (mut excerpt, truncated) = truncate_chars(&collapsed, max_chars);
  if truncated {
    excerpt.truncate(excerpt.trim_end().len());
    excerpt.push_str("...");
  }
  excerpt
}

/// Cut `text` to at most `max_chars` characters.
///
/// Returns the (possibly shortened) text and whether anything was removed.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
  match text.char_indices().nth(max_chars) {
    Some((idx, _)) => (text[..idx].to_string(), true),
    None => (text.to_string(), false),
  }
}

/// Plain text of an HTML fragment, whitespace collapsed.
///
/// Heading anchor markers and `<script>`/`<style>` bodies are skipped.
#[must_use]
pub fn html_to_plaintext(html: &str) -> String {
  let document = parse_body(html);
  if let Ok(noise) = document.select(".header-anchor, script, style") {
    for node in noise.collect::<Vec<_>>() {
      node.as_node().detach();
    }
  }
  let mut text = String::new();
  for node in document.inclusive_descendants().text_nodes() {
    for word in node.borrow().split_whitespace() {
      if !text.is_empty() {
        text.push(' ');
      }
      text.push_str(word);
    }
  }
  text
}

/// Headings of an already rendered HTML fragment, in document order.
///
/// Headings without an `id` get the slug of their text.
#[must_use]
pub fn html_headings(html: &str) -> Vec<Header> {
  let document = parse_body(html);
  let Ok(selection) = document.select("h1, h2, h3, h4, h5, h6") else {
    return Vec::new();
  };

  selection
    .filter_map(|heading| {
      let level = heading
        .name
        .local
        .as_ref()
        .strip_prefix('h')
        .and_then(|n| n.parse::<u8>().ok())?;
      let text = heading_text(heading.as_node());
      let id = heading
        .attributes
        .borrow()
        .get("id")
        .map_or_else(|| slugify(&text), ToString::to_string);
      Some(Header { text, level, id })
    })
    .collect()
}

/// Parse an HTML fragment as the body of a document.
///
/// The explicit `<body>` keeps leading `<script>`/`<style>` elements in the
/// body instead of letting the parser hoist them into `<head>`.
pub(crate) fn parse_body(html: &str) -> NodeRef {
  kuchikikiki::parse_html()
    .one(format!("<html><head></head><body>{html}</body></html>"))
}

/// Serialize the children of the document body.
pub(crate) fn serialize_body(document: &NodeRef) -> std::io::Result<String> {
  let mut out = Vec::new();
  if let Ok(body) = document.select_first("body") {
    for child in body.as_node().children() {
      child.serialize(&mut out)?;
    }
  }
  Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Text of a heading element without its anchor marker.
pub(crate) fn heading_text(heading: &NodeRef) -> String {
  heading
    .children()
    .filter(|child| {
      child.as_element().is_none_or(|el| {
        !el
          .attributes
          .borrow()
          .get("class")
          .is_some_and(|class| class.split_whitespace().any(|c| c == "header-anchor"))
      })
    })
    .map(|child| child.text_contents())
    .collect::<String>()
    .trim()
    .to_string()
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile.
#[must_use]
#[allow(
  clippy::expect_used,
  reason = "This pattern is guaranteed to be valid"
)]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}
