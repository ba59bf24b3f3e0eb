//! Parsing of `/** ... */` documentation comments.
use docwright_model::MetaValue;
use indexmap::IndexMap;

/// Structured content of one documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
  /// First line of free text before any tag.
  pub description: String,
  pub examples:    Vec<String>,
  /// Every tag other than `@example`, in first-seen order.
  pub tags:        IndexMap<String, MetaValue>,
  /// `@param` descriptions keyed by parameter name.
  pub params:      IndexMap<String, String>,
}

impl DocComment {
  /// The `@param` description for `name`, ignoring a rest-parameter prefix.
  #[must_use]
  pub fn param(&self, name: &str) -> Option<&str> {
    self
      .params
      .get(name.trim_start_matches("..."))
      .map(String::as_str)
  }
}

/// A tag and the lines belonging to it.
struct TagBlock<'a> {
  name:  &'a str,
  lines: Vec<&'a str>,
}

/// Strip the comment delimiters and the leading `*` gutter of each line.
fn comment_lines(raw: &str) -> Vec<&str> {
  let body = raw.trim();
  let body = body.strip_prefix("/**").unwrap_or(body);
  let body = body.strip_suffix("*/").unwrap_or(body);

  body
    .lines()
    .map(|line| {
      let line = line.trim_start();
      let line = line.strip_prefix('*').unwrap_or(line);
      line.strip_prefix(' ').unwrap_or(line).trim_end()
    })
    .collect()
}

/// Parse a raw `/** ... */` comment.
///
/// A tag runs until the next line starting with `@`, except inside a code
/// fence so that decorators in `@example` bodies stay put.
#[must_use]
pub fn parse_doc_comment(raw: &str) -> DocComment {
  let mut free_text = Vec::new();
  let mut blocks: Vec<TagBlock<'_>> = Vec::new();
  let mut in_fence = false;

  for line in comment_lines(raw) {
    let trimmed = line.trim_start();
    if !in_fence && trimmed.starts_with('@') {
      let (name, rest) = trimmed[1..]
        .split_once(char::is_whitespace)
        .unwrap_or((&trimmed[1..], ""));
      blocks.push(TagBlock {
        name,
        lines: vec![rest.trim_start()],
      });
      continue;
    }
    if trimmed.starts_with("```") {
      in_fence = !in_fence;
    }
    match blocks.last_mut() {
      Some(block) => block.lines.push(line),
      None => free_text.push(line),
    }
  }

  let mut doc = DocComment {
    description: free_text
      .iter()
      .map(|line| line.trim())
      .find(|line| !line.is_empty())
      .unwrap_or_default()
      .to_string(),
    ..DocComment::default()
  };

  for block in blocks {
    if block.name == "example" {
      doc.examples.push(example_body(&block.lines));
      continue;
    }

    let value = block
      .lines
      .iter()
      .map(|line| line.trim())
      .filter(|line| !line.is_empty())
      .collect::<Vec<_>>()
      .join(" ");

    if block.name == "param" {
      if let Some((name, description)) = split_param_tag(&value) {
        doc.params.entry(name).or_insert(description);
      }
    }

    match doc.tags.get_mut(block.name) {
      Some(existing) => existing.push(value),
      None => {
        doc.tags.insert(block.name.to_string(), MetaValue::Single(value));
      },
    }
  }

  doc
}

/// Join an `@example` body, dropping its code fence lines.
fn example_body(lines: &[&str]) -> String {
  let kept: Vec<&str> = lines
    .iter()
    .copied()
    .filter(|line| !line.trim_start().starts_with("```"))
    .collect();
  let start = kept.iter().position(|l| !l.trim().is_empty()).unwrap_or(0);
  let end = kept
    .iter()
    .rposition(|l| !l.trim().is_empty())
    .map_or(start, |i| i + 1);
  kept.get(start..end).unwrap_or_default().join("\n")
}

/// Split `{type} [name=default] - text` into the name and the text.
fn split_param_tag(value: &str) -> Option<(String, String)> {
  let mut rest = value.trim();
  if rest.starts_with('{') {
    let mut depth = 0usize;
    let close = rest.char_indices().find_map(|(i, c)| {
      match c {
        '{' => depth += 1,
        '}' => {
          depth -= 1;
          if depth == 0 {
            return Some(i);
          }
        },
        _ => {},
      }
      None
    })?;
    rest = rest[close + 1..].trim_start();
  }

  let (name, text) = rest
    .split_once(char::is_whitespace)
    .unwrap_or((rest, ""));
  let name = name.trim_start_matches('[').trim_end_matches(']');
  let name = name.split('=').next().unwrap_or(name);
  let name = name.trim_start_matches("...");
  if name.is_empty() {
    return None;
  }

  let text = text.trim_start();
  let text = text.strip_prefix('-').map_or(text, str::trim_start);
  Some((name.to_string(), text.to_string()))
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_description_is_first_free_line() {
    let doc = parse_doc_comment("/**\n * Adds two numbers.\n *\n * More detail.\n */");
    assert_eq!(doc.description, "Adds two numbers.");
    assert!(doc.tags.is_empty());
  }

  #[test]
  fn test_single_line_comment() {
    let doc = parse_doc_comment("/** Adds two numbers */");
    assert_eq!(doc.description, "Adds two numbers");
  }

  #[test]
  fn test_repeated_tags_collapse_into_list() {
    let doc = parse_doc_comment(
      "/**\n * Thing.\n * @see a\n * @see b\n * @since 1.2\n * @deprecated\n */",
    );
    assert_eq!(
      doc.tags.get("see"),
      Some(&MetaValue::List(vec!["a".into(), "b".into()]))
    );
    assert_eq!(doc.tags.get("since"), Some(&MetaValue::from("1.2")));
    assert_eq!(doc.tags.get("deprecated"), Some(&MetaValue::from("")));
  }

  #[test]
  fn test_examples_strip_fences() {
    let doc = parse_doc_comment(
      "/**\n * Sum.\n * @example\n * ```ts\n * @decorated()\n * add(1, 2)\n * \
       ```\n * @example add(3, 4)\n */",
    );
    assert_eq!(doc.examples, vec![
      "@decorated()\nadd(1, 2)".to_string(),
      "add(3, 4)".to_string()
    ]);
    assert!(!doc.tags.contains_key("example"));
  }

  #[test]
  fn test_multiline_tag_value() {
    let doc =
      parse_doc_comment("/**\n * @returns the sum\n *   of both inputs\n */");
    assert_eq!(
      doc.tags.get("returns"),
      Some(&MetaValue::from("the sum of both inputs"))
    );
    assert!(doc.description.is_empty());
  }

  #[test]
  fn test_param_descriptions() {
    let doc = parse_doc_comment(
      "/**\n * @param {number} a - first operand\n * @param [b=2] second\n * \
       @param ...rest others\n */",
    );
    assert_eq!(doc.param("a"), Some("first operand"));
    assert_eq!(doc.param("b"), Some("second"));
    assert_eq!(doc.param("...rest"), Some("others"));
    assert!(matches!(doc.tags.get("param"), Some(MetaValue::List(v)) if v.len() == 3));
  }
}
