//! Bracket-aware scanning over TypeScript source text.
//!
//! The extractor takes declarations, parameters and doc comments from the
//! `oxc` tree and uses these helpers for the pieces it reads straight from
//! source text: property members, enum bodies and export lists. The component
//! extractor reuses them for `<script>` blocks.
use std::{iter::Peekable, str::CharIndices};

use crate::types::Parameter;

/// Modifiers accepted in front of a class or interface member.
const MEMBER_MODIFIERS: &[&str] = &[
  "public",
  "private",
  "protected",
  "static",
  "readonly",
  "abstract",
  "override",
  "declare",
  "async",
  "accessor",
  "get",
  "set",
];

/// Modifiers accepted in front of a (constructor) parameter.
const PARAM_MODIFIERS: &[&str] =
  &["public", "private", "protected", "readonly", "override"];

/// A class member, interface signature or object type member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
  pub name:      String,
  pub method:    bool,
  pub optional:  bool,
  pub params:    Vec<Parameter>,
  pub returns:   Option<String>,
  pub type_text: Option<String>,
  pub default:   Option<String>,
}

/// Characters of `text` at nesting depth zero, outside strings and comments.
///
/// Opening brackets at depth zero are included; their contents are not.
/// A closing bracket with no matching opener is reported as-is, which lets
/// callers find the end of a group by scanning the text after its opener.
///
/// A `<` followed by whitespace, `=` or `<` is an operator. Any other `<`
/// opens a type argument list, closed by the next `>` inside the same group;
/// a closing bracket also drops argument lists left open inside it.
#[must_use]
pub fn top_level_chars(text: &str) -> Vec<(usize, char)> {
  let mut out = Vec::new();
  let mut open: Vec<char> = Vec::new();
  let mut prev = '\0';
  let mut chars = text.char_indices().peekable();

  while let Some((i, c)) = chars.next() {
    match c {
      '"' | '\'' | '`' => skip_string(&mut chars, c),
      '/' if matches!(chars.peek(), Some((_, '/'))) => {
        while chars.next_if(|&(_, n)| n != '\n').is_some() {}
      },
      '/' if matches!(chars.peek(), Some((_, '*'))) => {
        chars.next();
        let mut last = '\0';
        for (_, n) in chars.by_ref() {
          if last == '*' && n == '/' {
            break;
          }
          last = n;
        }
      },
      '<' if chars
        .peek()
        .is_some_and(|&(_, n)| n.is_whitespace() || matches!(n, '=' | '<')) =>
      {
        if open.is_empty() {
          out.push((i, c));
        }
      },
      '(' | '[' | '{' | '<' => {
        if open.is_empty() {
          out.push((i, c));
        }
        open.push(c);
      },
      ')' | ']' | '}' => {
        let opener = match c {
          ')' => '(',
          ']' => '[',
          _ => '{',
        };
        if open.contains(&opener) {
          while open.pop().is_some_and(|top| top != opener) {}
        } else {
          open.clear();
          out.push((i, c));
        }
      },
      // `=>` never closes a type argument list.
      '>' if prev != '=' => {
        if open.last() == Some(&'<') {
          open.pop();
        } else if open.is_empty() {
          out.push((i, c));
        }
      },
      _ => {
        if open.is_empty() {
          out.push((i, c));
        }
      },
    }
    prev = c;
  }

  out
}

fn skip_string(chars: &mut Peekable<CharIndices<'_>>, quote: char) {
  let mut escaped = false;
  for (_, c) in chars.by_ref() {
    if escaped {
      escaped = false;
    } else if c == '\\' {
      escaped = true;
    } else if c == quote {
      break;
    }
  }
}

/// Byte offset of the first top-level `needle`.
#[must_use]
pub fn find_top_level(text: &str, needle: char) -> Option<usize> {
  top_level_chars(text)
    .into_iter()
    .find(|&(_, c)| c == needle)
    .map(|(i, _)| i)
}

/// Byte offset of the bracket closing the group opened at `open`.
#[must_use]
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
  let opener = text[open..].chars().next()?;
  let closer = match opener {
    '(' => ')',
    '[' => ']',
    '{' => '}',
    '<' => '>',
    _ => return None,
  };
  let inner = open + opener.len_utf8();
  top_level_chars(&text[inner..])
    .into_iter()
    .find(|&(_, c)| c == closer)
    .map(|(i, _)| inner + i)
}

/// Byte offset of the first top-level assignment `=`, skipping `=>`, `==`,
/// `!=`, `<=` and `>=`.
#[must_use]
pub fn find_assignment(text: &str) -> Option<usize> {
  top_level_chars(text)
    .into_iter()
    .filter(|&(_, c)| c == '=')
    .map(|(i, _)| i)
    .find(|&i| {
      let before = text[..i].chars().next_back();
      let after = text[i + 1..].chars().next();
      !matches!(before, Some('=' | '!' | '<' | '>'))
        && !matches!(after, Some('=' | '>'))
    })
}

/// Split `text` on any top-level separator in `seps`.
///
/// Pieces are trimmed and empty pieces dropped; each carries the byte offset
/// of its first character within `text`.
#[must_use]
pub fn split_top_level<'t>(text: &'t str, seps: &[char]) -> Vec<(usize, &'t str)> {
  let mut pieces = Vec::new();
  let mut start = 0;
  for (i, c) in top_level_chars(text) {
    if seps.contains(&c) {
      push_piece(text, start, i, &mut pieces);
      start = i + c.len_utf8();
    }
  }
  push_piece(text, start, text.len(), &mut pieces);
  pieces
}

fn push_piece<'t>(
  text: &'t str,
  start: usize,
  end: usize,
  out: &mut Vec<(usize, &'t str)>,
) {
  let raw = &text[start..end];
  let trimmed = raw.trim_start();
  let offset = start + raw.len() - trimmed.len();
  let trimmed = trimmed.trim_end();
  if !trimmed.is_empty() {
    out.push((offset, trimmed));
  }
}

/// Split the body of an interface, object type or enum into members.
///
/// Members may be separated by `;`, `,` or a bare line break. Lines that
/// continue a union, an arrow type or an assignment are joined back to their
/// member, and a comment on its own line is attached to the member below it.
#[must_use]
pub fn split_members(text: &str) -> Vec<(usize, &str)> {
  let mut merged: Vec<(usize, &str)> = Vec::new();
  for (offset, piece) in split_top_level(text, &[';', ',', '\n']) {
    if let Some(last) = merged.last_mut() {
      if continues(last.1, piece) {
        let end = offset + piece.len();
        *last = (last.0, &text[last.0..end]);
        continue;
      }
    }
    merged.push((offset, piece));
  }
  merged
}

fn continues(prev: &str, next: &str) -> bool {
  let (_, prev_code) = leading_doc(prev);
  prev_code.is_empty()
    || ["|", "&", ":", "=", "=>"].iter().any(|t| prev.ends_with(t))
    || ["|", "&", "=>", "."].iter().any(|t| next.starts_with(t))
}

/// Split leading comments off `text`.
///
/// Returns the last `/** ... */` comment among them, if any, and the
/// remaining code.
#[must_use]
pub fn leading_doc(text: &str) -> (Option<&str>, &str) {
  let mut rest = text.trim_start();
  let mut doc = None;
  loop {
    if rest.starts_with("/*") {
      let Some(end) = rest[2..].find("*/").map(|i| i + 4) else {
        return (doc, "");
      };
      let comment = &rest[..end];
      if comment.starts_with("/**") && comment.len() > 4 {
        doc = Some(comment);
      }
      rest = rest[end..].trim_start();
    } else if rest.starts_with("//") {
      rest = rest.find('\n').map_or("", |i| rest[i..].trim_start());
    } else {
      return (doc, rest);
    }
  }
}

/// 1-based line and column of byte `offset` in `src`.
#[must_use]
pub fn line_col(src: &str, offset: usize) -> (u32, u32) {
  let offset = offset.min(src.len());
  let before = &src[..offset];
  let line = before.matches('\n').count() + 1;
  let line_start = before.rfind('\n').map_or(0, |i| i + 1);
  let column = before[line_start..].chars().count() + 1;
  (
    u32::try_from(line).unwrap_or(u32::MAX),
    u32::try_from(column).unwrap_or(u32::MAX),
  )
}

#[must_use]
pub fn is_ident_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_' || c == '$'
}

/// The identifier at the start of `text`, possibly empty.
#[must_use]
pub fn ident_prefix(text: &str) -> &str {
  let end = text
    .char_indices()
    .find(|&(_, c)| !is_ident_char(c))
    .map_or(text.len(), |(i, _)| i);
  &text[..end]
}

/// Remove the surrounding quotes of a string literal, if present.
#[must_use]
pub fn unquote(text: &str) -> &str {
  let text = text.trim();
  for quote in ['"', '\'', '`'] {
    if let Some(inner) = text
      .strip_prefix(quote)
      .and_then(|t| t.strip_suffix(quote))
    {
      return inner;
    }
  }
  text
}

/// Type text after an annotation colon, with trailing separators removed.
#[must_use]
pub fn strip_type_colon(text: &str) -> Option<String> {
  let text = text.trim();
  let text = text.strip_prefix(':').unwrap_or(text);
  let text = trim_terminator(text);
  (!text.is_empty()).then(|| text.to_string())
}

/// `text` trimmed, without a trailing `;` or `,`.
#[must_use]
pub fn trim_terminator(text: &str) -> &str {
  text.trim().trim_end_matches([';', ',']).trim_end()
}

fn strip_decorators(text: &str) -> &str {
  let mut rest = text.trim_start();
  while let Some(after_at) = rest.strip_prefix('@') {
    let end = after_at
      .char_indices()
      .find(|&(_, c)| !(is_ident_char(c) || c == '.'))
      .map_or(after_at.len(), |(i, _)| i);
    let mut after = &after_at[end..];
    if after.starts_with('(') {
      after = matching_close(after, 0).map_or("", |close| &after[close + 1..]);
    }
    rest = after.trim_start();
  }
  rest
}

/// Strip leading modifier keywords, returning the rest and the modifiers.
fn strip_modifiers<'t>(
  text: &'t str,
  modifiers: &[&str],
) -> (&'t str, Vec<&'t str>) {
  let mut rest = text.trim_start();
  let mut found = Vec::new();
  loop {
    let word = ident_prefix(rest);
    if word.is_empty() || !modifiers.contains(&word) {
      break;
    }
    let after = &rest[word.len()..];
    let next = after.trim_start();
    let separated = next.len() < after.len();
    let starts_name = next.chars().next().is_some_and(|c| {
      is_ident_char(c) || matches!(c, '#' | '"' | '\'' | '*' | '[')
    });
    if !(separated && starts_name) {
      break;
    }
    found.push(word);
    rest = next;
  }
  (rest, found)
}

/// Split a member name (identifier or quoted key) off the front of `text`.
fn split_name(text: &str) -> Option<(String, &str)> {
  if let Some(quote) = text.chars().next().filter(|c| matches!(c, '"' | '\'')) {
    let close = text[1..].find(quote)? + 1;
    return Some((text[1..close].to_string(), &text[close + 1..]));
  }
  let name = ident_prefix(text);
  (!name.is_empty()).then(|| (name.to_string(), &text[name.len()..]))
}

/// Parse one parameter as written in a parameter list.
///
/// Returns `None` for a TypeScript `this` parameter or an empty slot.
#[must_use]
pub fn parse_parameter(text: &str) -> Option<Parameter> {
  let (_, text) = leading_doc(text);
  let text = strip_decorators(text);
  let (text, _) = strip_modifiers(text, PARAM_MODIFIERS);

  let (head, default) = match find_assignment(text) {
    Some(i) => (&text[..i], Some(text[i + 1..].trim().to_string())),
    None => (text, None),
  };
  let (name_part, type_text) = match find_top_level(head, ':') {
    Some(i) => (&head[..i], strip_type_colon(&head[i + 1..])),
    None => (head, None),
  };

  let mut name = name_part.trim();
  let mut optional = default.is_some();
  if let Some(stripped) = name.strip_suffix('?') {
    optional = true;
    name = stripped.trim_end();
  }
  if name.is_empty() || name == "this" {
    return None;
  }

  Some(Parameter {
    name: name.to_string(),
    type_text,
    optional,
    default: default.filter(|d| !d.is_empty()),
    description: None,
  })
}

/// Parse a parameter list, with or without its surrounding parentheses.
#[must_use]
pub fn parse_params_list(text: &str) -> Vec<Parameter> {
  let text = text.trim();
  let inner = text
    .strip_prefix('(')
    .and_then(|t| t.strip_suffix(')'))
    .unwrap_or(text);
  split_top_level(inner, &[','])
    .into_iter()
    .filter_map(|(_, piece)| parse_parameter(piece))
    .collect()
}

/// Parse a class member, interface signature or object type member.
///
/// Private members (`private` or `#name`), index signatures and computed
/// keys yield `None`. A method's text should stop before its body.
#[must_use]
pub fn parse_member(text: &str) -> Option<Member> {
  let (_, text) = leading_doc(text);
  let text = strip_decorators(text);
  let (rest, modifiers) = strip_modifiers(text, MEMBER_MODIFIERS);
  if modifiers.contains(&"private") || rest.starts_with(['#', '[']) {
    return None;
  }
  let rest = rest.strip_prefix('*').map_or(rest, str::trim_start);

  let (name, after) = split_name(rest)?;
  let mut after = after.trim_start();
  let mut optional = false;
  if let Some(stripped) = after.strip_prefix('?') {
    optional = true;
    after = stripped.trim_start();
  } else if let Some(stripped) = after.strip_prefix('!') {
    after = stripped.trim_start();
  }

  if after.starts_with(['(', '<']) {
    let open = find_top_level(after, '(')?;
    let close = matching_close(after, open)?;
    let tail = after[close + 1..].trim();
    return Some(Member {
      name,
      method: true,
      optional,
      params: parse_params_list(&after[open..=close]),
      returns: tail.strip_prefix(':').and_then(strip_type_colon),
      type_text: None,
      default: None,
    });
  }

  let (declared, default) = match find_assignment(after) {
    Some(i) => (&after[..i], Some(trim_terminator(&after[i + 1..]))),
    None => (after, None),
  };
  let declared = declared.trim();
  let type_text = declared.strip_prefix(':').and_then(strip_type_colon);

  Some(Member {
    name,
    method: false,
    optional,
    params: Vec::new(),
    returns: None,
    type_text,
    default: default.filter(|d| !d.is_empty()).map(ToString::to_string),
  })
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_split_respects_nesting() {
    let pieces: Vec<&str> =
      split_top_level("a: Map<string, number>, b = [1, 2], c: { x, y }", &[','])
        .into_iter()
        .map(|(_, p)| p)
        .collect();
    assert_eq!(pieces, vec![
      "a: Map<string, number>",
      "b = [1, 2]",
      "c: { x, y }"
    ]);
  }

  #[test]
  fn test_split_skips_strings_and_comments() {
    let pieces = split_top_level("a = ',' /* , */, b", &[',']);
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[1], (17, "b"));
  }

  #[test]
  fn test_arrow_is_not_assignment() {
    assert_eq!(find_assignment("cb: (x: number) => void"), None);
    assert_eq!(find_assignment("n: number = 3"), Some(10));
    assert_eq!(find_assignment("ok = a == b"), Some(3));
  }

  #[test]
  fn test_parse_parameter_forms() {
    let p = parse_parameter("a: number").unwrap();
    assert_eq!(p.name, "a");
    assert_eq!(p.type_text.as_deref(), Some("number"));
    assert!(!p.optional);

    let p = parse_parameter("label?: string").unwrap();
    assert!(p.optional);
    assert_eq!(p.name, "label");

    let p = parse_parameter("count = 10").unwrap();
    assert!(p.optional);
    assert_eq!(p.default.as_deref(), Some("10"));
    assert_eq!(p.type_text, None);

    let p = parse_parameter("...rest: string[]").unwrap();
    assert_eq!(p.name, "...rest");

    let p = parse_parameter("{ a, b }: Options").unwrap();
    assert_eq!(p.name, "{ a, b }");
    assert_eq!(p.type_text.as_deref(), Some("Options"));

    let p = parse_parameter("private readonly http: Client").unwrap();
    assert_eq!(p.name, "http");

    assert!(parse_parameter("this: Window").is_none());
  }

  #[test]
  fn test_parse_params_list() {
    let params =
      parse_params_list("(a: number, cb: (err: Error, n: number) => void)");
    assert_eq!(params.len(), 2);
    assert_eq!(
      params[1].type_text.as_deref(),
      Some("(err: Error, n: number) => void")
    );
  }

  #[test]
  fn test_parse_member_property_and_method() {
    let m = parse_member("readonly size?: number = 4;").unwrap();
    assert_eq!(m.name, "size");
    assert!(!m.method);
    assert!(m.optional);
    assert_eq!(m.type_text.as_deref(), Some("number"));
    assert_eq!(m.default.as_deref(), Some("4"));

    let m = parse_member("static async load<T>(id: string): Promise<T>").unwrap();
    assert_eq!(m.name, "load");
    assert!(m.method);
    assert_eq!(m.params.len(), 1);
    assert_eq!(m.returns.as_deref(), Some("Promise<T>"));

    let m = parse_member("get: () => void").unwrap();
    assert_eq!(m.name, "get");
    assert!(!m.method);

    let m = parse_member("'data-id': string").unwrap();
    assert_eq!(m.name, "data-id");
  }

  #[test]
  fn test_parse_member_skips_private_and_index() {
    assert!(parse_member("private secret: string").is_none());
    assert!(parse_member("#count = 0").is_none());
    assert!(parse_member("[key: string]: unknown").is_none());
  }

  #[test]
  fn test_split_members_joins_continuations() {
    let body = "\n  /** Size */\n  size: 'sm'\n    | 'lg'\n  onClick: (e: \
                MouseEvent) => void\n";
    let members = split_members(body);
    assert_eq!(members.len(), 2);
    assert!(members[0].1.starts_with("/** Size */"));
    assert!(members[0].1.ends_with("| 'lg'"));
    let (doc, code) = leading_doc(members[0].1);
    assert_eq!(doc, Some("/** Size */"));
    assert!(code.starts_with("size:"));
  }

  #[test]
  fn test_comparisons_do_not_nest() {
    let pieces: Vec<&str> = split_top_level(
      "a = 1 < 2, b: string, c = (x > y), d: Map<K, Array<V>> = m, e",
      &[','],
    )
    .into_iter()
    .map(|(_, p)| p)
    .collect();
    assert_eq!(pieces, vec![
      "a = 1 < 2",
      "b: string",
      "c = (x > y)",
      "d: Map<K, Array<V>> = m",
      "e"
    ]);
    assert_eq!(find_assignment("ok = a <= b"), Some(3));
  }

  #[test]
  fn test_line_col() {
    let src = "a\n  bc";
    assert_eq!(line_col(src, 0), (1, 1));
    assert_eq!(line_col(src, 4), (2, 3));
  }
}
