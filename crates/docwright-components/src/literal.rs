//! Reading type literals and object literals out of script text.
use docwright_tsdoc::{
  parse_doc_comment,
  syntax::{
    find_top_level,
    is_ident_char,
    leading_doc,
    matching_close,
    parse_member,
    split_members,
    split_top_level,
    trim_terminator,
    unquote,
  },
};

use crate::types::PropDoc;

/// One `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'t> {
  pub key:   String,
  /// `None` for shorthand entries (`{ a }`) and methods.
  pub value: Option<&'t str>,
  pub doc:   Option<&'t str>,
}

/// The text between the bracket at `open` and its partner.
#[must_use]
pub fn group_body(text: &str, open: usize) -> Option<&str> {
  let close = matching_close(text, open)?;
  text.get(open + 1..close)
}

/// Text between the brackets of the call `name(...)` or generic call
/// `name<...>()` starting at the first occurrence of `name`.
///
/// Returns the type arguments and the arguments.
#[must_use]
pub fn call_parts<'t>(
  text: &'t str,
  name: &str,
) -> Option<(Option<&'t str>, &'t str)> {
  let mut search = 0;
  while let Some(found) = text[search..].find(name) {
    let start = search + found;
    search = start + name.len();
    let preceded_by_ident = text[..start]
      .chars()
      .next_back()
      .is_some_and(|c| is_ident_char(c) || c == '.');
    if preceded_by_ident {
      continue;
    }

    let mut rest_start = start + name.len();
    let mut generics = None;
    let rest = &text[rest_start..];
    let skipped = rest.len() - rest.trim_start().len();
    rest_start += skipped;
    if text[rest_start..].starts_with('<') {
      let close = matching_close(text, rest_start)?;
      generics = text.get(rest_start + 1..close);
      rest_start = close + 1;
    }
    let rest = &text[rest_start..];
    rest_start += rest.len() - rest.trim_start().len();
    if !text[rest_start..].starts_with('(') {
      continue;
    }
    return Some((generics, group_body(text, rest_start)?));
  }
  None
}

/// Top-level arguments of a call's argument text.
#[must_use]
pub fn arguments(args: &str) -> Vec<&str> {
  split_top_level(args, &[','])
    .into_iter()
    .map(|(_, arg)| arg)
    .collect()
}

/// Entries of an object literal given with or without its braces.
#[must_use]
pub fn object_entries(text: &str) -> Vec<Entry<'_>> {
  let text = text.trim();
  let body = if text.starts_with('{') {
    group_body(text, 0).unwrap_or_default()
  } else {
    text
  };

  split_members(body)
    .into_iter()
    .filter_map(|(_, piece)| {
      let (doc, code) = leading_doc(piece);
      if code.starts_with("...") {
        return None;
      }
      match find_top_level(code, ':') {
        Some(colon) => {
          Some(Entry {
            key:   unquote(&code[..colon]).to_string(),
            value: Some(trim_terminator(&code[colon + 1..])),
            doc,
          })
        },
        None => {
          let key: String =
            code.chars().take_while(|&c| is_ident_char(c)).collect();
          (!key.is_empty()).then_some(Entry {
            key,
            value: None,
            doc,
          })
        },
      }
    })
    .collect()
}

/// String values of an array literal such as `['a', "b"]`.
#[must_use]
pub fn string_array(text: &str) -> Option<Vec<String>> {
  let text = text.trim();
  if !text.starts_with('[') {
    return None;
  }
  let body = group_body(text, 0)?;
  Some(
    split_top_level(body, &[','])
      .into_iter()
      .map(|(_, item)| unquote(item).to_string())
      .filter(|item| !item.is_empty())
      .collect(),
  )
}

/// Description text of a raw doc comment.
#[must_use]
pub fn doc_text(doc: Option<&str>) -> String {
  doc.map(|raw| parse_doc_comment(raw).description).unwrap_or_default()
}

/// Props from the members of a type literal body or interface body.
#[must_use]
pub fn props_from_type_members(body: &str) -> Vec<PropDoc> {
  split_members(body)
    .into_iter()
    .filter_map(|(_, piece)| {
      let (doc, _) = leading_doc(piece);
      let member = parse_member(piece)?;
      let type_text = if member.method {
        Some(method_type(piece))
      } else {
        member.type_text
      };
      Some(PropDoc {
        name: member.name,
        type_text,
        required: !member.optional,
        default: None,
        description: doc_text(doc),
      })
    })
    .collect()
}

/// A method signature rendered as its parameter list and return type.
fn method_type(piece: &str) -> String {
  let (_, code) = leading_doc(piece);
  code
    .find('(')
    .map_or(code, |i| &code[i..])
    .trim_end_matches([';', ','])
    .to_string()
}

/// Render a runtime prop type (`String`, `[String, Number]`) as type text.
#[must_use]
pub fn runtime_type(value: &str) -> String {
  string_array(value).map_or_else(
    || trim_terminator(value).to_string(),
    |names| names.join(" | "),
  )
}

/// The body of `interface name { ... }` or `type name = { ... }` in `script`.
#[must_use]
pub fn named_type_body<'t>(script: &'t str, name: &str) -> Option<&'t str> {
  for keyword in ["interface", "type"] {
    let mut search = 0;
    while let Some(found) = script[search..].find(keyword) {
      let start = search + found;
      search = start + keyword.len();
      let rest = script[search..].trim_start();
      let Some(after_name) = rest.strip_prefix(name) else {
        continue;
      };
      if after_name.starts_with(|c: char| is_ident_char(c)) {
        continue;
      }
      let open_rel = after_name.find('{')?;
      let between = &after_name[..open_rel];
      if !between.trim().trim_start_matches('=').trim().is_empty()
        && !between.trim_start().starts_with("extends")
        && !between.trim_start().starts_with('<')
      {
        continue;
      }
      let open = script.len() - after_name.len() + open_rel;
      return group_body(script, open);
    }
  }
  None
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_call_parts_with_generics() {
    let (generics, args) =
      call_parts("const p = defineProps<{ a: string }>()", "defineProps")
        .unwrap();
    assert_eq!(generics, Some("{ a: string }"));
    assert_eq!(args, "");

    let (generics, args) =
      call_parts("emit('x'); defineEmits(['a', 'b'])", "defineEmits").unwrap();
    assert_eq!(generics, None);
    assert_eq!(args, "['a', 'b']");

    assert!(call_parts("mydefineProps()", "defineProps").is_none());
  }

  #[test]
  fn test_object_entries() {
    let entries = object_entries(
      "{\n  /** Label text */\n  label: { type: String, required: true },\n  \
       size: [String, Number],\n  loose,\n  ...spread\n}",
    );
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].key, "label");
    assert_eq!(entries[0].doc, Some("/** Label text */"));
    assert_eq!(entries[1].value, Some("[String, Number]"));
    assert_eq!(entries[2].key, "loose");
    assert_eq!(entries[2].value, None);
  }

  #[test]
  fn test_runtime_type() {
    assert_eq!(runtime_type("[String, Number]"), "String | Number");
    assert_eq!(runtime_type("Boolean"), "Boolean");
  }

  #[test]
  fn test_named_type_body() {
    let script = "type Other = string;\ninterface ButtonProps extends Base \
                  {\n  text: string\n}\n";
    assert_eq!(
      named_type_body(script, "ButtonProps").map(str::trim),
      Some("text: string")
    );
    let script = "type Props = { a?: number }";
    assert_eq!(named_type_body(script, "Props").map(str::trim), Some(
      "a?: number"
    ));
    assert_eq!(named_type_body(script, "Prop"), None);
  }

  #[test]
  fn test_props_from_type_members() {
    let props = props_from_type_members(
      "\n  /** Visible text */\n  text: string\n  disabled?: boolean\n  \
       onSelect(id: string): void\n",
    );
    assert_eq!(props.len(), 3);
    assert!(props[0].required);
    assert_eq!(props[0].description, "Visible text");
    assert!(!props[1].required);
    assert_eq!(props[2].type_text.as_deref(), Some("(id: string): void"));
  }
}
