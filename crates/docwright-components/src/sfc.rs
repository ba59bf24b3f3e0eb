//! Single-file components: a `<template>`, one or more `<script>` blocks and
//! optional `<style>` blocks in one file.
//!
//! Props come from `defineProps` (typed or runtime form, optionally wrapped in
//! `withDefaults`) and from an options-style `props:` block; the two sources
//! are unioned. Events come from `defineEmits`, an options-style `emits:`
//! block and `emit(...)` call sites. Slots come from `<slot>` tags in the
//! template and from `defineSlots`.
use std::{path::Path, sync::LazyLock};

use docwright_tsdoc::{
  ExtractionError,
  extract_from_source,
  syntax::{
    find_top_level,
    leading_doc,
    parse_params_list,
    split_members,
    unquote,
  },
};
use regex::Regex;

use crate::{
  literal::{
    arguments,
    call_parts,
    doc_text,
    group_body,
    named_type_body,
    object_entries,
    props_from_type_members,
    runtime_type,
    string_array,
  },
  types::{ComponentDescription, EventDoc, PropDoc, SlotDoc},
  utils::{file_stem_name, never_matching_regex},
};

/// Attribute text of an opening tag, allowing `>` inside quoted values.
const TAG_ATTRIBUTES: &str = r#"(?:[^>"'/]|"[^"]*"|'[^']*'|/[^>])*"#;

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
  let pattern = format!(r"(?is)<script(\s{TAG_ATTRIBUTES})?>(.*?)</script\s*>");
  Regex::new(&pattern).unwrap_or_else(|e| {
    log::error!("Failed to compile SCRIPT_RE regex: {e}");
    never_matching_regex()
  })
});

static SCRIPT_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)<script[\s>]").unwrap_or_else(|e| {
    log::error!("Failed to compile SCRIPT_OPEN_RE regex: {e}");
    never_matching_regex()
  })
});

static EMIT_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?:\$|\b)emits?\s*\(\s*['"`]([^'"`]+)['"`]"#).unwrap_or_else(
    |e| {
      log::error!("Failed to compile EMIT_CALL_RE regex: {e}");
      never_matching_regex()
    },
  )
});

static SLOT_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!(r"<slot(\s{TAG_ATTRIBUTES})?/?>")).unwrap_or_else(|e| {
    log::error!("Failed to compile SLOT_TAG_RE regex: {e}");
    never_matching_regex()
  })
});

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"([:@#]?[\w.:-]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'))?"#)
    .unwrap_or_else(|e| {
      log::error!("Failed to compile ATTRIBUTE_RE regex: {e}");
      never_matching_regex()
    })
});

static LEADING_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)\A\s*<!--(.*?)-->").unwrap_or_else(|e| {
    log::error!("Failed to compile LEADING_COMMENT_RE regex: {e}");
    never_matching_regex()
  })
});

/// The sections of a single-file component.
#[derive(Debug, Default)]
struct Sections<'t> {
  template: Option<&'t str>,
  /// All `<script>` bodies, in file order.
  scripts:  Vec<&'t str>,
}

fn split_sections(src: &str) -> Sections<'_> {
  let scripts = SCRIPT_RE
    .captures_iter(src)
    .filter_map(|caps| caps.get(2).map(|m| m.as_str()))
    .collect();

  // Nested `<template #slot>` tags mean the outer template ends at the last
  // closing tag.
  let template = src.find("<template").and_then(|start| {
    let open_end = start + src[start..].find('>')? + 1;
    let close = src.rfind("</template>")?;
    src.get(open_end..close)
  });

  Sections { template, scripts }
}

/// Describe a single-file component.
///
/// # Errors
///
/// Returns [`ExtractionError::Parse`] if a script block does not parse or a
/// `<script>` tag is never closed.
pub fn extract_sfc(
  src: &str,
  path: &Path,
) -> Result<ComponentDescription, ExtractionError> {
  let sections = split_sections(src);
  let opened = SCRIPT_OPEN_RE.find_iter(src).count();
  if opened > sections.scripts.len() {
    return Err(ExtractionError::Parse {
      path:    path.to_path_buf(),
      message: "unterminated <script> block".to_string(),
    });
  }

  let ts_path = path.with_extension("ts");
  for script in &sections.scripts {
    extract_from_source(script, &ts_path).map_err(|e| {
      match e {
        ExtractionError::Parse { message, .. } => {
          ExtractionError::Parse {
            path: path.to_path_buf(),
            message,
          }
        },
        other => other,
      }
    })?;
  }

  let script = sections.scripts.join("\n");
  let mut component = ComponentDescription::new(
    component_name(&script).unwrap_or_else(|| file_stem_name(path)),
  );
  component.description = description(src, &script);

  extract_props(&script, &mut component);
  extract_events(&script, sections.template, &mut component);
  extract_slots(&script, sections.template, &mut component);

  log::debug!(
    "{}: {} props, {} events, {} slots",
    path.display(),
    component.props.len(),
    component.events.len(),
    component.slots.len()
  );
  Ok(component)
}

/// A leading `<!-- -->` comment, else a doc comment opening the script.
fn description(src: &str, script: &str) -> String {
  if let Some(comment) = LEADING_COMMENT_RE.captures(src).and_then(|c| c.get(1))
  {
    let text = comment.as_str().trim();
    if !text.is_empty() {
      return text.lines().next().unwrap_or_default().trim().to_string();
    }
  }
  doc_text(leading_doc(script).0)
}

/// `defineOptions({ name })`, else `name:` in the options object.
fn component_name(script: &str) -> Option<String> {
  let from_define = call_parts(script, "defineOptions")
    .and_then(|(_, args)| arguments(args).first().copied())
    .and_then(|options| entry_value(options, "name"));
  from_define
    .or_else(|| options_object(script).and_then(|o| entry_value(o, "name")))
    .map(|value| unquote(value).to_string())
    .filter(|name| !name.is_empty())
}

/// The object passed to `export default` or `defineComponent`.
fn options_object(script: &str) -> Option<&str> {
  if let Some((_, args)) = call_parts(script, "defineComponent") {
    return arguments(args).first().copied();
  }
  let start = script.find("export default")? + "export default".len();
  let open = start + script[start..].find('{')?;
  if !script[start..open].trim().is_empty() {
    return None;
  }
  group_body(script, open)
}

fn entry_value<'t>(object: &'t str, key: &str) -> Option<&'t str> {
  object_entries(object)
    .into_iter()
    .find(|entry| entry.key == key)
    .and_then(|entry| entry.value)
}

fn extract_props(script: &str, component: &mut ComponentDescription) {
  let defaults = call_parts(script, "withDefaults")
    .and_then(|(_, args)| arguments(args).get(1).copied())
    .map(object_entries)
    .unwrap_or_default();

  if let Some((generics, args)) = call_parts(script, "defineProps") {
    if let Some(type_text) = generics {
      for mut prop in typed_props(script, type_text) {
        if let Some(default) = defaults.iter().find(|d| d.key == prop.name) {
          prop.default = default.value.map(ToString::to_string);
        }
        component.add_prop(prop);
      }
    }
    if let Some(runtime) = arguments(args).first() {
      for prop in runtime_props(runtime) {
        component.add_prop(prop);
      }
    }
  }

  if let Some(props) = options_object(script).and_then(|o| entry_value(o, "props"))
  {
    for prop in runtime_props(props) {
      component.add_prop(prop);
    }
  }
}

/// Props from a `defineProps<...>` type argument.
fn typed_props(script: &str, type_text: &str) -> Vec<PropDoc> {
  let type_text = type_text.trim();
  if type_text.starts_with('{') {
    return group_body(type_text, 0)
      .map(props_from_type_members)
      .unwrap_or_default();
  }
  named_type_body(script, type_text)
    .map(props_from_type_members)
    .unwrap_or_default()
}

/// Props from a runtime declaration: an array of names or an object.
fn runtime_props(declaration: &str) -> Vec<PropDoc> {
  if let Some(names) = string_array(declaration) {
    return names
      .into_iter()
      .map(|name| {
        PropDoc {
          name,
          ..PropDoc::default()
        }
      })
      .collect();
  }

  object_entries(declaration)
    .into_iter()
    .map(|entry| {
      let mut prop = PropDoc {
        name: entry.key,
        description: doc_text(entry.doc),
        ..PropDoc::default()
      };
      match entry.value {
        Some(value) if value.trim_start().starts_with('{') => {
          let options = object_entries(value);
          let option = |key: &str| {
            options.iter().find(|o| o.key == key).and_then(|o| o.value)
          };
          prop.type_text = option("type").map(runtime_type);
          prop.required = option("required") == Some("true");
          prop.default = option("default").map(ToString::to_string);
        },
        Some(value) => prop.type_text = Some(runtime_type(value)),
        None => {},
      }
      prop
    })
    .collect()
}

fn extract_events(
  script: &str,
  template: Option<&str>,
  component: &mut ComponentDescription,
) {
  if let Some((generics, args)) = call_parts(script, "defineEmits") {
    if let Some(type_text) = generics {
      for event in typed_events(script, type_text) {
        component.add_event(event);
      }
    }
    if let Some(runtime) = arguments(args).first() {
      for event in runtime_events(runtime) {
        component.add_event(event);
      }
    }
  }

  if let Some(emits) = options_object(script).and_then(|o| entry_value(o, "emits"))
  {
    for event in runtime_events(emits) {
      component.add_event(event);
    }
  }

  for text in std::iter::once(script).chain(template) {
    for caps in EMIT_CALL_RE.captures_iter(text) {
      if let Some(name) = caps.get(1) {
        component.add_event(EventDoc {
          name:    name.as_str().to_string(),
          payload: None,
        });
      }
    }
  }
}

/// Events from a `defineEmits<...>` type argument.
///
/// Accepts call signatures (`(e: 'change', value: string): void`) and named
/// tuples (`change: [value: string]`).
fn typed_events(script: &str, type_text: &str) -> Vec<EventDoc> {
  let type_text = type_text.trim();
  let body = if type_text.starts_with('{') {
    group_body(type_text, 0)
  } else {
    named_type_body(script, type_text)
  };
  let Some(body) = body else {
    return Vec::new();
  };

  split_members(body)
    .into_iter()
    .filter_map(|(_, piece)| {
      let (_, code) = leading_doc(piece);
      if code.starts_with('(') {
        let params_text = group_body(code, 0)?;
        let mut params = parse_params_list(params_text).into_iter();
        let name = params.next()?.type_text?;
        let payload = params
          .filter_map(|p| p.type_text)
          .collect::<Vec<_>>()
          .join(", ");
        return Some(EventDoc {
          name:    unquote(&name).to_string(),
          payload: (!payload.is_empty()).then_some(payload),
        });
      }

      let colon = find_top_level(code, ':')?;
      let name = unquote(&code[..colon]).to_string();
      let tuple = code[colon + 1..].trim();
      let payload = if tuple.starts_with('[') {
        group_body(tuple, 0).map(str::trim).unwrap_or_default()
      } else {
        tuple
      };
      Some(EventDoc {
        name,
        payload: (!payload.is_empty()).then(|| payload.to_string()),
      })
    })
    .collect()
}

/// Events from a runtime declaration: an array of names or a validator object.
fn runtime_events(declaration: &str) -> Vec<EventDoc> {
  let names = string_array(declaration).unwrap_or_else(|| {
    object_entries(declaration)
      .into_iter()
      .map(|entry| entry.key)
      .collect()
  });
  names
    .into_iter()
    .map(|name| EventDoc { name, payload: None })
    .collect()
}

fn extract_slots(
  script: &str,
  template: Option<&str>,
  component: &mut ComponentDescription,
) {
  if let Some(template) = template {
    for caps in SLOT_TAG_RE.captures_iter(template) {
      let attributes = caps.get(1).map_or("", |m| m.as_str());
      component.add_slot(template_slot(attributes));
    }
  }

  if let Some((Some(type_text), _)) = call_parts(script, "defineSlots") {
    let type_text = type_text.trim();
    let body = if type_text.starts_with('{') {
      group_body(type_text, 0)
    } else {
      named_type_body(script, type_text)
    };
    for (_, piece) in body.map(split_members).unwrap_or_default() {
      let (_, code) = leading_doc(piece);
      let name_end = code
        .find(|c: char| matches!(c, '(' | ':' | '?' | '<'))
        .unwrap_or(code.len());
      let name = unquote(&code[..name_end]).to_string();
      if name.is_empty() {
        continue;
      }
      let params = code[name_end..]
        .find('(')
        .and_then(|i| group_body(&code[name_end..], i))
        .unwrap_or_default();
      component.add_slot(SlotDoc {
        name,
        scoped: !parse_params_list(params).is_empty(),
      });
    }
  }
}

/// Name and scoping of one `<slot ...>` tag from its attribute text.
fn template_slot(attributes: &str) -> SlotDoc {
  let mut name = None;
  let mut scoped = false;
  for caps in ATTRIBUTE_RE.captures_iter(attributes) {
    let Some(attribute) = caps.get(1).map(|m| m.as_str()) else {
      continue;
    };
    let value = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str());
    match attribute {
      "name" => name = value.map(ToString::to_string),
      ":name" | "v-bind:name" => {
        name = name.or_else(|| value.map(ToString::to_string));
      },
      _ if attribute.starts_with(':') || attribute.starts_with("v-bind") => {
        scoped = true;
      },
      _ => {},
    }
  }
  SlotDoc {
    name: name
      .filter(|n| !n.is_empty())
      .unwrap_or_else(|| "default".to_string()),
    scoped,
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_split_sections_nested_templates() {
    let src = "<template>\n  <List>\n    <template #item>x</template>\n  \
               </List>\n</template>\n<script setup>\nconst a = 1\n</script>\n";
    let sections = split_sections(src);
    assert!(sections.template.unwrap().contains("#item"));
    assert_eq!(sections.scripts.len(), 1);
  }

  #[test]
  fn test_template_slot_scoping() {
    assert_eq!(template_slot(""), SlotDoc {
      name:   "default".into(),
      scoped: false,
    });
    assert_eq!(template_slot(r#" name="header" class="h""#), SlotDoc {
      name:   "header".into(),
      scoped: false,
    });
    assert_eq!(template_slot(r#" name="row" :item="item""#), SlotDoc {
      name:   "row".into(),
      scoped: true,
    });
  }

  #[test]
  fn test_custom_elements_are_not_scripts() {
    let src = "<template>\n  <script-editor :code=\"code\" />\n  <slot \
               :fmt=\"a > b\" name=\"cell\" />\n</template>\n<script \
               setup lang=\"ts\">\nconst code = ''\n</script>\n";
    let sections = split_sections(src);
    assert_eq!(sections.scripts, vec!["\nconst code = ''\n"]);
    assert_eq!(SCRIPT_OPEN_RE.find_iter(src).count(), 1);

    let slots: Vec<SlotDoc> = SLOT_TAG_RE
      .captures_iter(sections.template.unwrap())
      .map(|caps| template_slot(caps.get(1).map_or("", |m| m.as_str())))
      .collect();
    assert_eq!(slots, vec![SlotDoc {
      name:   "cell".into(),
      scoped: true,
    }]);
  }

  #[test]
  fn test_typed_events_tuple_form() {
    let events =
      typed_events("", "{ change: [value: string]; close: [] }");
    assert_eq!(events, vec![
      EventDoc {
        name:    "change".into(),
        payload: Some("value: string".into()),
      },
      EventDoc {
        name:    "close".into(),
        payload: None,
      },
    ]);
  }

  #[test]
  fn test_component_name_sources() {
    assert_eq!(
      component_name("defineOptions({ name: 'FancyButton' })").as_deref(),
      Some("FancyButton")
    );
    assert_eq!(
      component_name("export default {\n  name: \"Legacy\",\n}").as_deref(),
      Some("Legacy")
    );
    assert_eq!(component_name("const a = 1"), None);
  }
}
