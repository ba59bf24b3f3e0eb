//! Function, arrow and class components written with JSX.
//!
//! The file is parsed with the annotation extractor; a top-level function,
//! arrow-function variable or `Component` subclass whose name is capitalized
//! is a component. The default export wins, then the first exported
//! candidate, then the first candidate.
use std::{path::Path, sync::LazyLock};

use docwright_tsdoc::{
  AnnotationKind,
  AnnotationNode,
  ExtractionError,
  extract_from_source,
  syntax::{
    find_assignment,
    find_top_level,
    matching_close,
    parse_params_list,
    split_top_level,
  },
};
use regex::Regex;

use crate::{
  literal::{arguments, group_body, named_type_body, props_from_type_members},
  types::{ComponentDescription, EventDoc, PropDoc, SlotDoc},
  utils::{file_stem_name, never_matching_regex},
};

/// Suffix naming a component's props type.
const PROPS_SUFFIX: &str = "Props";

static CLASS_BASE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\bextends\s+(?:React\.)?(?:Pure)?Component\b").unwrap_or_else(
    |e| {
      log::error!("Failed to compile CLASS_BASE_RE regex: {e}");
      never_matching_regex()
    },
  )
});

static DEFAULT_EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"\bexport\s+default\s+(?:async\s+)?(?:function\s*\*?\s*|class\s+)?([A-Z][\w$]*)",
  )
  .unwrap_or_else(|e| {
    log::error!("Failed to compile DEFAULT_EXPORT_RE regex: {e}");
    never_matching_regex()
  })
});

static CHILDREN_USE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\{\s*children\s*\}|\bprops\.children\b").unwrap_or_else(|e| {
    log::error!("Failed to compile CHILDREN_USE_RE regex: {e}");
    never_matching_regex()
  })
});

/// Describe the component defined in a JSX/TSX file.
///
/// A file without any recognizable component yields an empty description
/// named after the file.
///
/// # Errors
///
/// Returns [`ExtractionError::Parse`] if the file does not parse.
pub fn extract_jsx(
  src: &str,
  path: &Path,
) -> Result<ComponentDescription, ExtractionError> {
  let nodes = extract_from_source(src, path)?;
  let candidates: Vec<&AnnotationNode> =
    nodes.iter().filter(|node| is_component(node)).collect();

  let default_name = DEFAULT_EXPORT_RE
    .captures(src)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str());
  let chosen = default_name
    .and_then(|name| candidates.iter().find(|node| node.name == name))
    .or_else(|| candidates.iter().find(|node| node.exported))
    .or_else(|| candidates.first())
    .copied();

  let Some(node) = chosen else {
    log::debug!("{}: no component found", path.display());
    return Ok(ComponentDescription::new(file_stem_name(path)));
  };

  let mut component = ComponentDescription::new(node.name.clone());
  component.description = node.description.clone();

  for prop in props_of(node, &nodes, src) {
    component.add_prop(prop);
  }

  let events: Vec<EventDoc> =
    component.props.iter().filter_map(event_from_prop).collect();
  for event in events {
    component.add_event(event);
  }

  match component.props.iter().find(|p| p.name == "children") {
    Some(children) => {
      let scoped = children
        .type_text
        .as_deref()
        .is_some_and(|ty| ty.contains("=>"));
      component.add_slot(SlotDoc {
        name: "default".to_string(),
        scoped,
      });
    },
    None if CHILDREN_USE_RE.is_match(src) => {
      component.add_slot(SlotDoc {
        name:   "default".to_string(),
        scoped: false,
      });
    },
    None => {},
  }

  Ok(component)
}

fn is_component(node: &AnnotationNode) -> bool {
  if !node.name.starts_with(|c: char| c.is_ascii_uppercase()) {
    return false;
  }
  match node.kind {
    AnnotationKind::Function => true,
    AnnotationKind::Variable => is_function_value(&node.signature),
    AnnotationKind::Class => CLASS_BASE_RE.is_match(&node.signature),
    _ => false,
  }
}

/// Whether a variable signature binds a function expression or arrow.
fn is_function_value(signature: &str) -> bool {
  let Some(eq) = find_assignment(signature) else {
    return false;
  };
  let value = signature[eq + 1..].trim_start();
  let value = value.strip_prefix("async").map_or(value, str::trim_start);
  signature.ends_with("=>") || value.starts_with("function")
}

/// Props of the chosen component node.
fn props_of(
  node: &AnnotationNode,
  nodes: &[AnnotationNode],
  src: &str,
) -> Vec<PropDoc> {
  if node.kind == AnnotationKind::Class {
    let props_type = class_props_type(&node.signature);
    return props_type
      .map(|ty| props_from_type(ty, nodes, src))
      .unwrap_or_default();
  }

  let param = node.parameters.first();
  let declared = param
    .and_then(|p| p.type_text.as_deref())
    .or_else(|| {
      // `const Button: FC<ButtonProps> = (...) =>`
      node
        .type_text
        .as_deref()
        .and_then(first_type_argument)
    });

  let mut props = match declared {
    Some(ty) => props_from_type(ty, nodes, src),
    None => {
      conventional_props_type(&node.name, nodes)
        .map(|ty| props_from_type(ty, nodes, src))
        .unwrap_or_default()
    },
  };

  if let Some(pattern) = param.map(|p| p.name.as_str()) {
    if pattern.starts_with('{') {
      apply_destructured_defaults(pattern, &mut props);
    }
  }
  props
}

/// The first type argument of `extends Component<Props, State>`.
fn class_props_type(signature: &str) -> Option<&str> {
  let base = CLASS_BASE_RE.find(signature)?;
  let rest = &signature[base.end()..];
  if !rest.starts_with('<') {
    return None;
  }
  let inner = group_body(rest, 0)?;
  arguments(inner).first().copied()
}

fn first_type_argument(type_text: &str) -> Option<&str> {
  let open = find_top_level(type_text, '<')?;
  let inner = group_body(type_text, open)?;
  arguments(inner).first().copied()
}

/// `{Name}Props`, else the first type whose name ends in `Props`.
fn conventional_props_type<'n>(
  name: &str,
  nodes: &'n [AnnotationNode],
) -> Option<&'n str> {
  let is_type = |node: &&AnnotationNode| {
    matches!(node.kind, AnnotationKind::Interface | AnnotationKind::Type)
  };
  let preferred = format!("{name}{PROPS_SUFFIX}");
  nodes
    .iter()
    .filter(is_type)
    .find(|node| node.name == preferred)
    .or_else(|| {
      nodes
        .iter()
        .filter(is_type)
        .find(|node| node.name.ends_with(PROPS_SUFFIX))
    })
    .map(|node| node.name.as_str())
}

/// Props from a type: an inline object type or a same-file named type.
fn props_from_type(
  type_text: &str,
  nodes: &[AnnotationNode],
  src: &str,
) -> Vec<PropDoc> {
  let type_text = type_text.trim();
  if type_text.starts_with('{') {
    return group_body(type_text, 0)
      .map(props_from_type_members)
      .unwrap_or_default();
  }

  let name = type_text
    .find(['<', '&', '|', ' '])
    .map_or(type_text, |i| &type_text[..i]);
  let declared = nodes.iter().find(|node| {
    node.name == name
      && matches!(node.kind, AnnotationKind::Interface | AnnotationKind::Type)
  });

  match declared {
    Some(node) if !node.children.is_empty() => {
      node.children.iter().map(prop_from_member).collect()
    },
    _ => {
      named_type_body(src, name)
        .map(props_from_type_members)
        .unwrap_or_default()
    },
  }
}

fn prop_from_member(member: &AnnotationNode) -> PropDoc {
  let type_text = if member.kind == AnnotationKind::Function {
    let params = member
      .parameters
      .iter()
      .map(|p| {
        match &p.type_text {
          Some(ty) => format!("{}: {ty}", p.name),
          None => p.name.clone(),
        }
      })
      .collect::<Vec<_>>()
      .join(", ");
    Some(format!(
      "({params}) => {}",
      member.returns.as_deref().unwrap_or("void")
    ))
  } else {
    member.type_text.clone()
  };

  PropDoc {
    name: member.name.clone(),
    type_text,
    required: !member.tags.contains_key("optional"),
    default: member
      .tags
      .get("default")
      .and_then(|value| value.as_str())
      .map(ToString::to_string),
    description: member.description.clone(),
  }
}

/// Defaults written in a destructuring pattern: `{ size = 'md', label }`.
///
/// Props only known from the pattern are added untyped.
fn apply_destructured_defaults(pattern: &str, props: &mut Vec<PropDoc>) {
  let Some(close) = matching_close(pattern, 0) else {
    return;
  };
  let body = &pattern[1..close];

  for (_, binding) in split_top_level(body, &[',']) {
    if binding.starts_with("...") {
      continue;
    }
    let (target, default) = match find_assignment(binding) {
      Some(i) => (&binding[..i], Some(binding[i + 1..].trim())),
      None => (binding, None),
    };
    let key = find_top_level(target, ':')
      .map_or(target, |i| &target[..i])
      .trim();
    if key.is_empty() {
      continue;
    }

    match props.iter_mut().find(|p| p.name == key) {
      Some(prop) => {
        if let Some(default) = default {
          prop.default = Some(default.to_string());
        }
      },
      None => {
        props.push(PropDoc {
          name: key.to_string(),
          required: default.is_none(),
          default: default.map(ToString::to_string),
          ..PropDoc::default()
        });
      },
    }
  }
}

/// `onSelect: (id: string) => void` becomes the event `select`.
fn event_from_prop(prop: &PropDoc) -> Option<EventDoc> {
  let rest = prop.name.strip_prefix("on")?;
  let mut chars = rest.chars();
  let first = chars.next().filter(char::is_ascii_uppercase)?;
  let type_text = prop.type_text.as_deref()?.trim();
  let params = if type_text.starts_with('(') {
    &type_text[..=matching_close(type_text, 0)?]
  } else {
    &type_text[..type_text.find("=>")?]
  };

  let name = first.to_ascii_lowercase().to_string() + chars.as_str();
  let payload = parse_params_list(params)
    .into_iter()
    .filter_map(|p| p.type_text)
    .collect::<Vec<_>>()
    .join(", ");
  Some(EventDoc {
    name,
    payload: (!payload.is_empty()).then_some(payload),
  })
}
