#![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
use std::path::Path;

use docwright_components::{
  ComponentStyle,
  EventDoc,
  ExtractionError,
  SlotDoc,
  extract_component_file,
  extract_jsx,
  extract_sfc,
};

const FANCY_BUTTON: &str = r#"<!-- A fancy button. -->
<template>
  <button @click="$emit('click', $event)">
    <slot name="icon" :size="size" />
    <slot />
  </button>
</template>

<script setup lang="ts">
interface Props {
  /** Button label */
  label: string
  size?: 'sm' | 'md' | 'lg'
}
const props = withDefaults(defineProps<Props>(), {
  size: 'md',
})
const emit = defineEmits<{
  (e: 'change', value: string): void
  (e: 'close'): void
}>()
function onInput(v: string) {
  emit('change', v)
  emit('focus')
}
</script>

<style scoped>
button { color: red; }
</style>
"#;

#[test]
fn test_sfc_composition_style() {
  let component = extract_sfc(FANCY_BUTTON, Path::new("FancyButton.vue")).unwrap();
  assert_eq!(component.name, "FancyButton");
  assert_eq!(component.description, "A fancy button.");

  assert_eq!(component.props.len(), 2);
  let label = &component.props[0];
  assert_eq!(label.name, "label");
  assert!(label.required);
  assert_eq!(label.type_text.as_deref(), Some("string"));
  assert_eq!(label.description, "Button label");
  let size = &component.props[1];
  assert!(!size.required);
  assert_eq!(size.type_text.as_deref(), Some("'sm' | 'md' | 'lg'"));
  assert_eq!(size.default.as_deref(), Some("'md'"));

  let events: Vec<&str> =
    component.events.iter().map(|e| e.name.as_str()).collect();
  assert_eq!(events, vec!["change", "close", "focus", "click"]);
  assert_eq!(component.events[0].payload.as_deref(), Some("string"));
  assert_eq!(component.events[2].payload, None);

  assert_eq!(component.slots, vec![
    SlotDoc {
      name:   "icon".into(),
      scoped: true,
    },
    SlotDoc {
      name:   "default".into(),
      scoped: false,
    },
  ]);
}

#[test]
fn test_sfc_options_style() {
  let src = r#"<template><div><slot name="footer"></slot></div></template>
<script>
export default {
  name: 'LegacyPanel',
  props: {
    title: { type: String, required: true },
    count: [Number, String],
    open: { type: Boolean, default: false },
  },
  emits: ['toggle'],
}
</script>
"#;
  let component = extract_sfc(src, Path::new("Panel.vue")).unwrap();
  assert_eq!(component.name, "LegacyPanel");
  assert_eq!(component.props.len(), 3);
  assert!(component.props[0].required);
  assert_eq!(component.props[0].type_text.as_deref(), Some("String"));
  assert_eq!(component.props[1].type_text.as_deref(), Some("Number | String"));
  assert_eq!(component.props[2].default.as_deref(), Some("false"));
  assert_eq!(component.events, vec![EventDoc {
    name:    "toggle".into(),
    payload: None,
  }]);
  assert_eq!(component.slots[0].name, "footer");
}

#[test]
fn test_sfc_without_script_is_empty_not_error() {
  let component =
    extract_sfc("<template><p>static</p></template>", Path::new("Static.vue"))
      .unwrap();
  assert_eq!(component.name, "Static");
  assert!(component.is_empty());
}

#[test]
fn test_sfc_parse_error() {
  let err = extract_sfc(
    "<script setup lang=\"ts\">\nconst = ;\n</script>",
    Path::new("Broken.vue"),
  )
  .unwrap_err();
  assert!(
    matches!(err, ExtractionError::Parse { ref path, .. } if path == Path::new("Broken.vue"))
  );
}

const BUTTON_TSX: &str = r"import React from 'react';

/** Props for the button. */
export interface ButtonProps {
  /** Visible label. */
  text: string;
  disabled?: boolean;
  onClick?: (event: MouseEvent) => void;
  children?: React.ReactNode;
}

/** A clickable button. */
export default function Button({ text, disabled = false, onClick }: ButtonProps) {
  return <button disabled={disabled} onClick={onClick}>{text}</button>;
}
";

#[test]
fn test_jsx_function_component() {
  let component = extract_jsx(BUTTON_TSX, Path::new("Button.tsx")).unwrap();
  assert_eq!(component.name, "Button");
  assert_eq!(component.description, "A clickable button.");

  let text = &component.props[0];
  assert_eq!(text.name, "text");
  assert!(text.required);
  assert_eq!(text.type_text.as_deref(), Some("string"));
  assert_eq!(text.description, "Visible label.");

  let disabled = &component.props[1];
  assert_eq!(disabled.name, "disabled");
  assert!(!disabled.required);
  assert_eq!(disabled.type_text.as_deref(), Some("boolean"));
  assert_eq!(disabled.default.as_deref(), Some("false"));

  assert_eq!(component.events, vec![EventDoc {
    name:    "click".into(),
    payload: Some("MouseEvent".into()),
  }]);
  assert_eq!(component.slots, vec![SlotDoc {
    name:   "default".into(),
    scoped: false,
  }]);
}

#[test]
fn test_jsx_class_component() {
  let src = r"interface CounterProps { start: number; step?: number }
export class Counter extends React.Component<CounterProps> {
  render() {
    return <span>{this.props.start}</span>;
  }
}
";
  let component = extract_jsx(src, Path::new("Counter.tsx")).unwrap();
  assert_eq!(component.name, "Counter");
  let names: Vec<&str> =
    component.props.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["start", "step"]);
  assert!(component.props[0].required);
  assert!(!component.props[1].required);
}

#[test]
fn test_jsx_arrow_component_with_fc_annotation() {
  let src = r"type CardProps = { title: string; subtitle?: string };
export const Card: React.FC<CardProps> = ({ title, subtitle = 'none' }) => (
  <div>{title}{subtitle}</div>
);
";
  let component = extract_jsx(src, Path::new("Card.tsx")).unwrap();
  assert_eq!(component.name, "Card");
  assert_eq!(component.props.len(), 2);
  assert_eq!(component.props[1].default.as_deref(), Some("'none'"));
  assert!(component.slots.is_empty());
}

#[test]
fn test_jsx_without_component() {
  let component =
    extract_jsx("export const answer = 42;\n", Path::new("helpers.jsx")).unwrap();
  assert_eq!(component.name, "helpers");
  assert!(component.is_empty());
}

#[test]
fn test_extract_component_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("FancyButton.vue");
  std::fs::write(&path, FANCY_BUTTON).unwrap();
  let component =
    extract_component_file(&path, ComponentStyle::SingleFile).unwrap();
  assert_eq!(component.props.len(), 2);

  let missing = extract_component_file(
    dir.path().join("Missing.tsx"),
    ComponentStyle::Jsx,
  );
  assert!(matches!(missing, Err(ExtractionError::ReadFile { .. })));
}

#[test]
fn test_serialized_shape() {
  let component = extract_jsx(BUTTON_TSX, Path::new("Button.tsx")).unwrap();
  let json = serde_json::to_value(&component).unwrap();
  assert_eq!(json["props"][0]["name"], "text");
  assert_eq!(json["slots"][0]["scoped"], false);
}

#[test]
fn test_sfc_optional_and_required_props() {
  let src = "<template><p>{{ text }}</p></template>\n<script setup \
             lang=\"ts\">\ndefineProps<{ text: string; disabled?: boolean \
             }>()\n</script>\n";
  let component = extract_sfc(src, Path::new("Label.vue")).unwrap();
  assert_eq!(component.name, "Label");
  assert_eq!(component.props.len(), 2);
  assert_eq!(component.props[0].name, "text");
  assert!(component.props[0].required);
  assert_eq!(component.props[1].name, "disabled");
  assert!(!component.props[1].required);
}
