//! Markdown for component pages.
use std::fmt::Write;

use docwright_components::ComponentDescription;

use crate::markdown::{cell, inline_code};

/// Render a component description as a Markdown page.
#[must_use]
pub fn component_markdown(component: &ComponentDescription) -> String {
  let mut md = String::new();
  let _ = writeln!(md, "# {}\n", component.name);

  if !component.description.is_empty() {
    let _ = writeln!(md, "{}\n", component.description);
  }

  if component.props.is_empty()
    && component.events.is_empty()
    && component.slots.is_empty()
  {
    let _ = writeln!(md, "_No props, events or slots found._");
    return md;
  }

  if !component.props.is_empty() {
    let _ = writeln!(md, "## Props\n");
    let _ = writeln!(md, "| Name | Type | Required | Default | Description |");
    let _ = writeln!(md, "| --- | --- | --- | --- | --- |");
    for prop in &component.props {
      let _ = writeln!(
        md,
        "| {} | {} | {} | {} | {} |",
        cell(&inline_code(&prop.name)),
        cell(&prop.type_text.as_deref().map(inline_code).unwrap_or_default()),
        if prop.required { "yes" } else { "no" },
        cell(&prop.default.as_deref().map(inline_code).unwrap_or_default()),
        cell(&prop.description),
      );
    }
    md.push('\n');
  }

  if !component.events.is_empty() {
    let _ = writeln!(md, "## Events\n");
    let _ = writeln!(md, "| Name | Payload |");
    let _ = writeln!(md, "| --- | --- |");
    for event in &component.events {
      let _ = writeln!(
        md,
        "| {} | {} |",
        cell(&inline_code(&event.name)),
        cell(&event.payload.as_deref().map(inline_code).unwrap_or_default()),
      );
    }
    md.push('\n');
  }

  if !component.slots.is_empty() {
    let _ = writeln!(md, "## Slots\n");
    let _ = writeln!(md, "| Name | Scoped |");
    let _ = writeln!(md, "| --- | --- |");
    for slot in &component.slots {
      let _ = writeln!(
        md,
        "| {} | {} |",
        cell(&inline_code(&slot.name)),
        if slot.scoped { "yes" } else { "no" },
      );
    }
    md.push('\n');
  }

  md
}

#[cfg(test)]
mod tests {
  use docwright_components::{EventDoc, PropDoc, SlotDoc};

  use super::*;

  #[test]
  fn test_component_page() {
    let mut component = ComponentDescription::new("FancyButton");
    component.description = "A fancy button.".into();
    component.add_prop(PropDoc {
      name:        "size".into(),
      type_text:   Some("'sm' | 'md'".into()),
      required:    false,
      default:     Some("'md'".into()),
      description: "Button size".into(),
    });
    component.add_event(EventDoc {
      name:    "click".into(),
      payload: Some("MouseEvent".into()),
    });
    component.add_slot(SlotDoc {
      name:   "icon".into(),
      scoped: true,
    });

    let md = component_markdown(&component);
    assert!(md.starts_with("# FancyButton\n\nA fancy button.\n"));
    assert!(
      md.contains("| `size` | `'sm' \\| 'md'` | no | `'md'` | Button size |")
    );
    assert!(md.contains("| `click` | `MouseEvent` |"));
    assert!(md.contains("| `icon` | yes |"));
  }

  #[test]
  fn test_empty_component() {
    let md = component_markdown(&ComponentDescription::new("helpers"));
    assert!(md.contains("_No props, events or slots found._"));
  }
}
