use serde::{Deserialize, Serialize};

/// A component prop.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropDoc {
  pub name:        String,
  /// Literal type text, or a `|`-joined list of runtime type names.
  pub type_text:   Option<String>,
  pub required:    bool,
  /// Literal source text of the default value.
  pub default:     Option<String>,
  pub description: String,
}

/// An event the component emits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventDoc {
  pub name:    String,
  /// Literal payload type text, when declared.
  pub payload: Option<String>,
}

/// A content slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotDoc {
  pub name:   String,
  /// Whether the slot passes data back to its content.
  pub scoped: bool,
}

/// Normalized description of one component, whatever its authoring style.
///
/// Props, events and slots are unique by name; the first declaration wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentDescription {
  pub name:        String,
  pub description: String,
  pub props:       Vec<PropDoc>,
  pub events:      Vec<EventDoc>,
  pub slots:       Vec<SlotDoc>,
}

impl ComponentDescription {
  #[must_use]
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  /// Add `prop` unless a prop of the same name exists.
  pub fn add_prop(&mut self, prop: PropDoc) {
    if !self.props.iter().any(|p| p.name == prop.name) {
      self.props.push(prop);
    }
  }

  /// Add `event` unless an event of the same name exists.
  pub fn add_event(&mut self, event: EventDoc) {
    if !self.events.iter().any(|e| e.name == event.name) {
      self.events.push(event);
    }
  }

  /// Add `slot` unless a slot of the same name exists.
  pub fn add_slot(&mut self, slot: SlotDoc) {
    if !self.slots.iter().any(|s| s.name == slot.name) {
      self.slots.push(slot);
    }
  }

  /// Whether nothing beyond the name was found.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.description.is_empty()
      && self.props.is_empty()
      && self.events.is_empty()
      && self.slots.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_first_occurrence_wins() {
    let mut component = ComponentDescription::new("Button");
    component.add_prop(PropDoc {
      name: "size".into(),
      type_text: Some("string".into()),
      ..PropDoc::default()
    });
    component.add_prop(PropDoc {
      name: "size".into(),
      type_text: Some("number".into()),
      required: true,
      ..PropDoc::default()
    });
    component.add_event(EventDoc {
      name: "click".into(),
      payload: None,
    });
    component.add_event(EventDoc {
      name: "click".into(),
      payload: Some("MouseEvent".into()),
    });

    assert_eq!(component.props.len(), 1);
    assert_eq!(component.props[0].type_text.as_deref(), Some("string"));
    assert!(!component.props[0].required);
    assert_eq!(component.events.len(), 1);
    assert_eq!(component.events[0].payload, None);
  }
}
