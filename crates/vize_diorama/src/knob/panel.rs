//! Knob input panel for properties and slots.

use serde::Serialize;
use serde_json::Value;

use super::control::{Binding, ChangeEvent, ControlOrigin, InputControl, InputKind, KnobRow};
use super::state::{RenderedProp, SlotValue};
use crate::notify::Outbox;
use crate::schema::{slot_title, PrimitiveKind};

/// Change requested by the user through the knob panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelNotification {
    Property {
        name: String,
        kind: PrimitiveKind,
        value: Value,
    },
    Slot {
        name: String,
        content: String,
    },
}

/// Rendered state of the knob panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnobPanelView {
    pub properties: Vec<KnobRow>,
    pub slots: Vec<KnobRow>,
    /// Slot section is hidden when slots come from a template or there are none.
    pub slots_hidden: bool,
}

impl KnobPanelView {
    /// Find a control by id.
    pub fn control(&self, id: &str) -> Option<&InputControl> {
        self.properties
            .iter()
            .chain(self.slots.iter())
            .map(|row| &row.control)
            .find(|c| c.id == id)
    }
}

/// Panel with one input per property and per slot.
///
/// The panel never mutates shared state. Values are pushed in with
/// [`KnobPanel::update`], which only re-renders. User edits arrive through
/// [`KnobPanel::handle_change`] and leave as a [`PanelNotification`].
#[derive(Debug, Default)]
pub struct KnobPanel {
    view: KnobPanelView,
    outbox: Outbox<PanelNotification>,
}

impl KnobPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue of outgoing notifications.
    #[inline]
    pub fn outbox(&self) -> &Outbox<PanelNotification> {
        &self.outbox
    }

    #[inline]
    pub fn view(&self) -> &KnobPanelView {
        &self.view
    }

    /// Re-render from the current values.
    pub fn update(&mut self, props: &[RenderedProp], slots: &[SlotValue], slot_template: bool) {
        self.view = KnobPanelView {
            properties: props.iter().map(property_row).collect(),
            slots: slots.iter().map(slot_row).collect(),
            slots_hidden: slot_template || slots.is_empty(),
        };
    }

    /// Handle a user `change` on one of the panel's inputs.
    ///
    /// Returns `true` when a notification was posted. Events for ids not
    /// rendered by this panel are ignored.
    pub fn handle_change(&self, event: &ChangeEvent) -> bool {
        let Some(control) = self.view.control(&event.target) else {
            tracing::debug!("knob change for unknown input {}", event.target);
            return false;
        };

        let notification = match &control.origin {
            ControlOrigin::Slot { name } => PanelNotification::Slot {
                name: name.clone(),
                content: event.value.clone(),
            },
            ControlOrigin::Property { name, kind } => PanelNotification::Property {
                name: name.clone(),
                kind: *kind,
                value: if *kind == PrimitiveKind::Boolean {
                    Value::Bool(event.checked)
                } else {
                    Value::String(event.value.clone())
                },
            },
            ControlOrigin::CssProperty { .. } => return false,
        };

        self.outbox.post(notification);
        true
    }
}

/// Input id for a property.
#[inline]
pub fn property_input_id(name: &str) -> String {
    format!("prop-{}", name)
}

/// Input id for a slot.
#[inline]
pub fn slot_input_id(name: &str) -> String {
    format!("slot-{}", if name.is_empty() { "default" } else { name })
}

fn property_row(prop: &RenderedProp) -> KnobRow {
    let kind = prop.kind();
    let binding = Binding::for_value(kind, prop.value.as_ref());
    let part = match binding {
        Binding::Unbound => None,
        Binding::Checked(_) => Some("checkbox"),
        Binding::Value(_) => Some("input"),
    };
    // A bound boolean is always a checkbox even if the value is not boolean.
    let input = if matches!(binding, Binding::Checked(_)) {
        InputKind::Checkbox
    } else {
        InputKind::for_kind(kind)
    };

    KnobRow {
        label: prop.name().to_string(),
        control: InputControl {
            id: property_input_id(prop.name()),
            input,
            binding,
            origin: ControlOrigin::Property {
                name: prop.name().to_string(),
                kind,
            },
            part,
        },
    }
}

fn slot_row(slot: &SlotValue) -> KnobRow {
    KnobRow {
        label: slot_title(&slot.name).to_string(),
        control: InputControl {
            id: slot_input_id(&slot.name),
            input: InputKind::Text,
            binding: Binding::Value(slot.content.clone()),
            origin: ControlOrigin::Slot {
                name: slot.name.clone(),
            },
            part: Some("input"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knob::state::unrendered_props;
    use crate::schema::PropertyDescriptor;
    use serde_json::json;

    fn props() -> Vec<RenderedProp> {
        let mut props = unrendered_props(&[
            PropertyDescriptor::new("disabled", "boolean"),
            PropertyDescriptor::new("label", "string"),
            PropertyDescriptor::new("count", "number | undefined"),
        ]);
        props[0].value = Some(json!(false));
        props
    }

    fn slots() -> Vec<SlotValue> {
        vec![
            SlotValue {
                name: String::new(),
                content: "Default".to_string(),
            },
            SlotValue {
                name: "suffix".to_string(),
                content: "suffix".to_string(),
            },
        ]
    }

    #[test]
    fn test_render_controls() {
        let mut panel = KnobPanel::new();
        panel.update(&props(), &slots(), false);
        let view = panel.view();

        let disabled = &view.properties[0].control;
        assert_eq!(disabled.id, "prop-disabled");
        assert_eq!(disabled.input, InputKind::Checkbox);
        assert_eq!(disabled.binding, Binding::Checked(false));
        assert_eq!(disabled.part, Some("checkbox"));

        let label = &view.properties[1].control;
        assert_eq!(label.input, InputKind::Text);
        assert_eq!(label.binding, Binding::Unbound);
        assert_eq!(
            label.origin,
            ControlOrigin::Property {
                name: "label".to_string(),
                kind: PrimitiveKind::String
            }
        );

        let count = &view.properties[2].control;
        assert_eq!(count.input, InputKind::Number);

        assert_eq!(view.slots[0].label, "Default");
        assert_eq!(view.slots[0].control.id, "slot-default");
        assert_eq!(view.slots[1].control.id, "slot-suffix");
        assert!(!view.slots_hidden);
    }

    #[test]
    fn test_slots_hidden() {
        let mut panel = KnobPanel::new();
        panel.update(&props(), &[], false);
        assert!(panel.view().slots_hidden);

        panel.update(&props(), &slots(), true);
        assert!(panel.view().slots_hidden);
    }

    #[test]
    fn test_checkbox_change_coerces_to_bool() {
        let mut panel = KnobPanel::new();
        panel.update(&props(), &slots(), false);

        assert!(panel.handle_change(&ChangeEvent::checkbox("prop-disabled", true)));
        assert_eq!(
            panel.outbox().drain(),
            vec![PanelNotification::Property {
                name: "disabled".to_string(),
                kind: PrimitiveKind::Boolean,
                value: json!(true),
            }]
        );
    }

    #[test]
    fn test_number_change_keeps_raw_text() {
        let mut panel = KnobPanel::new();
        panel.update(&props(), &slots(), false);

        panel.handle_change(&ChangeEvent::text("prop-count", "42"));
        assert_eq!(
            panel.outbox().drain(),
            vec![PanelNotification::Property {
                name: "count".to_string(),
                kind: PrimitiveKind::Number,
                value: json!("42"),
            }]
        );
    }

    #[test]
    fn test_slot_change() {
        let mut panel = KnobPanel::new();
        panel.update(&props(), &slots(), false);

        panel.handle_change(&ChangeEvent::text("slot-suffix", "€"));
        assert_eq!(
            panel.outbox().drain(),
            vec![PanelNotification::Slot {
                name: "suffix".to_string(),
                content: "€".to_string(),
            }]
        );
    }

    #[test]
    fn test_programmatic_update_is_silent() {
        let mut panel = KnobPanel::new();
        panel.update(&props(), &slots(), false);

        let mut updated = props();
        updated[0].value = Some(json!(true));
        panel.update(&updated, &slots(), false);

        assert_eq!(
            panel.view().properties[0].control.binding,
            Binding::Checked(true)
        );
        assert_eq!(panel.outbox().posted(), 0);
    }

    #[test]
    fn test_unknown_input_ignored() {
        let mut panel = KnobPanel::new();
        panel.update(&props(), &slots(), false);

        assert!(!panel.handle_change(&ChangeEvent::text("prop-missing", "x")));
        assert!(panel.outbox().is_empty());
    }
}
