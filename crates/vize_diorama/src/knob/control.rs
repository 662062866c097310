//! Input control model for the knob panels.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::PrimitiveKind;

/// Widget used for an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Checkbox,
    Number,
    Text,
}

impl InputKind {
    /// Widget for a declared property kind.
    #[inline]
    pub fn for_kind(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Boolean => Self::Checkbox,
            PrimitiveKind::Number => Self::Number,
            PrimitiveKind::String | PrimitiveKind::Other => Self::Text,
        }
    }
}

/// What the control currently displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "bind", content = "value", rename_all = "lowercase")]
pub enum Binding {
    /// No current value; the control starts empty.
    Unbound,
    /// Bound to the `checked` state of a checkbox.
    Checked(bool),
    /// Bound to the text `value` of an input.
    Value(String),
}

impl Binding {
    /// Bind a property value to a control of the given kind.
    pub fn for_value(kind: PrimitiveKind, value: Option<&Value>) -> Self {
        match value {
            None => Self::Unbound,
            Some(value) if kind == PrimitiveKind::Boolean => Self::Checked(is_truthy(value)),
            Some(value) => Self::Value(value_text(value)),
        }
    }
}

/// Marker carried by a control identifying the item it edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "camelCase")]
pub enum ControlOrigin {
    Property { name: String, kind: PrimitiveKind },
    Slot { name: String },
    CssProperty { name: String },
}

/// A single input control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputControl {
    pub id: String,
    pub input: InputKind,
    pub binding: Binding,
    pub origin: ControlOrigin,
    /// Styling part name, if the control exposes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part: Option<&'static str>,
}

/// A labeled row in a knob table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnobRow {
    pub label: String,
    pub control: InputControl,
}

/// A user-initiated `change` on an input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Id of the input that changed.
    pub target: String,
    /// Checkbox state at the time of the change.
    pub checked: bool,
    /// Raw text of the input at the time of the change.
    pub value: String,
}

impl ChangeEvent {
    /// A checkbox toggled by the user.
    #[inline]
    pub fn checkbox(target: impl Into<String>, checked: bool) -> Self {
        Self {
            target: target.into(),
            checked,
            value: "on".to_string(),
        }
    }

    /// Text typed by the user.
    #[inline]
    pub fn text(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            checked: false,
            value: value.into(),
        }
    }
}

/// Loose truthiness used when a non-boolean value is shown in a checkbox.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text shown for a value in a text input.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_kind() {
        assert_eq!(InputKind::for_kind(PrimitiveKind::Boolean), InputKind::Checkbox);
        assert_eq!(InputKind::for_kind(PrimitiveKind::Number), InputKind::Number);
        assert_eq!(InputKind::for_kind(PrimitiveKind::String), InputKind::Text);
        assert_eq!(InputKind::for_kind(PrimitiveKind::Other), InputKind::Text);
    }

    #[test]
    fn test_binding() {
        assert_eq!(
            Binding::for_value(PrimitiveKind::Boolean, None),
            Binding::Unbound
        );
        assert_eq!(
            Binding::for_value(PrimitiveKind::Boolean, Some(&json!(true))),
            Binding::Checked(true)
        );
        assert_eq!(
            Binding::for_value(PrimitiveKind::Boolean, Some(&json!(""))),
            Binding::Checked(false)
        );
        assert_eq!(
            Binding::for_value(PrimitiveKind::Number, Some(&json!(42))),
            Binding::Value("42".to_string())
        );
        assert_eq!(
            Binding::for_value(PrimitiveKind::String, Some(&json!("hi"))),
            Binding::Value("hi".to_string())
        );
    }
}
