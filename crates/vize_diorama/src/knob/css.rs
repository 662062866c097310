//! Knob panel for CSS custom properties.
//!
//! One-directional: edits leave as [`CssNotification`] with the raw text,
//! nothing flows back from the element.

use super::control::{Binding, ChangeEvent, ControlOrigin, InputControl, InputKind, KnobRow};
use super::state::CssValue;
use crate::notify::Outbox;

/// Change of a CSS custom property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssNotification {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct CssPanel {
    rows: Vec<KnobRow>,
    outbox: Outbox<CssNotification>,
}

impl CssPanel {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn outbox(&self) -> &Outbox<CssNotification> {
        &self.outbox
    }

    #[inline]
    pub fn rows(&self) -> &[KnobRow] {
        &self.rows
    }

    pub fn update(&mut self, values: &[CssValue]) {
        self.rows = values
            .iter()
            .map(|css| KnobRow {
                label: css.name.clone(),
                control: InputControl {
                    id: css_input_id(&css.name),
                    input: InputKind::Text,
                    binding: Binding::Value(css.value.clone()),
                    origin: ControlOrigin::CssProperty {
                        name: css.name.clone(),
                    },
                    part: Some("input"),
                },
            })
            .collect();
    }

    pub fn handle_change(&self, event: &ChangeEvent) -> bool {
        let origin = self
            .rows
            .iter()
            .map(|row| &row.control)
            .find(|c| c.id == event.target)
            .map(|c| &c.origin);

        match origin {
            Some(ControlOrigin::CssProperty { name }) => {
                self.outbox.post(CssNotification {
                    name: name.clone(),
                    value: event.value.clone(),
                });
                true
            }
            _ => false,
        }
    }
}

#[inline]
pub fn css_input_id(name: &str) -> String {
    format!("css-{}", name.trim_start_matches('-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_change() {
        let mut panel = CssPanel::new();
        panel.update(&[CssValue {
            name: "--button-color".to_string(),
            value: "red".to_string(),
        }]);

        assert_eq!(panel.rows()[0].control.id, "css-button-color");
        assert!(panel.handle_change(&ChangeEvent::text("css-button-color", "  blue")));
        assert_eq!(
            panel.outbox().drain(),
            vec![CssNotification {
                name: "--button-color".to_string(),
                value: "  blue".to_string(),
            }]
        );
        assert!(!panel.handle_change(&ChangeEvent::text("prop-x", "1")));
    }
}
