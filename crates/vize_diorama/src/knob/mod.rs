//! Knobs - editable inputs and the values they edit.
//!
//! - [`state`]: knob entries, slot values, CSS values and rendered props
//! - [`control`]: the input control model shared by the panels
//! - [`KnobPanel`]: property and slot inputs
//! - [`CssPanel`]: CSS custom property inputs

pub mod control;
mod css;
mod panel;
pub mod state;

pub use control::{Binding, ChangeEvent, ControlOrigin, InputControl, InputKind, KnobRow};
pub use css::{css_input_id, CssNotification, CssPanel};
pub use panel::{property_input_id, slot_input_id, KnobPanel, KnobPanelView, PanelNotification};
pub use state::{CssValue, KnobEntry, KnobState, RenderedProp, SlotValue};
