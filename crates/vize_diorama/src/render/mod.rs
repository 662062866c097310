//! Target rendering.
//!
//! The live element is an opaque handle behind [`LiveElement`]. UI bindings
//! implement it together with an [`ElementFactory`]; the engine never looks
//! at the concrete element type beyond this interface.
//!
//! [`headless`] provides an in-memory implementation.

pub mod headless;
mod renderer;

pub use renderer::{ElementId, RenderFrame, RendererNotification, TargetRenderer};

use serde_json::Value;

/// Handle of an attached event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Callback invoked when the element fires an event.
///
/// The element passes itself so the listener can read live values.
pub type EventHandler = Box<dyn FnMut(&dyn LiveElement)>;

/// Narrow capability interface of a rendered element.
pub trait LiveElement {
    /// Tag name of the element.
    fn tag(&self) -> &str;

    /// Current value of a public property. `None` when undefined.
    fn get_property(&self, name: &str) -> Option<Value>;

    /// Assign a public property.
    fn set_property(&mut self, name: &str, value: &Value);

    /// Replace the text content projected into a slot.
    fn set_slot_content(&mut self, slot: &str, content: &str);

    /// Set an inline CSS custom property.
    fn set_style_property(&mut self, name: &str, value: &str);

    /// Subscribe to an event fired by the element.
    fn on_event(&mut self, event: &str, handler: EventHandler) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn off_event(&mut self, id: ListenerId);
}

/// Creates live elements for tags.
pub trait ElementFactory {
    type Element: LiveElement;

    fn create(&mut self, tag: &str) -> Result<Self::Element, RenderError>;
}

/// Error type for element creation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    #[error("Element <{tag}> is not defined")]
    UndefinedElement { tag: String },

    #[error("Failed to create <{tag}>: {message}")]
    Host { tag: String, message: String },
}
