//! In-memory element backend.
//!
//! [`HeadlessHost`] creates [`HeadlessElement`]s from registered
//! [`HeadlessDefinition`]s. Elements keep their properties, slot text and
//! style properties in maps and fire events synchronously, which is enough
//! to drive a demo session without a UI toolkit.

use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;

use super::{ElementFactory, EventHandler, ListenerId, LiveElement, RenderError};

/// Definition of a headless custom element.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDefinition {
    defaults: FxHashMap<String, Value>,
    notify: FxHashSet<String>,
}

impl HeadlessDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial value of a property.
    pub fn with_default(mut self, name: impl Into<String>, value: Value) -> Self {
        self.defaults.insert(name.into(), value);
        self
    }

    /// Fire `<name>-changed` whenever the property is assigned.
    pub fn notify(mut self, name: impl Into<String>) -> Self {
        self.notify.insert(name.into());
        self
    }
}

/// Factory of headless elements.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    definitions: FxHashMap<String, HeadlessDefinition>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag.
    pub fn define(&mut self, tag: impl Into<String>, definition: HeadlessDefinition) {
        self.definitions.insert(tag.into(), definition);
    }

    #[inline]
    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.contains_key(tag)
    }
}

impl ElementFactory for HeadlessHost {
    type Element = HeadlessElement;

    fn create(&mut self, tag: &str) -> Result<HeadlessElement, RenderError> {
        let definition = self
            .definitions
            .get(tag)
            .ok_or_else(|| RenderError::UndefinedElement {
                tag: tag.to_string(),
            })?;

        Ok(HeadlessElement {
            tag: tag.to_string(),
            properties: definition.defaults.clone(),
            notify: definition.notify.clone(),
            slots: FxHashMap::default(),
            styles: FxHashMap::default(),
            listeners: Vec::new(),
            next_listener: 0,
            property_writes: 0,
        })
    }
}

/// A headless element instance.
pub struct HeadlessElement {
    tag: String,
    properties: FxHashMap<String, Value>,
    notify: FxHashSet<String>,
    slots: FxHashMap<String, String>,
    styles: FxHashMap<String, String>,
    listeners: Vec<(ListenerId, String, EventHandler)>,
    next_listener: u64,
    property_writes: usize,
}

impl HeadlessElement {
    /// Change a property from inside the element and fire `<name>-changed`.
    pub fn set_internal(&mut self, name: &str, value: Value) {
        self.properties.insert(name.to_string(), value);
        self.fire(&format!("{}-changed", name));
    }

    /// Fire an event, invoking its listeners in attachment order.
    pub fn fire(&mut self, event: &str) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, name, handler) in listeners.iter_mut() {
            if name.as_str() == event {
                handler(&*self);
            }
        }
        // Listeners attached by a handler go after the existing ones.
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }

    #[inline]
    pub fn slot_content(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }

    #[inline]
    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.styles.get(name).map(String::as_str)
    }

    /// Number of property assignments made from outside.
    #[inline]
    pub fn property_writes(&self) -> usize {
        self.property_writes
    }

    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl LiveElement for HeadlessElement {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn get_property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    fn set_property(&mut self, name: &str, value: &Value) {
        self.property_writes += 1;
        self.properties.insert(name.to_string(), value.clone());
        if self.notify.contains(name) {
            self.fire(&format!("{}-changed", name));
        }
    }

    fn set_slot_content(&mut self, slot: &str, content: &str) {
        self.slots.insert(slot.to_string(), content.to_string());
    }

    fn set_style_property(&mut self, name: &str, value: &str) {
        self.styles.insert(name.to_string(), value.to_string());
    }

    fn on_event(&mut self, event: &str, handler: EventHandler) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, event.to_string(), handler));
        id
    }

    fn off_event(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener, _, _)| *listener != id);
    }
}
