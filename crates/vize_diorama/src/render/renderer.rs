//! Target renderer: keeps one live element in sync with the knob values.

use rustc_hash::FxHashMap;
use serde_json::Value;

use super::{ElementFactory, EventHandler, ListenerId, LiveElement};
use crate::knob::{CssValue, KnobState, SlotValue};
use crate::notify::Outbox;
use crate::schema::{EventDescriptor, PropertyDescriptor};

/// Identity of a created element. A new id is assigned every time the
/// renderer replaces its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Notification posted by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RendererNotification {
    /// A new element was created and received its initial values.
    Rendered { element: ElementId },
    /// The element reported a change of one of its own properties.
    PropertyChanged {
        element: ElementId,
        name: String,
        value: Option<Value>,
    },
}

/// Everything needed to render the target once.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub tag: &'a str,
    pub knobs: &'a KnobState,
    pub slots: &'a [SlotValue],
    pub css: &'a [CssValue],
    /// Push slot text. Off when the slots come from a template.
    pub fill_slots: bool,
}

/// Owns the live element and pushes values into it.
///
/// Only values that differ from the last pushed ones are assigned, so the
/// element keeps its identity and internal state across re-renders.
pub struct TargetRenderer<F: ElementFactory> {
    factory: F,
    element: Option<(ElementId, F::Element)>,
    next_id: u64,
    pushed_props: FxHashMap<String, Value>,
    pushed_slots: FxHashMap<String, String>,
    pushed_styles: FxHashMap<String, String>,
    listeners: Vec<ListenerId>,
    listening: bool,
    change_suffix: String,
    outbox: Outbox<RendererNotification>,
}

impl<F: ElementFactory> TargetRenderer<F> {
    pub fn new(factory: F, change_suffix: impl Into<String>) -> Self {
        Self {
            factory,
            element: None,
            next_id: 0,
            pushed_props: FxHashMap::default(),
            pushed_slots: FxHashMap::default(),
            pushed_styles: FxHashMap::default(),
            listeners: Vec::new(),
            listening: false,
            change_suffix: change_suffix.into(),
            outbox: Outbox::new(),
        }
    }

    #[inline]
    pub fn outbox(&self) -> &Outbox<RendererNotification> {
        &self.outbox
    }

    #[inline]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    #[inline]
    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Identity of the current element, if any.
    #[inline]
    pub fn current(&self) -> Option<ElementId> {
        self.element.as_ref().map(|(id, _)| *id)
    }

    #[inline]
    pub fn element(&self) -> Option<&F::Element> {
        self.element.as_ref().map(|(_, el)| el)
    }

    #[inline]
    pub fn element_mut(&mut self) -> Option<&mut F::Element> {
        self.element.as_mut().map(|(_, el)| el)
    }

    /// Whether change listeners are attached to the current element.
    #[inline]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Read a live property value off the current element.
    pub fn live_value(&self, name: &str) -> Option<Value> {
        self.element().and_then(|el| el.get_property(name))
    }

    /// Render the frame into the live element.
    ///
    /// Creates the element when there is none or the tag changed, then
    /// pushes changed values. A newly created element is announced with
    /// [`RendererNotification::Rendered`] after its initial values are set.
    pub fn render(&mut self, frame: &RenderFrame<'_>) {
        let reuse = self
            .element()
            .is_some_and(|el| el.tag() == frame.tag);

        let mut created = None;
        if !reuse {
            self.clear();
            if frame.tag.is_empty() {
                return;
            }
            match self.factory.create(frame.tag) {
                Ok(element) => {
                    let id = ElementId(self.next_id);
                    self.next_id += 1;
                    tracing::debug!("created <{}> as element {}", frame.tag, id.0);
                    self.element = Some((id, element));
                    created = Some(id);
                }
                Err(err) => {
                    tracing::warn!("{}", err);
                    return;
                }
            }
        }

        let Some((_, element)) = self.element.as_mut() else {
            return;
        };

        // Unset knobs are never written; forget what was pushed for them so a
        // later value is assigned again.
        self.pushed_props.retain(|name, _| frame.knobs.contains(name));
        for (name, entry) in frame.knobs.iter() {
            if self.pushed_props.get(name) != Some(&entry.value) {
                tracing::trace!("set {}.{} = {}", frame.tag, name, entry.value);
                element.set_property(name, &entry.value);
                self.pushed_props.insert(name.to_string(), entry.value.clone());
            }
        }

        if frame.fill_slots {
            for slot in frame.slots {
                if self.pushed_slots.get(&slot.name) != Some(&slot.content) {
                    element.set_slot_content(&slot.name, &slot.content);
                    self.pushed_slots
                        .insert(slot.name.clone(), slot.content.clone());
                }
            }
        }

        for css in frame.css {
            if self.pushed_styles.get(&css.name) != Some(&css.value) {
                element.set_style_property(&css.name, &css.value);
                self.pushed_styles.insert(css.name.clone(), css.value.clone());
            }
        }

        if let Some(id) = created {
            self.outbox.post(RendererNotification::Rendered { element: id });
        }
    }

    /// Subscribe to `<prop><suffix>` events of the current element.
    ///
    /// Each firing posts a [`RendererNotification::PropertyChanged`] carrying
    /// the live value read off the element. Does nothing until an element
    /// exists, and attaches at most once per element. Returns the number of
    /// listeners attached.
    pub fn listen_for_changes(
        &mut self,
        props: &[PropertyDescriptor],
        events: &[EventDescriptor],
    ) -> usize {
        if self.listening {
            return 0;
        }
        let Some((id, element)) = self.element.as_mut() else {
            return 0;
        };
        let id = *id;

        for event in events {
            let Some(prop) = event.name.strip_suffix(self.change_suffix.as_str()) else {
                continue;
            };
            if !props.iter().any(|p| p.name == prop) {
                continue;
            }

            let outbox = self.outbox.clone();
            let name = prop.to_string();
            let handler: EventHandler = Box::new(move |el: &dyn LiveElement| {
                outbox.post(RendererNotification::PropertyChanged {
                    element: id,
                    name: name.clone(),
                    value: el.get_property(&name),
                });
            });
            self.listeners.push(element.on_event(&event.name, handler));
        }

        self.listening = true;
        tracing::debug!(
            "listening to {} change events on element {}",
            self.listeners.len(),
            id.0
        );
        self.listeners.len()
    }

    /// Detach listeners and drop the current element.
    pub fn clear(&mut self) {
        if let Some((_, mut element)) = self.element.take() {
            for id in self.listeners.drain(..) {
                element.off_event(id);
            }
        }
        self.listeners.clear();
        self.listening = false;
        self.pushed_props.clear();
        self.pushed_slots.clear();
        self.pushed_styles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knob::KnobEntry;
    use crate::render::headless::{HeadlessDefinition, HeadlessHost};
    use crate::schema::PrimitiveKind;
    use serde_json::json;

    fn host() -> HeadlessHost {
        let mut host = HeadlessHost::new();
        host.define(
            "x-toggle",
            HeadlessDefinition::new()
                .with_default("checked", json!(false))
                .notify("checked"),
        );
        host.define("x-label", HeadlessDefinition::new());
        host
    }

    fn frame<'a>(tag: &'a str, knobs: &'a KnobState, slots: &'a [SlotValue]) -> RenderFrame<'a> {
        RenderFrame {
            tag,
            knobs,
            slots,
            css: &[],
            fill_slots: true,
        }
    }

    #[test]
    fn test_first_render_announces_element() {
        let mut renderer = TargetRenderer::new(host(), "-changed");
        let knobs = KnobState::new();

        renderer.render(&frame("x-toggle", &knobs, &[]));
        renderer.render(&frame("x-toggle", &knobs, &[]));

        assert_eq!(
            renderer.outbox().drain(),
            vec![RendererNotification::Rendered {
                element: ElementId(0)
            }]
        );
    }

    #[test]
    fn test_identity_changes_with_tag() {
        let mut renderer = TargetRenderer::new(host(), "-changed");
        let knobs = KnobState::new();

        renderer.render(&frame("x-toggle", &knobs, &[]));
        renderer.render(&frame("x-label", &knobs, &[]));

        assert_eq!(renderer.current(), Some(ElementId(1)));
        assert_eq!(renderer.element().unwrap().tag(), "x-label");
        assert_eq!(renderer.outbox().drain().len(), 2);
    }

    #[test]
    fn test_undefined_tag_is_not_ready() {
        let mut renderer = TargetRenderer::new(host(), "-changed");
        let knobs = KnobState::new();

        renderer.render(&frame("x-unknown", &knobs, &[]));

        assert!(renderer.current().is_none());
        assert!(renderer.outbox().is_empty());
        assert_eq!(renderer.listen_for_changes(&[], &[]), 0);
    }

    #[test]
    fn test_pushes_only_changed_values() {
        let mut renderer = TargetRenderer::new(host(), "-changed");
        let knobs = KnobState::new()
            .with_entry("label", KnobEntry::new(PrimitiveKind::String, json!("a")));
        let slots = vec![SlotValue {
            name: String::new(),
            content: "Default".to_string(),
        }];

        renderer.render(&frame("x-label", &knobs, &slots));
        renderer.render(&frame("x-label", &knobs, &slots));

        let knobs = knobs.with_entry("label", KnobEntry::new(PrimitiveKind::String, json!("b")));
        renderer.render(&frame("x-label", &knobs, &slots));

        let element = renderer.element().unwrap();
        assert_eq!(element.property_writes(), 2);
        assert_eq!(element.get_property("label"), Some(json!("b")));
        assert_eq!(element.slot_content(""), Some("Default"));
    }

    #[test]
    fn test_unset_knob_is_written_again() {
        let mut renderer = TargetRenderer::new(host(), "-changed");
        let knobs = KnobState::new()
            .with_entry("label", KnobEntry::new(PrimitiveKind::String, json!("a")));
        renderer.render(&frame("x-label", &knobs, &[]));

        renderer.render(&frame("x-label", &knobs.without("label"), &[]));
        assert_eq!(renderer.element().unwrap().property_writes(), 1);

        renderer.render(&frame("x-label", &knobs, &[]));
        assert_eq!(renderer.element().unwrap().property_writes(), 2);
    }

    #[test]
    fn test_change_listener_reads_live_value() {
        let mut renderer = TargetRenderer::new(host(), "-changed");
        let knobs = KnobState::new();
        renderer.render(&frame("x-toggle", &knobs, &[]));
        renderer.outbox().drain();

        let props = vec![PropertyDescriptor::new("checked", "boolean")];
        let events = vec![
            EventDescriptor::new("checked-changed"),
            EventDescriptor::new("value-changed"),
            EventDescriptor::new("click"),
        ];
        assert_eq!(renderer.listen_for_changes(&props, &events), 1);
        assert_eq!(renderer.listen_for_changes(&props, &events), 0);

        renderer
            .element_mut()
            .unwrap()
            .set_internal("checked", json!(true));

        assert_eq!(
            renderer.outbox().drain(),
            vec![RendererNotification::PropertyChanged {
                element: ElementId(0),
                name: "checked".to_string(),
                value: Some(json!(true)),
            }]
        );
    }

    #[test]
    fn test_clear_detaches_listeners() {
        let mut renderer = TargetRenderer::new(host(), "-changed");
        let knobs = KnobState::new();
        renderer.render(&frame("x-toggle", &knobs, &[]));
        renderer.listen_for_changes(
            &[PropertyDescriptor::new("checked", "boolean")],
            &[EventDescriptor::new("checked-changed")],
        );
        assert_eq!(renderer.element().unwrap().listener_count(), 1);

        renderer.clear();
        assert!(renderer.element().is_none());
        assert!(!renderer.is_listening());
    }
}
