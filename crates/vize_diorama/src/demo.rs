//! Demo session: owns the knob state and wires panels to the renderer.
//!
//! The session is the only writer of knob state, slot values, CSS values and
//! rendered props. The panels and the renderer post notifications; the
//! session applies them in [`DemoSession::flush`] and re-renders.
//!
//! ```rust
//! use serde_json::json;
//! use vize_diorama::demo::{DemoOptions, DemoSession};
//! use vize_diorama::knob::ChangeEvent;
//! use vize_diorama::render::headless::{HeadlessDefinition, HeadlessHost};
//! use vize_diorama::schema::{ElementSchema, PropertyDescriptor};
//!
//! let mut host = HeadlessHost::new();
//! host.define("x-button", HeadlessDefinition::new().with_default("disabled", json!(false)));
//!
//! let mut session = DemoSession::new(host, DemoOptions::default());
//! session.set_tag(
//!     ElementSchema::new("x-button").with_property(PropertyDescriptor::new("disabled", "boolean")),
//! );
//!
//! session.handle_input(&ChangeEvent::checkbox("prop-disabled", true));
//! assert_eq!(session.knobs().value("disabled"), Some(&json!(true)));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::docs::ApiDocs;
use crate::knob::control::value_text;
use crate::knob::state::{default_css, default_slots, unrendered_props};
use crate::knob::{
    ChangeEvent, CssNotification, CssPanel, CssValue, KnobEntry, KnobPanel, KnobState,
    PanelNotification, RenderedProp, SlotValue,
};
use crate::render::{ElementFactory, ElementId, RenderFrame, RendererNotification, TargetRenderer};
use crate::schema::{ElementSchema, PrimitiveKind};

/// Options for a demo session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoOptions {
    /// Suffix of events that mirror a property (`<prop><suffix>`).
    #[serde(default = "default_change_suffix")]
    pub change_event_suffix: String,

    /// Tags whose slots are filled by a template instead of slot knobs.
    #[serde(default)]
    pub slot_templates: Vec<String>,

    /// Upper bound of apply/render passes per flush. Zero counts as one.
    #[serde(default = "default_max_flush_passes")]
    pub max_flush_passes: usize,
}

impl Default for DemoOptions {
    #[inline]
    fn default() -> Self {
        Self {
            change_event_suffix: default_change_suffix(),
            slot_templates: Vec::new(),
            max_flush_passes: default_max_flush_passes(),
        }
    }
}

fn default_change_suffix() -> String {
    "-changed".to_string()
}

fn default_max_flush_passes() -> usize {
    32
}

/// Counters of applied and dropped notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoStats {
    pub property_changes: usize,
    pub slot_changes: usize,
    pub css_changes: usize,
    pub authoritative_changes: usize,
    pub dropped: usize,
    pub renders: usize,
}

/// Knob entry as exposed to snippet generation.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotKnob<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub kind: PrimitiveKind,
    pub value: &'a Value,
}

/// Read-only view of the session state for snippet generation.
#[derive(Debug, Clone, Serialize)]
pub struct DemoSnapshot<'a> {
    pub tag: &'a str,
    /// Set knobs in schema order.
    pub knobs: Vec<SnapshotKnob<'a>>,
    pub slots: &'a [SlotValue],
    pub css: &'a [CssValue],
}

/// Live demo of one target element.
pub struct DemoSession<F: ElementFactory> {
    options: DemoOptions,
    schema: ElementSchema,
    knobs: KnobState,
    slots: Vec<SlotValue>,
    css: Vec<CssValue>,
    rendered_props: Vec<RenderedProp>,
    panel: KnobPanel,
    css_panel: CssPanel,
    renderer: TargetRenderer<F>,
    needs_render: bool,
    stats: DemoStats,
}

impl<F: ElementFactory> DemoSession<F> {
    pub fn new(factory: F, options: DemoOptions) -> Self {
        let renderer = TargetRenderer::new(factory, options.change_event_suffix.clone());
        Self {
            options,
            schema: ElementSchema::default(),
            knobs: KnobState::new(),
            slots: Vec::new(),
            css: Vec::new(),
            rendered_props: Vec::new(),
            panel: KnobPanel::new(),
            css_panel: CssPanel::new(),
            renderer,
            needs_render: false,
            stats: DemoStats::default(),
        }
    }

    /// Switch the target element.
    ///
    /// Drops the previous element, rebuilds every value from the new schema
    /// and renders.
    pub fn set_tag(&mut self, schema: ElementSchema) {
        tracing::debug!("demo target set to <{}>", schema.name);

        self.renderer.clear();
        self.panel.outbox().drain();
        self.css_panel.outbox().drain();
        self.renderer.outbox().drain();

        self.knobs = KnobState::new();
        self.slots = default_slots(&schema.slots);
        self.css = default_css(&schema.css_properties);
        self.rendered_props = unrendered_props(&schema.properties);
        self.schema = schema;

        self.needs_render = true;
        self.flush();
    }

    /// Forward a user change from the knob panel and flush.
    pub fn handle_input(&mut self, event: &ChangeEvent) -> bool {
        let posted = self.panel.handle_change(event);
        self.flush();
        posted
    }

    /// Forward a user change from the CSS panel and flush.
    pub fn handle_css_input(&mut self, event: &ChangeEvent) -> bool {
        let posted = self.css_panel.handle_change(event);
        self.flush();
        posted
    }

    /// Apply pending notifications and re-render until nothing changes.
    ///
    /// Call after the live element fired events outside of a render.
    /// Returns the number of renders performed.
    pub fn flush(&mut self) -> usize {
        let passes = self.options.max_flush_passes.max(1);
        let mut renders = 0;
        for _ in 0..passes {
            self.apply_pending();
            if !self.needs_render {
                return renders;
            }
            self.render();
            renders += 1;
        }

        if self.needs_render || !self.renderer.outbox().is_empty() {
            tracing::warn!(
                "<{}> did not settle after {} render passes",
                self.schema.name,
                passes
            );
        }
        renders
    }

    /// Merge a single knob entry from the panel path.
    ///
    /// Boolean properties store a boolean, everything else stores text.
    /// Returns `false` when the property is not in the schema.
    pub fn apply_property_change(&mut self, name: &str, kind: PrimitiveKind, value: Value) -> bool {
        let Some(declared) = self.schema.property(name).map(|p| p.kind()) else {
            tracing::debug!("dropping change of unknown property {}", name);
            self.stats.dropped += 1;
            return false;
        };
        if kind != declared {
            tracing::debug!(
                "{} changed as {} but declared {}",
                name,
                kind.as_str(),
                declared.as_str()
            );
        }

        let value = coerce(declared, value);
        self.set_knob(name, KnobEntry::new(declared, value));
        self.stats.property_changes += 1;
        true
    }

    /// Replace the content of one slot. Returns `false` for unknown slots.
    pub fn apply_slot_change(&mut self, name: &str, content: String) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|s| s.name == name) else {
            tracing::debug!("dropping change of unknown slot {:?}", name);
            self.stats.dropped += 1;
            return false;
        };

        slot.content = content;
        self.needs_render = true;
        self.stats.slot_changes += 1;
        true
    }

    /// Replace the value of one CSS custom property.
    pub fn apply_css_change(&mut self, name: &str, value: String) -> bool {
        let Some(css) = self.css.iter_mut().find(|c| c.name == name) else {
            tracing::debug!("dropping change of unknown css property {}", name);
            self.stats.dropped += 1;
            return false;
        };

        css.value = value;
        self.needs_render = true;
        self.stats.css_changes += 1;
        true
    }

    /// Mirror a value reported by the element itself.
    ///
    /// Updates the knob and the value shown by the panel. The panel is
    /// re-rendered programmatically, so no panel notification follows.
    /// `None` means the property is undefined on the element: the knob is
    /// unset and the panel shows an unbound control.
    pub fn apply_authoritative_change(&mut self, name: &str, value: Option<Value>) -> bool {
        let Some(declared) = self.schema.property(name).map(|p| p.kind()) else {
            tracing::debug!("dropping element change of unknown property {}", name);
            self.stats.dropped += 1;
            return false;
        };

        match value {
            Some(value) => self.set_knob(name, KnobEntry::new(declared, value)),
            None => self.unset_knob(name),
        }
        self.stats.authoritative_changes += 1;
        true
    }

    fn set_knob(&mut self, name: &str, entry: KnobEntry) {
        if let Some(prop) = self.rendered_props.iter_mut().find(|p| p.name() == name) {
            prop.value = Some(entry.value.clone());
        }
        self.knobs = self.knobs.with_entry(name, entry);
        self.needs_render = true;
    }

    fn unset_knob(&mut self, name: &str) {
        if let Some(prop) = self.rendered_props.iter_mut().find(|p| p.name() == name) {
            prop.value = None;
        }
        self.knobs = self.knobs.without(name);
        self.needs_render = true;
    }

    fn apply_pending(&mut self) {
        for notification in self.panel.outbox().drain() {
            match notification {
                PanelNotification::Property { name, kind, value } => {
                    self.apply_property_change(&name, kind, value);
                }
                PanelNotification::Slot { name, content } => {
                    self.apply_slot_change(&name, content);
                }
            }
        }

        for CssNotification { name, value } in self.css_panel.outbox().drain() {
            self.apply_css_change(&name, value);
        }

        for notification in self.renderer.outbox().drain() {
            match notification {
                RendererNotification::Rendered { element } => self.on_rendered(element),
                RendererNotification::PropertyChanged {
                    element,
                    name,
                    value,
                } => {
                    if self.renderer.current() != Some(element) {
                        self.stats.dropped += 1;
                        continue;
                    }
                    self.apply_authoritative_change(&name, value);
                }
            }
        }
    }

    fn on_rendered(&mut self, element: ElementId) {
        if self.renderer.current() != Some(element) {
            return;
        }

        for prop in &mut self.rendered_props {
            if let Some(value) = self.renderer.live_value(prop.name()) {
                prop.value = Some(value);
            }
        }

        self.renderer
            .listen_for_changes(&self.schema.properties, &self.schema.events);
        self.refresh_panels();
    }

    fn render(&mut self) {
        self.needs_render = false;
        let fill_slots = !self.has_slot_template();
        self.renderer.render(&RenderFrame {
            tag: &self.schema.name,
            knobs: &self.knobs,
            slots: &self.slots,
            css: &self.css,
            fill_slots,
        });
        self.refresh_panels();
        self.stats.renders += 1;
    }

    fn refresh_panels(&mut self) {
        let slot_template = self.has_slot_template();
        self.panel
            .update(&self.rendered_props, &self.slots, slot_template);
        self.css_panel.update(&self.css);
    }

    /// Whether the current tag fills its slots from a template.
    pub fn has_slot_template(&self) -> bool {
        self.options
            .slot_templates
            .iter()
            .any(|t| *t == self.schema.name)
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.schema.name
    }

    #[inline]
    pub fn schema(&self) -> &ElementSchema {
        &self.schema
    }

    #[inline]
    pub fn options(&self) -> &DemoOptions {
        &self.options
    }

    #[inline]
    pub fn knobs(&self) -> &KnobState {
        &self.knobs
    }

    #[inline]
    pub fn slots(&self) -> &[SlotValue] {
        &self.slots
    }

    #[inline]
    pub fn css(&self) -> &[CssValue] {
        &self.css
    }

    #[inline]
    pub fn rendered_props(&self) -> &[RenderedProp] {
        &self.rendered_props
    }

    #[inline]
    pub fn panel(&self) -> &KnobPanel {
        &self.panel
    }

    #[inline]
    pub fn css_panel(&self) -> &CssPanel {
        &self.css_panel
    }

    #[inline]
    pub fn renderer(&self) -> &TargetRenderer<F> {
        &self.renderer
    }

    #[inline]
    pub fn element(&self) -> Option<&F::Element> {
        self.renderer.element()
    }

    /// Mutable access to the live element. Call [`DemoSession::flush`]
    /// after making it fire events.
    #[inline]
    pub fn element_mut(&mut self) -> Option<&mut F::Element> {
        self.renderer.element_mut()
    }

    #[inline]
    pub fn stats(&self) -> DemoStats {
        self.stats
    }

    /// Current state for snippet generation.
    pub fn snapshot(&self) -> DemoSnapshot<'_> {
        DemoSnapshot {
            tag: &self.schema.name,
            knobs: self
                .knobs
                .ordered(&self.schema.properties)
                .map(|(name, entry)| SnapshotKnob {
                    name,
                    kind: entry.kind,
                    value: &entry.value,
                })
                .collect(),
            slots: &self.slots,
            css: &self.css,
        }
    }

    /// Documentation tabs of the current element.
    pub fn docs(&self) -> ApiDocs {
        ApiDocs::from_schema(&self.schema)
    }
}

/// Coerce a panel value to the declared kind.
fn coerce(kind: PrimitiveKind, value: Value) -> Value {
    match (kind, value) {
        (PrimitiveKind::Boolean, Value::Bool(b)) => Value::Bool(b),
        (PrimitiveKind::Boolean, other) => Value::Bool(crate::knob::control::is_truthy(&other)),
        (_, Value::String(s)) => Value::String(s),
        (_, other) => Value::String(value_text(&other)),
    }
}
