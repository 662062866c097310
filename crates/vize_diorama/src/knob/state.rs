//! Knob state types.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{
    slot_title, CssPropertyDescriptor, PrimitiveKind, PropertyDescriptor, SlotDescriptor,
};

/// Current value of a single property knob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnobEntry {
    #[serde(rename = "type")]
    pub kind: PrimitiveKind,
    pub value: Value,
}

impl KnobEntry {
    #[inline]
    pub fn new(kind: PrimitiveKind, value: Value) -> Self {
        Self { kind, value }
    }
}

/// Mapping from property name to its knob entry.
///
/// Absent names are unset. Updates go through [`KnobState::with_entry`],
/// which leaves the receiver untouched and returns the updated mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnobState {
    entries: FxHashMap<String, KnobEntry>,
}

impl KnobState {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `name` set to `entry`, all other keys preserved.
    #[must_use]
    pub fn with_entry(&self, name: &str, entry: KnobEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(name.to_string(), entry);
        Self { entries }
    }

    /// Return a copy with `name` unset, all other keys preserved.
    #[must_use]
    pub fn without(&self, name: &str) -> Self {
        let mut entries = self.entries.clone();
        entries.remove(name);
        Self { entries }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&KnobEntry> {
        self.entries.get(name)
    }

    #[inline]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).map(|e| &e.value)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KnobEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Names currently set, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries listed in the order of the given descriptors.
    pub fn ordered<'a>(
        &'a self,
        props: &'a [PropertyDescriptor],
    ) -> impl Iterator<Item = (&'a str, &'a KnobEntry)> + 'a {
        props
            .iter()
            .filter_map(move |p| self.entries.get(&p.name).map(|e| (p.name.as_str(), e)))
    }
}

/// Editable content of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotValue {
    pub name: String,
    pub content: String,
}

impl SlotValue {
    /// Slot value with its placeholder content.
    #[inline]
    pub fn placeholder(slot: &SlotDescriptor) -> Self {
        Self {
            name: slot.name.clone(),
            content: slot_title(&slot.name).to_string(),
        }
    }
}

/// Build the default slot values for a schema.
pub fn default_slots(slots: &[SlotDescriptor]) -> Vec<SlotValue> {
    slots.iter().map(SlotValue::placeholder).collect()
}

/// Editable value of one CSS custom property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssValue {
    pub name: String,
    pub value: String,
}

/// Build the default CSS values for a schema.
pub fn default_css(props: &[CssPropertyDescriptor]) -> Vec<CssValue> {
    props
        .iter()
        .map(|p| CssValue {
            name: p.name.clone(),
            value: p.value.clone().unwrap_or_default(),
        })
        .collect()
}

/// A property annotated with the value shown by its knob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedProp {
    pub descriptor: PropertyDescriptor,
    /// Live value read back from the element. `None` until known.
    pub value: Option<Value>,
}

impl RenderedProp {
    #[inline]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    #[inline]
    pub fn kind(&self) -> PrimitiveKind {
        self.descriptor.kind()
    }
}

/// Rendered props with no known values.
pub fn unrendered_props(props: &[PropertyDescriptor]) -> Vec<RenderedProp> {
    props
        .iter()
        .map(|descriptor| RenderedProp {
            descriptor: descriptor.clone(),
            value: None,
        })
        .collect()
}
