//! Schema model for a target element.
//!
//! Descriptors are supplied by an external analyzer (usually as a
//! custom-elements manifest) and are never mutated. Switching the target
//! tag replaces the whole [`ElementSchema`].

use serde::{Deserialize, Serialize};

/// Primitive kind of a declared property type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// `boolean`
    Boolean,
    /// `number`
    Number,
    /// `string`
    String,
    /// Anything else (objects, unions, custom types).
    #[default]
    Other,
}

impl PrimitiveKind {
    /// Classify a declared type such as `"boolean | undefined"`.
    pub fn from_type_text(type_text: &str) -> Self {
        match normalize_type(type_text) {
            "boolean" => Self::Boolean,
            "number" => Self::Number,
            "string" => Self::String,
            _ => Self::Other,
        }
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Other => "other",
        }
    }
}

/// Strip optional markers from a declared type.
///
/// `"number | undefined"` and `"string | null"` become `"number"` and `"string"`.
pub fn normalize_type(type_text: &str) -> &str {
    let mut ty = type_text.trim();
    loop {
        if let Some(rest) = ty.strip_suffix(" | undefined") {
            ty = rest;
        } else if let Some(rest) = ty.strip_suffix(" | null") {
            ty = rest;
        } else {
            return ty;
        }
    }
}

/// A public property of the target element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Property name.
    pub name: String,

    /// Declared type as written by the analyzer.
    #[serde(rename = "type", default)]
    pub type_text: String,

    /// Description text.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    /// Attribute reflecting this property.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attribute: Option<String>,

    /// Default value as source text.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<String>,
}

impl PropertyDescriptor {
    /// Create a descriptor with a name and declared type.
    #[inline]
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    #[inline]
    pub fn with_attribute(mut self, attr: impl Into<String>) -> Self {
        self.attribute = Some(attr.into());
        self
    }

    #[inline]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Declared primitive kind.
    #[inline]
    pub fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::from_type_text(&self.type_text)
    }
}

/// An attribute of the target element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub type_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// A slot of the target element. An empty name is the default slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

impl SlotDescriptor {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Human-friendly title: "Default" for the unnamed slot.
    #[inline]
    pub fn title(&self) -> &str {
        slot_title(&self.name)
    }
}

/// Title shown for a slot name.
#[inline]
pub fn slot_title(name: &str) -> &str {
    if name.is_empty() {
        "Default"
    } else {
        name
    }
}

/// An event fired by the target element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

impl EventDescriptor {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// A CSS custom property exposed by the target element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssPropertyDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    /// Initial value shown in the CSS knobs.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<String>,
}

/// A CSS shadow part exposed by the target element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssPartDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// Complete API description of one custom element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSchema {
    /// Tag name.
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,

    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,

    #[serde(default)]
    pub slots: Vec<SlotDescriptor>,

    #[serde(default)]
    pub events: Vec<EventDescriptor>,

    #[serde(default)]
    pub css_properties: Vec<CssPropertyDescriptor>,

    #[serde(default)]
    pub css_parts: Vec<CssPartDescriptor>,
}

impl ElementSchema {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_property(mut self, prop: PropertyDescriptor) -> Self {
        self.properties.push(prop);
        self
    }

    #[inline]
    pub fn with_slot(mut self, slot: SlotDescriptor) -> Self {
        self.slots.push(slot);
        self
    }

    #[inline]
    pub fn with_event(mut self, event: EventDescriptor) -> Self {
        self.events.push(event);
        self
    }

    #[inline]
    pub fn with_css_property(mut self, prop: CssPropertyDescriptor) -> Self {
        self.css_properties.push(prop);
        self
    }

    /// Look up a property by name.
    #[inline]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Custom-elements manifest produced by the analyzer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementManifest {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub tags: Vec<ElementSchema>,
}

impl ElementManifest {
    /// Parse a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find the schema for a tag.
    pub fn element(&self, tag: &str) -> Result<&ElementSchema, SchemaError> {
        self.tags
            .iter()
            .find(|t| t.name == tag)
            .ok_or_else(|| SchemaError::UnknownTag {
                tag: tag.to_string(),
            })
    }
}

/// Error type for schema loading.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Invalid element manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Element <{tag}> is not described in the manifest")]
    UnknownTag { tag: String },
}
