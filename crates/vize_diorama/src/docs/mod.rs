//! API documentation tabs for a target element.
//!
//! Built from the same [`ElementSchema`] as the knobs, so the docs always
//! describe the element being demoed.
//!
//! # Example
//!
//! ```rust
//! use vize_diorama::docs::{generate_api_markdown, ApiDocs};
//! use vize_diorama::schema::{ElementSchema, PropertyDescriptor};
//!
//! let schema = ElementSchema::new("x-button")
//!     .with_property(PropertyDescriptor::new("disabled", "boolean"));
//!
//! let docs = ApiDocs::from_schema(&schema);
//! assert!(docs.warning().is_none());
//! println!("{}", generate_api_markdown(&docs));
//! ```

mod markdown;

pub use markdown::generate_api_markdown;

use serde::Serialize;

use crate::schema::ElementSchema;

/// Kind of a documentation tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DocTabKind {
    Properties,
    Attributes,
    Slots,
    Events,
    CssProperties,
    CssParts,
}

impl DocTabKind {
    #[inline]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Properties => "Properties",
            Self::Attributes => "Attributes",
            Self::Slots => "Slots",
            Self::Events => "Events",
            Self::CssProperties => "CSS Custom Properties",
            Self::CssParts => "CSS Shadow Parts",
        }
    }
}

/// A documented API item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl DocItem {
    fn named(name: &str, description: Option<&String>) -> Self {
        Self {
            name: name.to_string(),
            description: description.cloned(),
            ..Self::default()
        }
    }
}

/// One documentation tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocTab {
    pub kind: DocTabKind,
    pub items: Vec<DocItem>,
}

impl DocTab {
    #[inline]
    pub fn heading(&self) -> &'static str {
        self.kind.heading()
    }

    /// Tabs without items are hidden.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.items.is_empty()
    }
}

/// Documentation of one element, one tab per API category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocs {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tabs: Vec<DocTab>,
}

impl ApiDocs {
    pub fn from_schema(schema: &ElementSchema) -> Self {
        let properties = schema
            .properties
            .iter()
            .map(|p| DocItem {
                name: p.name.clone(),
                description: p.description.clone(),
                value_type: (!p.type_text.is_empty()).then(|| p.type_text.clone()),
                attribute: p.attribute.clone(),
                default: p.default.clone(),
            })
            .collect();

        // Attributes already documented as properties are left out.
        let attributes = schema
            .attributes
            .iter()
            .filter(|a| !schema.properties.iter().any(|p| p.name == a.name))
            .map(|a| DocItem {
                value_type: a.type_text.clone(),
                ..DocItem::named(&a.name, a.description.as_ref())
            })
            .collect();

        let tabs = vec![
            DocTab {
                kind: DocTabKind::Properties,
                items: properties,
            },
            DocTab {
                kind: DocTabKind::Attributes,
                items: attributes,
            },
            DocTab {
                kind: DocTabKind::Slots,
                items: schema
                    .slots
                    .iter()
                    .map(|s| DocItem::named(&s.name, s.description.as_ref()))
                    .collect(),
            },
            DocTab {
                kind: DocTabKind::Events,
                items: schema
                    .events
                    .iter()
                    .map(|e| DocItem::named(&e.name, e.description.as_ref()))
                    .collect(),
            },
            DocTab {
                kind: DocTabKind::CssProperties,
                items: schema
                    .css_properties
                    .iter()
                    .map(|c| DocItem::named(&c.name, c.description.as_ref()))
                    .collect(),
            },
            DocTab {
                kind: DocTabKind::CssParts,
                items: schema
                    .css_parts
                    .iter()
                    .map(|c| DocItem::named(&c.name, c.description.as_ref()))
                    .collect(),
            },
        ];

        Self {
            name: schema.name.clone(),
            description: schema.description.clone(),
            tabs,
        }
    }

    #[inline]
    pub fn tab(&self, kind: DocTabKind) -> Option<&DocTab> {
        self.tabs.iter().find(|t| t.kind == kind)
    }

    pub fn visible_tabs(&self) -> impl Iterator<Item = &DocTab> {
        self.tabs.iter().filter(|t| !t.is_hidden())
    }

    /// `true` when the element documents nothing at all.
    pub fn is_empty(&self) -> bool {
        self.tabs.iter().all(DocTab::is_hidden)
    }

    /// Warning shown instead of the tabs for an undocumented element.
    pub fn warning(&self) -> Option<String> {
        self.is_empty().then(|| {
            format!(
                "The element <{}> does not provide any documented API.",
                self.name
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeDescriptor, PropertyDescriptor, SlotDescriptor};

    #[test]
    fn test_attributes_shadowed_by_properties() {
        let mut schema = ElementSchema::new("x-input")
            .with_property(PropertyDescriptor::new("value", "string").with_attribute("value"));
        schema.attributes = vec![
            AttributeDescriptor {
                name: "value".to_string(),
                ..AttributeDescriptor::default()
            },
            AttributeDescriptor {
                name: "theme".to_string(),
                type_text: Some("string".to_string()),
                description: None,
            },
        ];

        let docs = ApiDocs::from_schema(&schema);
        let attrs = docs.tab(DocTabKind::Attributes).unwrap();
        assert_eq!(attrs.items.len(), 1);
        assert_eq!(attrs.items[0].name, "theme");
        assert_eq!(attrs.items[0].value_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_hidden_tabs() {
        let schema = ElementSchema::new("x-card").with_slot(SlotDescriptor::new(""));
        let docs = ApiDocs::from_schema(&schema);

        let visible: Vec<_> = docs.visible_tabs().map(DocTab::heading).collect();
        assert_eq!(visible, vec!["Slots"]);
        assert!(docs.tab(DocTabKind::Properties).unwrap().is_hidden());
        assert!(docs.warning().is_none());
    }

    #[test]
    fn test_empty_docs_warning() {
        let docs = ApiDocs::from_schema(&ElementSchema::new("x-empty"));
        assert!(docs.is_empty());
        assert_eq!(
            docs.warning().as_deref(),
            Some("The element <x-empty> does not provide any documented API.")
        );
    }
}
