//! # vize_diorama
//!
//! Diorama - live "try it" demos for custom elements.
//!
//! ## Name Origin
//!
//! A **diorama** is a staged scene you can walk around. `vize_diorama` stages
//! a single custom element next to the knobs that drive it: change a knob and
//! the element re-renders, let the element change itself and the knobs follow.
//!
//! ## Concepts
//!
//! - **Schema**: the element's documented API, supplied by an analyzer
//! - **Knob**: an editable input bound to a property, slot or CSS property
//! - **Live element**: the rendered target behind [`render::LiveElement`]
//! - **Session**: [`DemoSession`], the only writer of knob state
//!
//! ## Data flow
//!
//! ```text
//! KnobPanel --PanelNotification--> DemoSession --RenderFrame--> TargetRenderer
//!     ^                               |   ^                          |
//!     +------- update (silent) -------+   +--RendererNotification----+
//! ```
//!
//! Panel updates pushed by the session never produce notifications, so a
//! value reported by the element cannot loop back into the element.
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use vize_diorama::knob::ChangeEvent;
//! use vize_diorama::render::headless::{HeadlessDefinition, HeadlessHost};
//! use vize_diorama::{DemoOptions, DemoSession, ElementManifest};
//!
//! let manifest = ElementManifest::from_json(r#"{
//!   "tags": [{
//!     "name": "x-toggle",
//!     "properties": [{ "name": "checked", "type": "boolean" }],
//!     "events": [{ "name": "checked-changed" }]
//!   }]
//! }"#).unwrap();
//!
//! let mut host = HeadlessHost::new();
//! host.define("x-toggle", HeadlessDefinition::new().with_default("checked", json!(false)));
//!
//! let mut session = DemoSession::new(host, DemoOptions::default());
//! session.set_tag(manifest.element("x-toggle").unwrap().clone());
//!
//! // The user ticks the checkbox.
//! session.handle_input(&ChangeEvent::checkbox("prop-checked", true));
//! assert_eq!(session.knobs().value("checked"), Some(&json!(true)));
//!
//! // The element flips itself back.
//! session.element_mut().unwrap().set_internal("checked", json!(false));
//! session.flush();
//! assert_eq!(session.knobs().value("checked"), Some(&json!(false)));
//! ```

pub mod demo;
pub mod docs;
pub mod knob;
pub mod notify;
pub mod render;
pub mod schema;

pub use demo::{DemoOptions, DemoSession, DemoSnapshot, DemoStats};
pub use docs::{generate_api_markdown, ApiDocs};
pub use knob::{KnobEntry, KnobState, SlotValue};
pub use render::{ElementFactory, LiveElement, RenderError};
pub use schema::{ElementManifest, ElementSchema, PrimitiveKind, SchemaError};
