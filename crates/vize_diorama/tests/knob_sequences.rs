//! Randomized edit sequences against a demo session.

use std::collections::HashMap;

use proptest::prelude::*;
use serde_json::{json, Value};
use vize_diorama::knob::ChangeEvent;
use vize_diorama::render::headless::{HeadlessDefinition, HeadlessHost};
use vize_diorama::schema::{ElementSchema, PropertyDescriptor, SlotDescriptor};
use vize_diorama::{DemoOptions, DemoSession, LiveElement};

const TEXT_PROPS: [&str; 3] = ["label", "title", "size"];
const SLOTS: [(&str, &str, &str); 3] = [
    ("", "slot-default", "Default"),
    ("prefix", "slot-prefix", "prefix"),
    ("suffix", "slot-suffix", "suffix"),
];

#[derive(Debug, Clone)]
enum Edit {
    Text(usize, String),
    Toggle(bool),
    Slot(usize, String),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0..TEXT_PROPS.len(), "[a-z ]{0,8}").prop_map(|(i, v)| Edit::Text(i, v)),
        any::<bool>().prop_map(Edit::Toggle),
        (0..SLOTS.len(), "[a-z ]{0,8}").prop_map(|(i, v)| Edit::Slot(i, v)),
    ]
}

fn session() -> DemoSession<HeadlessHost> {
    let mut host = HeadlessHost::new();
    host.define("x-chip", HeadlessDefinition::new());

    let mut session = DemoSession::new(host, DemoOptions::default());
    session.set_tag(
        ElementSchema::new("x-chip")
            .with_property(PropertyDescriptor::new("label", "string"))
            .with_property(PropertyDescriptor::new("title", "string | undefined"))
            .with_property(PropertyDescriptor::new("size", "number"))
            .with_property(PropertyDescriptor::new("disabled", "boolean"))
            .with_slot(SlotDescriptor::new(""))
            .with_slot(SlotDescriptor::new("prefix"))
            .with_slot(SlotDescriptor::new("suffix")),
    );
    session
}

proptest! {
    #[test]
    fn edits_keep_last_value_per_key(
        edits in prop::collection::vec((edit(), any::<bool>()), 1..24)
    ) {
        let mut session = session();
        let mut props: HashMap<&str, Value> = HashMap::new();
        let mut slots: Vec<String> = SLOTS.iter().map(|(_, _, c)| c.to_string()).collect();

        for (edit, flush_now) in edits {
            let event = match edit {
                Edit::Text(i, value) => {
                    props.insert(TEXT_PROPS[i], json!(value));
                    ChangeEvent::text(format!("prop-{}", TEXT_PROPS[i]), value)
                }
                Edit::Toggle(checked) => {
                    props.insert("disabled", json!(checked));
                    ChangeEvent::checkbox("prop-disabled", checked)
                }
                Edit::Slot(i, content) => {
                    slots[i] = content.clone();
                    ChangeEvent::text(SLOTS[i].1, content)
                }
            };

            // Either apply right away or coalesce with the following edits.
            if flush_now {
                prop_assert!(session.handle_input(&event));
            } else {
                prop_assert!(session.panel().handle_change(&event));
            }
        }
        session.flush();

        prop_assert_eq!(session.knobs().len(), props.len());
        let element = session.element().unwrap();
        for name in TEXT_PROPS.iter().copied().chain(["disabled"]) {
            prop_assert_eq!(session.knobs().value(name), props.get(name));
            prop_assert_eq!(element.get_property(name), props.get(name).cloned());
        }

        let names: Vec<_> = session.slots().iter().map(|s| s.name.as_str()).collect();
        prop_assert_eq!(names, vec!["", "prefix", "suffix"]);
        for (i, (name, _, _)) in SLOTS.iter().enumerate() {
            prop_assert_eq!(&session.slots()[i].content, &slots[i]);
            prop_assert_eq!(element.slot_content(name), Some(slots[i].as_str()));
        }
    }
}
