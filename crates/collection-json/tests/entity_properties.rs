use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use collection_json::{Extended, Extension, Field, Href, Item, Link, Property, Render, Url};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn arb_url() -> impl Strategy<Value = Url> {
    ("[a-z]{1,8}", "[a-z0-9]{0,8}").prop_map(|(host, path)| {
        Url::parse(&format!("http://{host}.example/{path}")).expect("generated url parses")
    })
}

fn arb_token() -> impl Strategy<Value = String> {
    "[a-z][a-z-]{0,7}"
}

fn arb_render() -> impl Strategy<Value = Option<Render>> {
    prop_oneof![Just(None), Just(Some(Render::Link)), Just(Some(Render::Image))]
}

prop_compose! {
    fn arb_link()(
        href in arb_url(),
        rel in prop::collection::vec(arb_token(), 1..4),
        prompt in prop::option::of("[ -~]{0,12}"),
        name in prop::option::of(arb_token()),
        render in arb_render(),
    ) -> Link {
        let mut builder = Link::builder().href(href).rel(rel.join(" "));
        if let Some(prompt) = prompt {
            builder = builder.prompt(prompt);
        }
        if let Some(name) = name {
            builder = builder.name(name);
        }
        if let Some(render) = render {
            builder = builder.render(render);
        }
        builder.build().expect("href and rel are set")
    }
}

/// Extension that never contributes fields.
struct Inert;

impl Extension for Inert {
    type Target = ();

    fn extract(&self, _tree: &Map<String, Value>) {}

    fn apply(&self, _value: &()) -> Map<String, Value> {
        Map::new()
    }
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #[test]
    fn link_round_trips_through_json(link in arb_link()) {
        let back = Link::from_json(link.as_json());
        prop_assert!(back.validate().is_ok());
        prop_assert_eq!(&back, &link);
        prop_assert_eq!(hash_of(&back), hash_of(&link));
    }

    #[test]
    fn setters_leave_original_untouched(link in arb_link(), rel in arb_token(), prompt in "[a-z]{1,8}") {
        let before_rel = link.rel().map(String::from);
        let before_prompt = link.prompt().map(String::from);

        let updated = link.with_rel(rel.clone()).with_prompt(prompt.clone());

        prop_assert_eq!(link.rel().map(String::from), before_rel.clone());
        prop_assert_eq!(link.prompt().map(String::from), before_prompt.clone());
        prop_assert_eq!(updated.rel(), Some(rel.as_str()));
        prop_assert_eq!(updated.prompt(), Some(prompt.as_str()));
        if before_rel.as_deref() != Some(rel.as_str()) || before_prompt.as_deref() != Some(prompt.as_str()) {
            prop_assert_ne!(&updated, &link);
        }
    }

    #[test]
    fn every_setter_copies_on_write(link in arb_link(), href in arb_url(), name in arb_token()) {
        let snapshot = link.as_json();
        let href = Href::from(href);
        let render = match link.render() {
            Render::Link => Render::Image,
            Render::Image => Render::Link,
        };

        let moved = link.with_href(href.clone());
        let named = link.with_name(name.clone());
        let rendered = link.with_render(render);
        let unnamed = link.without_name();
        let unprompted = link.without_prompt();

        prop_assert_eq!(link.as_json(), snapshot);
        prop_assert!(!moved.same_instance(&link));
        prop_assert!(!named.same_instance(&link));
        prop_assert!(!rendered.same_instance(&link));

        prop_assert_eq!(moved.href(), Some(href.clone()));
        prop_assert_eq!(named.name(), Some(name.as_str()));
        prop_assert_eq!(rendered.render(), render);
        prop_assert_eq!(unnamed.name(), None);
        prop_assert_eq!(unprompted.prompt(), None);

        prop_assert_ne!(&rendered, &link);
        if link.href().as_ref() != Some(&href) {
            prop_assert_ne!(&moved, &link);
        }
        if link.name() != Some(name.as_str()) {
            prop_assert_ne!(&named, &link);
        }
        if link.name().is_none() {
            prop_assert!(unnamed.same_instance(&link));
        }
        if link.prompt().is_none() {
            prop_assert!(unprompted.same_instance(&link));
        }
    }

    #[test]
    fn empty_extension_returns_same_instance(link in arb_link()) {
        let same = link.apply(&(), &Inert);
        prop_assert!(same.same_instance(&link));

        let untouched = link.apply(&None, &Field::<u64>::new("x-count"));
        prop_assert!(untouched.same_instance(&link));
    }

    #[test]
    fn field_extension_round_trips(link in arb_link(), count in any::<u64>()) {
        let ext = Field::<u64>::new("x-count");
        let extended = link.apply(&Some(count), &ext);
        prop_assert!(!extended.same_instance(&link));
        prop_assert_eq!(extended.extension(&ext), Some(count));
        prop_assert_eq!(link.extension(&ext), None);
        prop_assert_eq!(extended.rel(), link.rel());
    }

    #[test]
    fn rel_tokens_split_on_whitespace(tokens in prop::collection::vec(arb_token(), 1..6), sep in "[ \t\n]{1,3}") {
        let link = Link::create(Url::parse("http://x/").unwrap(), tokens.join(sep.as_str()));
        let parsed: Vec<String> = link.parsed_rel().into_iter().map(String::from).collect();
        prop_assert_eq!(parsed, tokens);
    }

    #[test]
    fn item_round_trips_through_json(href in arb_url(), links in prop::collection::vec(arb_link(), 0..4), names in prop::collection::vec(arb_token(), 0..4)) {
        let data: Vec<Property> = names.iter().map(|n| Property::create(n.as_str()).with_value(n.len())).collect();
        let item = Item::create(href).with_data(&data).with_links(&links);
        let back = Item::from_json(item.as_json());
        prop_assert!(back.validate().is_ok());
        prop_assert_eq!(back.links(), links);
        prop_assert_eq!(back.data(), data);
        prop_assert_eq!(back, item);
    }
}

#[test]
fn create_then_as_json_matches_wire_shape() {
    let link = Link::create(Url::parse("http://x/1").unwrap(), "item").with_render(Render::Image);
    assert_eq!(
        Value::Object(link.as_json()),
        serde_json::json!({"href": "http://x/1", "rel": "item", "render": "image"})
    );
}
