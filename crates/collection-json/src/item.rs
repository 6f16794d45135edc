//! Collection item entity.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::error::ValidationError;
use crate::extension::{Envelope, Extended};
use crate::href::Href;
use crate::link::Link;
use crate::property::Property;

const ENTITY: &str = "item";

/// An item: a required `href`, plus ordered `data` and `links` lists.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    envelope: Envelope,
}

impl Item {
    pub fn create(href: impl Into<Href>) -> Item {
        let mut tree = Map::new();
        tree.insert("href".into(), Value::String(String::from(href.into())));
        Item::from_json(tree)
    }

    pub fn from_json(tree: Map<String, Value>) -> Item {
        Item {
            envelope: Envelope::new(tree),
        }
    }

    /// Absolute or relative reference; `None` when absent or malformed.
    pub fn href(&self) -> Option<Href> {
        self.envelope.get_href("href")
    }

    pub fn with_href(&self, href: impl Into<Href>) -> Item {
        Item {
            envelope: self.envelope.with("href", String::from(href.into())),
        }
    }

    pub fn data(&self) -> Vec<Property> {
        self.envelope.list("data")
    }

    pub fn with_data(&self, data: &[Property]) -> Item {
        Item {
            envelope: self.envelope.with_list("data", data),
        }
    }

    /// First property called `name`.
    pub fn property(&self, name: &str) -> Option<Property> {
        self.data().into_iter().find(|p| p.name() == Some(name))
    }

    pub fn links(&self) -> Vec<Link> {
        self.envelope.list("links")
    }

    pub fn with_links(&self, links: &[Link]) -> Item {
        Item {
            envelope: self.envelope.with_list("links", links),
        }
    }
}

impl Extended for Item {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn from_envelope(envelope: Envelope) -> Self {
        Item { envelope }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.envelope.require_href(ENTITY, "href")?;
        self.envelope.validate_list::<Property>(ENTITY, "data")?;
        self.envelope.validate_list::<Link>(ENTITY, "links")?;
        Ok(())
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("href", &self.href().as_ref().map(Href::as_str))
            .field("data", &self.data())
            .field("links", &self.links())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn url(s: &str) -> Href {
        Href::parse(s).unwrap()
    }

    #[test]
    fn data_and_links_round_trip_through_tree() {
        let item = Item::create(url("http://x/items/1"))
            .with_data(&[
                Property::create("full-name").with_value("J. Doe"),
                Property::create("email").with_value("jdoe@example.org"),
            ])
            .with_links(&[Link::create(url("http://x/blogs/1"), "blog")]);

        assert_eq!(
            Value::Object(item.as_json()),
            json!({
                "href": "http://x/items/1",
                "data": [
                    {"name": "full-name", "value": "J. Doe"},
                    {"name": "email", "value": "jdoe@example.org"}
                ],
                "links": [{"href": "http://x/blogs/1", "rel": "blog"}]
            })
        );
        assert_eq!(Item::from_json(item.as_json()), item);
        assert_eq!(
            item.property("email").and_then(|p| p.value_str().map(String::from)),
            Some("jdoe@example.org".to_string())
        );
        assert!(item.validate().is_ok());
    }

    #[test]
    fn validate_descends_into_links() {
        let tree = json!({"href": "http://x/1", "links": [{"href": "http://x/2"}]});
        let item = Item::from_json(tree.as_object().cloned().unwrap());
        assert_eq!(
            item.validate(),
            Err(ValidationError::MissingField {
                entity: "link",
                field: "rel"
            })
        );
    }

    #[test]
    fn relative_href_is_accepted() {
        let item = Item::create(url("http://x/1")).with_href(url("/friends/jdoe"));
        assert_eq!(item.href().map(String::from).as_deref(), Some("/friends/jdoe"));
        assert!(item.validate().is_ok());
    }

    #[test]
    fn href_is_required() {
        let item = Item::from_json(Map::new());
        assert_eq!(item.validate().unwrap_err().field(), "href");
        assert!(item.data().is_empty());
        assert!(item.links().is_empty());
    }
}
