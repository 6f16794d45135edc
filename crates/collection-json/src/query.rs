//! Query entity: a parameterised read link advertised by a collection.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::error::ValidationError;
use crate::extension::{Envelope, Extended};
use crate::href::Href;
use crate::property::Property;

const ENTITY: &str = "query";

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    envelope: Envelope,
}

impl Query {
    pub fn create(href: impl Into<Href>, rel: impl Into<String>) -> Query {
        let mut tree = Map::new();
        tree.insert("href".into(), Value::String(String::from(href.into())));
        tree.insert("rel".into(), Value::String(rel.into()));
        Query::from_json(tree)
    }

    pub fn from_json(tree: Map<String, Value>) -> Query {
        Query {
            envelope: Envelope::new(tree),
        }
    }

    /// Absolute or relative reference; `None` when absent or malformed.
    pub fn href(&self) -> Option<Href> {
        self.envelope.get_href("href")
    }

    pub fn with_href(&self, href: impl Into<Href>) -> Query {
        self.rewrap(self.envelope.with("href", String::from(href.into())))
    }

    pub fn rel(&self) -> Option<&str> {
        self.envelope.get_str("rel")
    }

    pub fn with_rel(&self, rel: impl Into<String>) -> Query {
        self.rewrap(self.envelope.with("rel", rel.into()))
    }

    pub fn parsed_rel(&self) -> Vec<&str> {
        self.rel()
            .map(|rel| rel.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn name(&self) -> Option<&str> {
        self.envelope.get_str("name")
    }

    pub fn with_name(&self, name: impl Into<String>) -> Query {
        self.rewrap(self.envelope.with("name", name.into()))
    }

    pub fn prompt(&self) -> Option<&str> {
        self.envelope.get_str("prompt")
    }

    pub fn with_prompt(&self, prompt: impl Into<String>) -> Query {
        self.rewrap(self.envelope.with("prompt", prompt.into()))
    }

    pub fn data(&self) -> Vec<Property> {
        self.envelope.list("data")
    }

    pub fn with_data(&self, data: &[Property]) -> Query {
        self.rewrap(self.envelope.with_list("data", data))
    }

    fn rewrap(&self, envelope: Envelope) -> Query {
        Query { envelope }
    }
}

impl Extended for Query {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn from_envelope(envelope: Envelope) -> Self {
        Query { envelope }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.envelope.require_href(ENTITY, "href")?;
        self.envelope.require_str(ENTITY, "rel")?;
        self.envelope.validate_list::<Property>(ENTITY, "data")?;
        Ok(())
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("href", &self.href().as_ref().map(Href::as_str))
            .field("rel", &self.rel())
            .field("name", &self.name())
            .field("prompt", &self.prompt())
            .field("data", &self.data())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_keeps_data_order() {
        let query = Query::create(Href::parse("http://x/search").unwrap(), "search")
            .with_prompt("Search")
            .with_data(&[Property::create("q"), Property::create("limit").with_value(10)]);

        let names: Vec<String> = query
            .data()
            .iter()
            .filter_map(|p| p.name().map(String::from))
            .collect();
        assert_eq!(names, vec!["q", "limit"]);
        assert_eq!(query.parsed_rel(), vec!["search"]);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn rel_is_required() {
        let query = Query::create(Href::parse("http://x/search").unwrap(), "search");
        let stripped = Query::from_json(
            query
                .as_json()
                .into_iter()
                .filter(|(k, _)| k.as_str() != "rel")
                .collect(),
        );
        assert_eq!(stripped.validate().unwrap_err().field(), "rel");
        assert!(query.validate().is_ok());
    }
}
