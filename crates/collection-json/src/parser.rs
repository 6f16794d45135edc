//! Document parser.
//!
//! Turns a raw `{"collection": {...}}` document into a [`Document`]. The
//! variant is decided by content: an `error` member, even an empty one,
//! yields [`Document::Error`]; otherwise the links, items, queries and
//! template are parsed into a [`Document::Collection`].

use std::io::Read;

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::document::{CollectionDocument, Document, ErrorDocument};
use crate::error::ParseError;
use crate::error_message::{is_blank, ErrorMessage};
use crate::extension::{Envelope, Extended};
use crate::href::Href;
use crate::item::Item;
use crate::link::Link;
use crate::query::Query;
use crate::template::Template;
use crate::version::Version;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// If true, every parsed link, item, query and template is validated and
    /// the first failure aborts the parse. If false, entities are built
    /// leniently and left for the caller to validate; structural errors
    /// (wrong JSON types, missing `collection` or `href`) still abort.
    pub validate_entities: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            validate_entities: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollectionParser {
    options: ParserOptions,
}

impl CollectionParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    pub fn parse_str(&self, input: &str) -> Result<Document, ParseError> {
        let root: Value = serde_json::from_str(input)?;
        self.parse_value(&root)
    }

    pub fn parse_slice(&self, input: &[u8]) -> Result<Document, ParseError> {
        let root: Value = serde_json::from_slice(input)?;
        self.parse_value(&root)
    }

    /// Parse from a reader. The reader is consumed and dropped before this
    /// returns, whatever the outcome.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Document, ParseError> {
        let root: Value = serde_json::from_reader(reader)?;
        self.parse_value(&root)
    }

    pub fn parse_value(&self, root: &Value) -> Result<Document, ParseError> {
        let collection = match root.get("collection") {
            None | Some(Value::Null) => return Err(ParseError::MissingCollection),
            Some(Value::Object(obj)) => obj,
            Some(_) => return Err(unexpected("collection", "an object")),
        };
        self.parse_collection(collection)
    }

    fn parse_collection(&self, collection: &Map<String, Value>) -> Result<Document, ParseError> {
        let href = parse_href(collection)?;
        let version = parse_version(collection);

        if let Some(error) = parse_error(collection) {
            debug!(%href, %version, empty = error.is_empty(), "parsed error document");
            return Ok(ErrorDocument::new(href, version, error).into());
        }

        let links: Vec<Link> = self.parse_list(collection, "links")?;
        let items: Vec<Item> = self.parse_list(collection, "items")?;
        let queries: Vec<Query> = self.parse_list(collection, "queries")?;
        let template = self.parse_template(collection)?;

        debug!(
            %href,
            %version,
            links = links.len(),
            items = items.len(),
            queries = queries.len(),
            template = template.is_some(),
            "parsed collection document"
        );

        Ok(CollectionDocument::new(href, version)
            .with_links(links)
            .with_items(items)
            .with_queries(queries)
            .with_template(template)
            .into())
    }

    fn parse_list<T: Extended>(
        &self,
        collection: &Map<String, Value>,
        field: &'static str,
    ) -> Result<Vec<T>, ParseError> {
        let values = match collection.get(field) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(values)) => values,
            Some(_) => return Err(unexpected(field, "an array")),
        };

        values
            .iter()
            .enumerate()
            .map(|(index, value)| -> Result<T, ParseError> {
                let path = format!("{field}[{index}]");
                let obj = value
                    .as_object()
                    .ok_or_else(|| unexpected(&path, "an object"))?;
                let entity = T::from_envelope(Envelope::new(obj.clone()));
                self.check(&entity, &path)?;
                trace!(%path, "parsed entry");
                Ok(entity)
            })
            .collect()
    }

    fn parse_template(
        &self,
        collection: &Map<String, Value>,
    ) -> Result<Option<Template>, ParseError> {
        match collection.get("template") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(obj)) => {
                let template = Template::from_json(obj.clone());
                self.check(&template, "template")?;
                Ok(Some(template))
            }
            Some(_) => Err(unexpected("template", "an object")),
        }
    }

    fn check<T: Extended>(&self, entity: &T, path: &str) -> Result<(), ParseError> {
        if !self.options.validate_entities {
            return Ok(());
        }
        entity.validate().map_err(|source| ParseError::Invalid {
            path: path.to_string(),
            source,
        })
    }
}

/// Parse a document with default options.
///
/// ```
/// use collection_json::{parse, Document};
///
/// let doc = parse(r#"{"collection": {"href": "http://example.org/friends/"}}"#).unwrap();
/// assert!(matches!(doc, Document::Collection(_)));
/// ```
pub fn parse(input: &str) -> Result<Document, ParseError> {
    CollectionParser::default().parse_str(input)
}

/// Parse a document from a reader with default options.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document, ParseError> {
    CollectionParser::default().parse_reader(reader)
}

/// The collection `href` may be absolute or relative; only malformed
/// references are rejected.
fn parse_href(collection: &Map<String, Value>) -> Result<Href, ParseError> {
    let raw = collection
        .get("href")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingHref)?;
    Href::parse(raw).map_err(|source| ParseError::InvalidHref {
        value: raw.to_string(),
        source,
    })
}

fn parse_version(collection: &Map<String, Value>) -> Version {
    let tag = collection.get("version").and_then(Value::as_str);
    if let Some(tag) = tag {
        if Version::recognize(tag).is_none() {
            warn!(version = tag, fallback = %Version::default(), "unrecognized version");
        }
    }
    Version::parse(tag)
}

/// `None` when there is no `error` member at all. A present member that is
/// not an object carries no readable fields and yields the empty error.
fn parse_error(collection: &Map<String, Value>) -> Option<ErrorMessage> {
    let error = match collection.get("error")? {
        Value::Object(obj) => obj,
        other => {
            if !other.is_null() {
                warn!(kind = json_kind(other), "non-object error member read as empty");
            }
            return Some(ErrorMessage::EMPTY);
        }
    };

    let text = |key: &str| error.get(key).and_then(Value::as_str).map(String::from);
    let title = text("title");
    let code = text("code");
    let message = text("message");

    if is_blank(title.as_deref()) && is_blank(code.as_deref()) && is_blank(message.as_deref()) {
        return Some(ErrorMessage::EMPTY);
    }
    Some(ErrorMessage::new(title, code, message))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unexpected(field: &str, expected: &'static str) -> ParseError {
    ParseError::UnexpectedType {
        field: field.to_string(),
        expected,
    }
}
