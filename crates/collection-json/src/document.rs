//! Parsed documents: either a collection or an error payload, never both.

use crate::error_message::ErrorMessage;
use crate::href::Href;
use crate::item::Item;
use crate::link::Link;
use crate::query::Query;
use crate::template::Template;
use crate::version::Version;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Collection(CollectionDocument),
    Error(ErrorDocument),
}

impl Document {
    pub fn href(&self) -> &Href {
        match self {
            Document::Collection(doc) => doc.href(),
            Document::Error(doc) => doc.href(),
        }
    }

    pub fn version(&self) -> Version {
        match self {
            Document::Collection(doc) => doc.version(),
            Document::Error(doc) => doc.version(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Document::Error(_))
    }

    pub fn as_collection(&self) -> Option<&CollectionDocument> {
        match self {
            Document::Collection(doc) => Some(doc),
            Document::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorDocument> {
        match self {
            Document::Error(doc) => Some(doc),
            Document::Collection(_) => None,
        }
    }

    pub fn into_collection(self) -> Option<CollectionDocument> {
        match self {
            Document::Collection(doc) => Some(doc),
            Document::Error(_) => None,
        }
    }

    pub fn into_error(self) -> Option<ErrorDocument> {
        match self {
            Document::Error(doc) => Some(doc),
            Document::Collection(_) => None,
        }
    }
}

impl From<CollectionDocument> for Document {
    fn from(doc: CollectionDocument) -> Self {
        Document::Collection(doc)
    }
}

impl From<ErrorDocument> for Document {
    fn from(doc: ErrorDocument) -> Self {
        Document::Error(doc)
    }
}

// ── Collection ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDocument {
    href: Href,
    version: Version,
    links: Vec<Link>,
    items: Vec<Item>,
    queries: Vec<Query>,
    template: Option<Template>,
}

impl CollectionDocument {
    pub fn new(href: impl Into<Href>, version: Version) -> Self {
        Self {
            href: href.into(),
            version,
            links: Vec::new(),
            items: Vec::new(),
            queries: Vec::new(),
            template: None,
        }
    }

    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = links;
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn with_queries(mut self, queries: Vec<Query>) -> Self {
        self.queries = queries;
        self
    }

    pub fn with_template(mut self, template: Option<Template>) -> Self {
        self.template = template;
        self
    }

    pub fn href(&self) -> &Href {
        &self.href
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Links whose `rel` contains `rel` as one of its tokens.
    pub fn links_by_rel<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links
            .iter()
            .filter(move |link| link.parsed_rel().contains(&rel))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }
}

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDocument {
    href: Href,
    version: Version,
    error: ErrorMessage,
}

impl ErrorDocument {
    pub fn new(href: impl Into<Href>, version: Version, error: ErrorMessage) -> Self {
        Self {
            href: href.into(),
            version,
            error,
        }
    }

    pub fn href(&self) -> &Href {
        &self.href
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn error(&self) -> &ErrorMessage {
        &self.error
    }
}
