//! Collection+JSON (`application/vnd.collection+json`) documents.
//!
//! Entities ([`Link`], [`Item`], [`Query`], [`Template`], [`Property`]) are
//! immutable views over a shared JSON object. Setters copy the object and
//! return a new entity; fields outside the typed API are reached through
//! [`Extension`]s.
//!
//! # Example
//!
//! ```
//! use collection_json::{parse, Extended, Render};
//!
//! let doc = parse(r#"{"collection": {
//!     "href": "http://example.org/friends/",
//!     "version": "1.0",
//!     "links": [{"href": "http://example.org/friends/rss", "rel": "feed"}]
//! }}"#).unwrap();
//!
//! let collection = doc.as_collection().unwrap();
//! let feed = &collection.links()[0];
//! assert_eq!(feed.rel(), Some("feed"));
//! assert_eq!(feed.render(), Render::Link);
//!
//! let titled = feed.with_prompt("RSS");
//! assert_eq!(feed.prompt(), None);
//! assert_eq!(titled.prompt(), Some("RSS"));
//! assert!(titled.validate().is_ok());
//! ```

pub mod document;
pub mod error;
pub mod error_message;
pub mod extension;
pub mod href;
pub mod item;
pub mod link;
pub mod parser;
pub mod property;
pub mod query;
pub mod template;
pub mod version;

pub use document::{CollectionDocument, Document, ErrorDocument};
pub use error::{HrefError, ParseError, ValidationError};
pub use error_message::ErrorMessage;
pub use extension::{Envelope, Extended, Extension, Field};
pub use href::Href;
pub use item::Item;
pub use link::{Link, LinkBuilder, Render};
pub use parser::{parse, parse_reader, CollectionParser, ParserOptions};
pub use property::Property;
pub use query::Query;
pub use template::Template;
pub use url::Url;
pub use version::Version;
