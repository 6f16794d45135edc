//! Hypermedia link entity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::error::ValidationError;
use crate::extension::{Envelope, Extended};
use crate::href::Href;

const ENTITY: &str = "link";

// ── Render ────────────────────────────────────────────────────────────────

/// Presentation hint for a link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Render {
    #[default]
    Link,
    Image,
}

impl Render {
    pub fn as_str(&self) -> &'static str {
        match self {
            Render::Link => "link",
            Render::Image => "image",
        }
    }
}

impl FromStr for Render {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("link") {
            Ok(Render::Link)
        } else if s.eq_ignore_ascii_case("image") {
            Ok(Render::Image)
        } else {
            Err(ValidationError::InvalidType {
                entity: ENTITY,
                field: "render",
                expected: "\"link\" or \"image\"",
            })
        }
    }
}

impl fmt::Display for Render {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Link ──────────────────────────────────────────────────────────────────

/// A link: `href` and `rel` are required, `prompt`, `name` and `render` are
/// optional. All values live in the backing tree.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Link {
    envelope: Envelope,
}

impl Link {
    pub fn create(href: impl Into<Href>, rel: impl Into<String>) -> Link {
        let mut tree = Map::new();
        tree.insert("href".into(), Value::String(String::from(href.into())));
        tree.insert("rel".into(), Value::String(rel.into()));
        Link::from_json(tree)
    }

    /// Fail-fast factory for links assembled from optional parts.
    ///
    /// ```
    /// use collection_json::{Href, Link, Render};
    ///
    /// let link = Link::builder()
    ///     .href(Href::parse("/logo.png").unwrap())
    ///     .rel("logo")
    ///     .render(Render::Image)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(link.render(), Render::Image);
    ///
    /// assert!(Link::builder().rel("item").build().is_err());
    /// ```
    pub fn builder() -> LinkBuilder {
        LinkBuilder::default()
    }

    /// Wrap an existing tree without checks. Call [`Extended::validate`] before
    /// trusting the result.
    pub fn from_json(tree: Map<String, Value>) -> Link {
        Link {
            envelope: Envelope::new(tree),
        }
    }

    /// Absolute or relative reference; `None` when the field is absent or not
    /// a URI reference.
    pub fn href(&self) -> Option<Href> {
        self.envelope.get_href("href")
    }

    pub fn with_href(&self, href: impl Into<Href>) -> Link {
        self.rewrap(self.envelope.with("href", String::from(href.into())))
    }

    pub fn rel(&self) -> Option<&str> {
        self.envelope.get_str("rel")
    }

    pub fn with_rel(&self, rel: impl Into<String>) -> Link {
        self.rewrap(self.envelope.with("rel", rel.into()))
    }

    /// Whitespace-separated relation tokens, in order, duplicates kept.
    pub fn parsed_rel(&self) -> Vec<&str> {
        self.rel()
            .map(|rel| rel.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn prompt(&self) -> Option<&str> {
        self.envelope.get_str("prompt")
    }

    pub fn with_prompt(&self, prompt: impl Into<String>) -> Link {
        self.rewrap(self.envelope.with("prompt", prompt.into()))
    }

    pub fn without_prompt(&self) -> Link {
        self.rewrap(self.envelope.without("prompt"))
    }

    pub fn name(&self) -> Option<&str> {
        self.envelope.get_str("name")
    }

    pub fn with_name(&self, name: impl Into<String>) -> Link {
        self.rewrap(self.envelope.with("name", name.into()))
    }

    pub fn without_name(&self) -> Link {
        self.rewrap(self.envelope.without("name"))
    }

    /// Unknown or absent render hints read as [`Render::Link`].
    pub fn render(&self) -> Render {
        self.envelope
            .get_str("render")
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn with_render(&self, render: Render) -> Link {
        self.rewrap(self.envelope.with("render", render.as_str()))
    }

    fn rewrap(&self, envelope: Envelope) -> Link {
        Link { envelope }
    }
}

impl Extended for Link {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn from_envelope(envelope: Envelope) -> Self {
        Link { envelope }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.envelope.require_href(ENTITY, "href")?;
        self.envelope.require_str(ENTITY, "rel")?;
        Ok(())
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("href", &self.href().as_ref().map(Href::as_str))
            .field("rel", &self.rel())
            .field("prompt", &self.prompt())
            .field("name", &self.name())
            .field("render", &self.render())
            .finish()
    }
}

// ── LinkBuilder ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    href: Option<Href>,
    rel: Option<String>,
    prompt: Option<String>,
    name: Option<String>,
    render: Option<Render>,
}

impl LinkBuilder {
    pub fn href(mut self, href: impl Into<Href>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn render(mut self, render: Render) -> Self {
        self.render = Some(render);
        self
    }

    /// Fails with [`ValidationError::MissingField`] when `href` or `rel` was
    /// never set. Unset optional fields are left out of the tree.
    pub fn build(self) -> Result<Link, ValidationError> {
        let href = self.href.ok_or(ValidationError::MissingField {
            entity: ENTITY,
            field: "href",
        })?;
        let rel = self.rel.ok_or(ValidationError::MissingField {
            entity: ENTITY,
            field: "rel",
        })?;

        let mut tree = Map::new();
        tree.insert("href".into(), Value::String(href.into()));
        tree.insert("rel".into(), Value::String(rel));
        if let Some(prompt) = self.prompt {
            tree.insert("prompt".into(), Value::String(prompt));
        }
        if let Some(name) = self.name {
            tree.insert("name".into(), Value::String(name));
        }
        if let Some(render) = self.render {
            tree.insert("render".into(), Value::String(render.as_str().into()));
        }
        Ok(Link::from_json(tree))
    }
}
