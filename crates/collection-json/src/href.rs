//! URI references held by `href` fields.
//!
//! Collection+JSON documents routinely carry relative references
//! (`"/friends/rss"`), so an [`Href`] is any RFC 3986 URI reference: an
//! absolute URI, or a relative reference that resolves against some base.
//! The text is kept verbatim; [`Href::resolve`] turns it into a [`Url`].

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::HrefError;

// Base used only to check that a relative reference is well formed.
const CHECK_BASE: &str = "http://href.invalid/";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Href(String);

impl Href {
    /// Accepts absolute URIs and relative references, verbatim.
    ///
    /// ```
    /// use collection_json::Href;
    ///
    /// assert!(Href::parse("http://example.org/friends/").unwrap().is_absolute());
    /// assert!(!Href::parse("/friends/rss").unwrap().is_absolute());
    /// assert!(Href::parse("not a uri").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Href, HrefError> {
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(HrefError::IllegalCharacter);
        }
        match Url::parse(raw) {
            Ok(_) => {}
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(CHECK_BASE).and_then(|base| base.join(raw))?;
            }
            Err(err) => return Err(err.into()),
        }
        Ok(Href(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_absolute(&self) -> bool {
        Url::parse(&self.0).is_ok()
    }

    /// `Some` only for absolute references.
    pub fn to_url(&self) -> Option<Url> {
        Url::parse(&self.0).ok()
    }

    /// Resolve against `base`; absolute references ignore it.
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(&self.0)
    }
}

impl From<Url> for Href {
    fn from(url: Url) -> Self {
        Href(url.into())
    }
}

impl From<Href> for String {
    fn from(href: Href) -> Self {
        href.0
    }
}

impl FromStr for Href {
    type Err = HrefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Href::parse(s)
    }
}

impl AsRef<str> for Href {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
