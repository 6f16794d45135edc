//! Error types.
//!
//! [`ValidationError`] is raised by entity factories and `validate()`;
//! [`ParseError`] is raised by the document parser and wraps validation
//! failures of nested entities together with their location.

use thiserror::Error;

/// A required field is missing or holds a value of the wrong shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{entity}: missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{entity}: field `{field}` is not a valid URI: {value:?}")]
    InvalidUri {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("{entity}: field `{field}` must be {expected}")]
    InvalidType {
        entity: &'static str,
        field: &'static str,
        expected: &'static str,
    },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field, .. }
            | ValidationError::InvalidUri { field, .. }
            | ValidationError::InvalidType { field, .. } => field,
        }
    }

    /// Name of the entity the field belongs to (`"link"`, `"item"`, ...).
    pub fn entity(&self) -> &'static str {
        match self {
            ValidationError::MissingField { entity, .. }
            | ValidationError::InvalidUri { entity, .. }
            | ValidationError::InvalidType { entity, .. } => entity,
        }
    }
}

/// A string that is not a URI reference.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HrefError {
    #[error("contains whitespace or control characters")]
    IllegalCharacter,
    #[error(transparent)]
    Malformed(#[from] url::ParseError),
}

/// Failure to turn raw input into a [`Document`](crate::Document).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing `collection` object")]
    MissingCollection,
    #[error("missing href")]
    MissingHref,
    #[error("invalid collection href {value:?}: {source}")]
    InvalidHref {
        value: String,
        #[source]
        source: HrefError,
    },
    #[error("`{field}` must be {expected}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
    },
    #[error("invalid entry at `{path}`: {source}")]
    Invalid {
        path: String,
        #[source]
        source: ValidationError,
    },
}
