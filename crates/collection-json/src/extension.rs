//! Immutable backing tree shared by every entity, and the extension mechanism.
//!
//! Every entity (`Link`, `Item`, `Query`, ...) wraps an [`Envelope`] and
//! exposes typed accessors computed on demand from it. The envelope is never
//! mutated: setters copy the tree, change one field and wrap the result in a
//! new envelope, so clones handed out earlier keep observing the old state.
//!
//! Fields not covered by an entity's typed API travel through
//! [`Extension`]s, bidirectional codecs between a typed value and a set of
//! tree fields.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ValidationError;
use crate::href::Href;

// ── Envelope ──────────────────────────────────────────────────────────────

/// Immutable, cheaply clonable JSON object.
///
/// Clones share the same tree; [`Envelope::same_tree`] tells whether two
/// envelopes are the same instance rather than merely equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    tree: Arc<Map<String, Value>>,
}

impl Envelope {
    pub fn new(tree: Map<String, Value>) -> Self {
        Self {
            tree: Arc::new(tree),
        }
    }

    /// Borrow the backing tree.
    pub fn tree(&self) -> &Map<String, Value> {
        &self.tree
    }

    /// Defensive copy of the backing tree.
    pub fn to_json(&self) -> Map<String, Value> {
        (*self.tree).clone()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.tree.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tree.contains_key(key)
    }

    /// String value of `key`; `None` when absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.tree.get(key).and_then(Value::as_str)
    }

    /// True if both envelopes share one backing tree.
    pub fn same_tree(&self, other: &Envelope) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree)
    }

    /// Copy of this envelope with `key` set to `value`.
    pub fn with(&self, key: &str, value: impl Into<Value>) -> Self {
        let mut tree = self.to_json();
        tree.insert(key.to_string(), value.into());
        Self::new(tree)
    }

    /// Copy of this envelope without `key`. Returns `self` when `key` is absent.
    pub fn without(&self, key: &str) -> Self {
        if !self.contains(key) {
            return self.clone();
        }
        let tree = self
            .tree
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self::new(tree)
    }

    /// Copy of this envelope with `fields` merged in. Returns `self` when
    /// `fields` is empty.
    pub fn merge(&self, fields: Map<String, Value>) -> Self {
        if fields.is_empty() {
            return self.clone();
        }
        let mut tree = self.to_json();
        tree.extend(fields);
        Self::new(tree)
    }

    // ── Typed helpers shared by the entities ─────────────────────────────

    /// URI reference stored under `key`, absolute or relative; `None` when
    /// absent, not a string, or not a URI reference.
    pub(crate) fn get_href(&self, key: &str) -> Option<Href> {
        self.get_str(key).and_then(|s| Href::parse(s).ok())
    }

    pub(crate) fn require_str(
        &self,
        entity: &'static str,
        field: &'static str,
    ) -> Result<&str, ValidationError> {
        match self.tree.get(field) {
            None | Some(Value::Null) => Err(ValidationError::MissingField { entity, field }),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(ValidationError::InvalidType {
                entity,
                field,
                expected: "a string",
            }),
        }
    }

    pub(crate) fn require_href(
        &self,
        entity: &'static str,
        field: &'static str,
    ) -> Result<Href, ValidationError> {
        let raw = self.require_str(entity, field)?;
        Href::parse(raw).map_err(|_| ValidationError::InvalidUri {
            entity,
            field,
            value: raw.to_string(),
        })
    }

    pub(crate) fn optional_str(
        &self,
        entity: &'static str,
        field: &'static str,
    ) -> Result<(), ValidationError> {
        match self.tree.get(field) {
            None | Some(Value::String(_)) => Ok(()),
            Some(_) => Err(ValidationError::InvalidType {
                entity,
                field,
                expected: "a string",
            }),
        }
    }

    /// Entities stored as an array of objects under `key`. Elements that are
    /// not objects are skipped; `validate_list` reports them.
    pub(crate) fn list<T: Extended>(&self, key: &str) -> Vec<T> {
        match self.tree.get(key) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(Value::as_object)
                .map(|obj| T::from_envelope(Envelope::new(obj.clone())))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn with_list<T: Extended>(&self, key: &str, entries: &[T]) -> Self {
        let values = entries
            .iter()
            .map(|entry| Value::Object(entry.as_json()))
            .collect::<Vec<_>>();
        self.with(key, Value::Array(values))
    }

    pub(crate) fn validate_list<T: Extended>(
        &self,
        entity: &'static str,
        field: &'static str,
    ) -> Result<(), ValidationError> {
        let values = match self.tree.get(field) {
            None => return Ok(()),
            Some(Value::Array(values)) => values,
            Some(_) => {
                return Err(ValidationError::InvalidType {
                    entity,
                    field,
                    expected: "an array",
                })
            }
        };
        for value in values {
            let obj = value.as_object().ok_or(ValidationError::InvalidType {
                entity,
                field,
                expected: "an array of objects",
            })?;
            T::from_envelope(Envelope::new(obj.clone())).validate()?;
        }
        Ok(())
    }
}

impl From<Map<String, Value>> for Envelope {
    fn from(tree: Map<String, Value>) -> Self {
        Self::new(tree)
    }
}

// Key order does not take part in equality, so it must not take part in the
// hash either.
impl Hash for Envelope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_object(&self.tree, state);
    }
}

fn hash_object<H: Hasher>(obj: &Map<String, Value>, state: &mut H) {
    let mut entries: Vec<(&String, &Value)> = obj.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.len().hash(state);
    for (key, value) in entries {
        key.hash(state);
        hash_value(value, state);
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        // Mirrors `Number`'s equality: integers compare by value, floats
        // numerically, so `0.0` and `-0.0` must hash alike.
        Value::Number(n) => {
            2u8.hash(state);
            if let Some(u) = n.as_u64() {
                0u8.hash(state);
                u.hash(state);
            } else if let Some(i) = n.as_i64() {
                1u8.hash(state);
                i.hash(state);
            } else if let Some(f) = n.as_f64() {
                2u8.hash(state);
                let f = if f == 0.0 { 0.0 } else { f };
                f.to_bits().hash(state);
            }
        }
        Value::String(s) => {
            3u8.hash(state);
            s.hash(state);
        }
        Value::Array(values) => {
            4u8.hash(state);
            values.len().hash(state);
            for v in values {
                hash_value(v, state);
            }
        }
        Value::Object(obj) => {
            5u8.hash(state);
            hash_object(obj, state);
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tree.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Envelope::new)
    }
}

// ── Extension ─────────────────────────────────────────────────────────────

/// Bidirectional mapping between a typed value and a set of tree fields.
///
/// `extract` must be total: a tree lacking the fields, or holding them in an
/// unexpected shape, yields a default value rather than an error.
pub trait Extension {
    type Target;

    fn extract(&self, tree: &Map<String, Value>) -> Self::Target;

    /// Fields to merge into the tree. An empty map means "nothing to apply".
    fn apply(&self, value: &Self::Target) -> Map<String, Value>;
}

/// Extension storing one optional serde value under a single key.
///
/// Applying `None` produces no fields, so it leaves the entity untouched;
/// it does not remove a field already present. A value that cannot be
/// represented as JSON (a map with non-string keys, a failing `Serialize`
/// impl) is treated like `None`: no fields, and a warning is logged.
pub struct Field<T> {
    name: Cow<'static, str>,
    marker: PhantomData<fn() -> T>,
}

impl<T> Field<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            marker: PhantomData,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

impl<T: Serialize + DeserializeOwned> Extension for Field<T> {
    type Target = Option<T>;

    fn extract(&self, tree: &Map<String, Value>) -> Option<T> {
        tree.get(self.name())
            .and_then(|value| T::deserialize(value).ok())
    }

    fn apply(&self, value: &Option<T>) -> Map<String, Value> {
        let mut fields = Map::new();
        let Some(value) = value else {
            return fields;
        };
        match serde_json::to_value(value) {
            Ok(json) => {
                fields.insert(self.name.to_string(), json);
            }
            Err(err) => warn!(field = %self.name, %err, "extension value not representable as JSON"),
        }
        fields
    }
}

// ── Extended ──────────────────────────────────────────────────────────────

/// Capability shared by every envelope-backed entity.
///
/// Implementors supply access to their envelope, a way to rewrap a new one,
/// and their own `validate` rule; the extension and copy machinery comes for
/// free.
pub trait Extended: Sized {
    fn envelope(&self) -> &Envelope;

    /// Wrap a tree without any checks.
    fn from_envelope(envelope: Envelope) -> Self;

    /// Check required fields, naming the first one that is missing or malformed.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Project an extension value out of the backing tree.
    fn extension<E: Extension>(&self, extension: &E) -> E::Target {
        extension.extract(self.envelope().tree())
    }

    /// New instance with the extension's fields merged in. When the extension
    /// yields no fields the result shares this instance's tree, see
    /// [`Extended::same_instance`].
    fn apply<E: Extension>(&self, value: &E::Target, extension: &E) -> Self {
        Self::from_envelope(self.envelope().merge(extension.apply(value)))
    }

    /// Defensive copy of the backing tree.
    fn as_json(&self) -> Map<String, Value> {
        self.envelope().to_json()
    }

    fn same_instance(&self, other: &Self) -> bool {
        self.envelope().same_tree(other.envelope())
    }
}
