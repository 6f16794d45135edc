//! A single `data` entry of an item, query or template.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::extension::{Envelope, Extended};

const ENTITY: &str = "property";

/// `{ "name": ..., "value": ..., "prompt": ... }`; only `name` is required.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Property {
    envelope: Envelope,
}

impl Property {
    pub fn create(name: impl Into<String>) -> Property {
        let mut tree = Map::new();
        tree.insert("name".into(), Value::String(name.into()));
        Property::from_json(tree)
    }

    pub fn from_json(tree: Map<String, Value>) -> Property {
        Property {
            envelope: Envelope::new(tree),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.envelope.get_str("name")
    }

    pub fn with_name(&self, name: impl Into<String>) -> Property {
        Property {
            envelope: self.envelope.with("name", name.into()),
        }
    }

    /// Raw scalar value; `None` when absent.
    pub fn value(&self) -> Option<&Value> {
        self.envelope.get("value")
    }

    pub fn value_str(&self) -> Option<&str> {
        self.envelope.get_str("value")
    }

    pub fn with_value(&self, value: impl Into<Value>) -> Property {
        Property {
            envelope: self.envelope.with("value", value.into()),
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        self.envelope.get_str("prompt")
    }

    pub fn with_prompt(&self, prompt: impl Into<String>) -> Property {
        Property {
            envelope: self.envelope.with("prompt", prompt.into()),
        }
    }
}

impl Extended for Property {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn from_envelope(envelope: Envelope) -> Self {
        Property { envelope }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.envelope.require_str(ENTITY, "name")?;
        self.envelope.optional_str(ENTITY, "prompt")?;
        match self.value() {
            Some(Value::Array(_)) | Some(Value::Object(_)) => Err(ValidationError::InvalidType {
                entity: ENTITY,
                field: "value",
                expected: "a string, number, boolean or null",
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name())
            .field("value", &self.value())
            .field("prompt", &self.prompt())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_values_are_valid() {
        for value in [json!("a"), json!(1), json!(false), Value::Null] {
            let prop = Property::create("full-name").with_value(value.clone());
            assert_eq!(prop.value(), Some(&value));
            assert!(prop.validate().is_ok());
        }
    }

    #[test]
    fn nested_values_are_rejected() {
        let prop = Property::create("tags").with_value(json!(["a", "b"]));
        assert_eq!(prop.validate().unwrap_err().field(), "value");
    }

    #[test]
    fn name_is_required() {
        let prop = Property::from_json(Map::new()).with_value("x");
        assert_eq!(
            prop.validate(),
            Err(ValidationError::MissingField {
                entity: "property",
                field: "name"
            })
        );
    }

    #[test]
    fn value_str_only_reads_strings() {
        let prop = Property::create("age").with_value(42);
        assert_eq!(prop.value_str(), None);
        assert_eq!(prop.with_value("42").value_str(), Some("42"));
    }
}
