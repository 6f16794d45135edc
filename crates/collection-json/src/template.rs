//! Write template: the data shape a client fills in to create or update an item.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::extension::{Envelope, Extended};
use crate::property::Property;

#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template {
    envelope: Envelope,
}

impl Template {
    pub fn create(data: &[Property]) -> Template {
        Template::default().with_data(data)
    }

    pub fn from_json(tree: Map<String, Value>) -> Template {
        Template {
            envelope: Envelope::new(tree),
        }
    }

    pub fn data(&self) -> Vec<Property> {
        self.envelope.list("data")
    }

    pub fn with_data(&self, data: &[Property]) -> Template {
        Template {
            envelope: self.envelope.with_list("data", data),
        }
    }
}

impl Extended for Template {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn from_envelope(envelope: Envelope) -> Self {
        Template { envelope }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.envelope.validate_list::<Property>("template", "data")
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template").field("data", &self.data()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_template_is_valid() {
        let template = Template::default();
        assert!(template.data().is_empty());
        assert!(template.validate().is_ok());
    }

    #[test]
    fn data_must_be_an_array() {
        let template = Template::from_json(json!({"data": {"name": "x"}}).as_object().cloned().unwrap());
        assert_eq!(template.validate().unwrap_err().field(), "data");
    }

    #[test]
    fn create_sets_data() {
        let template = Template::create(&[Property::create("full-name").with_prompt("Full Name")]);
        assert_eq!(template.data()[0].prompt(), Some("Full Name"));
    }
}
