//! Raw documents returned by a document store

use crate::core::error::ValidatorError;
use crate::core::value::AttributeValue;
use indexmap::IndexMap;
use serde_json::Value;

/// An unordered-in-store, ordered-in-memory set of named attributes.
///
/// Validators read stored records as raw documents instead of hydrating a
/// model for every lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: IndexMap<String, AttributeValue>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.fields.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a document from a JSON object
    pub fn from_json(json: Value) -> Result<Self, ValidatorError> {
        let Value::Object(map) = json else {
            return Err(ValidatorError::UnsupportedValue {
                kind: "non-object document".to_string(),
            });
        };

        map.into_iter()
            .map(|(name, value)| Ok((name, AttributeValue::try_from(value)?)))
            .collect()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl FromIterator<(String, AttributeValue)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Document {
    type Item = (String, AttributeValue);
    type IntoIter = indexmap::map::IntoIter<String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
