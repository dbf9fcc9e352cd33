//! Model abstraction consumed by the validators
//!
//! Validators never own a model. They read and write attributes by name and
//! append [`AttributeError`]s through the [`Model`] capability trait, which is
//! implemented per model type or through the reflective [`Record`].

use crate::core::document::Document;
use crate::core::error::ValidatorError;
use crate::core::label::Labeler;
use crate::core::value::AttributeValue;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Kind of problem recorded on an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A raw value could not be turned into an identifier
    InvalidIdentifier,

    /// Another record already holds the value
    Duplicate,
}

impl ErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidIdentifier => "INVALID_IDENTIFIER",
            ErrorKind::Duplicate => "DUPLICATE_VALUE",
        }
    }
}

/// A validation error attached to one attribute.
///
/// The message is kept as a template plus substitution parameters
/// (`{attribute}`, `{value}`, ...) and rendered on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeError {
    pub attribute: String,
    pub kind: ErrorKind,
    pub template: String,
    pub params: IndexMap<String, String>,
}

impl AttributeError {
    pub fn new(attribute: impl Into<String>, kind: ErrorKind, template: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            kind,
            template: template.into(),
            params: IndexMap::new(),
        }
    }

    /// Add a substitution parameter. `key` includes its braces, e.g. `{value}`.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Render the template.
    ///
    /// Substitution is single-pass: text inserted for one placeholder is
    /// never scanned for other placeholders.
    pub fn message(&self) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        'scan: while !rest.is_empty() {
            for (key, value) in &self.params {
                if !key.is_empty() && rest.starts_with(key.as_str()) {
                    out.push_str(value);
                    rest = &rest[key.len()..];
                    continue 'scan;
                }
            }
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }

        out
    }
}

/// Capability interface over a record being validated
pub trait Model: Send + Sync {
    /// Collection backing this model's class
    fn collection_name(&self) -> &str;

    /// Name of the primary-key attribute
    fn primary_key_name(&self) -> &str {
        "_id"
    }

    /// Current primary-key value (null for records not stored yet)
    fn primary_key(&self) -> AttributeValue {
        self.get_attribute(self.primary_key_name())
    }

    /// Read an attribute. Unknown attributes read as null.
    fn get_attribute(&self, name: &str) -> AttributeValue;

    /// Write an attribute
    fn set_attribute(&mut self, name: &str, value: AttributeValue);

    /// Display label used for the `{attribute}` placeholder
    fn attribute_label(&self, name: &str) -> String {
        Labeler::humanize(name)
    }

    /// Append an error. Errors are purely additive.
    fn add_error(&mut self, error: AttributeError);

    /// All recorded errors, in insertion order
    fn errors(&self) -> &[AttributeError];

    /// Whether any error is recorded, optionally restricted to one attribute
    fn has_errors(&self, attribute: Option<&str>) -> bool {
        match attribute {
            Some(name) => self.errors().iter().any(|e| e.attribute == name),
            None => !self.errors().is_empty(),
        }
    }

    /// Rendered messages for one attribute
    fn error_messages(&self, attribute: &str) -> Vec<String> {
        self.errors()
            .iter()
            .filter(|e| e.attribute == attribute)
            .map(AttributeError::message)
            .collect()
    }
}

/// A model backed by an ordered attribute map
///
/// # Example
///
/// ```rust,ignore
/// let mut user = Record::new("users")
///     .with_attribute("email", "jane@example.com")
///     .with_label("email", "E-mail address");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    collection: String,
    primary_key_name: String,
    attributes: IndexMap<String, AttributeValue>,
    labels: HashMap<String, String>,
    errors: Vec<AttributeError>,
}

impl Record {
    /// Create an empty record stored in `collection`, keyed by `_id`
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            primary_key_name: "_id".to_string(),
            ..Default::default()
        }
    }

    /// Build a record from a JSON object
    pub fn from_json(collection: impl Into<String>, json: Value) -> Result<Self, ValidatorError> {
        let document = Document::from_json(json)?;
        let mut record = Self::new(collection);
        record.attributes = document.into_iter().collect();
        Ok(record)
    }

    pub fn with_primary_key_name(mut self, name: impl Into<String>) -> Self {
        self.primary_key_name = name.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Override the humanized label of an attribute
    pub fn with_label(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(name.into(), label.into());
        self
    }

    pub fn attributes(&self) -> &IndexMap<String, AttributeValue> {
        &self.attributes
    }

    /// Snapshot of the attributes as a storable document
    pub fn to_document(&self) -> Document {
        self.attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

impl Model for Record {
    fn collection_name(&self) -> &str {
        &self.collection
    }

    fn primary_key_name(&self) -> &str {
        &self.primary_key_name
    }

    fn get_attribute(&self, name: &str) -> AttributeValue {
        self.attributes.get(name).cloned().unwrap_or_default()
    }

    fn set_attribute(&mut self, name: &str, value: AttributeValue) {
        self.attributes.insert(name.to_string(), value);
    }

    fn attribute_label(&self, name: &str) -> String {
        self.labels
            .get(name)
            .cloned()
            .unwrap_or_else(|| Labeler::humanize(name))
    }

    fn add_error(&mut self, error: AttributeError) {
        self.errors.push(error);
    }

    fn errors(&self) -> &[AttributeError] {
        &self.errors
    }
}
