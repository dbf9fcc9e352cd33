//! Uniqueness validator
//!
//! Checks that an attribute value is not already held by another record of
//! the backing collection. The lookup reads a raw document instead of
//! hydrating a model, and the record being validated is recognized by its
//! primary key so re-saving an existing record never flags itself.
//!
//! The `message` template recognizes `{attribute}` and `{value}`; the value is
//! HTML-escaped, and list values are joined with `", "`.

use super::validators::{AttributeValidator, ValidationContext};
use crate::core::model::{AttributeError, ErrorKind, Model};
use crate::core::query::{CaseInsensitivePattern, Condition, Filter};
use crate::core::value::AttributeValue;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Default duplicate message, looked up in the `yii` category
pub const DEFAULT_MESSAGE: &str = "{attribute} \"{value}\" has already been taken.";

/// Validates that the attribute value is unique in its collection
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UniqueValidator {
    /// Whether the comparison is case sensitive. Only string values (or
    /// string list elements) are compared case-insensitively.
    pub case_sensitive: bool,

    /// Whether a list value matches records holding any of its elements
    pub search_in_arrays: bool,

    pub allow_empty: bool,

    /// Collection to search instead of the model's own
    #[serde(alias = "class_name")]
    pub collection: Option<String>,

    /// Stored attribute to compare against instead of the validated one
    pub attribute_name: Option<String>,

    /// Extra conditions combined with the value condition. On a key
    /// collision the value condition wins.
    pub criteria: Filter,

    /// Custom error message (not translated)
    pub message: Option<String>,

    pub skip_on_error: bool,
}

impl Default for UniqueValidator {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            search_in_arrays: false,
            allow_empty: true,
            collection: None,
            attribute_name: None,
            criteria: Filter::new(),
            message: None,
            skip_on_error: true,
        }
    }
}

impl UniqueValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn search_in_arrays(mut self, search_in_arrays: bool) -> Self {
        self.search_in_arrays = search_in_arrays;
        self
    }

    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn attribute_name(mut self, attribute_name: impl Into<String>) -> Self {
        self.attribute_name = Some(attribute_name.into());
        self
    }

    pub fn criteria(mut self, criteria: Filter) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Build the query looking for holders of `value` in `attribute_name`
    pub fn build_filter(&self, attribute_name: &str, value: &AttributeValue) -> Filter {
        let condition = match value {
            AttributeValue::List(items) if self.search_in_arrays => {
                Condition::In(items.iter().map(|i| self.element_condition(i)).collect())
            }
            AttributeValue::List(items) if !self.case_sensitive => {
                Condition::AllOf(items.iter().map(|i| self.element_condition(i)).collect())
            }
            other => self.element_condition(other),
        };

        self.criteria
            .clone()
            .merge(Filter::new().with(attribute_name, condition))
    }

    fn element_condition(&self, value: &AttributeValue) -> Condition {
        match value {
            AttributeValue::String(s) if !self.case_sensitive => {
                Condition::Pattern(CaseInsensitivePattern::exact(s))
            }
            other => Condition::Equals(other.clone()),
        }
    }
}

#[async_trait]
impl AttributeValidator for UniqueValidator {
    fn name(&self) -> &'static str {
        "unique"
    }

    fn skip_on_error(&self) -> bool {
        self.skip_on_error
    }

    async fn validate_attribute(
        &self,
        ctx: &ValidationContext,
        model: &mut dyn Model,
        attribute: &str,
    ) -> Result<()> {
        let value = model.get_attribute(attribute);
        if self.allow_empty && value.is_empty() {
            tracing::debug!(attribute, "empty value, uniqueness check skipped");
            return Ok(());
        }

        let collection = self
            .collection
            .clone()
            .unwrap_or_else(|| model.collection_name().to_string());
        let attribute_name = self.attribute_name.as_deref().unwrap_or(attribute);
        let filter = self.build_filter(attribute_name, &value);

        tracing::debug!(
            collection = %collection,
            attribute = attribute_name,
            backend = ctx.store().backend_name(),
            "checking attribute uniqueness"
        );

        let Some(found) = ctx.store().find_one(&collection, &filter).await? else {
            return Ok(());
        };

        // A record without a primary key is new and conflicts with any match.
        let own_key = model.primary_key();
        let found_key = found
            .get(model.primary_key_name())
            .map(AttributeValue::to_display_string)
            .unwrap_or_default();
        if !own_key.is_empty() && found_key == own_key.to_display_string() {
            tracing::debug!(attribute, "matched the record being validated");
            return Ok(());
        }

        tracing::debug!(attribute, conflicting = %found_key, "duplicate value");
        let template = match &self.message {
            Some(message) => message.clone(),
            None => ctx.translator().translate("yii", DEFAULT_MESSAGE),
        };
        let label = model.attribute_label(attribute);
        model.add_error(
            AttributeError::new(attribute, ErrorKind::Duplicate, template)
                .with_param("{attribute}", label)
                .with_param("{value}", tera::escape_html(&value.to_display_string())),
        );

        Ok(())
    }
}
