//! Identifier casting validator
//!
//! Casts every value sent into it to a store identifier, so that references
//! like `owner_id` or `tag_ids` are stored with the native key type instead
//! of plain strings.
//!
//! Error messages recognize `{attribute}`, `{value}` (the raw value) and
//! `{error}` (the parse failure). Without a custom message the parse failure
//! is reported as-is.

use super::validators::{AttributeValidator, ValidationContext};
use crate::core::error::IdentifierError;
use crate::core::identifier::Identifier;
use crate::core::model::{AttributeError, ErrorKind, Model};
use crate::core::store::DocumentStore;
use crate::core::value::AttributeValue;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Casts a scalar or list attribute to identifiers
///
/// - empty values are left alone when `allow_empty` is set
/// - values that already are identifiers are kept as-is
/// - a null value with `allow_empty` off gets a freshly generated identifier
/// - if any element fails to parse, the attribute is left untouched and a
///   single error is recorded
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MongoIdValidator {
    pub allow_empty: bool,

    /// Custom error message, translated in the `db_errors` category.
    /// Defaults to the parse failure message.
    pub message: Option<String>,

    pub skip_on_error: bool,
}

impl Default for MongoIdValidator {
    fn default() -> Self {
        Self {
            allow_empty: true,
            message: None,
            skip_on_error: false,
        }
    }
}

impl MongoIdValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Cast a whole attribute value. Lists are cast element by element and
    /// the first failure aborts the cast.
    pub fn cast(
        store: &dyn DocumentStore,
        value: &AttributeValue,
    ) -> Result<AttributeValue, IdentifierError> {
        match value {
            AttributeValue::List(items) => Ok(AttributeValue::List(
                items
                    .iter()
                    .map(|item| Self::cast_scalar(store, item).map(AttributeValue::Identifier))
                    .collect::<Result<_, _>>()?,
            )),
            scalar => Self::cast_scalar(store, scalar).map(AttributeValue::Identifier),
        }
    }

    fn cast_scalar(
        store: &dyn DocumentStore,
        value: &AttributeValue,
    ) -> Result<Identifier, IdentifierError> {
        match value {
            AttributeValue::Identifier(id) => Ok(*id),
            AttributeValue::String(raw) => store.new_identifier(raw),
            AttributeValue::Null => Ok(Identifier::new()),
            other => Err(IdentifierError::NotAString { kind: other.kind() }),
        }
    }
}

#[async_trait]
impl AttributeValidator for MongoIdValidator {
    fn name(&self) -> &'static str {
        "mongo_id"
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
            tracing::debug!(attribute, "empty value, identifier cast skipped");
            return Ok(());
        }

        match Self::cast(ctx.store(), &value) {
            Ok(cast) => {
                model.set_attribute(attribute, cast);
            }
            Err(e) => {
                tracing::warn!(attribute, error = %e, "identifier cast failed");
                let template = match self.message.as_deref() {
                    Some(message) if !message.is_empty() => {
                        ctx.translator().translate("db_errors", message)
                    }
                    _ => "{error}".to_string(),
                };
                let label = model.attribute_label(attribute);
                model.add_error(
                    AttributeError::new(attribute, ErrorKind::InvalidIdentifier, template)
                        .with_param("{attribute}", label)
                        .with_param("{value}", value.to_display_string())
                        .with_param("{error}", e.to_string()),
                );
            }
        }

        Ok(())
    }
}
