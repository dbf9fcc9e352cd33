//! Validation pass over a model
//!
//! A pipeline runs its rules in declaration order, each rule visiting its
//! attributes in order. Errors are accumulated on the model; only validator
//! failures (store errors) stop the pass.

use super::validators::{AttributeValidator, ValidationContext};
use crate::core::model::Model;
use anyhow::Result;
use std::sync::Arc;

/// A validator bound to the attributes it checks
#[derive(Clone)]
pub struct Rule {
    pub attributes: Vec<String>,
    pub validator: Arc<dyn AttributeValidator>,
}

impl Rule {
    pub fn new<I, S>(attributes: I, validator: Arc<dyn AttributeValidator>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
            validator,
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("attributes", &self.attributes)
            .field("validator", &self.validator.name())
            .finish()
    }
}

/// Ordered set of rules sharing one validation context
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = ValidationPipeline::new(ValidationContext::new(store))
///     .with_rule(["email"], UniqueValidator::new().case_sensitive(false))
///     .with_rule(["owner_id"], MongoIdValidator::new());
///
/// if !pipeline.validate(&mut user).await? {
///     // user.errors() describes what is wrong
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidationPipeline {
    context: ValidationContext,
    rules: Vec<Rule>,
}

impl ValidationPipeline {
    pub fn new(context: ValidationContext) -> Self {
        Self {
            context,
            rules: Vec::new(),
        }
    }

    /// Append a rule
    pub fn with_rule<I, S, V>(mut self, attributes: I, validator: V) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        V: AttributeValidator + 'static,
    {
        self.rules.push(Rule::new(attributes, Arc::new(validator)));
        self
    }

    pub fn push_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    /// Run every rule on every attribute
    ///
    /// # Returns
    /// `Ok(true)` when the model carries no error after the pass
    pub async fn validate(&self, model: &mut dyn Model) -> Result<bool> {
        self.run(model, None).await
    }

    /// Run the rules on the listed attributes only
    pub async fn validate_attributes(&self, model: &mut dyn Model, only: &[&str]) -> Result<bool> {
        self.run(model, Some(only)).await
    }

    async fn run(&self, model: &mut dyn Model, only: Option<&[&str]>) -> Result<bool> {
        for rule in &self.rules {
            for attribute in &rule.attributes {
                if only.is_some_and(|names| !names.contains(&attribute.as_str())) {
                    continue;
                }

                if rule.validator.skip_on_error() && model.has_errors(Some(attribute)) {
                    tracing::debug!(
                        validator = rule.validator.name(),
                        attribute = %attribute,
                        "attribute already has errors, skipped"
                    );
                    continue;
                }

                rule.validator
                    .validate_attribute(&self.context, model, attribute)
                    .await?;
            }
        }

        Ok(!model.has_errors(None))
    }
}
