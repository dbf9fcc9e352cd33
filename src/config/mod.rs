//! Configuration loading and management
//!
//! Validation rules are declared per model in YAML:
//!
//! ```yaml
//! rules:
//!   - attributes: [email]
//!     validator: unique
//!     case_sensitive: false
//!     criteria:
//!       deleted: false
//!   - attributes: [owner_id, tag_ids]
//!     validator: mongo_id
//! messages:
//!   yii:
//!     '{attribute} "{value}" has already been taken.': '{attribute} « {value} » est déjà utilisé.'
//! ```

use crate::core::error::ConfigError;
use crate::core::i18n::CatalogTranslator;
use crate::core::validation::{
    AttributeValidator, MongoIdValidator, Rule, UniqueValidator, ValidationContext,
    ValidationPipeline,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Validator selected by a rule, with its options
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "validator", rename_all = "snake_case")]
pub enum ValidatorConfig {
    /// Uniqueness check
    Unique(UniqueValidator),

    /// Identifier casting
    MongoId(MongoIdValidator),
}

impl ValidatorConfig {
    /// Build the configured validator
    pub fn build(&self) -> Arc<dyn AttributeValidator> {
        match self {
            ValidatorConfig::Unique(v) => Arc::new(v.clone()),
            ValidatorConfig::MongoId(v) => Arc::new(v.clone()),
        }
    }
}

/// One rule: a validator applied to a list of attributes
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Attributes checked by this rule
    pub attributes: Vec<String>,

    #[serde(flatten)]
    pub validator: ValidatorConfig,
}

/// Complete configuration for a model's validation
///
/// Unknown keys are rejected at every level, so a misspelled option fails
/// to load instead of silently keeping its default.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ValidatorsConfig {
    /// Rules, applied in order
    #[serde(default)]
    pub rules: Vec<RuleConfig>,

    /// Message catalog (category -> source message -> translation)
    #[serde(default)]
    pub messages: HashMap<String, HashMap<String, String>>,
}

impl ValidatorsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        Self::parse(&content, Some(path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    fn parse(yaml: &str, file: Option<&str>) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: file.map(str::to_string),
            message: e.to_string(),
        })?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.attributes.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("rules[{}].attributes", index),
                    value: "[]".to_string(),
                    message: "a rule must name at least one attribute".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Translator built from the `messages` catalog
    pub fn translator(&self) -> CatalogTranslator {
        CatalogTranslator::from(self.messages.clone())
    }

    /// Build a validation pipeline over `context`
    ///
    /// The configured message catalog replaces the context's translator
    /// unless it is empty.
    pub fn build_pipeline(&self, context: ValidationContext) -> ValidationPipeline {
        let context = if self.messages.is_empty() {
            context
        } else {
            context.with_translator(Arc::new(self.translator()))
        };

        let mut pipeline = ValidationPipeline::new(context);
        for rule in &self.rules {
            pipeline.push_rule(Rule::new(rule.attributes.clone(), rule.validator.build()));
        }

        tracing::debug!(rules = self.rules.len(), "validation pipeline built");
        pipeline
    }
}
