//! Message translation
//!
//! Validators never look up a global translator: a [`Translator`] is handed to
//! them explicitly. Messages are looked up by category and source text.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Translates message templates
pub trait Translator: Send + Sync {
    /// Translate `message` within `category`, or return it unchanged
    fn translate(&self, category: &str, message: &str) -> String;
}

/// Identity translator
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslator;

impl Translator for NoTranslator {
    fn translate(&self, _category: &str, message: &str) -> String {
        message.to_string()
    }
}

/// Translator backed by an in-memory catalog (category -> source -> translation)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogTranslator {
    catalog: HashMap<String, HashMap<String, String>>,
}

impl CatalogTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a translation
    pub fn with(
        mut self,
        category: impl Into<String>,
        source: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        self.catalog
            .entry(category.into())
            .or_default()
            .insert(source.into(), translation.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.values().all(HashMap::is_empty)
    }
}

impl From<HashMap<String, HashMap<String, String>>> for CatalogTranslator {
    fn from(catalog: HashMap<String, HashMap<String, String>>) -> Self {
        Self { catalog }
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, category: &str, message: &str) -> String {
        self.catalog
            .get(category)
            .and_then(|messages| messages.get(message))
            .cloned()
            .unwrap_or_else(|| message.to_string())
    }
}
