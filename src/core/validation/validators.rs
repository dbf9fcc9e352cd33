//! Attribute validator seam
//!
//! Every validator is invoked once per attribute during a validation pass and
//! records its findings on the model. An `Err` return means the validator
//! itself could not run (e.g. the store was unreachable) and aborts the pass.

use crate::core::i18n::{NoTranslator, Translator};
use crate::core::model::Model;
use crate::core::store::DocumentStore;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Collaborators shared by all validators of a pass
#[derive(Clone)]
pub struct ValidationContext {
    store: Arc<dyn DocumentStore>,
    translator: Arc<dyn Translator>,
}

impl ValidationContext {
    /// Create a context without translation
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            translator: Arc::new(NoTranslator),
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }
}

impl std::fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("store", &self.store.backend_name())
            .finish_non_exhaustive()
    }
}

/// A validator applied to one attribute at a time
#[async_trait]
pub trait AttributeValidator: Send + Sync {
    /// Short name used in logs and configuration
    fn name(&self) -> &'static str;

    /// Whether attributes that already carry errors are skipped
    fn skip_on_error(&self) -> bool {
        false
    }

    /// Validate `attribute` of `model`, recording problems on the model
    async fn validate_attribute(
        &self,
        ctx: &ValidationContext,
        model: &mut dyn Model,
        attribute: &str,
    ) -> Result<()>;
}
