//! # This-RS Validators
//!
//! Attribute validators for models stored in a document database.
//!
//! ## Features
//!
//! - **Identifier casting**: `MongoIdValidator` turns raw strings (or lists of
//!   strings) into native object ids, leaving existing ids untouched
//! - **Uniqueness**: `UniqueValidator` looks for another record holding the
//!   same value, optionally case-insensitively or element-wise for lists
//! - **Explicit collaborators**: the document store and the translator are
//!   passed in a `ValidationContext`, never looked up globally
//! - **Configuration-Based**: declare rules and messages in YAML
//! - **Pluggable storage**: in-memory store for tests, MongoDB behind the
//!   `mongodb_backend` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use this_validators::prelude::*;
//!
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let pipeline = ValidationPipeline::new(ValidationContext::new(store))
//!     .with_rule(["email"], UniqueValidator::new().case_sensitive(false))
//!     .with_rule(["owner_id"], MongoIdValidator::new());
//!
//! let mut user = Record::new("users")
//!     .with_attribute("email", "Jane@Example.com")
//!     .with_attribute("owner_id", "507f1f77bcf86cd799439011");
//!
//! if !pipeline.validate(&mut user).await? {
//!     for error in user.errors() {
//!         println!("{}: {}", error.attribute, error.message());
//!     }
//! }
//! ```

pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        document::Document,
        error::{ConfigError, IdentifierError, StorageError, ValidatorError},
        i18n::{CatalogTranslator, NoTranslator, Translator},
        identifier::Identifier,
        model::{AttributeError, ErrorKind, Model, Record},
        query::{CaseInsensitivePattern, Condition, Filter},
        store::DocumentStore,
        value::AttributeValue,
    };

    // === Validators ===
    pub use crate::core::validation::{
        AttributeValidator, MongoIdValidator, Rule, UniqueValidator, ValidationContext,
        ValidationPipeline,
    };

    // === Storage ===
    pub use crate::storage::InMemoryDocumentStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoDocumentStore;

    // === Config ===
    pub use crate::config::{RuleConfig, ValidatorConfig, ValidatorsConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
