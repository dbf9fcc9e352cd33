//! Core module containing the model, value, store and validator abstractions

pub mod document;
pub mod error;
pub mod i18n;
pub mod identifier;
pub mod label;
pub mod model;
pub mod query;
pub mod store;
pub mod validation;
pub mod value;

pub use document::Document;
pub use error::{ConfigError, IdentifierError, StorageError, ValidatorError};
pub use i18n::{CatalogTranslator, NoTranslator, Translator};
pub use identifier::Identifier;
pub use model::{AttributeError, ErrorKind, Model, Record};
pub use query::{CaseInsensitivePattern, Condition, Filter};
pub use store::DocumentStore;
pub use value::AttributeValue;
