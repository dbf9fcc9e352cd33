//! Typed error handling for the validators
//!
//! Only failures of the validators themselves live here. Problems found in a
//! model (an unparsable identifier, a duplicate value) are not errors of the
//! validation pass: they are recorded on the model as
//! [`AttributeError`](crate::core::model::AttributeError)s.
//!
//! # Error Categories
//!
//! - [`IdentifierError`]: a raw value cannot become a store identifier
//! - [`StorageError`]: the document store failed to answer a query
//! - [`ConfigError`]: rule configuration could not be loaded
//! - [`ValidatorError`]: umbrella type for identifier, config and value errors
//!
//! Store errors cross the [`DocumentStore`](crate::core::store::DocumentStore)
//! seam as `anyhow::Error`; backends build them from [`StorageError`] so callers
//! can `downcast_ref` when they need to tell a timeout from a bad query.

use thiserror::Error;

/// The main error type of the crate
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// Identifier parse failure
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// Configuration failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A JSON value that has no attribute representation
    #[error("Unsupported attribute value: {kind}")]
    UnsupportedValue { kind: String },
}

impl ValidatorError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidatorError::Identifier(e) => e.error_code(),
            ValidatorError::Config(_) => "CONFIG_ERROR",
            ValidatorError::UnsupportedValue { .. } => "UNSUPPORTED_VALUE",
        }
    }
}

// =============================================================================
// Identifier Errors
// =============================================================================

/// Errors raised while constructing an identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The raw value is not a 24-character hex string
    #[error("Invalid object id '{value}': {reason}")]
    Invalid { value: String, reason: String },

    /// The raw value is not a string at all
    #[error("Cannot build an object id from a {kind} value")]
    NotAString { kind: &'static str },
}

impl IdentifierError {
    pub fn error_code(&self) -> &'static str {
        match self {
            IdentifierError::Invalid { .. } => "INVALID_IDENTIFIER",
            IdentifierError::NotAString { .. } => "INVALID_IDENTIFIER",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Query execution failed
    #[error("Query failed on {backend}: {message}")]
    QueryError { backend: String, message: String },

    /// The backend could not be reached
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::QueryError { .. } => "STORAGE_QUERY_ERROR",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}
