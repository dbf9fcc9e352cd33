//! Store trait consumed by the validators

use crate::core::document::Document;
use crate::core::error::IdentifierError;
use crate::core::identifier::Identifier;
use crate::core::query::Filter;
use anyhow::Result;
use async_trait::async_trait;

/// Read access to a document store
///
/// Implementations execute queries against their backend; connection
/// handling, timeouts and retries belong to the underlying client. Errors are
/// returned as-is and are never recovered by the validators.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Find the first document of `collection` matching `filter`
    ///
    /// # Returns
    /// `Ok(None)` when nothing matches
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>>;

    /// Construct a store-native identifier from a raw string
    fn new_identifier(&self, raw: &str) -> std::result::Result<Identifier, IdentifierError> {
        Identifier::parse(raw)
    }

    /// Name of the backend, used in logs and errors
    fn backend_name(&self) -> &'static str;
}
