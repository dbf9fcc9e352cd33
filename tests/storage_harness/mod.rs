//! Shared test harness for document store backends
//!
//! Provides the [`SeedableStore`] trait used to put fixture documents in a
//! backend, a few document builders, and the `validator_contract_tests!`
//! macro checking that the validators behave the same on every backend.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

pub mod validator_contract_tests;

use anyhow::Result;
use async_trait::async_trait;
use this_validators::prelude::*;

/// Collection used by every contract test.
pub const USERS: &str = "users";

/// Hex ids reused across tests
pub const ID_A: &str = "507f1f77bcf86cd799439011";
pub const ID_B: &str = "507f191e810c19729de860ea";
pub const ID_C: &str = "5f8d0d55b54764421b7156c3";

/// A [`DocumentStore`] that tests can fill with fixture documents.
#[async_trait]
pub trait SeedableStore: DocumentStore + 'static {
    /// Store `document` in `collection`
    async fn seed(&self, collection: &str, document: Document) -> Result<()>;
}

#[async_trait]
impl SeedableStore for InMemoryDocumentStore {
    async fn seed(&self, collection: &str, document: Document) -> Result<()> {
        self.insert(collection, document)
    }
}

/// Parse one of the fixture ids
pub fn id(raw: &str) -> Identifier {
    Identifier::parse(raw).expect("fixture ids are valid hex")
}

/// A stored user document
pub fn user_doc(raw_id: &str, email: &str) -> Document {
    Document::new().with("_id", id(raw_id)).with("email", email)
}

/// A user record as the application would hold it before saving
pub fn user_record(raw_id: &str, email: &str) -> Record {
    Record::new(USERS)
        .with_attribute("_id", id(raw_id))
        .with_attribute("email", email)
}

/// Validation context over `store` with the default translator
pub fn context<S: SeedableStore>(store: S) -> ValidationContext {
    ValidationContext::new(Arc::new(store))
}

/// Install a tracing subscriber once so `RUST_LOG` works in tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
