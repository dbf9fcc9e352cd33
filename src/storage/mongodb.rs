//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoDocumentStore`, a [`DocumentStore`] backed by a
//! `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! this-rs-validators = { version = "0.0.9", features = ["mongodb_backend"] }
//! ```
//!
//! # Query translation
//!
//! | Condition            | BSON                                  |
//! |----------------------|---------------------------------------|
//! | `Equals(v)`          | `{ field: v }`                        |
//! | `Pattern(p)`         | `{ field: /^p$/i }`                   |
//! | `In([..])`           | `{ field: { $in: [..] } }`            |
//! | `AllOf([..])`        | `{ field: { $size: n, $all: [..] } }` |
//! | `AllOf([])`          | `{ field: { $size: 0 } }`             |
//!
//! Returned documents are converted field by field. Fields whose BSON type
//! has no attribute representation (embedded documents, dates, binary data)
//! are kept as their relaxed extended JSON text.

use crate::core::document::Document;
use crate::core::error::StorageError;
use crate::core::identifier::Identifier;
use crate::core::query::{Condition, Filter};
use crate::core::store::DocumentStore;
use crate::core::value::AttributeValue;
use anyhow::Result;
use async_trait::async_trait;
use mongodb::Database;
use mongodb::bson::{self, Bson, doc};

const BACKEND: &str = "mongodb";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert an attribute value into its BSON representation.
fn value_to_bson(value: &AttributeValue) -> Bson {
    match value {
        AttributeValue::Null => Bson::Null,
        AttributeValue::String(s) => Bson::String(s.clone()),
        AttributeValue::Integer(i) => Bson::Int64(*i),
        AttributeValue::Float(f) => Bson::Double(*f),
        AttributeValue::Boolean(b) => Bson::Boolean(*b),
        AttributeValue::Identifier(id) => Bson::ObjectId(id.object_id()),
        AttributeValue::List(items) => Bson::Array(items.iter().map(value_to_bson).collect()),
    }
}

/// Convert a BSON value back into an attribute value.
///
/// BSON types without an attribute representation (binary UUIDs, dates,
/// decimals, embedded documents) become their relaxed extended JSON text, so
/// a compound or non-object-id `_id` still has a comparable string form.
fn bson_to_value(value: Bson) -> AttributeValue {
    match value {
        Bson::Null | Bson::Undefined => AttributeValue::Null,
        Bson::String(s) => AttributeValue::String(s),
        Bson::Int32(i) => AttributeValue::Integer(i64::from(i)),
        Bson::Int64(i) => AttributeValue::Integer(i),
        Bson::Double(f) => AttributeValue::Float(f),
        Bson::Boolean(b) => AttributeValue::Boolean(b),
        Bson::ObjectId(oid) => AttributeValue::Identifier(Identifier::from(oid)),
        Bson::Array(items) => AttributeValue::List(items.into_iter().map(bson_to_value).collect()),
        other => AttributeValue::String(other.into_relaxed_extjson().to_string()),
    }
}

/// Convert a single condition into the BSON placed under its field name.
fn condition_to_bson(condition: &Condition) -> Bson {
    match condition {
        Condition::Equals(value) => value_to_bson(value),
        Condition::Pattern(pattern) => Bson::RegularExpression(bson::Regex {
            pattern: pattern.as_str().to_string(),
            options: pattern.options().to_string(),
        }),
        Condition::In(candidates) => {
            let candidates: Vec<Bson> = candidates.iter().map(condition_to_bson).collect();
            Bson::Document(doc! { "$in": candidates })
        }
        // `$all: []` matches nothing, so an empty list only checks the size.
        Condition::AllOf(conditions) if conditions.is_empty() => {
            Bson::Document(doc! { "$size": 0_i64 })
        }
        Condition::AllOf(conditions) => {
            let all: Vec<Bson> = conditions.iter().map(condition_to_bson).collect();
            let size = all.len() as i64;
            Bson::Document(doc! { "$size": size, "$all": all })
        }
    }
}

/// Translate a filter into a MongoDB query document.
fn filter_to_document(filter: &Filter) -> bson::Document {
    filter
        .iter()
        .map(|(field, condition)| (field.clone(), condition_to_bson(condition)))
        .collect()
}

/// Convert a stored BSON document into a [`Document`].
fn bson_to_document(raw: bson::Document) -> Document {
    raw.into_iter()
        .map(|(name, value)| (name, bson_to_value(value)))
        .collect()
}

// ---------------------------------------------------------------------------
// MongoDocumentStore
// ---------------------------------------------------------------------------

/// Document store backed by MongoDB.
///
/// Each model class maps to a collection of the database.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use this_validators::storage::MongoDocumentStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let store = MongoDocumentStore::new(client.database("mydb"));
/// let ctx = ValidationContext::new(Arc::new(store));
/// ```
#[derive(Clone, Debug)]
pub struct MongoDocumentStore {
    database: Database,
}

impl MongoDocumentStore {
    /// Create a new `MongoDocumentStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        let query = filter_to_document(filter);
        tracing::trace!(collection, query = %query, "find_one");

        let found = self
            .database
            .collection::<bson::Document>(collection)
            .find_one(query)
            .await
            .map_err(|e| StorageError::QueryError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;

        Ok(found.map(bson_to_document))
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}
