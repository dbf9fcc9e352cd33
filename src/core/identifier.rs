//! Store-native document identifiers

use crate::core::error::IdentifierError;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque primary key of a stored document (a 12-byte object id).
///
/// Two identifiers are equal exactly when their 24-character hex
/// representations are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(ObjectId);

impl Identifier {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a raw string into an identifier
    ///
    /// Only 24-character hexadecimal strings are accepted.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|e| IdentifierError::Invalid {
                value: raw.to_string(),
                reason: e.to_string(),
            })
    }

    /// Get the underlying object id
    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    /// Hex representation
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for Identifier {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<Identifier> for ObjectId {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}
