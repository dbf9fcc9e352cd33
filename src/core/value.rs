//! Attribute values and conversions

use crate::core::error::ValidatorError;
use crate::core::identifier::Identifier;
use serde_json::{Value, json};
use std::fmt;

/// A polymorphic attribute value as held by a model or a stored document
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeValue {
    #[default]
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Identifier(Identifier),
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Framework emptiness: null, the empty string or an empty list.
    ///
    /// `false` and `0` are *not* empty.
    pub fn is_empty(&self) -> bool {
        match self {
            AttributeValue::Null => true,
            AttributeValue::String(s) => s.is_empty(),
            AttributeValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Get the value as a string slice if possible
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an identifier if it already is one
    pub fn as_identifier(&self) -> Option<Identifier> {
        match self {
            AttributeValue::Identifier(id) => Some(*id),
            _ => None,
        }
    }

    /// Get the elements if the value is a list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, AttributeValue::List(_))
    }

    /// Short type name, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Null => "null",
            AttributeValue::String(_) => "string",
            AttributeValue::Integer(_) => "integer",
            AttributeValue::Float(_) => "float",
            AttributeValue::Boolean(_) => "boolean",
            AttributeValue::Identifier(_) => "identifier",
            AttributeValue::List(_) => "list",
        }
    }

    /// String form used for primary-key comparison and message interpolation.
    ///
    /// Lists are joined with `", "`, null renders as the empty string.
    pub fn to_display_string(&self) -> String {
        match self {
            AttributeValue::Null => String::new(),
            AttributeValue::String(s) => s.clone(),
            AttributeValue::Integer(i) => i.to_string(),
            AttributeValue::Float(f) => f.to_string(),
            AttributeValue::Boolean(b) => b.to_string(),
            AttributeValue::Identifier(id) => id.to_hex(),
            AttributeValue::List(items) => items
                .iter()
                .map(AttributeValue::to_display_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Convert into JSON. Identifiers use the extended JSON `{"$oid": ...}` form.
    pub fn to_json(&self) -> Value {
        match self {
            AttributeValue::Null => Value::Null,
            AttributeValue::String(s) => Value::String(s.clone()),
            AttributeValue::Integer(i) => json!(i),
            AttributeValue::Float(f) => json!(f),
            AttributeValue::Boolean(b) => Value::Bool(*b),
            AttributeValue::Identifier(id) => json!({ "$oid": id.to_hex() }),
            AttributeValue::List(items) => {
                Value::Array(items.iter().map(AttributeValue::to_json).collect())
            }
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl TryFrom<Value> for AttributeValue {
    type Error = ValidatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(b) => AttributeValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => AttributeValue::Integer(i),
                None => AttributeValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => AttributeValue::String(s),
            Value::Array(items) => AttributeValue::List(
                items
                    .into_iter()
                    .map(AttributeValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => match map.get("$oid").and_then(Value::as_str) {
                Some(hex) if map.len() == 1 => AttributeValue::Identifier(Identifier::parse(hex)?),
                _ => {
                    return Err(ValidatorError::UnsupportedValue {
                        kind: "object".to_string(),
                    });
                }
            },
        })
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<f64> for AttributeValue {
    fn from(f: f64) -> Self {
        AttributeValue::Float(f)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

impl From<Identifier> for AttributeValue {
    fn from(id: Identifier) -> Self {
        AttributeValue::Identifier(id)
    }
}

impl<T: Into<AttributeValue>> From<Vec<T>> for AttributeValue {
    fn from(items: Vec<T>) -> Self {
        AttributeValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(AttributeValue::Null)
    }
}
