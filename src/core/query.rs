//! Query filters understood by every document store
//!
//! A [`Filter`] maps attribute names to [`Condition`]s. All conditions must
//! hold for a document to match. Conditions follow document-store array
//! semantics: a scalar condition against a list-valued attribute matches when
//! any element matches.
//!
//! # Example
//! ```rust,ignore
//! let filter = Filter::new()
//!     .with("email", Condition::Pattern(CaseInsensitivePattern::exact("Foo@Bar.io")))
//!     .with("deleted", Condition::Equals(false.into()));
//! ```

use crate::core::document::Document;
use crate::core::error::ValidatorError;
use crate::core::value::AttributeValue;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A case-insensitive whole-value match.
///
/// The source value is regex-escaped and anchored for stores that take a
/// pattern, so `"a.b"` only matches `"A.B"`-like strings and never `"axb"`
/// or `"xa.bx"`. Local matching compares lower-cased characters and never
/// compiles the pattern, whatever the size of the value.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseInsensitivePattern {
    value: String,
    pattern: String,
}

impl CaseInsensitivePattern {
    /// Pattern matching `value` exactly, ignoring case
    pub fn exact(value: &str) -> Self {
        Self {
            value: value.to_string(),
            pattern: format!("^{}$", regex::escape(value)),
        }
    }

    /// The anchored pattern, without flags (as sent to a store)
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The literal value being matched
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Store option flags for this pattern
    pub fn options(&self) -> &'static str {
        "i"
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.value
            .chars()
            .flat_map(char::to_lowercase)
            .eq(candidate.chars().flat_map(char::to_lowercase))
    }
}

/// A single match condition on one attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Literal equality
    Equals(AttributeValue),

    /// Case-insensitive whole-value match on strings
    Pattern(CaseInsensitivePattern),

    /// Set membership: any of the conditions matches
    In(Vec<Condition>),

    /// Whole-list comparison: the stored list has exactly as many elements
    /// as there are conditions and every condition matches some element
    AllOf(Vec<Condition>),
}

impl Condition {
    /// Evaluate against a stored attribute (absent attributes are null)
    pub fn matches(&self, stored: Option<&AttributeValue>) -> bool {
        let stored = stored.unwrap_or(&AttributeValue::Null);
        match self {
            Condition::Equals(expected) => match (stored, expected) {
                (AttributeValue::List(items), AttributeValue::List(_)) => {
                    values_equal(stored, expected)
                        || items.iter().any(|item| values_equal(item, expected))
                }
                (AttributeValue::List(items), _) => {
                    items.iter().any(|item| values_equal(item, expected))
                }
                _ => values_equal(stored, expected),
            },
            Condition::Pattern(pattern) => match stored {
                AttributeValue::String(s) => pattern.is_match(s),
                AttributeValue::List(items) => items
                    .iter()
                    .any(|item| item.as_str().is_some_and(|s| pattern.is_match(s))),
                _ => false,
            },
            Condition::In(candidates) => candidates.iter().any(|c| c.matches(Some(stored))),
            Condition::AllOf(conditions) => match stored {
                AttributeValue::List(items) => {
                    items.len() == conditions.len()
                        && conditions
                            .iter()
                            .all(|c| items.iter().any(|item| c.matches(Some(item))))
                }
                _ => false,
            },
        }
    }
}

/// Equality with numeric cross-type comparison (`1 == 1.0`)
fn values_equal(a: &AttributeValue, b: &AttributeValue) -> bool {
    match (a, b) {
        (AttributeValue::Integer(i), AttributeValue::Float(f))
        | (AttributeValue::Float(f), AttributeValue::Integer(i)) => (*i as f64) == *f,
        (AttributeValue::List(xs), AttributeValue::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        _ => a == b,
    }
}

/// Conjunction of per-attribute conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: IndexMap<String, Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, condition: Condition) -> Self {
        self.insert(field, condition);
        self
    }

    /// Insert a condition, replacing any existing one for `field`
    pub fn insert(&mut self, field: impl Into<String>, condition: Condition) {
        self.conditions.insert(field.into(), condition);
    }

    /// Merge `other` into this filter.
    ///
    /// Keys present in both keep `other`'s condition (last merge wins).
    pub fn merge(mut self, other: Filter) -> Self {
        for (field, condition) in other.conditions {
            self.conditions.insert(field, condition);
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&Condition> {
        self.conditions.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Condition)> {
        self.conditions.iter()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check whether a document satisfies every condition
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, condition)| condition.matches(document.get(field)))
    }

    /// Parse a JSON criteria object
    ///
    /// # Format
    /// - Exact match: `{"field": value}`
    /// - Membership: `{"field": {"$in": [v1, v2]}}`
    pub fn from_json(json: &Value) -> Result<Self, ValidatorError> {
        let Some(obj) = json.as_object() else {
            return Err(ValidatorError::UnsupportedValue {
                kind: "non-object criteria".to_string(),
            });
        };

        let mut filter = Filter::new();
        for (field, value) in obj {
            let condition = match value.as_object().and_then(|o| o.get("$in")) {
                Some(Value::Array(items)) => Condition::In(
                    items
                        .iter()
                        .cloned()
                        .map(|v| AttributeValue::try_from(v).map(Condition::Equals))
                        .collect::<Result<_, _>>()?,
                ),
                _ => Condition::Equals(AttributeValue::try_from(value.clone())?),
            };
            filter.insert(field.clone(), condition);
        }
        Ok(filter)
    }
}

/// Criteria are written in configuration files with the JSON criteria format
impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = Value::deserialize(deserializer)?;
        Filter::from_json(&json).map_err(serde::de::Error::custom)
    }
}
