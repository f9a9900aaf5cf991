//! Record metadata and the filter predicate language of the index.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A scalar metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl MetadataValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Order two values of the same kind; values of different kinds do not compare.
    fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for MetadataValue {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Metadata attached to one index record.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Filter over record metadata.
///
/// Comparisons only hold between values of the same kind; a missing field
/// fails every comparison except `Ne`.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every record.
    All,
    Eq(String, MetadataValue),
    Ne(String, MetadataValue),
    Lte(String, MetadataValue),
    Gte(String, MetadataValue),
    And(Vec<Predicate>),
}

impl Predicate {
    #[must_use]
    pub fn field_eq(field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    #[must_use]
    pub fn field_ne(field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::Ne(field.into(), value.into())
    }

    #[must_use]
    pub fn field_lte(field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::Lte(field.into(), value.into())
    }

    #[must_use]
    pub fn field_gte(field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::Gte(field.into(), value.into())
    }

    /// Conjunction of `self` and `other`, flattening nested `And`s.
    ///
    /// # Examples
    /// ```
    /// use statute_index::metadata::Predicate;
    ///
    /// let p = Predicate::field_eq("title", "Pakeitimai:")
    ///     .and(Predicate::field_eq("chunk_number", 1_u32))
    ///     .and(Predicate::All);
    /// assert!(matches!(p, Predicate::And(ref parts) if parts.len() == 2));
    /// ```
    #[must_use]
    pub fn and(self, other: Predicate) -> Self {
        let mut parts = Vec::new();
        for predicate in [self, other] {
            match predicate {
                Self::All => {}
                Self::And(inner) => parts.extend(inner),
                other => parts.push(other),
            }
        }
        match parts.len() {
            0 => Self::All,
            1 => parts.remove(0),
            _ => Self::And(parts),
        }
    }

    /// Evaluate the predicate against a record's metadata.
    #[must_use]
    pub fn matches(&self, metadata: &Metadata) -> bool {
        let compare = |field: &str, value: &MetadataValue| {
            metadata.get(field).and_then(|actual| actual.compare(value))
        };

        match self {
            Self::All => true,
            Self::Eq(field, value) => compare(field, value) == Some(Ordering::Equal),
            Self::Ne(field, value) => compare(field, value) != Some(Ordering::Equal),
            Self::Lte(field, value) => compare(field, value).is_some_and(Ordering::is_le),
            Self::Gte(field, value) => compare(field, value).is_some_and(Ordering::is_ge),
            Self::And(parts) => parts.iter().all(|p| p.matches(metadata)),
        }
    }
}
