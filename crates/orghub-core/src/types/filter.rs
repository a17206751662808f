//! Query predicates shared by every store implementation.
//!
//! A [`Predicate`] is either the deny-all sentinel or a conjunction of
//! [`FilterField`] conditions. An empty conjunction matches every document.
//! Stores translate predicates into their native query language; the
//! in-memory store evaluates them with [`Predicate::matches`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::Document;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Case-insensitive string equality.
    IEq,
    /// Field is absent or null.
    IsNull,
}

/// A dynamic filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// A boolean value.
    Boolean(bool),
    /// Null / no value (for `IsNull`).
    Null,
}

impl FilterValue {
    /// Render the value as JSON for stores that compare JSON values.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Null => Value::Null,
        }
    }
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The document field name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Shorthand for a string equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Eq, FilterValue::String(value.into()))
    }

    /// Shorthand for a boolean equality filter.
    pub fn eq_bool(field: impl Into<String>, value: bool) -> Self {
        Self::new(field, FilterOp::Eq, FilterValue::Boolean(value))
    }

    /// Equality against an optional string; `None` becomes an `IsNull` check.
    pub fn eq_opt(field: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(v) => Self::eq(field, v),
            None => Self::is_null(field),
        }
    }

    /// Shorthand for an inequality filter.
    pub fn ne(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Ne, FilterValue::String(value.into()))
    }

    /// Shorthand for a case-insensitive equality filter.
    pub fn ieq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::IEq, FilterValue::String(value.into()))
    }

    /// Shorthand for an absent-or-null filter.
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::new(field, FilterOp::IsNull, FilterValue::Null)
    }

    /// Evaluate the condition against a document.
    pub fn matches(&self, doc: &Document) -> bool {
        let actual = doc.get(&self.field).unwrap_or(&Value::Null);
        match self.op {
            FilterOp::Eq => value_eq(actual, &self.value),
            FilterOp::Ne => !value_eq(actual, &self.value),
            FilterOp::IEq => match (actual, &self.value) {
                (Value::String(a), FilterValue::String(b)) => a.to_lowercase() == b.to_lowercase(),
                _ => false,
            },
            FilterOp::IsNull => actual.is_null(),
        }
    }
}

fn value_eq(actual: &Value, expected: &FilterValue) -> bool {
    match (actual, expected) {
        (Value::String(a), FilterValue::String(b)) => a == b,
        (Value::Bool(a), FilterValue::Boolean(b)) => a == b,
        (Value::Null, FilterValue::Null) => true,
        _ => false,
    }
}

/// A query predicate: the deny-all sentinel or a conjunction of conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "conditions", rename_all = "snake_case")]
pub enum Predicate {
    /// Matches nothing. Stores must not issue a query for it.
    DenyAll,
    /// Matches documents satisfying every condition.
    Match(Vec<FilterField>),
}

impl Predicate {
    /// The predicate matching every document.
    pub fn all() -> Self {
        Self::Match(Vec::new())
    }

    /// The predicate matching nothing.
    pub fn deny_all() -> Self {
        Self::DenyAll
    }

    /// A predicate with a single condition.
    pub fn field(condition: FilterField) -> Self {
        Self::Match(vec![condition])
    }

    /// Add a condition. The deny-all sentinel absorbs every addition.
    pub fn and(self, condition: FilterField) -> Self {
        match self {
            Self::DenyAll => Self::DenyAll,
            Self::Match(mut conditions) => {
                conditions.push(condition);
                Self::Match(conditions)
            }
        }
    }

    /// Whether this is the deny-all sentinel.
    pub fn is_deny_all(&self) -> bool {
        matches!(self, Self::DenyAll)
    }

    /// The conditions of a matching predicate (empty for deny-all).
    pub fn conditions(&self) -> &[FilterField] {
        match self {
            Self::DenyAll => &[],
            Self::Match(conditions) => conditions,
        }
    }

    /// Evaluate the predicate against a document.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::DenyAll => false,
            Self::Match(conditions) => conditions.iter().all(|c| c.matches(doc)),
        }
    }
}
