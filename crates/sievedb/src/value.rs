use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

///
/// Value
///
/// Literal values carried through criteria and parameter bindings.
///
/// The compiler never interprets values beyond shape checks; storage-level
/// type coercion belongs to the execution engine.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Text(String),
    Timestamp(Timestamp),
    List(Vec<Value>),
}

impl Value {
    /// Short label for diagnostics and error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
            Self::List(_) => "list",
        }
    }

    /// True when the value carries nothing to filter on.
    ///
    /// Used for the blank-search-box rule (empty LIKE input is skipped) and
    /// for required-identifier validation.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&String> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::Timestamp(v)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_values() {
        assert!(Value::Null.is_unset());
        assert!(Value::from("").is_unset());
        assert!(Value::List(vec![]).is_unset());
        assert!(!Value::from(0i64).is_unset());
        assert!(!Value::from(false).is_unset());
        assert!(!Value::from("x").is_unset());
    }

    #[test]
    fn list_from_converts_elements() {
        let value = Value::from(vec![1i64, 2, 3]);
        assert_eq!(
            value,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }
}
