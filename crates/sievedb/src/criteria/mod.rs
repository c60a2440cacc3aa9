#[cfg(test)]
mod tests;

use crate::value::Value;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

/// Operator applied when a criterion does not name one explicitly.
pub const DEFAULT_OPERATOR: Operator = Operator::Eq;

///
/// Criteria
///
/// Caller-supplied filter description: field name → criterion value.
///
/// Insertion order is preserved so compiled trees are deterministic; it is
/// not semantically significant. Setting a field twice replaces the earlier
/// criterion.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize, Deserialize)]
pub struct Criteria(#[into_iterator(owned, ref)] Vec<(String, CriterionValue)>);

impl Criteria {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add or replace a criterion for `name`.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<CriterionValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(field, _)| *field == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
        self
    }
}

///
/// CriterionValue
///
/// Tagged union over the shapes a criterion may take. Shape validation
/// happens here at construction time, so the compiler never sniffs runtime
/// types.
///
/// - `Null` compiles to an IS NULL check
/// - `Scalar` compiles to an equality comparison
/// - `List` compiles to set membership
/// - `Descriptor` names its operator explicitly
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CriterionValue {
    Null,
    Scalar(Value),
    List(Vec<Value>),
    Descriptor(Descriptor),
}

impl From<Value> for CriterionValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::List(items) => Self::List(items),
            other => Self::Scalar(other),
        }
    }
}

impl From<Descriptor> for CriterionValue {
    fn from(descriptor: Descriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<bool> for CriterionValue {
    fn from(v: bool) -> Self {
        Self::Scalar(Value::Bool(v))
    }
}

impl From<i64> for CriterionValue {
    fn from(v: i64) -> Self {
        Self::Scalar(Value::Int(v))
    }
}

impl From<u64> for CriterionValue {
    fn from(v: u64) -> Self {
        Self::Scalar(Value::Uint(v))
    }
}

impl From<&str> for CriterionValue {
    fn from(v: &str) -> Self {
        Self::Scalar(Value::Text(v.to_string()))
    }
}

impl From<String> for CriterionValue {
    fn from(v: String) -> Self {
        Self::Scalar(Value::Text(v))
    }
}

impl<V: Into<Value>> From<Vec<V>> for CriterionValue {
    fn from(items: Vec<V>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

///
/// Descriptor
///
/// Explicit operator/value pair, optionally with a pattern position hint.
/// `pos` is only meaningful for `like`.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    pub value: Value,
    pub operator: Operator,
    pub pos: Option<LikePosition>,
}

impl Descriptor {
    #[must_use]
    pub fn new(operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            operator,
            pos: None,
        }
    }

    /// A `like` descriptor with no position hint (expands to all three
    /// positions, OR'd together).
    #[must_use]
    pub fn like(value: impl Into<Value>) -> Self {
        Self::new(Operator::Like, value)
    }

    /// Pin the pattern position.
    #[must_use]
    pub const fn pos(mut self, pos: LikePosition) -> Self {
        self.pos = Some(pos);
        self
    }
}

///
/// Operator
///
/// Enumerated comparison operators a criterion may name. Unknown operator
/// strings are rejected eagerly at parse time rather than forwarded blindly
/// to the execution engine.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[default]
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Like,
    Is,
}

impl Operator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::In => "in",
            Self::Like => "like",
            Self::Is => "is",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = OperatorNotSupported;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "ne" | "neq" => Ok(Self::Ne),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "in" => Ok(Self::In),
            "like" => Ok(Self::Like),
            "is" => Ok(Self::Is),
            other => Err(OperatorNotSupported(other.to_string())),
        }
    }
}

///
/// OperatorNotSupported
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("operator \"{0}\" is not supported")]
pub struct OperatorNotSupported(pub String);

///
/// LikePosition
///
/// Where the match value appears in the pattern. An absent position expands
/// to all three, OR'd, in the fixed order prefix, middle, suffix.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikePosition {
    Prefix,
    Middle,
    Suffix,
}

impl LikePosition {
    /// Parse a position hint; anything unrecognized means "unspecified".
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "prefix" => Some(Self::Prefix),
            "middle" => Some(Self::Middle),
            "suffix" => Some(Self::Suffix),
            _ => None,
        }
    }
}
