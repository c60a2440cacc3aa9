use crate::{
    query::{Bindings, OrderSpec, Predicate},
    traits::EntityKind,
};
use serde::Serialize;
use thiserror::Error as ThisError;

///
/// ExecutionEngine
///
/// The executor boundary. This layer compiles filter intent; the engine owns
/// query-language rendering, literal-to-storage coercion, execution, and
/// whatever transaction/connection discipline the storage needs. Exactly one
/// statement is issued per compiled predicate.
///
/// A `None` predicate means the statement applies unconditionally to every
/// row of the entity kind.
///

pub trait ExecutionEngine {
    /// Materialize rows for a select statement.
    fn select<K: EntityKind>(&self, statement: SelectStatement) -> Result<Vec<K>, EngineError>;

    /// Scalar row count.
    fn count(&self, statement: CountStatement) -> Result<u64, EngineError>;

    /// Bulk field-set mutation; returns the affected-row count.
    fn update(&self, statement: UpdateStatement) -> Result<u64, EngineError>;

    /// Physical row removal; returns the affected-row count.
    fn delete(&self, statement: DeleteStatement) -> Result<u64, EngineError>;
}

///
/// SelectStatement
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SelectStatement {
    pub entity: &'static str,
    pub predicate: Option<Predicate>,
    pub bindings: Bindings,
    pub projection: Projection,
    pub order: OrderSpec,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

///
/// CountStatement
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CountStatement {
    pub entity: &'static str,
    pub predicate: Option<Predicate>,
    pub bindings: Bindings,
}

///
/// UpdateStatement
///
/// Assignment values are bound like predicate literals: each assignment
/// references a key in `bindings` rather than carrying the value inline.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct UpdateStatement {
    pub entity: &'static str,
    pub predicate: Option<Predicate>,
    pub bindings: Bindings,
    pub assignments: Vec<Assignment>,
}

///
/// Assignment
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Assignment {
    pub field: String,
    pub key: String,
}

///
/// DeleteStatement
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct DeleteStatement {
    pub entity: &'static str,
    pub predicate: Option<Predicate>,
    pub bindings: Bindings,
}

///
/// Projection
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum Projection {
    #[default]
    All,
    Fields(Vec<String>),
}

///
/// EngineError
///
/// Opaque engine failure (connectivity, constraint violations, rendering).
/// Passed through this layer unchanged.
///

#[derive(Debug, ThisError)]
#[error("{0}")]
pub struct EngineError(Box<dyn std::error::Error + Send + Sync>);

impl EngineError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}
