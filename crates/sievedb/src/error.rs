use crate::{
    criteria::OperatorNotSupported,
    engine::EngineError,
    query::compile::CriterionError,
};
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error surface of the crate.
///
/// Compile-layer errors are synchronous and surfaced immediately to the
/// caller; nothing is retried or swallowed. Engine errors are opaque to this
/// layer and pass through unchanged.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0}")]
    Argument(#[from] ArgumentError),

    #[error("{0}")]
    Criterion(#[from] CriterionError),

    #[error("{0}")]
    Operator(#[from] OperatorNotSupported),

    #[error("{0}")]
    Engine(#[from] EngineError),
}

///
/// ArgumentError
///
/// A required identifier was missing or empty before compilation started.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ArgumentError {
    #[error("id is required")]
    IdRequired,

    #[error("id list is required")]
    IdListRequired,
}
