//! sievedb: a criteria-to-predicate compiler and soft-delete repository layer.
//!
//! The crate turns a declarative, loosely-typed filter description
//! ([`criteria::Criteria`]) into a composable boolean predicate tree plus a
//! bound parameter set, and layers soft-delete semantics (delete as a
//! conditional field update) on top. Rendering and executing the compiled
//! statements, entity hydration, and schema discovery are delegated to
//! external collaborators behind [`engine::ExecutionEngine`] and
//! [`schema::SchemaMetadata`].
//!
//! ## Crate layout
//! - `criteria`: the caller-facing filter vocabulary.
//! - `query`: field resolution, pattern expansion, compilation, composition.
//! - `engine`: the executor boundary and its statement shapes.
//! - `repo`: base repository plus the soft-delete overlay.
//! - `schema`: association metadata contract.

pub mod criteria;
pub mod engine;
pub mod error;
pub mod query;
pub mod repo;
pub mod schema;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;

///
/// Prelude
///
/// Domain vocabulary only; no executors or statement shapes.
///

pub mod prelude {
    pub use crate::{
        criteria::{Criteria, CriterionValue, Descriptor, LikePosition, Operator},
        query::{LogicalOp, OrderDirection, OrderSpec, Predicate},
        repo::{PhysicalDelete, Repository, removable::{RemovableRepository, SoftDelete}},
        traits::{EntityKind, RemovableKind},
        types::Timestamp,
        value::Value,
    };
}
