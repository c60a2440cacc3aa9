//! Criteria-to-predicate compilation.
//!
//! The pipeline is leaf-first: the field resolver qualifies and classifies
//! field names, the pattern expander turns position hints into LIKE
//! templates, the compiler walks criteria into a predicate tree plus
//! parameter bindings, and the composer finalizes the tree (injecting fixed
//! predicates always under AND).

pub mod compile;
pub mod compose;
pub mod field;
pub mod like;
pub mod predicate;

pub use compile::{Compiled, CriterionError, compile, compile_like};
pub use compose::{OrderDirection, OrderSpec, merge};
pub use field::AliasContext;
pub use predicate::{Bindings, CompareOp, LogicalOp, Predicate};
