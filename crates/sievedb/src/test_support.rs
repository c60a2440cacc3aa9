//! Shared test-only fixtures: a recording mock engine and entity kinds.

use crate::{
    engine::{CountStatement, DeleteStatement, EngineError, ExecutionEngine, SelectStatement, UpdateStatement},
    schema::StaticSchema,
    traits::{EntityKind, RemovableKind},
};
use std::cell::RefCell;

///
/// Order
///
/// Test entity with one association field ("customer").
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Order;

impl EntityKind for Order {
    const ENTITY: &'static str = "order";
}

impl RemovableKind for Order {}

/// Schema fixture matching [`Order`].
pub fn order_schema() -> StaticSchema {
    StaticSchema::new().entity(Order::ENTITY, ["customer"])
}

///
/// Recorded
///

#[derive(Clone, Debug, PartialEq)]
pub enum Recorded {
    Select(SelectStatement),
    Count(CountStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
}

///
/// MockEngine
///
/// Records every statement handed across the executor boundary and returns
/// canned results.
///

#[derive(Debug, Default)]
pub struct MockEngine {
    pub statements: RefCell<Vec<Recorded>>,
    pub count_result: u64,
    pub affected: u64,
}

impl MockEngine {
    pub fn with_count(count_result: u64) -> Self {
        Self {
            count_result,
            ..Self::default()
        }
    }

    /// The single statement recorded so far.
    pub fn only_statement(&self) -> Recorded {
        let statements = self.statements.borrow();
        assert_eq!(statements.len(), 1, "expected exactly one statement");
        statements[0].clone()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.borrow().is_empty()
    }
}

impl ExecutionEngine for MockEngine {
    fn select<K: EntityKind>(&self, statement: SelectStatement) -> Result<Vec<K>, EngineError> {
        self.statements.borrow_mut().push(Recorded::Select(statement));
        Ok(Vec::new())
    }

    fn count(&self, statement: CountStatement) -> Result<u64, EngineError> {
        self.statements.borrow_mut().push(Recorded::Count(statement));
        Ok(self.count_result)
    }

    fn update(&self, statement: UpdateStatement) -> Result<u64, EngineError> {
        self.statements.borrow_mut().push(Recorded::Update(statement));
        Ok(self.affected)
    }

    fn delete(&self, statement: DeleteStatement) -> Result<u64, EngineError> {
        self.statements.borrow_mut().push(Recorded::Delete(statement));
        Ok(self.affected)
    }
}
