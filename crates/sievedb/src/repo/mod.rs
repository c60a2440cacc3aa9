pub mod removable;


use crate::{
    criteria::{Criteria, LikePosition},
    engine::{CountStatement, DeleteStatement, ExecutionEngine, Projection, SelectStatement},
    error::{ArgumentError, Error},
    query::{
        AliasContext, Compiled, LogicalOp, OrderSpec,
        compile::{compile, compile_like},
    },
    schema::SchemaMetadata,
    traits::EntityKind,
    value::Value,
};
use std::marker::PhantomData;

/// Root alias attached to unqualified field names.
pub const DEFAULT_ROOT_ALIAS: &str = "e";

///
/// Repository
///
/// Base repository over one entity kind: criteria-driven finds, counts, and
/// physical deletion. Compilation is purely functional; all I/O happens at
/// the execution engine.
///

pub struct Repository<K, E, S> {
    engine: E,
    schema: S,
    root_alias: &'static str,
    _marker: PhantomData<K>,
}

impl<K, E, S> Repository<K, E, S>
where
    K: EntityKind,
    E: ExecutionEngine,
    S: SchemaMetadata,
{
    #[must_use]
    pub const fn new(engine: E, schema: S) -> Self {
        Self {
            engine,
            schema,
            root_alias: DEFAULT_ROOT_ALIAS,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn with_root_alias(mut self, alias: &'static str) -> Self {
        self.root_alias = alias;
        self
    }

    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Alias context for one compile call. The schema provider is queried
    /// exactly once per call; it may cache, this layer never does.
    pub(crate) fn context(&self) -> AliasContext {
        AliasContext::new(self.root_alias, self.schema.association_fields(K::ENTITY))
    }

    // ─────────────────────────────────────────────
    // FINDS
    // ─────────────────────────────────────────────

    pub fn find_by(
        &self,
        criteria: &Criteria,
        order: &OrderSpec,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<K>, Error> {
        let ctx = self.context();
        let compiled = compile(criteria, &ctx, LogicalOp::And)?;

        self.select_compiled(&ctx, compiled, order, limit, offset)
    }

    /// Sugar for a set-membership criterion on the primary key. Empty input
    /// yields an empty result rather than an error.
    pub fn find_by_ids(
        &self,
        ids: &[Value],
        order: &OrderSpec,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<K>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let criteria = Criteria::new().field(K::PRIMARY_KEY, ids.to_vec());
        self.find_by(&criteria, order, limit, offset)
    }

    /// Find with bare text scalars treated as LIKE matches at `pos`.
    pub fn find_like(
        &self,
        criteria: &Criteria,
        order: &OrderSpec,
        limit: Option<u64>,
        offset: Option<u64>,
        top: LogicalOp,
        pos: Option<LikePosition>,
    ) -> Result<Vec<K>, Error> {
        let ctx = self.context();
        let compiled = compile_like(criteria, &ctx, top, pos)?;

        self.select_compiled(&ctx, compiled, order, limit, offset)
    }

    // ─────────────────────────────────────────────
    // COUNTS
    // ─────────────────────────────────────────────

    /// Unconditional count of the entity kind.
    pub fn count(&self) -> Result<u64, Error> {
        self.count_compiled(Compiled::default())
    }

    pub fn count_by(&self, criteria: &Criteria, top: LogicalOp) -> Result<u64, Error> {
        if criteria.is_empty() {
            return self.count();
        }

        let ctx = self.context();
        let compiled = compile(criteria, &ctx, top)?;

        self.count_compiled(compiled)
    }

    pub fn count_like(
        &self,
        criteria: &Criteria,
        top: LogicalOp,
        pos: Option<LikePosition>,
    ) -> Result<u64, Error> {
        if criteria.is_empty() {
            return self.count();
        }

        let ctx = self.context();
        let compiled = compile_like(criteria, &ctx, top, pos)?;

        self.count_compiled(compiled)
    }

    // ─────────────────────────────────────────────
    // STATEMENT HAND-OFF
    // ─────────────────────────────────────────────

    pub(crate) fn select_compiled(
        &self,
        ctx: &AliasContext,
        compiled: Compiled,
        order: &OrderSpec,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<K>, Error> {
        let statement = SelectStatement {
            entity: K::ENTITY,
            predicate: compiled.predicate,
            bindings: compiled.bindings,
            projection: Projection::All,
            order: order.qualified(ctx),
            offset,
            limit,
        };

        self.engine.select::<K>(statement).map_err(Error::from)
    }

    pub(crate) fn count_compiled(&self, compiled: Compiled) -> Result<u64, Error> {
        let statement = CountStatement {
            entity: K::ENTITY,
            predicate: compiled.predicate,
            bindings: compiled.bindings,
        };

        self.engine.count(statement).map_err(Error::from)
    }
}

///
/// PhysicalDelete
///
/// Physical row removal. Irreversible, and deliberately separate from the
/// soft-delete overlay so adapters can offer either capability on its own.
///

pub trait PhysicalDelete {
    fn delete_by(&self, criteria: &Criteria, top: LogicalOp) -> Result<u64, Error>;
    fn delete_by_id(&self, id: Value) -> Result<u64, Error>;
    fn delete_by_ids(&self, ids: &[Value]) -> Result<u64, Error>;
    fn delete_all(&self) -> Result<u64, Error>;
}

impl<K, E, S> PhysicalDelete for Repository<K, E, S>
where
    K: EntityKind,
    E: ExecutionEngine,
    S: SchemaMetadata,
{
    fn delete_by(&self, criteria: &Criteria, top: LogicalOp) -> Result<u64, Error> {
        let ctx = self.context();
        let compiled = compile(criteria, &ctx, top)?;

        let statement = DeleteStatement {
            entity: K::ENTITY,
            predicate: compiled.predicate,
            bindings: compiled.bindings,
        };

        self.engine.delete(statement).map_err(Error::from)
    }

    fn delete_by_id(&self, id: Value) -> Result<u64, Error> {
        if id.is_unset() {
            return Err(ArgumentError::IdRequired.into());
        }

        self.delete_by(
            &Criteria::new().field(K::PRIMARY_KEY, id),
            LogicalOp::And,
        )
    }

    fn delete_by_ids(&self, ids: &[Value]) -> Result<u64, Error> {
        if ids.is_empty() {
            return Err(ArgumentError::IdListRequired.into());
        }

        self.delete_by(
            &Criteria::new().field(K::PRIMARY_KEY, ids.to_vec()),
            LogicalOp::And,
        )
    }

    /// Unconditional physical delete of every row of the entity kind.
    fn delete_all(&self) -> Result<u64, Error> {
        self.delete_by(&Criteria::new(), LogicalOp::And)
    }
}
