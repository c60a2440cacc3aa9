use crate::{
    criteria::{Criteria, LikePosition},
    engine::{Assignment, ExecutionEngine, UpdateStatement},
    error::{ArgumentError, Error},
    query::{
        AliasContext, Bindings, CompareOp, Compiled, LogicalOp, OrderSpec, Predicate,
        compile::{ClauseBuilder, DefaultClauses, LikeClauses, compile_into},
        field::strip_alias,
        merge,
    },
    repo::{PhysicalDelete, Repository},
    schema::SchemaMetadata,
    traits::RemovableKind,
    types::Timestamp,
    value::Value,
};
use derive_more::Deref;

///
/// RemovableRepository
///
/// Soft-delete overlay over the base repository: "delete" becomes a bulk
/// field-set mutation flipping the removed flag and stamping the removal
/// time. The lifecycle this layer observes is two states, live → removed,
/// and it never reverses the transition. Physical deletion stays reachable
/// through [`PhysicalDelete`] and is irreversible.
///

#[derive(Deref)]
pub struct RemovableRepository<K, E, S> {
    base: Repository<K, E, S>,
}

impl<K, E, S> RemovableRepository<K, E, S>
where
    K: RemovableKind,
    E: ExecutionEngine,
    S: SchemaMetadata,
{
    #[must_use]
    pub const fn new(engine: E, schema: S) -> Self {
        Self {
            base: Repository::new(engine, schema),
        }
    }

    #[must_use]
    pub const fn overlay(base: Repository<K, E, S>) -> Self {
        Self { base }
    }

    // ─────────────────────────────────────────────
    // FINDS
    // ─────────────────────────────────────────────

    pub fn find_unremoved_by(
        &self,
        criteria: &Criteria,
        order: &OrderSpec,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<K>, Error> {
        self.find_marked(criteria, order, limit, offset, LogicalOp::And, &DefaultClauses, false)
    }

    pub fn find_removed_by(
        &self,
        criteria: &Criteria,
        order: &OrderSpec,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<K>, Error> {
        self.find_marked(criteria, order, limit, offset, LogicalOp::And, &DefaultClauses, true)
    }

    /// Empty input yields an empty result rather than an error.
    pub fn find_unremoved_by_ids(
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
        self.find_unremoved_by(&criteria, order, limit, offset)
    }

    pub fn find_unremoved_like(
        &self,
        criteria: &Criteria,
        order: &OrderSpec,
        limit: Option<u64>,
        offset: Option<u64>,
        top: LogicalOp,
        pos: Option<LikePosition>,
    ) -> Result<Vec<K>, Error> {
        self.find_marked(criteria, order, limit, offset, top, &LikeClauses { pos }, false)
    }

    pub fn find_removed_like(
        &self,
        criteria: &Criteria,
        order: &OrderSpec,
        limit: Option<u64>,
        offset: Option<u64>,
        top: LogicalOp,
        pos: Option<LikePosition>,
    ) -> Result<Vec<K>, Error> {
        self.find_marked(criteria, order, limit, offset, top, &LikeClauses { pos }, true)
    }

    // ─────────────────────────────────────────────
    // COUNTS
    // ─────────────────────────────────────────────

    pub fn count_removed_by(&self, criteria: &Criteria, top: LogicalOp) -> Result<u64, Error> {
        self.count_marked(criteria, top, &DefaultClauses, true)
    }

    pub fn count_unremoved_by(&self, criteria: &Criteria, top: LogicalOp) -> Result<u64, Error> {
        self.count_marked(criteria, top, &DefaultClauses, false)
    }

    pub fn count_removed_like(
        &self,
        criteria: &Criteria,
        top: LogicalOp,
        pos: Option<LikePosition>,
    ) -> Result<u64, Error> {
        self.count_marked(criteria, top, &LikeClauses { pos }, true)
    }

    pub fn count_unremoved_like(
        &self,
        criteria: &Criteria,
        top: LogicalOp,
        pos: Option<LikePosition>,
    ) -> Result<u64, Error> {
        self.count_marked(criteria, top, &LikeClauses { pos }, false)
    }

    // ─────────────────────────────────────────────
    // INTERNALS
    // ─────────────────────────────────────────────

    /// Compile caller criteria and AND-join the fixed `removed = <flag>`
    /// equality, threading one binding set through both passes so key
    /// uniqueness holds across the merged tree.
    fn compiled_with_marker(
        &self,
        ctx: &AliasContext,
        criteria: &Criteria,
        top: LogicalOp,
        builder: &dyn ClauseBuilder,
        removed: bool,
    ) -> Result<Compiled, Error> {
        let mut bindings = Bindings::new();
        let base = compile_into(criteria, ctx, top, builder, &mut bindings)?;
        let extra = self.marker_predicate(ctx, &mut bindings, removed);

        Ok(Compiled {
            predicate: merge(base, Some(extra)),
            bindings,
        })
    }

    fn marker_predicate(
        &self,
        ctx: &AliasContext,
        bindings: &mut Bindings,
        removed: bool,
    ) -> Predicate {
        let key = bindings.bind(strip_alias(K::MARKER.removed), Value::Bool(removed));

        Predicate::comparison(ctx.qualify(K::MARKER.removed), CompareOp::Eq, key)
    }

    #[allow(clippy::too_many_arguments)]
    fn find_marked(
        &self,
        criteria: &Criteria,
        order: &OrderSpec,
        limit: Option<u64>,
        offset: Option<u64>,
        top: LogicalOp,
        builder: &dyn ClauseBuilder,
        removed: bool,
    ) -> Result<Vec<K>, Error> {
        let ctx = self.base.context();
        let compiled = self.compiled_with_marker(&ctx, criteria, top, builder, removed)?;

        self.base.select_compiled(&ctx, compiled, order, limit, offset)
    }

    fn count_marked(
        &self,
        criteria: &Criteria,
        top: LogicalOp,
        builder: &dyn ClauseBuilder,
        removed: bool,
    ) -> Result<u64, Error> {
        let ctx = self.base.context();
        let compiled = self.compiled_with_marker(&ctx, criteria, top, builder, removed)?;

        self.base.count_compiled(compiled)
    }
}

///
/// SoftDelete
///
/// Logical deletion: a bulk field-set mutation, never physical row removal.
///

pub trait SoftDelete {
    /// Mark every row matching `criteria` as removed.
    ///
    /// Empty criteria compile to no predicate, so the mutation applies to
    /// **every row of the entity kind**. See [`SoftDelete::remove_all`].
    fn remove_by(
        &self,
        criteria: &Criteria,
        top: LogicalOp,
        removed_at: Option<Timestamp>,
    ) -> Result<u64, Error>;

    fn remove_by_id(&self, id: Value, removed_at: Option<Timestamp>) -> Result<u64, Error>;

    fn remove_by_ids(&self, ids: &[Value], removed_at: Option<Timestamp>) -> Result<u64, Error>;

    /// Mark every row of the entity kind as removed, unconditionally.
    fn remove_all(&self, removed_at: Option<Timestamp>) -> Result<u64, Error>;
}

impl<K, E, S> SoftDelete for RemovableRepository<K, E, S>
where
    K: RemovableKind,
    E: ExecutionEngine,
    S: SchemaMetadata,
{
    fn remove_by(
        &self,
        criteria: &Criteria,
        top: LogicalOp,
        removed_at: Option<Timestamp>,
    ) -> Result<u64, Error> {
        let ctx = self.base.context();
        let mut bindings = Bindings::new();
        let predicate = compile_into(criteria, &ctx, top, &DefaultClauses, &mut bindings)?;

        let marker = K::MARKER;
        let removed_at = removed_at.unwrap_or_else(Timestamp::now);

        let mut assignments = Vec::with_capacity(2);
        let key = bindings.bind(strip_alias(marker.removed), Value::Bool(true));
        assignments.push(Assignment {
            field: ctx.qualify(marker.removed),
            key,
        });
        let key = bindings.bind(strip_alias(marker.removed_at), Value::Timestamp(removed_at));
        assignments.push(Assignment {
            field: ctx.qualify(marker.removed_at),
            key,
        });

        let statement = UpdateStatement {
            entity: K::ENTITY,
            predicate,
            bindings,
            assignments,
        };

        self.base.engine().update(statement).map_err(Error::from)
    }

    fn remove_by_id(&self, id: Value, removed_at: Option<Timestamp>) -> Result<u64, Error> {
        if id.is_unset() {
            return Err(ArgumentError::IdRequired.into());
        }

        self.remove_by(
            &Criteria::new().field(K::PRIMARY_KEY, id),
            LogicalOp::And,
            removed_at,
        )
    }

    fn remove_by_ids(&self, ids: &[Value], removed_at: Option<Timestamp>) -> Result<u64, Error> {
        if ids.is_empty() {
            return Err(ArgumentError::IdListRequired.into());
        }

        self.remove_by(
            &Criteria::new().field(K::PRIMARY_KEY, ids.to_vec()),
            LogicalOp::And,
            removed_at,
        )
    }

    fn remove_all(&self, removed_at: Option<Timestamp>) -> Result<u64, Error> {
        self.remove_by(&Criteria::new(), LogicalOp::And, removed_at)
    }
}

impl<K, E, S> PhysicalDelete for RemovableRepository<K, E, S>
where
    K: RemovableKind,
    E: ExecutionEngine,
    S: SchemaMetadata,
{
    fn delete_by(&self, criteria: &Criteria, top: LogicalOp) -> Result<u64, Error> {
        self.base.delete_by(criteria, top)
    }

    fn delete_by_id(&self, id: Value) -> Result<u64, Error> {
        self.base.delete_by_id(id)
    }

    fn delete_by_ids(&self, ids: &[Value]) -> Result<u64, Error> {
        self.base.delete_by_ids(ids)
    }

    fn delete_all(&self) -> Result<u64, Error> {
        self.base.delete_all()
    }
}
