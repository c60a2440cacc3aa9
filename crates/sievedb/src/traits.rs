///
/// EntityKind
///
/// A named entity kind with a primary-key field. Implemented by the row
/// types an execution engine hydrates.
///

pub trait EntityKind: Sized {
    const ENTITY: &'static str;
    const PRIMARY_KEY: &'static str = "id";
}

///
/// RemovableKind
///
/// Entity kinds that carry the soft-delete marker pair.
///

pub trait RemovableKind: EntityKind {
    const MARKER: SoftDeleteMarker = SoftDeleteMarker::DEFAULT;
}

///
/// SoftDeleteMarker
///
/// The two well-known soft-delete field names: a boolean "removed" flag and
/// a "removed at" timestamp. Their semantics are owned by the overlay, not
/// by generic criteria.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SoftDeleteMarker {
    pub removed: &'static str,
    pub removed_at: &'static str,
}

impl SoftDeleteMarker {
    pub const DEFAULT: Self = Self {
        removed: "removed",
        removed_at: "removedAt",
    };
}
