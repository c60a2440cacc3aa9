use std::collections::{BTreeMap, BTreeSet};

///
/// SchemaMetadata
///
/// Association discovery, supplied by whatever owns the schema. Queried once
/// per compile call; caching, if any, belongs to the implementor.
///

pub trait SchemaMetadata {
    /// Field names of `entity` that reference another entity rather than
    /// holding a scalar value.
    fn association_fields(&self, entity: &str) -> BTreeSet<String>;
}

///
/// StaticSchema
///
/// Map-backed metadata for embedders without a live schema source, and for
/// tests.
///

#[derive(Clone, Debug, Default)]
pub struct StaticSchema {
    associations: BTreeMap<String, BTreeSet<String>>,
}

impl StaticSchema {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            associations: BTreeMap::new(),
        }
    }

    /// Register the association field names of one entity kind.
    #[must_use]
    pub fn entity<I, F>(mut self, name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.associations
            .insert(name.into(), fields.into_iter().map(Into::into).collect());
        self
    }
}

impl SchemaMetadata for StaticSchema {
    fn association_fields(&self, entity: &str) -> BTreeSet<String> {
        self.associations.get(entity).cloned().unwrap_or_default()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_entities_have_no_associations() {
        let schema = StaticSchema::new().entity("order", ["customer"]);

        assert!(schema.association_fields("order").contains("customer"));
        assert!(schema.association_fields("invoice").is_empty());
    }
}
