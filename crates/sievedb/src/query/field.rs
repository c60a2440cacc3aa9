use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// AliasContext
///
/// Root alias plus the association field names supplied by the schema
/// metadata collaborator. A field that already carries an alias prefix is
/// never re-prefixed, and association classification always works on the
/// unqualified name.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AliasContext {
    root_alias: String,
    associations: BTreeSet<String>,
}

impl AliasContext {
    #[must_use]
    pub fn new(root_alias: impl Into<String>, associations: BTreeSet<String>) -> Self {
        Self {
            root_alias: root_alias.into(),
            associations,
        }
    }

    #[must_use]
    pub fn root_alias(&self) -> &str {
        &self.root_alias
    }

    /// Attach the root alias unless the field is already qualified or the
    /// alias is empty.
    #[must_use]
    pub fn qualify(&self, field: &str) -> String {
        if self.root_alias.is_empty() || has_alias(field) {
            field.to_string()
        } else {
            format!("{}.{field}", self.root_alias)
        }
    }

    /// Pure lookup against the supplied association names, computed on the
    /// unqualified field name.
    #[must_use]
    pub fn is_association(&self, field: &str) -> bool {
        self.associations.contains(strip_alias(field))
    }
}

/// Whether the field carries an alias prefix.
#[must_use]
pub fn has_alias(field: &str) -> bool {
    field.contains('.')
}

/// Inverse of qualification. Parameter keys are derived from this, so they
/// never carry alias prefixes.
#[must_use]
pub fn strip_alias(field: &str) -> &str {
    match field.find('.') {
        Some(pos) => &field[pos + 1..],
        None => field,
    }
}

///
/// TESTS
///
