use crate::{
    criteria::LikePosition,
    query::{
        compile::CriterionError,
        field::strip_alias,
        predicate::{Bindings, CompareOp, Predicate},
    },
    value::Value,
};

/// Expansion order when no position is specified. Fixed so query plans and
/// test assertions are reproducible.
pub(crate) const EXPANSION: [LikePosition; 3] = [
    LikePosition::Prefix,
    LikePosition::Middle,
    LikePosition::Suffix,
];

impl LikePosition {
    /// Render the LIKE template for `value`.
    #[must_use]
    pub fn pattern(self, value: &str) -> String {
        match self {
            Self::Prefix => format!("{value}%"),
            Self::Middle => format!("%{value}%"),
            Self::Suffix => format!("%{value}"),
        }
    }
}

/// Build the LIKE clause for one field.
///
/// A pinned position yields a single comparison; an unspecified position
/// yields an OR of all three, each bound under its own `key_<n>` derived key.
/// The literal must be text, and the caller must not route association
/// fields here; both misuses surface as [`CriterionError`].
pub(crate) fn like_clause(
    field: &str,
    key: &str,
    pos: Option<LikePosition>,
    value: &Value,
    is_association: bool,
    bindings: &mut Bindings,
) -> Result<Predicate, CriterionError> {
    if is_association {
        return Err(CriterionError::AssociationLike {
            field: strip_alias(field).to_string(),
        });
    }

    let Value::Text(text) = value else {
        return Err(CriterionError::PatternNotText {
            field: field.to_string(),
            found: value.kind(),
        });
    };

    match pos {
        Some(pos) => {
            let key = bindings.bind(key, Value::Text(pos.pattern(text)));
            Ok(Predicate::comparison(field, CompareOp::Like, key))
        }
        None => {
            let children = EXPANSION
                .iter()
                .enumerate()
                .map(|(index, pos)| {
                    let key =
                        bindings.bind(&format!("{key}_{index}"), Value::Text(pos.pattern(text)));
                    Predicate::comparison(field, CompareOp::Like, key)
                })
                .collect();
            Ok(Predicate::or(children))
        }
    }
}

///
/// TESTS
///
