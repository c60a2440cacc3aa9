use crate::query::{
    field::AliasContext,
    predicate::Predicate,
};
use serde::{Deserialize, Serialize};

/// Merge a compiled base predicate with an injected extra predicate.
///
/// When both are present the result is a fresh top-level AND regardless of
/// the base's own root operator: an OR-composed base becomes one operand of
/// the surrounding AND with its grouping intact, so injected predicates
/// (the soft-delete flag, most importantly) are never weakened by a
/// caller-chosen OR.
#[must_use]
pub fn merge(base: Option<Predicate>, extra: Option<Predicate>) -> Option<Predicate> {
    match (base, extra) {
        (Some(base), Some(extra)) => Some(Predicate::and(vec![base, extra])),
        (Some(one), None) | (None, Some(one)) => Some(one),
        (None, None) => None,
    }
}

///
/// OrderSpec
///
/// Ordered (field, direction) pairs. Fields are qualified through the alias
/// context before reaching the execution engine; ordering never affects
/// predicate compilation.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub fields: Vec<(String, OrderDirection)>,
}

impl OrderSpec {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append an ascending sort key.
    #[must_use]
    pub fn asc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), OrderDirection::Asc));
        self
    }

    /// Append a descending sort key.
    #[must_use]
    pub fn desc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), OrderDirection::Desc));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Qualify every sort field via the alias context.
    #[must_use]
    pub fn qualified(&self, ctx: &AliasContext) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|(field, direction)| (ctx.qualify(field), *direction))
                .collect(),
        }
    }
}

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::predicate::CompareOp;

    #[test]
    fn merge_identities() {
        let one = Predicate::comparison("e.removed", CompareOp::Eq, "removed");

        assert_eq!(merge(None, None), None);
        assert_eq!(merge(Some(one.clone()), None), Some(one.clone()));
        assert_eq!(merge(None, Some(one.clone())), Some(one));
    }

    #[test]
    fn merge_wraps_or_base_under_and() {
        let base = Predicate::or(vec![
            Predicate::comparison("e.a", CompareOp::Eq, "a"),
            Predicate::comparison("e.b", CompareOp::Eq, "b"),
        ]);
        let extra = Predicate::comparison("e.removed", CompareOp::Eq, "removed");

        let merged = merge(Some(base.clone()), Some(extra.clone())).unwrap();
        assert_eq!(merged, Predicate::and(vec![base, extra]));
    }

    #[test]
    fn order_fields_are_qualified() {
        let ctx = AliasContext::new("e", std::collections::BTreeSet::new());
        let order = OrderSpec::new().asc("name").desc("x.created");

        assert_eq!(
            order.qualified(&ctx),
            OrderSpec {
                fields: vec![
                    ("e.name".to_string(), OrderDirection::Asc),
                    ("x.created".to_string(), OrderDirection::Desc),
                ],
            }
        );
    }
}
