use crate::value::Value;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

///
/// Predicate
///
/// Compiled boolean expression tree, ready for rendering by an execution
/// engine. Leaves reference binding keys, never literal values; that
/// indirection is what guarantees safe binding.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Comparison {
        field: String,
        op: CompareOp,
        key: String,
    },
    /// The whole member list is bound under one key as a single collection
    /// value. Engines that cannot bind collections natively expand it to
    /// positional parameters at render time; the node shape stays put.
    SetMembership { field: String, key: String },
    NullCheck { field: String, is_null: bool },
    Logical {
        op: LogicalOp,
        children: Vec<Predicate>,
    },
}

impl Predicate {
    #[must_use]
    pub const fn and(children: Vec<Self>) -> Self {
        Self::Logical {
            op: LogicalOp::And,
            children,
        }
    }

    #[must_use]
    pub const fn or(children: Vec<Self>) -> Self {
        Self::Logical {
            op: LogicalOp::Or,
            children,
        }
    }

    #[must_use]
    pub fn comparison(field: impl Into<String>, op: CompareOp, key: impl Into<String>) -> Self {
        Self::Comparison {
            field: field.into(),
            op,
            key: key.into(),
        }
    }

    /// Collect every binding key referenced by this tree.
    #[must_use]
    pub fn keys(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_keys(&mut out);
        out
    }

    fn collect_keys<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Self::Comparison { key, .. } | Self::SetMembership { key, .. } => {
                out.insert(key.as_str());
            }
            Self::NullCheck { .. } => {}
            Self::Logical { children, .. } => {
                for child in children {
                    child.collect_keys(out);
                }
            }
        }
    }
}

///
/// LogicalOp
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

///
/// CompareOp
///
/// Renderable comparison operators. These are the only operator tags an
/// execution engine ever sees; criteria-level `in` and `is` compile to
/// dedicated node kinds instead.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
}

impl CompareOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Like => "like",
        }
    }
}

///
/// Bindings
///
/// Parameter key → literal value. Every key referenced by a predicate tree
/// has exactly one entry here; keys are unique within one compiled tree and
/// collisions are resolved by numeric suffixing.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize, Deserialize)]
pub struct Bindings(#[into_iterator(owned, ref)] BTreeMap<String, Value>);

impl Bindings {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Bind `value` under `key`, suffixing on collision. Returns the key the
    /// value actually landed under; predicate leaves must reference that.
    pub fn bind(&mut self, key: &str, value: Value) -> String {
        let mut candidate = key.to_string();
        let mut n = 0u32;
        while self.0.contains_key(&candidate) {
            n += 1;
            candidate = format!("{key}_{n}");
        }
        self.0.insert(candidate.clone(), value);
        candidate
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bind_keeps_first_key_verbatim() {
        let mut bindings = Bindings::new();
        assert_eq!(bindings.bind("name", Value::from("a")), "name");
        assert_eq!(bindings.bind("name", Value::from("b")), "name_1");
        assert_eq!(bindings.bind("name", Value::from("c")), "name_2");
        assert_eq!(bindings.len(), 3);
    }

    #[test]
    fn keys_walks_the_whole_tree() {
        let tree = Predicate::and(vec![
            Predicate::or(vec![
                Predicate::comparison("e.name", CompareOp::Like, "name_0"),
                Predicate::comparison("e.name", CompareOp::Like, "name_1"),
            ]),
            Predicate::SetMembership {
                field: "e.id".to_string(),
                key: "id".to_string(),
            },
            Predicate::NullCheck {
                field: "e.tag".to_string(),
                is_null: true,
            },
        ]);

        let keys: Vec<&str> = tree.keys().into_iter().collect();
        assert_eq!(keys, vec!["id", "name_0", "name_1"]);
    }

    proptest! {
        #[test]
        fn bind_never_overwrites(keys in proptest::collection::vec("[a-z]{1,4}", 1..32)) {
            let mut bindings = Bindings::new();
            let mut seen = std::collections::BTreeSet::new();
            for (i, key) in keys.iter().enumerate() {
                let landed = bindings.bind(key, Value::Int(i as i64));
                prop_assert!(seen.insert(landed));
            }
            prop_assert_eq!(bindings.len(), keys.len());
        }
    }
}
