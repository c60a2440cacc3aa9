
use crate::{
    criteria::{Criteria, CriterionValue, Descriptor, LikePosition, Operator},
    query::{
        field::{AliasContext, strip_alias},
        like::like_clause,
        predicate::{Bindings, CompareOp, LogicalOp, Predicate},
    },
    value::Value,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Compiled
///
/// Output of one compile call: an optional predicate tree plus its parameter
/// bindings. A `None` predicate means "no filtering", never "match nothing";
/// callers must check it explicitly.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Compiled {
    pub predicate: Option<Predicate>,
    pub bindings: Bindings,
}

///
/// CriterionError
///
/// A criterion that cannot be compiled: a LIKE operator targeting an
/// association field, or a LIKE value that is not text.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CriterionError {
    #[error(
        "criteria field \"{field}\" is an association so \"like\" is not suitable for it, use \"eq\" instead"
    )]
    AssociationLike { field: String },

    #[error(
        "expected a string value for operator \"like\" in criteria field \"{field}\", but got \"{found}\""
    )]
    PatternNotText { field: String, found: &'static str },
}

/// Compile criteria into a predicate tree with equality-style defaults.
pub fn compile(
    criteria: &Criteria,
    ctx: &AliasContext,
    top: LogicalOp,
) -> Result<Compiled, CriterionError> {
    let mut bindings = Bindings::new();
    let predicate = compile_into(criteria, ctx, top, &DefaultClauses, &mut bindings)?;

    Ok(Compiled {
        predicate,
        bindings,
    })
}

/// Compile criteria treating bare text scalars as LIKE matches at `pos`.
///
/// Association fields are dropped from the traversal entirely; pattern
/// matching has no meaning for them and optional search input should not
/// hard-fail a lookup that never asked for it.
pub fn compile_like(
    criteria: &Criteria,
    ctx: &AliasContext,
    top: LogicalOp,
    pos: Option<LikePosition>,
) -> Result<Compiled, CriterionError> {
    let mut bindings = Bindings::new();
    let predicate = compile_into(criteria, ctx, top, &LikeClauses { pos }, &mut bindings)?;

    Ok(Compiled {
        predicate,
        bindings,
    })
}

///
/// ClauseBuilder
///
/// Strategy for turning a bare scalar criterion into a clause. One
/// implementation for the default (equality) traversal, one for the
/// LIKE-aware traversal; everything else dispatches identically.
///

pub(crate) trait ClauseBuilder {
    /// Whether association fields participate in the traversal at all.
    fn retains_associations(&self) -> bool {
        true
    }

    fn scalar_clause(
        &self,
        field: &str,
        key: &str,
        value: &Value,
        is_association: bool,
        bindings: &mut Bindings,
    ) -> Result<Option<Predicate>, CriterionError>;
}

pub(crate) struct DefaultClauses;

impl ClauseBuilder for DefaultClauses {
    fn scalar_clause(
        &self,
        field: &str,
        key: &str,
        value: &Value,
        _is_association: bool,
        bindings: &mut Bindings,
    ) -> Result<Option<Predicate>, CriterionError> {
        let key = bindings.bind(key, value.clone());

        Ok(Some(Predicate::comparison(field, CompareOp::Eq, key)))
    }
}

pub(crate) struct LikeClauses {
    pub pos: Option<LikePosition>,
}

impl ClauseBuilder for LikeClauses {
    fn retains_associations(&self) -> bool {
        false
    }

    fn scalar_clause(
        &self,
        field: &str,
        key: &str,
        value: &Value,
        is_association: bool,
        bindings: &mut Bindings,
    ) -> Result<Option<Predicate>, CriterionError> {
        if is_association || value.is_unset() {
            return Ok(None);
        }

        like_clause(field, key, self.pos, value, false, bindings).map(Some)
    }
}

/// Core traversal shared by both public entry points and the soft-delete
/// overlay, which threads one `Bindings` through two compile passes so key
/// uniqueness holds across the merged tree.
pub(crate) fn compile_into(
    criteria: &Criteria,
    ctx: &AliasContext,
    top: LogicalOp,
    builder: &dyn ClauseBuilder,
    bindings: &mut Bindings,
) -> Result<Option<Predicate>, CriterionError> {
    if criteria.is_empty() {
        return Ok(None);
    }

    let mut clauses = Vec::new();

    for (field, criterion) in criteria.iter() {
        let is_association = ctx.is_association(field);
        if is_association && !builder.retains_associations() {
            continue;
        }

        let key = strip_alias(field);
        let qualified = ctx.qualify(field);

        let clause = match criterion {
            CriterionValue::Null => Some(Predicate::NullCheck {
                field: qualified,
                is_null: true,
            }),
            CriterionValue::List(items) => {
                Some(set_membership(qualified, key, items.clone(), bindings))
            }
            CriterionValue::Scalar(value) => {
                builder.scalar_clause(&qualified, key, value, is_association, bindings)?
            }
            CriterionValue::Descriptor(descriptor) => {
                descriptor_clause(&qualified, key, descriptor, is_association, bindings)?
            }
        };

        // a field that yields no clause is omitted entirely
        if let Some(clause) = clause {
            clauses.push(clause);
        }
    }

    if clauses.is_empty() {
        return Ok(None);
    }

    Ok(Some(Predicate::Logical {
        op: top,
        children: clauses,
    }))
}

fn set_membership(field: String, key: &str, items: Vec<Value>, bindings: &mut Bindings) -> Predicate {
    let key = bindings.bind(key, Value::List(items));

    Predicate::SetMembership { field, key }
}

fn descriptor_clause(
    field: &str,
    key: &str,
    descriptor: &Descriptor,
    is_association: bool,
    bindings: &mut Bindings,
) -> Result<Option<Predicate>, CriterionError> {
    match descriptor.operator {
        Operator::Like => {
            if is_association {
                return Err(CriterionError::AssociationLike {
                    field: strip_alias(field).to_string(),
                });
            }

            // blank search-box input passes through as a no-op filter; a
            // present but non-text value is still a hard error downstream
            if descriptor.value.is_unset() {
                return Ok(None);
            }

            like_clause(field, key, descriptor.pos, &descriptor.value, false, bindings).map(Some)
        }
        Operator::Is => Ok(Some(Predicate::NullCheck {
            field: field.to_string(),
            is_null: descriptor.value == Value::Null,
        })),
        Operator::In => {
            let items = match &descriptor.value {
                Value::List(items) => items.clone(),
                other => vec![other.clone()],
            };

            Ok(Some(set_membership(field.to_string(), key, items, bindings)))
        }
        op => {
            // associations only support equality-style comparison; any other
            // requested operator is downgraded to eq rather than rejected
            let op = if is_association {
                CompareOp::Eq
            } else {
                match op {
                    Operator::Ne => CompareOp::Ne,
                    Operator::Lt => CompareOp::Lt,
                    Operator::Lte => CompareOp::Lte,
                    Operator::Gt => CompareOp::Gt,
                    Operator::Gte => CompareOp::Gte,
                    _ => CompareOp::Eq,
                }
            };

            let key = bindings.bind(key, descriptor.value.clone());

            Ok(Some(Predicate::comparison(field, op, key)))
        }
    }
}
