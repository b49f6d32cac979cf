//! §4.3 — The predicate compiler.
//!
//! The recursive engine shared by Criteria and by the embedded expressions
//! inside Aggregate. Implements the boolean-combinator recursion and the
//! operator dispatch table, in particular the array/scalar asymmetry: the
//! same operator token means something different depending on whether the
//! target column is array-typed and whether the operand is a list.

use indexmap::IndexMap;
use tracing::trace;

use crate::canon::CanonCriteria;
use crate::error::{QueryError, Result};
use crate::plan::{CompareOp, PredicateNode};
use crate::schema::{ColumnHandle, Schema};
use crate::value::Surface;

const CLAUSE: &str = "criteria";

/// Compiles a normalized criteria clause into a predicate tree.
pub fn compile_criteria(schema: &dyn Schema, criteria: &CanonCriteria) -> Result<PredicateNode> {
    compile_object(schema, &criteria.0)
}

/// Compiles a single criteria object — the recursive step shared by `$or`/
/// `$and`/`$nor` children, `$not`'s operand, and (via [`compile_criteria`])
/// the top-level clause and aggregate-embedded predicates.
pub fn compile_object(schema: &dyn Schema, obj: &IndexMap<String, Surface>) -> Result<PredicateNode> {
    let mut conditions = Vec::new();

    for (key, value) in obj {
        trace!(key, "visiting criteria key");
        match key.as_str() {
            "$or" | "$and" | "$nor" => {
                let items = value
                    .as_array()
                    .ok_or_else(|| combinator_shape_err(key))?;
                if items.is_empty() {
                    continue; // empty combinator body contributes nothing
                }
                let compiled = items
                    .iter()
                    .map(|item| {
                        let sub = item
                            .as_object()
                            .ok_or_else(|| combinator_shape_err(key))?;
                        compile_object(schema, sub)
                    })
                    .collect::<Result<Vec<_>>>()?;
                let combined = combine(key, compiled);
                conditions.push(if key == "$nor" {
                    PredicateNode::Not(Box::new(combined))
                } else {
                    combined
                });
            }
            "$not" => {
                let sub = value
                    .as_object()
                    .ok_or_else(|| combinator_shape_err("$not"))?;
                let inner = compile_object(schema, sub)?;
                conditions.push(PredicateNode::Not(Box::new(inner)));
            }
            field => {
                let column = schema
                    .column(field)
                    .ok_or_else(|| QueryError::UnknownField(field.to_string()))?;
                for (op, operand) in field_operators(value) {
                    conditions.push(compile_operator(&column, op, operand)?);
                }
            }
        }
    }

    Ok(match conditions.len() {
        0 => PredicateNode::True,
        1 => conditions.into_iter().next().expect("len checked above"),
        _ => PredicateNode::And(conditions),
    })
}

/// `$or`/`$and` combine their (non-empty) compiled children; a single child
/// is returned unwrapped, matching the source's `or_(*criteria)` /
/// `and_(*criteria)` behavior with one argument. `$nor` always combines via
/// `Or` before the caller negates it.
fn combine(key: &str, mut compiled: Vec<PredicateNode>) -> PredicateNode {
    if compiled.len() == 1 {
        return compiled.pop().expect("len checked above");
    }
    if key == "$and" {
        PredicateNode::And(compiled)
    } else {
        PredicateNode::Or(compiled)
    }
}

/// A bare scalar value under a field key is sugar for `{ $eq: value }`;
/// multiple operator entries in the same object are independent conditions,
/// combined by AND at the caller.
fn field_operators(value: &Surface) -> Vec<(&str, &Surface)> {
    match value {
        Surface::Object(map) => map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        scalar => vec![("$eq", scalar)],
    }
}

/// The operator dispatch table: `(operator, column.is_array, operand.is_list)`.
fn compile_operator(column: &ColumnHandle, op: &str, value: &Surface) -> Result<PredicateNode> {
    let is_array = column.is_array;
    let is_list = value.is_list();

    match op {
        "$eq" => Ok(if is_array && !is_list {
            PredicateNode::ArrayContainsElement {
                column: column.clone(),
                value: value.clone(),
            }
        } else {
            PredicateNode::Compare {
                column: column.clone(),
                op: CompareOp::Eq,
                value: value.clone(),
            }
        }),
        "$ne" => Ok(if is_array && !is_list {
            PredicateNode::ArrayAllNotEqual {
                column: column.clone(),
                value: value.clone(),
            }
        } else {
            PredicateNode::Compare {
                column: column.clone(),
                op: CompareOp::Ne,
                value: value.clone(),
            }
        }),
        "$lt" => Ok(compare(column, CompareOp::Lt, value)),
        "$lte" => Ok(compare(column, CompareOp::Lte, value)),
        "$gte" => Ok(compare(column, CompareOp::Gte, value)),
        "$gt" => Ok(compare(column, CompareOp::Gt, value)),
        "$in" => {
            let values = require_list(column, op, value)?;
            Ok(if is_array {
                PredicateNode::ArrayOverlap {
                    column: column.clone(),
                    values,
                }
            } else {
                PredicateNode::In {
                    column: column.clone(),
                    values,
                }
            })
        }
        "$nin" => {
            let values = require_list(column, op, value)?;
            let inner = if is_array {
                PredicateNode::ArrayOverlap {
                    column: column.clone(),
                    values,
                }
            } else {
                PredicateNode::In {
                    column: column.clone(),
                    values,
                }
            };
            Ok(PredicateNode::Not(Box::new(inner)))
        }
        "$exists" => Ok(if value.is_truthy() {
            PredicateNode::IsNotNull {
                column: column.clone(),
            }
        } else {
            PredicateNode::IsNull {
                column: column.clone(),
            }
        }),
        "$all" => {
            if !is_array {
                return Err(constraint_err(
                    op,
                    &column.name,
                    "$all can only be applied to an array column",
                ));
            }
            let values = require_list(column, op, value)?;
            Ok(PredicateNode::ArrayContainsAll {
                column: column.clone(),
                values,
            })
        }
        "$size" => {
            if !is_array {
                return Err(constraint_err(
                    op,
                    &column.name,
                    "$size can only be applied to an array column",
                ));
            }
            Ok(if value.as_int() == Some(0) {
                PredicateNode::ArrayLengthIsNull {
                    column: column.clone(),
                }
            } else {
                PredicateNode::ArrayLengthEquals {
                    column: column.clone(),
                    value: value.clone(),
                }
            })
        }
        other => Err(QueryError::UnknownOperator(other.to_string())),
    }
}

fn compare(column: &ColumnHandle, op: CompareOp, value: &Surface) -> PredicateNode {
    PredicateNode::Compare {
        column: column.clone(),
        op,
        value: value.clone(),
    }
}

fn require_list(column: &ColumnHandle, op: &str, value: &Surface) -> Result<Vec<Surface>> {
    value
        .as_array()
        .map(<[Surface]>::to_vec)
        .ok_or_else(|| constraint_err(op, &column.name, "argument must be a list"))
}

fn constraint_err(op: &str, field: &str, detail: &str) -> QueryError {
    QueryError::OperatorConstraint {
        op: op.to_string(),
        field: field.to_string(),
        detail: detail.to_string(),
    }
}

fn combinator_shape_err(key: &str) -> QueryError {
    QueryError::Shape {
        clause: CLAUSE,
        detail: format!("{key} argument must be a list of objects (or an object, for $not)"),
    }
}
