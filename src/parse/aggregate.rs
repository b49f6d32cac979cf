//! §4.5 — Aggregate surface parser.

use tracing::debug;

use crate::canon::{AggExpr, AggInner, AggOp, CanonAggregate, CanonCriteria};
use crate::error::{QueryError, Result};
use crate::value::Surface;

const CLAUSE: &str = "aggregate";

/// Parses an aggregate clause: none/empty → no aggregate expressions; an
/// ordered map `output_field → expr`, where `expr` is a column name string
/// or a single-operator object.
pub fn parse_aggregate(input: Surface) -> Result<CanonAggregate> {
    if input.is_empty_input() {
        debug!(clause = CLAUSE, "empty aggregate");
        return Ok(CanonAggregate::default());
    }
    let Surface::Object(map) = input else {
        return Err(QueryError::Shape {
            clause: CLAUSE,
            detail: "aggregate spec must be one of: none, object".to_string(),
        });
    };

    let mut fields = indexmap::IndexMap::new();
    for (output_field, expr) in map {
        let parsed = parse_expr(&output_field, expr)?;
        fields.insert(output_field, parsed);
    }
    Ok(CanonAggregate { fields })
}

fn parse_expr(output_field: &str, expr: Surface) -> Result<AggExpr> {
    match expr {
        Surface::Text(column) => Ok(AggExpr::ColumnRef(column)),
        Surface::Object(map) => {
            if map.len() != 1 {
                return Err(agg_shape_err(
                    output_field,
                    "expression can only contain a single operator",
                ));
            }
            let (op_token, operand) = map.into_iter().next().expect("len checked above");
            let op = parse_op(output_field, &op_token)?;
            let inner = parse_inner(output_field, op, operand)?;
            Ok(AggExpr::Op { op, inner })
        }
        _ => Err(agg_shape_err(
            output_field,
            "expression should be either a column name, or an object",
        )),
    }
}

fn parse_op(output_field: &str, token: &str) -> Result<AggOp> {
    match token {
        "$min" => Ok(AggOp::Min),
        "$max" => Ok(AggOp::Max),
        "$avg" => Ok(AggOp::Avg),
        "$sum" => Ok(AggOp::Sum),
        other => Err(agg_shape_err(
            output_field,
            &format!("unsupported operator \"{other}\""),
        )),
    }
}

fn parse_inner(output_field: &str, op: AggOp, operand: Surface) -> Result<AggInner> {
    match operand {
        Surface::Int(n) => {
            if op == AggOp::Sum {
                Ok(AggInner::IntLiteral(n))
            } else {
                Err(agg_shape_err(
                    output_field,
                    "an integer literal is only legal under $sum",
                ))
            }
        }
        Surface::Text(column) => Ok(AggInner::Column(column)),
        Surface::Object(map) => Ok(AggInner::Criteria(CanonCriteria(map))),
        _ => Err(agg_shape_err(
            output_field,
            "operand should be either a column name, an integer, or an object",
        )),
    }
}

fn agg_shape_err(field: &str, detail: &str) -> QueryError {
    QueryError::AggregateShape {
        field: field.to_string(),
        detail: detail.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_bare_column_reference() {
        let mut map = IndexMap::new();
        map.insert("oldest".to_string(), Surface::Text("age".into()));
        let canon = parse_aggregate(Surface::Object(map)).unwrap();
        assert_eq!(
            canon.fields.get("oldest"),
            Some(&AggExpr::ColumnRef("age".into()))
        );
    }

    #[test]
    fn test_sum_of_one_is_count() {
        let mut inner = IndexMap::new();
        inner.insert("$sum".to_string(), Surface::Int(1));
        let mut map = IndexMap::new();
        map.insert("total".to_string(), Surface::Object(inner));
        let canon = parse_aggregate(Surface::Object(map)).unwrap();
        assert_eq!(
            canon.fields.get("total"),
            Some(&AggExpr::Op {
                op: AggOp::Sum,
                inner: AggInner::IntLiteral(1)
            })
        );
    }

    #[test]
    fn test_multi_operator_object_fails() {
        let mut inner = IndexMap::new();
        inner.insert("$sum".to_string(), Surface::Int(1));
        inner.insert("$avg".to_string(), Surface::Text("age".into()));
        let mut map = IndexMap::new();
        map.insert("bad".to_string(), Surface::Object(inner));
        let err = parse_aggregate(Surface::Object(map)).unwrap_err();
        assert!(matches!(err, QueryError::AggregateShape { .. }));
    }

    #[test]
    fn test_int_literal_under_non_sum_fails() {
        let mut inner = IndexMap::new();
        inner.insert("$max".to_string(), Surface::Int(5));
        let mut map = IndexMap::new();
        map.insert("bad".to_string(), Surface::Object(inner));
        let err = parse_aggregate(Surface::Object(map)).unwrap_err();
        assert!(matches!(err, QueryError::AggregateShape { .. }));
    }
}
