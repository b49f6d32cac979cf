//! §4.5 — Aggregate compiler.

use tracing::debug;

use crate::canon::{AggExpr, AggInner, AggOp, CanonAggregate};
use crate::compile::predicate::compile_object;
use crate::error::{QueryError, Result};
use crate::plan::{AggCall, AggOperand, AggregatePlan, Selectable};
use crate::schema::{ColumnHandle, Schema};

/// Compiles a normalized aggregate spec into an ordered sequence of labeled
/// selectables.
pub fn compile_aggregate(schema: &dyn Schema, agg: &CanonAggregate) -> Result<AggregatePlan> {
    debug!(fields = agg.fields.len(), "compiling aggregate");
    agg.fields
        .iter()
        .map(|(label, expr)| compile_expr(schema, label, expr))
        .collect()
}

fn compile_expr(schema: &dyn Schema, label: &str, expr: &AggExpr) -> Result<Selectable> {
    let call = match expr {
        AggExpr::ColumnRef(name) => AggCall::Column(resolve(schema, name)?),
        AggExpr::Op { op, inner } => match inner {
            // `$sum: 1` is plain COUNT(); any other integer scales it.
            // The parser only admits an int literal under `$sum`, so this
            // arm never sees another operator.
            AggInner::IntLiteral(n) => {
                if *n == 1 {
                    AggCall::Count
                } else {
                    AggCall::CountScaled(*n)
                }
            }
            AggInner::Column(name) => {
                let operand = AggOperand::Column(resolve(schema, name)?);
                wrap(*op, operand)
            }
            AggInner::Criteria(canon) => {
                let predicate = compile_object(schema, &canon.0)?;
                wrap(*op, AggOperand::BoolToInt(predicate))
            }
        },
    };
    Ok(Selectable {
        label: label.to_string(),
        call,
    })
}

fn wrap(op: AggOp, operand: AggOperand) -> AggCall {
    match op {
        AggOp::Min => AggCall::Min(Box::new(operand)),
        AggOp::Max => AggCall::Max(Box::new(operand)),
        AggOp::Avg => AggCall::Avg(Box::new(operand)),
        AggOp::Sum => AggCall::Sum(Box::new(operand)),
    }
}

fn resolve(schema: &dyn Schema, name: &str) -> Result<ColumnHandle> {
    schema
        .column(name)
        .ok_or_else(|| QueryError::UnknownField(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_aggregate;
    use crate::plan::{AggCall, AggOperand};
    use crate::schema::tests_support::MockSchema;
    use crate::value::Surface;
    use serde_json::json;

    fn compile(value: serde_json::Value) -> AggregatePlan {
        let surface: Surface = value.into();
        let canon = parse_aggregate(surface).unwrap();
        compile_aggregate(&MockSchema::people(), &canon).unwrap()
    }

    #[test]
    fn test_sum_one_is_bare_count() {
        let plan = compile(json!({"total": {"$sum": 1}}));
        assert_eq!(plan[0].label, "total");
        assert_eq!(plan[0].call, AggCall::Count);
    }

    #[test]
    fn test_sum_n_scales_count() {
        let plan = compile(json!({"total": {"$sum": 3}}));
        assert_eq!(plan[0].call, AggCall::CountScaled(3));
    }

    #[test]
    fn test_column_reference_resolves_plain_column() {
        let plan = compile(json!({"oldest": "age"}));
        assert!(matches!(plan[0].call, AggCall::Column(_)));
    }

    #[test]
    fn test_max_of_column() {
        let plan = compile(json!({"oldest": {"$max": "age"}}));
        assert!(matches!(plan[0].call, AggCall::Max(_)));
    }

    #[test]
    fn test_sum_of_embedded_predicate_casts_bool_to_int() {
        let plan = compile(json!({"adults": {"$sum": {"age": {"$gte": 18}}}}));
        let AggCall::Sum(operand) = &plan[0].call else {
            panic!("expected Sum");
        };
        assert!(matches!(**operand, AggOperand::BoolToInt(_)));
    }

    #[test]
    fn test_unknown_column_fails() {
        let surface: Surface = json!({"oldest": "nope"}).into();
        let canon = parse_aggregate(surface).unwrap();
        let err = compile_aggregate(&MockSchema::people(), &canon).unwrap_err();
        assert!(matches!(err, QueryError::UnknownField(_)));
    }
}
