//! §4.2 — Sort/Group compiler.

use tracing::debug;

use crate::canon::CanonOrder;
use crate::error::{QueryError, Result};
use crate::plan::{GroupPlan, SortKey, SortPlan};
use crate::schema::Schema;

/// Compiles a normalized sort clause: validates every field and emits an
/// order-preserving sequence of `(column, direction)`.
pub fn compile_sort(schema: &dyn Schema, sort: &CanonOrder) -> Result<SortPlan> {
    debug!(entries = sort.entries.len(), "compiling sort");
    sort.entries
        .iter()
        .map(|(name, direction)| {
            resolve(schema, name).map(|column| SortKey {
                column,
                direction: *direction,
            })
        })
        .collect()
}

/// Compiles a normalized group clause: identical validation to
/// [`compile_sort`], but direction is discarded — grouping has none.
pub fn compile_group(schema: &dyn Schema, group: &CanonOrder) -> Result<GroupPlan> {
    debug!(entries = group.entries.len(), "compiling group");
    group
        .entries
        .iter()
        .map(|(name, _direction)| resolve(schema, name))
        .collect()
}

fn resolve(schema: &dyn Schema, name: &str) -> Result<crate::schema::ColumnHandle> {
    schema
        .column(name)
        .ok_or_else(|| QueryError::UnknownField(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::Direction;
    use crate::parse::parse_order;
    use crate::schema::tests_support::MockSchema;
    use crate::value::Surface;

    #[test]
    fn test_sort_preserves_order_and_direction() {
        let schema = MockSchema::people();
        let sort = parse_order(Surface::Text("age-,name".into())).unwrap();
        let plan = compile_sort(&schema, &sort).unwrap();
        assert_eq!(plan[0].column.name, "age");
        assert_eq!(plan[0].direction, Direction::Desc);
        assert_eq!(plan[1].column.name, "name");
        assert_eq!(plan[1].direction, Direction::Asc);
    }

    #[test]
    fn test_group_discards_direction() {
        let schema = MockSchema::people();
        let group = parse_order(Surface::Text("age-,name".into())).unwrap();
        let plan = compile_group(&schema, &group).unwrap();
        assert_eq!(plan[0].name, "age");
        assert_eq!(plan[1].name, "name");
    }

    #[test]
    fn test_unknown_field_fails() {
        let schema = MockSchema::people();
        let sort = parse_order(Surface::Text("nope".into())).unwrap();
        let err = compile_sort(&schema, &sort).unwrap_err();
        assert!(matches!(err, QueryError::UnknownField(_)));
    }
}
