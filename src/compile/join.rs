//! §4.4 — Join compiler.

use tracing::debug;

use crate::canon::CanonJoin;
use crate::error::{QueryError, Result};
use crate::plan::{JoinPlan, LazyLoadDirective};
use crate::schema::Schema;

/// Compiles a normalized join clause.
///
/// Validates that every requested relation exists, then emits a lazy-load
/// directive for every schema relation that was *not* requested. Requested
/// relations are left to the backend's default (eager) loading — the core
/// only ever demotes relations to lazy, it never promotes them.
pub fn compile_join(schema: &dyn Schema, join: &CanonJoin) -> Result<JoinPlan> {
    debug!(requested = join.relations.len(), "compiling join");

    for name in &join.relations {
        if schema.relation(name).is_none() {
            return Err(QueryError::UnknownRelation(name.clone()));
        }
    }

    schema
        .relation_names()
        .into_iter()
        .filter(|name| !join.relations.contains(name))
        .map(|name| {
            schema
                .relation(&name)
                .ok_or_else(|| QueryError::UnknownRelation(name.clone()))
                .map(|relation| LazyLoadDirective { relation })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_join;
    use crate::schema::tests_support::MockSchema;
    use crate::value::Surface;

    #[test]
    fn test_demotes_only_non_requested_relations() {
        let schema = MockSchema::people();
        let join = parse_join(Surface::Text("posts".into())).unwrap();
        let plan = compile_join(&schema, &join).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].relation.name, "profile");
    }

    #[test]
    fn test_requesting_everything_demotes_nothing() {
        let schema = MockSchema::people();
        let join = parse_join(Surface::Text("posts,profile".into())).unwrap();
        let plan = compile_join(&schema, &join).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_unknown_relation_fails() {
        let schema = MockSchema::people();
        let join = parse_join(Surface::Text("nope".into())).unwrap();
        let err = compile_join(&schema, &join).unwrap_err();
        assert!(matches!(err, QueryError::UnknownRelation(_)));
    }
}
