//! # oxide-query-core
//!
//! Translates a document-style query description — a JSON-shaped spec of
//! projection, filtering, sorting, grouping, joining, and aggregation —
//! into a typed, relational query plan against a schema the embedding
//! application supplies.
//!
//! This crate is the *core* of such a system: it does not render SQL, does
//! not open a connection, and does not decode result rows. It consumes a
//! [`Schema`] view and a [`QueryRequest`] and produces a [`QueryPlan`] —
//! plain, immutable data a downstream SQL-building layer pattern-matches on.
//!
//! ## Quick start
//!
//! ```
//! use oxide_query_core::{compile, QueryRequest};
//! use oxide_query_core::schema::{ColumnHandle, RelationHandle, Schema};
//!
//! struct Demo;
//! impl Schema for Demo {
//!     fn column(&self, name: &str) -> Option<ColumnHandle> {
//!         (name == "age").then(|| ColumnHandle {
//!             name: "age".into(),
//!             is_array: false,
//!             element_type: None,
//!             identity: "age".into(),
//!         })
//!     }
//!     fn relation(&self, _name: &str) -> Option<RelationHandle> { None }
//!     fn column_names(&self) -> Vec<String> { vec!["age".into()] }
//!     fn relation_names(&self) -> Vec<String> { vec![] }
//! }
//!
//! let request = QueryRequest {
//!     criteria: Some(serde_json::json!({ "age": { "$gte": 18 } }).into()),
//!     ..QueryRequest::default()
//! };
//! let plan = compile(&Demo, request).unwrap();
//! assert!(!matches!(plan.predicate, oxide_query_core::plan::PredicateNode::True));
//! ```

pub mod canon;
pub mod compile;
pub mod error;
pub mod parse;
pub mod plan;
pub mod schema;
pub mod value;

pub use error::{QueryError, Result};
pub use schema::Schema;
pub use value::Surface;

use canon::{CanonAggregate, CanonCriteria, CanonJoin, CanonOrder, CanonProjection};
use plan::QueryPlan;

/// A full request: each clause is optional surface JSON, absent clauses
/// behaving exactly as the empty/none surface form for that clause.
#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    /// The projection clause (§4.1).
    pub projection: Option<Surface>,
    /// The sort clause (§4.2).
    pub sort: Option<Surface>,
    /// The group clause (§4.2).
    pub group: Option<Surface>,
    /// The criteria clause (§4.3).
    pub criteria: Option<Surface>,
    /// The join clause (§4.4).
    pub join: Option<Surface>,
    /// The aggregate clause (§4.5).
    pub aggregate: Option<Surface>,
}

/// Parses and compiles every clause of a request against `schema`, in one
/// step.
///
/// Translation aborts on the first error (see [`QueryError`]): nothing is
/// partially applied.
pub fn compile(schema: &dyn Schema, request: QueryRequest) -> Result<QueryPlan> {
    let projection: CanonProjection =
        parse::parse_projection(request.projection.unwrap_or(Surface::Null))?;
    let sort: CanonOrder = parse::parse_order(request.sort.unwrap_or(Surface::Null))?;
    let group: CanonOrder = parse::parse_order(request.group.unwrap_or(Surface::Null))?;
    let criteria: CanonCriteria = parse::parse_criteria(request.criteria.unwrap_or(Surface::Null))?;
    let join: CanonJoin = parse::parse_join(request.join.unwrap_or(Surface::Null))?;
    let aggregate: CanonAggregate =
        parse::parse_aggregate(request.aggregate.unwrap_or(Surface::Null))?;

    Ok(QueryPlan {
        projection: compile::compile_projection(schema, &projection)?,
        sort: compile::compile_sort(schema, &sort)?,
        group: compile::compile_group(schema, &group)?,
        predicate: compile::compile_criteria(schema, &criteria)?,
        join: compile::compile_join(schema, &join)?,
        aggregate: compile::compile_aggregate(schema, &aggregate)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tests_support::MockSchema;

    #[test]
    fn test_compiles_an_empty_request_to_an_all_pass_plan() {
        let plan = compile(&MockSchema::people(), QueryRequest::default()).unwrap();
        assert!(plan.projection.is_empty());
        assert!(plan.sort.is_empty());
        assert!(plan.group.is_empty());
        assert_eq!(plan.predicate, plan::PredicateNode::True);
        assert_eq!(plan.join.len(), 2); // nothing requested: both relations demoted
        assert!(plan.aggregate.is_empty());
    }

    #[test]
    fn test_propagates_the_first_error() {
        let request = QueryRequest {
            criteria: Some(serde_json::json!({"nope": 1}).into()),
            ..QueryRequest::default()
        };
        let err = compile(&MockSchema::people(), request).unwrap_err();
        assert!(matches!(err, QueryError::UnknownField(_)));
    }
}
