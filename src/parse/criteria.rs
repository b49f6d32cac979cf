//! §4.3 — Criteria surface parser.
//!
//! Parsing is intentionally trivial: a top-level object is the tree root.
//! The recursive structure (boolean combinators, per-field operator
//! dispatch) is resolved by the predicate compiler once a schema view is
//! available, since operator semantics depend on whether the target column
//! is array-typed.

use tracing::debug;

use crate::canon::CanonCriteria;
use crate::error::{QueryError, Result};
use crate::value::Surface;

const CLAUSE: &str = "criteria";

/// Parses a criteria clause: none/empty → the empty (always-true) criteria;
/// an object → the criteria tree root. Any other shape fails.
pub fn parse_criteria(input: Surface) -> Result<CanonCriteria> {
    if input.is_empty_input() {
        debug!(clause = CLAUSE, "empty criteria");
        return Ok(CanonCriteria::empty());
    }
    match input {
        Surface::Object(map) => Ok(CanonCriteria(map)),
        _ => Err(QueryError::Shape {
            clause: CLAUSE,
            detail: "criteria must be one of: none, object".to_string(),
        }),
    }
}
