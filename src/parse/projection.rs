//! §4.1 — Projection surface parser.

use indexmap::IndexSet;
use tracing::debug;

use crate::canon::{CanonProjection, ProjectionMode};
use crate::error::{QueryError, Result};
use crate::value::Surface;

const CLAUSE: &str = "projection";

/// Parses a projection clause from any of its accepted surface forms:
///
/// - none/empty → empty projection (select-all);
/// - a string of comma-separated field names, optionally prefixed by `+` or
///   `-`;
/// - an array of field names (inclusion);
/// - an object mapping field names to `0` or `1`.
pub fn parse_projection(input: Surface) -> Result<CanonProjection> {
    if input.is_empty_input() {
        debug!(clause = CLAUSE, "empty projection");
        return Ok(CanonProjection::empty());
    }

    match input {
        Surface::Text(s) => parse_string(&s),
        Surface::Array(items) => {
            let fields = items
                .into_iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| shape_err("array elements must be field name strings"))
                })
                .collect::<Result<IndexSet<String>>>()?;
            Ok(CanonProjection {
                mode: ProjectionMode::Include,
                fields,
            })
        }
        Surface::Object(map) => {
            let total: i64 = map
                .values()
                .map(|v| v.as_int().ok_or_else(|| shape_err("object projection values must be 0 or 1")))
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .sum();
            let len = i64::try_from(map.len()).unwrap_or(i64::MAX);
            if total != 0 && total != len {
                let fields: Vec<String> = map.keys().cloned().collect();
                return Err(QueryError::MixedProjection { fields });
            }
            let mode = if map.values().any(Surface::is_truthy) {
                ProjectionMode::Include
            } else {
                ProjectionMode::Exclude
            };
            Ok(CanonProjection {
                mode,
                fields: map.keys().cloned().collect(),
            })
        }
        _ => Err(shape_err(
            "projection must be one of: none, string, list of strings, object",
        )),
    }
}

fn parse_string(s: &str) -> Result<CanonProjection> {
    let (mode, body) = match s.chars().next() {
        Some('+') => (ProjectionMode::Include, &s[1..]),
        Some('-') => (ProjectionMode::Exclude, &s[1..]),
        _ => (ProjectionMode::Include, s),
    };
    let fields: IndexSet<String> = body.split(',').map(str::to_string).collect();
    Ok(CanonProjection { mode, fields })
}

fn shape_err(detail: &str) -> QueryError {
    QueryError::Shape {
        clause: CLAUSE,
        detail: detail.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_empty_projection_selects_all() {
        let p = parse_projection(Surface::Null).unwrap();
        assert_eq!(p, CanonProjection::empty());
    }

    #[test]
    fn test_string_list_and_object_forms_agree() {
        let from_string = parse_projection(Surface::Text("a,b".into())).unwrap();
        let from_plus = parse_projection(Surface::Text("+a,b".into())).unwrap();
        let from_list = parse_projection(Surface::Array(vec![
            Surface::Text("a".into()),
            Surface::Text("b".into()),
        ]))
        .unwrap();
        let mut obj = IndexMap::new();
        obj.insert("a".to_string(), Surface::Int(1));
        obj.insert("b".to_string(), Surface::Int(1));
        let from_object = parse_projection(Surface::Object(obj)).unwrap();

        assert_eq!(from_string, from_plus);
        assert_eq!(from_string, from_list);
        assert_eq!(from_string, from_object);
        assert_eq!(from_string.mode, ProjectionMode::Include);
    }

    #[test]
    fn test_exclude_string_and_object_agree() {
        let from_string = parse_projection(Surface::Text("-a,b".into())).unwrap();
        let mut obj = IndexMap::new();
        obj.insert("a".to_string(), Surface::Int(0));
        obj.insert("b".to_string(), Surface::Int(0));
        let from_object = parse_projection(Surface::Object(obj)).unwrap();
        assert_eq!(from_string, from_object);
        assert_eq!(from_string.mode, ProjectionMode::Exclude);
    }

    #[test]
    fn test_mixed_projection_values_fail() {
        let mut obj = IndexMap::new();
        obj.insert("a".to_string(), Surface::Int(1));
        obj.insert("b".to_string(), Surface::Int(0));
        let err = parse_projection(Surface::Object(obj)).unwrap_err();
        assert!(matches!(err, QueryError::MixedProjection { .. }));
    }
}
