//! §4.4 — Join surface parser.

use tracing::debug;

use crate::canon::CanonJoin;
use crate::error::{QueryError, Result};
use crate::value::Surface;

const CLAUSE: &str = "join";

/// Parses a join clause: none/empty → no relations requested;
/// comma-separated string; list of relation names.
pub fn parse_join(input: Surface) -> Result<CanonJoin> {
    if input.is_empty_input() {
        debug!(clause = CLAUSE, "no relations requested");
        return Ok(CanonJoin::default());
    }
    match input {
        Surface::Text(s) => Ok(CanonJoin {
            relations: s.split(',').map(str::to_string).collect(),
        }),
        Surface::Array(items) => {
            let relations = items
                .into_iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| shape_err("list entries must be relation name strings"))
                })
                .collect::<Result<_>>()?;
            Ok(CanonJoin { relations })
        }
        _ => Err(shape_err("must be one of: none, string, list of strings")),
    }
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

    #[test]
    fn test_string_and_list_agree() {
        let from_string = parse_join(Surface::Text("posts,profile".into())).unwrap();
        let from_list = parse_join(Surface::Array(vec![
            Surface::Text("posts".into()),
            Surface::Text("profile".into()),
        ]))
        .unwrap();
        assert_eq!(from_string, from_list);
        assert!(from_string.relations.contains("posts"));
        assert!(from_string.relations.contains("profile"));
    }

    #[test]
    fn test_empty_join_requests_nothing() {
        assert_eq!(parse_join(Surface::Null).unwrap(), CanonJoin::default());
    }
}
