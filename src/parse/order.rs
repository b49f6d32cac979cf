//! §4.2 — Sort/Group surface parser (shared; Group uses the identical
//! shape, discarding direction at compile time).

use tracing::debug;

use crate::canon::{CanonOrder, Direction};
use crate::error::{QueryError, Result};
use crate::value::Surface;

const CLAUSE: &str = "sort/group";

/// Parses a sort or group clause from any of its accepted surface forms:
///
/// - none/empty → empty order;
/// - a string `"a,b-,c+"`;
/// - a list of such strings;
/// - an ordered map `{ field: ±1 }`.
pub fn parse_order(input: Surface) -> Result<CanonOrder> {
    if input.is_empty_input() {
        debug!(clause = CLAUSE, "empty order");
        return Ok(CanonOrder::default());
    }

    match input {
        Surface::Text(s) => {
            let entries = s.split(',').map(parse_token).collect::<Result<Vec<_>>>()?;
            Ok(CanonOrder { entries })
        }
        Surface::Array(items) => {
            let entries = items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| shape_err("list entries must be strings"))
                        .and_then(parse_token)
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(CanonOrder { entries })
        }
        Surface::Object(map) => {
            let entries = map
                .into_iter()
                .map(|(field, dir)| {
                    let n = dir
                        .as_int()
                        .ok_or_else(|| shape_err("order map values must be +1 or -1"))?;
                    direction_from_int(n).map(|d| (field, d))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(CanonOrder { entries })
        }
        _ => Err(shape_err(
            "must be one of: none, string, list of strings, ordered map",
        )),
    }
}

fn parse_token(token: &str) -> Result<(String, Direction)> {
    let token = token.trim();
    if let Some(field) = token.strip_suffix('-') {
        return Ok((field.to_string(), Direction::Desc));
    }
    if let Some(field) = token.strip_suffix('+') {
        return Ok((field.to_string(), Direction::Asc));
    }
    Ok((token.to_string(), Direction::Asc))
}

fn direction_from_int(n: i64) -> Result<Direction> {
    match n {
        1 => Ok(Direction::Asc),
        -1 => Ok(Direction::Desc),
        other => Err(QueryError::Direction(other)),
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
    use indexmap::IndexMap;

    #[test]
    fn test_string_list_and_map_forms_agree() {
        let from_string = parse_order(Surface::Text("age-,name".into())).unwrap();
        let from_list = parse_order(Surface::Array(vec![
            Surface::Text("age-".into()),
            Surface::Text("name".into()),
        ]))
        .unwrap();
        let mut map = IndexMap::new();
        map.insert("age".to_string(), Surface::Int(-1));
        map.insert("name".to_string(), Surface::Int(1));
        let from_map = parse_order(Surface::Object(map)).unwrap();

        assert_eq!(from_string, from_list);
        assert_eq!(from_string, from_map);
        assert_eq!(
            from_string.entries,
            vec![
                ("age".to_string(), Direction::Desc),
                ("name".to_string(), Direction::Asc),
            ]
        );
    }

    #[test]
    fn test_bad_direction_fails() {
        let mut map = IndexMap::new();
        map.insert("age".to_string(), Surface::Int(2));
        let err = parse_order(Surface::Object(map)).unwrap_err();
        assert_eq!(err, QueryError::Direction(2));
    }

    #[test]
    fn test_empty_order_is_empty() {
        assert_eq!(parse_order(Surface::Null).unwrap(), CanonOrder::default());
    }
}
