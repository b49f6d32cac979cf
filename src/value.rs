//! The permissive, JSON-shaped values the DSL surface accepts.
//!
//! `Surface` plays the role `SqlValue` plays in a query builder: a small,
//! closed value type that every clause parser and compiler passes around.
//! Unlike `SqlValue`, it also needs `Array` and `Object` variants, since the
//! surface syntax is a document-query DSL, not a single scalar parameter.

use indexmap::IndexMap;
use serde_json::Value as Json;

/// A JSON-compatible value accepted anywhere in the DSL surface.
///
/// Ordering of object keys is preserved end to end (backed by
/// [`indexmap::IndexMap`]) because sort, group, and aggregate specs are
/// order-sensitive per their canonical forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    /// JSON `null`, or the absence of a clause.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON integer (no fractional part).
    Int(i64),
    /// JSON number with a fractional part.
    Float(f64),
    /// JSON string.
    Text(String),
    /// JSON array.
    Array(Vec<Surface>),
    /// JSON object, with insertion order preserved.
    Object(IndexMap<String, Surface>),
}

impl Surface {
    /// Whether this value is a list (array), relevant to the `$in`/`$all`/
    /// array-vs-scalar operator dispatch.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Surface::Array(_))
    }

    /// Whether this value is an object, i.e. an operator map rather than a
    /// leaf value.
    #[must_use]
    pub fn as_object(&self) -> Option<&IndexMap<String, Surface>> {
        match self {
            Surface::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Whether this value is an array, returning its elements.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Surface]> {
        match self {
            Surface::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Surface::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value is an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Surface::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this value is empty/absent, in the sense used by
    /// "none/empty" surface-form rules (`Null`, empty string, empty array,
    /// empty object).
    #[must_use]
    pub fn is_empty_input(&self) -> bool {
        match self {
            Surface::Null => true,
            Surface::Text(s) => s.is_empty(),
            Surface::Array(items) => items.is_empty(),
            Surface::Object(map) => map.is_empty(),
            Surface::Bool(_) | Surface::Int(_) | Surface::Float(_) => false,
        }
    }

    /// Python-style truthiness, used for `$exists` and for detecting
    /// inclusion-vs-exclusion mode from object projection values.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Surface::Null => false,
            Surface::Bool(b) => *b,
            Surface::Int(n) => *n != 0,
            Surface::Float(f) => *f != 0.0,
            Surface::Text(s) => !s.is_empty(),
            Surface::Array(items) => !items.is_empty(),
            Surface::Object(map) => !map.is_empty(),
        }
    }
}

impl From<Json> for Surface {
    fn from(value: Json) -> Self {
        match value {
            Json::Null => Surface::Null,
            Json::Bool(b) => Surface::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Surface::Int(i)
                } else {
                    Surface::Float(n.as_f64().unwrap_or_default())
                }
            }
            Json::String(s) => Surface::Text(s),
            Json::Array(items) => Surface::Array(items.into_iter().map(Surface::from).collect()),
            Json::Object(map) => Surface::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Surface::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Surface> for Json {
    fn from(value: Surface) -> Self {
        match value {
            Surface::Null => Json::Null,
            Surface::Bool(b) => Json::Bool(b),
            Surface::Int(n) => Json::Number(n.into()),
            Surface::Float(f) => {
                serde_json::Number::from_f64(f).map_or(Json::Null, Json::Number)
            }
            Surface::Text(s) => Json::String(s),
            Surface::Array(items) => Json::Array(items.into_iter().map(Json::from).collect()),
            Surface::Object(map) => {
                Json::Object(map.into_iter().map(|(k, v)| (k, Json::from(v))).collect())
            }
        }
    }
}
