//! Error types for clause parsing and compilation.

use thiserror::Error;

/// Every way a clause can fail to parse or compile.
///
/// Translation of a request aborts entirely on the first error: nothing is
/// partially applied, and nothing is retried by this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The surface syntax did not match any accepted variant for the clause.
    #[error("invalid shape for {clause}: {detail}")]
    Shape {
        /// Name of the clause being parsed (`"projection"`, `"sort"`, ...).
        clause: &'static str,
        /// Human-readable detail about what was expected.
        detail: String,
    },

    /// A projection object mixed `0` and `1` values.
    #[error("projection mixes inclusion and exclusion for fields: {fields:?}")]
    MixedProjection {
        /// The offending field names, in the order they were given.
        fields: Vec<String>,
    },

    /// A referenced column name is not in the schema.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// A requested relation name is not in the schema.
    #[error("unknown relation `{0}`")]
    UnknownRelation(String),

    /// An operator was applied to an operand of a forbidden shape, e.g. `$in`
    /// without a list or `$all` on a non-array column.
    #[error("operator `{op}` on field `{field}`: {detail}")]
    OperatorConstraint {
        /// The operator token, e.g. `"$all"`.
        op: String,
        /// The field the operator was applied to.
        field: String,
        /// Human-readable detail about the constraint that was violated.
        detail: String,
    },

    /// An operator token outside the supported set.
    #[error("unknown operator `{0}`")]
    UnknownOperator(String),

    /// An aggregate expression object had more than one operator entry, or an
    /// operand of an unsupported shape.
    #[error("invalid aggregate expression for `{field}`: {detail}")]
    AggregateShape {
        /// The output field the aggregate expression was labeled with.
        field: String,
        /// Human-readable detail about the bad shape.
        detail: String,
    },

    /// A sort/group direction value other than `+1` or `-1`.
    #[error("sort/group direction must be +1 or -1, got {0}")]
    Direction(i64),
}

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, QueryError>;
