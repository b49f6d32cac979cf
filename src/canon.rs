//! Canonical clause forms: the normalized shape every surface syntax variant
//! parses down to, independent of which variant produced it.

use indexmap::{IndexMap, IndexSet};

use crate::value::Surface;

/// Whether a [`CanonProjection`] lists the fields to keep or the fields to
/// drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Only the listed fields are loaded.
    Include,
    /// Every field except the listed ones is loaded.
    Exclude,
}

/// A normalized projection: a mode plus the ordered set of named fields it
/// governs. Never mixes include and exclude fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonProjection {
    /// Inclusion or exclusion.
    pub mode: ProjectionMode,
    /// Fields the mode applies to, in the order the request gave them.
    pub fields: IndexSet<String>,
}

impl CanonProjection {
    /// The projection that selects every column (no directives emitted).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            mode: ProjectionMode::Include,
            fields: IndexSet::new(),
        }
    }
}

/// Ascending or descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `+1`.
    Asc,
    /// `-1`.
    Desc,
}

/// A normalized, order-preserving `(field, direction)` list.
///
/// Used identically for both Sort and Group; Group simply discards the
/// direction at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonOrder {
    /// The ordered `(field, direction)` pairs, in request order.
    pub entries: Vec<(String, Direction)>,
}

/// A normalized criteria tree: a validated JSON object (or the empty object,
/// for an absent criteria clause).
///
/// Unlike the other canonical forms, criteria is *not* expanded into an
/// algebraic tree at parse time: the combinators (`$or`/`$and`/`$nor`/
/// `$not`) and the array/scalar operator dispatch both require the schema
/// view to compile correctly, so the recursive expansion happens in the
/// predicate compiler (`compile::predicate`), which is shared with the
/// embedded predicates inside aggregate expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonCriteria(pub IndexMap<String, Surface>);

impl CanonCriteria {
    /// The criteria that matches every row.
    #[must_use]
    pub fn empty() -> Self {
        Self(IndexMap::new())
    }
}

/// A normalized join directive: the set of relations to load eagerly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonJoin {
    /// Relation names requested for eager loading.
    pub relations: IndexSet<String>,
}

/// One of the four supported aggregate operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggOp {
    /// `$min`.
    Min,
    /// `$max`.
    Max,
    /// `$avg`.
    Avg,
    /// `$sum`.
    Sum,
}

/// The operand of an [`AggExpr::Op`].
#[derive(Debug, Clone, PartialEq)]
pub enum AggInner {
    /// An integer literal. Only legal under `$sum`, where it denotes a
    /// (possibly scaled) row count.
    IntLiteral(i64),
    /// A column name.
    Column(String),
    /// An embedded boolean predicate, coerced to an integer before being
    /// aggregated.
    Criteria(CanonCriteria),
}

/// A single aggregate expression: either a bare column reference, or an
/// operator applied to an operand.
#[derive(Debug, Clone, PartialEq)]
pub enum AggExpr {
    /// `{ output: "column_name" }`.
    ColumnRef(String),
    /// `{ output: { $op: inner } }`.
    Op {
        /// The aggregate operator.
        op: AggOp,
        /// The operator's single operand.
        inner: AggInner,
    },
}

/// A normalized aggregate spec: an ordered map from output field name to
/// aggregate expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanonAggregate {
    /// The aggregate expressions, in request order.
    pub fields: IndexMap<String, AggExpr>,
}
