//! Plan fragments: the typed, schema-resolved output this crate hands to a
//! downstream SQL-building layer. Every fragment is a plain value type,
//! immutable after construction, and carries no reference back to the
//! request that produced it.

use crate::schema::{ColumnHandle, RelationHandle};
use crate::value::Surface;

/// A hint to load exactly one column of the primary entity.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOnlyDirective {
    /// The column to load.
    pub column: ColumnHandle,
}

/// The compiled projection: one directive per selected column. An empty
/// plan means "select every column" (the backend's default).
pub type ProjectionPlan = Vec<LoadOnlyDirective>;

/// One compiled sort key.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    /// The column to sort by.
    pub column: ColumnHandle,
    /// Ascending or descending.
    pub direction: crate::canon::Direction,
}

/// The compiled, order-preserving sort plan.
pub type SortPlan = Vec<SortKey>;

/// The compiled, order-preserving group-by plan (no direction: grouping has
/// none).
pub type GroupPlan = Vec<ColumnHandle>;

/// A comparison operator compiled from a criteria leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>=`
    Gte,
    /// `>`
    Gt,
}

/// A node in a compiled predicate tree.
///
/// `And`/`Or` carry their children as a flat list rather than a fixed-arity
/// pair: a backend renders a list of length 1 with no parentheses and a list
/// of length > 1 wrapped in parentheses, which is exactly the arity-driven
/// grouping rule this crate replaces the source's explicit `self_group` flag
/// with (see DESIGN.md).
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateNode {
    /// The constant `TRUE`, produced by empty criteria.
    True,
    /// Conjunction of all children.
    And(Vec<PredicateNode>),
    /// Disjunction of all children.
    Or(Vec<PredicateNode>),
    /// Negation of the child.
    Not(Box<PredicateNode>),
    /// A scalar (or array-as-a-whole) comparison: `column OP value`.
    Compare {
        /// The column being compared.
        column: ColumnHandle,
        /// The comparison operator.
        op: CompareOp,
        /// The operand.
        value: Surface,
    },
    /// `column IN (values)`.
    In {
        /// The column being compared.
        column: ColumnHandle,
        /// The candidate values.
        values: Vec<Surface>,
    },
    /// `column IS NULL`.
    IsNull {
        /// The column being compared.
        column: ColumnHandle,
    },
    /// `column IS NOT NULL`.
    IsNotNull {
        /// The column being compared.
        column: ColumnHandle,
    },
    /// `ANY(column) = value` — array column, scalar operand, under `$eq`.
    ArrayContainsElement {
        /// The array column.
        column: ColumnHandle,
        /// The element expected to be present.
        value: Surface,
    },
    /// `ALL(column) <> value` — array column, scalar operand, under `$ne`.
    ArrayAllNotEqual {
        /// The array column.
        column: ColumnHandle,
        /// The element expected to be absent from every element.
        value: Surface,
    },
    /// `column && ARRAY[values]` — array overlap, under `$in`.
    ArrayOverlap {
        /// The array column.
        column: ColumnHandle,
        /// The candidate values.
        values: Vec<Surface>,
    },
    /// `column @> ARRAY[values]` — array containment, under `$all`.
    ArrayContainsAll {
        /// The array column.
        column: ColumnHandle,
        /// The values the array must contain all of.
        values: Vec<Surface>,
    },
    /// `array_length(column, 1) IS NULL` — under `$size: 0`.
    ArrayLengthIsNull {
        /// The array column.
        column: ColumnHandle,
    },
    /// `array_length(column, 1) = value` — under `$size` with a nonzero
    /// operand.
    ArrayLengthEquals {
        /// The array column.
        column: ColumnHandle,
        /// The expected length.
        value: Surface,
    },
}

/// The compiled predicate tree, shared by Criteria and by the embedded
/// expressions inside Aggregate.
pub type PredicatePlan = PredicateNode;

/// A hint to defer loading a relation until separately requested.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyLoadDirective {
    /// The relation to defer.
    pub relation: RelationHandle,
}

/// The compiled join plan: a lazy-load directive for every schema relation
/// that was *not* requested. Requested relations are left to the backend's
/// default (eager) loading.
pub type JoinPlan = Vec<LazyLoadDirective>;

/// The operand of an aggregate function call.
#[derive(Debug, Clone, PartialEq)]
pub enum AggOperand {
    /// A plain column reference.
    Column(ColumnHandle),
    /// A boolean predicate, cast to an integer before being aggregated.
    BoolToInt(PredicateNode),
}

/// A compiled aggregate function call.
#[derive(Debug, Clone, PartialEq)]
pub enum AggCall {
    /// A bare column reference (no aggregate function), e.g.
    /// `{ out: "age" }`.
    Column(ColumnHandle),
    /// `count()`.
    Count,
    /// `count() * n`, for `{ $sum: n }` with `n != 1`.
    CountScaled(i64),
    /// `min(operand)`.
    Min(Box<AggOperand>),
    /// `max(operand)`.
    Max(Box<AggOperand>),
    /// `avg(operand)`.
    Avg(Box<AggOperand>),
    /// `sum(operand)`.
    Sum(Box<AggOperand>),
}

/// A single labeled entry in the aggregate plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Selectable {
    /// The output field name the expression is labeled with.
    pub label: String,
    /// The compiled expression.
    pub call: AggCall,
}

/// The compiled aggregate plan: an ordered sequence of labeled selectables.
pub type AggregatePlan = Vec<Selectable>;

/// The full compiled plan for one request: every clause's fragment, ready
/// for a SQL-building layer to render.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// The projection plan.
    pub projection: ProjectionPlan,
    /// The sort plan.
    pub sort: SortPlan,
    /// The group-by plan.
    pub group: GroupPlan,
    /// The compiled predicate tree.
    pub predicate: PredicatePlan,
    /// The join plan.
    pub join: JoinPlan,
    /// The aggregate plan.
    pub aggregate: AggregatePlan,
}
