//! The schema collaborator contract (external to this crate).
//!
//! This crate never implements [`Schema`] itself — it is supplied by the
//! embedding application's model/schema registry. The contract is kept
//! deliberately small and string-keyed (rather than the compile-time,
//! derive-macro-driven `Table`/`Column` traits a SQL builder would use)
//! because requests name columns and relations by string at translation
//! time, not at compile time.

/// The scalar type of an array column's elements.
///
/// Only meaningful when [`ColumnHandle::is_array`] is `true`; carried so the
/// backend can cast a list operand to the right array element type at the
/// SQL boundary (see the `$eq`/`$ne`/`$in` array semantics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// Boolean elements.
    Bool,
    /// Integer elements.
    Int,
    /// Floating-point elements.
    Float,
    /// Text elements.
    Text,
}

/// An opaque, schema-supplied identifier for a column.
///
/// `identity` is whatever the backend needs to emit a concrete column
/// reference (e.g. a qualified name, a compiled `Column` handle); this crate
/// never interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHandle {
    /// The name the request referred to this column by.
    pub name: String,
    /// Whether this column holds an array rather than a scalar.
    pub is_array: bool,
    /// The element type, present only when `is_array` is `true`.
    pub element_type: Option<ElementType>,
    /// Backend-opaque identity carried through to plan fragments.
    pub identity: String,
}

/// An opaque, schema-supplied identifier for a relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationHandle {
    /// The name the request referred to this relation by.
    pub name: String,
    /// Backend-opaque identity carried through to plan fragments.
    pub identity: String,
}

/// The schema view a single translation is compiled against.
///
/// Implementations are expected to be cheap to query repeatedly (a single
/// request may look up the same column several times) and immutable for the
/// duration of a translation, so that translation remains safe to run
/// concurrently from independent callers.
pub trait Schema {
    /// Resolves a column by name, or `None` if it does not exist on this
    /// model.
    fn column(&self, name: &str) -> Option<ColumnHandle>;

    /// Resolves a relation by name, or `None` if it does not exist on this
    /// model.
    fn relation(&self, name: &str) -> Option<RelationHandle>;

    /// All column names declared on this model, in schema-defined order.
    ///
    /// Needed by the projection compiler's exclude mode, which must emit a
    /// load-only directive for every column *not* listed.
    fn column_names(&self) -> Vec<String>;

    /// All relation names declared on this model, in schema-defined order.
    ///
    /// Needed by the join compiler, which must emit a lazy-load directive
    /// for every relation *not* requested.
    fn relation_names(&self) -> Vec<String>;
}
