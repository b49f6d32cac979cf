//! Clause compilers: given a canonical form and a [`crate::schema::Schema`],
//! emit typed plan fragments. Every unknown field or relation name surfaces
//! as a validation error here — the parsers in `crate::parse` never touch
//! the schema.

pub mod aggregate;
pub mod join;
pub mod order;
pub mod predicate;
pub mod projection;

pub use aggregate::compile_aggregate;
pub use join::compile_join;
pub use order::{compile_group, compile_sort};
pub use predicate::compile_criteria;
pub use projection::compile_projection;
