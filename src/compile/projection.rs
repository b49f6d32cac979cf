//! §4.1 — Projection compiler.

use tracing::debug;

use crate::canon::{CanonProjection, ProjectionMode};
use crate::error::{QueryError, Result};
use crate::plan::{LoadOnlyDirective, ProjectionPlan};
use crate::schema::Schema;

/// Compiles a normalized projection against a schema.
///
/// In include mode, emits a load-only directive for each listed column, in
/// request order. In exclude mode, emits one for every schema column *not*
/// listed, in schema order. An empty projection compiles to no directives,
/// which the backend treats as "select every column".
pub fn compile_projection(schema: &dyn Schema, projection: &CanonProjection) -> Result<ProjectionPlan> {
    debug!(mode = ?projection.mode, fields = projection.fields.len(), "compiling projection");

    if projection.fields.is_empty() {
        return Ok(Vec::new());
    }

    match projection.mode {
        ProjectionMode::Include => projection
            .fields
            .iter()
            .map(|name| resolve(schema, name).map(|column| LoadOnlyDirective { column }))
            .collect(),
        ProjectionMode::Exclude => {
            // Validate every listed field exists even though it won't be
            // emitted, so a typo in an exclude list still surfaces as an
            // error rather than being silently ignored.
            for name in &projection.fields {
                resolve(schema, name)?;
            }
            schema
                .column_names()
                .into_iter()
                .filter(|name| !projection.fields.contains(name))
                .map(|name| {
                    resolve(schema, &name).map(|column| LoadOnlyDirective { column })
                })
                .collect()
        }
    }
}

fn resolve(schema: &dyn Schema, name: &str) -> Result<crate::schema::ColumnHandle> {
    schema
        .column(name)
        .ok_or_else(|| QueryError::UnknownField(name.to_string()))
}
