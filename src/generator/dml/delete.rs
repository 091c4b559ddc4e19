//! DELETE SQL generation.

use crate::ast::*;
use crate::error::TranspileResult;
use crate::generator::Generator;

use super::build_returning;

/// Generate DELETE SQL.
pub fn build_delete(delete: &Delete, generator: &Generator) -> TranspileResult<String> {
    let mut parts = vec![format!("DELETE FROM {}", generator.object_name(&delete.table))];
    if let Some(selection) = &delete.selection {
        parts.push(format!("WHERE {}", generator.expr(selection)?));
    }
    parts.push(build_returning(&delete.returning, generator)?);
    Ok(generator.clauses(parts))
}
