//! INSERT SQL generation.

use crate::ast::*;
use crate::error::TranspileResult;
use crate::generator::Generator;

use super::build_returning;
use super::select::build_query;

/// Generate INSERT SQL.
pub fn build_insert(insert: &Insert, generator: &Generator) -> TranspileResult<String> {
    let mut head = format!("INSERT INTO {}", generator.object_name(&insert.table));
    if !insert.columns.is_empty() {
        head.push_str(&format!(" ({})", generator.idents(&insert.columns)));
    }
    Ok(generator.clauses(vec![
        head,
        build_query(&insert.source, generator)?,
        build_returning(&insert.returning, generator)?,
    ]))
}
