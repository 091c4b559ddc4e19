//! UPDATE SQL generation.

use crate::ast::*;
use crate::error::TranspileResult;
use crate::generator::Generator;

use super::build_returning;

/// Generate UPDATE SQL.
pub fn build_update(update: &Update, generator: &Generator) -> TranspileResult<String> {
    let mut head = format!("UPDATE {}", generator.object_name(&update.table));
    if let Some(alias) = &update.alias {
        let keyword = if generator.dialect().generator.table_alias_as { " AS " } else { " " };
        head.push_str(keyword);
        head.push_str(&generator.ident(alias));
    }

    let assignments = update
        .assignments
        .iter()
        .map(|a| {
            let target: Vec<String> = a.target.iter().map(|i| generator.ident(i)).collect();
            Ok(format!("{} = {}", target.join("."), generator.expr(&a.value)?))
        })
        .collect::<TranspileResult<Vec<_>>>()?;

    let mut parts = vec![head, generator.list_clause("SET", &assignments)];
    if let Some(selection) = &update.selection {
        parts.push(format!("WHERE {}", generator.expr(selection)?));
    }
    parts.push(build_returning(&update.returning, generator)?);
    Ok(generator.clauses(parts))
}
