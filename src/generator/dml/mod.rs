//! DML generation: queries and data-changing statements.

pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

use crate::ast::SelectItem;
use crate::dialect::Construct;
use crate::error::TranspileResult;
use crate::generator::Generator;

/// `RETURNING ...`, or nothing when the list is empty.
pub(crate) fn build_returning(items: &[SelectItem], generator: &Generator) -> TranspileResult<String> {
    if items.is_empty() {
        return Ok(String::new());
    }
    generator.require(Construct::Returning)?;
    let items = select::select_items(items, generator)?;
    Ok(generator.list_clause("RETURNING", &items))
}
