//! Hive and the Spark lineage.

use super::{CaseFolding, Construct, Dialect, IntervalStyle, LimitStyle};
use crate::ast::TypeKind;

pub fn hive() -> Dialect {
    Dialect::base("hive")
        .limit_style(LimitStyle::LimitOnly)
        .identifier_quote('`', '`')
        .if_function("IF")
        .rename_function("RANDOM", "RAND")
        .rename_function("STRPOS", "INSTR")
        .rename_type(TypeKind::Text, "STRING")
        .auto_increment(None)
        .with_tokenizer(|t| {
            t.identifier_quotes = vec![('`', '`')];
            t.string_quotes = vec!['\'', '"'];
            t.backslash_escapes = true;
            t.case_folding = CaseFolding::None;
        })
        .with_generator(|g| {
            g.interval = Some(IntervalStyle::Bare);
        })
}

pub fn spark2() -> Dialect {
    hive().named("spark2")
}

/// Spark 3: adds `OFFSET`, `TRY_CAST` and `ILIKE`.
pub fn spark() -> Dialect {
    hive()
        .named("spark")
        .limit_style(LimitStyle::LimitOffset)
        .try_cast("TRY_CAST")
        .ilike()
}

pub fn databricks() -> Dialect {
    spark().named("databricks").support(Construct::Qualify)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hive_has_no_offset() {
        assert!(!hive().supports(Construct::Offset));
        assert!(spark().supports(Construct::Offset));
        assert!(databricks().supports(Construct::Qualify));
        assert!(!spark2().supports(Construct::TryCast));
    }
}
