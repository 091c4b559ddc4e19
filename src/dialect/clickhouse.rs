use super::{CaseFolding, Dialect, IntervalStyle, LimitStyle};
use crate::ast::TypeKind;

pub fn clickhouse() -> Dialect {
    Dialect::base("clickhouse")
        .limit_style(LimitStyle::LimitOffset)
        .limit_comma()
        .if_function("IF")
        .rename_function("STRPOS", "position")
        .rename_type(TypeKind::TinyInt, "Int8")
        .rename_type(TypeKind::SmallInt, "Int16")
        .rename_type(TypeKind::Int, "Int32")
        .rename_type(TypeKind::BigInt, "Int64")
        .rename_type(TypeKind::Real, "Float32")
        .rename_type(TypeKind::Double, "Float64")
        .rename_type(TypeKind::Text, "String")
        .fold_type(TypeKind::Varchar, "String")
        .fold_type(TypeKind::Char, "String")
        .rename_type(TypeKind::Boolean, "Bool")
        .rename_type(TypeKind::Timestamp, "DateTime")
        .auto_increment(None)
        .with_tokenizer(|t| {
            t.identifier_quotes = vec![('"', '"'), ('`', '`')];
            t.backslash_escapes = true;
            t.case_folding = CaseFolding::None;
        })
        .with_generator(|g| {
            g.interval = Some(IntervalStyle::Bare);
        })
}
