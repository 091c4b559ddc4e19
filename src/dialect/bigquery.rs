//! Google BigQuery (GoogleSQL).

use super::{CaseFolding, Construct, Dialect, IntervalStyle, LimitStyle, ParamStyle};
use crate::ast::TypeKind;

pub fn bigquery() -> Dialect {
    Dialect::base("bigquery")
        .limit_style(LimitStyle::LimitOffset)
        .identifier_quote('`', '`')
        .support(Construct::Qualify)
        .try_cast("SAFE_CAST")
        .if_function("IF")
        .rename_function("SUBSTRING", "SUBSTR")
        .rename_function("RANDOM", "RAND")
        .rename_type(TypeKind::Int, "INT64")
        .fold_type(TypeKind::BigInt, "INT64")
        .fold_type(TypeKind::SmallInt, "INT64")
        .fold_type(TypeKind::TinyInt, "INT64")
        .rename_type(TypeKind::Double, "FLOAT64")
        .fold_type(TypeKind::Real, "FLOAT64")
        .rename_type(TypeKind::Varchar, "STRING")
        .fold_type(TypeKind::Text, "STRING")
        .fold_type(TypeKind::Char, "STRING")
        .rename_type(TypeKind::Decimal, "NUMERIC")
        .rename_type(TypeKind::Boolean, "BOOL")
        .rename_type(TypeKind::Varbinary, "BYTES")
        .fold_type(TypeKind::Binary, "BYTES")
        .rename_type(TypeKind::Timestamp, "DATETIME")
        .rename_type(TypeKind::TimestampTz, "TIMESTAMP")
        .params(ParamStyle::Question, &['?', '@'], Some('@'))
        .auto_increment(None)
        .with_tokenizer(|t| {
            t.identifier_quotes = vec![('`', '`')];
            t.string_quotes = vec!['\'', '"'];
            t.backslash_escapes = true;
            t.hash_comments = true;
            t.case_folding = CaseFolding::None;
        })
        .with_generator(|g| {
            g.interval = Some(IntervalStyle::Bare);
        })
}
