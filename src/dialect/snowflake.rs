use super::{AutoIncrementSyntax, CaseFolding, Construct, Dialect, LimitStyle};
use crate::ast::TypeKind;

pub fn snowflake() -> Dialect {
    Dialect::base("snowflake")
        .limit_style(LimitStyle::LimitOffset)
        .double_colon_cast()
        .ilike()
        .support(Construct::Qualify)
        .try_cast("TRY_CAST")
        .if_function("IFF")
        .swap_function("STRPOS", "CHARINDEX")
        .rename_type(TypeKind::Timestamp, "TIMESTAMP_NTZ")
        .rename_type(TypeKind::TimestampTz, "TIMESTAMP_TZ")
        .auto_increment(Some(AutoIncrementSyntax::Autoincrement))
        .reserve(&["MINUS"])
        .with_parser(|p| p.minus = true)
        .with_tokenizer(|t| t.case_folding = CaseFolding::Upper)
}
