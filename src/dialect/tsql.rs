//! SQL Server's Transact-SQL.

use super::{
    AutoIncrementSyntax, CaseFolding, ConcatStyle, Construct, Dialect, ExtractStyle,
    FunctionAlias, LimitStyle, ParamStyle, TemporalLiteralStyle,
};
use crate::ast::{CurrentTimeKind, TypeKind};

pub fn tsql() -> Dialect {
    Dialect::base("tsql")
        .limit_style(LimitStyle::Top { fetch: true })
        .identifier_quote('[', ']')
        .remove_operator("||")
        .integer_booleans()
        .temporal_literals(TemporalLiteralStyle::Cast)
        .if_function("IIF")
        .try_cast("TRY_CAST")
        .alias_function("ISNULL", FunctionAlias::Rename("COALESCE".to_string()))
        .rename_function("LENGTH", "LEN")
        .rename_function("CEIL", "CEILING")
        .rename_function("RANDOM", "RAND")
        .swap_function("STRPOS", "CHARINDEX")
        .rename_type(TypeKind::Boolean, "BIT")
        .rename_type(TypeKind::Double, "FLOAT")
        .rename_type(TypeKind::Text, "VARCHAR(MAX)")
        .rename_type(TypeKind::Timestamp, "DATETIME2")
        .rename_type(TypeKind::TimestampTz, "DATETIMEOFFSET")
        .rename_type(TypeKind::Uuid, "UNIQUEIDENTIFIER")
        .fold_type(TypeKind::Json, "NVARCHAR(MAX)")
        .forbid(Construct::NaturalJoin)
        .forbid(Construct::JoinUsing)
        .forbid(Construct::NullsOrdering)
        .forbid(Construct::IfNotExists)
        .forbid(Construct::DropCascade)
        .params(ParamStyle::AtName, &['@'], Some('@'))
        .auto_increment(Some(AutoIncrementSyntax::Identity))
        .current_time(
            &[("CURRENT_TIMESTAMP", CurrentTimeKind::Timestamp)],
            &[
                ("GETDATE", CurrentTimeKind::Timestamp),
                ("SYSDATETIME", CurrentTimeKind::Timestamp),
            ],
            [
                Some("CAST(GETDATE() AS DATE)"),
                Some("CAST(GETDATE() AS TIME)"),
                Some("GETDATE()"),
            ],
        )
        .unreserve(&["CURRENT_DATE", "CURRENT_TIME", "INTERVAL"])
        .with_tokenizer(|t| {
            t.identifier_quotes = vec![('[', ']'), ('"', '"')];
            t.national_strings = true;
            t.identifier_start = vec!['#'];
            t.case_folding = CaseFolding::None;
        })
        .with_generator(|g| {
            g.concat_style = ConcatStyle::Plus;
            g.extract = Some(ExtractStyle::DatePart);
            g.interval = None;
            g.or_replace = "ALTER".to_string();
        })
}

/// Microsoft Fabric warehouses speak T-SQL.
pub fn fabric() -> Dialect {
    tsql().named("fabric")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_and_fetch() {
        let d = tsql();
        assert!(d.parser.top);
        assert!(d.parser.offset_requires_order);
        assert!(!d.parser.limit);
        assert!(!d.parser.boolean_literals);
        assert!(!d.tokenizer.is_reserved("TRUE"));
    }

    #[test]
    fn test_text_type_key_includes_max() {
        let d = tsql();
        assert_eq!(d.parser.type_aliases.get("VARCHAR(MAX)"), Some(&TypeKind::Text));
        assert_eq!(d.type_name(TypeKind::Boolean), "BIT");
    }
}
