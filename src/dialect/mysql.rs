//! MySQL and its wire-compatible engines.

use super::{
    AutoIncrementSyntax, CaseFolding, ConcatStyle, Construct, Dialect, IntervalStyle, LimitStyle,
    precedence,
};
use crate::ast::{BinaryOperator, CurrentTimeKind, TypeKind};

/// The largest row count MySQL accepts, used for offsets without a limit.
const MAX_ROWS: &str = "18446744073709551615";

pub fn mysql() -> Dialect {
    Dialect::base("mysql")
        .limit_style(LimitStyle::LimitOffset)
        .limit_comma()
        .offset_requires_limit(MAX_ROWS)
        .identifier_quote('`', '`')
        .operator("||", BinaryOperator::Or, precedence::OR)
        .forbid(Construct::FullOuterJoin)
        .forbid(Construct::NullsOrdering)
        .if_function("IF")
        .rename_function("LENGTH", "CHAR_LENGTH")
        .rename_function("RANDOM", "RAND")
        .swap_function("STRPOS", "LOCATE")
        .rename_type(TypeKind::Timestamp, "DATETIME")
        .rename_type(TypeKind::TimestampTz, "TIMESTAMP")
        .fold_type(TypeKind::Uuid, "CHAR(36)")
        .auto_increment(Some(AutoIncrementSyntax::AutoIncrement))
        .current_time(
            &[
                ("CURRENT_DATE", CurrentTimeKind::Date),
                ("CURRENT_TIME", CurrentTimeKind::Time),
                ("CURRENT_TIMESTAMP", CurrentTimeKind::Timestamp),
            ],
            &[
                ("NOW", CurrentTimeKind::Timestamp),
                ("CURDATE", CurrentTimeKind::Date),
                ("CURTIME", CurrentTimeKind::Time),
            ],
            [Some("CURRENT_DATE"), Some("CURRENT_TIME"), Some("CURRENT_TIMESTAMP")],
        )
        .with_tokenizer(|t| {
            t.identifier_quotes = vec![('`', '`')];
            t.string_quotes = vec!['\'', '"'];
            t.backslash_escapes = true;
            t.hash_comments = true;
            t.case_folding = CaseFolding::None;
        })
        .with_generator(|g| {
            g.concat_style = ConcatStyle::Function;
            g.interval = Some(IntervalStyle::Bare);
        })
}

pub fn singlestore() -> Dialect {
    mysql().named("singlestore")
}

pub fn doris() -> Dialect {
    mysql().named("doris").support(Construct::FullOuterJoin)
}

pub fn starrocks() -> Dialect {
    mysql().named("starrocks").support(Construct::FullOuterJoin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{FunctionAlias, FunctionRender};

    #[test]
    fn test_pipes_mean_or() {
        let d = mysql();
        assert_eq!(d.parser.binary_operator("||").unwrap().op, BinaryOperator::Or);
        assert!(d.parser.symbol_for(BinaryOperator::Concat).is_none());
    }

    #[test]
    fn test_locate_swaps_arguments() {
        let d = mysql();
        assert_eq!(
            d.parser.function_aliases.get("LOCATE"),
            Some(&FunctionAlias::Swap("STRPOS".to_string()))
        );
        assert_eq!(
            d.function_render("STRPOS"),
            Some(&FunctionRender::Swap("LOCATE".to_string()))
        );
    }

    #[test]
    fn test_offset_needs_limit() {
        let d = mysql();
        assert!(d.parser.offset_requires_limit);
        assert_eq!(d.generator.max_limit.as_deref(), Some(MAX_ROWS));
    }
}
