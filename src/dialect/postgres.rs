//! PostgreSQL and the engines speaking its wire dialect.

use super::{CaseFolding, Construct, Dialect, LimitStyle, ParamStyle, precedence};
use crate::ast::{BinaryOperator, CurrentTimeKind, TypeKind};

pub fn postgres() -> Dialect {
    Dialect::base("postgres")
        .limit_style(LimitStyle::LimitOffset)
        .double_colon_cast()
        .ilike()
        .support(Construct::DistinctOn)
        .support(Construct::Returning)
        .operator("^", BinaryOperator::Power, precedence::POWER)
        .operator("#", BinaryOperator::BitwiseXor, precedence::BIT_XOR)
        .params(ParamStyle::Dollar, &['$'], None)
        .current_time(
            &[
                ("CURRENT_DATE", CurrentTimeKind::Date),
                ("CURRENT_TIME", CurrentTimeKind::Time),
                ("CURRENT_TIMESTAMP", CurrentTimeKind::Timestamp),
            ],
            &[("NOW", CurrentTimeKind::Timestamp)],
            [Some("CURRENT_DATE"), Some("CURRENT_TIME"), Some("CURRENT_TIMESTAMP")],
        )
        .rename_type(TypeKind::Double, "DOUBLE PRECISION")
        .fold_type(TypeKind::TinyInt, "SMALLINT")
        .rename_type(TypeKind::Varbinary, "BYTEA")
        .fold_type(TypeKind::Binary, "BYTEA")
        .with_tokenizer(|t| {
            t.dollar_strings = true;
            t.nested_comments = true;
            t.case_folding = CaseFolding::Lower;
        })
}

pub fn redshift() -> Dialect {
    postgres()
        .named("redshift")
        .support(Construct::Qualify)
        .forbid(Construct::DistinctOn)
        .forbid(Construct::Returning)
        .unreserve(&["RETURNING"])
}

pub fn materialize() -> Dialect {
    postgres().named("materialize")
}

pub fn risingwave() -> Dialect {
    postgres().named("risingwave")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_is_power() {
        let d = postgres();
        let rule = d.parser.binary_operator("^").unwrap();
        assert_eq!(rule.op, BinaryOperator::Power);
        assert_eq!(d.parser.symbol_for(BinaryOperator::BitwiseXor).unwrap().symbol, "#");
        assert!(d.tokenizer.operators.contains(&"::".to_string()));
    }

    #[test]
    fn test_redshift_inherits() {
        let d = redshift();
        assert_eq!(d.name, "redshift");
        assert!(d.supports(Construct::Qualify));
        assert!(!d.supports(Construct::Returning));
        assert!(d.parser.double_colon_cast);
    }
}
