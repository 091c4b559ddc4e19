use super::{CaseFolding, Construct, Dialect, LimitStyle, ParamStyle, precedence};
use crate::ast::BinaryOperator;

pub fn duckdb() -> Dialect {
    Dialect::base("duckdb")
        .limit_style(LimitStyle::LimitOffset)
        .double_colon_cast()
        .ilike()
        .support(Construct::Qualify)
        .support(Construct::DistinctOn)
        .support(Construct::Returning)
        .try_cast("TRY_CAST")
        .if_function("IF")
        .operator("^", BinaryOperator::Power, precedence::POWER)
        .operator("**", BinaryOperator::Power, precedence::POWER)
        .operator("//", BinaryOperator::Divide, precedence::MULTIPLICATIVE)
        .params(ParamStyle::QuestionNumbered, &['?', '$'], Some('$'))
        .auto_increment(None)
        .with_tokenizer(|t| {
            t.dollar_strings = true;
            t.case_folding = CaseFolding::None;
        })
}
