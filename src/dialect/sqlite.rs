use super::{
    AutoIncrementSyntax, CaseFolding, Construct, Dialect, LimitStyle, ParamStyle,
    TemporalLiteralStyle, precedence,
};
use crate::ast::BinaryOperator;

pub fn sqlite() -> Dialect {
    Dialect::base("sqlite")
        .limit_style(LimitStyle::LimitOffset)
        .limit_comma()
        .offset_requires_limit("-1")
        .operator("==", BinaryOperator::Eq, precedence::COMPARISON)
        .temporal_literals(TemporalLiteralStyle::Function)
        .support(Construct::Returning)
        .forbid(Construct::DropCascade)
        .if_function("IIF")
        .rename_function("SUBSTRING", "SUBSTR")
        .rename_function("STRPOS", "INSTR")
        .params(ParamStyle::QuestionNumbered, &['?', ':', '@', '$'], Some(':'))
        .auto_increment(Some(AutoIncrementSyntax::Autoincrement))
        .unreserve(&["INTERVAL"])
        .with_tokenizer(|t| {
            t.identifier_quotes = vec![('"', '"'), ('`', '`'), ('[', ']')];
            t.case_folding = CaseFolding::None;
        })
        .with_generator(|g| {
            g.extract = None;
            g.interval = None;
        })
}
