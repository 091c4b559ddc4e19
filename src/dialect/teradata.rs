use super::{Construct, Dialect, LimitStyle, precedence};
use crate::ast::{BinaryOperator, TypeKind};

/// Teradata: `TOP n` without offsets, `QUALIFY`, `**` for powers.
pub fn teradata() -> Dialect {
    Dialect::base("teradata")
        .limit_style(LimitStyle::Top { fetch: false })
        .support(Construct::Qualify)
        .integer_booleans()
        .operator("**", BinaryOperator::Power, precedence::POWER)
        .fold_type(TypeKind::Boolean, "BYTEINT")
        .forbid(Construct::IfNotExists)
        .forbid(Construct::IfExists)
}
