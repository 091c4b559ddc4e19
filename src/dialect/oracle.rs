//! Oracle Database (12c and later).

use super::{Construct, Dialect, LimitStyle, ParamStyle};
use crate::ast::{CurrentTimeKind, TypeKind};

pub fn oracle() -> Dialect {
    Dialect::base("oracle")
        .limit_style(LimitStyle::FetchFirst)
        .integer_booleans()
        .rename_function("STRPOS", "INSTR")
        .rename_function("SUBSTRING", "SUBSTR")
        .rename_type(TypeKind::Varchar, "VARCHAR2")
        .rename_type(TypeKind::Text, "CLOB")
        .rename_type(TypeKind::Decimal, "NUMBER")
        .rename_type(TypeKind::Double, "DOUBLE PRECISION")
        .fold_type(TypeKind::Boolean, "NUMBER(1)")
        .remove_operator("%")
        .remove_operator("&")
        .remove_operator("|")
        .remove_operator("^")
        .remove_operator("<<")
        .remove_operator(">>")
        .forbid(Construct::IfNotExists)
        .forbid(Construct::IfExists)
        .forbid(Construct::DropCascade)
        .params(ParamStyle::Colon, &[':'], Some(':'))
        .current_time(
            &[
                ("CURRENT_DATE", CurrentTimeKind::Date),
                ("CURRENT_TIMESTAMP", CurrentTimeKind::Timestamp),
            ],
            &[],
            [Some("CURRENT_DATE"), None, Some("CURRENT_TIMESTAMP")],
        )
        .unreserve(&["CURRENT_TIME"])
        .reserve(&["MINUS"])
        .with_parser(|p| {
            p.require_from = true;
            p.minus = true;
        })
        .with_generator(|g| {
            g.except_keyword = "MINUS".to_string();
            g.dummy_table = Some("DUAL".to_string());
            g.table_alias_as = false;
        })
}
