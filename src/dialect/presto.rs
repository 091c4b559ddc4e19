//! Presto, Trino and the hosted services built on them.

use super::{CaseFolding, Dialect, LimitStyle};
use crate::ast::TypeKind;

pub fn presto() -> Dialect {
    Dialect::base("presto")
        .limit_style(LimitStyle::OffsetLimit)
        .try_cast("TRY_CAST")
        .if_function("IF")
        .rename_type(TypeKind::Int, "INTEGER")
        .fold_type(TypeKind::Text, "VARCHAR")
        .auto_increment(None)
        .with_tokenizer(|t| t.case_folding = CaseFolding::Lower)
}

pub fn trino() -> Dialect {
    presto().named("trino")
}

pub fn athena() -> Dialect {
    presto().named("athena")
}

pub fn dune() -> Dialect {
    presto().named("dune")
}
