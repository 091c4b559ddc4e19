mod errors;
mod expressions;

use crate::ast::*;
use crate::dialect::Dialect;
use crate::dialect::global;

use super::parse_sql;

fn dialect(name: &str) -> std::sync::Arc<Dialect> {
    global().resolve(name).unwrap()
}

/// Parse a single statement in `dialect`.
fn parse_one(sql: &str, dialect_name: &str) -> Statement {
    let mut statements = parse_sql(sql, &dialect(dialect_name)).unwrap();
    assert_eq!(statements.len(), 1, "{}", sql);
    statements.remove(0)
}

fn query(sql: &str, dialect_name: &str) -> Query {
    match parse_one(sql, dialect_name) {
        Statement::Query(q) => *q,
        other => panic!("expected a query, got {:?}", other),
    }
}

fn select(sql: &str, dialect_name: &str) -> Select {
    match query(sql, dialect_name).body {
        SetExpr::Select(s) => *s,
        other => panic!("expected a SELECT body, got {:?}", other),
    }
}

/// The single projected expression of `SELECT <expr>`.
fn expr(text: &str, dialect_name: &str) -> Expr {
    let s = select(&format!("SELECT {}", text), dialect_name);
    match s.projection.into_iter().next() {
        Some(SelectItem::Expr { expr, .. }) => expr,
        other => panic!("expected an expression, got {:?}", other),
    }
}
