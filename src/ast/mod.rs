//! Dialect-neutral abstract syntax tree.
//!
//! Every parser builds these nodes and every generator consumes them. The
//! node set is closed: generators match exhaustively, so a new node kind
//! cannot be added without deciding how each dialect renders it.

pub mod ddl;
pub mod dml;
pub mod expr;
pub mod query;
pub mod types;

use serde::{Deserialize, Serialize};

use crate::tokens::Position;

pub use ddl::*;
pub use dml::*;
pub use expr::*;
pub use query::*;
pub use types::*;

/// Source provenance of a node.
///
/// Spans never take part in equality: two trees that differ only in where
/// their nodes came from compare equal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
}

impl Span {
    pub fn at(start: Position) -> Self {
        Self { start }
    }
}

impl PartialEq for Span {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for Span {}

/// An identifier, with whether it was written quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    pub value: String,
    pub quoted: bool,
    #[serde(skip)]
    pub span: Span,
}

impl Ident {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
            span: Span::default(),
        }
    }

    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: true,
            span: Span::default(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A possibly qualified object name (`catalog.schema.table`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectName(pub Vec<Ident>);

impl ObjectName {
    pub fn simple(name: impl Into<String>) -> Self {
        Self(vec![Ident::new(name)])
    }
}

impl std::fmt::Display for ObjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<&str> = self.0.iter().map(|i| i.value.as_str()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// A top-level SQL statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Query(Box<Query>),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    CreateTable(CreateTable),
    CreateView(CreateView),
    Drop(DropStatement),
}

impl Statement {
    /// Name of the statement kind, for logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Query(_) => "SELECT",
            Statement::Insert(_) => "INSERT",
            Statement::Update(_) => "UPDATE",
            Statement::Delete(_) => "DELETE",
            Statement::CreateTable(_) => "CREATE TABLE",
            Statement::CreateView(_) => "CREATE VIEW",
            Statement::Drop(_) => "DROP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_is_ignored_by_equality() {
        let a = Ident::new("x").with_span(Span::at(Position::new(1, 1, 0)));
        let b = Ident::new("x").with_span(Span::at(Position::new(9, 3, 120)));
        assert_eq!(a, b);
        assert_ne!(a, Ident::quoted("x"));
    }

    #[test]
    fn test_statement_serializes() {
        let stmt = Statement::Drop(DropStatement {
            object: ObjectType::Table,
            if_exists: true,
            names: vec![ObjectName::simple("t")],
            cascade: false,
        });
        let json = serde_json::to_string(&stmt).unwrap();
        assert!(json.contains("\"if_exists\":true"));
        let back: Statement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stmt);
    }
}
