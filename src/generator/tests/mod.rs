//! Generator test modules.
//!
//! - `core`: layout, quoting, precedence and parameters
//! - `dialects`: cross-dialect rewrites and unsupported constructs
//! - `roundtrip`: render then re-parse in the same dialect

mod core;

use std::sync::Arc;

use crate::ast::Statement;
use crate::dialect::{Dialect, global};
use crate::error::TranspileError;
use crate::generator::{GenerateOptions, generate};
use crate::parser::parse_sql;

fn dialect(name: &str) -> Arc<Dialect> {
    global().resolve(name).unwrap()
}

fn parse_one(sql: &str, read: &str) -> Statement {
    let mut statements = parse_sql(sql, &dialect(read)).unwrap();
    assert_eq!(statements.len(), 1, "{}", sql);
    statements.remove(0)
}

fn render(sql: &str, read: &str, write: &str, options: GenerateOptions) -> Result<String, TranspileError> {
    generate(&parse_one(sql, read), &dialect(write), &options)
}

/// Compact rendering of a single statement.
fn to(sql: &str, read: &str, write: &str) -> String {
    render(sql, read, write, GenerateOptions::default()).unwrap()
}

fn pretty(sql: &str, read: &str, write: &str) -> String {
    let options = GenerateOptions {
        pretty: true,
        ..GenerateOptions::default()
    };
    render(sql, read, write, options).unwrap()
}

/// The construct named by an unsupported-construct failure.
fn unsupported(sql: &str, read: &str, write: &str) -> String {
    match render(sql, read, write, GenerateOptions::default()) {
        Err(TranspileError::UnsupportedConstruct { construct, dialect, .. }) => {
            assert_eq!(dialect, write);
            construct
        }
        other => panic!("expected unsupported construct, got {:?}", other),
    }
}
