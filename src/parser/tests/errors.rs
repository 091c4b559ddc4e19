use pretty_assertions::assert_eq;

use super::*;
use crate::error::TranspileError;
use crate::tokens::Position;

fn parse_err(sql: &str, dialect_name: &str) -> TranspileError {
    parse_sql(sql, &dialect(dialect_name)).unwrap_err()
}

#[test]
fn test_missing_table_reports_end_of_input() {
    match parse_err("SELECT * FROM", "ansi") {
        TranspileError::Syntax {
            position,
            expected,
            found,
        } => {
            assert_eq!((position.line, position.column), (1, 14));
            assert_eq!(found, "end of input");
            assert!(expected.contains(&"identifier".to_string()), "{:?}", expected);
            assert!(expected.contains(&"'('".to_string()), "{:?}", expected);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_error_message_format() {
    let err = parse_err("SELECT * FROM", "ansi");
    let message = err.to_string();
    assert!(
        message.starts_with("Syntax error at line 1, column 14: expected one of "),
        "{}",
        message
    );
    assert!(message.ends_with("found end of input"), "{}", message);
}

#[test]
fn test_error_position_on_later_line() {
    let err = parse_err("SELECT a\nFROM t\nWHERE", "ansi");
    assert_eq!(err.position().map(|p| (p.line, p.column)), Some((3, 6)));
}

#[test]
fn test_trailing_garbage() {
    let err = parse_err("SELECT a FROM t t2 t3", "ansi");
    assert_eq!(
        err.position(),
        Some(Position::new(1, 20, 19))
    );
}

#[test]
fn test_one_bad_statement_fails_all() {
    assert!(parse_sql("SELECT 1; SELECT FROM", &dialect("ansi")).is_err());
}

#[test]
fn test_reserved_word_is_not_a_column() {
    let err = parse_err("SELECT select FROM t", "ansi");
    match err {
        TranspileError::Syntax { found, .. } => assert_eq!(found, "'select'"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_invalid_typed_literal() {
    let err = parse_err("SELECT DATE '2024-13-45'", "ansi");
    match err {
        TranspileError::Syntax { expected, .. } => {
            assert_eq!(expected, vec!["valid DATE literal".to_string()]);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_offset_dependencies() {
    // T-SQL needs ORDER BY before OFFSET
    let err = parse_err("SELECT a FROM t OFFSET 5 ROWS", "tsql");
    assert!(matches!(err, TranspileError::Syntax { .. }));
    // MySQL needs LIMIT before OFFSET
    let err = parse_err("SELECT a FROM t OFFSET 5", "mysql");
    assert!(matches!(err, TranspileError::Syntax { .. }));
}

#[test]
fn test_empty_input_has_no_statements() {
    assert_eq!(parse_sql("", &dialect("ansi")).unwrap(), vec![]);
}

#[test]
fn test_reserved_word_is_not_a_function() {
    let err = parse_err("SELECT WHERE(1) FROM t", "ansi");
    match err {
        TranspileError::Syntax {
            position,
            expected,
            found,
        } => {
            assert_eq!((position.line, position.column), (1, 8));
            assert_eq!(found, "'WHERE'");
            assert!(expected.contains(&"expression".to_string()), "{:?}", expected);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(parse_sql("SELECT a FROM t WHERE ON(a) = 1", &dialect("postgres")).is_err());
}

#[test]
fn test_keyword_named_functions_still_parse() {
    for sql in [
        "SELECT LEFT(a, 2), RIGHT(a, 2) FROM t",
        "SELECT CURRENT_TIMESTAMP(3)",
    ] {
        assert!(parse_sql(sql, &dialect("postgres")).is_ok(), "{}", sql);
    }
}

#[test]
fn test_nesting_depth_is_bounded() {
    let nested = |depth: usize| format!("SELECT {}1{}", "(".repeat(depth), ")".repeat(depth));

    assert!(parse_sql(&nested(64), &dialect("ansi")).is_ok());

    for depth in [1_000, 50_000] {
        let err = parse_err(&nested(depth), "ansi");
        match err {
            TranspileError::Syntax { expected, .. } => {
                let limit = format!("at most {} levels of nesting", crate::parser::MAX_DEPTH);
                assert_eq!(expected, vec![limit]);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}

#[test]
fn test_subquery_depth_is_bounded() {
    // same stack as a process main thread
    let handle = std::thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(|| {
            let sql = format!("{}SELECT 1{}", "SELECT * FROM (".repeat(500), ") s".repeat(500));
            parse_err(&sql, "ansi")
        })
        .unwrap();
    assert!(matches!(handle.join().unwrap(), TranspileError::Syntax { .. }));
}
