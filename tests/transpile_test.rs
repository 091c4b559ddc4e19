use pretty_assertions::assert_eq;
use sqlingual::prelude::*;
use sqlingual::{list_dialects, parse, transpile};

#[test]
fn test_top_becomes_limit() {
    let out = transpile("SELECT TOP 5 * FROM t", "tsql", "postgres", true).unwrap();
    assert_eq!(out, vec!["SELECT\n  *\nFROM\n  t\nLIMIT 5".to_string()]);

    let out = transpile("SELECT TOP 5 * FROM t", "tsql", "postgres", false).unwrap();
    assert_eq!(out, vec!["SELECT * FROM t LIMIT 5".to_string()]);
}

#[test]
fn test_limit_comma_swaps_operands() {
    let out = transpile("SELECT a FROM t LIMIT 5,10", "mysql", "postgres", false).unwrap();
    assert_eq!(out, vec!["SELECT a FROM t LIMIT 10 OFFSET 5".to_string()]);

    let out = transpile("SELECT a FROM t LIMIT 5,10", "mysql", "postgres", true).unwrap();
    assert_eq!(out, vec!["SELECT\n  a\nFROM\n  t\nLIMIT 10\nOFFSET 5".to_string()]);

    let out = transpile("SELECT a FROM t LIMIT 5, 10", "mysql", "tsql", false).unwrap();
    assert_eq!(
        out,
        vec!["SELECT a FROM t ORDER BY (SELECT NULL) OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY".to_string()]
    );
}

#[test]
fn test_unknown_dialect() {
    let err = transpile("SELECT 1", "unknown_dialect_xyz", "ansi", false).unwrap_err();
    assert!(matches!(err, TranspileError::UnknownDialect { .. }));
    assert_eq!(err.to_string(), "Unsupported dialect: 'unknown_dialect_xyz'");

    let err = transpile("SELECT 1", "ansi", "Postgress", false).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unsupported dialect: 'Postgress'. Did you mean 'postgres'?"
    );
}

#[test]
fn test_dialect_names_are_case_insensitive() {
    let out = transpile("SELECT 1", "ANSI", " Postgres ", false).unwrap();
    assert_eq!(out, vec!["SELECT 1".to_string()]);
}

#[test]
fn test_deterministic_output() {
    let sql = "SELECT a, COUNT(*) FROM t JOIN u ON t.id = u.id WHERE b IN (1, 2) GROUP BY a ORDER BY 2 DESC LIMIT 3";
    for write in list_dialects() {
        let first = transpile(sql, "postgres", &write, false);
        for _ in 0..3 {
            assert_eq!(transpile(sql, "postgres", &write, false), first, "{}", write);
        }
    }
}

#[test]
fn test_multi_statement_all_or_nothing() {
    let ok = transpile("SELECT 1; SELECT 2; SELECT 3", "ansi", "postgres", false).unwrap();
    assert_eq!(ok.len(), 3);

    let err = transpile("SELECT 1; SELECT * FROM; SELECT 3", "ansi", "postgres", false).unwrap_err();
    assert!(matches!(err, TranspileError::Syntax { .. }));
    assert_eq!(err.position().map(|p| p.line), Some(1));
}

#[test]
fn test_round_trip_through_public_api() {
    let cases = [
        ("postgres", "SELECT a::TEXT FROM t WHERE b ILIKE 'x%' ORDER BY a NULLS FIRST LIMIT 1"),
        ("mysql", "SELECT CONCAT(a, b) FROM t WHERE c = ? LIMIT 2, 3"),
        ("tsql", "SELECT TOP 3 [a b] FROM t WHERE c = @p1"),
        ("snowflake", "SELECT a FROM t QUALIFY RANK() OVER (ORDER BY a) = 1"),
        ("oracle", "SELECT a FROM t MINUS SELECT a FROM u"),
        ("bigquery", "SELECT SAFE_CAST(a AS STRING) FROM t"),
    ];
    for (dialect, sql) in cases {
        let original = parse(sql, dialect).unwrap();
        for pretty in [false, true] {
            let rendered = transpile(sql, dialect, dialect, pretty).unwrap();
            let reparsed = parse(&rendered.join(";\n"), dialect).unwrap();
            assert_eq!(reparsed, original, "{}: {:?}", dialect, rendered);
        }
    }
}

#[test]
fn test_cross_dialect_functions() {
    assert_eq!(
        transpile("SELECT ISNULL(a, 0), LEN(b) FROM t", "tsql", "postgres", false).unwrap(),
        vec!["SELECT COALESCE(a, 0), LENGTH(b) FROM t".to_string()]
    );
    assert_eq!(
        transpile("SELECT NVL(a, 0) FROM t", "oracle", "mysql", false).unwrap(),
        vec!["SELECT COALESCE(a, 0) FROM t".to_string()]
    );
}

#[test]
fn test_unsupported_construct_names_dialect() {
    let err = transpile("SELECT a FROM t QUALIFY a > 1", "snowflake", "mysql", false).unwrap_err();
    assert_eq!(err.to_string(), "Cannot express QUALIFY in dialect mysql");
}

#[test]
fn test_transpile_with_options() {
    let engine = Engine::global();
    let options = TranspileOptions {
        pretty: true,
        indent: 4,
        identify: true,
    };
    let out = engine
        .transpile_with("SELECT a FROM t", "ansi", "ansi", &options)
        .unwrap();
    assert_eq!(out, vec!["SELECT\n    \"a\"\nFROM\n    \"t\"".to_string()]);
}

#[test]
fn test_limit_parameters_keep_bind_order() {
    let sql = "SELECT a FROM t LIMIT ?, ?";
    assert_eq!(
        transpile(sql, "mysql", "postgres", false).unwrap(),
        vec!["SELECT a FROM t LIMIT $2 OFFSET $1".to_string()]
    );
    assert_eq!(
        transpile(sql, "mysql", "sqlite", false).unwrap(),
        vec!["SELECT a FROM t LIMIT ?2 OFFSET ?1".to_string()]
    );
    let err = transpile(sql, "mysql", "bigquery", false).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot express reordered bind parameter in dialect bigquery"
    );
}

#[test]
fn test_pretty_output_preserves_literal_newlines() {
    let sql = "SELECT 'a\nb' AS x FROM t";
    let out = transpile(sql, "postgres", "postgres", true).unwrap();
    assert_eq!(out, vec!["SELECT\n  'a\nb' AS x\nFROM\n  t".to_string()]);
    assert_eq!(parse(&out[0], "postgres").unwrap(), parse(sql, "postgres").unwrap());
}
