use pretty_assertions::assert_eq;
use sqlingual::{ValidationError, ValidationResult, list_dialects, transpile, validate};

#[test]
fn test_truncated_clause_reports_point_of_failure() {
    let result = validate("SELECT * FROM", "ansi");
    assert!(!result.ok);
    let error = result.error.expect("error details");
    assert_eq!((error.line, error.column), (Some(1), Some(14)));
    assert!(error.message.contains("line 1, column 14"), "{}", error.message);
}

#[test]
fn test_positions_span_lines() {
    let result = validate("SELECT a\nFROM t\nWHERE", "postgres");
    let error = result.error.expect("error details");
    assert_eq!((error.line, error.column), (Some(3), Some(6)));

    // unterminated strings point at the opening quote
    let result = validate("SELECT\n  'abc", "postgres");
    let error = result.error.expect("error details");
    assert_eq!((error.line, error.column), (Some(2), Some(3)));
}

#[test]
fn test_valid_sql() {
    assert_eq!(
        validate("SELECT a FROM t WHERE b = 1", "mysql"),
        ValidationResult {
            ok: true,
            error: None
        }
    );
}

#[test]
fn test_unknown_dialect_is_invalid() {
    let result = validate("SELECT 1", "unknown_dialect_xyz");
    assert_eq!(
        result.error,
        Some(ValidationError {
            message: "Unsupported dialect: 'unknown_dialect_xyz'".to_string(),
            line: None,
            column: None,
        })
    );
}

#[test]
fn test_validation_agrees_with_same_dialect_transpile() {
    let corpus = [
        "SELECT 1",
        "SELECT * FROM",
        "SELECT TOP 5 a FROM t",
        "SELECT a FROM t LIMIT 5, 10",
        "SELECT a FROM t LIMIT 5 OFFSET 2",
        "SELECT a FROM t OFFSET 2 ROWS FETCH FIRST 5 ROWS ONLY",
        "SELECT a FROM t QUALIFY a > 1",
        "SELECT a::INT FROM t",
        "SELECT a FROM t WHERE b ILIKE 'x'",
        "SELECT DISTINCT ON (a) a FROM t",
        "SELECT a FROM t FULL OUTER JOIN u ON t.id = u.id",
        "SELECT a FROM t JOIN u USING (id)",
        "INSERT INTO t (a) VALUES (1) RETURNING a",
        "CREATE TABLE IF NOT EXISTS t (a INT)",
        "DROP TABLE IF EXISTS t CASCADE",
        "SELECT TRY_CAST(a AS INT) FROM t",
        "SELECT a FROM t MINUS SELECT a FROM u",
        "SELECT DATE '2024-02-30'",
        "SELECT 'unterminated",
        "SELECT a FROM t ORDER BY a NULLS LAST",
        "SELECT TRUE, $1, ?, :name, @name",
        "SELECT a FROM t LIMIT ?, ?",
        "SELECT WHERE(1) FROM t",
        "SELECT 'a\nb' AS x FROM t",
    ];
    for dialect in list_dialects() {
        for sql in corpus {
            let validated = validate(sql, &dialect).ok;
            let transpiled = transpile(sql, &dialect, &dialect, false).is_ok();
            assert_eq!(validated, transpiled, "{}: {}", dialect, sql);
        }
    }
}

#[test]
fn test_validation_result_serializes() {
    let json = serde_json::to_value(validate("SELECT * FROM", "ansi")).unwrap();
    assert_eq!(json["ok"], serde_json::json!(false));
    assert_eq!(json["error"]["line"], serde_json::json!(1));
    assert_eq!(json["error"]["column"], serde_json::json!(14));

    let json = serde_json::to_string(&validate("SELECT 1", "ansi")).unwrap();
    assert_eq!(json, r#"{"ok":true}"#);
}

#[test]
fn test_reserved_word_calls_are_invalid() {
    let result = validate("SELECT WHERE(1) FROM t", "ansi");
    assert!(!result.ok);
    let error = result.error.expect("error details");
    assert_eq!((error.line, error.column), (Some(1), Some(8)));

    // DISTINCT ON is not MySQL; `ON` must not turn into a function call
    assert!(!validate("SELECT DISTINCT ON (a) a FROM t", "mysql").ok);
    assert!(transpile("SELECT DISTINCT ON (a) a FROM t", "mysql", "postgres", false).is_err());
}

#[test]
fn test_deep_nesting_is_an_error_not_a_crash() {
    let sql = format!("SELECT {}1{}", "(".repeat(50_000), ")".repeat(50_000));
    let result = validate(&sql, "ansi");
    assert!(!result.ok);
    assert!(
        result.error.expect("error details").message.contains("levels of nesting"),
        "nesting error expected"
    );
}
