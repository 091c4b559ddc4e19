//! Layout, quoting, precedence and parameter tests.

use pretty_assertions::assert_eq;

use super::*;
use crate::ast::*;
use crate::generator::Generator;

fn render_expr(expr: &Expr, dialect_name: &str) -> String {
    let d = dialect(dialect_name);
    Generator::new(&d, GenerateOptions::default()).expr(expr).unwrap()
}

fn ident(name: &str) -> Expr {
    Expr::ident(name)
}

#[test]
fn test_simple_select() {
    assert_eq!(
        to("SELECT a, b AS c FROM t WHERE x = 1", "ansi", "ansi"),
        "SELECT a, b AS c FROM t WHERE x = 1"
    );
    assert_eq!(
        to("select a from t group by a having count(*) > 1", "postgres", "postgres"),
        "SELECT a FROM t GROUP BY a HAVING COUNT(*) > 1"
    );
}

#[test]
fn test_parentheses_follow_precedence() {
    let sum_times = Expr::binary(
        Expr::binary(ident("a"), BinaryOperator::Plus, ident("b")),
        BinaryOperator::Multiply,
        ident("c"),
    );
    assert_eq!(render_expr(&sum_times, "ansi"), "(a + b) * c");

    let right_nested = Expr::binary(
        ident("a"),
        BinaryOperator::Minus,
        Expr::binary(ident("b"), BinaryOperator::Minus, ident("c")),
    );
    assert_eq!(render_expr(&right_nested, "ansi"), "a - (b - c)");

    let left_nested = Expr::binary(
        Expr::binary(ident("a"), BinaryOperator::Minus, ident("b")),
        BinaryOperator::Minus,
        ident("c"),
    );
    assert_eq!(render_expr(&left_nested, "ansi"), "a - b - c");

    let or_in_and = Expr::binary(
        Expr::binary(ident("a"), BinaryOperator::Or, ident("b")),
        BinaryOperator::And,
        ident("c"),
    );
    assert_eq!(render_expr(&or_in_and, "ansi"), "(a OR b) AND c");

    let not_and = Expr::Unary {
        op: UnaryOperator::Not,
        expr: Box::new(Expr::binary(ident("a"), BinaryOperator::And, ident("b"))),
    };
    assert_eq!(render_expr(&not_and, "ansi"), "NOT (a AND b)");
}

#[test]
fn test_double_minus_is_not_a_comment() {
    let e = Expr::Unary {
        op: UnaryOperator::Minus,
        expr: Box::new(Expr::Unary {
            op: UnaryOperator::Minus,
            expr: Box::new(Expr::number("1")),
        }),
    };
    assert_eq!(render_expr(&e, "ansi"), "- -1");
}

#[test]
fn test_explicit_parentheses_are_kept() {
    assert_eq!(to("SELECT (a + b) * c", "ansi", "ansi"), "SELECT (a + b) * c");
    assert_eq!(to("SELECT a * (b + c)", "ansi", "ansi"), "SELECT a * (b + c)");
}

#[test]
fn test_identifier_quoting() {
    let spaced = Expr::Identifier(Ident::new("my col"));
    assert_eq!(render_expr(&spaced, "ansi"), "\"my col\"");
    assert_eq!(render_expr(&spaced, "mysql"), "`my col`");
    assert_eq!(render_expr(&spaced, "tsql"), "[my col]");

    assert_eq!(render_expr(&ident("select"), "ansi"), "\"select\"");
    assert_eq!(render_expr(&ident("1a"), "ansi"), "\"1a\"");
    assert_eq!(render_expr(&ident("café"), "ansi"), "café");

    assert_eq!(
        render_expr(&Expr::Identifier(Ident::quoted("a\"b")), "ansi"),
        "\"a\"\"b\""
    );
    assert_eq!(
        render_expr(&Expr::Identifier(Ident::quoted("a]b")), "tsql"),
        "[a]]b]"
    );
}

#[test]
fn test_string_escaping() {
    assert_eq!(render_expr(&Expr::string("it's"), "ansi"), "'it''s'");
    assert_eq!(render_expr(&Expr::string("a\\b"), "ansi"), "'a\\b'");
    assert_eq!(render_expr(&Expr::string("a\\b"), "mysql"), "'a\\\\b'");
}

#[test]
fn test_identify_quotes_everything() {
    let options = GenerateOptions {
        identify: true,
        ..GenerateOptions::default()
    };
    assert_eq!(
        render("SELECT a FROM t", "ansi", "ansi", options).unwrap(),
        "SELECT \"a\" FROM \"t\""
    );
}

#[test]
fn test_pretty_layout() {
    assert_eq!(
        pretty(
            "SELECT a, b FROM t WHERE x = 1 ORDER BY a LIMIT 5",
            "postgres",
            "postgres"
        ),
        "SELECT\n  a,\n  b\nFROM\n  t\nWHERE x = 1\nORDER BY\n  a\nLIMIT 5"
    );
}

#[test]
fn test_pretty_nested_query() {
    assert_eq!(
        pretty("SELECT * FROM (SELECT a FROM t) AS s", "postgres", "postgres"),
        "SELECT\n  *\nFROM\n  (\n    SELECT\n      a\n    FROM\n      t\n  ) AS s"
    );
    assert_eq!(
        pretty("WITH c AS (SELECT a FROM t) SELECT a FROM c", "postgres", "postgres"),
        "WITH c AS (\n  SELECT\n    a\n  FROM\n    t\n)\nSELECT\n  a\nFROM\n  c"
    );
    assert_eq!(
        pretty("SELECT a FROM t UNION SELECT b FROM u", "postgres", "postgres"),
        "SELECT\n  a\nFROM\n  t\nUNION\nSELECT\n  b\nFROM\n  u"
    );
}

#[test]
fn test_pretty_keeps_multiline_literals() {
    assert_eq!(
        pretty("SELECT 'a\nb' AS x FROM t", "postgres", "postgres"),
        "SELECT\n  'a\nb' AS x\nFROM\n  t"
    );
    assert_eq!(
        pretty(
            "SELECT \"a\nb\" FROM (SELECT 'it''s\n' AS c FROM t) AS s",
            "postgres",
            "postgres"
        ),
        "SELECT\n  \"a\nb\"\nFROM\n  (\n    SELECT\n      'it''s\n' AS c\n    FROM\n      t\n  ) AS s"
    );
    assert_eq!(
        pretty("SELECT [a\n]]b] FROM t", "tsql", "tsql"),
        "SELECT\n  [a\n]]b]\nFROM\n  t"
    );
}

#[test]
fn test_pretty_create_table() {
    assert_eq!(
        pretty("CREATE TABLE t (a INT NOT NULL, b TEXT)", "postgres", "postgres"),
        "CREATE TABLE t (\n  a INT NOT NULL,\n  b TEXT\n)"
    );
}

#[test]
fn test_predicates() {
    assert_eq!(
        to(
            "SELECT a FROM t WHERE a NOT IN (1, 2) AND b NOT BETWEEN 1 AND 5 AND c NOT LIKE 'x%' AND d IS NOT NULL",
            "ansi",
            "ansi"
        ),
        "SELECT a FROM t WHERE a NOT IN (1, 2) AND b NOT BETWEEN 1 AND 5 AND c NOT LIKE 'x%' AND d IS NOT NULL"
    );
    assert_eq!(
        to(
            "SELECT a FROM t WHERE NOT EXISTS (SELECT 1 FROM u) AND a IN (SELECT a FROM u)",
            "ansi",
            "ansi"
        ),
        "SELECT a FROM t WHERE NOT EXISTS (SELECT 1 FROM u) AND a IN (SELECT a FROM u)"
    );
    assert_eq!(
        to("SELECT CASE a WHEN 1 THEN 'x' END FROM t", "ansi", "ansi"),
        "SELECT CASE a WHEN 1 THEN 'x' END FROM t"
    );
}

#[test]
fn test_functions_and_windows() {
    assert_eq!(
        to("SELECT count(DISTINCT a), COUNT(*), my_udf(b) FROM t", "postgres", "postgres"),
        "SELECT COUNT(DISTINCT a), COUNT(*), my_udf(b) FROM t"
    );
    assert_eq!(
        to(
            "SELECT ROW_NUMBER() OVER (PARTITION BY a ORDER BY b DESC ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) FROM t",
            "postgres",
            "postgres"
        ),
        "SELECT ROW_NUMBER() OVER (PARTITION BY a ORDER BY b DESC ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) FROM t"
    );
}

#[test]
fn test_dml() {
    assert_eq!(
        to(
            "INSERT INTO t (a, b) VALUES (1, 'x'), (2, 'y') RETURNING id",
            "postgres",
            "postgres"
        ),
        "INSERT INTO t (a, b) VALUES (1, 'x'), (2, 'y') RETURNING id"
    );
    assert_eq!(
        to("UPDATE t AS x SET a = a + 1, x.b = 2 WHERE id = 1", "postgres", "postgres"),
        "UPDATE t AS x SET a = a + 1, x.b = 2 WHERE id = 1"
    );
    assert_eq!(
        to("DELETE FROM t WHERE a IN (SELECT a FROM u)", "postgres", "postgres"),
        "DELETE FROM t WHERE a IN (SELECT a FROM u)"
    );
}

#[test]
fn test_positional_parameters_are_numbered() {
    assert_eq!(
        to("SELECT ? FROM t WHERE a = ? LIMIT ?", "mysql", "postgres"),
        "SELECT $1 FROM t WHERE a = $2 LIMIT $3"
    );
    assert_eq!(to("SELECT $1 FROM t", "postgres", "mysql"), "SELECT ? FROM t");
    assert_eq!(to("SELECT $2, $1", "postgres", "tsql"), "SELECT @p2, @p1");
}

#[test]
fn test_named_parameters() {
    assert_eq!(to("SELECT @name", "tsql", "sqlite"), "SELECT :name");
    assert_eq!(unsupported("SELECT @name", "tsql", "postgres"), "named parameter");
    assert_eq!(unsupported("SELECT @name", "tsql", "mysql"), "named parameter");
}

#[test]
fn test_ordinal_resets_per_statement() {
    let d = dialect("postgres");
    let generator = Generator::new(&d, GenerateOptions::default());
    let statement = parse_one("SELECT ?", "mysql");
    assert_eq!(generator.generate(&statement).unwrap(), "SELECT $1");
    assert_eq!(generator.generate(&statement).unwrap(), "SELECT $1");
}

#[test]
fn test_parameters_keep_source_order_across_limit_rewrites() {
    let sql = "SELECT a FROM t LIMIT ?, ?";
    assert_eq!(to(sql, "mysql", "postgres"), "SELECT a FROM t LIMIT $2 OFFSET $1");
    assert_eq!(
        to(sql, "mysql", "tsql"),
        "SELECT a FROM t ORDER BY (SELECT NULL) OFFSET @p1 ROWS FETCH NEXT @p2 ROWS ONLY"
    );
    assert_eq!(to(sql, "mysql", "sqlite"), "SELECT a FROM t LIMIT ?2 OFFSET ?1");
    assert_eq!(to(sql, "mysql", "mysql"), "SELECT a FROM t LIMIT ?, ?");
    assert_eq!(
        to("SELECT ? FROM t WHERE b = ? LIMIT ?, ?", "mysql", "mysql"),
        "SELECT ? FROM t WHERE b = ? LIMIT ?, ?"
    );
    assert_eq!(unsupported(sql, "mysql", "bigquery"), "reordered bind parameter");
}

#[test]
fn test_bare_placeholders_need_ordered_binds() {
    assert_eq!(unsupported("SELECT $2, $1", "postgres", "mysql"), "reordered bind parameter");
    assert_eq!(unsupported("SELECT $1, $1", "postgres", "mysql"), "reordered bind parameter");
    assert_eq!(to("SELECT $1, $1", "postgres", "sqlite"), "SELECT ?1, ?1");
    assert_eq!(
        to("SELECT POSITION(? IN ?)", "ansi", "postgres"),
        "SELECT STRPOS($2, $1)"
    );
}
