use pretty_assertions::assert_eq;

use super::*;

fn n(v: &str) -> Expr {
    Expr::number(v)
}

#[test]
fn test_precedence() {
    // 1 + 2 * 3
    assert_eq!(
        expr("1 + 2 * 3", "ansi"),
        Expr::binary(
            n("1"),
            BinaryOperator::Plus,
            Expr::binary(n("2"), BinaryOperator::Multiply, n("3")),
        )
    );
    // left associative
    assert_eq!(
        expr("1 - 2 - 3", "ansi"),
        Expr::binary(
            Expr::binary(n("1"), BinaryOperator::Minus, n("2")),
            BinaryOperator::Minus,
            n("3"),
        )
    );
    // AND binds tighter than OR
    assert_eq!(
        expr("a OR b AND c", "ansi"),
        Expr::binary(
            Expr::ident("a"),
            BinaryOperator::Or,
            Expr::binary(Expr::ident("b"), BinaryOperator::And, Expr::ident("c")),
        )
    );
}

#[test]
fn test_unary_and_not() {
    assert_eq!(
        expr("-a * b", "ansi"),
        Expr::binary(
            Expr::Unary {
                op: UnaryOperator::Minus,
                expr: Box::new(Expr::ident("a")),
            },
            BinaryOperator::Multiply,
            Expr::ident("b"),
        )
    );
    assert_eq!(
        expr("NOT a = 1", "ansi"),
        Expr::Unary {
            op: UnaryOperator::Not,
            expr: Box::new(Expr::binary(Expr::ident("a"), BinaryOperator::Eq, n("1"))),
        }
    );
}

#[test]
fn test_predicates() {
    assert_eq!(
        expr("a NOT BETWEEN 1 AND 2", "ansi"),
        Expr::Between {
            expr: Box::new(Expr::ident("a")),
            negated: true,
            low: Box::new(n("1")),
            high: Box::new(n("2")),
        }
    );
    assert_eq!(
        expr("a IN (1, 2)", "ansi"),
        Expr::InList {
            expr: Box::new(Expr::ident("a")),
            list: vec![n("1"), n("2")],
            negated: false,
        }
    );
    assert!(matches!(
        expr("a NOT IN (SELECT b FROM t)", "ansi"),
        Expr::InSubquery { negated: true, .. }
    ));
    assert_eq!(
        expr("a IS NOT NULL", "ansi"),
        Expr::IsNull {
            expr: Box::new(Expr::ident("a")),
            negated: true,
        }
    );
    assert!(matches!(
        expr("a ILIKE 'x%'", "postgres"),
        Expr::Like {
            case_insensitive: true,
            negated: false,
            ..
        }
    ));
    assert!(matches!(
        expr("NOT EXISTS (SELECT 1)", "ansi"),
        Expr::Exists { negated: true, .. }
    ));
}

#[test]
fn test_dialect_operators() {
    // `||` is concatenation in postgres and OR in mysql
    assert_eq!(
        expr("a || b", "postgres"),
        Expr::binary(Expr::ident("a"), BinaryOperator::Concat, Expr::ident("b"))
    );
    assert_eq!(
        expr("a || b", "mysql"),
        Expr::binary(Expr::ident("a"), BinaryOperator::Or, Expr::ident("b"))
    );
    assert_eq!(
        expr("2 ^ 3", "postgres"),
        Expr::binary(n("2"), BinaryOperator::Power, n("3"))
    );
    assert_eq!(
        expr("2 ^ 3", "mysql"),
        Expr::binary(n("2"), BinaryOperator::BitwiseXor, n("3"))
    );
}

#[test]
fn test_casts() {
    assert_eq!(
        expr("a::VARCHAR(10)", "postgres"),
        Expr::Cast {
            expr: Box::new(Expr::ident("a")),
            data_type: DataType::Varchar(Some(10)),
            try_cast: false,
        }
    );
    assert_eq!(
        expr("CAST(a AS DOUBLE PRECISION)", "ansi"),
        Expr::Cast {
            expr: Box::new(Expr::ident("a")),
            data_type: DataType::Double,
            try_cast: false,
        }
    );
    assert!(matches!(
        expr("TRY_CAST(a AS INT)", "tsql"),
        Expr::Cast { try_cast: true, .. }
    ));
    assert!(matches!(
        expr("SAFE_CAST(a AS INT64)", "bigquery"),
        Expr::Cast {
            try_cast: true,
            data_type: DataType::Int,
            ..
        }
    ));
    assert_eq!(
        expr("CAST(a AS my_type)", "ansi"),
        Expr::Cast {
            expr: Box::new(Expr::ident("a")),
            data_type: DataType::Custom("my_type".to_string()),
            try_cast: false,
        }
    );
}

#[test]
fn test_tsql_max_types() {
    assert!(matches!(
        expr("CAST(a AS VARCHAR(MAX))", "tsql"),
        Expr::Cast {
            data_type: DataType::Text,
            ..
        }
    ));
}

#[test]
fn test_function_canonicalization() {
    assert_eq!(
        expr("nvl(a, 0)", "ansi"),
        Expr::function("COALESCE", vec![Expr::ident("a"), n("0")])
    );
    assert_eq!(
        expr("LEN(a)", "tsql"),
        Expr::function("LENGTH", vec![Expr::ident("a")])
    );
    // needle first in CHARINDEX, haystack first in STRPOS
    assert_eq!(
        expr("CHARINDEX('x', a)", "tsql"),
        Expr::function("STRPOS", vec![Expr::ident("a"), Expr::string("x")])
    );
    assert_eq!(
        expr("POSITION('x' IN a)", "postgres"),
        Expr::function("STRPOS", vec![Expr::ident("a"), Expr::string("x")])
    );
    assert_eq!(
        expr("my_udf(a)", "ansi"),
        Expr::function("my_udf", vec![Expr::ident("a")])
    );
}

#[test]
fn test_count_and_windows() {
    match expr("COUNT(DISTINCT a)", "ansi") {
        Expr::Function(f) => {
            assert_eq!(f.name, "COUNT");
            assert!(f.distinct);
        }
        other => panic!("unexpected {:?}", other),
    }
    match expr("COUNT(*)", "ansi") {
        Expr::Function(f) => assert_eq!(f.args, vec![FunctionArg::Wildcard]),
        other => panic!("unexpected {:?}", other),
    }
    match expr(
        "SUM(x) OVER (PARTITION BY a ORDER BY b ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)",
        "postgres",
    ) {
        Expr::Function(f) => {
            let over = f.over.unwrap();
            assert_eq!(over.partition_by, vec![Expr::ident("a")]);
            assert_eq!(
                over.frame,
                Some(WindowFrame {
                    units: FrameUnits::Rows,
                    start: FrameBound::UnboundedPreceding,
                    end: Some(FrameBound::CurrentRow),
                })
            );
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_conditionals() {
    let iif = expr("IIF(a > 1, 'x', 'y')", "tsql");
    assert_eq!(
        iif,
        Expr::If {
            condition: Box::new(Expr::binary(Expr::ident("a"), BinaryOperator::Gt, n("1"))),
            then: Box::new(Expr::string("x")),
            otherwise: Box::new(Expr::string("y")),
        }
    );
    assert_eq!(expr("IF(a > 1, 'x', 'y')", "mysql"), iif);
    assert!(matches!(
        expr("CASE a WHEN 1 THEN 'x' ELSE 'y' END", "ansi"),
        Expr::Case {
            operand: Some(_),
            else_result: Some(_),
            ..
        }
    ));
}

#[test]
fn test_literals() {
    assert_eq!(expr("TRUE", "postgres"), Expr::Literal(Literal::Boolean(true)));
    assert_eq!(expr("NULL", "ansi"), Expr::Literal(Literal::Null));
    assert_eq!(
        expr("DATE '2024-01-31'", "ansi"),
        Expr::Literal(Literal::Temporal {
            kind: TemporalKind::Date,
            value: "2024-01-31".to_string(),
        })
    );
    assert_eq!(expr("'it''s'", "ansi"), Expr::string("it's"));
}

#[test]
fn test_current_time() {
    assert_eq!(
        expr("CURRENT_TIMESTAMP", "ansi"),
        Expr::CurrentTime(CurrentTimeKind::Timestamp)
    );
    assert_eq!(
        expr("GETDATE()", "tsql"),
        Expr::CurrentTime(CurrentTimeKind::Timestamp)
    );
    assert_eq!(
        expr("NOW()", "postgres"),
        Expr::CurrentTime(CurrentTimeKind::Timestamp)
    );
}

#[test]
fn test_extract_and_interval() {
    let extract = Expr::Extract {
        field: DateTimeField::Year,
        expr: Box::new(Expr::ident("d")),
    };
    assert_eq!(expr("EXTRACT(YEAR FROM d)", "postgres"), extract);
    assert_eq!(expr("DATEPART(yy, d)", "tsql"), extract);

    assert_eq!(
        expr("INTERVAL '1' DAY", "postgres"),
        Expr::Interval {
            value: Box::new(Expr::string("1")),
            unit: Some(DateTimeField::Day),
        }
    );
    assert_eq!(
        expr("INTERVAL 3 DAY", "mysql"),
        Expr::Interval {
            value: Box::new(n("3")),
            unit: Some(DateTimeField::Day),
        }
    );
}

#[test]
fn test_parameters() {
    assert_eq!(expr("$1", "postgres"), Expr::Parameter(Parameter::Numbered(1)));
    assert_eq!(expr("?", "mysql"), Expr::Parameter(Parameter::Positional(1)));
    assert_eq!(
        expr("@name", "tsql"),
        Expr::Parameter(Parameter::Named("name".to_string()))
    );
    assert_eq!(
        expr(":id", "sqlite"),
        Expr::Parameter(Parameter::Named("id".to_string()))
    );
}

#[test]
fn test_positional_parameters_count_in_text_order() {
    let statements = parse_sql("SELECT ? FROM t LIMIT ?, ?; SELECT ?", &dialect("mysql")).unwrap();
    let first = match &statements[0] {
        Statement::Query(q) => q,
        other => panic!("expected a query, got {:?}", other),
    };
    let select = match &first.body {
        SetExpr::Select(s) => s,
        other => panic!("expected a SELECT body, got {:?}", other),
    };
    assert_eq!(
        select.projection[0],
        SelectItem::Expr {
            expr: Expr::Parameter(Parameter::Positional(1)),
            alias: None,
        }
    );
    assert_eq!(
        first.limit,
        Some(Limit {
            count: Some(Expr::Parameter(Parameter::Positional(3))),
            offset: Some(Expr::Parameter(Parameter::Positional(2))),
        })
    );
    // numbering restarts with each statement
    assert_eq!(statements[1], parse_one("SELECT ?", "mysql"));
}
