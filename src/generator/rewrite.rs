//! Pure AST rewrites applied before rendering, for targets that spell a
//! construct as a different construct.

use tracing::trace;

use crate::ast::*;

/// Operands of a chain of `||` concatenations, left to right.
/// Parenthesised sub-chains are kept whole.
pub fn flatten_concat(expr: &Expr) -> Vec<&Expr> {
    match expr {
        Expr::Binary {
            left,
            op: BinaryOperator::Concat,
            right,
        } => {
            let mut operands = flatten_concat(left);
            operands.extend(flatten_concat(right));
            operands
        }
        other => vec![other],
    }
}

/// Split an interval string such as `'3 days'` into its amount and unit.
pub fn split_interval(text: &str) -> Option<(String, DateTimeField)> {
    let mut words = text.split_whitespace();
    let amount = words.next()?;
    let unit = DateTimeField::parse(words.next()?)?;
    if words.next().is_some() {
        return None;
    }
    let digits = amount.strip_prefix('-').unwrap_or(amount);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    trace!(text, "split interval string");
    Some((amount.to_string(), unit))
}

/// `IF(c, a, b)` as `CASE WHEN c THEN a ELSE b END`.
pub fn if_to_case(condition: &Expr, then: &Expr, otherwise: &Expr) -> Expr {
    trace!("rewriting IF as CASE");
    Expr::Case {
        operand: None,
        conditions: vec![WhenClause {
            condition: condition.clone(),
            result: then.clone(),
        }],
        else_result: Some(Box::new(otherwise.clone())),
    }
}

/// `a ILIKE b` as `LOWER(a) LIKE LOWER(b)`.
pub fn ilike_to_like(expr: &Expr, pattern: &Expr) -> (Expr, Expr) {
    trace!("rewriting ILIKE as LOWER() LIKE LOWER()");
    (
        Expr::function("LOWER", vec![expr.clone()]),
        Expr::function("LOWER", vec![pattern.clone()]),
    )
}

/// `ORDER BY (SELECT NULL)`, for targets that need an ordering before
/// `OFFSET` when the query has none.
pub fn arbitrary_order() -> OrderByExpr {
    trace!("adding ORDER BY (SELECT NULL)");
    let null = Query::from_body(SetExpr::Select(Box::new(Select {
        distinct: None,
        projection: vec![SelectItem::Expr {
            expr: Expr::Literal(Literal::Null),
            alias: None,
        }],
        from: vec![],
        selection: None,
        group_by: vec![],
        having: None,
        qualify: None,
        span: Span::default(),
    })));
    OrderByExpr {
        expr: Expr::Subquery(Box::new(null)),
        asc: None,
        nulls_first: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flatten_concat() {
        let chain = Expr::binary(
            Expr::binary(Expr::ident("a"), BinaryOperator::Concat, Expr::ident("b")),
            BinaryOperator::Concat,
            Expr::Nested(Box::new(Expr::binary(
                Expr::ident("c"),
                BinaryOperator::Concat,
                Expr::ident("d"),
            ))),
        );
        let operands = flatten_concat(&chain);
        assert_eq!(operands.len(), 3);
        assert_eq!(operands[0], &Expr::ident("a"));
        assert!(matches!(operands[2], Expr::Nested(_)));
    }

    #[test]
    fn test_split_interval() {
        assert_eq!(
            split_interval("3 days"),
            Some(("3".to_string(), DateTimeField::Day))
        );
        assert_eq!(
            split_interval(" -1 HOUR "),
            Some(("-1".to_string(), DateTimeField::Hour))
        );
        assert_eq!(split_interval("1 day 2 hours"), None);
        assert_eq!(split_interval("1"), None);
        assert_eq!(split_interval("many days"), None);
    }

    #[test]
    fn test_if_to_case() {
        let case = if_to_case(&Expr::ident("c"), &Expr::number("1"), &Expr::number("2"));
        match case {
            Expr::Case {
                operand: None,
                conditions,
                else_result: Some(e),
            } => {
                assert_eq!(conditions.len(), 1);
                assert_eq!(*e, Expr::number("2"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
