//! Expressions by precedence climbing.
//!
//! Binary operator symbols and their binding power come from the dialect's
//! operator table; `AND`, `OR`, `NOT` and the predicate keywords (`IS`,
//! `IN`, `LIKE`, `BETWEEN`) are fixed.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::ast::*;
use crate::dialect::{IntervalStyle, precedence};
use crate::error::TranspileResult;
use crate::parser::Parser;
use crate::tokens::{Token, TokenKind};

/// Reserved words that still name a function when followed by `(`.
const KEYWORD_FUNCTIONS: &[&str] = &[
    "LEFT",
    "RIGHT",
    "REPLACE",
    "INSERT",
    "IF",
    "TRUNCATE",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
];

/// What follows the left operand.
enum Infix {
    Binary(BinaryOperator),
    DoubleColon,
    Is,
    Predicate,
}

impl<'a> Parser<'a> {
    pub fn parse_expr(&mut self) -> TranspileResult<Expr> {
        self.parse_subexpr(0)
    }

    /// Parse operators binding tighter than `min`.
    pub(crate) fn parse_subexpr(&mut self, min: u8) -> TranspileResult<Expr> {
        self.nested(|p| {
            let mut left = p.parse_prefix()?;
            while let Some((infix, prec)) = p.peek_infix() {
                if prec <= min {
                    break;
                }
                left = p.parse_infix(left, infix, prec)?;
            }
            Ok(left)
        })
    }

    fn peek_infix(&self) -> Option<(Infix, u8)> {
        let token = self.peek();
        match token.kind {
            TokenKind::Keyword | TokenKind::Identifier => {
                let word = token.text.to_ascii_uppercase();
                match word.as_str() {
                    "AND" => Some((Infix::Binary(BinaryOperator::And), precedence::AND)),
                    "OR" => Some((Infix::Binary(BinaryOperator::Or), precedence::OR)),
                    "IS" => Some((Infix::Is, precedence::COMPARISON)),
                    "IN" | "LIKE" | "BETWEEN" => Some((Infix::Predicate, precedence::COMPARISON)),
                    "ILIKE" if self.dialect().parser.ilike => {
                        Some((Infix::Predicate, precedence::COMPARISON))
                    }
                    "NOT" => {
                        let next = self.peek_nth(1);
                        let negatable = next.is_word("IN")
                            || next.is_word("LIKE")
                            || next.is_word("BETWEEN")
                            || (self.dialect().parser.ilike && next.is_word("ILIKE"));
                        negatable.then_some((Infix::Predicate, precedence::COMPARISON))
                    }
                    _ => self.operator_infix(token),
                }
            }
            TokenKind::Operator => {
                if token.text == "::" && self.dialect().parser.double_colon_cast {
                    return Some((Infix::DoubleColon, precedence::CAST));
                }
                self.operator_infix(token)
            }
            _ => None,
        }
    }

    fn operator_infix(&self, token: &Token) -> Option<(Infix, u8)> {
        self.dialect()
            .parser
            .binary_operator(&token.text)
            .map(|rule| (Infix::Binary(rule.op), rule.precedence))
    }

    fn parse_infix(&mut self, left: Expr, infix: Infix, prec: u8) -> TranspileResult<Expr> {
        match infix {
            Infix::Binary(op) => {
                self.advance();
                let right = self.parse_subexpr(prec)?;
                Ok(Expr::binary(left, op, right))
            }
            Infix::DoubleColon => {
                self.advance();
                let data_type = self.parse_data_type()?;
                Ok(Expr::Cast {
                    expr: Box::new(left),
                    data_type,
                    try_cast: false,
                })
            }
            Infix::Is => {
                self.advance();
                let negated = self.eat_word("NOT");
                self.expect_word("NULL")?;
                Ok(Expr::IsNull {
                    expr: Box::new(left),
                    negated,
                })
            }
            Infix::Predicate => {
                let negated = self.eat_word("NOT");
                if self.eat_word("BETWEEN") {
                    let low = self.parse_subexpr(precedence::COMPARISON)?;
                    self.expect_word("AND")?;
                    let high = self.parse_subexpr(precedence::COMPARISON)?;
                    return Ok(Expr::Between {
                        expr: Box::new(left),
                        negated,
                        low: Box::new(low),
                        high: Box::new(high),
                    });
                }
                if self.eat_word("IN") {
                    return self.parse_in(left, negated);
                }
                let case_insensitive = if self.eat_word("LIKE") {
                    false
                } else {
                    self.expect_word("ILIKE")?;
                    true
                };
                let pattern = self.parse_subexpr(precedence::COMPARISON)?;
                let escape = if self.eat_word("ESCAPE") {
                    Some(Box::new(self.parse_prefix()?))
                } else {
                    None
                };
                Ok(Expr::Like {
                    expr: Box::new(left),
                    pattern: Box::new(pattern),
                    negated,
                    case_insensitive,
                    escape,
                })
            }
        }
    }

    fn parse_in(&mut self, left: Expr, negated: bool) -> TranspileResult<Expr> {
        self.expect_symbol("(")?;
        if self.peek_starts_query() {
            let subquery = self.parse_query()?;
            self.expect_symbol(")")?;
            return Ok(Expr::InSubquery {
                expr: Box::new(left),
                subquery: Box::new(subquery),
                negated,
            });
        }
        let list = self.parse_comma_separated(|p| p.parse_expr())?;
        self.expect_symbol(")")?;
        Ok(Expr::InList {
            expr: Box::new(left),
            list,
            negated,
        })
    }

    fn peek_starts_query(&self) -> bool {
        self.peek().is_word("SELECT") || self.peek().is_word("WITH")
    }

    /// Unary operators and primaries.
    pub(crate) fn parse_prefix(&mut self) -> TranspileResult<Expr> {
        if self.eat_word("NOT") {
            if self.eat_word("EXISTS") {
                return self.parse_exists(true);
            }
            let expr = self.parse_subexpr(precedence::NOT)?;
            return Ok(Expr::Unary {
                op: UnaryOperator::Not,
                expr: Box::new(expr),
            });
        }
        let op = match self.peek().kind {
            TokenKind::Operator => match self.peek().text.as_str() {
                "-" => Some(UnaryOperator::Minus),
                "+" => Some(UnaryOperator::Plus),
                "~" => Some(UnaryOperator::BitwiseNot),
                _ => None,
            },
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let expr = self.parse_subexpr(precedence::UNARY)?;
            return Ok(Expr::Unary {
                op,
                expr: Box::new(expr),
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> TranspileResult<Expr> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(Expr::Literal(Literal::Number(token.text)))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::string(token.text))
            }
            TokenKind::Parameter => self.parse_parameter(),
            TokenKind::Punctuation if token.text == "(" => {
                self.advance();
                if self.peek_starts_query() {
                    let query = self.parse_query()?;
                    self.expect_symbol(")")?;
                    return Ok(Expr::Subquery(Box::new(query)));
                }
                let expr = self.parse_expr()?;
                self.expect_symbol(")")?;
                Ok(Expr::Nested(Box::new(expr)))
            }
            TokenKind::Keyword | TokenKind::Identifier => self.parse_word_expr(token),
            TokenKind::QuotedIdentifier => self.parse_identifier_chain(),
            _ => {
                self.expect_here("expression");
                Err(self.error())
            }
        }
    }

    fn parse_word_expr(&mut self, token: Token) -> TranspileResult<Expr> {
        let word = token.text.to_ascii_uppercase();
        let rules = &self.dialect().parser;
        let next_is_paren = self.peek_nth(1).is_symbol("(");

        match word.as_str() {
            "NULL" => {
                self.advance();
                return Ok(Expr::Literal(Literal::Null));
            }
            "TRUE" | "FALSE" if rules.boolean_literals => {
                self.advance();
                return Ok(Expr::Literal(Literal::Boolean(word == "TRUE")));
            }
            "CASE" => return self.parse_case(),
            "CAST" if next_is_paren => return self.parse_cast(false),
            "EXISTS" if next_is_paren => {
                self.advance();
                return self.parse_exists(false);
            }
            "INTERVAL" if self.dialect().generator.interval.is_some() => {
                return self.parse_interval();
            }
            _ => {}
        }

        if next_is_paren && self.dialect().generator.try_cast.as_deref() == Some(word.as_str()) {
            return self.parse_cast(true);
        }

        if !next_is_paren {
            if let Some((_, kind)) = rules
                .current_time_keywords
                .iter()
                .find(|(keyword, _)| *keyword == word)
            {
                self.advance();
                return Ok(Expr::CurrentTime(*kind));
            }
        }

        if rules.typed_literals && token.kind == TokenKind::Identifier {
            let kind = match word.as_str() {
                "DATE" => Some(TemporalKind::Date),
                "TIME" => Some(TemporalKind::Time),
                "TIMESTAMP" => Some(TemporalKind::Timestamp),
                _ => None,
            };
            if let Some(kind) = kind {
                if self.peek_nth(1).kind == TokenKind::String {
                    self.advance();
                    let value = self.advance();
                    if !valid_temporal(kind, &value.text) {
                        return Err(self.error_at(&value, &format!("valid {} literal", kind.keyword())));
                    }
                    return Ok(Expr::Literal(Literal::Temporal {
                        kind,
                        value: value.text,
                    }));
                }
            }
        }

        let callable =
            token.kind == TokenKind::Identifier || KEYWORD_FUNCTIONS.contains(&word.as_str());
        if next_is_paren && callable {
            self.advance();
            return self.parse_function_call(token.text, Span::at(token.position));
        }

        if token.kind == TokenKind::Keyword {
            self.expect_here("expression");
            return Err(self.error());
        }
        self.parse_identifier_chain()
    }

    /// `a`, `t.a`, `s.t.a`, or a qualified function call `s.f(...)`.
    fn parse_identifier_chain(&mut self) -> TranspileResult<Expr> {
        let span = self.span();
        let mut parts = vec![self.parse_identifier()?];
        while self.peek().is_symbol(".") && !self.peek_nth(1).is_symbol("*") {
            self.advance();
            parts.push(self.parse_identifier()?);
        }
        if self.peek().is_symbol("(") && !parts.last().map(|p| p.quoted).unwrap_or(false) {
            let name = ObjectName(parts).to_string();
            return self.parse_function_call(name, span);
        }
        if parts.len() == 1 {
            Ok(Expr::Identifier(parts.remove(0)))
        } else {
            Ok(Expr::CompoundIdentifier(parts))
        }
    }

    fn parse_parameter(&mut self) -> TranspileResult<Expr> {
        let token = self.peek().clone();
        let rules = &self.dialect().parser;
        let body = &token.text[1..];
        let parameter = if body.is_empty() {
            rules.positional_params.then(|| {
                self.positional += 1;
                Parameter::Positional(self.positional)
            })
        } else if let Ok(n) = body.parse::<u32>() {
            rules.numbered_params.then_some(Parameter::Numbered(n))
        } else {
            rules
                .named_params
                .then(|| Parameter::Named(body.to_string()))
        };
        match parameter {
            Some(parameter) => {
                self.advance();
                Ok(Expr::Parameter(parameter))
            }
            None => {
                self.expect_here("expression");
                Err(self.error())
            }
        }
    }

    fn parse_case(&mut self) -> TranspileResult<Expr> {
        self.expect_word("CASE")?;
        let operand = if self.check_word("WHEN") {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        let mut conditions = Vec::new();
        while self.eat_word("WHEN") {
            let condition = self.parse_expr()?;
            self.expect_word("THEN")?;
            let result = self.parse_expr()?;
            conditions.push(WhenClause { condition, result });
        }
        if conditions.is_empty() {
            return Err(self.error());
        }
        let else_result = if self.eat_word("ELSE") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_word("END")?;
        Ok(Expr::Case {
            operand,
            conditions,
            else_result,
        })
    }

    /// `CAST(expr AS type)` and its non-failing variant; the name token is
    /// still pending.
    pub(crate) fn parse_cast(&mut self, try_cast: bool) -> TranspileResult<Expr> {
        self.advance();
        self.expect_symbol("(")?;
        let expr = self.parse_expr()?;
        self.expect_word("AS")?;
        let data_type = self.parse_data_type()?;
        self.expect_symbol(")")?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
            try_cast,
        })
    }

    /// After `EXISTS` (or `NOT EXISTS`).
    fn parse_exists(&mut self, negated: bool) -> TranspileResult<Expr> {
        self.expect_symbol("(")?;
        let subquery = self.parse_query()?;
        self.expect_symbol(")")?;
        Ok(Expr::Exists {
            subquery: Box::new(subquery),
            negated,
        })
    }

    fn parse_interval(&mut self) -> TranspileResult<Expr> {
        self.expect_word("INTERVAL")?;
        match self.dialect().generator.interval {
            Some(IntervalStyle::Bare) => {
                let value = self.parse_prefix()?;
                let unit = self.parse_datetime_field()?;
                Ok(Expr::Interval {
                    value: Box::new(value),
                    unit: Some(unit),
                })
            }
            _ => {
                let token = self.peek().clone();
                if token.kind != TokenKind::String {
                    self.expect_here("string");
                    return Err(self.error());
                }
                self.advance();
                let unit = if self.peek_datetime_field() {
                    Some(self.parse_datetime_field()?)
                } else {
                    None
                };
                Ok(Expr::Interval {
                    value: Box::new(Expr::string(token.text)),
                    unit,
                })
            }
        }
    }

    fn peek_datetime_field(&self) -> bool {
        let token = self.peek();
        matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword)
            && DateTimeField::parse(&token.text).is_some()
    }

    pub(crate) fn parse_datetime_field(&mut self) -> TranspileResult<DateTimeField> {
        if self.peek_datetime_field() {
            let token = self.advance();
            if let Some(field) = DateTimeField::parse(&token.text) {
                return Ok(field);
            }
        }
        self.expect_here("date part");
        Err(self.error())
    }
}

fn valid_temporal(kind: TemporalKind, value: &str) -> bool {
    match kind {
        TemporalKind::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        TemporalKind::Time => NaiveTime::parse_from_str(value, "%H:%M:%S%.f").is_ok()
            || NaiveTime::parse_from_str(value, "%H:%M").is_ok(),
        TemporalKind::Timestamp => {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f").is_ok()
                || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
                || DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z").is_ok()
                || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_temporal() {
        assert!(valid_temporal(TemporalKind::Date, "2024-02-29"));
        assert!(!valid_temporal(TemporalKind::Date, "2023-02-29"));
        assert!(!valid_temporal(TemporalKind::Date, "yesterday"));
        assert!(valid_temporal(TemporalKind::Time, "12:30:00"));
        assert!(valid_temporal(TemporalKind::Time, "12:30:00.125"));
        assert!(valid_temporal(TemporalKind::Timestamp, "2024-01-31 12:30:00"));
        assert!(valid_temporal(TemporalKind::Timestamp, "2024-01-31T12:30:00"));
        assert!(!valid_temporal(TemporalKind::Timestamp, "2024-13-01 00:00:00"));
    }
}
