//! Queries: WITH, set operations, SELECT, FROM/JOIN, ORDER BY and the
//! row-limiting clauses.

use crate::ast::*;
use crate::dialect::Construct;
use crate::error::TranspileResult;
use crate::parser::Parser;
use crate::tokens::TokenKind;

impl<'a> Parser<'a> {
    /// `[WITH ...] body [ORDER BY ...] [LIMIT / OFFSET / FETCH]`
    pub fn parse_query(&mut self) -> TranspileResult<Query> {
        self.nested(|p| {
            let with = if p.eat_word("WITH") {
                Some(p.parse_with()?)
            } else {
                None
            };
            let (body, top) = p.parse_set_expr()?;
            let order_by = p.parse_order_by()?;
            let limit = p.parse_limit(top, !order_by.is_empty())?;
            Ok(Query {
                with,
                body,
                order_by,
                limit,
            })
        })
    }

    fn parse_with(&mut self) -> TranspileResult<With> {
        let recursive = self.eat_word("RECURSIVE");
        let ctes = self.parse_comma_separated(|p| {
            let alias = p.parse_identifier()?;
            let columns = if p.peek().is_symbol("(") {
                p.parse_parenthesized_identifiers()?
            } else {
                vec![]
            };
            p.expect_word("AS")?;
            p.expect_symbol("(")?;
            let query = p.parse_query()?;
            p.expect_symbol(")")?;
            Ok(Cte {
                alias,
                columns,
                query: Box::new(query),
            })
        })?;
        Ok(With { recursive, ctes })
    }

    /// Left-associative chain of set operations. The second element is a
    /// `TOP` count taken from the leading SELECT, which belongs to the
    /// enclosing query when there is no set operation.
    fn parse_set_expr(&mut self) -> TranspileResult<(SetExpr, Option<Expr>)> {
        let (mut left, mut top) = self.parse_set_primary()?;
        while let Some(op) = self.parse_set_operator() {
            let quantifier = if self.eat_word("ALL") {
                SetQuantifier::All
            } else if self.eat_word("DISTINCT") {
                SetQuantifier::Distinct
            } else {
                SetQuantifier::None
            };
            let lhs = with_top(left, top.take());
            let (right, right_top) = self.parse_set_primary()?;
            left = SetExpr::SetOperation {
                op,
                quantifier,
                left: Box::new(lhs),
                right: Box::new(with_top(right, right_top)),
            };
        }
        Ok((left, top))
    }

    fn parse_set_operator(&mut self) -> Option<SetOperator> {
        if self.eat_word("UNION") {
            Some(SetOperator::Union)
        } else if self.eat_word("INTERSECT") {
            Some(SetOperator::Intersect)
        } else if self.eat_word("EXCEPT") {
            Some(SetOperator::Except)
        } else if self.dialect().parser.minus && self.eat_word("MINUS") {
            Some(SetOperator::Except)
        } else {
            None
        }
    }

    fn parse_set_primary(&mut self) -> TranspileResult<(SetExpr, Option<Expr>)> {
        if self.check_word("SELECT") {
            let (select, top) = self.parse_select()?;
            return Ok((SetExpr::Select(Box::new(select)), top));
        }
        if self.eat_word("VALUES") {
            let rows = self.parse_comma_separated(|p| {
                p.expect_symbol("(")?;
                let row = p.parse_comma_separated(|p| p.parse_expr())?;
                p.expect_symbol(")")?;
                Ok(row)
            })?;
            return Ok((SetExpr::Values(Values { rows }), None));
        }
        if self.eat_symbol("(") {
            let query = self.parse_query()?;
            self.expect_symbol(")")?;
            return Ok((SetExpr::Query(Box::new(query)), None));
        }
        Err(self.error())
    }

    fn parse_select(&mut self) -> TranspileResult<(Select, Option<Expr>)> {
        let span = self.span();
        self.expect_word("SELECT")?;

        let distinct = if self.eat_word("DISTINCT") {
            if self.supports(Construct::DistinctOn)
                && self.peek().is_word("ON")
                && self.peek_nth(1).is_symbol("(")
            {
                self.advance();
                self.advance();
                let exprs = self.parse_comma_separated(|p| p.parse_expr())?;
                self.expect_symbol(")")?;
                Some(Distinct::On(exprs))
            } else {
                Some(Distinct::Distinct)
            }
        } else {
            self.eat_word("ALL");
            None
        };

        let top = if self.dialect().parser.top && self.eat_word("TOP") {
            if self.eat_symbol("(") {
                let count = self.parse_expr()?;
                self.expect_symbol(")")?;
                Some(count)
            } else {
                Some(self.parse_prefix()?)
            }
        } else {
            None
        };

        let projection = self.parse_comma_separated(|p| p.parse_select_item())?;

        let from = if self.eat_word("FROM") {
            self.parse_comma_separated(|p| p.parse_table_with_joins())?
        } else if self.dialect().parser.require_from {
            return Err(self.error());
        } else {
            vec![]
        };

        let selection = if self.eat_word("WHERE") {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let group_by = if self.eat_words(&["GROUP", "BY"]) {
            self.parse_comma_separated(|p| p.parse_expr())?
        } else {
            vec![]
        };

        let having = if self.eat_word("HAVING") {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let qualify = if self.supports(Construct::Qualify) && self.eat_word("QUALIFY") {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok((
            Select {
                distinct,
                projection,
                from,
                selection,
                group_by,
                having,
                qualify,
                span,
            },
            top,
        ))
    }

    pub(crate) fn parse_select_item(&mut self) -> TranspileResult<SelectItem> {
        if self.eat_symbol("*") {
            return Ok(SelectItem::Wildcard);
        }
        if let Some(parts) = self.qualified_wildcard_parts() {
            let mut name = Vec::with_capacity(parts);
            for _ in 0..parts {
                name.push(self.parse_identifier()?);
                self.advance();
            }
            self.advance();
            return Ok(SelectItem::QualifiedWildcard(ObjectName(name)));
        }
        let expr = self.parse_expr()?;
        let alias = self.parse_optional_alias()?;
        Ok(SelectItem::Expr { expr, alias })
    }

    /// Number of name parts in a `t.*` / `s.t.*` item starting here.
    fn qualified_wildcard_parts(&self) -> Option<usize> {
        let mut i = 0;
        loop {
            let ident = matches!(
                self.peek_nth(i).kind,
                TokenKind::Identifier | TokenKind::QuotedIdentifier
            );
            if !ident || !self.peek_nth(i + 1).is_symbol(".") {
                return None;
            }
            if self.peek_nth(i + 2).is_symbol("*") {
                return Some(i / 2 + 1);
            }
            i += 2;
        }
    }

    /// `AS name` or a bare non-reserved name.
    pub(crate) fn parse_optional_alias(&mut self) -> TranspileResult<Option<Ident>> {
        if self.eat_word("AS") {
            return self.parse_identifier().map(Some);
        }
        if self.peek_is_identifier() {
            return self.parse_identifier().map(Some);
        }
        Ok(None)
    }

    fn parse_table_alias(&mut self) -> TranspileResult<Option<TableAlias>> {
        let Some(name) = self.parse_optional_alias()? else {
            return Ok(None);
        };
        let columns = if self.peek().is_symbol("(") {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };
        Ok(Some(TableAlias { name, columns }))
    }

    fn parse_table_with_joins(&mut self) -> TranspileResult<TableWithJoins> {
        let relation = self.parse_table_factor()?;
        let mut joins = Vec::new();
        while let Some(join) = self.parse_join()? {
            joins.push(join);
        }
        Ok(TableWithJoins { relation, joins })
    }

    fn parse_table_factor(&mut self) -> TranspileResult<TableFactor> {
        if self.eat_symbol("(") {
            let subquery = self.parse_query()?;
            self.expect_symbol(")")?;
            let alias = self.parse_table_alias()?;
            return Ok(TableFactor::Derived {
                subquery: Box::new(subquery),
                alias,
            });
        }
        let span = self.span();
        let name = self.parse_object_name()?;
        if self.peek().is_symbol("(") {
            let function = self.parse_function_call(name.to_string(), span)?;
            let alias = self.parse_table_alias()?;
            return match function {
                Expr::Function(function) => Ok(TableFactor::Function { function, alias }),
                _ => Err(self.error_at(self.peek(), "table function")),
            };
        }
        let alias = self.parse_table_alias()?;
        Ok(TableFactor::Table { name, alias })
    }

    fn parse_join(&mut self) -> TranspileResult<Option<Join>> {
        let natural = self.supports(Construct::NaturalJoin) && self.eat_word("NATURAL");

        let kind = if self.eat_word("JOIN") {
            JoinKind::Inner
        } else if self.eat_word("INNER") {
            self.expect_word("JOIN")?;
            JoinKind::Inner
        } else if self.eat_word("LEFT") {
            self.eat_word("OUTER");
            self.expect_word("JOIN")?;
            JoinKind::Left
        } else if self.eat_word("RIGHT") {
            self.eat_word("OUTER");
            self.expect_word("JOIN")?;
            JoinKind::Right
        } else if self.supports(Construct::FullOuterJoin) && self.eat_word("FULL") {
            self.eat_word("OUTER");
            self.expect_word("JOIN")?;
            JoinKind::Full
        } else if !natural && self.eat_word("CROSS") {
            self.expect_word("JOIN")?;
            JoinKind::Cross
        } else if natural {
            return Err(self.error());
        } else {
            return Ok(None);
        };

        let relation = self.parse_table_factor()?;
        let constraint = if natural {
            JoinConstraint::Natural
        } else if kind == JoinKind::Cross {
            JoinConstraint::None
        } else if self.eat_word("ON") {
            JoinConstraint::On(self.parse_expr()?)
        } else if self.supports(Construct::JoinUsing) && self.eat_word("USING") {
            JoinConstraint::Using(self.parse_parenthesized_identifiers()?)
        } else {
            return Err(self.error());
        };

        Ok(Some(Join {
            relation,
            kind,
            constraint,
        }))
    }

    pub(crate) fn parse_order_by(&mut self) -> TranspileResult<Vec<OrderByExpr>> {
        if !self.eat_words(&["ORDER", "BY"]) {
            return Ok(vec![]);
        }
        self.parse_comma_separated(|p| p.parse_order_by_expr())
    }

    fn parse_order_by_expr(&mut self) -> TranspileResult<OrderByExpr> {
        let expr = self.parse_expr()?;
        let asc = if self.eat_word("ASC") {
            Some(true)
        } else if self.eat_word("DESC") {
            Some(false)
        } else {
            None
        };
        let nulls_first = if self.supports(Construct::NullsOrdering) && self.eat_word("NULLS") {
            if self.eat_word("FIRST") {
                Some(true)
            } else if self.eat_word("LAST") {
                Some(false)
            } else {
                return Err(self.error());
            }
        } else {
            None
        };
        Ok(OrderByExpr {
            expr,
            asc,
            nulls_first,
        })
    }

    /// `LIMIT`, `LIMIT o, c`, `OFFSET n [ROWS]` and
    /// `FETCH FIRST|NEXT n ROWS ONLY`, each at most once and in any order
    /// the dialect allows.
    fn parse_limit(&mut self, top: Option<Expr>, ordered: bool) -> TranspileResult<Option<Limit>> {
        let rules = &self.dialect().parser;
        let mut count = top;
        let mut offset = None;
        let mut seen_limit = false;
        let mut offset_token = None;

        loop {
            if rules.limit && !seen_limit && count.is_none() && self.eat_word("LIMIT") {
                seen_limit = true;
                if self.eat_word("ALL") {
                    continue;
                }
                let first = self.parse_expr()?;
                if rules.limit_comma && offset.is_none() && self.eat_symbol(",") {
                    offset = Some(first);
                    count = Some(self.parse_expr()?);
                } else {
                    count = Some(first);
                }
                continue;
            }
            if rules.offset && offset_token.is_none() && offset.is_none() && self.check_word("OFFSET") {
                offset_token = Some(self.advance());
                offset = Some(self.parse_expr()?);
                if !self.eat_word("ROWS") {
                    self.eat_word("ROW");
                }
                continue;
            }
            // T-SQL only allows FETCH after OFFSET.
            let fetch_allowed = rules.fetch && (!rules.top || offset.is_some());
            if fetch_allowed && count.is_none() && self.eat_word("FETCH") {
                if !self.eat_word("FIRST") {
                    self.expect_word("NEXT")?;
                }
                count = Some(self.parse_expr()?);
                if !self.eat_word("ROWS") {
                    self.expect_word("ROW")?;
                }
                self.expect_word("ONLY")?;
                continue;
            }
            break;
        }

        if let Some(token) = &offset_token {
            if rules.offset_requires_order && !ordered {
                return Err(self.error_at(token, "ORDER BY before OFFSET"));
            }
            if rules.offset_requires_limit && !seen_limit {
                return Err(self.error_at(token, "LIMIT before OFFSET"));
            }
        }

        if count.is_none() && offset.is_none() {
            return Ok(None);
        }
        Ok(Some(Limit { count, offset }))
    }
}

/// Attach a `TOP` count to a set-operation branch.
fn with_top(body: SetExpr, top: Option<Expr>) -> SetExpr {
    match top {
        None => body,
        Some(count) => SetExpr::Query(Box::new(Query {
            limit: Some(Limit {
                count: Some(count),
                offset: None,
            }),
            ..Query::from_body(body)
        })),
    }
}
