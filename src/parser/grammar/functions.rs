//! Function calls: special forms, argument lists, windows, and name
//! canonicalization through the dialect's alias table.

use crate::ast::*;
use crate::dialect::{ExtractStyle, FunctionAlias, FunctionPolicy, KNOWN_FUNCTIONS, precedence};
use crate::error::{TranspileError, TranspileResult};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Parse a call whose name has been consumed; `(` is next.
    pub(crate) fn parse_function_call(&mut self, name: String, span: Span) -> TranspileResult<Expr> {
        let upper = name.to_ascii_uppercase();
        let rules = &self.dialect().parser;

        if upper == "EXTRACT" && self.dialect().generator.extract == Some(ExtractStyle::Standard) {
            self.expect_symbol("(")?;
            let field = self.parse_datetime_field()?;
            self.expect_word("FROM")?;
            let expr = self.parse_expr()?;
            self.expect_symbol(")")?;
            return Ok(Expr::Extract {
                field,
                expr: Box::new(expr),
            });
        }

        if upper == "DATEPART" && self.dialect().generator.extract == Some(ExtractStyle::DatePart) {
            self.expect_symbol("(")?;
            let field = self.parse_datetime_field()?;
            self.expect_symbol(",")?;
            let expr = self.parse_expr()?;
            self.expect_symbol(")")?;
            return Ok(Expr::Extract {
                field,
                expr: Box::new(expr),
            });
        }

        if rules.if_functions.contains(&upper) {
            self.expect_symbol("(")?;
            let condition = self.parse_expr()?;
            self.expect_symbol(",")?;
            let then = self.parse_expr()?;
            self.expect_symbol(",")?;
            let otherwise = self.parse_expr()?;
            self.expect_symbol(")")?;
            return Ok(Expr::If {
                condition: Box::new(condition),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            });
        }

        if let Some((_, kind)) = rules
            .current_time_functions
            .iter()
            .find(|(function, _)| *function == upper)
        {
            self.expect_symbol("(")?;
            self.expect_symbol(")")?;
            return Ok(Expr::CurrentTime(*kind));
        }

        self.expect_symbol("(")?;
        let mut function = Function {
            name: name.clone(),
            args: vec![],
            distinct: false,
            over: None,
            span,
        };

        if !self.eat_symbol(")") {
            function.distinct = self.eat_word("DISTINCT");
            if self.eat_symbol("*") {
                function.args.push(FunctionArg::Wildcard);
            } else {
                self.parse_function_args(&upper, &mut function.args)?;
            }
            self.expect_symbol(")")?;
        }

        function.name = self.canonical_function_name(&name, &mut function.args, span)?;

        if self.eat_word("OVER") {
            function.over = Some(self.parse_window_spec()?);
        }
        Ok(Expr::Function(function))
    }

    /// Comma-separated arguments plus the keyword forms
    /// `POSITION(a IN b)` and `SUBSTRING(s FROM a FOR b)`.
    fn parse_function_args(&mut self, upper: &str, args: &mut Vec<FunctionArg>) -> TranspileResult<()> {
        if upper == "POSITION" {
            let needle = self.parse_subexpr(precedence::COMPARISON)?;
            if self.eat_word("IN") {
                let haystack = self.parse_expr()?;
                // Stored in STRPOS order; the name is fixed up by the caller.
                args.push(FunctionArg::Expr(haystack));
                args.push(FunctionArg::Expr(needle));
                return Ok(());
            }
            args.push(FunctionArg::Expr(needle));
        } else {
            args.push(FunctionArg::Expr(self.parse_expr()?));
            if matches!(upper, "SUBSTRING" | "SUBSTR") && self.eat_word("FROM") {
                args.push(FunctionArg::Expr(self.parse_expr()?));
                if self.eat_word("FOR") {
                    args.push(FunctionArg::Expr(self.parse_expr()?));
                }
                return Ok(());
            }
        }
        while self.eat_symbol(",") {
            args.push(FunctionArg::Expr(self.parse_expr()?));
        }
        Ok(())
    }

    /// Map a source spelling to the canonical name: dialect aliases first,
    /// then the shared known-function list, then the unknown-function
    /// policy.
    fn canonical_function_name(
        &self,
        name: &str,
        args: &mut [FunctionArg],
        span: Span,
    ) -> TranspileResult<String> {
        let upper = name.to_ascii_uppercase();
        let rules = &self.dialect().parser;
        if upper == "POSITION" {
            return Ok("STRPOS".to_string());
        }
        match rules.function_aliases.get(&upper) {
            Some(FunctionAlias::Rename(canonical)) => return Ok(canonical.clone()),
            Some(FunctionAlias::Swap(canonical)) => {
                if args.len() >= 2 {
                    args.swap(0, 1);
                }
                return Ok(canonical.clone());
            }
            None => {}
        }
        if KNOWN_FUNCTIONS.contains(&upper.as_str()) {
            return Ok(upper);
        }
        match rules.unknown_functions {
            FunctionPolicy::PassThrough => Ok(name.to_string()),
            FunctionPolicy::Reject => Err(TranspileError::syntax(
                span.start,
                vec!["known function".to_string()],
                format!("function '{}'", name),
            )),
        }
    }

    fn parse_window_spec(&mut self) -> TranspileResult<WindowSpec> {
        self.expect_symbol("(")?;
        let partition_by = if self.eat_words(&["PARTITION", "BY"]) {
            self.parse_comma_separated(|p| p.parse_expr())?
        } else {
            vec![]
        };
        let order_by = self.parse_order_by()?;
        let frame = if self.check_word("ROWS") || self.check_word("RANGE") {
            Some(self.parse_window_frame()?)
        } else {
            None
        };
        self.expect_symbol(")")?;
        Ok(WindowSpec {
            partition_by,
            order_by,
            frame,
        })
    }

    fn parse_window_frame(&mut self) -> TranspileResult<WindowFrame> {
        let units = if self.eat_word("ROWS") {
            FrameUnits::Rows
        } else {
            self.expect_word("RANGE")?;
            FrameUnits::Range
        };
        if self.eat_word("BETWEEN") {
            let start = self.parse_frame_bound()?;
            self.expect_word("AND")?;
            let end = self.parse_frame_bound()?;
            return Ok(WindowFrame {
                units,
                start,
                end: Some(end),
            });
        }
        let start = self.parse_frame_bound()?;
        Ok(WindowFrame {
            units,
            start,
            end: None,
        })
    }

    fn parse_frame_bound(&mut self) -> TranspileResult<FrameBound> {
        if self.eat_words(&["CURRENT", "ROW"]) {
            return Ok(FrameBound::CurrentRow);
        }
        if self.eat_word("UNBOUNDED") {
            if self.eat_word("PRECEDING") {
                return Ok(FrameBound::UnboundedPreceding);
            }
            self.expect_word("FOLLOWING")?;
            return Ok(FrameBound::UnboundedFollowing);
        }
        let offset = Box::new(self.parse_prefix()?);
        if self.eat_word("PRECEDING") {
            return Ok(FrameBound::Preceding(offset));
        }
        self.expect_word("FOLLOWING")?;
        Ok(FrameBound::Following(offset))
    }
}
