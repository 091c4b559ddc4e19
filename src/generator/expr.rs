//! Expression rendering.
//!
//! Operands are parenthesised only where the target's precedence table
//! would otherwise regroup them: a left operand binding looser than its
//! parent, a right operand binding no tighter.

use crate::ast::*;
use crate::dialect::{
    BooleanStyle, ConcatStyle, ExtractStyle, FunctionRender, IntervalStyle, ParamStyle,
    TemporalLiteralStyle, precedence,
};
use crate::error::TranspileResult;

use super::rewrite;
use super::{Generator, ToSql};

impl ToSql for Expr {
    fn to_sql(&self, generator: &Generator) -> TranspileResult<String> {
        generator.expr(self)
    }
}

impl<'a> Generator<'a> {
    pub fn expr(&self, expr: &Expr) -> TranspileResult<String> {
        match expr {
            Expr::Identifier(ident) => Ok(self.ident(ident)),
            Expr::CompoundIdentifier(parts) => Ok(parts
                .iter()
                .map(|p| self.ident(p))
                .collect::<Vec<_>>()
                .join(".")),
            Expr::Literal(literal) => self.literal(literal),
            Expr::Parameter(parameter) => self.parameter(parameter),
            Expr::Binary { left, op, right } => self.binary(expr, left, *op, right),
            Expr::Unary { op, expr: operand } => {
                let (symbol, prec) = match op {
                    UnaryOperator::Not => ("NOT ", precedence::NOT),
                    UnaryOperator::Minus => ("-", precedence::UNARY),
                    UnaryOperator::Plus => ("+", precedence::UNARY),
                    UnaryOperator::BitwiseNot => ("~", precedence::UNARY),
                };
                let rendered = self.operand(operand, prec, false)?;
                // `--` would start a comment
                if rendered.starts_with('-') && *op == UnaryOperator::Minus {
                    Ok(format!("{} {}", symbol, rendered))
                } else {
                    Ok(format!("{}{}", symbol, rendered))
                }
            }
            Expr::Function(function) => self.function(function),
            Expr::Cast {
                expr: inner,
                data_type,
                try_cast,
            } => {
                let name = if *try_cast {
                    match &self.dialect().generator.try_cast {
                        Some(name) => name.clone(),
                        None => return Err(self.unsupported("TRY_CAST")),
                    }
                } else {
                    "CAST".to_string()
                };
                Ok(format!(
                    "{}({} AS {})",
                    name,
                    self.expr(inner)?,
                    self.data_type(data_type)
                ))
            }
            Expr::Case {
                operand,
                conditions,
                else_result,
            } => {
                let mut parts = vec!["CASE".to_string()];
                if let Some(operand) = operand {
                    parts.push(self.expr(operand)?);
                }
                for when in conditions {
                    parts.push(format!(
                        "WHEN {} THEN {}",
                        self.expr(&when.condition)?,
                        self.expr(&when.result)?
                    ));
                }
                if let Some(e) = else_result {
                    parts.push(format!("ELSE {}", self.expr(e)?));
                }
                parts.push("END".to_string());
                Ok(parts.join(" "))
            }
            Expr::If {
                condition,
                then,
                otherwise,
            } => match &self.dialect().generator.if_function {
                Some(name) => Ok(format!(
                    "{}({}, {}, {})",
                    name,
                    self.expr(condition)?,
                    self.expr(then)?,
                    self.expr(otherwise)?
                )),
                None => self.expr(&rewrite::if_to_case(condition, then, otherwise)),
            },
            Expr::Between {
                expr: inner,
                negated,
                low,
                high,
            } => Ok(format!(
                "{} {}BETWEEN {} AND {}",
                self.operand(inner, precedence::COMPARISON, false)?,
                not(*negated),
                self.operand(low, precedence::COMPARISON, true)?,
                self.operand(high, precedence::COMPARISON, true)?
            )),
            Expr::InList {
                expr: inner,
                list,
                negated,
            } => {
                let items = list
                    .iter()
                    .map(|e| self.expr(e))
                    .collect::<TranspileResult<Vec<_>>>()?;
                Ok(format!(
                    "{} {}IN ({})",
                    self.operand(inner, precedence::COMPARISON, false)?,
                    not(*negated),
                    items.join(", ")
                ))
            }
            Expr::InSubquery {
                expr: inner,
                subquery,
                negated,
            } => Ok(format!(
                "{} {}IN {}",
                self.operand(inner, precedence::COMPARISON, false)?,
                not(*negated),
                self.block(&self.query(subquery)?)
            )),
            Expr::Like {
                expr: inner,
                pattern,
                negated,
                case_insensitive,
                escape,
            } => self.like(inner, pattern, *negated, *case_insensitive, escape.as_deref()),
            Expr::IsNull {
                expr: inner,
                negated,
            } => Ok(format!(
                "{} IS {}NULL",
                self.operand(inner, precedence::COMPARISON, false)?,
                not(*negated)
            )),
            Expr::Exists { subquery, negated } => Ok(format!(
                "{}EXISTS {}",
                not(*negated),
                self.block(&self.query(subquery)?)
            )),
            Expr::Subquery(query) => Ok(self.block(&self.query(query)?)),
            Expr::Nested(inner) => Ok(format!("({})", self.expr(inner)?)),
            Expr::Extract { field, expr: inner } => match self.dialect().generator.extract {
                Some(ExtractStyle::Standard) => {
                    Ok(format!("EXTRACT({} FROM {})", field.keyword(), self.expr(inner)?))
                }
                Some(ExtractStyle::DatePart) => {
                    Ok(format!("DATEPART({}, {})", field.datepart(), self.expr(inner)?))
                }
                None => Err(self.unsupported("EXTRACT")),
            },
            Expr::Interval { value, unit } => self.interval(value, *unit),
            Expr::CurrentTime(kind) => {
                let rules = &self.dialect().generator;
                match kind {
                    CurrentTimeKind::Date => rules
                        .current_date
                        .clone()
                        .ok_or_else(|| self.unsupported("CURRENT_DATE")),
                    CurrentTimeKind::Time => rules
                        .current_time
                        .clone()
                        .ok_or_else(|| self.unsupported("CURRENT_TIME")),
                    CurrentTimeKind::Timestamp => Ok(rules.current_timestamp.clone()),
                }
            }
        }
    }

    /// Binding strength of `expr` as it will be rendered in the target.
    pub(crate) fn precedence_of(&self, expr: &Expr) -> u8 {
        let rules = &self.dialect().parser;
        match expr {
            Expr::Binary { op, .. } => match op {
                BinaryOperator::And => precedence::AND,
                BinaryOperator::Or => precedence::OR,
                BinaryOperator::Concat => match self.dialect().generator.concat_style {
                    ConcatStyle::Function => precedence::ATOM,
                    ConcatStyle::Plus => precedence::ADDITIVE,
                    ConcatStyle::Operator => rules
                        .symbol_for(*op)
                        .map(|r| r.precedence)
                        .unwrap_or(precedence::CONCAT),
                },
                other => rules
                    .symbol_for(*other)
                    .map(|r| r.precedence)
                    .unwrap_or(precedence::ATOM),
            },
            Expr::Unary {
                op: UnaryOperator::Not,
                ..
            } => precedence::NOT,
            Expr::Unary { .. } => precedence::UNARY,
            Expr::Between { .. }
            | Expr::InList { .. }
            | Expr::InSubquery { .. }
            | Expr::Like { .. }
            | Expr::IsNull { .. } => precedence::COMPARISON,
            Expr::Exists { negated: true, .. } => precedence::NOT,
            Expr::Interval { value, .. }
                if self.dialect().generator.interval == Some(IntervalStyle::Quoted)
                    && !matches!(
                        value.as_ref(),
                        Expr::Literal(Literal::String(_) | Literal::Number(_))
                    ) =>
            {
                precedence::MULTIPLICATIVE
            }
            _ => precedence::ATOM,
        }
    }

    /// Render an operand of an operator binding at `parent`.
    pub(crate) fn operand(&self, expr: &Expr, parent: u8, right: bool) -> TranspileResult<String> {
        let rendered = self.expr(expr)?;
        let prec = self.precedence_of(expr);
        if prec < parent || (right && prec == parent) {
            Ok(format!("({})", rendered))
        } else {
            Ok(rendered)
        }
    }

    fn binary(&self, whole: &Expr, left: &Expr, op: BinaryOperator, right: &Expr) -> TranspileResult<String> {
        let prec = self.precedence_of(whole);
        let infix = |symbol: &str| -> TranspileResult<String> {
            Ok(format!(
                "{} {} {}",
                self.operand(left, prec, false)?,
                symbol,
                self.operand(right, prec, true)?
            ))
        };
        match op {
            BinaryOperator::And => infix("AND"),
            BinaryOperator::Or => infix("OR"),
            BinaryOperator::Concat => match self.dialect().generator.concat_style {
                ConcatStyle::Function => {
                    let args = rewrite::flatten_concat(whole)
                        .into_iter()
                        .map(|e| self.expr(e))
                        .collect::<TranspileResult<Vec<_>>>()?;
                    Ok(format!("{}({})", self.function_name("CONCAT"), args.join(", ")))
                }
                ConcatStyle::Plus => infix("+"),
                ConcatStyle::Operator => match self.dialect().parser.symbol_for(op) {
                    Some(rule) => infix(&rule.symbol),
                    None => Err(self.unsupported(op.name())),
                },
            },
            _ => match self.dialect().parser.symbol_for(op) {
                Some(rule) => infix(&rule.symbol),
                None => match op {
                    BinaryOperator::Power => Ok(format!(
                        "{}({}, {})",
                        self.function_name("POWER"),
                        self.expr(left)?,
                        self.expr(right)?
                    )),
                    BinaryOperator::Modulo => Ok(format!(
                        "{}({}, {})",
                        self.function_name("MOD"),
                        self.expr(left)?,
                        self.expr(right)?
                    )),
                    _ => Err(self.unsupported(op.name())),
                },
            },
        }
    }

    fn like(
        &self,
        expr: &Expr,
        pattern: &Expr,
        negated: bool,
        case_insensitive: bool,
        escape: Option<&Expr>,
    ) -> TranspileResult<String> {
        let native = !case_insensitive || self.dialect().parser.ilike;
        let (left, right, keyword) = if native {
            let keyword = if case_insensitive { "ILIKE" } else { "LIKE" };
            (
                self.operand(expr, precedence::COMPARISON, false)?,
                self.operand(pattern, precedence::COMPARISON, true)?,
                keyword,
            )
        } else {
            let (lowered, lowered_pattern) = rewrite::ilike_to_like(expr, pattern);
            (self.expr(&lowered)?, self.expr(&lowered_pattern)?, "LIKE")
        };
        let mut out = format!("{} {}{} {}", left, not(negated), keyword, right);
        if let Some(escape) = escape {
            out.push_str(" ESCAPE ");
            out.push_str(&self.operand(escape, precedence::UNARY, false)?);
        }
        Ok(out)
    }

    fn interval(&self, value: &Expr, unit: Option<DateTimeField>) -> TranspileResult<String> {
        let unit_suffix = unit.map(|u| format!(" {}", u.keyword())).unwrap_or_default();
        match self.dialect().generator.interval {
            None => Err(self.unsupported("INTERVAL")),
            Some(IntervalStyle::Quoted) => match (value, unit) {
                (Expr::Literal(Literal::String(s) | Literal::Number(s)), _) => {
                    Ok(format!("INTERVAL {}{}", self.string_literal(s), unit_suffix))
                }
                (other, Some(unit)) => Ok(format!(
                    "{} * INTERVAL '1' {}",
                    self.operand(other, precedence::MULTIPLICATIVE, false)?,
                    unit.keyword()
                )),
                (_, None) => Err(self.unsupported("INTERVAL without a unit")),
            },
            Some(IntervalStyle::Bare) => match (value, unit) {
                (Expr::Literal(Literal::String(s)), None) => match rewrite::split_interval(s) {
                    Some((amount, unit)) => Ok(format!("INTERVAL {} {}", amount, unit.keyword())),
                    None => Err(self.unsupported(&format!("INTERVAL '{}'", s))),
                },
                (other, Some(_)) => Ok(format!(
                    "INTERVAL {}{}",
                    self.operand(other, precedence::UNARY, false)?,
                    unit_suffix
                )),
                (_, None) => Err(self.unsupported("INTERVAL without a unit")),
            },
        }
    }

    fn literal(&self, literal: &Literal) -> TranspileResult<String> {
        let rules = &self.dialect().generator;
        Ok(match literal {
            Literal::Number(n) => n.clone(),
            Literal::String(s) => self.string_literal(s),
            Literal::Null => "NULL".to_string(),
            Literal::Boolean(b) => match rules.boolean_style {
                BooleanStyle::Keyword => (if *b { "TRUE" } else { "FALSE" }).to_string(),
                BooleanStyle::Integer => (if *b { "1" } else { "0" }).to_string(),
            },
            Literal::Temporal { kind, value } => match rules.temporal_literals {
                TemporalLiteralStyle::Keyword => {
                    format!("{} {}", kind.keyword(), self.string_literal(value))
                }
                TemporalLiteralStyle::Cast => format!(
                    "CAST({} AS {})",
                    self.string_literal(value),
                    self.data_type(&kind.data_type())
                ),
                TemporalLiteralStyle::Function => {
                    let function = match kind {
                        TemporalKind::Date => "DATE",
                        TemporalKind::Time => "TIME",
                        TemporalKind::Timestamp => "DATETIME",
                    };
                    format!("{}({})", function, self.string_literal(value))
                }
            },
        })
    }

    /// Bind parameters keep their source ordinal. A bare `?` binds by
    /// position, so it is only written while ordinals arrive in order.
    fn parameter(&self, parameter: &Parameter) -> TranspileResult<String> {
        let (n, positional) = match parameter {
            Parameter::Positional(n) => (*n, true),
            Parameter::Numbered(n) => (*n, false),
            Parameter::Named(name) => {
                return match self.dialect().generator.named_param_prefix {
                    Some(prefix) => Ok(format!("{}{}", prefix, name)),
                    None => Err(self.unsupported("named parameter")),
                };
            }
        };
        let in_sequence = self.bind_in_sequence(n);
        match self.dialect().param_style {
            ParamStyle::Dollar => Ok(format!("${}", n)),
            ParamStyle::AtName => Ok(format!("@p{}", n)),
            ParamStyle::Colon => Ok(format!(":{}", n)),
            ParamStyle::Question if in_sequence => Ok("?".to_string()),
            ParamStyle::Question => Err(self.unsupported("reordered bind parameter")),
            ParamStyle::QuestionNumbered if positional && in_sequence => Ok("?".to_string()),
            ParamStyle::QuestionNumbered => Ok(format!("?{}", n)),
        }
    }

    /// Target spelling of a canonical function name with no argument change.
    fn function_name(&self, canonical: &str) -> String {
        match self.dialect().function_render(canonical) {
            Some(FunctionRender::Rename(name)) => name.clone(),
            _ => canonical.to_string(),
        }
    }

    pub(crate) fn function(&self, function: &Function) -> TranspileResult<String> {
        let render = self.dialect().function_render(&function.name);

        if let (Some(FunctionRender::Position), [FunctionArg::Expr(haystack), FunctionArg::Expr(needle)]) =
            (render, function.args.as_slice())
        {
            if function.over.is_none() {
                return Ok(format!(
                    "POSITION({} IN {})",
                    self.operand(needle, precedence::COMPARISON, true)?,
                    self.expr(haystack)?
                ));
            }
        }

        let mut args = function
            .args
            .iter()
            .map(|arg| match arg {
                FunctionArg::Wildcard => Ok("*".to_string()),
                FunctionArg::Expr(e) => self.expr(e),
            })
            .collect::<TranspileResult<Vec<_>>>()?;

        let name = match render {
            Some(FunctionRender::Rename(name)) => name.clone(),
            Some(FunctionRender::Swap(name)) => {
                if args.len() >= 2 {
                    args.swap(0, 1);
                }
                name.clone()
            }
            _ => function.name.clone(),
        };

        let distinct = if function.distinct { "DISTINCT " } else { "" };
        let mut out = format!("{}({}{})", name, distinct, args.join(", "));
        if let Some(over) = &function.over {
            out.push_str(" OVER ");
            out.push_str(&self.window(over)?);
        }
        Ok(out)
    }

    fn window(&self, window: &WindowSpec) -> TranspileResult<String> {
        let mut parts = Vec::new();
        if !window.partition_by.is_empty() {
            let exprs = window
                .partition_by
                .iter()
                .map(|e| self.expr(e))
                .collect::<TranspileResult<Vec<_>>>()?;
            parts.push(format!("PARTITION BY {}", exprs.join(", ")));
        }
        if !window.order_by.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_items(&window.order_by)?.join(", ")));
        }
        if let Some(frame) = &window.frame {
            let units = match frame.units {
                FrameUnits::Rows => "ROWS",
                FrameUnits::Range => "RANGE",
            };
            match &frame.end {
                Some(end) => parts.push(format!(
                    "{} BETWEEN {} AND {}",
                    units,
                    self.frame_bound(&frame.start)?,
                    self.frame_bound(end)?
                )),
                None => parts.push(format!("{} {}", units, self.frame_bound(&frame.start)?)),
            }
        }
        Ok(format!("({})", parts.join(" ")))
    }

    fn frame_bound(&self, bound: &FrameBound) -> TranspileResult<String> {
        Ok(match bound {
            FrameBound::UnboundedPreceding => "UNBOUNDED PRECEDING".to_string(),
            FrameBound::UnboundedFollowing => "UNBOUNDED FOLLOWING".to_string(),
            FrameBound::CurrentRow => "CURRENT ROW".to_string(),
            FrameBound::Preceding(e) => format!("{} PRECEDING", self.operand(e, precedence::UNARY, false)?),
            FrameBound::Following(e) => format!("{} FOLLOWING", self.operand(e, precedence::UNARY, false)?),
        })
    }

    pub(crate) fn order_by_items(&self, items: &[OrderByExpr]) -> TranspileResult<Vec<String>> {
        items
            .iter()
            .map(|item| {
                let mut out = self.expr(&item.expr)?;
                match item.asc {
                    Some(true) => out.push_str(" ASC"),
                    Some(false) => out.push_str(" DESC"),
                    None => {}
                }
                if let Some(first) = item.nulls_first {
                    self.require(crate::dialect::Construct::NullsOrdering)?;
                    out.push_str(if first { " NULLS FIRST" } else { " NULLS LAST" });
                }
                Ok(out)
            })
            .collect()
    }

    pub(crate) fn data_type(&self, data_type: &DataType) -> String {
        let Some(kind) = data_type.kind() else {
            return match data_type {
                DataType::Custom(name) => name.clone(),
                _ => String::new(),
            };
        };
        let name = self.dialect().type_name(kind);
        let params = data_type.params();
        if params.is_empty()
            || name.contains('(')
            || self.dialect().generator.folded_types.contains(&kind)
        {
            return name;
        }
        let params: Vec<String> = params.iter().map(|p| p.to_string()).collect();
        format!("{}({})", name, params.join(", "))
    }
}

fn not(negated: bool) -> &'static str {
    if negated { "NOT " } else { "" }
}
