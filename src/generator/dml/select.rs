//! Query generation: SELECT, set operations, CTEs, ordering and row limits.

use crate::ast::*;
use crate::dialect::{Construct, LimitStyle};
use crate::error::TranspileResult;
use crate::generator::{Generator, rewrite};

impl<'a> Generator<'a> {
    pub(crate) fn query(&self, query: &Query) -> TranspileResult<String> {
        build_query(query, self)
    }
}

/// Generate a full query.
///
/// Parts are rendered in text order, so bare `?` placeholders stay in
/// bind order.
pub fn build_query(query: &Query, generator: &Generator) -> TranspileResult<String> {
    let mut parts = Vec::new();
    if let Some(with) = &query.with {
        parts.push(build_with(with, generator)?);
    }
    let top = build_top(query, generator)?;
    parts.push(build_set_expr(&query.body, generator, top.as_deref())?);

    let synthetic;
    let order_by = if query.order_by.is_empty() && top.is_none() && needs_order(query, generator) {
        synthetic = vec![rewrite::arbitrary_order()];
        synthetic.as_slice()
    } else {
        query.order_by.as_slice()
    };
    if !order_by.is_empty() {
        let items = generator.order_by_items(order_by)?;
        parts.push(generator.list_clause("ORDER BY", &items));
    }
    if top.is_none() {
        parts.extend(build_limit(query, generator)?);
    }

    Ok(generator.clauses(parts))
}

/// `TOP n` when the target spells the limit that way and the query can
/// carry it on its SELECT.
fn build_top(query: &Query, generator: &Generator) -> TranspileResult<Option<String>> {
    let LimitStyle::Top { .. } = generator.dialect().generator.limit_style else {
        return Ok(None);
    };
    let Some(Limit {
        count: Some(count),
        offset: None,
    }) = &query.limit
    else {
        return Ok(None);
    };
    if !matches!(query.body, SetExpr::Select(_)) {
        return Ok(None);
    }
    Ok(Some(match count {
        Expr::Literal(Literal::Number(n)) => format!("TOP {}", n),
        other => format!("TOP ({})", generator.expr(other)?),
    }))
}

/// T-SQL only accepts `OFFSET ... FETCH` after an ORDER BY.
fn needs_order(query: &Query, generator: &Generator) -> bool {
    matches!(
        generator.dialect().generator.limit_style,
        LimitStyle::Top { fetch: true }
    ) && query.limit.is_some()
}

/// Row-limiting clauses that follow ORDER BY, each operand rendered where
/// it appears in the output.
fn build_limit(query: &Query, generator: &Generator) -> TranspileResult<Vec<String>> {
    let Some(limit) = &query.limit else {
        return Ok(vec![]);
    };
    let count = || limit.count.as_ref().map(|c| generator.expr(c)).transpose();
    let offset = || limit.offset.as_ref().map(|o| generator.expr(o)).transpose();
    let dialect = generator.dialect();
    let rules = &dialect.generator;

    let mut clauses = Vec::new();
    match rules.limit_style {
        LimitStyle::LimitOffset => {
            let comma_form = dialect.parser.limit_comma && limit.count.is_some() && limit.offset.is_some();
            let mark = generator.params_checkpoint();
            match count().and_then(|c| Ok((c, offset()?))) {
                Ok((count, offset)) => {
                    let count = match (count, &offset) {
                        (Some(count), _) => Some(count),
                        (None, Some(_)) => rules.max_limit.clone(),
                        (None, None) => None,
                    };
                    clauses.extend(count.map(|c| format!("LIMIT {}", c)));
                    clauses.extend(offset.map(|o| format!("OFFSET {}", o)));
                }
                // `LIMIT o, c` keeps binds in source order where `?` cannot
                Err(_) if comma_form => {
                    generator.restore_params(mark);
                    let offset = offset()?.unwrap_or_default();
                    let count = count()?.unwrap_or_default();
                    clauses.push(format!("LIMIT {}, {}", offset, count));
                }
                Err(e) => return Err(e),
            }
        }
        LimitStyle::OffsetLimit => {
            clauses.extend(offset()?.map(|o| format!("OFFSET {}", o)));
            clauses.extend(count()?.map(|c| format!("LIMIT {}", c)));
        }
        LimitStyle::FetchFirst => {
            clauses.extend(offset()?.map(|o| format!("OFFSET {} ROWS", o)));
            clauses.extend(count()?.map(|c| format!("FETCH FIRST {} ROWS ONLY", c)));
        }
        LimitStyle::LimitOnly => {
            if limit.offset.is_some() {
                return Err(generator.unsupported(Construct::Offset.name()));
            }
            clauses.extend(count()?.map(|c| format!("LIMIT {}", c)));
        }
        LimitStyle::Top { fetch } => {
            if !fetch {
                let construct = if limit.offset.is_some() { "OFFSET" } else { "TOP" };
                return Err(generator.unsupported(construct));
            }
            let offset = offset()?.unwrap_or_else(|| "0".to_string());
            clauses.push(format!("OFFSET {} ROWS", offset));
            clauses.extend(count()?.map(|c| format!("FETCH NEXT {} ROWS ONLY", c)));
        }
    }
    Ok(clauses)
}

fn build_with(with: &With, generator: &Generator) -> TranspileResult<String> {
    let ctes = with
        .ctes
        .iter()
        .map(|cte| {
            let mut head = generator.ident(&cte.alias);
            if !cte.columns.is_empty() {
                head.push_str(&format!(" ({})", generator.idents(&cte.columns)));
            }
            Ok(format!(
                "{} AS {}",
                head,
                generator.block(&build_query(&cte.query, generator)?)
            ))
        })
        .collect::<TranspileResult<Vec<_>>>()?;
    let keyword = if with.recursive { "WITH RECURSIVE" } else { "WITH" };
    let separator = if generator.options().pretty { ",\n" } else { ", " };
    Ok(format!("{} {}", keyword, ctes.join(separator)))
}

fn build_set_expr(body: &SetExpr, generator: &Generator, top: Option<&str>) -> TranspileResult<String> {
    match body {
        SetExpr::Select(select) => build_select(select, generator, top),
        SetExpr::Query(query) => Ok(generator.block(&build_query(query, generator)?)),
        SetExpr::Values(values) => {
            let rows = values
                .rows
                .iter()
                .map(|row| {
                    let row = row
                        .iter()
                        .map(|e| generator.expr(e))
                        .collect::<TranspileResult<Vec<_>>>()?;
                    Ok(format!("({})", row.join(", ")))
                })
                .collect::<TranspileResult<Vec<_>>>()?;
            Ok(generator.list_clause("VALUES", &rows))
        }
        SetExpr::SetOperation {
            op,
            quantifier,
            left,
            right,
        } => {
            let keyword = match op {
                SetOperator::Union => "UNION",
                SetOperator::Intersect => "INTERSECT",
                SetOperator::Except => generator.dialect().generator.except_keyword.as_str(),
            };
            let quantifier = match quantifier {
                SetQuantifier::None => "",
                SetQuantifier::All => " ALL",
                SetQuantifier::Distinct => " DISTINCT",
            };
            let left = build_set_expr(left, generator, None)?;
            // chains associate to the left
            let mut right_sql = build_set_expr(right, generator, None)?;
            if matches!(right.as_ref(), SetExpr::SetOperation { .. }) {
                right_sql = generator.block(&right_sql);
            }
            Ok(generator.clauses(vec![left, format!("{}{}", keyword, quantifier), right_sql]))
        }
    }
}

fn build_select(select: &Select, generator: &Generator, top: Option<&str>) -> TranspileResult<String> {
    let mut head = String::from("SELECT");
    match &select.distinct {
        None => {}
        Some(Distinct::Distinct) => head.push_str(" DISTINCT"),
        Some(Distinct::On(exprs)) => {
            generator.require(Construct::DistinctOn)?;
            let exprs = exprs
                .iter()
                .map(|e| generator.expr(e))
                .collect::<TranspileResult<Vec<_>>>()?;
            head.push_str(&format!(" DISTINCT ON ({})", exprs.join(", ")));
        }
    }
    if let Some(top) = top {
        head.push(' ');
        head.push_str(top);
    }

    let mut parts = vec![generator.list_clause(&head, &select_items(&select.projection, generator)?)];

    if select.from.is_empty() {
        if let Some(dummy) = &generator.dialect().generator.dummy_table {
            parts.push(format!("FROM {}", dummy));
        }
    } else {
        let tables = select
            .from
            .iter()
            .map(|t| build_table_with_joins(t, generator))
            .collect::<TranspileResult<Vec<_>>>()?;
        parts.push(generator.list_clause("FROM", &tables));
    }

    if let Some(selection) = &select.selection {
        parts.push(format!("WHERE {}", generator.expr(selection)?));
    }
    if !select.group_by.is_empty() {
        let exprs = select
            .group_by
            .iter()
            .map(|e| generator.expr(e))
            .collect::<TranspileResult<Vec<_>>>()?;
        parts.push(generator.list_clause("GROUP BY", &exprs));
    }
    if let Some(having) = &select.having {
        parts.push(format!("HAVING {}", generator.expr(having)?));
    }
    if let Some(qualify) = &select.qualify {
        generator.require(Construct::Qualify)?;
        parts.push(format!("QUALIFY {}", generator.expr(qualify)?));
    }

    Ok(generator.clauses(parts))
}

pub(crate) fn select_items(items: &[SelectItem], generator: &Generator) -> TranspileResult<Vec<String>> {
    items
        .iter()
        .map(|item| match item {
            SelectItem::Wildcard => Ok("*".to_string()),
            SelectItem::QualifiedWildcard(name) => Ok(format!("{}.*", generator.object_name(name))),
            SelectItem::Expr { expr, alias } => {
                let rendered = generator.expr(expr)?;
                Ok(match alias {
                    Some(alias) => format!("{} AS {}", rendered, generator.ident(alias)),
                    None => rendered,
                })
            }
        })
        .collect()
}

fn build_table_with_joins(table: &TableWithJoins, generator: &Generator) -> TranspileResult<String> {
    let mut out = build_table_factor(&table.relation, generator)?;
    for join in &table.joins {
        out.push_str(generator.sep());
        out.push_str(&build_join(join, generator)?);
    }
    Ok(out)
}

fn build_table_factor(factor: &TableFactor, generator: &Generator) -> TranspileResult<String> {
    let (relation, alias) = match factor {
        TableFactor::Table { name, alias } => (generator.object_name(name), alias),
        TableFactor::Derived { subquery, alias } => {
            (generator.block(&build_query(subquery, generator)?), alias)
        }
        TableFactor::Function { function, alias } => (generator.function(function)?, alias),
    };
    let Some(alias) = alias else {
        return Ok(relation);
    };
    let keyword = if generator.dialect().generator.table_alias_as { " AS " } else { " " };
    let mut out = format!("{}{}{}", relation, keyword, generator.ident(&alias.name));
    if !alias.columns.is_empty() {
        out.push_str(&format!(" ({})", generator.idents(&alias.columns)));
    }
    Ok(out)
}

fn build_join(join: &Join, generator: &Generator) -> TranspileResult<String> {
    let mut out = String::new();
    if join.constraint == JoinConstraint::Natural {
        generator.require(Construct::NaturalJoin)?;
        out.push_str("NATURAL ");
    }
    out.push_str(match join.kind {
        JoinKind::Inner => "JOIN",
        JoinKind::Left => "LEFT JOIN",
        JoinKind::Right => "RIGHT JOIN",
        JoinKind::Full => {
            generator.require(Construct::FullOuterJoin)?;
            "FULL OUTER JOIN"
        }
        JoinKind::Cross => "CROSS JOIN",
    });
    out.push(' ');
    out.push_str(&build_table_factor(&join.relation, generator)?);
    match &join.constraint {
        JoinConstraint::On(expr) => {
            out.push_str(" ON ");
            out.push_str(&generator.expr(expr)?);
        }
        JoinConstraint::Using(columns) => {
            generator.require(Construct::JoinUsing)?;
            out.push_str(&format!(" USING ({})", generator.idents(columns)));
        }
        JoinConstraint::Natural | JoinConstraint::None => {}
    }
    Ok(out)
}
