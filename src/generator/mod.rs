//! SQL generator.
//!
//! Renders AST statements as SQL text for a target dialect. Everything
//! dialect-specific comes from the descriptor's
//! [`GeneratorRules`](crate::dialect::GeneratorRules); a node the target
//! cannot express fails with
//! [`TranspileError::UnsupportedConstruct`] rather than being dropped.

pub mod ddl;
pub mod dml;
pub mod expr;
pub mod rewrite;

#[cfg(test)]
mod tests;

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::ast::*;
use crate::dialect::{Construct, Dialect};
use crate::error::{TranspileError, TranspileResult};

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// One clause per line, select items and column lists indented.
    pub pretty: bool,
    /// Spaces per indentation level in pretty mode.
    pub indent: usize,
    /// Quote every identifier, not only those that need it.
    pub identify: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
            identify: false,
        }
    }
}

/// Trait for converting AST nodes to SQL.
pub trait ToSql {
    fn to_sql(&self, generator: &Generator) -> TranspileResult<String>;
}

impl ToSql for Statement {
    fn to_sql(&self, generator: &Generator) -> TranspileResult<String> {
        match self {
            Statement::Query(query) => dml::select::build_query(query, generator),
            Statement::Insert(insert) => dml::insert::build_insert(insert, generator),
            Statement::Update(update) => dml::update::build_update(update, generator),
            Statement::Delete(delete) => dml::delete::build_delete(delete, generator),
            Statement::CreateTable(create) => ddl::build_create_table(create, generator),
            Statement::CreateView(view) => ddl::build_create_view(view, generator),
            Statement::Drop(drop) => ddl::build_drop(drop, generator),
        }
    }
}

/// Render one statement in `dialect`.
pub fn generate(
    statement: &Statement,
    dialect: &Dialect,
    options: &GenerateOptions,
) -> TranspileResult<String> {
    Generator::new(dialect, *options).generate(statement)
}

/// Rendering state for one target dialect.
pub struct Generator<'a> {
    dialect: &'a Dialect,
    options: GenerateOptions,
    /// Highest bind ordinal rendered so far in the current statement.
    highest_param: Cell<u32>,
}

impl<'a> Generator<'a> {
    pub fn new(dialect: &'a Dialect, options: GenerateOptions) -> Self {
        Self {
            dialect,
            options,
            highest_param: Cell::new(0),
        }
    }

    pub fn dialect(&self) -> &'a Dialect {
        self.dialect
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn generate(&self, statement: &Statement) -> TranspileResult<String> {
        self.highest_param.set(0);
        statement.to_sql(self)
    }

    pub(crate) fn params_checkpoint(&self) -> u32 {
        self.highest_param.get()
    }

    /// Forget parameters rendered since `mark`, for output that is
    /// discarded.
    pub(crate) fn restore_params(&self, mark: u32) {
        self.highest_param.set(mark);
    }

    /// Record that bind ordinal `n` is rendered next. True when a bare `?`
    /// here would still bind to `n`, that is when `n` follows the highest
    /// ordinal rendered so far.
    pub(crate) fn bind_in_sequence(&self, n: u32) -> bool {
        let highest = self.highest_param.get();
        self.highest_param.set(highest.max(n));
        n == highest + 1
    }

    // ---- layout ----

    /// Separator between clauses.
    pub(crate) fn sep(&self) -> &'static str {
        if self.options.pretty { "\n" } else { " " }
    }

    /// Join clauses with the clause separator, skipping empty ones.
    pub(crate) fn clauses(&self, parts: Vec<String>) -> String {
        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(self.sep())
    }

    /// Indent each line of `text` one level. Newlines inside string
    /// literals and quoted identifiers are part of the value and stay as
    /// they are.
    pub(crate) fn indent(&self, text: &str) -> String {
        let pad = " ".repeat(self.options.indent);
        let (open_quote, close_quote) = self.dialect.generator.identifier_quote;
        let mut out = String::with_capacity(text.len() + pad.len());
        let mut closing: Option<char> = None;
        let mut line_start = true;
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if line_start && c != '\n' {
                out.push_str(&pad);
            }
            line_start = false;
            out.push(c);
            match closing {
                Some(close) if c == close => {
                    // doubled closer is an escaped character
                    if chars.peek() == Some(&close) {
                        chars.next();
                        out.push(close);
                    } else {
                        closing = None;
                    }
                }
                Some(_) => {}
                None if c == '\'' => closing = Some('\''),
                None if c == open_quote => closing = Some(close_quote),
                None if c == '\n' => line_start = true,
                None => {}
            }
        }
        out
    }

    /// `KEYWORD item, item` or, pretty, the items indented one per line.
    pub(crate) fn list_clause(&self, keyword: &str, items: &[String]) -> String {
        if self.options.pretty {
            format!("{}\n{}", keyword, self.indent(&items.join(",\n")))
        } else {
            format!("{} {}", keyword, items.join(", "))
        }
    }

    /// A parenthesised block: `(body)`, or pretty, the body indented on
    /// its own lines.
    pub(crate) fn block(&self, body: &str) -> String {
        if self.options.pretty {
            format!("(\n{}\n)", self.indent(body))
        } else {
            format!("({})", body)
        }
    }

    // ---- names and literals ----

    pub(crate) fn ident(&self, ident: &Ident) -> String {
        if ident.quoted || self.options.identify || self.needs_quotes(&ident.value) {
            self.quote(&ident.value)
        } else {
            ident.value.clone()
        }
    }

    fn needs_quotes(&self, value: &str) -> bool {
        let rules = &self.dialect.tokenizer;
        let extra = &rules.identifier_start;
        let mut chars = value.chars();
        let Some(first) = chars.next() else {
            return true;
        };
        let starts_ok = first.is_alphabetic() || first == '_' || extra.contains(&first);
        let rest_ok = chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$' || extra.contains(&c));
        !starts_ok || !rest_ok || rules.is_reserved(value)
    }

    pub(crate) fn quote(&self, value: &str) -> String {
        let (open, close) = self.dialect.generator.identifier_quote;
        let escaped = value.replace(close, &format!("{}{}", close, close));
        format!("{}{}{}", open, escaped, close)
    }

    pub(crate) fn idents(&self, idents: &[Ident]) -> String {
        idents
            .iter()
            .map(|i| self.ident(i))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn object_name(&self, name: &ObjectName) -> String {
        name.0
            .iter()
            .map(|i| self.ident(i))
            .collect::<Vec<_>>()
            .join(".")
    }

    pub(crate) fn string_literal(&self, value: &str) -> String {
        let mut escaped = value.replace('\'', "''");
        if self.dialect.tokenizer.backslash_escapes {
            escaped = escaped.replace('\\', "\\\\");
        }
        format!("'{}'", escaped)
    }

    // ---- capability checks ----

    pub(crate) fn unsupported(&self, construct: &str) -> TranspileError {
        TranspileError::unsupported(construct, self.dialect.name.clone())
    }

    /// Fail unless the target can express `construct`.
    pub(crate) fn require(&self, construct: Construct) -> TranspileResult<()> {
        if self.dialect.supports(construct) {
            Ok(())
        } else {
            Err(self.unsupported(construct.name()))
        }
    }
}
