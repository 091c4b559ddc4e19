//! Dialect-aware SQL parser.
//!
//! Recursive descent over the token stream for statements and clauses,
//! precedence climbing for expressions. The grammar is shared by every
//! dialect; the descriptor's [`ParserRules`](crate::dialect::ParserRules)
//! switch the override points on and off.
//!
//! Syntax errors point at the furthest token the parser reached and list
//! everything that would have been accepted there.

pub mod grammar;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use crate::ast::{Ident, ObjectName, Span, Statement};
use crate::dialect::{Construct, Dialect};
use crate::error::{TranspileError, TranspileResult};
use crate::tokens::{Position, Token, TokenKind, tokenize};

/// Deepest nesting of subexpressions and subqueries accepted.
pub const MAX_DEPTH: usize = 128;

/// Parse every `;`-separated statement in `sql`.
///
/// Fails as a whole if any statement fails; empty statements are skipped.
pub fn parse_sql(sql: &str, dialect: &Dialect) -> TranspileResult<Vec<Statement>> {
    let tokens = tokenize(sql, &dialect.tokenizer)?;
    Parser::new(tokens, dialect).parse_statements()
}

pub struct Parser<'a> {
    tokens: Vec<Token>,
    index: usize,
    dialect: &'a Dialect,
    furthest: usize,
    expected: BTreeSet<String>,
    depth: usize,
    /// `?` placeholders seen so far in the current statement.
    positional: u32,
}

impl<'a> Parser<'a> {
    /// `tokens` must end with an `Eof` token, as produced by the tokenizer.
    pub fn new(tokens: Vec<Token>, dialect: &'a Dialect) -> Self {
        let mut tokens = tokens;
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let position = tokens.last().map(|t| t.position).unwrap_or_default();
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                position,
                preceded_by_whitespace: false,
            });
        }
        Self {
            tokens,
            index: 0,
            dialect,
            furthest: 0,
            expected: BTreeSet::new(),
            depth: 0,
            positional: 0,
        }
    }

    pub fn dialect(&self) -> &'a Dialect {
        self.dialect
    }

    pub fn parse_statements(&mut self) -> TranspileResult<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            while self.eat_symbol(";") {}
            if self.at_eof() {
                break;
            }
            self.positional = 0;
            statements.push(self.parse_statement()?);
            if !self.at_eof() && !self.check_symbol(";") {
                return Err(self.error());
            }
        }
        Ok(statements)
    }

    pub fn parse_statement(&mut self) -> TranspileResult<Statement> {
        if self.check_word("SELECT")
            || self.check_word("WITH")
            || self.check_word("VALUES")
            || self.check_symbol("(")
        {
            return Ok(Statement::Query(Box::new(self.parse_query()?)));
        }
        if self.check_word("INSERT") {
            return self.parse_insert().map(Statement::Insert);
        }
        if self.check_word("UPDATE") {
            return self.parse_update().map(Statement::Update);
        }
        if self.check_word("DELETE") {
            return self.parse_delete().map(Statement::Delete);
        }
        if self.check_word("CREATE") {
            return self.parse_create();
        }
        if self.check_word("DROP") {
            return self.parse_drop().map(Statement::Drop);
        }
        Err(self.error())
    }

    // ---- token cursor ----

    pub(crate) fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    pub(crate) fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.index + n).min(last)]
    }

    pub(crate) fn position(&self) -> Position {
        self.peek().position
    }

    pub(crate) fn span(&self) -> Span {
        Span::at(self.position())
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.index += 1;
        }
        token
    }

    /// Remember that `what` would have been accepted at the current token.
    pub(crate) fn expect_here(&mut self, what: impl Into<String>) {
        if self.index > self.furthest {
            self.furthest = self.index;
            self.expected.clear();
        }
        if self.index == self.furthest {
            self.expected.insert(what.into());
        }
    }

    pub(crate) fn check_word(&mut self, word: &str) -> bool {
        if self.peek().is_word(word) {
            return true;
        }
        self.expect_here(word.to_ascii_uppercase());
        false
    }

    pub(crate) fn eat_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            return true;
        }
        false
    }

    /// Consume a sequence of words only if all of them are present.
    pub(crate) fn eat_words(&mut self, words: &[&str]) -> bool {
        let all = words
            .iter()
            .enumerate()
            .all(|(i, word)| self.peek_nth(i).is_word(word));
        if all {
            for _ in words {
                self.advance();
            }
            return true;
        }
        if let Some(first) = words.first() {
            if self.peek().is_word(first) {
                for (i, word) in words.iter().enumerate() {
                    if !self.peek_nth(i).is_word(word) {
                        self.index += i;
                        self.expect_here(word.to_ascii_uppercase());
                        self.index -= i;
                        break;
                    }
                }
            } else {
                self.expect_here(first.to_ascii_uppercase());
            }
        }
        false
    }

    pub(crate) fn expect_word(&mut self, word: &str) -> TranspileResult<()> {
        if self.eat_word(word) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    pub(crate) fn check_symbol(&mut self, symbol: &str) -> bool {
        if self.peek().is_symbol(symbol) {
            return true;
        }
        self.expect_here(format!("'{}'", symbol));
        false
    }

    pub(crate) fn eat_symbol(&mut self, symbol: &str) -> bool {
        if self.check_symbol(symbol) {
            self.advance();
            return true;
        }
        false
    }

    pub(crate) fn expect_symbol(&mut self, symbol: &str) -> TranspileResult<()> {
        if self.eat_symbol(symbol) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    /// Syntax error at the furthest point reached.
    pub(crate) fn error(&self) -> TranspileError {
        let index = self.furthest.max(self.index).min(self.tokens.len() - 1);
        let token = &self.tokens[index];
        let expected = if index == self.furthest {
            self.expected.iter().cloned().collect()
        } else {
            vec![]
        };
        TranspileError::syntax(token.position, expected, token.describe())
    }

    /// Syntax error at `token` with an explicit expectation, for checks
    /// that are not about the next token (typed literal values, clause
    /// dependencies).
    pub(crate) fn error_at(&self, token: &Token, expected: &str) -> TranspileError {
        TranspileError::syntax(token.position, vec![expected.to_string()], token.describe())
    }

    /// Run `f` one nesting level down; past [`MAX_DEPTH`] this is a syntax
    /// error instead of more recursion.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> TranspileResult<T>,
    ) -> TranspileResult<T> {
        if self.depth >= MAX_DEPTH {
            let expected = format!("at most {} levels of nesting", MAX_DEPTH);
            return Err(self.error_at(self.peek(), &expected));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn supports(&self, construct: Construct) -> bool {
        self.dialect.supports(construct)
    }

    // ---- shared small productions ----

    /// An unreserved or quoted identifier.
    pub(crate) fn parse_identifier(&mut self) -> TranspileResult<Ident> {
        let token = self.peek();
        let span = Span::at(token.position);
        match token.kind {
            TokenKind::Identifier => {
                let ident = Ident::new(token.text.clone()).with_span(span);
                self.advance();
                Ok(ident)
            }
            TokenKind::QuotedIdentifier => {
                let ident = Ident::quoted(token.text.clone()).with_span(span);
                self.advance();
                Ok(ident)
            }
            _ => {
                self.expect_here("identifier");
                Err(self.error())
            }
        }
    }

    pub(crate) fn peek_is_identifier(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Identifier | TokenKind::QuotedIdentifier
        )
    }

    pub(crate) fn parse_object_name(&mut self) -> TranspileResult<ObjectName> {
        let mut parts = vec![self.parse_identifier()?];
        while self.peek().is_symbol(".") {
            self.advance();
            parts.push(self.parse_identifier()?);
        }
        Ok(ObjectName(parts))
    }

    /// `( ident, ... )`
    pub(crate) fn parse_parenthesized_identifiers(&mut self) -> TranspileResult<Vec<Ident>> {
        self.expect_symbol("(")?;
        let idents = self.parse_comma_separated(|p| p.parse_identifier())?;
        self.expect_symbol(")")?;
        Ok(idents)
    }

    pub(crate) fn parse_comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> TranspileResult<T>,
    ) -> TranspileResult<Vec<T>> {
        let mut items = vec![item(self)?];
        while self.eat_symbol(",") {
            items.push(item(self)?);
        }
        Ok(items)
    }
}
