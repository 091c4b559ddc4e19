//! Dialect-aware SQL tokenizer.
//!
//! Scanning is longest-match: the dialect's operator table is consulted
//! before the generic punctuation rules. Small lexemes (whitespace, line
//! comments, numbers, words) are recognised with nom; strings, quoted
//! identifiers and block comments are scanned by hand because their
//! terminators depend on the dialect.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit0, digit1, not_line_ending, one_of},
    combinator::{opt, recognize},
    sequence::{pair, preceded, tuple},
};
use serde::{Deserialize, Serialize};

use crate::dialect::TokenizerRules;
use crate::error::{TranspileError, TranspileResult};

/// A location in the source text. Lines and columns are 1-based, columns
/// count characters; `offset` is the byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// A word reserved by the dialect.
    Keyword,
    Identifier,
    QuotedIdentifier,
    String,
    Number,
    /// Bind parameter (`?`, `$1`, `:name`, `@name`).
    Parameter,
    Operator,
    Punctuation,
    /// Only produced in trivia mode.
    Comment,
    /// Only produced in trivia mode.
    Whitespace,
    Unknown,
    Eof,
}

/// A lexical token. Immutable once produced.
///
/// `text` holds the token's value: the original spelling for words,
/// operators and parameters, and the unescaped contents for strings and
/// quoted identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
    /// Whitespace or a comment sits between this token and the previous one.
    pub preceded_by_whitespace: bool,
}

impl Token {
    /// Whether this token is the bare word `word` (keyword or identifier),
    /// compared case-insensitively.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self.kind, TokenKind::Keyword | TokenKind::Identifier)
            && self.text.eq_ignore_ascii_case(word)
    }

    /// Whether this token is the operator or punctuation `symbol`.
    pub fn is_symbol(&self, symbol: &str) -> bool {
        matches!(self.kind, TokenKind::Operator | TokenKind::Punctuation) && self.text == symbol
    }

    /// Human-readable description used in syntax errors.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::String => format!("string '{}'", self.text),
            TokenKind::QuotedIdentifier => format!("quoted identifier \"{}\"", self.text),
            _ => format!("'{}'", self.text),
        }
    }
}

const PUNCTUATION: &[char] = &['(', ')', ',', ';', '.', '[', ']', '{', '}'];

/// Lazy, restartable token stream over a piece of SQL text.
///
/// Re-creating a tokenizer over the same text and rules yields the same
/// sequence. The stream ends with a single [`TokenKind::Eof`] token, or
/// with the first error.
pub struct Tokenizer<'a> {
    input: &'a str,
    rules: &'a TokenizerRules,
    offset: usize,
    line: usize,
    column: usize,
    trivia: bool,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str, rules: &'a TokenizerRules) -> Self {
        Self {
            input,
            rules,
            offset: 0,
            line: 1,
            column: 1,
            trivia: false,
            done: false,
        }
    }

    /// Emit whitespace and comment tokens instead of dropping them.
    pub fn with_trivia(mut self) -> Self {
        self.trivia = true;
        self
    }

    fn here(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    /// Consume `len` bytes, keeping line and column in step.
    fn advance(&mut self, len: usize) -> &'a str {
        let consumed = &self.input[self.offset..self.offset + len];
        for ch in consumed.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += len;
        consumed
    }

    fn token(&mut self, kind: TokenKind, len: usize, spaced: bool) -> Token {
        let position = self.here();
        let text = self.advance(len).to_string();
        Token {
            kind,
            text,
            position,
            preceded_by_whitespace: spaced,
        }
    }

    fn scan(&mut self) -> TranspileResult<Token> {
        let mut spaced = false;
        loop {
            let rest = self.rest();
            if let Ok((_, ws)) = whitespace(rest) {
                if self.trivia {
                    return Ok(self.token(TokenKind::Whitespace, ws.len(), spaced));
                }
                self.advance(ws.len());
                spaced = true;
                continue;
            }
            if let Some(len) = self.line_comment(rest) {
                if self.trivia {
                    return Ok(self.token(TokenKind::Comment, len, spaced));
                }
                self.advance(len);
                spaced = true;
                continue;
            }
            if rest.starts_with("/*") {
                let len = self.block_comment_len(rest)?;
                if self.trivia {
                    return Ok(self.token(TokenKind::Comment, len, spaced));
                }
                self.advance(len);
                spaced = true;
                continue;
            }
            break;
        }

        let rest = self.rest();
        let Some(first) = rest.chars().next() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                position: self.here(),
                preceded_by_whitespace: spaced,
            });
        };

        if self.rules.national_strings
            && (first == 'N' || first == 'n')
            && rest[1..].starts_with('\'')
        {
            let start = self.here();
            self.advance(1);
            return self.string(start, '\'', spaced);
        }
        if self.rules.string_quotes.contains(&first) {
            let start = self.here();
            return self.string(start, first, spaced);
        }
        if let Some(&(_, close)) = self
            .rules
            .identifier_quotes
            .iter()
            .find(|(open, _)| *open == first)
        {
            return self.quoted_identifier(close, spaced);
        }
        if first == '$' && self.rules.dollar_strings {
            if let Some(delimiter) = dollar_delimiter(rest) {
                return self.dollar_string(delimiter, spaced);
            }
        }
        if self.rules.param_prefixes.contains(&first) && !rest.starts_with("::") {
            if let Some(len) = self.parameter_len(rest) {
                return Ok(self.token(TokenKind::Parameter, len, spaced));
            }
        }
        if let Ok((_, num)) = number(rest) {
            return Ok(self.token(TokenKind::Number, num.len(), spaced));
        }
        if first.is_alphabetic() || first == '_' || self.rules.identifier_start.contains(&first) {
            let extra = &self.rules.identifier_start;
            let len = rest
                .char_indices()
                .skip(1)
                .find(|(_, c)| !(c.is_alphanumeric() || *c == '_' || *c == '$' || extra.contains(c)))
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            let word = &rest[..len];
            let kind = if self.rules.is_reserved(word) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            return Ok(self.token(kind, len, spaced));
        }
        if let Some(op) = self.rules.operators.iter().find(|op| rest.starts_with(op.as_str())) {
            let len = op.len();
            return Ok(self.token(TokenKind::Operator, len, spaced));
        }
        let kind = if PUNCTUATION.contains(&first) {
            TokenKind::Punctuation
        } else {
            TokenKind::Unknown
        };
        Ok(self.token(kind, first.len_utf8(), spaced))
    }

    fn line_comment(&self, rest: &str) -> Option<usize> {
        let dashed: IResult<&str, &str> = recognize(preceded(tag("--"), not_line_ending))(rest);
        if let Ok((_, c)) = dashed {
            return Some(c.len());
        }
        if self.rules.hash_comments {
            let hashed: IResult<&str, &str> = recognize(preceded(char('#'), not_line_ending))(rest);
            if let Ok((_, c)) = hashed {
                return Some(c.len());
            }
        }
        None
    }

    fn block_comment_len(&self, rest: &str) -> TranspileResult<usize> {
        let bytes = rest.as_bytes();
        let mut depth = 0usize;
        let mut i = 0;
        while i + 1 < bytes.len() {
            if bytes[i] == b'/' && bytes[i + 1] == b'*' {
                if depth == 0 || self.rules.nested_comments {
                    depth += 1;
                }
                i += 2;
            } else if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return Ok(i);
                }
            } else {
                i += 1;
            }
        }
        Err(TranspileError::tokenize(
            self.here(),
            "unterminated block comment",
        ))
    }

    fn string(&mut self, start: Position, quote: char, spaced: bool) -> TranspileResult<Token> {
        let rest = self.rest();
        let mut value = String::new();
        let mut chars = rest.char_indices().skip(1).peekable();
        while let Some((i, c)) = chars.next() {
            if c == quote {
                if let Some(&(_, next)) = chars.peek() {
                    if next == quote {
                        value.push(quote);
                        chars.next();
                        continue;
                    }
                }
                self.advance(i + c.len_utf8());
                return Ok(Token {
                    kind: TokenKind::String,
                    text: value,
                    position: start,
                    preceded_by_whitespace: spaced,
                });
            }
            if c == '\\' && self.rules.backslash_escapes {
                match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, '0')) => value.push('\0'),
                    Some((_, other)) => value.push(other),
                    None => break,
                }
                continue;
            }
            value.push(c);
        }
        Err(TranspileError::tokenize(start, "unterminated string literal"))
    }

    fn quoted_identifier(&mut self, close: char, spaced: bool) -> TranspileResult<Token> {
        let start = self.here();
        let rest = self.rest();
        let mut value = String::new();
        let mut chars = rest.char_indices().skip(1).peekable();
        while let Some((i, c)) = chars.next() {
            if c == close {
                if let Some(&(_, next)) = chars.peek() {
                    if next == close {
                        value.push(close);
                        chars.next();
                        continue;
                    }
                }
                self.advance(i + c.len_utf8());
                return Ok(Token {
                    kind: TokenKind::QuotedIdentifier,
                    text: value,
                    position: start,
                    preceded_by_whitespace: spaced,
                });
            }
            value.push(c);
        }
        Err(TranspileError::tokenize(
            start,
            format!("unterminated quoted identifier (missing '{}')", close),
        ))
    }

    fn dollar_string(&mut self, delimiter: &str, spaced: bool) -> TranspileResult<Token> {
        let start = self.here();
        let body = &self.rest()[delimiter.len()..];
        match body.find(delimiter) {
            Some(end) => {
                let value = body[..end].to_string();
                self.advance(delimiter.len() * 2 + end);
                Ok(Token {
                    kind: TokenKind::String,
                    text: value,
                    position: start,
                    preceded_by_whitespace: spaced,
                })
            }
            None => Err(TranspileError::tokenize(
                start,
                "unterminated dollar-quoted string",
            )),
        }
    }

    fn parameter_len(&self, rest: &str) -> Option<usize> {
        let body = &rest[1..];
        let digits = body.chars().take_while(|c| c.is_ascii_digit()).count();
        let word = word_len(body);
        match rest.chars().next()? {
            '?' => Some(1 + digits),
            '$' if digits > 0 => Some(1 + digits),
            '$' | ':' | '@' if word > 0 => Some(1 + word),
            ':' if digits > 0 => Some(1 + digits),
            _ => None,
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = TranspileResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let scanned = self.scan();
        match &scanned {
            Ok(token) if token.kind == TokenKind::Eof => self.done = true,
            Err(_) => self.done = true,
            _ => {}
        }
        Some(scanned)
    }
}

/// Tokenize `input` completely, dropping whitespace and comments.
/// The returned vector always ends with an [`TokenKind::Eof`] token.
pub fn tokenize(input: &str, rules: &TokenizerRules) -> TranspileResult<Vec<Token>> {
    Tokenizer::new(input, rules).collect()
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while1(char::is_whitespace)(input)
}

fn number(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

fn word_len(input: &str) -> usize {
    let scanned: IResult<&str, &str> = recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_' || c == '@'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input);
    scanned.map(|(_, w)| w.len()).unwrap_or(0)
}

/// `$$` or `$tag$` at the start of `input`.
fn dollar_delimiter(input: &str) -> Option<&str> {
    let body = &input[1..];
    if body.starts_with('$') {
        return Some(&input[..2]);
    }
    let first = body.chars().next()?;
    if !(first.is_alphabetic() || first == '_') {
        return None;
    }
    let tag_len = body
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    if body[tag_len..].starts_with('$') {
        Some(&input[..tag_len + 2])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{ansi::ansi, mysql::mysql, postgres::postgres, tsql::tsql};
    use pretty_assertions::assert_eq;

    fn kinds(sql: &str, rules: &TokenizerRules) -> Vec<(TokenKind, String)> {
        tokenize(sql, rules)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_simple_select() {
        let d = ansi();
        let toks = kinds("SELECT a, 1.5 FROM t", &d.tokenizer);
        assert_eq!(
            toks,
            vec![
                (TokenKind::Keyword, "SELECT".to_string()),
                (TokenKind::Identifier, "a".to_string()),
                (TokenKind::Punctuation, ",".to_string()),
                (TokenKind::Number, "1.5".to_string()),
                (TokenKind::Keyword, "FROM".to_string()),
                (TokenKind::Identifier, "t".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let d = ansi();
        let toks = tokenize("SELECT\n  x", &d.tokenizer).unwrap();
        assert_eq!(toks[1].position, Position::new(2, 3, 9));
        assert_eq!(toks[2].kind, TokenKind::Eof);
        assert_eq!(toks[2].position, Position::new(2, 4, 10));
    }

    #[test]
    fn test_comments_are_dropped_but_count_as_space() {
        let d = ansi();
        let toks = tokenize("a/* note */b -- tail\n", &d.tokenizer).unwrap();
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[1].text, "b");
        assert!(toks[1].preceded_by_whitespace);
    }

    #[test]
    fn test_trivia_mode_keeps_comments() {
        let d = ansi();
        let toks: Vec<Token> = Tokenizer::new("a -- c", &d.tokenizer)
            .with_trivia()
            .collect::<TranspileResult<_>>()
            .unwrap();
        let kinds: Vec<TokenKind> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Whitespace,
                TokenKind::Comment,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        let d = ansi();
        let toks = kinds("'it''s'", &d.tokenizer);
        assert_eq!(toks[0], (TokenKind::String, "it's".to_string()));

        let m = mysql();
        let toks = kinds(r#"'a\'b' "dq""#, &m.tokenizer);
        assert_eq!(toks[0], (TokenKind::String, "a'b".to_string()));
        assert_eq!(toks[1], (TokenKind::String, "dq".to_string()));
    }

    #[test]
    fn test_quoted_identifiers_per_dialect() {
        let t = tsql();
        let toks = kinds("[my col]", &t.tokenizer);
        assert_eq!(toks[0], (TokenKind::QuotedIdentifier, "my col".to_string()));

        let m = mysql();
        let toks = kinds("`a``b`", &m.tokenizer);
        assert_eq!(toks[0], (TokenKind::QuotedIdentifier, "a`b".to_string()));
    }

    #[test]
    fn test_unterminated_string_reports_start() {
        let d = ansi();
        let err = tokenize("SELECT 'abc", &d.tokenizer).unwrap_err();
        assert_eq!(err.position(), Some(Position::new(1, 8, 7)));
        assert_eq!(err.kind(), "tokenize");
    }

    #[test]
    fn test_unterminated_comment() {
        let d = ansi();
        let err = tokenize("SELECT /* open", &d.tokenizer).unwrap_err();
        assert_eq!(err.position(), Some(Position::new(1, 8, 7)));
    }

    #[test]
    fn test_longest_operator_match() {
        let p = postgres();
        let toks = kinds("a::int <> b || c", &p.tokenizer);
        let ops: Vec<&str> = toks
            .iter()
            .filter(|(k, _)| *k == TokenKind::Operator)
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(ops, vec!["::", "<>", "||"]);
    }

    #[test]
    fn test_dollar_quoted_and_params() {
        let p = postgres();
        let toks = kinds("$$body$$ $1 $fn$x$fn$", &p.tokenizer);
        assert_eq!(toks[0], (TokenKind::String, "body".to_string()));
        assert_eq!(toks[1], (TokenKind::Parameter, "$1".to_string()));
        assert_eq!(toks[2], (TokenKind::String, "x".to_string()));
    }

    #[test]
    fn test_hash_comment_only_in_mysql() {
        let m = mysql();
        assert_eq!(tokenize("a # c", &m.tokenizer).unwrap().len(), 2);

        let p = postgres();
        let toks = kinds("a # b", &p.tokenizer);
        assert_eq!(toks[1], (TokenKind::Operator, "#".to_string()));
    }

    #[test]
    fn test_unknown_character_is_a_token() {
        let d = ansi();
        let toks = kinds("a § b", &d.tokenizer);
        assert_eq!(toks[1], (TokenKind::Unknown, "§".to_string()));
    }

    #[test]
    fn test_restartable() {
        let d = ansi();
        let sql = "SELECT x FROM y WHERE z = 'q'";
        assert_eq!(tokenize(sql, &d.tokenizer), tokenize(sql, &d.tokenizer));
    }
}
