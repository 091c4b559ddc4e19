//! Data type names, resolved through the dialect's alias table.

use crate::ast::DataType;
use crate::error::TranspileResult;
use crate::parser::Parser;
use crate::tokens::TokenKind;

impl<'a> Parser<'a> {
    /// A type name, possibly several words long (`DOUBLE PRECISION`,
    /// `TIMESTAMP WITH TIME ZONE`), with optional arguments.
    ///
    /// Spellings without an alias become [`DataType::Custom`] as written.
    pub fn parse_data_type(&mut self) -> TranspileResult<DataType> {
        let aliases = &self.dialect().parser.type_aliases;

        let first = self.peek().clone();
        if !matches!(first.kind, TokenKind::Identifier | TokenKind::Keyword) {
            self.expect_here("data type");
            return Err(self.error());
        }
        self.advance();
        let mut key = first.text.to_ascii_uppercase();
        let mut written = first.text.clone();

        loop {
            let next = self.peek();
            if !matches!(next.kind, TokenKind::Identifier | TokenKind::Keyword) {
                break;
            }
            let candidate = format!("{} {}", key, next.text.to_ascii_uppercase());
            let prefix = format!("{} ", candidate);
            let extends = aliases
                .keys()
                .any(|alias| *alias == candidate || alias.starts_with(&prefix));
            if !extends {
                break;
            }
            written = format!("{} {}", written, next.text);
            key = candidate;
            self.advance();
        }

        let mut args = Vec::new();
        if self.eat_symbol("(") {
            args = self.parse_comma_separated(|p| {
                let token = p.peek().clone();
                match token.kind {
                    TokenKind::Number | TokenKind::Identifier | TokenKind::Keyword => {
                        p.advance();
                        Ok(token.text)
                    }
                    TokenKind::String => {
                        p.advance();
                        Ok(format!("'{}'", token.text.replace('\'', "''")))
                    }
                    _ => {
                        p.expect_here("type argument");
                        Err(p.error())
                    }
                }
            })?;
            self.expect_symbol(")")?;
        }

        let with_args = format!("{}({})", key, args.join(",").to_ascii_uppercase());
        if !args.is_empty() {
            if let Some(kind) = aliases.get(&with_args) {
                return Ok(kind.with_params(&[]));
            }
        }

        let numeric: Option<Vec<u64>> = args.iter().map(|a| a.parse::<u64>().ok()).collect();
        match (aliases.get(&key), numeric) {
            (Some(kind), Some(params)) => Ok(kind.with_params(&params)),
            (Some(kind), None) => Ok(kind.with_params(&[])),
            (None, _) if args.is_empty() => Ok(DataType::Custom(written)),
            (None, _) => Ok(DataType::Custom(format!("{}({})", written, args.join(", ")))),
        }
    }
}
