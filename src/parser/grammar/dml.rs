//! INSERT, UPDATE and DELETE.

use crate::ast::*;
use crate::dialect::Construct;
use crate::error::TranspileResult;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub fn parse_insert(&mut self) -> TranspileResult<Insert> {
        self.expect_word("INSERT")?;
        self.expect_word("INTO")?;
        let table = self.parse_object_name()?;
        let columns = if self.peek().is_symbol("(") && !self.peek_nth(1).is_word("SELECT") {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };
        let source = self.parse_query()?;
        let returning = self.parse_returning()?;
        Ok(Insert {
            table,
            columns,
            source: Box::new(source),
            returning,
        })
    }

    pub fn parse_update(&mut self) -> TranspileResult<Update> {
        self.expect_word("UPDATE")?;
        let table = self.parse_object_name()?;
        let alias = self.parse_optional_alias()?;
        self.expect_word("SET")?;
        let assignments = self.parse_comma_separated(|p| {
            let mut target = vec![p.parse_identifier()?];
            while p.eat_symbol(".") {
                target.push(p.parse_identifier()?);
            }
            p.expect_symbol("=")?;
            let value = p.parse_expr()?;
            Ok(Assignment { target, value })
        })?;
        let selection = if self.eat_word("WHERE") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let returning = self.parse_returning()?;
        Ok(Update {
            table,
            alias,
            assignments,
            selection,
            returning,
        })
    }

    pub fn parse_delete(&mut self) -> TranspileResult<Delete> {
        self.expect_word("DELETE")?;
        self.expect_word("FROM")?;
        let table = self.parse_object_name()?;
        let selection = if self.eat_word("WHERE") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let returning = self.parse_returning()?;
        Ok(Delete {
            table,
            selection,
            returning,
        })
    }

    fn parse_returning(&mut self) -> TranspileResult<Vec<SelectItem>> {
        if self.supports(Construct::Returning) && self.eat_word("RETURNING") {
            return self.parse_comma_separated(|p| p.parse_select_item());
        }
        Ok(vec![])
    }
}
