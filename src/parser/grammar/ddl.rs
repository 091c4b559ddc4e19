//! CREATE TABLE, CREATE VIEW and DROP.

use crate::ast::*;
use crate::dialect::Construct;
use crate::error::TranspileResult;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub fn parse_create(&mut self) -> TranspileResult<Statement> {
        self.expect_word("CREATE")?;
        if self.eat_word("OR") {
            let replace = self.dialect().generator.or_replace.clone();
            self.expect_word(&replace)?;
            return self.parse_create_view(true).map(Statement::CreateView);
        }
        let temporary = self.eat_word("TEMPORARY") || self.eat_word("TEMP");
        if !temporary && self.eat_word("VIEW") {
            return self.finish_create_view(false).map(Statement::CreateView);
        }
        self.expect_word("TABLE")?;
        self.parse_create_table(temporary).map(Statement::CreateTable)
    }

    fn parse_create_view(&mut self, or_replace: bool) -> TranspileResult<CreateView> {
        self.expect_word("VIEW")?;
        self.finish_create_view(or_replace)
    }

    fn finish_create_view(&mut self, or_replace: bool) -> TranspileResult<CreateView> {
        let name = self.parse_object_name()?;
        let columns = if self.peek().is_symbol("(") {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };
        self.expect_word("AS")?;
        let query = self.parse_query()?;
        Ok(CreateView {
            name,
            or_replace,
            columns,
            query: Box::new(query),
        })
    }

    /// After `CREATE [TEMPORARY] TABLE`.
    fn parse_create_table(&mut self, temporary: bool) -> TranspileResult<CreateTable> {
        let if_not_exists =
            self.supports(Construct::IfNotExists) && self.eat_words(&["IF", "NOT", "EXISTS"]);
        let name = self.parse_object_name()?;

        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        if self.eat_symbol("(") {
            loop {
                if let Some(constraint) = self.parse_table_constraint()? {
                    constraints.push(constraint);
                } else {
                    columns.push(self.parse_column_def()?);
                }
                if !self.eat_symbol(",") {
                    break;
                }
            }
            self.expect_symbol(")")?;
        }

        let query = if self.eat_word("AS") {
            Some(Box::new(self.parse_query()?))
        } else if columns.is_empty() && constraints.is_empty() {
            return Err(self.error());
        } else {
            None
        };

        Ok(CreateTable {
            name,
            temporary,
            if_not_exists,
            columns,
            constraints,
            query,
        })
    }

    fn parse_table_constraint(&mut self) -> TranspileResult<Option<TableConstraint>> {
        if self.eat_words(&["PRIMARY", "KEY"]) {
            let columns = self.parse_parenthesized_identifiers()?;
            return Ok(Some(TableConstraint::PrimaryKey(columns)));
        }
        if self.eat_word("UNIQUE") {
            let columns = self.parse_parenthesized_identifiers()?;
            return Ok(Some(TableConstraint::Unique(columns)));
        }
        Ok(None)
    }

    fn parse_column_def(&mut self) -> TranspileResult<ColumnDef> {
        let name = self.parse_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut options = Vec::new();
        while let Some(option) = self.parse_column_option()? {
            options.push(option);
        }
        Ok(ColumnDef {
            name,
            data_type,
            options,
        })
    }

    fn parse_column_option(&mut self) -> TranspileResult<Option<ColumnOption>> {
        if self.eat_words(&["NOT", "NULL"]) {
            return Ok(Some(ColumnOption::NotNull));
        }
        if self.eat_word("NULL") {
            return Ok(Some(ColumnOption::Null));
        }
        if self.eat_words(&["PRIMARY", "KEY"]) {
            return Ok(Some(ColumnOption::PrimaryKey));
        }
        if self.eat_word("UNIQUE") {
            return Ok(Some(ColumnOption::Unique));
        }
        if self.eat_word("DEFAULT") {
            let value = self.parse_subexpr(crate::dialect::precedence::COMPARISON)?;
            return Ok(Some(ColumnOption::Default(value)));
        }
        if self.dialect().auto_increment.is_some() && self.parse_auto_increment()? {
            return Ok(Some(ColumnOption::AutoIncrement));
        }
        Ok(None)
    }

    /// Any auto-increment spelling: `AUTO_INCREMENT`, `AUTOINCREMENT`,
    /// `IDENTITY[(seed, step)]`, `GENERATED [ALWAYS | BY DEFAULT] AS IDENTITY`.
    fn parse_auto_increment(&mut self) -> TranspileResult<bool> {
        if self.eat_word("AUTO_INCREMENT") || self.eat_word("AUTOINCREMENT") {
            return Ok(true);
        }
        if self.eat_word("IDENTITY") {
            if self.eat_symbol("(") {
                self.parse_comma_separated(|p| p.parse_prefix())?;
                self.expect_symbol(")")?;
            }
            return Ok(true);
        }
        if self.eat_word("GENERATED") {
            if !self.eat_word("ALWAYS") {
                self.expect_word("BY")?;
                self.expect_word("DEFAULT")?;
            }
            self.expect_word("AS")?;
            self.expect_word("IDENTITY")?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn parse_drop(&mut self) -> TranspileResult<DropStatement> {
        self.expect_word("DROP")?;
        let object = if self.eat_word("TABLE") {
            ObjectType::Table
        } else {
            self.expect_word("VIEW")?;
            ObjectType::View
        };
        let if_exists = self.supports(Construct::IfExists) && self.eat_words(&["IF", "EXISTS"]);
        let names = self.parse_comma_separated(|p| p.parse_object_name())?;
        let cascade = self.supports(Construct::DropCascade) && self.eat_word("CASCADE");
        Ok(DropStatement {
            object,
            if_exists,
            names,
            cascade,
        })
    }
}
