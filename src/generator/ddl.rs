//! DDL generation: CREATE TABLE, CREATE VIEW, DROP.

use crate::ast::*;
use crate::dialect::{AutoIncrementSyntax, Construct, precedence};
use crate::error::TranspileResult;

use super::Generator;
use super::dml::select::build_query;

/// Generate CREATE TABLE SQL.
pub fn build_create_table(create: &CreateTable, generator: &Generator) -> TranspileResult<String> {
    let mut head = String::from("CREATE ");
    if create.temporary {
        head.push_str("TEMPORARY ");
    }
    head.push_str("TABLE ");
    if create.if_not_exists {
        generator.require(Construct::IfNotExists)?;
        head.push_str("IF NOT EXISTS ");
    }
    head.push_str(&generator.object_name(&create.name));

    let mut elements = create
        .columns
        .iter()
        .map(|column| build_column(column, generator))
        .collect::<TranspileResult<Vec<_>>>()?;
    for constraint in &create.constraints {
        elements.push(match constraint {
            TableConstraint::PrimaryKey(columns) => {
                format!("PRIMARY KEY ({})", generator.idents(columns))
            }
            TableConstraint::Unique(columns) => format!("UNIQUE ({})", generator.idents(columns)),
        });
    }
    if !elements.is_empty() {
        let separator = if generator.options().pretty { ",\n" } else { ", " };
        head.push(' ');
        head.push_str(&generator.block(&elements.join(separator)));
    }

    match &create.query {
        Some(query) => Ok(generator.clauses(vec![
            head,
            format!("AS {}", build_query(query, generator)?),
        ])),
        None => Ok(head),
    }
}

fn build_column(column: &ColumnDef, generator: &Generator) -> TranspileResult<String> {
    let mut out = format!(
        "{} {}",
        generator.ident(&column.name),
        generator.data_type(&column.data_type)
    );
    for option in &column.options {
        out.push(' ');
        match option {
            ColumnOption::NotNull => out.push_str("NOT NULL"),
            ColumnOption::Null => out.push_str("NULL"),
            ColumnOption::PrimaryKey => out.push_str("PRIMARY KEY"),
            ColumnOption::Unique => out.push_str("UNIQUE"),
            ColumnOption::Default(value) => {
                out.push_str("DEFAULT ");
                out.push_str(&generator.operand(value, precedence::COMPARISON, true)?);
            }
            ColumnOption::AutoIncrement => match generator.dialect().auto_increment {
                Some(AutoIncrementSyntax::AutoIncrement) => out.push_str("AUTO_INCREMENT"),
                Some(AutoIncrementSyntax::Autoincrement) => out.push_str("AUTOINCREMENT"),
                Some(AutoIncrementSyntax::Identity) => out.push_str("IDENTITY(1,1)"),
                Some(AutoIncrementSyntax::GeneratedIdentity) => {
                    out.push_str("GENERATED BY DEFAULT AS IDENTITY")
                }
                None => return Err(generator.unsupported(Construct::AutoIncrement.name())),
            },
        }
    }
    Ok(out)
}

/// Generate CREATE VIEW SQL.
pub fn build_create_view(view: &CreateView, generator: &Generator) -> TranspileResult<String> {
    let mut head = String::from("CREATE ");
    if view.or_replace {
        head.push_str(&format!("OR {} ", generator.dialect().generator.or_replace));
    }
    head.push_str("VIEW ");
    head.push_str(&generator.object_name(&view.name));
    if !view.columns.is_empty() {
        head.push_str(&format!(" ({})", generator.idents(&view.columns)));
    }
    Ok(generator.clauses(vec![
        head,
        format!("AS {}", build_query(&view.query, generator)?),
    ]))
}

/// Generate DROP SQL.
pub fn build_drop(drop: &DropStatement, generator: &Generator) -> TranspileResult<String> {
    let mut sql = format!("DROP {} ", drop.object.keyword());
    if drop.if_exists {
        generator.require(Construct::IfExists)?;
        sql.push_str("IF EXISTS ");
    }
    let names: Vec<String> = drop.names.iter().map(|n| generator.object_name(n)).collect();
    sql.push_str(&names.join(", "));
    if drop.cascade {
        generator.require(Construct::DropCascade)?;
        sql.push_str(" CASCADE");
    }
    Ok(sql)
}
