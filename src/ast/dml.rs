use serde::{Deserialize, Serialize};

use super::{Expr, Ident, ObjectName, Query, SelectItem};

/// `INSERT INTO table [(columns)] <query>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    pub table: ObjectName,
    pub columns: Vec<Ident>,
    /// `VALUES` rows or a `SELECT`.
    pub source: Box<Query>,
    pub returning: Vec<SelectItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub table: ObjectName,
    pub alias: Option<Ident>,
    pub assignments: Vec<Assignment>,
    pub selection: Option<Expr>,
    pub returning: Vec<SelectItem>,
}

/// `target = value` inside `UPDATE ... SET`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub target: Vec<Ident>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub table: ObjectName,
    pub selection: Option<Expr>,
    pub returning: Vec<SelectItem>,
}
