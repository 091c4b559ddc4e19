use serde::{Deserialize, Serialize};

use super::{DataType, Ident, OrderByExpr, Query, Span};

/// A scalar expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Identifier(Ident),
    /// A dotted reference (`t.col`, `schema.t.col`).
    CompoundIdentifier(Vec<Ident>),
    Literal(Literal),
    Parameter(Parameter),
    Binary {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    Function(Function),
    /// `CAST(expr AS type)`, `expr::type`, or the non-failing variants
    /// (`TRY_CAST`, `SAFE_CAST`) when `try_cast` is set.
    Cast {
        expr: Box<Expr>,
        data_type: DataType,
        try_cast: bool,
    },
    Case {
        operand: Option<Box<Expr>>,
        conditions: Vec<WhenClause>,
        else_result: Option<Box<Expr>>,
    },
    /// Three-argument conditional (`IF`, `IIF`, `IFF`).
    If {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Between {
        expr: Box<Expr>,
        negated: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<Query>,
        negated: bool,
    },
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        negated: bool,
        case_insensitive: bool,
        escape: Option<Box<Expr>>,
    },
    IsNull {
        expr: Box<Expr>,
        negated: bool,
    },
    Exists {
        subquery: Box<Query>,
        negated: bool,
    },
    Subquery(Box<Query>),
    /// An explicitly parenthesised expression.
    Nested(Box<Expr>),
    Extract {
        field: DateTimeField,
        expr: Box<Expr>,
    },
    Interval {
        value: Box<Expr>,
        unit: Option<DateTimeField>,
    },
    CurrentTime(CurrentTimeKind),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(Ident::new(name))
    }

    pub fn number(n: impl Into<String>) -> Self {
        Expr::Literal(Literal::Number(n.into()))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(s.into()))
    }

    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function(Function::new(name, args))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhenClause {
    pub condition: Expr,
    pub result: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Numeric literal, kept as written.
    Number(String),
    String(String),
    Boolean(bool),
    Null,
    /// `DATE '2024-01-31'` and friends. The value was checked when parsed.
    Temporal { kind: TemporalKind, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemporalKind {
    Date,
    Time,
    Timestamp,
}

impl TemporalKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TemporalKind::Date => "DATE",
            TemporalKind::Time => "TIME",
            TemporalKind::Timestamp => "TIMESTAMP",
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            TemporalKind::Date => DataType::Date,
            TemporalKind::Time => DataType::Time,
            TemporalKind::Timestamp => DataType::Timestamp,
        }
    }
}

/// A bind parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parameter {
    /// `?`, carrying its 1-based place among the statement's `?`s in
    /// text order.
    Positional(u32),
    /// `$1`, `?1`, `:1`
    Numbered(u32),
    /// `:name`, `@name`, `$name`
    Named(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    /// String concatenation.
    Concat,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,
    Power,
}

impl BinaryOperator {
    /// Human-readable name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOperator::Plus => "addition",
            BinaryOperator::Minus => "subtraction",
            BinaryOperator::Multiply => "multiplication",
            BinaryOperator::Divide => "division",
            BinaryOperator::Modulo => "modulo",
            BinaryOperator::Concat => "string concatenation",
            BinaryOperator::Eq => "=",
            BinaryOperator::NotEq => "<>",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::BitwiseAnd => "bitwise AND",
            BinaryOperator::BitwiseOr => "bitwise OR",
            BinaryOperator::BitwiseXor => "bitwise XOR",
            BinaryOperator::ShiftLeft => "left shift",
            BinaryOperator::ShiftRight => "right shift",
            BinaryOperator::Power => "exponentiation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
    BitwiseNot,
}

/// A function call, optionally windowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Canonical upper-case name for functions the engine knows about,
    /// the source spelling otherwise.
    pub name: String,
    pub args: Vec<FunctionArg>,
    pub distinct: bool,
    pub over: Option<WindowSpec>,
    #[serde(skip)]
    pub span: Span,
}

impl Function {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().map(FunctionArg::Expr).collect(),
            distinct: false,
            over: None,
            span: Span::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FunctionArg {
    Expr(Expr),
    /// `COUNT(*)`
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub frame: Option<WindowFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFrame {
    pub units: FrameUnits,
    pub start: FrameBound,
    pub end: Option<FrameBound>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameUnits {
    Rows,
    Range,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(Box<Expr>),
    CurrentRow,
    Following(Box<Expr>),
    UnboundedFollowing,
}

/// Date part used by `EXTRACT`, `DATEPART` and intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateTimeField {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    DayOfWeek,
    DayOfYear,
    Hour,
    Minute,
    Second,
}

impl DateTimeField {
    pub fn parse(word: &str) -> Option<Self> {
        let field = match word.to_ascii_uppercase().as_str() {
            "YEAR" | "YEARS" | "YY" | "YYYY" => DateTimeField::Year,
            "QUARTER" | "QQ" => DateTimeField::Quarter,
            "MONTH" | "MONTHS" | "MM" => DateTimeField::Month,
            "WEEK" | "WEEKS" | "WK" => DateTimeField::Week,
            "DAY" | "DAYS" | "DD" => DateTimeField::Day,
            "DOW" | "DAYOFWEEK" | "WEEKDAY" | "DW" => DateTimeField::DayOfWeek,
            "DOY" | "DAYOFYEAR" | "DY" => DateTimeField::DayOfYear,
            "HOUR" | "HOURS" | "HH" => DateTimeField::Hour,
            "MINUTE" | "MINUTES" | "MI" => DateTimeField::Minute,
            "SECOND" | "SECONDS" | "SS" => DateTimeField::Second,
            _ => return None,
        };
        Some(field)
    }

    /// Standard SQL spelling.
    pub fn keyword(&self) -> &'static str {
        match self {
            DateTimeField::Year => "YEAR",
            DateTimeField::Quarter => "QUARTER",
            DateTimeField::Month => "MONTH",
            DateTimeField::Week => "WEEK",
            DateTimeField::Day => "DAY",
            DateTimeField::DayOfWeek => "DOW",
            DateTimeField::DayOfYear => "DOY",
            DateTimeField::Hour => "HOUR",
            DateTimeField::Minute => "MINUTE",
            DateTimeField::Second => "SECOND",
        }
    }

    /// T-SQL `DATEPART` spelling.
    pub fn datepart(&self) -> &'static str {
        match self {
            DateTimeField::DayOfWeek => "WEEKDAY",
            DateTimeField::DayOfYear => "DAYOFYEAR",
            other => other.keyword(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrentTimeKind {
    Date,
    Time,
    Timestamp,
}
