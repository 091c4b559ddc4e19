//! Error types for sqlingual.

use thiserror::Error;

use crate::tokens::Position;

/// The main error type for transpiler operations.
///
/// Every variant carries enough structure for a caller to point at the
/// offending input; none of them leaves the registry modified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranspileError {
    /// Dialect name not present in the registry.
    #[error("Unsupported dialect: '{name}'{}", suggestion_suffix(.suggestion))]
    UnknownDialect {
        name: String,
        suggestion: Option<String>,
    },

    /// Unterminated string, quoted identifier or block comment.
    #[error("Syntax error at line {}, column {}: {message}", .position.line, .position.column)]
    Tokenize { message: String, position: Position },

    /// The parser rejected the token stream.
    #[error(
        "Syntax error at line {}, column {}: expected {}, found {found}",
        .position.line,
        .position.column,
        expected_summary(.expected)
    )]
    Syntax {
        position: Position,
        expected: Vec<String>,
        found: String,
    },

    /// An AST node has no rendering rule for the target dialect.
    #[error("Cannot express {construct} in dialect {dialect}")]
    UnsupportedConstruct {
        construct: String,
        dialect: String,
        position: Option<Position>,
    },

    /// Invalid configuration or custom dialect definition.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (config files, CLI input).
    #[error("IO error: {0}")]
    Io(String),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(". Did you mean '{}'?", s),
        None => String::new(),
    }
}

fn expected_summary(expected: &[String]) -> String {
    match expected {
        [] => "a valid token".to_string(),
        [one] => one.clone(),
        many => format!("one of {}", many.join(", ")),
    }
}

impl TranspileError {
    /// Create a syntax error at the given position.
    pub fn syntax(position: Position, expected: Vec<String>, found: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            expected,
            found: found.into(),
        }
    }

    /// Create a tokenizer error at the given position.
    pub fn tokenize(position: Position, message: impl Into<String>) -> Self {
        Self::Tokenize {
            message: message.into(),
            position,
        }
    }

    /// Create an unsupported-construct error.
    pub fn unsupported(construct: impl Into<String>, dialect: impl Into<String>) -> Self {
        Self::UnsupportedConstruct {
            construct: construct.into(),
            dialect: dialect.into(),
            position: None,
        }
    }

    /// Source position of the failure, when the error has one.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Tokenize { position, .. } | Self::Syntax { position, .. } => Some(*position),
            Self::UnsupportedConstruct { position, .. } => *position,
            _ => None,
        }
    }

    /// Attach a position to an unsupported-construct error that has none yet.
    pub fn at(self, at: Option<Position>) -> Self {
        match self {
            Self::UnsupportedConstruct {
                construct,
                dialect,
                position: None,
            } => Self::UnsupportedConstruct {
                construct,
                dialect,
                position: at,
            },
            other => other,
        }
    }

    /// Short, stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownDialect { .. } => "unknown_dialect",
            Self::Tokenize { .. } => "tokenize",
            Self::Syntax { .. } => "syntax",
            Self::UnsupportedConstruct { .. } => "unsupported_construct",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}

impl From<std::io::Error> for TranspileError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Result type alias for transpiler operations.
pub type TranspileResult<T> = Result<T, TranspileError>;
