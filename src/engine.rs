//! Transpile orchestrator.
//!
//! This module ties the pieces together: resolve the dialects, parse the
//! whole input with the source rules, then render every statement with the
//! target rules. A call either returns every statement or an error; it
//! never returns a partial list.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::Statement;
use crate::dialect::{Registry, global};
use crate::error::{TranspileError, TranspileResult};
use crate::generator::{GenerateOptions, Generator};
use crate::parser::parse_sql;

/// Output options for a transpile call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranspileOptions {
    pub pretty: bool,
    pub indent: usize,
    pub identify: bool,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        let defaults = GenerateOptions::default();
        Self {
            pretty: defaults.pretty,
            indent: defaults.indent,
            identify: defaults.identify,
        }
    }
}

impl From<&TranspileOptions> for GenerateOptions {
    fn from(options: &TranspileOptions) -> Self {
        GenerateOptions {
            pretty: options.pretty,
            indent: options.indent,
            identify: options.identify,
        }
    }
}

/// Outcome of [`validate`]. Serialises as
/// `{"ok": false, "error": {"message": ..., "line": 1, "column": 14}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
    /// Absent for errors without a source position (unknown dialect).
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    fn invalid(error: &TranspileError) -> Self {
        let position = error.position();
        Self {
            ok: false,
            error: Some(ValidationError {
                message: error.to_string(),
                line: position.map(|p| p.line),
                column: position.map(|p| p.column),
            }),
        }
    }
}

/// Transpiler bound to a dialect registry.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'r> {
    registry: &'r Registry,
}

impl Engine<'static> {
    /// An engine over the process-wide registry.
    pub fn global() -> Self {
        Self::new(global())
    }
}

impl<'r> Engine<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Translate every statement in `sql` from `read` to `write`.
    pub fn transpile_with(
        &self,
        sql: &str,
        read: &str,
        write: &str,
        options: &TranspileOptions,
    ) -> TranspileResult<Vec<String>> {
        let source = self.registry.resolve(read)?;
        let target = self.registry.resolve(write)?;
        let statements = parse_sql(sql, &source)?;
        debug!(
            read = %source.name,
            write = %target.name,
            statements = statements.len(),
            "transpiling"
        );

        let generator = Generator::new(&target, options.into());
        statements
            .iter()
            .map(|statement| generator.generate(statement))
            .collect()
    }

    /// Parse `sql` in `dialect`.
    pub fn parse(&self, sql: &str, dialect: &str) -> TranspileResult<Vec<Statement>> {
        let dialect = self.registry.resolve(dialect)?;
        let statements = parse_sql(sql, &dialect)?;
        debug!(dialect = %dialect.name, statements = statements.len(), "parsed");
        Ok(statements)
    }

    /// Check that `sql` is valid in `dialect`.
    ///
    /// Valid means the text also renders back into the same dialect, so
    /// the answer always agrees with a same-dialect [`Engine::transpile_with`].
    pub fn validate(&self, sql: &str, dialect: &str) -> ValidationResult {
        let outcome = self.transpile_with(sql, dialect, dialect, &TranspileOptions::default());
        debug!(dialect, ok = outcome.is_ok(), "validated");
        match outcome {
            Ok(_) => ValidationResult::valid(),
            Err(e) => ValidationResult::invalid(&e),
        }
    }

    pub fn list_dialects(&self) -> Vec<String> {
        self.registry.names()
    }
}

/// Translate `sql` from `read` to `write` with default options.
///
/// # Example
///
/// ```
/// let sql = sqlingual::transpile("SELECT a FROM t LIMIT 5, 10", "mysql", "postgres", false).unwrap();
/// assert_eq!(sql, vec!["SELECT a FROM t LIMIT 10 OFFSET 5".to_string()]);
/// ```
pub fn transpile(sql: &str, read: &str, write: &str, pretty: bool) -> TranspileResult<Vec<String>> {
    let options = TranspileOptions {
        pretty,
        ..TranspileOptions::default()
    };
    Engine::global().transpile_with(sql, read, write, &options)
}

/// Validate `sql` against `dialect` in the process-wide registry.
pub fn validate(sql: &str, dialect: &str) -> ValidationResult {
    Engine::global().validate(sql, dialect)
}

/// Parse `sql` with `dialect` from the process-wide registry.
pub fn parse(sql: &str, dialect: &str) -> TranspileResult<Vec<Statement>> {
    Engine::global().parse(sql, dialect)
}

/// Every registered dialect name, sorted.
pub fn list_dialects() -> Vec<String> {
    Engine::global().list_dialects()
}
