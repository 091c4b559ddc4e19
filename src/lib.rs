//! # sqlingual: translate SQL between dialects
//!
//! Text written for one database is parsed into a dialect-neutral AST and
//! rendered again for another. Constructs without a direct spelling in the
//! target are restructured rather than re-spelled:
//!
//! ```
//! use sqlingual::transpile;
//!
//! let sql = transpile("SELECT TOP 5 * FROM t", "tsql", "postgres", false).unwrap();
//! assert_eq!(sql, vec!["SELECT * FROM t LIMIT 5".to_string()]);
//!
//! let sql = transpile("SELECT a FROM t LIMIT 5, 10", "mysql", "postgres", false).unwrap();
//! assert_eq!(sql, vec!["SELECT a FROM t LIMIT 10 OFFSET 5".to_string()]);
//! ```
//!
//! ## Pipeline
//!
//! | Stage     | Module                   | Input → output                 |
//! |-----------|--------------------------|--------------------------------|
//! | Tokenize  | [`tokens`]               | text → tokens (source rules)   |
//! | Parse     | [`parser`]               | tokens → [`ast::Statement`]s   |
//! | Generate  | [`generator`]            | statements → text (target)     |
//! | Transpile | [`engine`]               | the three above, all-or-nothing|
//!
//! Dialects are plain data ([`dialect::Dialect`]) looked up by name in a
//! [`dialect::Registry`]; the process-wide one holds the built-ins and any
//! custom dialects loaded from [`config`].

pub mod ast;
pub mod config;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod generator;
pub mod parser;
pub mod tokens;

pub use engine::{
    Engine, TranspileOptions, ValidationError, ValidationResult, list_dialects, parse, transpile,
    validate,
};
pub use error::{TranspileError, TranspileResult};

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::Config;
    pub use crate::dialect::{Dialect, Registry, global};
    pub use crate::engine::{Engine, TranspileOptions, ValidationResult};
    pub use crate::error::*;
    pub use crate::generator::{GenerateOptions, Generator, ToSql, generate};
    pub use crate::parser::parse_sql;
}
