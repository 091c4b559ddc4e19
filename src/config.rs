//! TOML configuration: CLI defaults and custom dialects.
//!
//! ```toml
//! [defaults]
//! read = "mysql"
//! write = "postgres"
//! pretty = true
//!
//! [[dialect]]
//! name = "warehouse"
//! base = "postgres"
//! identifier_quote = "`"
//! limit_style = "top"
//! unknown_functions = "reject"
//! reserved = ["ACCOUNT"]
//! [dialect.function_aliases]
//! NVL2X = "COALESCE"
//! [dialect.function_names]
//! LENGTH = "CHAR_LENGTH"
//! ```
//!
//! A custom dialect starts from a registered one (built-in, or defined
//! earlier in the same file) and overrides a handful of rules.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialect::{Dialect, FunctionAlias, FunctionPolicy, LimitStyle, Registry};
use crate::engine::TranspileOptions;
use crate::error::{TranspileError, TranspileResult};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SQLINGUAL_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub defaults: Defaults,
    #[serde(rename = "dialect")]
    pub dialects: Vec<DialectConfig>,
}

/// Fallbacks for CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub read: Option<String>,
    pub write: Option<String>,
    pub pretty: bool,
    pub indent: Option<usize>,
    pub identify: bool,
}

impl Defaults {
    pub fn transpile_options(&self) -> TranspileOptions {
        let mut options = TranspileOptions {
            pretty: self.pretty,
            identify: self.identify,
            ..TranspileOptions::default()
        };
        if let Some(indent) = self.indent {
            options.indent = indent;
        }
        options
    }
}

/// Row-limiting spelling of a custom dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LimitSetting {
    LimitOffset,
    OffsetLimit,
    /// `TOP n`, with `OFFSET .. FETCH NEXT` for offsets.
    Top,
    FetchFirst,
    LimitOnly,
}

impl From<LimitSetting> for LimitStyle {
    fn from(setting: LimitSetting) -> Self {
        match setting {
            LimitSetting::LimitOffset => LimitStyle::LimitOffset,
            LimitSetting::OffsetLimit => LimitStyle::OffsetLimit,
            LimitSetting::Top => LimitStyle::Top { fetch: true },
            LimitSetting::FetchFirst => LimitStyle::FetchFirst,
            LimitSetting::LimitOnly => LimitStyle::LimitOnly,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectConfig {
    pub name: String,
    /// Dialect the rules are copied from; `ansi` when omitted.
    pub base: Option<String>,
    /// One of `"`, `` ` `` or `[`.
    pub identifier_quote: Option<String>,
    pub limit_style: Option<LimitSetting>,
    pub unknown_functions: Option<FunctionPolicy>,
    pub reserved: Vec<String>,
    /// Spelling accepted when parsing → canonical function.
    pub function_aliases: BTreeMap<String, String>,
    /// Canonical function → spelling rendered (and parsed back).
    pub function_names: BTreeMap<String, String>,
}

impl DialectConfig {
    /// Build the descriptor on top of `base`.
    pub fn build_on(&self, base: Dialect) -> TranspileResult<Dialect> {
        if self.name.trim().is_empty() {
            return Err(TranspileError::Config("dialect without a name".to_string()));
        }
        let mut dialect = base.named(&self.name);

        if let Some(quote) = &self.identifier_quote {
            let (open, close) = match quote.as_str() {
                "\"" => ('"', '"'),
                "`" => ('`', '`'),
                "[" | "[]" => ('[', ']'),
                other => {
                    return Err(TranspileError::Config(format!(
                        "dialect '{}': unsupported identifier_quote '{}'",
                        self.name, other
                    )));
                }
            };
            dialect = dialect.identifier_quote(open, close);
        }
        if let Some(style) = self.limit_style {
            dialect = dialect.limit_style(style.into());
        }
        if let Some(policy) = self.unknown_functions {
            dialect = dialect.with_parser(|p| p.unknown_functions = policy);
        }
        let reserved: Vec<&str> = self.reserved.iter().map(String::as_str).collect();
        dialect = dialect.reserve(&reserved);
        for (alias, canonical) in &self.function_aliases {
            dialect = dialect.alias_function(
                alias,
                FunctionAlias::Rename(canonical.to_ascii_uppercase()),
            );
        }
        for (canonical, rendered) in &self.function_names {
            dialect = dialect.rename_function(canonical, rendered);
        }
        Ok(dialect)
    }
}

impl FromStr for Config {
    type Err = TranspileError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        toml::from_str(text).map_err(|e| TranspileError::Config(e.to_string()))
    }
}

impl Config {
    /// `<config_dir>/sqlingual/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sqlingual").join("config.toml"))
    }

    /// Load `path`, or the default location when `None`. A missing
    /// default file is an empty config; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> TranspileResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> TranspileResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| TranspileError::Io(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded config");
        text.parse()
    }

    /// Build every custom dialect and register them into `registry`.
    ///
    /// All dialects are built before any is registered, so a bad entry
    /// leaves the registry untouched. Returns the registered names.
    pub fn register_dialects(&self, registry: &Registry) -> TranspileResult<Vec<String>> {
        let mut built: Vec<Dialect> = Vec::with_capacity(self.dialects.len());
        for entry in &self.dialects {
            let base_name = entry.base.as_deref().unwrap_or("ansi");
            let base = match built
                .iter()
                .rev()
                .find(|d| d.name.eq_ignore_ascii_case(base_name.trim()))
            {
                Some(earlier) => earlier.clone(),
                None => registry.resolve(base_name)?.as_ref().clone(),
            };
            built.push(entry.build_on(base)?);
        }

        let mut names = Vec::with_capacity(built.len());
        for dialect in built {
            let name = dialect.name.clone();
            registry.register(&name, dialect);
            names.push(name);
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
[defaults]
read = "mysql"
write = "postgres"
pretty = true
indent = 4

[[dialect]]
name = "warehouse"
base = "postgres"
identifier_quote = "`"
limit_style = "top"
unknown_functions = "reject"
reserved = ["ACCOUNT"]
[dialect.function_aliases]
NVL2X = "COALESCE"
[dialect.function_names]
LENGTH = "CHAR_LENGTH"

[[dialect]]
name = "lake"
base = "warehouse"
limit_style = "limit-offset"
"#;

    fn sample_registry() -> Registry {
        let registry = Registry::with_builtins();
        let config: Config = SAMPLE.parse().unwrap();
        let names = config.register_dialects(&registry).unwrap();
        assert_eq!(names, vec!["warehouse".to_string(), "lake".to_string()]);
        registry
    }

    fn one(engine: &Engine, sql: &str, read: &str, write: &str) -> String {
        let mut out = engine
            .transpile_with(sql, read, write, &TranspileOptions::default())
            .unwrap();
        assert_eq!(out.len(), 1);
        out.remove(0)
    }

    #[test]
    fn test_parse_defaults() {
        let config: Config = SAMPLE.parse().unwrap();
        assert_eq!(config.defaults.read.as_deref(), Some("mysql"));
        assert_eq!(config.defaults.write.as_deref(), Some("postgres"));
        let options = config.defaults.transpile_options();
        assert!(options.pretty);
        assert_eq!(options.indent, 4);
        assert_eq!(config.dialects.len(), 2);
        assert_eq!(config.dialects[0].limit_style, Some(LimitSetting::Top));
        assert_eq!(config.dialects[0].unknown_functions, Some(FunctionPolicy::Reject));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.defaults.transpile_options(), TranspileOptions::default());
    }

    #[test]
    fn test_custom_dialect_rules() {
        let registry = sample_registry();
        let engine = Engine::new(&registry);

        assert_eq!(
            one(&engine, "SELECT LENGTH(a) FROM t LIMIT 5", "postgres", "warehouse"),
            "SELECT TOP 5 CHAR_LENGTH(a) FROM t"
        );
        assert_eq!(
            one(&engine, "SELECT NVL2X(b, 1), CHAR_LENGTH(a) FROM t", "warehouse", "postgres"),
            "SELECT COALESCE(b, 1), LENGTH(a) FROM t"
        );
        assert_eq!(
            one(&engine, "SELECT \"my col\", account FROM t", "postgres", "warehouse"),
            "SELECT `my col`, `account` FROM t"
        );
    }

    #[test]
    fn test_custom_dialect_rejects_unknown_functions() {
        let registry = sample_registry();
        let engine = Engine::new(&registry);
        assert!(engine.validate("SELECT COALESCE(a, 1) FROM t", "warehouse").ok);
        assert!(!engine.validate("SELECT my_udf(a) FROM t", "warehouse").ok);
        assert!(engine.validate("SELECT my_udf(a) FROM t", "postgres").ok);
    }

    #[test]
    fn test_dialect_based_on_earlier_entry() {
        let registry = sample_registry();
        let engine = Engine::new(&registry);
        assert_eq!(
            one(&engine, "SELECT `x`, `account` FROM t LIMIT 5", "lake", "lake"),
            "SELECT `x`, `account` FROM t LIMIT 5"
        );
        assert!(!engine.validate("SELECT my_udf(a) FROM t", "lake").ok);
    }

    #[test]
    fn test_unknown_base_leaves_registry_untouched() {
        let registry = Registry::with_builtins();
        let before = registry.names();
        let config: Config = r#"
[[dialect]]
name = "first"
base = "postgres"

[[dialect]]
name = "second"
base = "postgress"
"#
        .parse()
        .unwrap();
        let err = config.register_dialects(&registry).unwrap_err();
        assert_eq!(err.kind(), "unknown_dialect");
        assert_eq!(registry.names(), before);
    }

    #[test]
    fn test_invalid_config_values() {
        let err = "[[dialect]]\nname = \"x\"\nlimit_style = \"sideways\"\n"
            .parse::<Config>()
            .unwrap_err();
        assert_eq!(err.kind(), "config");

        let err = "[defaults]\nreed = \"mysql\"\n".parse::<Config>().unwrap_err();
        assert_eq!(err.kind(), "config");

        let config: Config = "[[dialect]]\nname = \"x\"\nidentifier_quote = \"'\"\n"
            .parse()
            .unwrap();
        let err = config.register_dialects(&Registry::with_builtins()).unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here/sqlingual.toml"))).unwrap_err();
        assert_eq!(err.kind(), "io");
    }
}
