//! sqlingual: translate SQL between dialects
//!
//! # Usage
//!
//! ```bash
//! # Translate a statement
//! sqlingual transpile "SELECT TOP 5 * FROM t" -r tsql -w postgres
//!
//! # Check a file as you edit it
//! sqlingual validate --file query.sql -d snowflake
//!
//! # Dump the AST
//! sqlingual parse "SELECT 1" -d ansi
//! ```

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use sqlingual::config::{CONFIG_ENV, Config};
use sqlingual::dialect::global;
use sqlingual::{Engine, TranspileOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlingual")]
#[command(version)]
#[command(about = "Translate SQL between dialects", long_about = None)]
#[command(after_help = "EXAMPLES:
    sqlingual transpile 'SELECT TOP 5 * FROM t' -r tsql -w postgres --pretty
    sqlingual transpile --file report.sql -r mysql -w bigquery
    sqlingual validate 'SELECT * FROM' -d ansi --format json
    sqlingual dialects")]
struct Cli {
    /// Config file with defaults and custom dialects
    #[arg(long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Debug logging (otherwise RUST_LOG decides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// SQL given inline, in a file, or on stdin.
#[derive(Args)]
struct Input {
    /// SQL text; read from --file or stdin when omitted
    sql: Option<String>,

    /// Read the SQL from a file
    #[arg(short, long, conflicts_with = "sql")]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate SQL from one dialect to another
    Transpile {
        #[command(flatten)]
        input: Input,

        /// Source dialect
        #[arg(short, long)]
        read: Option<String>,

        /// Target dialect
        #[arg(short, long)]
        write: Option<String>,

        /// One clause per line
        #[arg(short, long)]
        pretty: bool,

        /// Quote every identifier
        #[arg(long)]
        identify: bool,
    },
    /// Check SQL against a dialect (exit code 1 when invalid)
    Validate {
        #[command(flatten)]
        input: Input,

        #[arg(short, long)]
        dialect: Option<String>,
    },
    /// List the available dialects
    Dialects,
    /// Print the AST as JSON
    Parse {
        #[command(flatten)]
        input: Input,

        #[arg(short, long)]
        dialect: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sqlingual=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref()).context("loading config")?;
    config
        .register_dialects(global())
        .context("registering custom dialects")?;
    let engine = Engine::global();
    let defaults = &config.defaults;

    match &cli.command {
        Commands::Transpile {
            input,
            read,
            write,
            pretty,
            identify,
        } => {
            let read = pick(read, &defaults.read, "source dialect (--read)")?;
            let write = pick(write, &defaults.write, "target dialect (--write)")?;
            let options = TranspileOptions {
                pretty: *pretty || defaults.pretty,
                identify: *identify || defaults.identify,
                ..defaults.transpile_options()
            };
            let sql = input.read()?;
            let statements = engine.transpile_with(&sql, &read, &write, &options)?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&statements)?),
                OutputFormat::Text => print_statements(&statements, options.pretty),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { input, dialect } => {
            let dialect = pick(dialect, &defaults.read, "dialect (--dialect)")?;
            let sql = input.read()?;
            let result = engine.validate(&sql, &dialect);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => match &result.error {
                    None => println!("{} valid {} SQL", "✓".green(), dialect.cyan()),
                    Some(error) => println!("{} {}", "✗".red(), error.message),
                },
            }
            Ok(if result.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Dialects => {
            let names = engine.list_dialects();
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
                OutputFormat::Text => {
                    for name in names {
                        println!("{}", name);
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Parse { input, dialect } => {
            let dialect = pick(dialect, &defaults.read, "dialect (--dialect)")?;
            let sql = input.read()?;
            let statements = engine.parse(&sql, &dialect)?;
            println!("{}", serde_json::to_string_pretty(&statements)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Flag value, else config default.
fn pick(flag: &Option<String>, default: &Option<String>, what: &str) -> Result<String> {
    match flag.as_ref().or(default.as_ref()) {
        Some(name) => Ok(name.clone()),
        None => bail!("no {} given and none set in the config", what),
    }
}

impl Input {
    fn read(&self) -> Result<String> {
        if let Some(sql) = &self.sql {
            return Ok(sql.clone());
        }
        if let Some(path) = &self.file {
            return read_file(path);
        }
        let mut sql = String::new();
        io::stdin()
            .read_to_string(&mut sql)
            .context("reading SQL from stdin")?;
        Ok(sql)
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_statements(statements: &[String], pretty: bool) {
    if let [only] = statements {
        println!("{}", only);
        return;
    }
    let separator = if pretty { ";\n\n" } else { ";\n" };
    println!("{};", statements.join(separator));
}
