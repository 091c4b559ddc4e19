//! Dialect descriptors.
//!
//! A dialect is plain data: tokenizer rules, parser rules and generator
//! rules, plus the set of constructs it cannot express. Families start from
//! [`Dialect::base`] and override what differs; there is no per-dialect
//! code path in the parser or generator.
//!
//! Rules that must agree between parsing and rendering (function renames,
//! type renames, limit style, typed literals) are set through the builder
//! methods here, which update both sides at once. That keeps every dialect
//! able to re-parse what it renders.

pub mod ansi;
pub mod bigquery;
pub mod clickhouse;
pub mod duckdb;
pub mod hive;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod presto;
pub mod registry;
pub mod snowflake;
pub mod sqlite;
pub mod teradata;
pub mod tsql;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ast::{BinaryOperator, CurrentTimeKind, TypeKind, default_type_aliases};

pub use registry::{Registry, global};

/// Binding strength of operators, shared by the parser and the generator.
pub mod precedence {
    pub const OR: u8 = 5;
    pub const AND: u8 = 10;
    pub const NOT: u8 = 15;
    pub const COMPARISON: u8 = 20;
    pub const BIT_OR: u8 = 22;
    pub const BIT_XOR: u8 = 23;
    pub const BIT_AND: u8 = 24;
    pub const SHIFT: u8 = 25;
    pub const CONCAT: u8 = 27;
    pub const ADDITIVE: u8 = 30;
    pub const MULTIPLICATIVE: u8 = 40;
    pub const POWER: u8 = 50;
    pub const UNARY: u8 = 55;
    pub const CAST: u8 = 60;
    pub const ATOM: u8 = 100;
}

/// Constructs that some dialects cannot express at all.
///
/// The parser rejects a construct in this set and the generator fails with
/// `UnsupportedConstruct` instead of dropping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Construct {
    Qualify,
    DistinctOn,
    Returning,
    FullOuterJoin,
    NaturalJoin,
    JoinUsing,
    NullsOrdering,
    TryCast,
    Offset,
    IfNotExists,
    IfExists,
    DropCascade,
    AutoIncrement,
}

impl Construct {
    pub fn name(&self) -> &'static str {
        match self {
            Construct::Qualify => "QUALIFY",
            Construct::DistinctOn => "DISTINCT ON",
            Construct::Returning => "RETURNING",
            Construct::FullOuterJoin => "FULL OUTER JOIN",
            Construct::NaturalJoin => "NATURAL JOIN",
            Construct::JoinUsing => "JOIN ... USING",
            Construct::NullsOrdering => "NULLS FIRST/LAST",
            Construct::TryCast => "TRY_CAST",
            Construct::Offset => "OFFSET",
            Construct::IfNotExists => "IF NOT EXISTS",
            Construct::IfExists => "IF EXISTS",
            Construct::DropCascade => "DROP ... CASCADE",
            Construct::AutoIncrement => "auto-increment column",
        }
    }
}

/// How unquoted identifiers are folded by the engine behind a dialect.
/// Informational: the transpiler keeps identifiers as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseFolding {
    Upper,
    Lower,
    None,
}

#[derive(Debug, Clone)]
pub struct TokenizerRules {
    /// Upper-cased reserved words; these tokenize as keywords.
    pub reserved: HashSet<String>,
    pub identifier_quotes: Vec<(char, char)>,
    pub string_quotes: Vec<char>,
    pub backslash_escapes: bool,
    pub hash_comments: bool,
    pub nested_comments: bool,
    pub dollar_strings: bool,
    pub national_strings: bool,
    pub param_prefixes: Vec<char>,
    /// Characters besides letters and `_` that may start an identifier.
    pub identifier_start: Vec<char>,
    /// Longest first.
    pub operators: Vec<String>,
    pub case_folding: CaseFolding,
}

impl TokenizerRules {
    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved.contains(&word.to_ascii_uppercase())
    }

    fn add_operator(&mut self, symbol: &str) {
        if !self.operators.iter().any(|op| op == symbol) {
            self.operators.push(symbol.to_string());
            self.operators.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        }
    }
}

/// A binary operator spelling and how tightly it binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorRule {
    pub symbol: String,
    pub op: BinaryOperator,
    pub precedence: u8,
}

/// Parse-time rewrite of a function name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionAlias {
    /// Same arguments, canonical name.
    Rename(String),
    /// Canonical name with the first two arguments swapped
    /// (`CHARINDEX(needle, haystack)` → `STRPOS(haystack, needle)`).
    Swap(String),
}

/// What the parser does with a function it has no entry for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionPolicy {
    /// Accept and keep the call verbatim.
    PassThrough,
    /// Fail with a syntax error naming the function.
    Reject,
}

#[derive(Debug, Clone)]
pub struct ParserRules {
    pub operators: Vec<OperatorRule>,
    pub double_colon_cast: bool,
    pub top: bool,
    pub limit: bool,
    pub limit_comma: bool,
    pub offset: bool,
    pub fetch: bool,
    pub offset_requires_order: bool,
    pub offset_requires_limit: bool,
    pub require_from: bool,
    pub typed_literals: bool,
    pub boolean_literals: bool,
    pub ilike: bool,
    /// `MINUS` as a synonym of `EXCEPT`.
    pub minus: bool,
    pub if_functions: Vec<String>,
    pub current_time_keywords: Vec<(String, CurrentTimeKind)>,
    /// Zero-argument functions meaning the current time (`NOW()`).
    pub current_time_functions: Vec<(String, CurrentTimeKind)>,
    pub function_aliases: HashMap<String, FunctionAlias>,
    pub unknown_functions: FunctionPolicy,
    pub type_aliases: HashMap<String, TypeKind>,
    pub positional_params: bool,
    pub numbered_params: bool,
    pub named_params: bool,
}

impl ParserRules {
    pub fn binary_operator(&self, symbol: &str) -> Option<&OperatorRule> {
        self.operators
            .iter()
            .find(|rule| rule.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Preferred spelling of `op`, if the dialect has one.
    pub fn symbol_for(&self, op: BinaryOperator) -> Option<&OperatorRule> {
        self.operators.iter().find(|rule| rule.op == op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LimitStyle {
    /// `LIMIT c OFFSET o`
    LimitOffset,
    /// `OFFSET o LIMIT c`
    OffsetLimit,
    /// `TOP n`, with `OFFSET o ROWS FETCH NEXT c ROWS ONLY` when `fetch`.
    Top { fetch: bool },
    /// `OFFSET o ROWS FETCH FIRST c ROWS ONLY`
    FetchFirst,
    /// `LIMIT c`, no offset.
    LimitOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanStyle {
    Keyword,
    /// `1` / `0`
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcatStyle {
    /// The dialect's concatenation operator.
    Operator,
    /// `CONCAT(a, b, ...)`
    Function,
    /// `a + b`
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalLiteralStyle {
    /// `DATE '2024-01-31'`
    Keyword,
    /// `CAST('2024-01-31' AS DATE)`
    Cast,
    /// `DATE('2024-01-31')`
    Function,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStyle {
    /// `EXTRACT(YEAR FROM x)`
    Standard,
    /// `DATEPART(YEAR, x)`
    DatePart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalStyle {
    /// `INTERVAL '1' DAY`
    Quoted,
    /// `INTERVAL 1 DAY`
    Bare,
}

/// Render-time spelling of a canonical function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionRender {
    Rename(String),
    /// Rename and swap the first two arguments.
    Swap(String),
    /// `POSITION(needle IN haystack)` for `STRPOS(haystack, needle)`.
    Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamStyle {
    /// `$1`
    Dollar,
    /// `?`
    Question,
    /// `?` or `?1`
    QuestionNumbered,
    /// `@p1`
    AtName,
    /// `:1`
    Colon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoIncrementSyntax {
    /// `AUTO_INCREMENT`
    AutoIncrement,
    /// `AUTOINCREMENT`
    Autoincrement,
    /// `IDENTITY(1,1)`
    Identity,
    /// `GENERATED BY DEFAULT AS IDENTITY`
    GeneratedIdentity,
}

#[derive(Debug, Clone)]
pub struct GeneratorRules {
    pub identifier_quote: (char, char),
    pub limit_style: LimitStyle,
    /// Count rendered for an offset without a limit, where the dialect
    /// cannot write `OFFSET` alone.
    pub max_limit: Option<String>,
    pub boolean_style: BooleanStyle,
    pub concat_style: ConcatStyle,
    /// `None` renders conditionals as `CASE`.
    pub if_function: Option<String>,
    pub temporal_literals: TemporalLiteralStyle,
    pub current_date: Option<String>,
    pub current_time: Option<String>,
    pub current_timestamp: String,
    pub extract: Option<ExtractStyle>,
    pub interval: Option<IntervalStyle>,
    pub try_cast: Option<String>,
    pub except_keyword: String,
    /// Word after `CREATE OR` for views (`REPLACE`, `ALTER`).
    pub or_replace: String,
    pub function_names: HashMap<String, FunctionRender>,
    pub type_names: HashMap<TypeKind, String>,
    /// Types rendered under another type's name; their parameters are dropped.
    pub folded_types: HashSet<TypeKind>,
    /// `FROM t AS x` rather than `FROM t x`.
    pub table_alias_as: bool,
    /// Table named when a `SELECT` has no `FROM`.
    pub dummy_table: Option<String>,
    pub named_param_prefix: Option<char>,
}

/// A complete dialect descriptor.
#[derive(Debug, Clone)]
pub struct Dialect {
    pub name: String,
    pub tokenizer: TokenizerRules,
    pub parser: ParserRules,
    pub generator: GeneratorRules,
    pub unsupported: HashSet<Construct>,
    pub param_style: ParamStyle,
    pub auto_increment: Option<AutoIncrementSyntax>,
}

const BASE_RESERVED: &[&str] = &[
    "ALL", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CAST", "CREATE", "CROSS",
    "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "DEFAULT", "DELETE", "DESC",
    "DISTINCT", "DROP", "ELSE", "END", "EXCEPT", "EXISTS", "FALSE", "FOR", "FROM", "FULL",
    "GROUP", "HAVING", "IN", "INNER", "INSERT", "INTERSECT", "INTERVAL", "INTO", "IS", "JOIN",
    "LEFT", "LIKE", "NATURAL", "NOT", "NULL", "ON", "OR", "ORDER", "OUTER", "PRIMARY",
    "RIGHT", "SELECT", "SET", "TABLE", "THEN", "TRUE", "UNION", "UNIQUE", "UPDATE", "USING",
    "VALUES", "WHEN", "WHERE", "WITH",
];

const BASE_OPERATORS: &[(&str, BinaryOperator, u8)] = &[
    ("=", BinaryOperator::Eq, precedence::COMPARISON),
    ("<>", BinaryOperator::NotEq, precedence::COMPARISON),
    ("!=", BinaryOperator::NotEq, precedence::COMPARISON),
    ("<", BinaryOperator::Lt, precedence::COMPARISON),
    ("<=", BinaryOperator::LtEq, precedence::COMPARISON),
    (">", BinaryOperator::Gt, precedence::COMPARISON),
    (">=", BinaryOperator::GtEq, precedence::COMPARISON),
    ("+", BinaryOperator::Plus, precedence::ADDITIVE),
    ("-", BinaryOperator::Minus, precedence::ADDITIVE),
    ("*", BinaryOperator::Multiply, precedence::MULTIPLICATIVE),
    ("/", BinaryOperator::Divide, precedence::MULTIPLICATIVE),
    ("%", BinaryOperator::Modulo, precedence::MULTIPLICATIVE),
    ("||", BinaryOperator::Concat, precedence::CONCAT),
    ("&", BinaryOperator::BitwiseAnd, precedence::BIT_AND),
    ("|", BinaryOperator::BitwiseOr, precedence::BIT_OR),
    ("^", BinaryOperator::BitwiseXor, precedence::BIT_XOR),
    ("<<", BinaryOperator::ShiftLeft, precedence::SHIFT),
    (">>", BinaryOperator::ShiftRight, precedence::SHIFT),
];

const BASE_FUNCTION_ALIASES: &[(&str, &str)] = &[
    ("NVL", "COALESCE"),
    ("IFNULL", "COALESCE"),
    ("CHAR_LENGTH", "LENGTH"),
    ("CHARACTER_LENGTH", "LENGTH"),
    ("LEN", "LENGTH"),
    ("SUBSTR", "SUBSTRING"),
    ("RAND", "RANDOM"),
    ("CEILING", "CEIL"),
    ("POW", "POWER"),
    ("INSTR", "STRPOS"),
];

/// Functions the engine knows by name; their spelling is normalised to
/// upper case when parsed.
pub const KNOWN_FUNCTIONS: &[&str] = &[
    "ABS", "AVG", "CEIL", "COALESCE", "CONCAT", "COUNT", "DENSE_RANK", "EXP", "FIRST_VALUE",
    "FLOOR", "GREATEST", "LAG", "LAST_VALUE", "LEAD", "LEAST", "LEFT", "LENGTH", "LN", "LOG",
    "LOWER", "LTRIM", "MAX", "MIN", "MOD", "NTILE", "NULLIF", "POWER", "RANDOM", "RANK",
    "REPLACE", "REVERSE", "RIGHT", "ROUND", "ROW_NUMBER", "RTRIM", "SIGN", "SQRT", "STRPOS",
    "SUBSTRING", "SUM", "TRIM", "UPPER",
];

impl Dialect {
    /// Standard SQL with the common extensions switched off.
    pub fn base(name: &str) -> Self {
        let mut tokenizer = TokenizerRules {
            reserved: BASE_RESERVED.iter().map(|w| w.to_string()).collect(),
            identifier_quotes: vec![('"', '"')],
            string_quotes: vec!['\''],
            backslash_escapes: false,
            hash_comments: false,
            nested_comments: false,
            dollar_strings: false,
            national_strings: false,
            param_prefixes: vec!['?'],
            identifier_start: vec![],
            operators: vec![],
            case_folding: CaseFolding::Upper,
        };
        for (symbol, _, _) in BASE_OPERATORS {
            tokenizer.add_operator(symbol);
        }
        tokenizer.add_operator("~");

        let parser = ParserRules {
            operators: BASE_OPERATORS
                .iter()
                .map(|(symbol, op, precedence)| OperatorRule {
                    symbol: symbol.to_string(),
                    op: *op,
                    precedence: *precedence,
                })
                .collect(),
            double_colon_cast: false,
            top: false,
            limit: false,
            limit_comma: false,
            offset: false,
            fetch: false,
            offset_requires_order: false,
            offset_requires_limit: false,
            require_from: false,
            typed_literals: true,
            boolean_literals: true,
            ilike: false,
            minus: false,
            if_functions: vec![],
            current_time_keywords: vec![
                ("CURRENT_DATE".to_string(), CurrentTimeKind::Date),
                ("CURRENT_TIME".to_string(), CurrentTimeKind::Time),
                ("CURRENT_TIMESTAMP".to_string(), CurrentTimeKind::Timestamp),
            ],
            current_time_functions: vec![],
            function_aliases: BASE_FUNCTION_ALIASES
                .iter()
                .map(|(alias, canonical)| {
                    (alias.to_string(), FunctionAlias::Rename(canonical.to_string()))
                })
                .chain([
                    ("CHARINDEX".to_string(), FunctionAlias::Swap("STRPOS".to_string())),
                    ("LOCATE".to_string(), FunctionAlias::Swap("STRPOS".to_string())),
                ])
                .collect(),
            unknown_functions: FunctionPolicy::PassThrough,
            type_aliases: default_type_aliases(),
            positional_params: true,
            numbered_params: false,
            named_params: false,
        };

        let generator = GeneratorRules {
            identifier_quote: ('"', '"'),
            limit_style: LimitStyle::FetchFirst,
            max_limit: None,
            boolean_style: BooleanStyle::Keyword,
            concat_style: ConcatStyle::Operator,
            if_function: None,
            temporal_literals: TemporalLiteralStyle::Keyword,
            current_date: Some("CURRENT_DATE".to_string()),
            current_time: Some("CURRENT_TIME".to_string()),
            current_timestamp: "CURRENT_TIMESTAMP".to_string(),
            extract: Some(ExtractStyle::Standard),
            interval: Some(IntervalStyle::Quoted),
            try_cast: None,
            except_keyword: "EXCEPT".to_string(),
            or_replace: "REPLACE".to_string(),
            function_names: HashMap::new(),
            type_names: HashMap::new(),
            folded_types: HashSet::new(),
            table_alias_as: true,
            dummy_table: None,
            named_param_prefix: None,
        };

        Dialect {
            name: name.to_string(),
            tokenizer,
            parser,
            generator,
            unsupported: [
                Construct::Qualify,
                Construct::DistinctOn,
                Construct::Returning,
                Construct::TryCast,
            ]
            .into_iter()
            .collect(),
            param_style: ParamStyle::Question,
            auto_increment: Some(AutoIncrementSyntax::GeneratedIdentity),
        }
        .limit_style(LimitStyle::FetchFirst)
    }

    /// A copy of this descriptor under another name.
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn supports(&self, construct: Construct) -> bool {
        !self.unsupported.contains(&construct)
    }

    pub fn support(mut self, construct: Construct) -> Self {
        self.unsupported.remove(&construct);
        if construct == Construct::Qualify {
            self.tokenizer.reserved.insert("QUALIFY".to_string());
        }
        if construct == Construct::Returning {
            self.tokenizer.reserved.insert("RETURNING".to_string());
        }
        self
    }

    pub fn forbid(mut self, construct: Construct) -> Self {
        self.unsupported.insert(construct);
        self
    }

    pub fn reserve(mut self, words: &[&str]) -> Self {
        self.tokenizer
            .reserved
            .extend(words.iter().map(|w| w.to_ascii_uppercase()));
        self
    }

    pub fn unreserve(mut self, words: &[&str]) -> Self {
        for word in words {
            self.tokenizer.reserved.remove(&word.to_ascii_uppercase());
        }
        self
    }

    /// Add or replace the meaning of an operator symbol.
    pub fn operator(mut self, symbol: &str, op: BinaryOperator, precedence: u8) -> Self {
        self.parser.operators.retain(|rule| rule.symbol != symbol);
        self.parser.operators.push(OperatorRule {
            symbol: symbol.to_string(),
            op,
            precedence,
        });
        self.tokenizer.add_operator(symbol);
        self
    }

    /// Put `symbol` first among the spellings of its operator, so the
    /// generator prefers it.
    pub fn prefer_operator(mut self, symbol: &str) -> Self {
        if let Some(index) = self.parser.operators.iter().position(|r| r.symbol == symbol) {
            let rule = self.parser.operators.remove(index);
            self.parser.operators.insert(0, rule);
        }
        self
    }

    pub fn remove_operator(mut self, symbol: &str) -> Self {
        self.parser.operators.retain(|rule| rule.symbol != symbol);
        self
    }

    pub fn identifier_quote(mut self, open: char, close: char) -> Self {
        self.tokenizer.identifier_quotes.retain(|(o, _)| *o != open);
        self.tokenizer.identifier_quotes.insert(0, (open, close));
        self.generator.identifier_quote = (open, close);
        self
    }

    pub fn double_colon_cast(mut self) -> Self {
        self.parser.double_colon_cast = true;
        self.tokenizer.add_operator("::");
        self
    }

    pub fn ilike(mut self) -> Self {
        self.parser.ilike = true;
        self.tokenizer.reserved.insert("ILIKE".to_string());
        self
    }

    /// Set the row-limiting style and the clauses the parser accepts with it.
    pub fn limit_style(mut self, style: LimitStyle) -> Self {
        let p = &mut self.parser;
        p.top = false;
        p.fetch = false;
        p.offset_requires_order = false;
        match style {
            LimitStyle::LimitOffset | LimitStyle::OffsetLimit => {
                p.limit = true;
                p.offset = true;
            }
            LimitStyle::Top { fetch } => {
                p.top = true;
                p.limit = false;
                p.limit_comma = false;
                p.offset = fetch;
                p.fetch = fetch;
                p.offset_requires_order = fetch;
            }
            LimitStyle::FetchFirst => {
                p.limit = false;
                p.limit_comma = false;
                p.offset = true;
                p.fetch = true;
            }
            LimitStyle::LimitOnly => {
                p.limit = true;
                p.offset = false;
            }
        }
        let reserved = &mut self.tokenizer.reserved;
        for word in ["LIMIT", "OFFSET", "FETCH", "TOP"] {
            reserved.remove(word);
        }
        if p.limit {
            reserved.insert("LIMIT".to_string());
        }
        if p.offset {
            reserved.insert("OFFSET".to_string());
            self.unsupported.remove(&Construct::Offset);
        } else {
            self.unsupported.insert(Construct::Offset);
        }
        if p.fetch {
            reserved.insert("FETCH".to_string());
        }
        if p.top {
            reserved.insert("TOP".to_string());
        }
        self.generator.limit_style = style;
        self
    }

    /// Also accept `LIMIT` when the rendered style is something else.
    pub fn accept_limit(mut self) -> Self {
        self.parser.limit = true;
        self.tokenizer.reserved.insert("LIMIT".to_string());
        self
    }

    pub fn limit_comma(mut self) -> Self {
        self.parser.limit_comma = true;
        self
    }

    /// Offsets only appear after a limit; an offset on its own renders
    /// with `max` as the count.
    pub fn offset_requires_limit(mut self, max: &str) -> Self {
        self.parser.offset_requires_limit = true;
        self.generator.max_limit = Some(max.to_string());
        self
    }

    pub fn integer_booleans(mut self) -> Self {
        self.parser.boolean_literals = false;
        self.generator.boolean_style = BooleanStyle::Integer;
        for word in ["TRUE", "FALSE"] {
            self.tokenizer.reserved.remove(word);
        }
        self
    }

    pub fn temporal_literals(mut self, style: TemporalLiteralStyle) -> Self {
        self.parser.typed_literals = style == TemporalLiteralStyle::Keyword;
        self.generator.temporal_literals = style;
        self
    }

    pub fn if_function(mut self, name: &str) -> Self {
        let name = name.to_ascii_uppercase();
        if !self.parser.if_functions.contains(&name) {
            self.parser.if_functions.push(name.clone());
        }
        self.generator.if_function = Some(name);
        self
    }

    pub fn try_cast(mut self, name: &str) -> Self {
        self.generator.try_cast = Some(name.to_ascii_uppercase());
        self.unsupported.remove(&Construct::TryCast);
        self
    }

    /// Map `alias(...)` to a canonical function when parsing.
    pub fn alias_function(mut self, alias: &str, target: FunctionAlias) -> Self {
        self.parser
            .function_aliases
            .insert(alias.to_ascii_uppercase(), target);
        self
    }

    /// Render `canonical` as `rendered`, and parse `rendered` back.
    pub fn rename_function(mut self, canonical: &str, rendered: &str) -> Self {
        let canonical = canonical.to_ascii_uppercase();
        self.parser.function_aliases.insert(
            rendered.to_ascii_uppercase(),
            FunctionAlias::Rename(canonical.clone()),
        );
        self.generator
            .function_names
            .insert(canonical, FunctionRender::Rename(rendered.to_string()));
        self
    }

    /// Like [`Dialect::rename_function`] with the first two arguments swapped.
    pub fn swap_function(mut self, canonical: &str, rendered: &str) -> Self {
        let canonical = canonical.to_ascii_uppercase();
        self.parser.function_aliases.insert(
            rendered.to_ascii_uppercase(),
            FunctionAlias::Swap(canonical.clone()),
        );
        self.generator
            .function_names
            .insert(canonical, FunctionRender::Swap(rendered.to_string()));
        self
    }

    pub fn position_function(mut self) -> Self {
        self.generator
            .function_names
            .insert("STRPOS".to_string(), FunctionRender::Position);
        self
    }

    /// Render `kind` as `name`, and parse `name` back to it.
    pub fn rename_type(mut self, kind: TypeKind, name: &str) -> Self {
        self.parser
            .type_aliases
            .insert(name.to_ascii_uppercase(), kind);
        self.generator.type_names.insert(kind, name.to_string());
        self
    }

    /// Render `kind` as another type's name. Spellings of `kind` stop
    /// parsing to it, so the dialect never produces it itself.
    pub fn fold_type(mut self, kind: TypeKind, name: &str) -> Self {
        self.parser.type_aliases.retain(|_, k| *k != kind);
        self.generator.type_names.insert(kind, name.to_string());
        self.generator.folded_types.insert(kind);
        self
    }

    pub fn with_tokenizer(mut self, tune: impl FnOnce(&mut TokenizerRules)) -> Self {
        tune(&mut self.tokenizer);
        self
    }

    pub fn with_parser(mut self, tune: impl FnOnce(&mut ParserRules)) -> Self {
        tune(&mut self.parser);
        self
    }

    pub fn with_generator(mut self, tune: impl FnOnce(&mut GeneratorRules)) -> Self {
        tune(&mut self.generator);
        self
    }

    pub fn params(mut self, style: ParamStyle, prefixes: &[char], named_prefix: Option<char>) -> Self {
        self.param_style = style;
        self.tokenizer.param_prefixes = prefixes.to_vec();
        self.parser.positional_params = prefixes.contains(&'?');
        self.parser.numbered_params = matches!(
            style,
            ParamStyle::Dollar | ParamStyle::QuestionNumbered | ParamStyle::Colon
        );
        self.parser.named_params = named_prefix.is_some();
        self.generator.named_param_prefix = named_prefix;
        self
    }

    pub fn auto_increment(mut self, syntax: Option<AutoIncrementSyntax>) -> Self {
        self.auto_increment = syntax;
        match syntax {
            Some(_) => self.unsupported.remove(&Construct::AutoIncrement),
            None => self.unsupported.insert(Construct::AutoIncrement),
        };
        self
    }

    /// Current-time spellings: keywords accepted without parentheses,
    /// functions accepted with empty parentheses, and the renderings.
    pub fn current_time(
        mut self,
        keywords: &[(&str, CurrentTimeKind)],
        functions: &[(&str, CurrentTimeKind)],
        render: [Option<&str>; 3],
    ) -> Self {
        self.parser.current_time_keywords = keywords
            .iter()
            .map(|(w, k)| (w.to_string(), *k))
            .collect();
        self.parser.current_time_functions = functions
            .iter()
            .map(|(w, k)| (w.to_string(), *k))
            .collect();
        let [date, time, timestamp] = render;
        self.generator.current_date = date.map(str::to_string);
        self.generator.current_time = time.map(str::to_string);
        if let Some(ts) = timestamp {
            self.generator.current_timestamp = ts.to_string();
        }
        self
    }

    /// Name of the canonical function as this dialect spells it.
    pub fn function_render(&self, canonical: &str) -> Option<&FunctionRender> {
        self.generator.function_names.get(canonical)
    }

    pub fn type_name(&self, kind: TypeKind) -> String {
        self.generator
            .type_names
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.canonical_name().to_string())
    }
}

/// Every dialect that ships with the crate.
pub fn builtins() -> Vec<Dialect> {
    vec![
        ansi::ansi(),
        ansi::drill(),
        ansi::druid(),
        ansi::exasol(),
        ansi::tableau(),
        postgres::postgres(),
        postgres::redshift(),
        postgres::materialize(),
        postgres::risingwave(),
        mysql::mysql(),
        mysql::singlestore(),
        mysql::doris(),
        mysql::starrocks(),
        tsql::tsql(),
        tsql::fabric(),
        hive::hive(),
        hive::spark2(),
        hive::spark(),
        hive::databricks(),
        presto::presto(),
        presto::trino(),
        presto::athena(),
        presto::dune(),
        sqlite::sqlite(),
        duckdb::duckdb(),
        bigquery::bigquery(),
        snowflake::snowflake(),
        oracle::oracle(),
        clickhouse::clickhouse(),
        teradata::teradata(),
    ]
}
