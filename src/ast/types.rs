//! Canonical data types and the default spelling table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A column or cast target type.
///
/// Parsers map every spelling they accept onto one of these; generators map
/// back through the target dialect's type-name table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Real,
    Double,
    Decimal {
        precision: Option<u64>,
        scale: Option<u64>,
    },
    Char(Option<u64>),
    Varchar(Option<u64>),
    Text,
    Binary(Option<u64>),
    Varbinary(Option<u64>),
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Json,
    Uuid,
    /// A type the engine has no mapping for, kept as written.
    Custom(String),
}

/// Parameterless discriminant of [`DataType`], used as a table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Real,
    Double,
    Decimal,
    Char,
    Varchar,
    Text,
    Binary,
    Varbinary,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Json,
    Uuid,
}

impl TypeKind {
    /// The spelling used when a dialect has no override.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            TypeKind::Boolean => "BOOLEAN",
            TypeKind::TinyInt => "TINYINT",
            TypeKind::SmallInt => "SMALLINT",
            TypeKind::Int => "INT",
            TypeKind::BigInt => "BIGINT",
            TypeKind::Real => "REAL",
            TypeKind::Double => "DOUBLE",
            TypeKind::Decimal => "DECIMAL",
            TypeKind::Char => "CHAR",
            TypeKind::Varchar => "VARCHAR",
            TypeKind::Text => "TEXT",
            TypeKind::Binary => "BINARY",
            TypeKind::Varbinary => "VARBINARY",
            TypeKind::Date => "DATE",
            TypeKind::Time => "TIME",
            TypeKind::Timestamp => "TIMESTAMP",
            TypeKind::TimestampTz => "TIMESTAMPTZ",
            TypeKind::Json => "JSON",
            TypeKind::Uuid => "UUID",
        }
    }

    /// Build the type from parsed arguments. Kinds without parameters
    /// ignore them (`INT(11)` is just `INT`).
    pub fn with_params(self, params: &[u64]) -> DataType {
        let first = params.first().copied();
        match self {
            TypeKind::Boolean => DataType::Boolean,
            TypeKind::TinyInt => DataType::TinyInt,
            TypeKind::SmallInt => DataType::SmallInt,
            TypeKind::Int => DataType::Int,
            TypeKind::BigInt => DataType::BigInt,
            TypeKind::Real => DataType::Real,
            TypeKind::Double => DataType::Double,
            TypeKind::Decimal => DataType::Decimal {
                precision: first,
                scale: params.get(1).copied(),
            },
            TypeKind::Char => DataType::Char(first),
            TypeKind::Varchar => DataType::Varchar(first),
            TypeKind::Text => DataType::Text,
            TypeKind::Binary => DataType::Binary(first),
            TypeKind::Varbinary => DataType::Varbinary(first),
            TypeKind::Date => DataType::Date,
            TypeKind::Time => DataType::Time,
            TypeKind::Timestamp => DataType::Timestamp,
            TypeKind::TimestampTz => DataType::TimestampTz,
            TypeKind::Json => DataType::Json,
            TypeKind::Uuid => DataType::Uuid,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "boolean" => TypeKind::Boolean,
            "tinyint" => TypeKind::TinyInt,
            "smallint" => TypeKind::SmallInt,
            "int" => TypeKind::Int,
            "bigint" => TypeKind::BigInt,
            "real" => TypeKind::Real,
            "double" => TypeKind::Double,
            "decimal" => TypeKind::Decimal,
            "char" => TypeKind::Char,
            "varchar" => TypeKind::Varchar,
            "text" => TypeKind::Text,
            "binary" => TypeKind::Binary,
            "varbinary" => TypeKind::Varbinary,
            "date" => TypeKind::Date,
            "time" => TypeKind::Time,
            "timestamp" => TypeKind::Timestamp,
            "timestamptz" | "timestamp_tz" => TypeKind::TimestampTz,
            "json" => TypeKind::Json,
            "uuid" => TypeKind::Uuid,
            _ => return None,
        };
        Some(kind)
    }
}

impl DataType {
    pub fn kind(&self) -> Option<TypeKind> {
        let kind = match self {
            DataType::Boolean => TypeKind::Boolean,
            DataType::TinyInt => TypeKind::TinyInt,
            DataType::SmallInt => TypeKind::SmallInt,
            DataType::Int => TypeKind::Int,
            DataType::BigInt => TypeKind::BigInt,
            DataType::Real => TypeKind::Real,
            DataType::Double => TypeKind::Double,
            DataType::Decimal { .. } => TypeKind::Decimal,
            DataType::Char(_) => TypeKind::Char,
            DataType::Varchar(_) => TypeKind::Varchar,
            DataType::Text => TypeKind::Text,
            DataType::Binary(_) => TypeKind::Binary,
            DataType::Varbinary(_) => TypeKind::Varbinary,
            DataType::Date => TypeKind::Date,
            DataType::Time => TypeKind::Time,
            DataType::Timestamp => TypeKind::Timestamp,
            DataType::TimestampTz => TypeKind::TimestampTz,
            DataType::Json => TypeKind::Json,
            DataType::Uuid => TypeKind::Uuid,
            DataType::Custom(_) => return None,
        };
        Some(kind)
    }

    /// Length, precision and scale arguments, in source order.
    pub fn params(&self) -> Vec<u64> {
        match self {
            DataType::Decimal { precision, scale } => {
                precision.iter().chain(scale.iter()).copied().collect()
            }
            DataType::Char(n)
            | DataType::Varchar(n)
            | DataType::Binary(n)
            | DataType::Varbinary(n) => n.iter().copied().collect(),
            _ => vec![],
        }
    }
}

/// Spellings every dialect accepts unless it overrides them. Keys are
/// upper-case and may span several words.
pub fn default_type_aliases() -> HashMap<String, TypeKind> {
    let entries: &[(&str, TypeKind)] = &[
        ("BOOLEAN", TypeKind::Boolean),
        ("BOOL", TypeKind::Boolean),
        ("TINYINT", TypeKind::TinyInt),
        ("SMALLINT", TypeKind::SmallInt),
        ("INT2", TypeKind::SmallInt),
        ("INT", TypeKind::Int),
        ("INTEGER", TypeKind::Int),
        ("INT4", TypeKind::Int),
        ("MEDIUMINT", TypeKind::Int),
        ("BIGINT", TypeKind::BigInt),
        ("INT8", TypeKind::BigInt),
        ("REAL", TypeKind::Real),
        ("FLOAT4", TypeKind::Real),
        ("DOUBLE", TypeKind::Double),
        ("DOUBLE PRECISION", TypeKind::Double),
        ("FLOAT8", TypeKind::Double),
        ("FLOAT", TypeKind::Double),
        ("DECIMAL", TypeKind::Decimal),
        ("NUMERIC", TypeKind::Decimal),
        ("CHAR", TypeKind::Char),
        ("CHARACTER", TypeKind::Char),
        ("VARCHAR", TypeKind::Varchar),
        ("CHARACTER VARYING", TypeKind::Varchar),
        ("NVARCHAR", TypeKind::Varchar),
        ("TEXT", TypeKind::Text),
        ("BINARY", TypeKind::Binary),
        ("VARBINARY", TypeKind::Varbinary),
        ("BLOB", TypeKind::Varbinary),
        ("BYTEA", TypeKind::Varbinary),
        ("DATE", TypeKind::Date),
        ("TIME", TypeKind::Time),
        ("TIME WITHOUT TIME ZONE", TypeKind::Time),
        ("TIMESTAMP", TypeKind::Timestamp),
        ("TIMESTAMP WITHOUT TIME ZONE", TypeKind::Timestamp),
        ("DATETIME", TypeKind::Timestamp),
        ("TIMESTAMPTZ", TypeKind::TimestampTz),
        ("TIMESTAMP WITH TIME ZONE", TypeKind::TimestampTz),
        ("JSON", TypeKind::Json),
        ("UUID", TypeKind::Uuid),
    ];
    entries
        .iter()
        .map(|(name, kind)| (name.to_string(), *kind))
        .collect()
}
