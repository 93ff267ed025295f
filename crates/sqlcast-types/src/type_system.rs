//! SQL type system
//!
//! This module defines:
//! - LogicalType, the seven evaluation classes casts dispatch on
//! - SqlTypeTag, the concrete declared type of a column or expression
//! - Width, precision and charset constants shared by the cast routines

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum fractional seconds precision
pub const MAX_FSP: u8 = 6;
/// Default fractional seconds precision
pub const DEFAULT_FSP: u8 = 0;
/// Display width of DOUBLE
pub const MAX_REAL_WIDTH: u32 = 23;
/// Display width of DATE
pub const MAX_DATE_WIDTH: u32 = 10;
/// Display width of DATETIME/TIMESTAMP without fractional part
pub const MAX_DATETIME_WIDTH_NO_FSP: u32 = 19;
/// Display width of TIME without fractional part
pub const MAX_DURATION_WIDTH_NO_FSP: u32 = 10;
/// Largest hour value of a TIME
pub const MAX_DURATION_HOURS: u32 = 838;
/// Display width used for JSON casts
pub const JSON_DISPLAY_WIDTH: u32 = 12_582_912;

pub const CHARSET_UTF8: &str = "utf8";
pub const CHARSET_UTF8MB4: &str = "utf8mb4";
pub const CHARSET_BIN: &str = "binary";
pub const COLLATION_UTF8: &str = "utf8_bin";
pub const COLLATION_UTF8MB4: &str = "utf8mb4_bin";
pub const COLLATION_BIN: &str = "binary";

/// Evaluation class of a value.
///
/// Declaration order is the compatibility order used by cast opcodes:
/// Int, Real, String, Decimal, Time, Duration, Json.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogicalType {
    Integer,
    Real,
    String,
    Decimal,
    DateTime,
    Duration,
    Json,
}

impl LogicalType {
    /// All classes in opcode order
    pub const ALL: [LogicalType; 7] = [
        LogicalType::Integer,
        LogicalType::Real,
        LogicalType::String,
        LogicalType::Decimal,
        LogicalType::DateTime,
        LogicalType::Duration,
        LogicalType::Json,
    ];

    /// Position in opcode order
    pub const fn index(self) -> usize {
        match self {
            LogicalType::Integer => 0,
            LogicalType::Real => 1,
            LogicalType::String => 2,
            LogicalType::Decimal => 3,
            LogicalType::DateTime => 4,
            LogicalType::Duration => 5,
            LogicalType::Json => 6,
        }
    }

    /// Short name used in routine names (`CastIntAsReal`)
    pub const fn short_name(self) -> &'static str {
        match self {
            LogicalType::Integer => "Int",
            LogicalType::Real => "Real",
            LogicalType::String => "String",
            LogicalType::Decimal => "Decimal",
            LogicalType::DateTime => "Time",
            LogicalType::Duration => "Duration",
            LogicalType::Json => "Json",
        }
    }

    /// Whether the class is a numeric class
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            LogicalType::Integer | LogicalType::Real | LogicalType::Decimal
        )
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogicalType::Integer => "Integer",
            LogicalType::Real => "Real",
            LogicalType::String => "String",
            LogicalType::Decimal => "Decimal",
            LogicalType::DateTime => "DateTime",
            LogicalType::Duration => "Duration",
            LogicalType::Json => "Json",
        };
        write!(f, "{name}")
    }
}

/// Concrete declared SQL type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlTypeTag {
    // === Integer Types ===
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Bit,
    Year,

    // === Approximate Numeric Types ===
    Float,
    Double,

    // === Exact Numeric Types ===
    Decimal,

    // === String Types ===
    Varchar,
    VarString,
    Char,
    Blob,
    Enum,
    Set,

    // === Temporal Types ===
    Date,
    DateTime,
    Timestamp,
    /// TIME, a signed time-of-day interval
    Time,

    // === Semi-structured ===
    Json,
}

impl SqlTypeTag {
    /// Evaluation class the tag is stored and evaluated as
    pub const fn eval_type(self) -> LogicalType {
        match self {
            SqlTypeTag::TinyInt
            | SqlTypeTag::SmallInt
            | SqlTypeTag::MediumInt
            | SqlTypeTag::Int
            | SqlTypeTag::BigInt
            | SqlTypeTag::Bit
            | SqlTypeTag::Year => LogicalType::Integer,
            SqlTypeTag::Float | SqlTypeTag::Double => LogicalType::Real,
            SqlTypeTag::Decimal => LogicalType::Decimal,
            SqlTypeTag::Varchar
            | SqlTypeTag::VarString
            | SqlTypeTag::Char
            | SqlTypeTag::Blob
            | SqlTypeTag::Enum
            | SqlTypeTag::Set => LogicalType::String,
            SqlTypeTag::Date | SqlTypeTag::DateTime | SqlTypeTag::Timestamp => {
                LogicalType::DateTime
            }
            SqlTypeTag::Time => LogicalType::Duration,
            SqlTypeTag::Json => LogicalType::Json,
        }
    }

    /// ENUM, SET and BIT values carry a numeric and a textual view at once
    pub const fn is_hybrid(self) -> bool {
        matches!(self, SqlTypeTag::Enum | SqlTypeTag::Set | SqlTypeTag::Bit)
    }

    /// DATE, DATETIME or TIMESTAMP
    pub const fn is_temporal(self) -> bool {
        matches!(
            self,
            SqlTypeTag::Date | SqlTypeTag::DateTime | SqlTypeTag::Timestamp
        )
    }

    /// Whether the tag belongs to the string family
    pub const fn is_string(self) -> bool {
        matches!(self.eval_type(), LogicalType::String)
    }

    /// SQL keyword for the tag
    pub const fn name(self) -> &'static str {
        match self {
            SqlTypeTag::TinyInt => "TINYINT",
            SqlTypeTag::SmallInt => "SMALLINT",
            SqlTypeTag::MediumInt => "MEDIUMINT",
            SqlTypeTag::Int => "INT",
            SqlTypeTag::BigInt => "BIGINT",
            SqlTypeTag::Bit => "BIT",
            SqlTypeTag::Year => "YEAR",
            SqlTypeTag::Float => "FLOAT",
            SqlTypeTag::Double => "DOUBLE",
            SqlTypeTag::Decimal => "DECIMAL",
            SqlTypeTag::Varchar => "VARCHAR",
            SqlTypeTag::VarString => "VAR_STRING",
            SqlTypeTag::Char => "CHAR",
            SqlTypeTag::Blob => "BLOB",
            SqlTypeTag::Enum => "ENUM",
            SqlTypeTag::Set => "SET",
            SqlTypeTag::Date => "DATE",
            SqlTypeTag::DateTime => "DATETIME",
            SqlTypeTag::Timestamp => "TIMESTAMP",
            SqlTypeTag::Time => "TIME",
            SqlTypeTag::Json => "JSON",
        }
    }

    /// Parse a SQL keyword, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = match name.to_ascii_uppercase().as_str() {
            "TINYINT" => SqlTypeTag::TinyInt,
            "SMALLINT" => SqlTypeTag::SmallInt,
            "MEDIUMINT" => SqlTypeTag::MediumInt,
            "INT" | "INTEGER" | "SIGNED" | "UNSIGNED" => SqlTypeTag::Int,
            "BIGINT" => SqlTypeTag::BigInt,
            "BIT" => SqlTypeTag::Bit,
            "YEAR" => SqlTypeTag::Year,
            "FLOAT" => SqlTypeTag::Float,
            "DOUBLE" | "REAL" => SqlTypeTag::Double,
            "DECIMAL" | "NUMERIC" => SqlTypeTag::Decimal,
            "VARCHAR" => SqlTypeTag::Varchar,
            "VAR_STRING" => SqlTypeTag::VarString,
            "CHAR" | "STRING" => SqlTypeTag::Char,
            "BLOB" | "BINARY" => SqlTypeTag::Blob,
            "ENUM" => SqlTypeTag::Enum,
            "SET" => SqlTypeTag::Set,
            "DATE" => SqlTypeTag::Date,
            "DATETIME" => SqlTypeTag::DateTime,
            "TIMESTAMP" => SqlTypeTag::Timestamp,
            "TIME" => SqlTypeTag::Time,
            "JSON" => SqlTypeTag::Json,
            _ => return None,
        };
        Some(tag)
    }
}

impl fmt::Display for SqlTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
