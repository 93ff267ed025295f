//! SQL runtime values
//!
//! [`SqlValue`] is the representation a constant expression carries. Integers
//! hold 64-bit two's-complement bits; whether they are read as signed or
//! unsigned is decided by the declared [`FieldType`](crate::FieldType).

use crate::duration::SqlDuration;
use crate::json::json_to_string;
use crate::time::SqlTime;
use crate::type_system::LogicalType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlcast_diagnostics::{CastError, Result};
use std::fmt;

/// A value carrying a numeric and a textual view at once (ENUM, SET, BIT)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HybridValue {
    /// Ordinal, bitmask or bit pattern
    pub number: u64,
    /// Member name(s) or raw text
    pub text: String,
}

impl HybridValue {
    pub fn new(number: u64, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Runtime value of one of the seven evaluation classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// 64-bit integer bits
    Integer(i64),
    /// Double-precision float
    Real(f64),
    /// Fixed-point decimal
    Decimal(Decimal),
    /// Character or binary string
    String(String),
    /// DATE, DATETIME or TIMESTAMP
    Time(SqlTime),
    /// TIME
    Duration(SqlDuration),
    /// JSON document
    Json(serde_json::Value),
    /// ENUM/SET/BIT value with both views
    Hybrid(HybridValue),
    /// Raw binary literal such as `0x4142` or `b'101'`
    BinaryLiteral(Vec<u8>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Evaluation class the value is stored as; `None` for NULL
    pub fn logical_type(&self) -> Option<LogicalType> {
        match self {
            Self::Null => None,
            Self::Integer(_) => Some(LogicalType::Integer),
            Self::Real(_) => Some(LogicalType::Real),
            Self::Decimal(_) => Some(LogicalType::Decimal),
            Self::String(_) | Self::Hybrid(_) | Self::BinaryLiteral(_) => {
                Some(LogicalType::String)
            }
            Self::Time(_) => Some(LogicalType::DateTime),
            Self::Duration(_) => Some(LogicalType::Duration),
            Self::Json(_) => Some(LogicalType::Json),
        }
    }

    /// Short kind name used in accessor errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Integer(_) => "Integer",
            Self::Real(_) => "Real",
            Self::Decimal(_) => "Decimal",
            Self::String(_) => "String",
            Self::Time(_) => "DateTime",
            Self::Duration(_) => "Duration",
            Self::Json(_) => "Json",
            Self::Hybrid(_) => "Hybrid",
            Self::BinaryLiteral(_) => "BinaryLiteral",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<SqlTime> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<SqlDuration> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(j) => Some(j),
            _ => None,
        }
    }

    pub fn as_hybrid(&self) -> Option<&HybridValue> {
        match self {
            Self::Hybrid(h) => Some(h),
            _ => None,
        }
    }

    pub fn int(value: i64) -> Self {
        Self::Integer(value)
    }

    /// Unsigned integer stored as its two's-complement bits
    pub fn uint(value: u64) -> Self {
        Self::Integer(value as i64)
    }

    pub fn real(value: f64) -> Self {
        Self::Real(value)
    }

    pub fn decimal(value: Decimal) -> Self {
        Self::Decimal(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn time(value: SqlTime) -> Self {
        Self::Time(value)
    }

    pub fn duration(value: SqlDuration) -> Self {
        Self::Duration(value)
    }

    pub fn json(value: serde_json::Value) -> Self {
        Self::Json(value)
    }

    pub fn hybrid(number: u64, text: impl Into<String>) -> Self {
        Self::Hybrid(HybridValue::new(number, text))
    }

    pub fn binary_literal(bytes: impl Into<Vec<u8>>) -> Self {
        Self::BinaryLiteral(bytes.into())
    }
}

/// Big-endian unsigned view of a binary literal.
///
/// Leading zero bytes are ignored; more than eight significant bytes
/// overflow `BIGINT UNSIGNED`.
pub fn binary_literal_to_uint(bytes: &[u8]) -> Result<u64> {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let significant = &bytes[start..];
    if significant.len() > 8 {
        return Err(CastError::overflow(
            "BIGINT UNSIGNED",
            binary_literal_to_hex(bytes),
        ));
    }
    Ok(significant
        .iter()
        .fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

/// Textual view of a binary literal (lossy for non-UTF-8 bytes)
pub fn binary_literal_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn binary_literal_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for b in bytes {
        out.push_str(&format!("{b:02X}"));
    }
    out
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{}", crate::convert::format_float(*r)),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::Duration(d) => write!(f, "{d}"),
            Self::Json(j) => write!(f, "{}", json_to_string(j)),
            Self::Hybrid(h) => write!(f, "{}", h.text),
            Self::BinaryLiteral(bytes) => write!(f, "{}", binary_literal_to_hex(bytes)),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<SqlTime> for SqlValue {
    fn from(value: SqlTime) -> Self {
        Self::Time(value)
    }
}

impl From<SqlDuration> for SqlValue {
    fn from(value: SqlDuration) -> Self {
        Self::Duration(value)
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
