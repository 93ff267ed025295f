//! Stable compatibility opcodes for cast routines
//!
//! A [`CastSig`] names one concrete (source class, target class) routine. The
//! numeric code is `source_index * 10 + target_index` in the class order
//! Int, Real, String, Decimal, Time, Duration, Json. Codes travel with a cast
//! shipped to a remote executor, which must reproduce the routine's exact
//! rounding, overflow and truncation behavior. A code is never reused for
//! different semantics.

use serde::{Deserialize, Serialize};
use sqlcast_types::LogicalType;
use std::fmt;

/// Opcode of a concrete cast routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
#[repr(u16)]
pub enum CastSig {
    IntAsInt = 0,
    IntAsReal = 1,
    IntAsString = 2,
    IntAsDecimal = 3,
    IntAsTime = 4,
    IntAsDuration = 5,
    IntAsJson = 6,
    RealAsInt = 10,
    RealAsReal = 11,
    RealAsString = 12,
    RealAsDecimal = 13,
    RealAsTime = 14,
    RealAsDuration = 15,
    RealAsJson = 16,
    StringAsInt = 20,
    StringAsReal = 21,
    StringAsString = 22,
    StringAsDecimal = 23,
    StringAsTime = 24,
    StringAsDuration = 25,
    StringAsJson = 26,
    DecimalAsInt = 30,
    DecimalAsReal = 31,
    DecimalAsString = 32,
    DecimalAsDecimal = 33,
    DecimalAsTime = 34,
    DecimalAsDuration = 35,
    DecimalAsJson = 36,
    TimeAsInt = 40,
    TimeAsReal = 41,
    TimeAsString = 42,
    TimeAsDecimal = 43,
    TimeAsTime = 44,
    TimeAsDuration = 45,
    TimeAsJson = 46,
    DurationAsInt = 50,
    DurationAsReal = 51,
    DurationAsString = 52,
    DurationAsDecimal = 53,
    DurationAsTime = 54,
    DurationAsDuration = 55,
    DurationAsJson = 56,
    JsonAsInt = 60,
    JsonAsReal = 61,
    JsonAsString = 62,
    JsonAsDecimal = 63,
    JsonAsTime = 64,
    JsonAsDuration = 65,
    JsonAsJson = 66,
}

impl CastSig {
    /// Every opcode in code order
    pub const ALL: [CastSig; 49] = [
        CastSig::IntAsInt,
        CastSig::IntAsReal,
        CastSig::IntAsString,
        CastSig::IntAsDecimal,
        CastSig::IntAsTime,
        CastSig::IntAsDuration,
        CastSig::IntAsJson,
        CastSig::RealAsInt,
        CastSig::RealAsReal,
        CastSig::RealAsString,
        CastSig::RealAsDecimal,
        CastSig::RealAsTime,
        CastSig::RealAsDuration,
        CastSig::RealAsJson,
        CastSig::StringAsInt,
        CastSig::StringAsReal,
        CastSig::StringAsString,
        CastSig::StringAsDecimal,
        CastSig::StringAsTime,
        CastSig::StringAsDuration,
        CastSig::StringAsJson,
        CastSig::DecimalAsInt,
        CastSig::DecimalAsReal,
        CastSig::DecimalAsString,
        CastSig::DecimalAsDecimal,
        CastSig::DecimalAsTime,
        CastSig::DecimalAsDuration,
        CastSig::DecimalAsJson,
        CastSig::TimeAsInt,
        CastSig::TimeAsReal,
        CastSig::TimeAsString,
        CastSig::TimeAsDecimal,
        CastSig::TimeAsTime,
        CastSig::TimeAsDuration,
        CastSig::TimeAsJson,
        CastSig::DurationAsInt,
        CastSig::DurationAsReal,
        CastSig::DurationAsString,
        CastSig::DurationAsDecimal,
        CastSig::DurationAsTime,
        CastSig::DurationAsDuration,
        CastSig::DurationAsJson,
        CastSig::JsonAsInt,
        CastSig::JsonAsReal,
        CastSig::JsonAsString,
        CastSig::JsonAsDecimal,
        CastSig::JsonAsTime,
        CastSig::JsonAsDuration,
        CastSig::JsonAsJson,
    ];

    /// Stable numeric code
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Opcode for a numeric code, if one is assigned
    pub fn from_code(code: u16) -> Option<Self> {
        let (source, target) = (usize::from(code / 10), usize::from(code % 10));
        if source >= LogicalType::ALL.len() || target >= LogicalType::ALL.len() {
            return None;
        }
        Some(Self::ALL[source * LogicalType::ALL.len() + target])
    }

    /// Opcode of the routine converting `source` to `target`
    pub const fn of(source: LogicalType, target: LogicalType) -> Self {
        Self::ALL[source.index() * LogicalType::ALL.len() + target.index()]
    }

    /// Class the routine reads its argument as
    pub const fn source(self) -> LogicalType {
        LogicalType::ALL[(self.code() / 10) as usize]
    }

    /// Class the routine produces
    pub const fn target(self) -> LogicalType {
        LogicalType::ALL[(self.code() % 10) as usize]
    }

    /// Routine name such as `CastIntAsReal`
    pub fn name(self) -> String {
        format!("Cast{}As{}", self.source().short_name(), self.target().short_name())
    }
}

impl fmt::Display for CastSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<CastSig> for u16 {
    fn from(sig: CastSig) -> Self {
        sig.code()
    }
}

impl TryFrom<u16> for CastSig {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown cast opcode {code}"))
    }
}
