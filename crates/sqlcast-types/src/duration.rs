//! TIME values: signed time-of-day intervals bounded by ±838:59:59

use crate::time::{SqlTime, parse_frac};
use crate::type_system::{MAX_DURATION_HOURS, MAX_FSP, SqlTypeTag};
use chrono::{NaiveDate, TimeDelta};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlcast_diagnostics::{CastError, Result};
use std::fmt;
use std::sync::LazyLock;

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Largest magnitude of a TIME value, in microseconds
pub const MAX_DURATION_MICROS: i64 =
    (MAX_DURATION_HOURS as i64 * 3600 + 59 * 60 + 59) * MICROS_PER_SECOND;

/// Largest `[-]HHMMSS` number accepted as a TIME
const MAX_DURATION_NUMBER: i64 = 8_385_959;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));
static HOUR_MINUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{1,2})$").expect("valid regex"));
static HOUR_MINUTE_SECOND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})$").expect("valid regex"));

/// A TIME value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SqlDuration {
    micros: i64,
    fsp: u8,
}

/// Result of a lenient TIME conversion: the best-effort value plus the
/// condition the caller must report, if any
#[derive(Debug, Clone, PartialEq)]
pub struct DurationParse {
    pub value: SqlDuration,
    pub warning: Option<CastError>,
}

impl DurationParse {
    fn ok(value: SqlDuration) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    fn truncated(value: SqlDuration, text: &str) -> Self {
        Self {
            value,
            warning: Some(CastError::truncated_wrong_value("time", text)),
        }
    }
}

impl SqlDuration {
    pub const ZERO: SqlDuration = SqlDuration { micros: 0, fsp: 0 };

    pub fn new(micros: i64, fsp: u8) -> Self {
        Self {
            micros,
            fsp: fsp.min(MAX_FSP),
        }
    }

    pub fn micros(&self) -> i64 {
        self.micros
    }

    pub fn fsp(&self) -> u8 {
        self.fsp
    }

    pub fn is_zero(&self) -> bool {
        self.micros == 0
    }

    pub fn is_negative(&self) -> bool {
        self.micros < 0
    }

    pub fn with_fsp(mut self, fsp: u8) -> Self {
        self.fsp = fsp.min(MAX_FSP);
        self
    }

    fn max(negative: bool, fsp: u8) -> Self {
        let micros = if negative {
            -MAX_DURATION_MICROS
        } else {
            MAX_DURATION_MICROS
        };
        Self::new(micros, fsp)
    }

    /// Parse `[-][D ]HH:MM:SS[.frac]`, `HH:MM`, `[H]HHMMSS[.frac]`, `MMSS` or
    /// `SS`. Digit strings longer than seven are read as a datetime and its
    /// time of day is kept.
    ///
    /// Malformed text yields zero and a truncation; out-of-range values are
    /// clamped to ±838:59:59 with a truncation.
    pub fn parse(text: &str, fsp: u8) -> DurationParse {
        let fsp = fsp.min(MAX_FSP);
        let zero = Self::ZERO.with_fsp(fsp);
        let s = text.trim();
        if s.is_empty() {
            return DurationParse::ok(zero);
        }
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (day, s) = match s.split_once(' ') {
            Some((head, tail)) if DIGITS.is_match(head) => (Some(head.parse().unwrap_or(i64::MAX)), tail),
            // not a day count: only a full datetime is acceptable
            Some(_) => return Self::parse_datetime_time(s, text, fsp),
            None => (None, s),
        };

        let (integral, frac) = s.split_once('.').unwrap_or((s, ""));
        let Some((frac_micros, carry)) = parse_frac(frac, fsp) else {
            return DurationParse::truncated(zero, text);
        };

        let (hour, minute, mut second) = if let Some(caps) = HOUR_MINUTE_SECOND.captures(integral) {
            (capture(&caps, 1), capture(&caps, 2), capture(&caps, 3))
        } else if let Some(caps) = HOUR_MINUTE.captures(integral) {
            (capture(&caps, 1), capture(&caps, 2), 0)
        } else if DIGITS.is_match(integral) {
            if day.is_some() {
                (integral.parse().unwrap_or(i64::MAX), 0, 0)
            } else {
                match split_clock_digits(integral) {
                    Some(hms) => hms,
                    None => return Self::parse_datetime_time(s, text, fsp),
                }
            }
        } else {
            return DurationParse::truncated(zero, text);
        };

        let frac_micros = if carry {
            second += 1;
            0
        } else {
            i64::from(frac_micros)
        };
        if minute >= 60 || second > 60 || (!carry && second == 60) {
            return DurationParse::truncated(zero, text);
        }

        let seconds = day
            .unwrap_or(0)
            .checked_mul(24)
            .and_then(|h| h.checked_add(hour))
            .and_then(|h| h.checked_mul(3600))
            .and_then(|s| s.checked_add(minute * 60 + second))
            .and_then(|s| s.checked_mul(MICROS_PER_SECOND))
            .and_then(|m| m.checked_add(frac_micros));
        let Some(micros) = seconds.filter(|m| *m <= MAX_DURATION_MICROS) else {
            return DurationParse::truncated(Self::max(negative, fsp), text);
        };
        let micros = if negative { -micros } else { micros };
        DurationParse::ok(Self::new(micros, fsp))
    }

    fn parse_datetime_time(s: &str, text: &str, fsp: u8) -> DurationParse {
        match SqlTime::parse(s, SqlTypeTag::DateTime, fsp) {
            Ok(time) => DurationParse::ok(time.to_duration().round_frac(fsp)),
            Err(_) => DurationParse::truncated(Self::ZERO.with_fsp(fsp), text),
        }
    }

    /// Convert the `[-]HHMMSS` numeric encoding.
    ///
    /// Numbers of at least 10^10 are read as datetimes and their time of day
    /// kept. Values past ±838:59:59 are clamped and reported as overflow.
    pub fn from_number(num: i64, fsp: u8) -> Result<DurationParse> {
        let fsp = fsp.min(MAX_FSP);
        if num > MAX_DURATION_NUMBER {
            if num >= 10_000_000_000 {
                if let Ok(time) = SqlTime::parse_from_num(num, SqlTypeTag::DateTime, fsp) {
                    return Ok(DurationParse::ok(time.to_duration().with_fsp(fsp)));
                }
            }
            return Ok(DurationParse {
                value: Self::max(false, fsp),
                warning: Some(CastError::overflow("Duration", num)),
            });
        }
        if num < -MAX_DURATION_NUMBER {
            return Ok(DurationParse {
                value: Self::max(true, fsp),
                warning: Some(CastError::overflow("Duration", num)),
            });
        }

        let abs = num.abs();
        let (hour, minute, second) = (abs / 10_000, abs / 100 % 100, abs % 100);
        if hour > i64::from(MAX_DURATION_HOURS) || minute >= 60 || second >= 60 {
            return Err(CastError::invalid_time_format(num));
        }
        let micros = (hour * 3600 + minute * 60 + second) * MICROS_PER_SECOND;
        let micros = if num < 0 { -micros } else { micros };
        Ok(DurationParse::ok(Self::new(micros, fsp)))
    }

    /// Round to `fsp` fractional digits, half away from zero
    pub fn round_frac(self, fsp: u8) -> Self {
        let fsp = fsp.min(MAX_FSP);
        let unit = 10i64.pow(u32::from(MAX_FSP - fsp));
        let abs = (self.micros.abs() + unit / 2) / unit * unit;
        let abs = abs.min(MAX_DURATION_MICROS);
        let micros = if self.micros < 0 { -abs } else { abs };
        Self::new(micros, fsp)
    }

    /// Numeric encoding `[-]HHMMSS[.f]`
    pub fn to_number(&self) -> Decimal {
        let (hours, minutes, seconds, micros) = self.components();
        let hms = i128::from(hours) * 10_000 + i128::from(minutes) * 100 + i128::from(seconds);
        let fsp = u32::from(self.fsp);
        let frac = i128::from(micros / 10u32.pow(u32::from(MAX_FSP) - fsp));
        let value = hms * 10i128.pow(fsp) + frac;
        let value = if self.is_negative() { -value } else { value };
        Decimal::from_i128_with_scale(value, fsp)
    }

    /// Anchor on `date` and retag as `tp`
    pub fn to_time(&self, date: NaiveDate, tp: SqlTypeTag) -> Result<SqlTime> {
        let datetime = date
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| midnight.checked_add_signed(TimeDelta::microseconds(self.micros)))
            .ok_or_else(|| CastError::incorrect_datetime(self))?;
        SqlTime::from_naive(datetime, SqlTypeTag::DateTime, self.fsp)?.convert(tp)
    }

    fn components(&self) -> (u64, u64, u64, u32) {
        let abs = self.micros.unsigned_abs();
        let total_seconds = abs / MICROS_PER_SECOND as u64;
        let micros = (abs % MICROS_PER_SECOND as u64) as u32;
        (
            total_seconds / 3600,
            total_seconds / 60 % 60,
            total_seconds % 60,
            micros,
        )
    }
}

impl Default for SqlDuration {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for SqlDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes, seconds, micros) = self.components();
        if self.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")?;
        if self.fsp > 0 {
            let width = usize::from(self.fsp);
            let frac = micros / 10u32.pow(u32::from(MAX_FSP - self.fsp));
            write!(f, ".{frac:0width$}")?;
        }
        Ok(())
    }
}

fn capture(caps: &regex::Captures<'_>, index: usize) -> i64 {
    // digit runs too long for i64 saturate so the range check clamps them
    caps.get(index)
        .map_or(0, |m| m.as_str().parse().unwrap_or(i64::MAX))
}

/// `HHHMMSS`, `HHMMSS`, `HMMSS`, `MMSS`, `MSS`, `SS`, `S`
fn split_clock_digits(digits: &str) -> Option<(i64, i64, i64)> {
    let value: i64 = digits.parse().ok()?;
    match digits.len() {
        5..=7 => Some((value / 10_000, value / 100 % 100, value % 100)),
        3 | 4 => Some((0, value / 100, value % 100)),
        1 | 2 => Some((0, 0, value)),
        _ => None,
    }
}
