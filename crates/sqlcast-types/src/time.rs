//! DATE, DATETIME and TIMESTAMP values
//!
//! Values are kept as calendar components rather than an instant so that
//! zero dates (`0000-00-00`) and zero month/day parts round-trip unchanged.
//! Time zones are never applied.

use crate::duration::SqlDuration;
use crate::type_system::{MAX_FSP, SqlTypeTag};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlcast_diagnostics::{CastError, Result};
use std::fmt;

/// Smallest TIMESTAMP, as `YYYYMMDDhhmmss`
const TIMESTAMP_MIN: u64 = 19_700_101_000_001;
/// Largest TIMESTAMP, as `YYYYMMDDhhmmss`
const TIMESTAMP_MAX: u64 = 20_380_119_031_407;

/// A DATE, DATETIME or TIMESTAMP value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SqlTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    microsecond: u32,
    tp: SqlTypeTag,
    fsp: u8,
}

impl SqlTime {
    /// The zero value `0000-00-00 00:00:00`
    pub const fn zero(tp: SqlTypeTag) -> Self {
        Self {
            year: 0,
            month: 0,
            day: 0,
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
            tp,
            fsp: 0,
        }
    }

    /// A DATE value
    pub fn from_date(date: NaiveDate) -> Result<Self> {
        let datetime = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| CastError::incorrect_datetime(date))?;
        Self::from_naive(datetime, SqlTypeTag::Date, 0)
    }

    /// Build from a chrono datetime; fails outside years 0..=9999
    pub fn from_naive(datetime: NaiveDateTime, tp: SqlTypeTag, fsp: u8) -> Result<Self> {
        let year = u16::try_from(datetime.year())
            .ok()
            .filter(|year| *year <= 9999)
            .ok_or_else(|| CastError::incorrect_datetime(datetime))?;
        let time = Self {
            year,
            month: datetime.month() as u8,
            day: datetime.day() as u8,
            hour: datetime.hour() as u8,
            minute: datetime.minute() as u8,
            second: datetime.second() as u8,
            microsecond: (datetime.nanosecond() / 1_000).min(999_999),
            tp,
            fsp: fsp.min(MAX_FSP),
        };
        if time.is_valid() {
            Ok(time)
        } else {
            Err(CastError::incorrect_datetime(time))
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn microsecond(&self) -> u32 {
        self.microsecond
    }

    pub fn tp(&self) -> SqlTypeTag {
        self.tp
    }

    pub fn fsp(&self) -> u8 {
        self.fsp
    }

    /// Every component is zero
    pub fn is_zero(&self) -> bool {
        self.year == 0
            && self.month == 0
            && self.day == 0
            && self.hour == 0
            && self.minute == 0
            && self.second == 0
            && self.microsecond == 0
    }

    /// Whether any time-of-day component is set
    pub fn has_time_of_day(&self) -> bool {
        self.hour != 0 || self.minute != 0 || self.second != 0 || self.microsecond != 0
    }

    /// Set the display precision without rounding
    pub fn with_fsp(mut self, fsp: u8) -> Self {
        self.fsp = fsp.min(MAX_FSP);
        self
    }

    /// Drop the time of day and retag as DATE
    pub fn into_date(mut self) -> Self {
        self.hour = 0;
        self.minute = 0;
        self.second = 0;
        self.microsecond = 0;
        self.tp = SqlTypeTag::Date;
        self
    }

    /// Parse text such as `2023-06-15 12:30:00.5`, `20230615`, `230615123000`.
    ///
    /// Fractional seconds are rounded to `fsp` digits; a rounding carry
    /// propagates into the seconds.
    pub fn parse(text: &str, tp: SqlTypeTag, fsp: u8) -> Result<Self> {
        let fsp = fsp.min(MAX_FSP);
        let invalid = || CastError::incorrect_datetime(text);
        let trimmed = text.trim();
        let (body, frac) = split_frac(trimmed);

        let parts = match split_date_parts(body) {
            Some(seps) if is_supported_layout(&seps) => parse_parts(&seps, frac, fsp),
            // `2023.06.15`: the last dot separates the day, not a fraction
            _ => match split_date_parts(trimmed) {
                Some(seps) if (3..=6).contains(&seps.len()) => parse_parts(&seps, "", fsp),
                _ => None,
            },
        };
        parts
            .and_then(|parts| parts.into_time(tp, fsp))
            .ok_or_else(invalid)
    }

    /// Parse the numeric encodings `YYMMDD`, `YYYYMMDD`, `YYMMDDhhmmss` and
    /// `YYYYMMDDhhmmss`; `0` is the zero date.
    pub fn parse_from_num(num: i64, tp: SqlTypeTag, fsp: u8) -> Result<Self> {
        let fsp = fsp.min(MAX_FSP);
        if num == 0 {
            return Ok(Self::zero(tp).with_fsp(fsp));
        }
        let invalid = || CastError::invalid_time_format(num);
        let encoded = match num {
            n if n >= 10_000_101_000_000 => n,
            n if n < 101 => return Err(invalid()),
            // YYMMDD, 2000-2069
            n if n <= 69_1231 => (n + 20_000_000) * 1_000_000,
            n if n < 70_0101 => return Err(invalid()),
            // YYMMDD, 1970-1999
            n if n <= 99_1231 => (n + 19_000_000) * 1_000_000,
            n if n < 1000_0101 => return Err(invalid()),
            // YYYYMMDD
            n if n <= 9999_1231 => n * 1_000_000,
            n if n < 1_01_000_000 => return Err(invalid()),
            // YYMMDDhhmmss, 2000-2069
            n if n <= 69_1231_235_959 => n + 20_000_000_000_000,
            n if n < 70_0101_000_000 => return Err(invalid()),
            // YYMMDDhhmmss, 1970-1999
            n if n <= 99_1231_235_959 => n + 19_000_000_000_000,
            n => n,
        };

        let ymd = encoded / 1_000_000;
        let hms = encoded % 1_000_000;
        let parts = Parts {
            year: u32::try_from(ymd / 10_000).map_err(|_| invalid())?,
            month: (ymd / 100 % 100) as u32,
            day: (ymd % 100) as u32,
            hour: (hms / 10_000) as u32,
            minute: (hms / 100 % 100) as u32,
            second: (hms % 100) as u32,
            ..Parts::default()
        };
        parts
            .into_time(tp, fsp)
            .ok_or_else(|| CastError::incorrect_datetime(num))
    }

    /// Retag as another temporal type, validating the new type's range
    pub fn convert(mut self, tp: SqlTypeTag) -> Result<Self> {
        if self.tp == tp || self.is_zero() {
            self.tp = tp;
            return Ok(self);
        }
        self.tp = tp;
        if self.is_valid() {
            Ok(self)
        } else {
            Err(CastError::incorrect_datetime(self))
        }
    }

    /// Round fractional seconds to `fsp` digits, half away from zero
    pub fn round_frac(mut self, fsp: u8) -> Result<Self> {
        let fsp = fsp.min(MAX_FSP);
        if self.tp == SqlTypeTag::Date || self.is_zero() {
            self.fsp = fsp;
            return Ok(self);
        }
        let unit = 10u32.pow(u32::from(MAX_FSP - fsp));
        let rounded = (self.microsecond + unit / 2) / unit * unit;
        if rounded >= 1_000_000 {
            self.microsecond = 0;
            self = self.carry_second()?;
        } else {
            self.microsecond = rounded;
        }
        self.fsp = fsp;
        Ok(self)
    }

    /// Numeric encoding: `YYYYMMDD` for DATE, `YYYYMMDDhhmmss[.f]` otherwise
    pub fn to_number(&self) -> Decimal {
        if self.is_zero() {
            return Decimal::ZERO;
        }
        let ymd = i128::from(self.year) * 10_000 + i128::from(self.month) * 100 + i128::from(self.day);
        if self.tp == SqlTypeTag::Date {
            return Decimal::from_i128_with_scale(ymd, 0);
        }
        let hms = i128::from(self.hour) * 10_000 + i128::from(self.minute) * 100 + i128::from(self.second);
        let whole = ymd * 1_000_000 + hms;
        let fsp = u32::from(self.fsp);
        let frac = i128::from(self.microsecond / 10u32.pow(u32::from(MAX_FSP) - fsp));
        Decimal::from_i128_with_scale(whole * 10i128.pow(fsp) + frac, fsp)
    }

    /// Time-of-day part as a duration with the same precision
    pub fn to_duration(&self) -> SqlDuration {
        let seconds = i64::from(self.hour) * 3600 + i64::from(self.minute) * 60 + i64::from(self.second);
        SqlDuration::new(seconds * 1_000_000 + i64::from(self.microsecond), self.fsp)
    }

    /// Calendar form, `None` for dates with zero parts
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(i32::from(self.year), u32::from(self.month), u32::from(self.day))?
            .and_hms_micro_opt(
                u32::from(self.hour),
                u32::from(self.minute),
                u32::from(self.second),
                self.microsecond,
            )
    }

    /// Advance by one second field by field, so zero month and day parts
    /// survive unless the carry has to cross midnight
    fn carry_second(self) -> Result<Self> {
        let mut next = self;
        next.second += 1;
        if next.second == 60 {
            next.second = 0;
            next.minute += 1;
        }
        if next.minute == 60 {
            next.minute = 0;
            next.hour += 1;
        }
        if next.hour == 24 {
            if next.month == 0 || next.day == 0 {
                return Err(CastError::incorrect_datetime(self));
            }
            next.hour = 0;
            next.day += 1;
            if next.day > days_in_month(next.year, next.month) {
                next.day = 1;
                next.month += 1;
            }
            if next.month > 12 {
                next.month = 1;
                next.year += 1;
            }
        }
        if next.is_valid() {
            Ok(next)
        } else {
            Err(CastError::incorrect_datetime(self))
        }
    }

    fn datetime_number(&self) -> u64 {
        u64::from(self.year) * 10_000_000_000
            + u64::from(self.month) * 100_000_000
            + u64::from(self.day) * 1_000_000
            + u64::from(self.hour) * 10_000
            + u64::from(self.minute) * 100
            + u64::from(self.second)
    }

    fn is_valid(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        if self.year > 9999
            || self.month > 12
            || self.hour > 23
            || self.minute > 59
            || self.second > 59
            || self.microsecond > 999_999
        {
            return false;
        }
        let max_day = if self.month == 0 {
            31
        } else {
            days_in_month(self.year, self.month)
        };
        if self.day > max_day {
            return false;
        }
        if self.tp == SqlTypeTag::Timestamp {
            let n = self.datetime_number();
            return (TIMESTAMP_MIN..=TIMESTAMP_MAX).contains(&n);
        }
        true
    }
}

impl fmt::Display for SqlTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if self.tp == SqlTypeTag::Date {
            return Ok(());
        }
        write!(f, " {:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.fsp > 0 {
            let width = usize::from(self.fsp);
            let frac = self.microsecond / 10u32.pow(u32::from(MAX_FSP - self.fsp));
            write!(f, ".{frac:0width$}")?;
        }
        Ok(())
    }
}

fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Two-digit years: 00-69 are 2000-2069, 70-99 are 1970-1999
fn adjust_year(year: u32) -> u32 {
    match year {
        0..=69 => year + 2000,
        70..=99 => year + 1900,
        _ => year,
    }
}

/// Raw components before range validation
#[derive(Debug, Default)]
struct Parts {
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    microsecond: u32,
    carry: bool,
}

impl Parts {
    fn assign(&mut self, fields: &[u32]) {
        let slots = [
            &mut self.year,
            &mut self.month,
            &mut self.day,
            &mut self.hour,
            &mut self.minute,
            &mut self.second,
        ];
        for (slot, value) in slots.into_iter().zip(fields) {
            *slot = *value;
        }
    }

    fn into_time(self, tp: SqlTypeTag, fsp: u8) -> Option<SqlTime> {
        let time = SqlTime {
            year: u16::try_from(self.year).ok()?,
            month: u8::try_from(self.month).ok()?,
            day: u8::try_from(self.day).ok()?,
            hour: u8::try_from(self.hour).ok()?,
            minute: u8::try_from(self.minute).ok()?,
            second: u8::try_from(self.second).ok()?,
            microsecond: self.microsecond,
            tp,
            fsp,
        };
        if !time.is_valid() {
            return None;
        }
        if self.carry {
            return time.carry_second().ok();
        }
        Some(time)
    }
}

/// Split a trailing `.digits` fraction off
fn split_frac(s: &str) -> (&str, &str) {
    for (i, b) in s.bytes().enumerate().rev() {
        if b == b'.' {
            if i > 0 {
                return (&s[..i], &s[i + 1..]);
            }
            break;
        }
        if !b.is_ascii_digit() {
            break;
        }
    }
    (s, "")
}

/// Split on punctuation, whitespace or `T`; every part must be digits
fn split_date_parts(body: &str) -> Option<Vec<&str>> {
    if !body.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let mut parts = Vec::with_capacity(6);
    for part in body.split(|c: char| c.is_ascii_punctuation() || c.is_ascii_whitespace() || c == 'T') {
        if part.is_empty() {
            continue;
        }
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        parts.push(part);
    }
    Some(parts)
}

fn is_supported_layout(seps: &[&str]) -> bool {
    match seps {
        [digits] => matches!(digits.len(), 5 | 6 | 8..=12 | 14),
        _ => (3..=6).contains(&seps.len()),
    }
}

/// Read consecutive fixed-width fields; the last may be shorter
fn scan_fixed(digits: &str, widths: &[usize]) -> Vec<u32> {
    let mut fields = Vec::with_capacity(widths.len());
    let mut rest = digits;
    for &width in widths {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(width.min(rest.len()));
        fields.push(head.parse().unwrap_or(0));
        rest = tail;
    }
    fields
}

fn parse_parts(seps: &[&str], frac: &str, fsp: u8) -> Option<Parts> {
    let mut parts = Parts::default();
    let has_time = if let [digits] = seps {
        let widths: &[usize] = match digits.len() {
            14 => &[4, 2, 2, 2, 2, 2],
            9..=12 => &[2, 2, 2, 2, 2, 2],
            8 => &[4, 2, 2],
            5 | 6 => &[2, 2, 2],
            _ => return None,
        };
        parts.assign(&scan_fixed(digits, widths));
        if widths[0] == 2 {
            parts.year = adjust_year(parts.year);
        }
        if matches!(digits.len(), 5 | 6 | 8) {
            // A fraction after a bare date is read as hh[mm[ss]]
            let clock = scan_fixed(frac, &[2, 2, 2]);
            parts.hour = clock.first().copied().unwrap_or(0);
            parts.minute = clock.get(1).copied().unwrap_or(0);
            parts.second = clock.get(2).copied().unwrap_or(0);
            false
        } else {
            true
        }
    } else {
        let mut fields = Vec::with_capacity(seps.len());
        for sep in seps {
            fields.push(sep.parse::<u32>().ok()?);
        }
        parts.assign(&fields);
        if seps[0].len() == 2 {
            parts.year = adjust_year(parts.year);
        }
        seps.len() > 3
    };

    if has_time {
        let (microsecond, carry) = parse_frac(frac, fsp)?;
        parts.microsecond = microsecond;
        parts.carry = carry;
    }
    Some(parts)
}

/// Parse fractional-second digits rounded to `fsp` places.
///
/// Returns microseconds and whether rounding carried into the next second.
pub(crate) fn parse_frac(frac: &str, fsp: u8) -> Option<(u32, bool)> {
    if frac.is_empty() {
        return Some((0, false));
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let fsp = u32::from(fsp.min(MAX_FSP));
    let len = frac.len() as u32;
    if len <= fsp {
        let value: u32 = frac.parse().ok()?;
        return Some((value * 10u32.pow(u32::from(MAX_FSP) - len), false));
    }
    let head: u32 = frac[..fsp as usize + 1].parse().ok()?;
    let rounded = (head + 5) / 10;
    if rounded >= 10u32.pow(fsp) {
        return Some((0, true));
    }
    Some((rounded * 10u32.pow(u32::from(MAX_FSP) - fsp), false))
}
