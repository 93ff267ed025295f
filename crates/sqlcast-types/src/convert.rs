//! Number and text conversion primitives
//!
//! String-to-number parsing tolerates trailing noise: the longest valid
//! numeric prefix is used and the rest is reported as a truncation through
//! the sink. Float-to-integer conversion rounds half away from zero and
//! saturates at the target bounds.

use sqlcast_diagnostics::{CastError, DiagnosticsSink, Result};
use std::borrow::Cow;

/// Extra zeros an exponent may append to an integer string before the value
/// is treated as overflowing
const MAX_EXPONENT_ZEROS: usize = 20;

/// Longest prefix of `s` that parses as a float literal.
///
/// An empty prefix yields `"0"`. A prefix shorter than `s` (or empty) is a
/// truncation.
pub fn get_valid_float_prefix<'a>(s: &'a str, sink: &mut dyn DiagnosticsSink) -> Result<&'a str> {
    let bytes = s.as_bytes();
    let mut saw_dot = false;
    let mut saw_digit = false;
    let mut valid_len = 0;
    let mut e_idx = 0;

    for (i, &c) in bytes.iter().enumerate() {
        match c {
            b'+' | b'-' => {
                // "1e+1" is valid
                if i != 0 && (e_idx == 0 || i != e_idx + 1) {
                    break;
                }
            }
            b'.' => {
                if saw_dot || e_idx > 0 {
                    break;
                }
                saw_dot = true;
                if saw_digit {
                    valid_len = i + 1;
                }
            }
            b'e' | b'E' => {
                if !saw_digit || e_idx != 0 {
                    break;
                }
                e_idx = i;
            }
            b'0'..=b'9' => {
                saw_digit = true;
                valid_len = i + 1;
            }
            _ => break,
        }
    }

    if valid_len == 0 || valid_len != s.len() {
        sink.handle_truncation(CastError::Truncated)?;
    }
    if valid_len == 0 {
        Ok("0")
    } else {
        Ok(&s[..valid_len])
    }
}

/// Integer part of a valid float literal, expanding any exponent.
///
/// `1.9` becomes `1`, `1.5e3` becomes `1500`. Exponents that would append
/// more than twenty zeros are overflow.
pub fn float_str_to_int_str<'a>(valid_float: &'a str, original: &str) -> Result<Cow<'a, str>> {
    let dot_idx = valid_float.find('.');
    let Some(e_idx) = valid_float.find(['e', 'E']) else {
        let int_part = match dot_idx {
            Some(dot) => &valid_float[..dot],
            None => valid_float,
        };
        return Ok(normalize_int_str(int_part));
    };

    let mantissa = &valid_float[..e_idx];
    let mut digits = String::with_capacity(valid_float.len());
    let int_count = match dot_idx {
        Some(dot) => {
            digits.push_str(&mantissa[..dot]);
            let count = digits.len();
            digits.push_str(&mantissa[dot + 1..]);
            count
        }
        None => {
            digits.push_str(mantissa);
            digits.len()
        }
    };

    let exp: i64 = valid_float[e_idx + 1..]
        .parse()
        .map_err(|_| CastError::overflow("BIGINT", original))?;
    let int_count = (int_count as i64)
        .checked_add(exp)
        .ok_or_else(|| CastError::overflow("BIGINT", original))?;
    if int_count <= 0 {
        return Ok(Cow::Borrowed("0"));
    }
    let int_count = int_count as usize;
    if int_count == 1 && digits.starts_with(['-', '+']) {
        return Ok(Cow::Borrowed("0"));
    }
    if int_count <= digits.len() {
        digits.truncate(int_count);
        return Ok(Cow::Owned(digits));
    }
    let extra_zeros = int_count - digits.len();
    if extra_zeros > MAX_EXPONENT_ZEROS {
        return Err(CastError::overflow("BIGINT", original));
    }
    digits.extend(std::iter::repeat_n('0', extra_zeros));
    Ok(Cow::Owned(digits))
}

fn normalize_int_str(s: &str) -> Cow<'_, str> {
    match s {
        "" | "-" | "+" => Cow::Borrowed("0"),
        _ => Cow::Borrowed(s),
    }
}

fn valid_int_prefix<'a>(s: &'a str, sink: &mut dyn DiagnosticsSink) -> Result<Cow<'a, str>> {
    let valid = get_valid_float_prefix(s, sink)?;
    float_str_to_int_str(valid, s)
}

/// Parse a signed integer from text, tolerating trailing noise.
///
/// Out-of-range values are returned as an `Overflow` error so the caller
/// can decide how to clamp.
pub fn str_to_int(s: &str, sink: &mut dyn DiagnosticsSink) -> Result<i64> {
    let s = s.trim();
    let prefix = valid_int_prefix(s, sink)?;
    prefix
        .parse::<i64>()
        .map_err(|_| CastError::overflow("BIGINT", prefix.as_ref()))
}

/// Parse an unsigned integer from text, tolerating trailing noise.
pub fn str_to_uint(s: &str, sink: &mut dyn DiagnosticsSink) -> Result<u64> {
    let s = s.trim();
    let prefix = valid_int_prefix(s, sink)?;
    let digits = prefix.strip_prefix('+').unwrap_or(prefix.as_ref());
    digits
        .parse::<u64>()
        .map_err(|_| CastError::overflow("BIGINT UNSIGNED", digits))
}

/// Parse a double from text, tolerating trailing noise.
///
/// Infinite results are clamped to `±f64::MAX` and reported as a truncation.
pub fn str_to_float(s: &str, sink: &mut dyn DiagnosticsSink) -> Result<f64> {
    let s = s.trim();
    let valid = get_valid_float_prefix(s, sink)?;
    let value: f64 = valid.parse().unwrap_or(0.0);
    if value.is_infinite() {
        sink.handle_truncation(CastError::truncated_wrong_value("DOUBLE", s))?;
        return Ok(if value.is_sign_positive() {
            f64::MAX
        } else {
            -f64::MAX
        });
    }
    Ok(value)
}

/// Round half away from zero and saturate into `[lower, upper]`.
///
/// Values beyond the bounds are reported through
/// [`DiagnosticsSink::handle_overflow`].
pub fn convert_float_to_int(
    value: f64,
    lower: i64,
    upper: i64,
    sink: &mut dyn DiagnosticsSink,
) -> Result<i64> {
    let rounded = value.round();
    if rounded.is_nan() {
        return Ok(0);
    }
    if rounded < lower as f64 {
        report_float_overflow(rounded, sink)?;
        return Ok(lower);
    }
    if rounded >= upper as f64 {
        if rounded != upper as f64 {
            report_float_overflow(rounded, sink)?;
        }
        return Ok(upper);
    }
    Ok(rounded as i64)
}

/// Round half away from zero and saturate into `[0, upper]`
pub fn convert_float_to_uint(value: f64, upper: u64, sink: &mut dyn DiagnosticsSink) -> Result<u64> {
    let rounded = value.round();
    if rounded.is_nan() {
        return Ok(0);
    }
    if rounded < 0.0 {
        report_float_overflow(rounded, sink)?;
        return Ok(0);
    }
    if rounded >= upper as f64 {
        if rounded != upper as f64 {
            report_float_overflow(rounded, sink)?;
        }
        return Ok(upper);
    }
    Ok(rounded as u64)
}

fn report_float_overflow(value: f64, sink: &mut dyn DiagnosticsSink) -> Result<()> {
    let err = CastError::overflow("DOUBLE", format_float(value));
    sink.handle_overflow(err.clone(), err)
}

/// Shortest round-trip text of a double, never in exponent form
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    format!("{value}")
}
