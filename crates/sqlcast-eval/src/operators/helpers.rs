//! Conversions shared by several target classes

use crate::error::EvalResult;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use sqlcast_diagnostics::{CastError, DiagnosticsSink};
use sqlcast_types::DurationParse;
use sqlcast_types::SqlDuration;
use sqlcast_types::convert::{format_float, get_valid_float_prefix};
use std::str::FromStr;

/// Nearest double to a decimal
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

/// Decimal with the shortest round-trip digits of `value`.
///
/// Magnitudes beyond the decimal range clamp through the overflow policy.
pub fn float_to_decimal(value: f64, sink: &mut dyn DiagnosticsSink) -> EvalResult<Decimal> {
    let text = format_float(value);
    match Decimal::from_str(&text) {
        Ok(dec) => Ok(dec),
        // More fractional digits than the decimal scale holds
        Err(_) if value.abs() < 1.0 => Ok(Decimal::from_f64(value).unwrap_or(Decimal::ZERO)),
        Err(_) => {
            let err = CastError::overflow("DECIMAL", text);
            sink.handle_overflow(err.clone(), err)?;
            Ok(if value.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
        }
    }
}

/// Parse the valid numeric prefix of `s` as a decimal; trailing noise is
/// reported as truncation.
pub fn str_to_decimal(s: &str, sink: &mut dyn DiagnosticsSink) -> EvalResult<Decimal> {
    let prefix = get_valid_float_prefix(s.trim(), sink)?;
    let text = normalize_decimal_text(prefix);
    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(&text)
    } else {
        Decimal::from_str(&text)
    };
    match parsed {
        Ok(dec) => Ok(dec),
        // Exponents outside the decimal range
        Err(_) => float_to_decimal(text.parse().unwrap_or(0.0), sink),
    }
}

/// `.5` -> `0.5`, `1.` -> `1`, `+1` -> `1`
fn normalize_decimal_text(text: &str) -> String {
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(idx) => body.split_at(idx),
        None => (body, ""),
    };
    let mantissa = mantissa.strip_suffix('.').unwrap_or(mantissa);
    let lead = if mantissa.starts_with('.') || mantissa.is_empty() {
        "0"
    } else {
        ""
    };
    format!("{sign}{lead}{mantissa}{exponent}")
}

/// Apply the text-to-TIME rule: a truncation together with a zero result
/// is NULL.
pub(crate) fn duration_or_null(
    parsed: DurationParse,
    sink: &mut dyn DiagnosticsSink,
) -> EvalResult<Option<SqlDuration>> {
    match parsed.warning {
        Some(warning) => {
            sink.handle_truncation(warning)?;
            Ok((!parsed.value.is_zero()).then_some(parsed.value))
        }
        None => Ok(Some(parsed.value)),
    }
}
