//! Post-processing of cast results to the target's declared width and scale

use crate::field_type::FieldType;
use crate::type_system::SqlTypeTag;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlcast_diagnostics::{CastError, DiagnosticsSink, Result};

/// Largest scale representable by the decimal backend
const MAX_DECIMAL_SCALE: u8 = 28;

/// Fit a string into the target's display width.
///
/// utf8/utf8mb4 targets count characters, other charsets count bytes. Overlong
/// input is cut and reported as `DataTooLong` truncation. Binary `CHAR`
/// targets are right-padded with NUL bytes.
pub fn produce_str_with_specified_tp(
    mut s: String,
    tp: &FieldType,
    sink: &mut dyn DiagnosticsSink,
) -> Result<String> {
    let Some(flen) = tp.flen.map(|flen| flen as usize) else {
        return Ok(s);
    };

    if tp.is_char_counted() {
        let char_len = s.chars().count();
        if char_len > flen {
            let cut = s.char_indices().nth(flen).map_or(s.len(), |(idx, _)| idx);
            s.truncate(cut);
            sink.handle_truncation(CastError::DataTooLong {
                flen,
                len: char_len,
            })?;
        }
    } else if s.len() > flen {
        let len = s.len();
        s.truncate(floor_char_boundary(&s, flen));
        sink.handle_truncation(CastError::DataTooLong { flen, len })?;
    } else if tp.tp == SqlTypeTag::Char && tp.is_binary_string() && s.len() < flen {
        let padding = flen - s.len();
        s.extend(std::iter::repeat_n('\0', padding));
    }
    Ok(s)
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    (0..=index.min(s.len()))
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0)
}

/// Round a double to `FLOAT(M,D)` when both are declared and reject
/// negatives for unsigned targets. Both conditions go through the overflow
/// policy.
pub fn produce_float_with_specified_tp(
    f: f64,
    tp: &FieldType,
    sink: &mut dyn DiagnosticsSink,
) -> Result<f64> {
    let mut f = f;
    if let (Some(flen), Some(decimal)) = (tp.flen, tp.decimal) {
        let (truncated, overflowed) = truncate_float(f, flen, decimal);
        f = truncated;
        if overflowed {
            let err = CastError::overflow(tp.tp.name(), f);
            sink.handle_overflow(err.clone(), err)?;
        }
    }
    if tp.unsigned && f < 0.0 {
        let err = CastError::overflow(tp.tp.name(), f);
        sink.handle_overflow(err.clone(), err)?;
        return Ok(0.0);
    }
    Ok(f)
}

/// Round to `decimal` places (half away from zero) and clamp to the largest
/// `FLOAT(flen, decimal)` magnitude. Returns whether the value was clamped.
fn truncate_float(f: f64, flen: u32, decimal: u8) -> (f64, bool) {
    if f.is_nan() {
        return (0.0, false);
    }
    let decimal = i32::from(decimal);
    let flen = i32::try_from(flen).unwrap_or(i32::MAX);
    let max = 10f64.powi(flen.saturating_sub(decimal)) - 10f64.powi(-decimal);
    let f = if f.is_infinite() {
        f
    } else {
        let shift = 10f64.powi(decimal);
        (f * shift).round() / shift
    };
    if f > max {
        (max, true)
    } else if f < -max {
        (-max, true)
    } else {
        (f, false)
    }
}

/// Fit a decimal into `DECIMAL(flen, decimal)` when both are declared.
///
/// Too many integral digits clamp to the largest representable value with
/// an overflow. Extra fractional digits round half-to-even and report a
/// truncation if the value changed. Unsigned targets clamp negatives to 0.
pub fn produce_dec_with_specified_tp(
    dec: Decimal,
    tp: &FieldType,
    sink: &mut dyn DiagnosticsSink,
) -> Result<Decimal> {
    let mut dec = dec;
    if let (Some(flen), Some(decimal)) = (tp.flen, tp.decimal) {
        if flen < u32::from(decimal) {
            return Err(CastError::internal(format!(
                "DECIMAL({flen},{decimal}) has a scale larger than its precision"
            )));
        }
        let int_limit = flen - u32::from(decimal);
        let frac = dec.scale();
        if !dec.is_zero() && integer_digits(&dec) > int_limit {
            dec = clamp_decimal(dec.is_sign_negative(), flen, decimal, sink)?;
        } else if frac != u32::from(decimal) {
            let old = dec;
            let scale = u32::from(decimal.min(MAX_DECIMAL_SCALE));
            dec = dec.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven);
            dec.rescale(scale);
            if !dec.is_zero() && integer_digits(&dec) > int_limit {
                dec = clamp_decimal(dec.is_sign_negative(), flen, decimal, sink)?;
            } else if !dec.is_zero() && frac > u32::from(decimal) && dec != old {
                sink.handle_truncation(CastError::Truncated)?;
            }
        }
    }
    if tp.unsigned && dec.is_sign_negative() && !dec.is_zero() {
        dec = Decimal::ZERO;
    }
    Ok(dec)
}

fn clamp_decimal(
    negative: bool,
    flen: u32,
    decimal: u8,
    sink: &mut dyn DiagnosticsSink,
) -> Result<Decimal> {
    let err = CastError::overflow("DECIMAL", format!("({flen}, {decimal})"));
    sink.handle_overflow(err.clone(), err)?;
    let max = max_decimal(flen, decimal);
    Ok(if negative { -max } else { max })
}

/// `999.99` for `DECIMAL(5,2)`, saturating at the backend's limit
fn max_decimal(flen: u32, decimal: u8) -> Decimal {
    10i128
        .checked_pow(flen)
        .and_then(|p| Decimal::try_from_i128_with_scale(p - 1, u32::from(decimal)).ok())
        .unwrap_or(Decimal::MAX)
}

fn integer_digits(dec: &Decimal) -> u32 {
    let mut int = dec.abs().trunc().to_u128().unwrap_or(0);
    let mut digits = 0;
    while int > 0 {
        int /= 10;
        digits += 1;
    }
    digits
}
