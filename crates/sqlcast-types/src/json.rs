//! JSON class helpers: parsing, scalar coercion and text rendering

use crate::convert::{convert_float_to_int, convert_float_to_uint, str_to_float, str_to_int, str_to_uint};
use serde_json::{Number, Value};
use sqlcast_diagnostics::{CastError, DiagnosticsSink, Result};
use std::fmt::{self, Write};

/// Parse JSON text; malformed input is always fatal
pub fn parse_json(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| CastError::invalid_json(e.to_string()))
}

/// JSON double; non-finite values become `null`
pub fn json_from_f64(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Coerce a JSON value to an integer (two's-complement bits for unsigned
/// targets).
///
/// Objects, arrays, `null` and `false` are 0, `true` is 1. Strings parse like
/// string-to-integer casts; out-of-range strings clamp through the overflow
/// policy.
pub fn json_to_int(value: &Value, unsigned: bool, sink: &mut dyn DiagnosticsSink) -> Result<i64> {
    match value {
        Value::Object(_) | Value::Array(_) | Value::Null | Value::Bool(false) => Ok(0),
        Value::Bool(true) => Ok(1),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(u) = n.as_u64() {
                Ok(u as i64)
            } else {
                let f = n.as_f64().unwrap_or(0.0);
                if unsigned {
                    convert_float_to_uint(f, u64::MAX, sink).map(|u| u as i64)
                } else {
                    convert_float_to_int(f, i64::MIN, i64::MAX, sink)
                }
            }
        }
        Value::String(s) => {
            let negative = s.trim_start().starts_with('-');
            let parsed = if unsigned && !negative {
                str_to_uint(s, sink).map(|u| u as i64)
            } else {
                str_to_int(s, sink)
            };
            match parsed {
                Err(err @ CastError::Overflow { .. }) => {
                    sink.handle_overflow(err.clone(), err)?;
                    Ok(match (negative, unsigned) {
                        (true, _) => i64::MIN,
                        (false, true) => u64::MAX as i64,
                        (false, false) => i64::MAX,
                    })
                }
                other => other,
            }
        }
    }
}

/// Coerce a JSON value to a double
pub fn json_to_float(value: &Value, sink: &mut dyn DiagnosticsSink) -> Result<f64> {
    match value {
        Value::Object(_) | Value::Array(_) | Value::Null | Value::Bool(false) => Ok(0.0),
        Value::Bool(true) => Ok(1.0),
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => str_to_float(s, sink),
    }
}

/// Unquoted text: strings verbatim, everything else serialized
pub fn json_unquote(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => json_to_string(other),
    }
}

/// Serialized text in the `{"a": 1, "b": [1, 2]}` layout
pub fn json_to_string(value: &Value) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_json(&mut out, value);
    out
}

fn write_json(out: &mut String, value: &Value) -> fmt::Result {
    match value {
        Value::Null => out.write_str("null"),
        Value::Bool(b) => write!(out, "{b}"),
        Value::Number(n) => write!(out, "{n}"),
        Value::String(s) => write!(out, "{}", Value::String(s.clone())),
        Value::Array(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_json(out, item)?;
            }
            out.write_char(']')
        }
        Value::Object(map) => {
            out.write_char('{')?;
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write!(out, "{}: ", Value::String(key.clone()))?;
                write_json(out, item)?;
            }
            out.write_char('}')
        }
    }
}
