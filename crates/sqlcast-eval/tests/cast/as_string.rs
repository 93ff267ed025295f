//! CAST(... AS CHAR/BINARY) Tests
//!
//! Tests for: CastIntAsString, CastRealAsString, CastDecimalAsString,
//! CastStringAsString, CastTimeAsString, CastDurationAsString,
//! CastJsonAsString

use crate::common::{cast, ctx, datetime, date, dec, duration, strict_ctx, warning_codes};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use sqlcast_diagnostics::CastError;
use sqlcast_eval::{Constant, ConversionOutcome};
use sqlcast_types::{FieldType, SqlTypeTag};

// ============================================================================
// Test Helpers
// ============================================================================

fn varchar() -> FieldType {
    FieldType::new(SqlTypeTag::VarString)
}

fn text_of(outcome: &ConversionOutcome) -> &str {
    outcome.value.as_str().expect("string result")
}

fn cast_text(arg: Constant) -> String {
    let mut ctx = ctx();
    let out = cast(&mut ctx, arg, varchar()).unwrap();
    text_of(&out).to_string()
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_int_text() {
    assert_eq!(cast_text(Constant::int(-42)), "-42");
    assert_eq!(cast_text(Constant::uint(u64::MAX)), "18446744073709551615");
    assert_eq!(cast_text(Constant::boolean(true)), "1");
}

#[rstest]
#[case(1.5, "1.5")]
#[case(1e20, "100000000000000000000")]
#[case(-3.0, "-3")]
fn test_real_text(#[case] input: f64, #[case] expected: &str) {
    assert_eq!(cast_text(Constant::real(input)), expected);
}

#[test]
fn test_decimal_keeps_scale() {
    assert_eq!(cast_text(Constant::decimal(dec("1.50"))), "1.50");
}

#[test]
fn test_temporal_text() {
    assert_eq!(
        cast_text(Constant::time(datetime("2023-06-15 12:30:45.5", 1))),
        "2023-06-15 12:30:45.5"
    );
    assert_eq!(cast_text(Constant::time(date("2023-06-15"))), "2023-06-15");
    assert_eq!(cast_text(Constant::duration(duration("-01:00:00", 0))), "-01:00:00");
}

#[test]
fn test_json_text() {
    let value = json!({"a": 1, "b": [1, 2]});
    assert_eq!(cast_text(Constant::json(value)), r#"{"a": 1, "b": [1, 2]}"#);
    assert_eq!(cast_text(Constant::json(json!("x"))), r#""x""#);
}

#[test]
fn test_hybrid_and_binary_literal_text() {
    assert_eq!(cast_text(Constant::hybrid(SqlTypeTag::Enum, 2, "b")), "b");
    assert_eq!(cast_text(Constant::binary_literal(vec![0x41u8, 0x42])), "AB");
}

// ============================================================================
// Width Handling
// ============================================================================

#[test]
fn test_utf8_width_counts_characters() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string("héllo"), varchar().with_flen(3)).unwrap();
    assert_eq!(text_of(&out), "hél");
    assert_eq!(warning_codes(&out), vec![102]);
}

#[test]
fn test_binary_width_counts_bytes() {
    let mut ctx = ctx();
    let tp = varchar().with_flen(2).with_binary_charset();
    let out = cast(&mut ctx, Constant::string("héllo"), tp).unwrap();
    assert_eq!(text_of(&out), "h");
    assert_eq!(warning_codes(&out), vec![102]);
}

#[test]
fn test_binary_char_pads() {
    let mut ctx = ctx();
    let tp = FieldType::new(SqlTypeTag::Char)
        .with_flen(4)
        .with_binary_charset();
    let out = cast(&mut ctx, Constant::string("ab"), tp).unwrap();
    assert_eq!(text_of(&out), "ab\0\0");
    assert!(out.warnings.is_empty());
}

#[test]
fn test_too_long_strict_fails() {
    let mut ctx = strict_ctx();
    let err = cast(&mut ctx, Constant::int(12345), varchar().with_flen(3)).unwrap_err();
    assert_eq!(err, CastError::DataTooLong { flen: 3, len: 5 });
}

#[test]
fn test_null_propagates() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::null(SqlTypeTag::DateTime), varchar().with_flen(1)).unwrap();
    assert!(out.is_null());
    assert!(out.warnings.is_empty());
}
