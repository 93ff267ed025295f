//! CAST(... AS SIGNED/UNSIGNED) Tests
//!
//! Tests for: CastIntAsInt, CastRealAsInt, CastDecimalAsInt, CastStringAsInt,
//! CastTimeAsInt, CastDurationAsInt, CastJsonAsInt

use crate::common::{cast, ctx, datetime, date, dec, duration, strict_ctx, warning_codes};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use sqlcast_diagnostics::CastError;
use sqlcast_eval::Constant;
use sqlcast_types::{FieldType, SqlTypeTag, SqlValue};

// ============================================================================
// Test Helpers
// ============================================================================

fn signed() -> FieldType {
    FieldType::new(SqlTypeTag::BigInt)
}

fn unsigned() -> FieldType {
    FieldType::new(SqlTypeTag::BigInt).with_unsigned(true)
}

fn int_of(outcome: &sqlcast_eval::ConversionOutcome) -> i64 {
    outcome.value.as_int().expect("integer result")
}

// ============================================================================
// String Sources
// ============================================================================

#[rstest]
#[case("123", 123, vec![])]
#[case("  42  ", 42, vec![])]
#[case("+5", 5, vec![])]
#[case("-17", -17, vec![])]
#[case("1.9", 1, vec![])]
#[case("1e3", 1000, vec![])]
#[case("12abc", 12, vec![100])]
#[case("abc", 0, vec![100])]
fn test_string_to_signed(#[case] input: &str, #[case] expected: i64, #[case] codes: Vec<u16>) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string(input), signed()).unwrap();
    assert_eq!(int_of(&out), expected);
    assert_eq!(warning_codes(&out), codes);
}

#[test]
fn test_negative_string_to_unsigned_warns() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string("-1"), unsigned()).unwrap();
    assert_eq!(int_of(&out) as u64, u64::MAX);
    assert_eq!(warning_codes(&out), vec![300]);
}

#[test]
fn test_large_string_to_signed_warns() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string("18446744073709551615"), signed()).unwrap();
    assert_eq!(int_of(&out), -1);
    assert_eq!(warning_codes(&out), vec![301]);

    let out = cast(&mut ctx, Constant::string("18446744073709551615"), unsigned()).unwrap();
    assert_eq!(int_of(&out) as u64, u64::MAX);
    assert!(out.warnings.is_empty());
}

#[rstest]
#[case("99999999999999999999", -1)]
#[case("-99999999999999999999", i64::MIN)]
#[case("1e30", -1)]
fn test_string_overflow_clamps_in_select(#[case] input: &str, #[case] expected: i64) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string(input), signed()).unwrap();
    assert_eq!(int_of(&out), expected);
    assert_eq!(warning_codes(&out), vec![101]);
}

#[test]
fn test_string_overflow_strict_fails() {
    let mut ctx = strict_ctx();
    let err = cast(&mut ctx, Constant::string("99999999999999999999"), signed()).unwrap_err();
    assert_eq!(err, CastError::overflow("BIGINT UNSIGNED", "99999999999999999999"));
}

#[test]
fn test_string_noise_strict_fails() {
    let mut ctx = strict_ctx();
    let err = cast(&mut ctx, Constant::string("12abc"), signed()).unwrap_err();
    assert_eq!(err, CastError::Truncated);
}

// ============================================================================
// Numeric Sources
// ============================================================================

#[rstest]
#[case(2.5, 3)]
#[case(-2.5, -3)]
#[case(2.4, 2)]
#[case(0.0, 0)]
fn test_real_rounds_half_away(#[case] input: f64, #[case] expected: i64) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::real(input), signed()).unwrap();
    assert_eq!(int_of(&out), expected);
}

#[test]
fn test_real_saturates() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::real(1e20), signed()).unwrap();
    assert_eq!(int_of(&out), i64::MAX);
    assert_eq!(warning_codes(&out), vec![1]);

    let out = cast(&mut ctx, Constant::real(-1.2), unsigned()).unwrap();
    assert_eq!(int_of(&out), 0);
    assert_eq!(warning_codes(&out), vec![1]);

    let mut strict = strict_ctx();
    assert!(cast(&mut strict, Constant::real(1e20), signed()).is_err());
}

#[rstest]
#[case("2.5", 2)]
#[case("3.5", 4)]
#[case("-2.5", -2)]
#[case("-0.4", 0)]
fn test_decimal_rounds_half_even(#[case] input: &str, #[case] expected: i64) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::decimal(dec(input)), signed()).unwrap();
    assert_eq!(int_of(&out), expected);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_decimal_overflow() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::decimal(dec("99999999999999999999.5")), signed()).unwrap();
    assert_eq!(int_of(&out), i64::MAX);
    assert_eq!(warning_codes(&out), vec![101]);
    assert_eq!(
        out.warnings[0].message,
        "Truncated incorrect DECIMAL value: '99999999999999999999.5'"
    );

    let out = cast(&mut ctx, Constant::decimal(dec("-1")), unsigned()).unwrap();
    assert_eq!(int_of(&out), 0);
    assert_eq!(warning_codes(&out), vec![101]);

    let out = cast(&mut ctx, Constant::decimal(dec("18446744073709551615")), unsigned()).unwrap();
    assert_eq!(int_of(&out) as u64, u64::MAX);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_int_identity_and_null() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::int(-9), signed()).unwrap();
    assert_eq!(out.value, SqlValue::int(-9));

    let out = cast(&mut ctx, Constant::boolean(true), signed()).unwrap();
    assert_eq!(out.value, SqlValue::int(1));

    let out = cast(&mut ctx, Constant::null(SqlTypeTag::BigInt), signed()).unwrap();
    assert!(out.is_null());
}

// ============================================================================
// Temporal And JSON Sources
// ============================================================================

#[test]
fn test_time_to_int() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::time(datetime("2023-06-15 12:30:45.6", 1)), signed()).unwrap();
    assert_eq!(int_of(&out), 20230615123046);

    let out = cast(&mut ctx, Constant::time(date("2023-06-15")), signed()).unwrap();
    assert_eq!(int_of(&out), 20230615);
}

#[test]
fn test_duration_to_int() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::duration(duration("-12:30:45.5", 1)), signed()).unwrap();
    assert_eq!(int_of(&out), -123046);
}

#[rstest]
#[case(json!(true), 1)]
#[case(json!(null), 0)]
#[case(json!({"a": 1}), 0)]
#[case(json!("-5"), -5)]
#[case(json!(3.5), 4)]
fn test_json_to_int(#[case] input: Value, #[case] expected: i64) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::json(input), signed()).unwrap();
    assert_eq!(int_of(&out), expected);
}

// ============================================================================
// Hybrid And Binary Literal Sources
// ============================================================================

#[test]
fn test_hybrid_uses_number() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::hybrid(SqlTypeTag::Enum, 2, "b"), signed()).unwrap();
    assert_eq!(int_of(&out), 2);
}

#[test]
fn test_binary_literal_uses_number() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::binary_literal(vec![0x01u8, 0x02]), unsigned()).unwrap();
    assert_eq!(int_of(&out), 258);
}
