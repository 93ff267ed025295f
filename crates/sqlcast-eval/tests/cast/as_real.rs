//! CAST(... AS DOUBLE/FLOAT) Tests
//!
//! Tests for: CastIntAsReal, CastRealAsReal, CastDecimalAsReal,
//! CastStringAsReal, CastTimeAsReal, CastDurationAsReal, CastJsonAsReal

use crate::common::{cast, ctx, datetime, dec, duration, strict_ctx, warning_codes};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use sqlcast_eval::{Constant, ConversionOutcome};
use sqlcast_types::{FieldType, SqlTypeTag};

// ============================================================================
// Test Helpers
// ============================================================================

fn double() -> FieldType {
    FieldType::new(SqlTypeTag::Double)
}

fn real_of(outcome: &ConversionOutcome) -> f64 {
    outcome.value.as_real().expect("real result")
}

// ============================================================================
// Numeric Sources
// ============================================================================

#[test]
fn test_int_to_real() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::int(-3), double()).unwrap();
    assert_eq!(real_of(&out), -3.0);

    let out = cast(&mut ctx, Constant::uint(u64::MAX), double()).unwrap();
    assert_eq!(real_of(&out), 18446744073709551615.0);
}

#[test]
fn test_real_identity() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::real(1.25), double()).unwrap();
    assert_eq!(real_of(&out), 1.25);
}

#[rstest]
#[case("0.1", 0.1)]
#[case("-123.456", -123.456)]
#[case("100", 100.0)]
fn test_decimal_to_real(#[case] input: &str, #[case] expected: f64) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::decimal(dec(input)), double()).unwrap();
    assert_eq!(real_of(&out), expected);
}

// ============================================================================
// String Sources
// ============================================================================

#[rstest]
#[case("3.5", 3.5, vec![])]
#[case(" -0.25 ", -0.25, vec![])]
#[case("1e3", 1000.0, vec![])]
#[case("3.5abc", 3.5, vec![100])]
#[case("abc", 0.0, vec![100])]
fn test_string_to_real(#[case] input: &str, #[case] expected: f64, #[case] codes: Vec<u16>) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string(input), double()).unwrap();
    assert_eq!(real_of(&out), expected);
    assert_eq!(warning_codes(&out), codes);
}

#[test]
fn test_string_infinity_clamps() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string("1e400"), double()).unwrap();
    assert_eq!(real_of(&out), f64::MAX);
    assert_eq!(warning_codes(&out), vec![101]);
}

#[test]
fn test_string_to_float_with_width() {
    let mut ctx = ctx();
    let tp = FieldType::new(SqlTypeTag::Float).with_flen(4).with_decimal(2);
    let out = cast(&mut ctx, Constant::string("1.23456"), tp.clone()).unwrap();
    assert!((real_of(&out) - 1.23).abs() < 1e-9);
    assert!(out.warnings.is_empty());

    let out = cast(&mut ctx, Constant::string("123.456"), tp).unwrap();
    assert!((real_of(&out) - 99.99).abs() < 1e-9);
    assert_eq!(warning_codes(&out), vec![1]);
}

#[test]
fn test_string_to_unsigned_real() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string("-5"), double().with_unsigned(true)).unwrap();
    assert_eq!(real_of(&out), 0.0);
    assert_eq!(warning_codes(&out), vec![1]);

    let mut strict = strict_ctx();
    assert!(cast(&mut strict, Constant::string("-5"), double().with_unsigned(true)).is_err());
}

#[test]
fn test_binary_literal_to_real() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::binary_literal(vec![0x41u8]), double()).unwrap();
    assert_eq!(real_of(&out), 65.0);
}

// ============================================================================
// Temporal And JSON Sources
// ============================================================================

#[test]
fn test_temporal_to_real() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::time(datetime("2023-06-15 12:30:45", 0)), double()).unwrap();
    assert_eq!(real_of(&out), 20230615123045.0);

    let out = cast(&mut ctx, Constant::duration(duration("01:02:03.5", 1)), double()).unwrap();
    assert_eq!(real_of(&out), 10203.5);
}

#[rstest]
#[case(json!("2.5"), 2.5)]
#[case(json!(7), 7.0)]
#[case(json!(true), 1.0)]
#[case(json!([1]), 0.0)]
fn test_json_to_real(#[case] input: Value, #[case] expected: f64) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::json(input), double()).unwrap();
    assert_eq!(real_of(&out), expected);
}

#[test]
fn test_null_propagates() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::null(SqlTypeTag::Varchar), double()).unwrap();
    assert!(out.is_null());
    assert!(out.warnings.is_empty());
}
