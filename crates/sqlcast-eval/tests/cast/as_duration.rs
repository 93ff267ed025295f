//! CAST(... AS TIME) Tests
//!
//! Tests for: CastIntAsDuration, CastRealAsDuration, CastDecimalAsDuration,
//! CastStringAsDuration, CastTimeAsDuration, CastDurationAsDuration,
//! CastJsonAsDuration

use crate::common::{cast, ctx, datetime, dec, duration, strict_ctx, warning_codes};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use sqlcast_eval::{Constant, ConversionOutcome};
use sqlcast_types::{FieldType, SqlTypeTag};

// ============================================================================
// Test Helpers
// ============================================================================

fn time_tp(fsp: u8) -> FieldType {
    FieldType::new(SqlTypeTag::Time).with_decimal(fsp)
}

fn text_of(outcome: &ConversionOutcome) -> String {
    outcome.value.as_duration().expect("duration result").to_string()
}

// ============================================================================
// Integer Sources
// ============================================================================

#[rstest]
#[case(123045, "12:30:45")]
#[case(-123045, "-12:30:45")]
#[case(4530, "00:45:30")]
#[case(20230615123045, "12:30:45")]
fn test_int_to_duration(#[case] input: i64, #[case] expected: &str) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::int(input), time_tp(0)).unwrap();
    assert_eq!(text_of(&out), expected);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_int_out_of_range_is_null() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::int(8385960), time_tp(0)).unwrap();
    assert!(out.is_null());
    assert_eq!(warning_codes(&out), vec![1]);

    let out = cast(&mut ctx, Constant::int(9000000), time_tp(0)).unwrap();
    assert!(out.is_null());
    assert_eq!(warning_codes(&out), vec![1]);

    let out = cast(&mut ctx, Constant::int(-9000000), time_tp(0)).unwrap();
    assert!(out.is_null());

    let mut strict = strict_ctx();
    assert!(cast(&mut strict, Constant::int(8385960), time_tp(0)).is_err());
}

#[test]
fn test_int_bad_minutes_is_fatal() {
    let mut ctx = ctx();
    let err = cast(&mut ctx, Constant::int(1260), time_tp(0)).unwrap_err();
    assert_eq!(err.code().code(), 201);
}

// ============================================================================
// Real And Decimal Sources
// ============================================================================

#[rstest]
#[case(123000.5, 1, "12:30:00.5")]
#[case(123000.5, 0, "12:30:01")]
#[case(-59.0, 0, "-00:00:59")]
fn test_real_to_duration(#[case] input: f64, #[case] fsp: u8, #[case] expected: &str) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::real(input), time_tp(fsp)).unwrap();
    assert_eq!(text_of(&out), expected);
}

#[test]
fn test_decimal_to_duration() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::decimal(dec("10203.25")), time_tp(2)).unwrap();
    assert_eq!(text_of(&out), "01:02:03.25");
}

// ============================================================================
// String Sources
// ============================================================================

#[rstest]
#[case("12:30:45", 0, "12:30:45")]
#[case("1 02:00:00", 0, "26:00:00")]
#[case("-12:30", 0, "-12:30:00")]
#[case("123045.5", 1, "12:30:45.5")]
#[case("2023-06-15 12:30:45", 0, "12:30:45")]
fn test_string_to_duration(#[case] input: &str, #[case] fsp: u8, #[case] expected: &str) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string(input), time_tp(fsp)).unwrap();
    assert_eq!(text_of(&out), expected);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_string_garbage_is_null() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string("abc"), time_tp(0)).unwrap();
    assert!(out.is_null());
    assert_eq!(warning_codes(&out), vec![101]);

    let mut strict = strict_ctx();
    let err = cast(&mut strict, Constant::string("abc"), time_tp(0)).unwrap_err();
    assert_eq!(err.code().code(), 101);
}

#[rstest]
#[case("900:00:00", "838:59:59")]
#[case("1000:00:00", "838:59:59")]
#[case("-12345:00:00", "-838:59:59")]
fn test_string_out_of_range_clamps(#[case] input: &str, #[case] expected: &str) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string(input), time_tp(0)).unwrap();
    assert_eq!(text_of(&out), expected);
    assert_eq!(warning_codes(&out), vec![101]);
}

#[rstest]
#[case("abc 12:00:00")]
#[case("12x 01:00:00")]
fn test_string_bad_day_prefix_is_null(#[case] input: &str) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string(input), time_tp(0)).unwrap();
    assert!(out.is_null());
    assert_eq!(warning_codes(&out), vec![101]);
}

#[test]
fn test_empty_string_is_zero() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string(""), time_tp(0)).unwrap();
    assert_eq!(text_of(&out), "00:00:00");
    assert!(out.warnings.is_empty());
}

// ============================================================================
// Temporal And JSON Sources
// ============================================================================

#[test]
fn test_time_keeps_time_of_day() {
    let mut ctx = ctx();
    let src = Constant::time(datetime("2023-06-15 12:30:45.678", 3));
    let out = cast(&mut ctx, src, time_tp(1)).unwrap();
    assert_eq!(text_of(&out), "12:30:45.7");
}

#[test]
fn test_duration_rounds_to_target_fsp() {
    let mut ctx = ctx();
    let src = Constant::duration(duration("12:30:45.123456", 6));
    let out = cast(&mut ctx, src, time_tp(3)).unwrap();
    assert_eq!(text_of(&out), "12:30:45.123");
}

#[test]
fn test_json_to_duration() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::json(json!("12:00:00")), time_tp(0)).unwrap();
    assert_eq!(text_of(&out), "12:00:00");

    let out = cast(&mut ctx, Constant::json(json!([1])), time_tp(0)).unwrap();
    assert!(out.is_null());
    assert_eq!(warning_codes(&out), vec![101]);
}

#[test]
fn test_null_propagates() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::null(SqlTypeTag::Decimal), time_tp(0)).unwrap();
    assert!(out.is_null());
}
