//! CAST(... AS DATE/DATETIME/TIMESTAMP) Tests
//!
//! Tests for: CastIntAsTime, CastRealAsTime, CastDecimalAsTime,
//! CastStringAsTime, CastTimeAsTime, CastDurationAsTime, CastJsonAsTime

use crate::common::{cast, ctx, datetime, dec, duration, strict_ctx};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use sqlcast_eval::{Constant, ConversionOutcome};
use sqlcast_types::{FieldType, SqlTypeTag};

// ============================================================================
// Test Helpers
// ============================================================================

fn datetime_tp(fsp: u8) -> FieldType {
    FieldType::new(SqlTypeTag::DateTime).with_decimal(fsp)
}

fn date_tp() -> FieldType {
    FieldType::new(SqlTypeTag::Date)
}

fn text_of(outcome: &ConversionOutcome) -> String {
    outcome.value.as_time().expect("time result").to_string()
}

// ============================================================================
// Numeric Sources
// ============================================================================

#[rstest]
#[case(20230615, "2023-06-15 00:00:00")]
#[case(230615, "2023-06-15 00:00:00")]
#[case(990615, "1999-06-15 00:00:00")]
#[case(230615123045, "2023-06-15 12:30:45")]
#[case(20230615123045, "2023-06-15 12:30:45")]
#[case(0, "0000-00-00 00:00:00")]
fn test_int_to_datetime(#[case] input: i64, #[case] expected: &str) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::int(input), datetime_tp(0)).unwrap();
    assert_eq!(text_of(&out), expected);
}

#[test]
fn test_int_bad_encoding_is_fatal() {
    let mut ctx = ctx();
    let err = cast(&mut ctx, Constant::int(1), datetime_tp(0)).unwrap_err();
    assert_eq!(err.code().code(), 201);
    assert!(err.is_always_fatal());
}

#[test]
fn test_real_and_decimal_to_datetime() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::real(20230615123045.0), datetime_tp(0)).unwrap();
    assert_eq!(text_of(&out), "2023-06-15 12:30:45");

    let out = cast(&mut ctx, Constant::decimal(dec("20230615123045.5")), datetime_tp(1)).unwrap();
    assert_eq!(text_of(&out), "2023-06-15 12:30:45.5");
}

// ============================================================================
// String Sources
// ============================================================================

#[rstest]
#[case("2023-06-15 12:30:45", 0, "2023-06-15 12:30:45")]
#[case("2023-06-15T12:30:45.123", 3, "2023-06-15 12:30:45.123")]
#[case("2023-12-31 23:59:59.6", 0, "2024-01-01 00:00:00")]
#[case("20230615", 0, "2023-06-15 00:00:00")]
fn test_string_to_datetime(#[case] input: &str, #[case] fsp: u8, #[case] expected: &str) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string(input), datetime_tp(fsp)).unwrap();
    assert_eq!(text_of(&out), expected);
}

#[test]
fn test_string_garbage_is_fatal_even_when_lenient() {
    let mut ctx = ctx();
    let err = cast(&mut ctx, Constant::string("garbage"), datetime_tp(0)).unwrap_err();
    assert_eq!(err.code().code(), 200);
    assert!(ctx.warnings().is_empty());
}

#[test]
fn test_date_target_drops_time_of_day() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::string("2023-06-15 12:30:45"), date_tp()).unwrap();
    assert_eq!(text_of(&out), "2023-06-15");
}

#[test]
fn test_timestamp_range() {
    let mut ctx = ctx();
    let tp = FieldType::new(SqlTypeTag::Timestamp);
    let out = cast(&mut ctx, Constant::string("2023-06-15 12:30:45"), tp.clone()).unwrap();
    assert_eq!(text_of(&out), "2023-06-15 12:30:45");

    assert!(cast(&mut ctx, Constant::string("1960-01-01 00:00:00"), tp).is_err());
}

// ============================================================================
// Temporal Sources
// ============================================================================

#[test]
fn test_time_rounds_to_target_fsp() {
    let mut ctx = ctx();
    let src = Constant::time(datetime("2023-06-15 12:30:45.678", 3));
    let out = cast(&mut ctx, src, datetime_tp(2)).unwrap();
    assert_eq!(text_of(&out), "2023-06-15 12:30:45.68");

    let src = Constant::time(datetime("2023-06-15 12:30:45.678", 3));
    let out = cast(&mut ctx, src, date_tp()).unwrap();
    assert_eq!(text_of(&out), "2023-06-15");
}

#[rstest]
#[case("12:30:00", "2024-01-15 12:30:00")]
#[case("-01:00:00", "2024-01-14 23:00:00")]
#[case("25:00:00", "2024-01-16 01:00:00")]
fn test_duration_anchors_on_current_date(#[case] input: &str, #[case] expected: &str) {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::duration(duration(input, 0)), datetime_tp(0)).unwrap();
    assert_eq!(text_of(&out), expected);
}

#[test]
fn test_duration_to_date() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::duration(duration("12:30:00", 0)), date_tp()).unwrap();
    assert_eq!(text_of(&out), "2024-01-15");
}

// ============================================================================
// JSON And NULL
// ============================================================================

#[test]
fn test_json_string_to_datetime() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::json(json!("2023-06-15 12:30:45")), datetime_tp(0)).unwrap();
    assert_eq!(text_of(&out), "2023-06-15 12:30:45");

    let mut strict = strict_ctx();
    assert!(cast(&mut strict, Constant::json(json!({"a": 1})), datetime_tp(0)).is_err());
}

#[test]
fn test_null_propagates() {
    let mut ctx = ctx();
    let out = cast(&mut ctx, Constant::null(SqlTypeTag::BigInt), datetime_tp(0)).unwrap();
    assert!(out.is_null());
}
