//! Routine selection, NULL propagation, nesting and constant folding

use crate::common::{cast, ctx};
use pretty_assertions::assert_eq;
use rstest::rstest;
use sqlcast_eval::{
    CastFunctionClass, CastSig, Column, Constant, DispatchCell, EvaluationContext, ExprRef,
    Expression, build_cast_function, dispatch_table,
};
use sqlcast_types::{FieldType, LogicalType, SqlTypeTag, SqlValue, TargetSpecDraft};
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

fn tag_for(class: LogicalType) -> SqlTypeTag {
    match class {
        LogicalType::Integer => SqlTypeTag::BigInt,
        LogicalType::Real => SqlTypeTag::Double,
        LogicalType::String => SqlTypeTag::VarString,
        LogicalType::Decimal => SqlTypeTag::Decimal,
        LogicalType::DateTime => SqlTypeTag::DateTime,
        LogicalType::Duration => SqlTypeTag::Time,
        LogicalType::Json => SqlTypeTag::Json,
    }
}

fn render_matrix() -> String {
    dispatch_table()
        .iter()
        .zip(LogicalType::ALL)
        .map(|(row, source)| {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    DispatchCell::Routine(sig) => format!("{:02}", sig.code()),
                    DispatchCell::Unsupported => "--".to_string(),
                })
                .collect();
            format!("{} {}", source.short_name(), cells.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Dispatch Table
// ============================================================================

#[test]
fn test_opcode_matrix() {
    insta::assert_snapshot!(render_matrix(), @r"
    Int 00 01 02 03 04 05 06
    Real 10 11 12 13 14 15 16
    String 20 21 22 23 24 25 26
    Decimal 30 31 32 33 34 35 36
    Time 40 41 42 43 44 45 46
    Duration 50 51 52 53 54 55 56
    Json 60 61 62 63 64 65 66
    ");
}

#[test]
fn test_every_routine_propagates_null() {
    let mut ctx = ctx();
    for sig in CastSig::ALL {
        let arg = Constant::null(tag_for(sig.source()));
        let class = CastFunctionClass::new(FieldType::new(tag_for(sig.target())));
        let arg: ExprRef = Arc::new(arg);
        let func = class.get_function(&[arg]).unwrap();
        assert_eq!(func.sig(), sig);

        let out = func.evaluate(&mut ctx).unwrap();
        assert!(out.is_null(), "{sig} produced {}", out.value);
        assert!(out.warnings.is_empty(), "{sig} warned on NULL");
    }
}

#[rstest]
#[case(Constant::hybrid(SqlTypeTag::Enum, 2, "b"), SqlTypeTag::Double, CastSig::IntAsReal)]
#[case(Constant::hybrid(SqlTypeTag::Enum, 2, "b"), SqlTypeTag::Json, CastSig::StringAsJson)]
#[case(Constant::binary_literal(vec![0x41u8]), SqlTypeTag::Decimal, CastSig::DecimalAsDecimal)]
#[case(Constant::binary_literal(vec![0x41u8]), SqlTypeTag::BigInt, CastSig::IntAsInt)]
#[case(Constant::string("1"), SqlTypeTag::Timestamp, CastSig::StringAsTime)]
fn test_routine_selection(#[case] arg: Constant, #[case] target: SqlTypeTag, #[case] expected: CastSig) {
    let arg: ExprRef = Arc::new(arg);
    let func = CastFunctionClass::new(FieldType::new(target))
        .get_function(&[arg])
        .unwrap();
    assert_eq!(func.sig(), expected);
}

#[test]
fn test_wrong_accessor_is_internal_error() {
    let mut ctx = ctx();
    let arg: ExprRef = Arc::new(Constant::int(1));
    let func = CastFunctionClass::new(FieldType::new(SqlTypeTag::Double))
        .get_function(&[arg])
        .unwrap();
    let err = func.eval_int(&mut ctx).unwrap_err();
    assert_eq!(err.code().code(), 403);
    assert!(err.is_always_fatal());
}

// ============================================================================
// Nesting And Rows
// ============================================================================

#[test]
fn test_nested_casts() {
    let mut ctx = ctx();
    let inner_tp = FieldType::new(SqlTypeTag::Decimal).with_flen(4).with_decimal(1);
    let inner: ExprRef = Arc::new(
        CastFunctionClass::new(inner_tp)
            .get_function(&[Arc::new(Constant::string("12.5")) as ExprRef])
            .unwrap(),
    );
    let outer = CastFunctionClass::new(FieldType::new(SqlTypeTag::BigInt))
        .get_function(&[inner])
        .unwrap();
    assert_eq!(outer.sig(), CastSig::DecimalAsInt);
    assert_eq!(outer.eval_int(&mut ctx).unwrap(), Some(12));
}

#[test]
fn test_column_reads_current_row() {
    let mut ctx = EvaluationContext::builder()
        .row(vec![SqlValue::string("3"), SqlValue::Null])
        .build();
    let first: ExprRef = Arc::new(Column::new(0, FieldType::new(SqlTypeTag::Varchar)));
    let second: ExprRef = Arc::new(Column::new(1, FieldType::new(SqlTypeTag::Varchar)));
    let class = CastFunctionClass::new(FieldType::new(SqlTypeTag::BigInt));

    let func = class.get_function(&[first]).unwrap();
    assert_eq!(func.eval_int(&mut ctx).unwrap(), Some(3));
    ctx.set_row(vec![SqlValue::string("4x"), SqlValue::Null]);
    assert_eq!(func.eval_int(&mut ctx).unwrap(), Some(4));
    assert_eq!(ctx.warnings().len(), 1);

    let func = class.get_function(&[second]).unwrap();
    assert_eq!(func.eval_int(&mut ctx).unwrap(), None);
}

// ============================================================================
// Construction Entry Point
// ============================================================================

#[test]
fn test_constant_argument_is_folded() {
    let mut ctx = ctx();
    let arg: ExprRef = Arc::new(Constant::string("12abc"));
    let folded = build_cast_function(&mut ctx, arg, FieldType::new(SqlTypeTag::BigInt)).unwrap();
    // warnings surface once, at build time
    assert_eq!(ctx.take_warnings().len(), 1);
    assert_eq!(folded.eval(&mut ctx).unwrap(), SqlValue::int(12));
    assert!(ctx.warnings().is_empty());
}

#[test]
fn test_strict_folding_failure_surfaces_at_evaluation() {
    let mut ctx = EvaluationContext::with_policy(sqlcast_diagnostics::DiagnosticsPolicy::strict());
    let arg: ExprRef = Arc::new(Constant::string("12abc"));
    let node = build_cast_function(&mut ctx, arg, FieldType::new(SqlTypeTag::BigInt)).unwrap();
    assert!(node.eval_int(&mut ctx).is_err());
}

#[test]
fn test_json_node_rebuilds_from_draft() {
    let mut ctx = ctx();
    let arg: ExprRef = Arc::new(Constant::string("[1, 2]"));
    let func = CastFunctionClass::new(FieldType::new(SqlTypeTag::Json))
        .get_function(&[arg.clone()])
        .unwrap();
    assert!(func.spec().parse_to_json());
    assert_eq!(func.eval_json(&mut ctx).unwrap(), Some(serde_json::json!([1, 2])));

    let draft: TargetSpecDraft = func.to_draft().with_parse_to_json(false);
    let rebuilt = CastFunctionClass::new(draft).get_function(&[arg]).unwrap();
    assert_eq!(
        rebuilt.eval_json(&mut ctx).unwrap(),
        Some(serde_json::json!("[1, 2]"))
    );
}

#[test]
fn test_outcome_collects_only_its_warnings() {
    let mut ctx = ctx();
    let first = cast(&mut ctx, Constant::string("1x"), FieldType::new(SqlTypeTag::BigInt)).unwrap();
    let second = cast(&mut ctx, Constant::string("2"), FieldType::new(SqlTypeTag::BigInt)).unwrap();
    assert_eq!(first.warnings.len(), 1);
    assert!(second.warnings.is_empty());
    assert_eq!(ctx.warnings().len(), 1);
}
