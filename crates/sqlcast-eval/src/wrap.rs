//! Cast construction for callers that need an operand in a given class
//!
//! [`build_cast_function`] is the single entry point that turns a target type
//! and an argument into a cast node. The `wrap_with_cast_as_*` helpers derive
//! a default target from the argument and return the argument unchanged when
//! it already has the requested class.

use crate::context::EvaluationContext;
use crate::dispatch::CastFunctionClass;
use crate::error::EvalResult;
use crate::expression::{Constant, ExprRef, Expression};
use crate::function::CastFunction;
use sqlcast_diagnostics::DiagnosticsSink;
use sqlcast_types::{
    FieldType, JSON_DISPLAY_WIDTH, LogicalType, MAX_DATE_WIDTH, MAX_DATETIME_WIDTH_NO_FSP,
    MAX_DURATION_WIDTH_NO_FSP, MAX_FSP, MAX_REAL_WIDTH, SqlTypeTag, TargetSpecDraft,
};
use std::sync::Arc;

/// Display width of a BIGINT rendered as text
const MAX_INT_WIDTH: u32 = 20;

/// Build a cast of `expr` to `draft`, folding it when the argument is
/// constant.
///
/// JSON targets are never folded: their parse flag may still be adjusted
/// by rebuilding from [`CastFunction::to_draft`].
pub fn build_cast_function(
    ctx: &mut EvaluationContext,
    expr: ExprRef,
    draft: impl Into<TargetSpecDraft>,
) -> EvalResult<ExprRef> {
    let class = CastFunctionClass::new(draft);
    let func = class.get_function(&[expr])?;
    if class.target() == LogicalType::Json {
        return Ok(Arc::new(func));
    }
    Ok(fold_constant(ctx, func))
}

fn fold_constant(ctx: &mut EvaluationContext, func: CastFunction) -> ExprRef {
    if !func.is_constant() {
        return Arc::new(func);
    }
    let before = ctx.warning_count();
    match func.eval(ctx) {
        Ok(value) => {
            log::trace!("folded {} to {value}", func.sig());
            Arc::new(Constant::new(value, func.field_type().clone()))
        }
        Err(err) => {
            log::trace!("not folding {}: {err}", func.sig());
            // the kept node reports them again when evaluated
            ctx.truncate_warnings(before);
            Arc::new(func)
        }
    }
}

/// Cast to `BIGINT` unless already an integer
pub fn wrap_with_cast_as_int(ctx: &mut EvaluationContext, expr: ExprRef) -> EvalResult<ExprRef> {
    if expr.field_type().eval_type() == LogicalType::Integer {
        return Ok(expr);
    }
    let mut tp = FieldType::new(SqlTypeTag::BigInt).with_decimal(0);
    tp.flen = expr.field_type().flen;
    build_cast_function(ctx, expr, tp)
}

/// Cast to `DOUBLE` unless already a real
pub fn wrap_with_cast_as_real(ctx: &mut EvaluationContext, expr: ExprRef) -> EvalResult<ExprRef> {
    if expr.field_type().eval_type() == LogicalType::Real {
        return Ok(expr);
    }
    let tp = FieldType::new(SqlTypeTag::Double).with_flen(MAX_REAL_WIDTH);
    build_cast_function(ctx, expr, tp)
}

/// Cast to `DECIMAL` with the argument's width and no fixed scale
pub fn wrap_with_cast_as_decimal(ctx: &mut EvaluationContext, expr: ExprRef) -> EvalResult<ExprRef> {
    if expr.field_type().eval_type() == LogicalType::Decimal {
        return Ok(expr);
    }
    let mut tp = FieldType::new(SqlTypeTag::Decimal);
    tp.flen = expr.field_type().flen;
    build_cast_function(ctx, expr, tp)
}

/// Cast to a utf8 `VARCHAR` wide enough for the argument's text
pub fn wrap_with_cast_as_string(ctx: &mut EvaluationContext, expr: ExprRef) -> EvalResult<ExprRef> {
    let source = expr.field_type();
    if source.eval_type() == LogicalType::String {
        return Ok(expr);
    }
    let flen = match source.eval_type() {
        LogicalType::Integer => Some(MAX_INT_WIDTH),
        // sign and decimal point
        LogicalType::Decimal => source.flen.map(|flen| flen + 2),
        _ => source.flen,
    };
    let mut tp = FieldType::new(SqlTypeTag::VarString).with_utf8();
    tp.flen = flen;
    build_cast_function(ctx, expr, tp)
}

/// Cast to the temporal type `tp` (DATE, DATETIME or TIMESTAMP).
///
/// DATE and TIMESTAMP arguments already satisfy a DATETIME target.
pub fn wrap_with_cast_as_time(
    ctx: &mut EvaluationContext,
    expr: ExprRef,
    tp: FieldType,
) -> EvalResult<ExprRef> {
    let source = expr.field_type();
    if tp.tp == source.tp
        || (matches!(source.tp, SqlTypeTag::Date | SqlTypeTag::Timestamp) && tp.tp == SqlTypeTag::DateTime)
    {
        return Ok(expr);
    }
    let fsp = if source.tp.is_temporal() || source.tp == SqlTypeTag::Time {
        source.decimal.unwrap_or(0)
    } else {
        MAX_FSP
    };
    let mut tp = tp.with_decimal(fsp);
    tp.flen = match tp.tp {
        SqlTypeTag::Date => Some(MAX_DATE_WIDTH),
        SqlTypeTag::DateTime | SqlTypeTag::Timestamp => Some(with_fsp_width(MAX_DATETIME_WIDTH_NO_FSP, fsp)),
        _ => tp.flen,
    };
    build_cast_function(ctx, expr, tp)
}

/// Cast to `TIME` unless already a TIME
pub fn wrap_with_cast_as_duration(ctx: &mut EvaluationContext, expr: ExprRef) -> EvalResult<ExprRef> {
    let source = expr.field_type();
    if source.tp == SqlTypeTag::Time {
        return Ok(expr);
    }
    let fsp = if source.tp.is_temporal() {
        source.decimal.unwrap_or(0)
    } else {
        MAX_FSP
    };
    let tp = FieldType::new(SqlTypeTag::Time)
        .with_decimal(fsp)
        .with_flen(with_fsp_width(MAX_DURATION_WIDTH_NO_FSP, fsp));
    build_cast_function(ctx, expr, tp)
}

/// Cast to `JSON` unless already a JSON value that is not flagged for
/// parsing
pub fn wrap_with_cast_as_json(ctx: &mut EvaluationContext, expr: ExprRef) -> EvalResult<ExprRef> {
    let source = expr.field_type();
    if source.tp == SqlTypeTag::Json && !source.parse_to_json {
        return Ok(expr);
    }
    let mut tp = FieldType::new(SqlTypeTag::Json)
        .with_flen(JSON_DISPLAY_WIDTH)
        .with_decimal(0)
        .with_utf8();
    tp.binary = true;
    build_cast_function(ctx, expr, tp)
}

/// Wrap `expr` so it evaluates as `class`; DATETIME is the temporal default
pub fn ensure_type(ctx: &mut EvaluationContext, expr: ExprRef, class: LogicalType) -> EvalResult<ExprRef> {
    match class {
        LogicalType::Integer => wrap_with_cast_as_int(ctx, expr),
        LogicalType::Real => wrap_with_cast_as_real(ctx, expr),
        LogicalType::Decimal => wrap_with_cast_as_decimal(ctx, expr),
        LogicalType::String => wrap_with_cast_as_string(ctx, expr),
        LogicalType::DateTime => {
            wrap_with_cast_as_time(ctx, expr, FieldType::new(SqlTypeTag::DateTime))
        }
        LogicalType::Duration => wrap_with_cast_as_duration(ctx, expr),
        LogicalType::Json => wrap_with_cast_as_json(ctx, expr),
    }
}

fn with_fsp_width(base: u32, fsp: u8) -> u32 {
    if fsp > 0 { base + 1 + u32::from(fsp) } else { base }
}
