//! CAST(... AS SIGNED/UNSIGNED)
//!
//! Results are 64-bit two's-complement bits; an unsigned target reads them as
//! `u64`.

use crate::context::EvaluationContext;
use crate::error::EvalResult;
use crate::function::CastFunction;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlcast_diagnostics::{CastError, DiagnosticsSink};
use sqlcast_types::LogicalType;
use sqlcast_types::convert::{convert_float_to_int, convert_float_to_uint, str_to_int, str_to_uint};
use sqlcast_types::json::json_to_int;

impl CastFunction {
    pub(crate) fn eval_as_int(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>> {
        match self.sig().source() {
            LogicalType::Integer => self.cast_int_as_int(ctx),
            LogicalType::Real => self.cast_real_as_int(ctx),
            LogicalType::Decimal => self.cast_decimal_as_int(ctx),
            LogicalType::String => self.cast_string_as_int(ctx),
            LogicalType::DateTime => self.cast_time_as_int(ctx),
            LogicalType::Duration => self.cast_duration_as_int(ctx),
            LogicalType::Json => self.cast_json_as_int(ctx),
        }
    }

    fn cast_int_as_int(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>> {
        self.arg().eval_int(ctx)
    }

    fn cast_real_as_int(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>> {
        let Some(val) = self.arg().eval_real(ctx)? else {
            return Ok(None);
        };
        let res = if self.spec().unsigned() {
            convert_float_to_uint(val, u64::MAX, ctx)? as i64
        } else {
            convert_float_to_int(val, i64::MIN, i64::MAX, ctx)?
        };
        Ok(Some(res))
    }

    fn cast_decimal_as_int(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>> {
        let Some(val) = self.arg().eval_decimal(ctx)? else {
            return Ok(None);
        };
        let unsigned = self.spec().unsigned();
        let rounded = val.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
        let converted = if unsigned {
            rounded.to_u64().map(|u| u as i64)
        } else {
            rounded.to_i64()
        };
        if let Some(res) = converted {
            return Ok(Some(res));
        }

        let type_name = if unsigned { "BIGINT UNSIGNED" } else { "BIGINT" };
        ctx.handle_overflow(
            CastError::overflow(type_name, rounded),
            CastError::truncated_wrong_value("DECIMAL", val),
        )?;
        Ok(Some(clamp_int(unsigned, rounded.is_sign_negative() && rounded != Decimal::ZERO)))
    }

    fn cast_string_as_int(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>> {
        let arg = self.arg();
        if arg.field_type().is_hybrid() || arg.is_binary_literal() {
            return arg.eval_int(ctx);
        }
        let Some(val) = arg.eval_string(ctx)? else {
            return Ok(None);
        };
        let val = val.trim();
        let unsigned = self.spec().unsigned();
        let negative = val.len() > 1 && val.starts_with('-');

        let parsed = if negative {
            let res = str_to_int(val, ctx);
            if res.is_ok() && unsigned {
                ctx.append_warning(CastError::CastNegIntAsUnsigned);
            }
            res
        } else {
            let res = str_to_uint(val, ctx).map(|u| u as i64);
            if matches!(res, Ok(v) if v < 0) && !unsigned {
                ctx.append_warning(CastError::CastAsSignedOverflow);
            }
            res
        };

        match parsed {
            Ok(res) => Ok(Some(res)),
            Err(err @ CastError::Overflow { .. }) if ctx.in_select() => {
                ctx.handle_overflow(err, CastError::truncated_wrong_value("INTEGER", val))?;
                Ok(Some(if negative { i64::MIN } else { u64::MAX as i64 }))
            }
            Err(err) => Err(err),
        }
    }

    fn cast_time_as_int(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>> {
        let Some(val) = self.arg().eval_time(ctx)? else {
            return Ok(None);
        };
        let num = val.round_frac(0)?.to_number();
        num.to_i64()
            .map(Some)
            .ok_or_else(|| CastError::overflow("BIGINT", num))
    }

    fn cast_duration_as_int(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>> {
        let Some(val) = self.arg().eval_duration(ctx)? else {
            return Ok(None);
        };
        let num = val.round_frac(0).to_number();
        num.to_i64()
            .map(Some)
            .ok_or_else(|| CastError::overflow("BIGINT", num))
    }

    fn cast_json_as_int(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>> {
        let Some(val) = self.arg().eval_json(ctx)? else {
            return Ok(None);
        };
        json_to_int(&val, self.spec().unsigned(), ctx).map(Some)
    }
}

/// Saturated bits for an out-of-range integer result
fn clamp_int(unsigned: bool, negative: bool) -> i64 {
    match (unsigned, negative) {
        (true, true) => 0,
        (true, false) => u64::MAX as i64,
        (false, true) => i64::MIN,
        (false, false) => i64::MAX,
    }
}
