//! CAST(... AS DECIMAL(M,D))
//!
//! Every routine converts to a decimal first; the result is then fitted to
//! the declared precision and scale.

use crate::context::EvaluationContext;
use crate::error::EvalResult;
use crate::function::CastFunction;
use crate::operators::helpers::{float_to_decimal, str_to_decimal};
use rust_decimal::Decimal;
use sqlcast_types::LogicalType;
use sqlcast_types::json::json_to_float;
use sqlcast_types::produce::produce_dec_with_specified_tp;

impl CastFunction {
    pub(crate) fn eval_as_decimal(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Decimal>> {
        let res = match self.sig().source() {
            LogicalType::Integer => self.cast_int_as_decimal(ctx)?,
            LogicalType::Real => self.cast_real_as_decimal(ctx)?,
            LogicalType::Decimal => self.arg().eval_decimal(ctx)?,
            LogicalType::String => self.cast_string_as_decimal(ctx)?,
            LogicalType::DateTime => self.arg().eval_time(ctx)?.map(|t| t.to_number()),
            LogicalType::Duration => self.arg().eval_duration(ctx)?.map(|d| d.to_number()),
            LogicalType::Json => self.cast_json_as_decimal(ctx)?,
        };
        match res {
            Some(dec) => produce_dec_with_specified_tp(dec, self.spec().field_type(), ctx).map(Some),
            None => Ok(None),
        }
    }

    fn cast_int_as_decimal(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Decimal>> {
        let Some(val) = self.arg().eval_int(ctx)? else {
            return Ok(None);
        };
        Ok(Some(if self.source_unsigned() {
            Decimal::from(val as u64)
        } else {
            Decimal::from(val)
        }))
    }

    fn cast_real_as_decimal(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Decimal>> {
        let Some(val) = self.arg().eval_real(ctx)? else {
            return Ok(None);
        };
        float_to_decimal(val, ctx).map(Some)
    }

    fn cast_string_as_decimal(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Decimal>> {
        let arg = self.arg();
        if arg.is_binary_literal() {
            return arg.eval_decimal(ctx);
        }
        let Some(val) = arg.eval_string(ctx)? else {
            return Ok(None);
        };
        str_to_decimal(&val, ctx).map(Some)
    }

    fn cast_json_as_decimal(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Decimal>> {
        let Some(val) = self.arg().eval_json(ctx)? else {
            return Ok(None);
        };
        let f = json_to_float(&val, ctx)?;
        float_to_decimal(f, ctx).map(Some)
    }
}
