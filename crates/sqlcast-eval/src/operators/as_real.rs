//! CAST(... AS DOUBLE/FLOAT)

use crate::context::EvaluationContext;
use crate::error::EvalResult;
use crate::function::CastFunction;
use crate::operators::helpers::decimal_to_f64;
use sqlcast_types::LogicalType;
use sqlcast_types::convert::str_to_float;
use sqlcast_types::json::json_to_float;
use sqlcast_types::produce::produce_float_with_specified_tp;

impl CastFunction {
    pub(crate) fn eval_as_real(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>> {
        match self.sig().source() {
            LogicalType::Integer => self.cast_int_as_real(ctx),
            LogicalType::Real => self.cast_real_as_real(ctx),
            LogicalType::Decimal => self.cast_decimal_as_real(ctx),
            LogicalType::String => self.cast_string_as_real(ctx),
            LogicalType::DateTime => self.cast_time_as_real(ctx),
            LogicalType::Duration => self.cast_duration_as_real(ctx),
            LogicalType::Json => self.cast_json_as_real(ctx),
        }
    }

    fn cast_int_as_real(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>> {
        let Some(val) = self.arg().eval_int(ctx)? else {
            return Ok(None);
        };
        Ok(Some(if self.source_unsigned() {
            val as u64 as f64
        } else {
            val as f64
        }))
    }

    fn cast_real_as_real(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>> {
        self.arg().eval_real(ctx)
    }

    fn cast_decimal_as_real(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>> {
        Ok(self.arg().eval_decimal(ctx)?.map(decimal_to_f64))
    }

    fn cast_string_as_real(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>> {
        let arg = self.arg();
        if arg.is_binary_literal() {
            return arg.eval_real(ctx);
        }
        let Some(val) = arg.eval_string(ctx)? else {
            return Ok(None);
        };
        let res = str_to_float(&val, ctx)?;
        produce_float_with_specified_tp(res, self.spec().field_type(), ctx).map(Some)
    }

    fn cast_time_as_real(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>> {
        Ok(self
            .arg()
            .eval_time(ctx)?
            .map(|t| decimal_to_f64(t.to_number())))
    }

    fn cast_duration_as_real(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>> {
        Ok(self
            .arg()
            .eval_duration(ctx)?
            .map(|d| decimal_to_f64(d.to_number())))
    }

    fn cast_json_as_real(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>> {
        let Some(val) = self.arg().eval_json(ctx)? else {
            return Ok(None);
        };
        json_to_float(&val, ctx).map(Some)
    }
}
