//! CAST(... AS TIME)
//!
//! Every result carries the target fsp. Text-like sources (decimal, string,
//! JSON) yield NULL when parsing both truncated and produced zero.

use crate::context::EvaluationContext;
use crate::error::EvalResult;
use crate::function::CastFunction;
use crate::operators::helpers::duration_or_null;
use sqlcast_diagnostics::DiagnosticsSink;
use sqlcast_types::convert::format_float;
use sqlcast_types::json::json_unquote;
use sqlcast_types::{LogicalType, SqlDuration};

impl CastFunction {
    pub(crate) fn eval_as_duration(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlDuration>> {
        match self.sig().source() {
            LogicalType::Integer => self.cast_int_as_duration(ctx),
            LogicalType::Real => self.cast_real_as_duration(ctx),
            LogicalType::Decimal => self.cast_decimal_as_duration(ctx),
            LogicalType::String => self.cast_string_as_duration(ctx),
            LogicalType::DateTime => {
                let fsp = self.target_fsp();
                Ok(self
                    .arg()
                    .eval_time(ctx)?
                    .map(|t| t.to_duration().round_frac(fsp)))
            }
            LogicalType::Duration => {
                let fsp = self.target_fsp();
                Ok(self.arg().eval_duration(ctx)?.map(|d| d.round_frac(fsp)))
            }
            LogicalType::Json => self.cast_json_as_duration(ctx),
        }
    }

    fn cast_int_as_duration(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlDuration>> {
        let Some(val) = self.arg().eval_int(ctx)? else {
            return Ok(None);
        };
        let parsed = SqlDuration::from_number(val, self.target_fsp())?;
        match parsed.warning {
            // out of range: NULL once the overflow is accepted
            Some(warning) => {
                ctx.handle_overflow(warning.clone(), warning)?;
                Ok(None)
            }
            None => Ok(Some(parsed.value)),
        }
    }

    fn cast_real_as_duration(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlDuration>> {
        let Some(val) = self.arg().eval_real(ctx)? else {
            return Ok(None);
        };
        let parsed = SqlDuration::parse(&format_float(val), self.target_fsp());
        if let Some(warning) = parsed.warning {
            ctx.handle_truncation(warning)?;
        }
        Ok(Some(parsed.value))
    }

    fn cast_decimal_as_duration(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlDuration>> {
        let Some(val) = self.arg().eval_decimal(ctx)? else {
            return Ok(None);
        };
        duration_or_null(SqlDuration::parse(&val.to_string(), self.target_fsp()), ctx)
    }

    fn cast_string_as_duration(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlDuration>> {
        let Some(val) = self.arg().eval_string(ctx)? else {
            return Ok(None);
        };
        duration_or_null(SqlDuration::parse(&val, self.target_fsp()), ctx)
    }

    fn cast_json_as_duration(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlDuration>> {
        let Some(val) = self.arg().eval_json(ctx)? else {
            return Ok(None);
        };
        duration_or_null(SqlDuration::parse(&json_unquote(&val), self.target_fsp()), ctx)
    }
}
