//! CAST(... AS CHAR/BINARY)

use crate::context::EvaluationContext;
use crate::error::EvalResult;
use crate::function::CastFunction;
use sqlcast_types::LogicalType;
use sqlcast_types::convert::format_float;
use sqlcast_types::json::json_to_string;
use sqlcast_types::produce::produce_str_with_specified_tp;

impl CastFunction {
    pub(crate) fn eval_as_string(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<String>> {
        let arg = self.arg();
        let res = match self.sig().source() {
            LogicalType::Integer => {
                let unsigned = self.source_unsigned();
                arg.eval_int(ctx)?.map(|v| {
                    if unsigned {
                        (v as u64).to_string()
                    } else {
                        v.to_string()
                    }
                })
            }
            LogicalType::Real => arg.eval_real(ctx)?.map(format_float),
            LogicalType::Decimal => arg.eval_decimal(ctx)?.map(|d| d.to_string()),
            LogicalType::String => arg.eval_string(ctx)?,
            LogicalType::DateTime => arg.eval_time(ctx)?.map(|t| t.to_string()),
            LogicalType::Duration => arg.eval_duration(ctx)?.map(|d| d.to_string()),
            LogicalType::Json => arg.eval_json(ctx)?.map(|j| json_to_string(&j)),
        };
        match res {
            Some(s) => produce_str_with_specified_tp(s, self.spec().field_type(), ctx).map(Some),
            None => Ok(None),
        }
    }
}
