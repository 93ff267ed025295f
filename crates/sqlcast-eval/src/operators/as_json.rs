//! CAST(... AS JSON)

use crate::context::EvaluationContext;
use crate::error::EvalResult;
use crate::function::CastFunction;
use crate::operators::helpers::decimal_to_f64;
use serde_json::Value;
use sqlcast_types::json::{json_from_f64, parse_json};
use sqlcast_types::{LogicalType, MAX_FSP, SqlTypeTag};

impl CastFunction {
    pub(crate) fn eval_as_json(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Value>> {
        let arg = self.arg();
        match self.sig().source() {
            LogicalType::Integer => {
                let tp = arg.field_type();
                let (is_boolean, unsigned) = (tp.is_boolean, tp.unsigned);
                Ok(arg.eval_int(ctx)?.map(|v| {
                    if is_boolean {
                        Value::Bool(v != 0)
                    } else if unsigned {
                        Value::from(v as u64)
                    } else {
                        Value::from(v)
                    }
                }))
            }
            LogicalType::Real => Ok(arg.eval_real(ctx)?.map(json_from_f64)),
            LogicalType::Decimal => Ok(arg
                .eval_decimal(ctx)?
                .map(|d| json_from_f64(decimal_to_f64(d)))),
            LogicalType::String => self.cast_string_as_json(ctx),
            LogicalType::DateTime => Ok(arg.eval_time(ctx)?.map(|t| {
                let t = if t.tp() == SqlTypeTag::Date {
                    t
                } else {
                    t.with_fsp(MAX_FSP)
                };
                Value::String(t.to_string())
            })),
            LogicalType::Duration => Ok(arg
                .eval_duration(ctx)?
                .map(|d| Value::String(d.with_fsp(MAX_FSP).to_string()))),
            LogicalType::Json => arg.eval_json(ctx),
        }
    }

    fn cast_string_as_json(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Value>> {
        let Some(val) = self.arg().eval_string(ctx)? else {
            return Ok(None);
        };
        if self.spec().parse_to_json() {
            parse_json(&val).map(Some)
        } else {
            Ok(Some(Value::String(val)))
        }
    }
}
