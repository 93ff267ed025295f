//! CAST(... AS DATE/DATETIME), also used for TIMESTAMP targets
//!
//! A DATE target drops the time of day whatever the source.

use crate::context::EvaluationContext;
use crate::error::EvalResult;
use crate::function::CastFunction;
use sqlcast_types::convert::format_float;
use sqlcast_types::json::json_unquote;
use sqlcast_types::{LogicalType, SqlTime, SqlTypeTag};

impl CastFunction {
    pub(crate) fn eval_as_time(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlTime>> {
        let arg = self.arg();
        let tp = self.spec().tp();
        let fsp = self.target_fsp();

        let res = match self.sig().source() {
            LogicalType::Integer => match arg.eval_int(ctx)? {
                Some(v) => SqlTime::parse_from_num(v, tp, fsp)?,
                None => return Ok(None),
            },
            LogicalType::Real => match arg.eval_real(ctx)? {
                Some(v) => SqlTime::parse(&format_float(v), tp, fsp)?,
                None => return Ok(None),
            },
            LogicalType::Decimal => match arg.eval_decimal(ctx)? {
                Some(v) => SqlTime::parse(&v.to_string(), tp, fsp)?,
                None => return Ok(None),
            },
            LogicalType::String => match arg.eval_string(ctx)? {
                Some(v) => SqlTime::parse(&v, tp, fsp)?,
                None => return Ok(None),
            },
            LogicalType::DateTime => match arg.eval_time(ctx)? {
                Some(v) => v.convert(tp)?.round_frac(fsp)?,
                None => return Ok(None),
            },
            LogicalType::Duration => match arg.eval_duration(ctx)? {
                Some(v) => v.to_time(ctx.current_date(), tp)?.round_frac(fsp)?,
                None => return Ok(None),
            },
            LogicalType::Json => match arg.eval_json(ctx)? {
                Some(v) => SqlTime::parse(&json_unquote(&v), tp, fsp)?,
                None => return Ok(None),
            },
        };
        Ok(Some(if tp == SqlTypeTag::Date {
            res.into_date()
        } else {
            res
        }))
    }
}
