//! Compiled cast expression node

use crate::context::EvaluationContext;
use crate::error::EvalResult;
use crate::expression::{ExprRef, Expression};
use crate::opcode::CastSig;
use rust_decimal::Decimal;
use serde_json::Value;
use smallvec::{SmallVec, smallvec};
use sqlcast_diagnostics::{CastError, Diagnostic, DiagnosticsSink};
use sqlcast_types::{
    DEFAULT_FSP, FieldType, LogicalType, MAX_FSP, SqlDuration, SqlTime, SqlValue, TargetSpecDraft,
    TargetTypeSpec,
};

/// Result of one cast evaluation: the value (possibly NULL) and the warnings
/// recorded while producing it
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    pub value: SqlValue,
    pub warnings: Vec<Diagnostic>,
}

impl ConversionOutcome {
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }
}

/// A cast bound to its argument, routine and frozen target spec.
///
/// Nodes are immutable; cloning shares the argument.
#[derive(Debug, Clone)]
pub struct CastFunction {
    sig: CastSig,
    spec: TargetTypeSpec,
    args: SmallVec<[ExprRef; 1]>,
}

impl CastFunction {
    pub(crate) fn new(sig: CastSig, spec: TargetTypeSpec, arg: ExprRef) -> Self {
        Self {
            sig,
            spec,
            args: smallvec![arg],
        }
    }

    /// Selected routine
    pub fn sig(&self) -> CastSig {
        self.sig
    }

    /// Frozen target spec
    pub fn spec(&self) -> &TargetTypeSpec {
        &self.spec
    }

    pub fn args(&self) -> &[ExprRef] {
        &self.args
    }

    pub(crate) fn arg(&self) -> &dyn Expression {
        self.args[0].as_ref()
    }

    /// Draft equivalent to this node's target, for rebuilding with
    /// adjusted flags
    pub fn to_draft(&self) -> TargetSpecDraft {
        self.spec.to_draft()
    }

    /// Evaluate for the current row and collect the warnings it produced
    pub fn evaluate(&self, ctx: &mut EvaluationContext) -> EvalResult<ConversionOutcome> {
        let before = ctx.warning_count();
        let value = self.eval(ctx)?;
        let warnings = ctx
            .warnings()
            .get(before..)
            .map(<[Diagnostic]>::to_vec)
            .unwrap_or_default();
        Ok(ConversionOutcome { value, warnings })
    }

    /// Target fsp; unspecified means 0
    pub(crate) fn target_fsp(&self) -> u8 {
        self.spec.decimal().unwrap_or(DEFAULT_FSP).min(MAX_FSP)
    }

    /// Whether the integer argument is read as unsigned bits
    pub(crate) fn source_unsigned(&self) -> bool {
        let tp = self.arg().field_type();
        tp.unsigned || tp.is_hybrid()
    }

    fn expect_target(&self, accessor: LogicalType) -> EvalResult<()> {
        if self.sig.target() == accessor {
            Ok(())
        } else {
            Err(CastError::accessor_mismatch(accessor, self.sig.target()))
        }
    }
}

impl Expression for CastFunction {
    fn field_type(&self) -> &FieldType {
        self.spec.field_type()
    }

    fn is_constant(&self) -> bool {
        self.args.iter().all(|arg| arg.is_constant())
    }

    fn eval_int(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>> {
        self.expect_target(LogicalType::Integer)?;
        self.eval_as_int(ctx)
    }

    fn eval_real(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>> {
        self.expect_target(LogicalType::Real)?;
        self.eval_as_real(ctx)
    }

    fn eval_decimal(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Decimal>> {
        self.expect_target(LogicalType::Decimal)?;
        self.eval_as_decimal(ctx)
    }

    fn eval_string(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<String>> {
        self.expect_target(LogicalType::String)?;
        self.eval_as_string(ctx)
    }

    fn eval_time(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlTime>> {
        self.expect_target(LogicalType::DateTime)?;
        self.eval_as_time(ctx)
    }

    fn eval_duration(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlDuration>> {
        self.expect_target(LogicalType::Duration)?;
        self.eval_as_duration(ctx)
    }

    fn eval_json(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Value>> {
        self.expect_target(LogicalType::Json)?;
        self.eval_as_json(ctx)
    }
}
