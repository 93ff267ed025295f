//! Cast dispatch: routine selection for a (source class, target class) pair
//!
//! The routine table is an explicit 7×7 grid built once. Every cell is
//! populated on purpose; a pair that must never be reached would be marked
//! [`DispatchCell::Unsupported`] and selecting it is an internal defect,
//! never a silent fallback.

use crate::classify::classify;
use crate::error::EvalResult;
use crate::expression::ExprRef;
use crate::function::CastFunction;
use crate::opcode::CastSig;
use sqlcast_diagnostics::CastError;
use sqlcast_types::{LogicalType, TargetSpecDraft};
use std::sync::LazyLock;

/// One cell of the routine table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchCell {
    /// The pair is handled by this routine
    Routine(CastSig),
    /// The pair has no routine
    Unsupported,
}

/// Routine table indexed `[source][target]` in class order
pub type DispatchTable = [[DispatchCell; 7]; 7];

static DISPATCH_TABLE: LazyLock<DispatchTable> = LazyLock::new(|| {
    use CastSig::*;
    use DispatchCell::Routine;
    [
        [
            Routine(IntAsInt),
            Routine(IntAsReal),
            Routine(IntAsString),
            Routine(IntAsDecimal),
            Routine(IntAsTime),
            Routine(IntAsDuration),
            Routine(IntAsJson),
        ],
        [
            Routine(RealAsInt),
            Routine(RealAsReal),
            Routine(RealAsString),
            Routine(RealAsDecimal),
            Routine(RealAsTime),
            Routine(RealAsDuration),
            Routine(RealAsJson),
        ],
        [
            Routine(StringAsInt),
            Routine(StringAsReal),
            Routine(StringAsString),
            Routine(StringAsDecimal),
            Routine(StringAsTime),
            Routine(StringAsDuration),
            Routine(StringAsJson),
        ],
        [
            Routine(DecimalAsInt),
            Routine(DecimalAsReal),
            Routine(DecimalAsString),
            Routine(DecimalAsDecimal),
            Routine(DecimalAsTime),
            Routine(DecimalAsDuration),
            Routine(DecimalAsJson),
        ],
        [
            Routine(TimeAsInt),
            Routine(TimeAsReal),
            Routine(TimeAsString),
            Routine(TimeAsDecimal),
            Routine(TimeAsTime),
            Routine(TimeAsDuration),
            Routine(TimeAsJson),
        ],
        [
            Routine(DurationAsInt),
            Routine(DurationAsReal),
            Routine(DurationAsString),
            Routine(DurationAsDecimal),
            Routine(DurationAsTime),
            Routine(DurationAsDuration),
            Routine(DurationAsJson),
        ],
        [
            Routine(JsonAsInt),
            Routine(JsonAsReal),
            Routine(JsonAsString),
            Routine(JsonAsDecimal),
            Routine(JsonAsTime),
            Routine(JsonAsDuration),
            Routine(JsonAsJson),
        ],
    ]
});

/// The routine table
pub fn dispatch_table() -> &'static DispatchTable {
    &DISPATCH_TABLE
}

/// Routine for a pair of classes
pub fn lookup(source: LogicalType, target: LogicalType) -> EvalResult<CastSig> {
    match DISPATCH_TABLE[source.index()][target.index()] {
        DispatchCell::Routine(sig) => Ok(sig),
        DispatchCell::Unsupported => {
            log::warn!("no cast routine for {source} -> {target}");
            Err(CastError::unsupported(source, target))
        }
    }
}

/// Builder of cast functions for one target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastFunctionClass {
    draft: TargetSpecDraft,
}

impl CastFunctionClass {
    pub fn new(draft: impl Into<TargetSpecDraft>) -> Self {
        Self {
            draft: draft.into(),
        }
    }

    /// Target class every function built here produces
    pub fn target(&self) -> LogicalType {
        self.draft.field_type().eval_type()
    }

    /// Select the routine for `args` and freeze the target spec.
    ///
    /// A String source cast to JSON parses its text unless the draft says
    /// otherwise.
    pub fn get_function(&self, args: &[ExprRef]) -> EvalResult<CastFunction> {
        let [arg] = args else {
            return Err(CastError::argument_count("cast", 1, args.len()));
        };
        let target = self.target();
        let source = classify(arg.field_type(), arg.is_binary_literal(), target);
        let sig = lookup(source, target)?;

        let draft = if sig == CastSig::StringAsJson {
            self.draft.clone().resolve_parse_to_json(true)
        } else {
            self.draft.clone()
        };
        let spec = draft.freeze();
        log::debug!(
            "cast {} as {}: {sig} (opcode {})",
            arg.field_type(),
            spec.field_type(),
            sig.code()
        );
        Ok(CastFunction::new(sig, spec, arg.clone()))
    }
}
