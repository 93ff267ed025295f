//! SQL CAST Evaluation Engine
//!
//! This crate turns `CAST(expr AS type)` into an executable node and runs it
//! against typed values. It implements:
//!
//! - **Classification**: hybrid (ENUM/SET/BIT) and binary literal arguments
//!   are read through their numeric or textual view depending on the target
//! - **Dispatch**: an explicit 7×7 routine table over the evaluation classes,
//!   each routine tagged with a stable compatibility opcode
//! - **Conversion Routines**: the 49 source/target routines with MySQL
//!   rounding, saturation and truncation rules
//! - **Wrapper Helpers**: default targets for coercing operands into a class
//! - **Constant Folding**: casts over constants evaluate once at build time
//!
//! # Example
//!
//! ```ignore
//! use sqlcast_eval::{Constant, EvaluationContext, build_cast_function};
//! use sqlcast_types::{FieldType, SqlTypeTag};
//! use std::sync::Arc;
//!
//! let mut ctx = EvaluationContext::new();
//! let target = FieldType::new(SqlTypeTag::BigInt);
//! let cast = build_cast_function(&mut ctx, Arc::new(Constant::string("42abc")), target)?;
//! assert_eq!(cast.eval_int(&mut ctx)?, Some(42));
//! assert_eq!(ctx.warnings().len(), 1);
//! ```
//!
//! # Architecture
//!
//! The evaluation engine consists of:
//!
//! - `CastFunctionClass`: selects the routine for an argument and freezes the
//!   target spec
//! - `CastFunction`: the compiled node; implements [`Expression`] so casts nest
//! - `EvaluationContext`: per-statement diagnostics policy, warnings, current
//!   date and row
//! - `operators`: the routines, one module per target class
//!
//! # Diagnostics
//!
//! Routines never decide whether a violation is a warning or an error. Every
//! overflow and truncation goes through the context's
//! [`DiagnosticsSink`](sqlcast_diagnostics::DiagnosticsSink), which applies
//! the statement policy:
//!
//! - Lenient (SELECT): clamp or truncate and record a warning
//! - Strict (DML): abort with the error
//! - Malformed input (bad dates, bad JSON) and internal defects always abort

pub mod classify;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod expression;
pub mod function;
pub mod opcode;
pub mod operators;
pub mod wrap;

// Re-export main types
pub use classify::classify;
pub use context::{EvaluationContext, EvaluationContextBuilder};
pub use dispatch::{CastFunctionClass, DispatchCell, DispatchTable, dispatch_table, lookup};
pub use error::{EvalError, EvalResult};
pub use expression::{Column, Constant, ExprRef, Expression};
pub use function::{CastFunction, ConversionOutcome};
pub use opcode::CastSig;
pub use wrap::{
    build_cast_function, ensure_type, wrap_with_cast_as_decimal, wrap_with_cast_as_duration,
    wrap_with_cast_as_int, wrap_with_cast_as_json, wrap_with_cast_as_real, wrap_with_cast_as_string,
    wrap_with_cast_as_time,
};
