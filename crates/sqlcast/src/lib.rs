//! SQL CAST type coercion engine
//!
//! This crate provides MySQL-compatible `CAST(expr AS type)` semantics:
//! - Seven evaluation classes (integer, real, decimal, string, datetime,
//!   duration, JSON) and the 49 conversion routines between them
//! - Stable per-routine opcodes for shipping casts to remote executors
//! - Statement-level diagnostics policy: clamp and warn in SELECT, fail in
//!   strict DML
//! - Wrapper helpers that coerce an operand into a class
//!
//! # Example
//!
//! ```ignore
//! use sqlcast::{Constant, EvaluationContext, Expression, build_cast_function};
//! use sqlcast::types::{FieldType, SqlTypeTag};
//! use std::sync::Arc;
//!
//! let mut ctx = EvaluationContext::new();
//! let target = FieldType::new(SqlTypeTag::Decimal).with_flen(5).with_decimal(2);
//! let cast = build_cast_function(&mut ctx, Arc::new(Constant::string("12.345")), target)?;
//! assert_eq!(cast.eval(&mut ctx)?.to_string(), "12.34");
//! ```

// Re-export all public APIs from internal crates
pub use sqlcast_diagnostics as diagnostics;
pub use sqlcast_eval as eval;
pub use sqlcast_types as types;

// Convenience re-exports
pub use sqlcast_diagnostics::{CastError, Diagnostic, DiagnosticsPolicy, Result};
pub use sqlcast_eval::{
    CastFunction, CastFunctionClass, CastSig, Column, Constant, ConversionOutcome, EvaluationContext,
    ExprRef, Expression, build_cast_function,
};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
