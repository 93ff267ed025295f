//! Evaluation errors for the cast engine
//!
//! Conversion routines report failures as [`CastError`]; this module adds the
//! evaluation result alias and the helpers routines share when an operand
//! turns out to be of the wrong class.

use sqlcast_diagnostics::CastError;
use sqlcast_types::SqlValue;

pub use sqlcast_diagnostics::CastError as EvalError;

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Accessor called on a value of another class
pub(crate) fn mismatch(expected: &str, value: &SqlValue) -> EvalError {
    CastError::accessor_mismatch(expected, value.kind_name())
}
