//! SQL CAST diagnostics and error handling
//!
//! This crate provides the error handling infrastructure for the cast engine,
//! including error codes, the statement policy and warning accumulation.

mod error;
mod error_code;
mod sink;

pub use error::*;
pub use error_code::*;
pub use sink::*;

/// Result type for cast operations
pub type Result<T> = std::result::Result<T, CastError>;
