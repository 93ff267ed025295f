//! Cast routine implementations
//!
//! One module per target class; each adds the `eval_as_*` entry point of
//! that class to [`CastFunction`](crate::CastFunction) and implements the
//! seven routines converting into it:
//! - `as_int`: CAST(... AS SIGNED/UNSIGNED)
//! - `as_real`: CAST(... AS DOUBLE/FLOAT)
//! - `as_decimal`: CAST(... AS DECIMAL(M,D))
//! - `as_string`: CAST(... AS CHAR/BINARY)
//! - `as_time`: CAST(... AS DATE/DATETIME)
//! - `as_duration`: CAST(... AS TIME)
//! - `as_json`: CAST(... AS JSON)

pub mod as_decimal;
pub mod as_duration;
pub mod as_int;
pub mod as_json;
pub mod as_real;
pub mod as_string;
pub mod as_time;
pub mod helpers;

// Re-export helper functions
pub use helpers::*;
