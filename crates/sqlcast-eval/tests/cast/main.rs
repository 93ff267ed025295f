//! Cast integration tests
//!
//! These tests verify cast behavior including:
//! - Conversion results for every source class into each target class
//! - NULL propagation through every routine
//! - Warning vs. error outcomes under lenient and strict policies
//! - Dispatch, opcodes and constant folding

mod as_duration;
mod as_int;
mod as_real;
mod as_string;
mod as_time;
mod dispatch;
mod properties;
