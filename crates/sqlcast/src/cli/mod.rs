//! CLI functionality for the sqlcast tool
//!
//! - `cast`: evaluate one CAST over a command-line literal
//! - `matrix`: print the routine table
//! - `output`: shared formatting

pub mod cast;
pub mod matrix;
pub mod output;
