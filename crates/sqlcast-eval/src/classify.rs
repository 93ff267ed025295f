//! Source classification for cast dispatch

use sqlcast_types::{FieldType, LogicalType};

/// Evaluation class a cast reads its argument as.
///
/// Hybrid values (ENUM, SET, BIT) and raw binary literals carry both a
/// numeric and a textual view; which one the cast consumes depends on the
/// target class. Everything else is read as its declared class.
pub fn classify(declared: &FieldType, is_binary_literal: bool, target: LogicalType) -> LogicalType {
    let hybrid = declared.is_hybrid();
    match target {
        LogicalType::Integer if hybrid || is_binary_literal => LogicalType::Integer,
        LogicalType::Real | LogicalType::Decimal if is_binary_literal => target,
        LogicalType::Real | LogicalType::Decimal if hybrid => LogicalType::Integer,
        LogicalType::String if hybrid || is_binary_literal => LogicalType::String,
        _ => declared.eval_type(),
    }
}
