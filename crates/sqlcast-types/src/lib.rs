//! SQL type model for CAST evaluation
//!
//! This crate defines:
//! - The seven evaluation classes and the concrete SQL type tags
//! - Declared field types and the two-phase cast target descriptor
//! - Runtime values, including DATETIME, TIME and JSON representations
//! - Number/text conversion primitives and precision producers shared by
//!   the cast routines

pub mod convert;
pub mod duration;
pub mod field_type;
pub mod json;
pub mod produce;
pub mod time;
pub mod type_system;
pub mod value;

pub use duration::{DurationParse, MAX_DURATION_MICROS, SqlDuration};
pub use field_type::{FieldType, TargetSpecDraft, TargetTypeSpec};
pub use time::SqlTime;
pub use type_system::*;
pub use value::{HybridValue, SqlValue, binary_literal_to_string, binary_literal_to_uint};
