//! Cast error codes following a structured numbering system
//!
//! Error code ranges:
//! - CAST0001-CAST0099: Overflow (value outside the target range)
//! - CAST0100-CAST0199: Truncation (partial parse, precision or length loss)
//! - CAST0200-CAST0299: Malformed input (unparsable text or JSON)
//! - CAST0300-CAST0399: Notes (warnings that never become errors)
//! - CAST0400-CAST0499: Internal defects (planner or caller bugs)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    pub const fn is_overflow(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    pub const fn is_truncation(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    pub const fn is_malformed(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    pub const fn is_note(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    pub const fn is_internal(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CAST{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Overflow (0001-0099)
    map.insert(1, ErrorInfo::new("Value out of range")
        .with_help("Clamped to the range endpoint in SELECT context, rejected otherwise"));

    // Truncation (0100-0199)
    map.insert(100, ErrorInfo::new("Data truncated"));
    map.insert(101, ErrorInfo::new("Truncated incorrect value"));
    map.insert(102, ErrorInfo::new("Data too long"));

    // Malformed input (0200-0299)
    map.insert(200, ErrorInfo::new("Incorrect datetime value"));
    map.insert(201, ErrorInfo::new("Invalid time format"));
    map.insert(202, ErrorInfo::new("Invalid JSON text"));

    // Notes (0300-0399)
    map.insert(300, ErrorInfo::new("Negative integer cast to unsigned"));
    map.insert(301, ErrorInfo::new("Unsigned integer cast to signed overflow"));

    // Internal defects (0400-0499)
    map.insert(400, ErrorInfo::new("Internal error"));
    map.insert(401, ErrorInfo::new("Invalid argument count"));
    map.insert(402, ErrorInfo::new("Unsupported conversion")
        .with_help("The dispatch table has no routine for this source and target class"));
    map.insert(403, ErrorInfo::new("Accessor mismatch"));

    map
});

// Overflow
pub const CAST0001: ErrorCode = ErrorCode::new(1);

// Truncation
pub const CAST0100: ErrorCode = ErrorCode::new(100);
pub const CAST0101: ErrorCode = ErrorCode::new(101);
pub const CAST0102: ErrorCode = ErrorCode::new(102);

// Malformed input
pub const CAST0200: ErrorCode = ErrorCode::new(200);
pub const CAST0201: ErrorCode = ErrorCode::new(201);
pub const CAST0202: ErrorCode = ErrorCode::new(202);

// Notes
pub const CAST0300: ErrorCode = ErrorCode::new(300);
pub const CAST0301: ErrorCode = ErrorCode::new(301);

// Internal defects
pub const CAST0400: ErrorCode = ErrorCode::new(400);
pub const CAST0401: ErrorCode = ErrorCode::new(401);
pub const CAST0402: ErrorCode = ErrorCode::new(402);
pub const CAST0403: ErrorCode = ErrorCode::new(403);
