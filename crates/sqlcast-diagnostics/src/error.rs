//! Cast error types

use crate::{
    CAST0001, CAST0100, CAST0101, CAST0102, CAST0200, CAST0201, CAST0202, CAST0300, CAST0301,
    CAST0400, CAST0401, CAST0402, CAST0403, ErrorCode,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - the statement is aborted
    Error,
    /// Warning - recorded, evaluation continues
    Warning,
    /// Note - informational warning that never aborts
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message recorded during evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Create a new note diagnostic
    pub fn note(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Note,
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)
    }
}

/// Classification of a cast failure, independent of the statement policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Value exceeds the target range
    Overflow,
    /// Partial parse or precision/length loss
    Truncation,
    /// Unparsable text or JSON; always fatal
    Malformed,
    /// Informational condition that is only ever a warning
    Note,
    /// Unreachable pairing or arity mismatch; always fatal
    Internal,
}

/// Errors raised while converting between evaluation classes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
    /// Value out of range for the target type
    #[error("{type_name} value is out of range in '{value}'")]
    Overflow { type_name: String, value: String },

    /// Generic truncation (trailing garbage, dropped fractional digits)
    #[error("Data truncated")]
    Truncated,

    /// Truncation that carries the offending value
    #[error("Truncated incorrect {type_name} value: '{value}'")]
    TruncatedWrongValue { type_name: String, value: String },

    /// String longer than the declared display width
    #[error("Data too long, field len {flen}, data len {len}")]
    DataTooLong { flen: usize, len: usize },

    /// Unparsable date/time text or number
    #[error("Incorrect datetime value: '{value}'")]
    IncorrectDatetimeValue { value: String },

    /// Time components out of their valid range
    #[error("invalid time format: '{value}'")]
    InvalidTimeFormat { value: String },

    /// Unparsable JSON text
    #[error("Invalid JSON text: {message}")]
    InvalidJson { message: String },

    /// Negative integer reinterpreted as unsigned
    #[error("Cast to unsigned converted negative integer to it's positive complement")]
    CastNegIntAsUnsigned,

    /// Unsigned integer above i64::MAX reinterpreted as signed
    #[error("Cast to signed converted positive out-of-range integer to it's negative complement")]
    CastAsSignedOverflow,

    /// Wrong number of arguments handed to a cast builder
    #[error("Incorrect parameter count in the call to native function '{function}': expected {expected}, found {found}")]
    ArgumentCount {
        function: String,
        expected: usize,
        found: usize,
    },

    /// No routine registered for the pair
    #[error("Unsupported conversion from {from} to {to}")]
    UnsupportedConversion { from: String, to: String },

    /// An accessor was called for a class the expression does not produce
    #[error("Cannot evaluate {found} expression as {expected}")]
    AccessorMismatch { expected: String, found: String },

    /// Internal error (should not happen)
    #[error("Internal cast error: {message}")]
    Internal { message: String },
}

impl CastError {
    /// Create an overflow error
    pub fn overflow(type_name: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::Overflow {
            type_name: type_name.into(),
            value: value.to_string(),
        }
    }

    /// Create a truncated-wrong-value error
    pub fn truncated_wrong_value(type_name: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::TruncatedWrongValue {
            type_name: type_name.into(),
            value: value.to_string(),
        }
    }

    /// Create an incorrect datetime value error
    pub fn incorrect_datetime(value: impl fmt::Display) -> Self {
        Self::IncorrectDatetimeValue {
            value: value.to_string(),
        }
    }

    /// Create an invalid time format error
    pub fn invalid_time_format(value: impl fmt::Display) -> Self {
        Self::InvalidTimeFormat {
            value: value.to_string(),
        }
    }

    /// Create an invalid JSON error
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::InvalidJson {
            message: message.into(),
        }
    }

    /// Create an argument count error
    pub fn argument_count(function: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::ArgumentCount {
            function: function.into(),
            expected,
            found,
        }
    }

    /// Create an unsupported conversion error
    pub fn unsupported(from: impl fmt::Display, to: impl fmt::Display) -> Self {
        Self::UnsupportedConversion {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Create an accessor mismatch error
    pub fn accessor_mismatch(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        Self::AccessorMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Overflow { .. } => CAST0001,
            Self::Truncated => CAST0100,
            Self::TruncatedWrongValue { .. } => CAST0101,
            Self::DataTooLong { .. } => CAST0102,
            Self::IncorrectDatetimeValue { .. } => CAST0200,
            Self::InvalidTimeFormat { .. } => CAST0201,
            Self::InvalidJson { .. } => CAST0202,
            Self::CastNegIntAsUnsigned => CAST0300,
            Self::CastAsSignedOverflow => CAST0301,
            Self::Internal { .. } => CAST0400,
            Self::ArgumentCount { .. } => CAST0401,
            Self::UnsupportedConversion { .. } => CAST0402,
            Self::AccessorMismatch { .. } => CAST0403,
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        let code = self.code();
        if code.is_overflow() {
            ErrorKind::Overflow
        } else if code.is_truncation() {
            ErrorKind::Truncation
        } else if code.is_malformed() {
            ErrorKind::Malformed
        } else if code.is_note() {
            ErrorKind::Note
        } else {
            ErrorKind::Internal
        }
    }

    /// Whether no policy can downgrade this error to a warning
    pub fn is_always_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::Malformed | ErrorKind::Internal)
    }

    /// Convert to a warning diagnostic
    pub fn to_warning(&self) -> Diagnostic {
        let diag = match self.kind() {
            ErrorKind::Note => Diagnostic::note(self.code(), self.to_string()),
            _ => Diagnostic::warning(self.code(), self.to_string()),
        };
        match self.code().info().help {
            Some(help) => diag.with_help(help),
            None => diag,
        }
    }

    /// Convert to an error diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string());
        match self.code().info().help {
            Some(help) => diag.with_help(help),
            None => diag,
        }
    }
}
