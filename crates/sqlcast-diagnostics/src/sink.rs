//! Statement policy and the warning sink consulted by conversion routines

use crate::{CastError, Diagnostic};
use serde::{Deserialize, Serialize};

/// Per-statement flags deciding whether a violation is a warning or fatal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiagnosticsPolicy {
    /// Lenient clamp context (SELECT)
    pub in_select: bool,
    /// Report overflow as a warning instead of failing
    pub overflow_as_warning: bool,
    /// Report truncation as a warning instead of failing
    pub truncate_as_warning: bool,
    /// Drop truncation silently
    pub ignore_truncate: bool,
}

impl DiagnosticsPolicy {
    /// SELECT context: clamp and warn
    pub const fn lenient() -> Self {
        Self {
            in_select: true,
            overflow_as_warning: true,
            truncate_as_warning: true,
            ignore_truncate: false,
        }
    }

    /// Strict DML context: every overflow and truncation aborts
    pub const fn strict() -> Self {
        Self {
            in_select: false,
            overflow_as_warning: false,
            truncate_as_warning: false,
            ignore_truncate: false,
        }
    }

    pub const fn with_in_select(mut self, in_select: bool) -> Self {
        self.in_select = in_select;
        self
    }

    pub const fn with_overflow_as_warning(mut self, value: bool) -> Self {
        self.overflow_as_warning = value;
        self
    }

    pub const fn with_truncate_as_warning(mut self, value: bool) -> Self {
        self.truncate_as_warning = value;
        self
    }

    pub const fn with_ignore_truncate(mut self, value: bool) -> Self {
        self.ignore_truncate = value;
        self
    }
}

impl Default for DiagnosticsPolicy {
    fn default() -> Self {
        Self::lenient()
    }
}

/// Receiver of conversion diagnostics.
///
/// Routines never decide warn-vs-fatal themselves: they hand every overflow
/// and truncation to [`handle_overflow`](Self::handle_overflow) or
/// [`handle_truncation`](Self::handle_truncation) and propagate what comes back.
pub trait DiagnosticsSink {
    /// Active statement policy
    fn policy(&self) -> &DiagnosticsPolicy;

    /// Record a warning
    fn append_warning(&mut self, err: CastError);

    /// Number of warnings recorded so far
    fn warning_count(&self) -> usize;

    fn in_select(&self) -> bool {
        self.policy().in_select
    }

    /// Apply the overflow policy. `warn` is the diagnostic recorded when the
    /// policy downgrades the overflow; `err` is returned otherwise.
    fn handle_overflow(&mut self, err: CastError, warn: CastError) -> Result<(), CastError> {
        if self.policy().overflow_as_warning {
            self.append_warning(warn);
            Ok(())
        } else {
            Err(err)
        }
    }

    /// Apply the truncation policy.
    fn handle_truncation(&mut self, err: CastError) -> Result<(), CastError> {
        let policy = *self.policy();
        if policy.ignore_truncate {
            Ok(())
        } else if policy.truncate_as_warning {
            self.append_warning(err);
            Ok(())
        } else {
            Err(err)
        }
    }
}

/// Warning accumulator owned by one statement execution
#[derive(Debug, Clone, Default)]
pub struct StatementDiagnostics {
    policy: DiagnosticsPolicy,
    warnings: Vec<Diagnostic>,
}

impl StatementDiagnostics {
    pub fn new(policy: DiagnosticsPolicy) -> Self {
        Self {
            policy,
            warnings: Vec::new(),
        }
    }

    /// Warnings recorded so far, oldest first
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Drain recorded warnings
    pub fn take_warnings(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.warnings)
    }

    pub fn set_policy(&mut self, policy: DiagnosticsPolicy) {
        self.policy = policy;
    }

    /// Discard warnings recorded after the first `len`
    pub fn truncate_warnings(&mut self, len: usize) {
        self.warnings.truncate(len);
    }
}

impl DiagnosticsSink for StatementDiagnostics {
    fn policy(&self) -> &DiagnosticsPolicy {
        &self.policy
    }

    fn append_warning(&mut self, err: CastError) {
        log::trace!("cast warning: {err}");
        self.warnings.push(err.to_warning());
    }

    fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}
