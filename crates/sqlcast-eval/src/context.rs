//! Evaluation context for cast execution

use chrono::{Local, NaiveDate};
use sqlcast_diagnostics::{CastError, Diagnostic, DiagnosticsPolicy, DiagnosticsSink, StatementDiagnostics};
use sqlcast_types::SqlValue;

/// Per-statement state shared by every cast evaluated in it.
///
/// Owns the statement's diagnostics sink, the date that anchors TIME values
/// converted to DATETIME, and the row currently being evaluated.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    diagnostics: StatementDiagnostics,
    current_date: NaiveDate,
    row: Vec<SqlValue>,
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationContext {
    /// Lenient context anchored at today's local date
    pub fn new() -> Self {
        EvaluationContextBuilder::new().build()
    }

    /// Context with the given policy, anchored at today's local date
    pub fn with_policy(policy: DiagnosticsPolicy) -> Self {
        EvaluationContextBuilder::new().policy(policy).build()
    }

    pub fn builder() -> EvaluationContextBuilder {
        EvaluationContextBuilder::new()
    }

    /// Statement date used when a TIME value needs a calendar date
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn set_policy(&mut self, policy: DiagnosticsPolicy) {
        self.diagnostics.set_policy(policy);
    }

    /// Warnings recorded so far
    pub fn warnings(&self) -> &[Diagnostic] {
        self.diagnostics.warnings()
    }

    /// Drain recorded warnings
    pub fn take_warnings(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take_warnings()
    }

    /// Discard warnings recorded after the first `len`
    pub fn truncate_warnings(&mut self, len: usize) {
        self.diagnostics.truncate_warnings(len);
    }

    /// Replace the row column references read from
    pub fn set_row(&mut self, row: Vec<SqlValue>) {
        self.row = row;
    }

    /// Value of a column in the current row
    pub fn column(&self, index: usize) -> Option<&SqlValue> {
        self.row.get(index)
    }
}

impl DiagnosticsSink for EvaluationContext {
    fn policy(&self) -> &DiagnosticsPolicy {
        self.diagnostics.policy()
    }

    fn append_warning(&mut self, err: CastError) {
        self.diagnostics.append_warning(err);
    }

    fn warning_count(&self) -> usize {
        self.diagnostics.warning_count()
    }
}

/// Builder for [`EvaluationContext`]
#[derive(Debug, Clone, Default)]
pub struct EvaluationContextBuilder {
    policy: DiagnosticsPolicy,
    current_date: Option<NaiveDate>,
    row: Vec<SqlValue>,
}

impl EvaluationContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statement diagnostics policy
    pub fn policy(mut self, policy: DiagnosticsPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fix the statement date instead of reading the local clock
    pub fn current_date(mut self, date: NaiveDate) -> Self {
        self.current_date = Some(date);
        self
    }

    /// Initial row
    pub fn row(mut self, row: Vec<SqlValue>) -> Self {
        self.row = row;
        self
    }

    pub fn build(self) -> EvaluationContext {
        EvaluationContext {
            diagnostics: StatementDiagnostics::new(self.policy),
            current_date: self
                .current_date
                .unwrap_or_else(|| Local::now().date_naive()),
            row: self.row,
        }
    }
}
