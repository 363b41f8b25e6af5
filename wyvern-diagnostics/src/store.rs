//! Accumulated errors and warnings for one pipeline run.

use crate::{Diagnostic, Error, FailureHistogram, Result, SummaryReport};

/// Errors and warnings collected while a pipeline runs.
///
/// The store decides what a failure means for control flow. With
/// stop-at-first-error enabled, [`record_error`](Self::record_error) hands
/// the error straight back so the caller can abort; otherwise the error is
/// kept and the caller moves on to the next input.
#[derive(Debug, Default)]
pub struct DiagnosticStore {
    errors: Vec<Error>,
    warnings: Vec<Diagnostic>,
    stop_at_first_error: bool,
}

impl DiagnosticStore {
    /// Create an empty store with the given error policy.
    pub fn new(stop_at_first_error: bool) -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            stop_at_first_error,
        }
    }

    /// Whether failures propagate immediately instead of being recorded.
    pub fn stop_at_first_error(&self) -> bool {
        self.stop_at_first_error
    }

    /// Change the error policy for subsequent failures.
    pub fn set_stop_at_first_error(&mut self, value: bool) {
        self.stop_at_first_error = value;
    }

    /// Record a failure.
    ///
    /// # Errors
    ///
    /// Returns `error` unchanged, without storing it, when stop-at-first-error
    /// is enabled.
    pub fn record_error(&mut self, error: Error) -> Result<()> {
        if self.stop_at_first_error {
            return Err(error);
        }
        tracing::debug!(
            classification = ?error.classification(),
            "recorded error #{}",
            self.errors.len() + 1
        );
        self.errors.push(error);
        Ok(())
    }

    /// Record a warning. Warnings never affect control flow.
    pub fn record_warning(&mut self, warning: Diagnostic) {
        self.warnings.push(warning);
    }

    /// Forget every recorded error and warning.
    pub fn clear(&mut self) {
        self.errors.clear();
        self.warnings.clear();
    }

    /// Check if anything has been recorded.
    pub fn has_any(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    /// Recorded errors, in the order they were recorded.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Recorded warnings, in the order they were recorded.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Count the number of recorded errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Count the number of recorded warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Every error then every warning, followed by totals.
    pub fn summary(&self) -> SummaryReport<'_> {
        SummaryReport::new(self)
    }

    /// Error counts grouped by failing stage and node kind.
    pub fn failure_histogram(&self) -> FailureHistogram {
        FailureHistogram::from_store(self)
    }
}
