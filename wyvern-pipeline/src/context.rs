//! Compilation context threaded through pipeline operations.

use wyvern_core::PipelineOptions;
use wyvern_diagnostics::DiagnosticStore;

/// State shared by every stage of a pipeline run.
///
/// Create one per independent run; two contexts never see each other's
/// diagnostics.
#[derive(Debug, Default)]
pub struct CompilationContext {
    /// Errors and warnings collected so far, and the error policy.
    pub diagnostics: DiagnosticStore,
}

impl CompilationContext {
    /// Create a new compilation context from pipeline options.
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            diagnostics: DiagnosticStore::new(options.stop_at_first_error),
        }
    }

    /// Check if any errors have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.error_count() > 0
    }

    /// Check if any warnings have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.warning_count() > 0
    }
}
