//! Diagnostics for the Wyvern transpiler.
//!
//! This crate owns everything the pipeline uses to report problems:
//!
//! - [`Diagnostic`] - an error or warning with optional source context
//! - [`Error`] - the classified failures a pipeline stage can produce
//! - [`DiagnosticStore`] - accumulates errors and warnings under the
//!   stop-at-first-error policy
//! - [`SummaryReport`] and [`FailureHistogram`] - human-readable reports
//!   rendered to an [`Output`]
//!
//! # Example
//!
//! ```
//! use wyvern_diagnostics::{Diagnostic, DiagnosticStore, Error, throw_site};
//!
//! let mut store = DiagnosticStore::new(false);
//! let diagnostic = Diagnostic::error("unsupported expression", throw_site!());
//! store.record_error(Error::translate("ClosureExpr", diagnostic)).unwrap();
//!
//! assert_eq!(store.error_count(), 1);
//! ```

mod diagnostic;
mod error;
mod location;
mod render;
mod report;
mod store;

pub use diagnostic::{Diagnostic, Severity, ThrowSite};
pub use error::{Classification, Error, FailureStage, Result};
pub use location::{SourceFile, SourceLocation, SourceRange, SourceText};
pub use render::{render, underline};
pub use report::{
    BufferedOutput, FailureHistogram, HistogramSection, Output, Report, SummaryReport,
    TerminalOutput,
};
pub use store::DiagnosticStore;

/// Capture the [`ThrowSite`] of the calling code: its file, line and
/// enclosing function.
#[macro_export]
macro_rules! throw_site {
    () => {{
        fn here() {}
        fn name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::ThrowSite::from_type_path(file!(), line!(), name_of(here))
    }};
}
