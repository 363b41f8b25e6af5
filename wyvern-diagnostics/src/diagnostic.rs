//! Diagnostic types.
//!
//! A [`Diagnostic`] records what went wrong, where in the transpiled source
//! it happened and which piece of transpiler code reported it.

use std::fmt;

use crate::{SourceLocation, render};

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A failure that stops the current input from being processed further.
    Error,
    /// A problem that doesn't stop processing but should be addressed.
    Warning,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// The transpiler code that reported a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrowSite {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl ThrowSite {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
        }
    }

    /// Build a throw site from the type path of an item nested in the
    /// reporting function, as produced by [`throw_site!`](crate::throw_site).
    pub fn from_type_path(file: &str, line: u32, type_path: &str) -> Self {
        let mut path = type_path.strip_suffix("::here").unwrap_or(type_path);
        while let Some(outer) = path.strip_suffix("::{{closure}}") {
            path = outer;
        }
        let function = path.rsplit("::").next().unwrap_or(path);
        Self::new(file, line, function)
    }

    /// File name without directories or extension (`src/decode.rs` -> `decode`).
    pub fn file_stem(&self) -> &str {
        let name = self.file.rsplit(['/', '\\']).next().unwrap_or(&self.file);
        name.split('.').next().unwrap_or(name)
    }
}

impl fmt::Display for ThrowSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} - {}", self.file_stem(), self.line, self.function)
    }
}

/// An error or warning produced while transpiling.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// One-line description of the problem.
    pub message: String,
    /// Free-form elaboration, printed after the throw site.
    pub details: String,
    /// Where in the transpiled source the problem is.
    pub location: Option<SourceLocation>,
    /// Which transpiler code reported the problem.
    pub thrown_by: ThrowSite,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>, thrown_by: ThrowSite) -> Self {
        Self::new(Severity::Error, message, thrown_by)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>, thrown_by: ThrowSite) -> Self {
        Self::new(Severity::Warning, message, thrown_by)
    }

    fn new(severity: Severity, message: impl Into<String>, thrown_by: ThrowSite) -> Self {
        Self {
            severity,
            message: message.into(),
            details: String::new(),
            location: None,
            thrown_by,
        }
    }

    /// Attach details to this diagnostic.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
