//! Source positions referenced by diagnostics.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

/// A source file whose lines can be shown under a diagnostic.
pub trait SourceFile: fmt::Debug + Send + Sync {
    /// Path of the file as it should be displayed.
    fn path(&self) -> &Path;

    /// Text of the 1-based line `number`, without its line terminator.
    ///
    /// Returns `None` when the line does not exist.
    fn line(&self, number: usize) -> Option<String>;
}

/// An in-memory [`SourceFile`].
#[derive(Debug, Clone)]
pub struct SourceText {
    path: PathBuf,
    contents: String,
}

impl SourceText {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

impl SourceFile for SourceText {
    fn path(&self) -> &Path {
        &self.path
    }

    fn line(&self, number: usize) -> Option<String> {
        let index = number.checked_sub(1)?;
        self.contents.split('\n').nth(index).map(|line| {
            line.strip_suffix('\r').unwrap_or(line).to_string()
        })
    }
}

/// A line and column span, all 1-based. `column_end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRange {
    pub line: usize,
    pub column_start: usize,
    pub column_end: usize,
}

impl SourceRange {
    pub fn new(line: usize, column_start: usize, column_end: usize) -> Self {
        Self {
            line,
            column_start,
            column_end,
        }
    }
}

/// Where a diagnostic originated: a file, optionally narrowed to a range.
#[derive(Debug, Clone)]
pub struct SourceLocation {
    pub file: Arc<dyn SourceFile>,
    pub range: Option<SourceRange>,
}

impl SourceLocation {
    /// Point at a whole file.
    pub fn file(file: Arc<dyn SourceFile>) -> Self {
        Self { file, range: None }
    }

    /// Point at a range within a file.
    pub fn range(file: Arc<dyn SourceFile>, range: SourceRange) -> Self {
        Self {
            file,
            range: Some(range),
        }
    }

    /// The file path as shown in rendered diagnostics.
    pub fn display_path(&self) -> String {
        self.file.path().display().to_string()
    }
}
