//! Human-readable rendering of diagnostics.

use crate::{Diagnostic, SourceRange};

/// Render a diagnostic with its source context.
///
/// Without a location:
///
/// ```text
/// error: <message>
/// Thrown by <file>:<line> - <function>
/// <details>
/// ```
///
/// A location without a range prefixes the first line with `<path>: `. A
/// ranged location produces `<path>:<line>:<column>: ` instead and inserts the
/// offending source line and its underline before the throw site.
pub fn render(diagnostic: &Diagnostic) -> String {
    let severity = diagnostic.severity;
    let message = &diagnostic.message;
    let thrown_by = &diagnostic.thrown_by;
    let details = &diagnostic.details;

    let Some(location) = &diagnostic.location else {
        return format!("{severity}: {message}\nThrown by {thrown_by}\n{details}");
    };
    let path = location.display_path();

    let Some(range) = &location.range else {
        return format!("{path}: {severity}: {message}\nThrown by {thrown_by}\n{details}");
    };

    let source_line = location
        .file
        .line(range.line)
        .unwrap_or_else(|| format!("<<Unable to get line {} in file {}>>", range.line, path));
    let underline = underline(&source_line, range);

    format!(
        "{path}:{}:{}: {severity}: {message}\n{source_line}\n{underline}\nThrown by {thrown_by}\n{details}",
        range.line, range.column_start
    )
}

/// Build the caret-and-tilde marker for `range` under `source_line`.
///
/// Columns before the caret are spaces, except that tabs in the source line
/// are copied so the caret lines up however tabs are expanded. Returns an
/// empty string when `column_end` does not fall inside the line, or when
/// `column_start` is zero or past `column_end`.
pub fn underline(source_line: &str, range: &SourceRange) -> String {
    let chars: Vec<char> = source_line.chars().collect();
    if range.column_end >= chars.len()
        || range.column_start == 0
        || range.column_start > range.column_end
    {
        return String::new();
    }

    let mut marker = String::with_capacity(range.column_end);
    for column in 1..range.column_start {
        match chars.get(column - 1) {
            Some('\t') => marker.push('\t'),
            _ => marker.push(' '),
        }
    }
    marker.push('^');
    for _ in (range.column_start + 1)..range.column_end {
        marker.push('~');
    }
    marker
}
