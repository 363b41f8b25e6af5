//! Reports over a [`DiagnosticStore`] and the outputs they render to.
//!
//! Reports describe *what* to print; an [`Output`] decides *where* it goes.

use indexmap::IndexMap;

use crate::{DiagnosticStore, FailureStage};

/// Target output for reports.
pub trait Output {
    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render a bullet list item.
    fn list_item(&mut self, text: &str);

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str);

    /// Render a blank line.
    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output implementation.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn list_item(&mut self, text: &str) {
        println!("- {}", text);
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Output that keeps every printed line in memory.
#[derive(Debug, Default)]
pub struct BufferedOutput {
    lines: Vec<String>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything printed so far, one entry per call.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Everything printed so far, joined with newlines.
    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }
}

impl Output for BufferedOutput {
    fn section(&mut self, name: &str) {
        self.lines.push(format!("{}:", name));
    }

    fn list_item(&mut self, text: &str) {
        self.lines.push(format!("- {}", text));
    }

    fn preformatted(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn newline(&mut self) {
        self.lines.push(String::new());
    }
}

/// Every recorded error, then every warning, then totals.
///
/// Renders nothing when the store is empty.
pub struct SummaryReport<'a> {
    store: &'a DiagnosticStore,
}

impl<'a> SummaryReport<'a> {
    pub fn new(store: &'a DiagnosticStore) -> Self {
        Self { store }
    }
}

impl Report for SummaryReport<'_> {
    fn render(&self, out: &mut dyn Output) {
        if !self.store.has_any() {
            return;
        }

        if !self.store.errors().is_empty() {
            out.section("Errors");
            for error in self.store.errors() {
                out.preformatted(&error.to_diagnostic().to_string());
            }
        }

        if !self.store.warnings().is_empty() {
            out.section("Warnings");
            for warning in self.store.warnings() {
                out.preformatted(&warning.to_string());
            }
        }

        out.preformatted(&format!(
            "Total: {} errors and {} warnings.",
            self.store.error_count(),
            self.store.warning_count()
        ));
    }
}

/// Failure counts for one stage, most frequent node kind first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramSection {
    pub stage: FailureStage,
    pub counts: Vec<(String, usize)>,
}

/// Recorded errors grouped by the stage and node kind that failed.
///
/// Shows which constructs most often block a transpilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureHistogram {
    pub error_count: usize,
    pub warning_count: usize,
    /// One section per failing stage, in pipeline order.
    pub sections: Vec<HistogramSection>,
}

impl FailureHistogram {
    pub fn from_store(store: &DiagnosticStore) -> Self {
        let mut groups: IndexMap<FailureStage, IndexMap<&str, usize>> = IndexMap::new();
        for error in store.errors() {
            if let Some(class) = error.classification() {
                *groups
                    .entry(class.stage)
                    .or_default()
                    .entry(class.node_kind)
                    .or_insert(0) += 1;
            }
        }
        groups.sort_keys();

        let sections = groups
            .into_iter()
            .map(|(stage, kinds)| {
                let mut counts: Vec<(String, usize)> = kinds
                    .into_iter()
                    .map(|(kind, count)| (kind.to_string(), count))
                    .collect();
                // stable: ties keep first-seen order
                counts.sort_by(|a, b| b.1.cmp(&a.1));
                HistogramSection { stage, counts }
            })
            .collect();

        Self {
            error_count: store.error_count(),
            warning_count: store.warning_count(),
            sections,
        }
    }

    /// Counts for one stage, if any of its errors were recorded.
    pub fn section(&self, stage: FailureStage) -> Option<&HistogramSection> {
        self.sections.iter().find(|s| s.stage == stage)
    }
}

impl Report for FailureHistogram {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!(
            "Errors: {}. Warnings: {}.",
            self.error_count, self.warning_count
        ));

        for section in &self.sections {
            out.section(&section.stage.heading());
            for (kind, count) in &section.counts {
                out.list_item(&format!("{} {}s", count, kind));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::{Diagnostic, Error, ThrowSite};

    fn site() -> ThrowSite {
        ThrowSite::new("src/translator.rs", 20, "translate")
    }

    fn translate_error(kind: &str) -> Error {
        Error::translate(kind, Diagnostic::error(format!("unsupported {kind}"), site()))
    }

    fn rendered(report: &dyn Report) -> String {
        let mut out = BufferedOutput::new();
        report.render(&mut out);
        out.contents()
    }

    #[test]
    fn test_summary_empty_store_renders_nothing() {
        let store = DiagnosticStore::new(false);
        assert_eq!(rendered(&store.summary()), "");
    }

    #[test]
    fn test_summary_lists_errors_then_warnings() {
        let mut store = DiagnosticStore::new(false);
        store.record_warning(Diagnostic::warning("shadowed variable", site()));
        store.record_error(translate_error("IfExpr")).unwrap();

        insta::assert_snapshot!(rendered(&store.summary()), @r"
        Errors:
        error: unsupported IfExpr
        Thrown by translator:20 - translate

        Warnings:
        warning: shadowed variable
        Thrown by translator:20 - translate

        Total: 1 errors and 1 warnings.
        ");
    }

    #[test]
    fn test_summary_renders_unclassified_errors_with_cause() {
        let mut store = DiagnosticStore::new(false);
        store
            .record_error(Error::read(
                "missing.dump",
                io::Error::from(io::ErrorKind::NotFound),
                ThrowSite::new("src/stages.rs", 26, "read_file"),
            ))
            .unwrap();

        insta::assert_snapshot!(rendered(&store.summary()), @r"
        Errors:
        error: failed to read 'missing.dump'
        Thrown by stages:26 - read_file
        caused by: entity not found
        Total: 1 errors and 0 warnings.
        ");
    }

    #[test]
    fn test_terminal_output_accepts_reports() {
        let mut store = DiagnosticStore::new(false);
        store.record_error(translate_error("IfExpr")).unwrap();

        let mut out = TerminalOutput::new();
        store.summary().render(&mut out);
        store.failure_histogram().render(&mut out);
        out.newline();
    }

    #[test]
    fn test_histogram_sorted_by_count_with_stable_ties() {
        let mut store = DiagnosticStore::new(false);
        for kind in ["Closure", "Switch", "Closure", "Tuple", "Switch", "Closure"] {
            store.record_error(translate_error(kind)).unwrap();
        }
        store.record_error(translate_error("Defer")).unwrap();
        store.record_error(translate_error("Guard")).unwrap();

        let histogram = store.failure_histogram();
        let section = histogram.section(FailureStage::TreeTranslator).unwrap();
        let kinds: Vec<&str> = section.counts.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(kinds, ["Closure", "Switch", "Tuple", "Defer", "Guard"]);
        assert_eq!(section.counts[0].1, 3);
    }

    #[test]
    fn test_histogram_sections_follow_pipeline_order() {
        let mut store = DiagnosticStore::new(false);
        store
            .record_error(Error::generate(
                "Subscript",
                Diagnostic::error("no mapping", site()),
            ))
            .unwrap();
        store
            .record_error(Error::decode("Foo", Diagnostic::error("bad dump", site())))
            .unwrap();
        store.record_warning(Diagnostic::warning("w", site()));

        insta::assert_snapshot!(rendered(&store.failure_histogram()), @r"
        Errors: 2. Warnings: 1.
        AST dump decoder failed to decode:
        - 1 Foos
        Code generator failed to translate:
        - 1 Subscripts
        ");
    }
}
