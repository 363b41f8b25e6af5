use std::{borrow::Cow, error::Error as _, fmt, path::PathBuf};

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::{Diagnostic, ThrowSite};

/// Result type for pipeline stages.
pub type Result<T> = std::result::Result<T, Error>;

/// The stage whose collaborator failed, for grouping failure statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureStage {
    /// Turning an AST dump into a decoded tree.
    Decoder,
    /// Translating a decoded tree into the intermediate tree.
    TreeTranslator,
    /// Generating target-language source from a transformed tree.
    CodeGenerator,
}

impl FailureStage {
    fn verb(&self) -> &'static str {
        match self {
            FailureStage::Decoder => "decode",
            FailureStage::TreeTranslator | FailureStage::CodeGenerator => "translate",
        }
    }

    /// Heading used for this stage in the failure histogram.
    pub fn heading(&self) -> String {
        format!("{} failed to {}", self, self.verb())
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Decoder => write!(f, "AST dump decoder"),
            FailureStage::TreeTranslator => write!(f, "Tree translator"),
            FailureStage::CodeGenerator => write!(f, "Code generator"),
        }
    }
}

/// The stage and node kind a failure is counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    pub stage: FailureStage,
    pub node_kind: &'a str,
}

/// A failure reported by one of the pipeline stages.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum Error {
    #[error("failed to {action} '{path}'")]
    #[diagnostic(code(wyvern::io))]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
        thrown_by: ThrowSite,
    },

    #[error("{diagnostic}")]
    #[diagnostic(code(wyvern::decode))]
    Decode {
        node_kind: String,
        diagnostic: Diagnostic,
    },

    #[error("{diagnostic}")]
    #[diagnostic(code(wyvern::translate))]
    Translate {
        node_kind: String,
        diagnostic: Diagnostic,
    },

    #[error("{diagnostic}")]
    #[diagnostic(code(wyvern::generate))]
    Generate {
        node_kind: String,
        diagnostic: Diagnostic,
    },

    #[error("failed to refresh library definitions")]
    #[diagnostic(
        code(wyvern::library),
        help("check that the library template directory is readable and writable")
    )]
    LibraryRefresh {
        #[source]
        source: std::io::Error,
        thrown_by: ThrowSite,
    },
}

impl Error {
    /// A file could not be read.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error, thrown_by: ThrowSite) -> Self {
        Error::Io {
            action: "read",
            path: path.into(),
            source,
            thrown_by,
        }
    }

    /// A file could not be written.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error, thrown_by: ThrowSite) -> Self {
        Error::Io {
            action: "write",
            path: path.into(),
            source,
            thrown_by,
        }
    }

    /// The auxiliary library definitions could not be regenerated.
    pub fn library_refresh(source: std::io::Error, thrown_by: ThrowSite) -> Self {
        Error::LibraryRefresh { source, thrown_by }
    }

    /// The decoder could not handle a node of kind `node_kind`.
    pub fn decode(node_kind: impl Into<String>, diagnostic: Diagnostic) -> Self {
        Error::Decode {
            node_kind: node_kind.into(),
            diagnostic,
        }
    }

    /// The tree translator could not handle a node of kind `node_kind`.
    pub fn translate(node_kind: impl Into<String>, diagnostic: Diagnostic) -> Self {
        Error::Translate {
            node_kind: node_kind.into(),
            diagnostic,
        }
    }

    /// The code generator could not handle a node of kind `node_kind`.
    pub fn generate(node_kind: impl Into<String>, diagnostic: Diagnostic) -> Self {
        Error::Generate {
            node_kind: node_kind.into(),
            diagnostic,
        }
    }

    /// Stage and node kind for failure statistics, if this failure has one.
    pub fn classification(&self) -> Option<Classification<'_>> {
        let (stage, node_kind) = match self {
            Error::Decode { node_kind, .. } => (FailureStage::Decoder, node_kind),
            Error::Translate { node_kind, .. } => (FailureStage::TreeTranslator, node_kind),
            Error::Generate { node_kind, .. } => (FailureStage::CodeGenerator, node_kind),
            Error::Io { .. } | Error::LibraryRefresh { .. } => return None,
        };
        Some(Classification {
            stage,
            node_kind: node_kind.as_str(),
        })
    }

    /// The attached diagnostic, for failures that carry one.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Error::Decode { diagnostic, .. }
            | Error::Translate { diagnostic, .. }
            | Error::Generate { diagnostic, .. } => Some(diagnostic),
            Error::Io { .. } | Error::LibraryRefresh { .. } => None,
        }
    }

    /// This failure as a diagnostic, ready for the renderer.
    ///
    /// Failures without an attached diagnostic get one built from their
    /// message, with each underlying cause on its own `caused by:` line.
    pub fn to_diagnostic(&self) -> Cow<'_, Diagnostic> {
        let thrown_by = match self {
            Error::Io { thrown_by, .. } | Error::LibraryRefresh { thrown_by, .. } => thrown_by,
            Error::Decode { diagnostic, .. }
            | Error::Translate { diagnostic, .. }
            | Error::Generate { diagnostic, .. } => return Cow::Borrowed(diagnostic),
        };

        let mut causes = Vec::new();
        let mut source = self.source();
        while let Some(cause) = source {
            causes.push(format!("caused by: {cause}"));
            source = cause.source();
        }
        Cow::Owned(
            Diagnostic::error(self.to_string(), thrown_by.clone()).with_details(causes.join("\n")),
        )
    }
}
