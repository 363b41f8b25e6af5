//! Collaborators the pipeline delegates each stage to.
//!
//! The pipeline never looks inside a tree. Each trait only fixes what goes in
//! and what comes out, so the decoder, translator, passes and generator can
//! evolve independently of the orchestration.

use std::path::Path;

use wyvern_diagnostics::{DiagnosticStore, Error, Result, throw_site};

/// Reads AST dumps and writes generated sources.
pub trait FileSystem {
    /// Read the whole file at `path`.
    fn read_file(&self, path: &Path) -> Result<String>;

    /// Create or overwrite the file at `path`.
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn read_file(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| Error::read(path, e, throw_site!()))
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        wyvern_core::write_file(path, contents)
            .map_err(|e| Error::write(path, e, throw_site!()))
    }
}

/// Turns the text of an AST dump into a decoded tree.
pub trait Decoder {
    type Tree;

    /// # Errors
    ///
    /// Returns [`Error::Decode`] naming the node kind that could not be decoded.
    fn decode(&self, dump: &str) -> Result<Self::Tree>;
}

/// Translates one tree representation into the next.
pub trait Translator<Input> {
    type Tree;

    /// Translate `tree`.
    ///
    /// `as_main_file` is true when the tree is the program's entry unit, whose
    /// top-level statements become the program's main function; otherwise the
    /// tree is translated as a library unit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Translate`] naming the node kind that could not be
    /// translated.
    fn translate(&self, tree: Input, as_main_file: bool) -> Result<Self::Tree>;
}

/// Which ordered set of transformation passes to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassRound {
    First,
    Second,
}

impl PassRound {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassRound::First => "first",
            PassRound::Second => "second",
        }
    }
}

/// Runs rounds of transformation passes over a tree.
pub trait PassRunner<Tree> {
    /// Regenerate the auxiliary library definitions the passes rely on.
    ///
    /// Called before every pass round.
    fn refresh_library(&self) -> Result<()>;

    /// Apply every pass of `round`, in order.
    ///
    /// Passes never fail; problems are reported as warnings in `diagnostics`.
    fn run_round(&self, round: PassRound, tree: Tree, diagnostics: &mut DiagnosticStore) -> Tree;
}

/// Produces target-language source text from a transformed tree.
pub trait CodeGenerator<Tree> {
    /// # Errors
    ///
    /// Returns [`Error::Generate`] naming the node kind that has no
    /// target-language rendering.
    fn generate(&self, tree: Tree) -> Result<String>;
}
