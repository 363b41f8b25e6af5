//! Fake collaborators that record how the pipeline drives them.
//!
//! Dump text controls behaviour: a dump of `fail:<Kind>` fails to decode with
//! node kind `<Kind>`, and the decoded name is carried through every stage so
//! later fakes can fail on `untranslatable`, `ungeneratable` or warn on `warn`.

#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
    rc::Rc,
};

use wyvern_core::{PipelineOptions, ToolchainConfig};
use wyvern_diagnostics::{Diagnostic, DiagnosticStore, Error, Result, throw_site};
use wyvern_pipeline::{
    CodeGenerator, CommandOutput, CompilationContext, Decoder, FileSystem, Log, PassRound,
    PassRunner, Pipeline, Toolchain, Translator,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTree(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub name: String,
    pub as_main_file: bool,
    pub rounds: Vec<PassRound>,
}

#[derive(Clone, Default)]
pub struct FakeDecoder {
    pub calls: Rc<RefCell<Vec<String>>>,
}

impl Decoder for FakeDecoder {
    type Tree = DecodedTree;

    fn decode(&self, dump: &str) -> Result<DecodedTree> {
        let dump = dump.trim().to_string();
        self.calls.borrow_mut().push(dump.clone());
        match dump.strip_prefix("fail:") {
            Some(kind) => Err(Error::decode(
                kind,
                Diagnostic::error(format!("unknown dump node {kind}"), throw_site!()),
            )),
            None => Ok(DecodedTree(dump)),
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeTranslator {
    pub calls: Rc<RefCell<Vec<(String, bool)>>>,
}

impl Translator<DecodedTree> for FakeTranslator {
    type Tree = Tree;

    fn translate(&self, tree: DecodedTree, as_main_file: bool) -> Result<Tree> {
        self.calls.borrow_mut().push((tree.0.clone(), as_main_file));
        if tree.0.contains("untranslatable") {
            return Err(Error::translate(
                "ClosureExpr",
                Diagnostic::error("closures are not supported", throw_site!()),
            ));
        }
        Ok(Tree {
            name: tree.0,
            as_main_file,
            rounds: Vec::new(),
        })
    }
}

#[derive(Clone, Default)]
pub struct FakePasses {
    pub refreshes: Rc<Cell<usize>>,
    /// Every refresh and round, in call order.
    pub events: Rc<RefCell<Vec<String>>>,
    pub fail_refresh: bool,
}

impl PassRunner<Tree> for FakePasses {
    fn refresh_library(&self) -> Result<()> {
        self.refreshes.set(self.refreshes.get() + 1);
        self.events.borrow_mut().push("refresh".to_string());
        if self.fail_refresh {
            return Err(Error::library_refresh(
                io::Error::from(io::ErrorKind::PermissionDenied),
                throw_site!(),
            ));
        }
        Ok(())
    }

    fn run_round(&self, round: PassRound, mut tree: Tree, diagnostics: &mut DiagnosticStore) -> Tree {
        self.events
            .borrow_mut()
            .push(format!("{}:{}", round.as_str(), tree.name));
        if tree.name.contains("warn") {
            diagnostics.record_warning(Diagnostic::warning(
                format!("{} round rewrote {}", round.as_str(), tree.name),
                throw_site!(),
            ));
        }
        tree.rounds.push(round);
        tree
    }
}

#[derive(Clone, Default)]
pub struct FakeGenerator {
    pub calls: Rc<RefCell<Vec<String>>>,
}

impl CodeGenerator<Tree> for FakeGenerator {
    fn generate(&self, tree: Tree) -> Result<String> {
        self.calls.borrow_mut().push(tree.name.clone());
        if tree.name.contains("ungeneratable") {
            return Err(Error::generate(
                "SubscriptDecl",
                Diagnostic::error("subscripts have no Kotlin form", throw_site!()),
            ));
        }
        Ok(format!(
            "// {} main={} rounds={:?}\n",
            tree.name, tree.as_main_file, tree.rounds
        ))
    }
}

/// In-memory file system; writes are also kept in call order.
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    pub files: Rc<RefCell<BTreeMap<PathBuf, String>>>,
    pub writes: Rc<RefCell<Vec<PathBuf>>>,
}

impl MemoryFileSystem {
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let fs = Self::default();
        for (path, contents) in files {
            fs.files
                .borrow_mut()
                .insert(PathBuf::from(path), contents.to_string());
        }
        fs
    }

    pub fn contents(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Path::new(path)).cloned()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_file(&self, path: &Path) -> Result<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                Error::read(path, io::Error::from(io::ErrorKind::NotFound), throw_site!())
            })
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        self.writes.borrow_mut().push(path.to_path_buf());
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Invocation recorded by [`FakeToolchain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

/// Answers compiler invocations with `compile_result` and runtime invocations
/// with `run_result`.
#[derive(Clone)]
pub struct FakeToolchain {
    pub invocations: Rc<RefCell<Vec<Invocation>>>,
    pub compile_result: Option<CommandOutput>,
    pub run_result: Option<CommandOutput>,
}

impl FakeToolchain {
    pub fn exiting(compile_status: Option<i32>) -> Self {
        Self {
            invocations: Rc::default(),
            compile_result: Some(CommandOutput {
                status: compile_status,
                stdout: String::new(),
                stderr: String::new(),
            }),
            run_result: Some(CommandOutput {
                status: Some(0),
                stdout: "Hello, world!\n".to_string(),
                stderr: String::new(),
            }),
        }
    }

    pub fn unstartable() -> Self {
        Self {
            compile_result: None,
            ..Self::exiting(Some(0))
        }
    }

    pub fn programs(&self) -> Vec<PathBuf> {
        self.invocations
            .borrow()
            .iter()
            .map(|i| i.program.clone())
            .collect()
    }
}

impl Toolchain for FakeToolchain {
    fn invoke(
        &self,
        program: &Path,
        args: &[String],
        working_dir: Option<&Path>,
    ) -> Option<CommandOutput> {
        self.invocations.borrow_mut().push(Invocation {
            program: program.to_path_buf(),
            args: args.to_vec(),
            working_dir: working_dir.map(Path::to_path_buf),
        });
        if program == Path::new(COMPILER) {
            self.compile_result.clone()
        } else {
            self.run_result.clone()
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingLog {
    pub lines: Rc<RefCell<Vec<String>>>,
}

impl Log for RecordingLog {
    fn emit(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

pub const COMPILER: &str = "kotlinc";
pub const RUNTIME: &str = "java";

pub type FakePipeline = Pipeline<FakeDecoder, FakeTranslator, FakePasses, FakeGenerator>;

/// Every fake wired into one pipeline, with handles kept for assertions.
pub struct Harness {
    pub decoder: FakeDecoder,
    pub translator: FakeTranslator,
    pub passes: FakePasses,
    pub generator: FakeGenerator,
    pub fs: MemoryFileSystem,
    pub toolchain: FakeToolchain,
    pub log: RecordingLog,
}

impl Harness {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            decoder: FakeDecoder::default(),
            translator: FakeTranslator::default(),
            passes: FakePasses::default(),
            generator: FakeGenerator::default(),
            fs: MemoryFileSystem::with_files(files),
            toolchain: FakeToolchain::exiting(Some(0)),
            log: RecordingLog::default(),
        }
    }

    pub fn pipeline(&self) -> FakePipeline {
        let config = ToolchainConfig {
            compiler: PathBuf::from(COMPILER),
            runtime: PathBuf::from(RUNTIME),
            ..Default::default()
        };
        Pipeline::new(
            self.decoder.clone(),
            self.translator.clone(),
            self.passes.clone(),
            self.generator.clone(),
        )
        .file_system(self.fs.clone())
        .toolchain(self.toolchain.clone())
        .config(config)
        .log(self.log.clone())
    }
}

pub fn accumulating() -> CompilationContext {
    CompilationContext::new(PipelineOptions {
        stop_at_first_error: false,
        log_progress: false,
    })
}

pub fn stopping() -> CompilationContext {
    CompilationContext::new(PipelineOptions {
        stop_at_first_error: true,
        log_progress: false,
    })
}
