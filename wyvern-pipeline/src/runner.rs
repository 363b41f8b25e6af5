//! Pipeline orchestrator.

use std::path::{Path, PathBuf};

use wyvern_core::{ToolchainConfig, output_file_path};
use wyvern_diagnostics::{DiagnosticStore, Result};

use crate::{
    Batch, CodeGenerator, CommandOutput, CompilationContext, Decoder, FileSystem, LocalFileSystem,
    Log, PassRound, PassRunner, StdoutLog, Toolchain, ToolchainBridge, Translator,
    is_single_element_batch, progress_log,
};

/// The transpilation pipeline orchestrator.
///
/// Each operation extends the previous one by a single stage, so callers can
/// stop wherever they need a result:
///
/// 1. [`decode`](Self::decode) - read and decode every AST dump
/// 2. [`translate_to_intermediate`](Self::translate_to_intermediate) - translate the decoded trees
/// 3. [`run_first_pass_round`](Self::run_first_pass_round) - apply the first round of passes
/// 4. [`run_second_pass_round`](Self::run_second_pass_round) - apply both rounds of passes
/// 5. [`generate_output`](Self::generate_output) - generate target-language source
///
/// [`transpile_then_compile`](Self::transpile_then_compile) and
/// [`transpile_compile_and_run`](Self::transpile_compile_and_run) add the
/// toolchain on top.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new(decoder, translator, passes, generator)
///     .log_progress(options.log_progress)
///     .config(ToolchainConfig::open("wyvern.toml")?);
///
/// let mut ctx = CompilationContext::new(options);
/// let sources = pipeline.generate_output(&mut ctx, &["main.swiftASTDump"])?;
/// ```
pub struct Pipeline<D, T, P, G> {
    decoder: D,
    translator: T,
    passes: P,
    generator: G,
    file_system: Box<dyn FileSystem>,
    bridge: ToolchainBridge,
    log: Box<dyn Log>,
}

impl<D, T, P, G> Pipeline<D, T, P, G>
where
    D: Decoder,
    T: Translator<D::Tree>,
    P: PassRunner<T::Tree>,
    G: CodeGenerator<T::Tree>,
{
    /// Create a pipeline over the local file system and real toolchain,
    /// logging progress to stdout.
    pub fn new(decoder: D, translator: T, passes: P, generator: G) -> Self {
        Self {
            decoder,
            translator,
            passes,
            generator,
            file_system: Box::new(LocalFileSystem),
            bridge: ToolchainBridge::default(),
            log: Box::new(StdoutLog),
        }
    }

    /// Replace the file system used to read dumps and write sources.
    pub fn file_system(mut self, file_system: impl FileSystem + 'static) -> Self {
        self.file_system = Box::new(file_system);
        self
    }

    /// Replace the process runner behind the toolchain bridge.
    pub fn toolchain(mut self, toolchain: impl Toolchain + 'static) -> Self {
        self.bridge = self.bridge.with_toolchain(toolchain);
        self
    }

    /// Replace the toolchain bridge.
    pub fn bridge(mut self, bridge: ToolchainBridge) -> Self {
        self.bridge = bridge;
        self
    }

    /// Use `config` for the toolchain, keeping the current process runner.
    pub fn config(mut self, config: ToolchainConfig) -> Self {
        self.bridge = self.bridge.with_config(config);
        self
    }

    /// Replace the progress log.
    pub fn log(mut self, log: impl Log + 'static) -> Self {
        self.log = Box::new(log);
        self
    }

    /// Replace the progress log with an already boxed one.
    pub fn boxed_log(mut self, log: Box<dyn Log>) -> Self {
        self.log = log;
        self
    }

    /// Print progress to stdout, or nothing at all.
    pub fn log_progress(self, enabled: bool) -> Self {
        self.boxed_log(progress_log(enabled))
    }

    /// Read every input file and decode it.
    ///
    /// # Errors
    ///
    /// Returns the first failure when stop-at-first-error is enabled.
    pub fn decode(
        &self,
        ctx: &mut CompilationContext,
        inputs: &[impl AsRef<Path>],
    ) -> Result<Batch<D::Tree>> {
        let _span = tracing::debug_span!("decode", inputs = inputs.len()).entered();
        self.log.emit("\t- Decoding AST dumps...");

        let paths: Vec<PathBuf> = inputs.iter().map(|p| p.as_ref().to_path_buf()).collect();
        Batch::from_values(paths).try_map(&mut ctx.diagnostics, |path, _| {
            let dump = self.file_system.read_file(&path)?;
            self.decoder.decode(&dump)
        })
    }

    /// Decode, then translate each tree.
    ///
    /// A single input is translated as the program's entry unit, several
    /// inputs as library units.
    ///
    /// # Errors
    ///
    /// Returns the first failure when stop-at-first-error is enabled.
    pub fn translate_to_intermediate(
        &self,
        ctx: &mut CompilationContext,
        inputs: &[impl AsRef<Path>],
    ) -> Result<Batch<T::Tree>> {
        let decoded = self.decode(ctx, inputs)?;
        let as_main_file = is_single_element_batch(inputs);

        let _span = tracing::debug_span!("translate", as_main_file).entered();
        self.log.emit("\t- Translating decoded trees...");
        decoded.try_map(&mut ctx.diagnostics, |tree, _| {
            self.translator.translate(tree, as_main_file)
        })
    }

    /// Translate, then apply the first round of passes.
    ///
    /// # Errors
    ///
    /// Returns the first failure when stop-at-first-error is enabled.
    pub fn run_first_pass_round(
        &self,
        ctx: &mut CompilationContext,
        inputs: &[impl AsRef<Path>],
    ) -> Result<Batch<T::Tree>> {
        let translated = self.translate_to_intermediate(ctx, inputs)?;
        self.apply_first_pass_round(ctx, translated)
    }

    /// Translate, then apply both rounds of passes.
    ///
    /// # Errors
    ///
    /// Returns the first failure when stop-at-first-error is enabled.
    pub fn run_second_pass_round(
        &self,
        ctx: &mut CompilationContext,
        inputs: &[impl AsRef<Path>],
    ) -> Result<Batch<T::Tree>> {
        let translated = self.translate_to_intermediate(ctx, inputs)?;

        let _span = tracing::debug_span!("passes", rounds = "both").entered();
        self.log.emit("\t- Running both rounds of passes...");
        translated.try_map(&mut ctx.diagnostics, |tree, diagnostics| {
            self.passes.refresh_library()?;
            let tree = self.passes.run_round(PassRound::First, tree, diagnostics);
            Ok(self.passes.run_round(PassRound::Second, tree, diagnostics))
        })
    }

    /// Apply the first round of passes to already translated trees.
    ///
    /// # Errors
    ///
    /// Returns the first failure when stop-at-first-error is enabled.
    pub fn apply_first_pass_round(
        &self,
        ctx: &mut CompilationContext,
        trees: impl Into<Batch<T::Tree>>,
    ) -> Result<Batch<T::Tree>> {
        self.apply_pass_round(ctx, PassRound::First, trees.into())
    }

    /// Apply only the second round of passes to trees that already went
    /// through the first.
    ///
    /// # Errors
    ///
    /// Returns the first failure when stop-at-first-error is enabled.
    pub fn apply_second_pass_round(
        &self,
        ctx: &mut CompilationContext,
        trees: impl Into<Batch<T::Tree>>,
    ) -> Result<Batch<T::Tree>> {
        self.apply_pass_round(ctx, PassRound::Second, trees.into())
    }

    fn apply_pass_round(
        &self,
        ctx: &mut CompilationContext,
        round: PassRound,
        trees: Batch<T::Tree>,
    ) -> Result<Batch<T::Tree>> {
        let _span = tracing::debug_span!("passes", rounds = round.as_str()).entered();
        self.log
            .emit(&format!("\t- Running {} round of passes...", round.as_str()));
        trees.try_map(&mut ctx.diagnostics, |tree, diagnostics| {
            self.run_round(round, tree, diagnostics)
        })
    }

    fn run_round(
        &self,
        round: PassRound,
        tree: T::Tree,
        diagnostics: &mut DiagnosticStore,
    ) -> Result<T::Tree> {
        self.passes.refresh_library()?;
        Ok(self.passes.run_round(round, tree, diagnostics))
    }

    /// Run every stage up to source generation.
    ///
    /// # Errors
    ///
    /// Returns the first failure when stop-at-first-error is enabled.
    pub fn generate_output(
        &self,
        ctx: &mut CompilationContext,
        inputs: &[impl AsRef<Path>],
    ) -> Result<Batch<String>> {
        let transformed = self.run_second_pass_round(ctx, inputs)?;

        let _span = tracing::debug_span!("generate").entered();
        self.log.emit(&format!(
            "\t- Generating {}...",
            self.bridge.language().display_name()
        ));
        transformed.try_map(&mut ctx.diagnostics, |tree, _| self.generator.generate(tree))
    }

    /// Generate sources, write them to `output_dir` and compile them.
    ///
    /// Each source is written as `<input base name>.<extension>`. Inputs that
    /// failed an earlier stage are left out of the compilation. Returns `None`
    /// if the build tool could not be started.
    ///
    /// # Errors
    ///
    /// Returns the first failure when stop-at-first-error is enabled.
    pub fn transpile_then_compile(
        &self,
        ctx: &mut CompilationContext,
        inputs: &[impl AsRef<Path>],
        output_dir: &str,
    ) -> Result<Option<CommandOutput>> {
        let sources = self.generate_output(ctx, inputs)?;
        let language = self.bridge.language();

        let mut written = Vec::with_capacity(sources.len());
        for (input, source) in inputs.iter().zip(sources.iter()) {
            let Some(source) = source else { continue };
            let input = input.as_ref().to_string_lossy();
            let path = PathBuf::from(output_file_path(&input, output_dir, language));

            match self.file_system.write_file(&path, source) {
                Ok(()) => written.push(path),
                Err(error) => ctx.diagnostics.record_error(error)?,
            }
        }

        self.log
            .emit(&format!("\t- Compiling {}...", language.display_name()));
        Ok(self.bridge.compile(&written, output_dir))
    }

    /// Generate, compile and, if compilation exited with status zero, run
    /// the program with `args`.
    ///
    /// Returns the compilation output unchanged when the build tool could not
    /// be started or exited with any other status.
    ///
    /// # Errors
    ///
    /// Returns the first failure when stop-at-first-error is enabled.
    pub fn transpile_compile_and_run(
        &self,
        ctx: &mut CompilationContext,
        inputs: &[impl AsRef<Path>],
        output_dir: &str,
        args: &[String],
    ) -> Result<Option<CommandOutput>> {
        let compilation = self.transpile_then_compile(ctx, inputs, output_dir)?;
        match compilation {
            Some(output) if output.succeeded() => {}
            other => return Ok(other),
        }

        self.log.emit(&format!(
            "\t- Running {}...",
            self.bridge.language().display_name()
        ));
        Ok(self.bridge.run(output_dir, args))
    }
}
