//! Bridge to the external build tool and runtime.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use wyvern_core::{TargetLanguage, ToolchainConfig, archive_path};

/// Exit status and captured output of an external process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` if the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// True only for an exit status of exactly zero.
    pub fn succeeded(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs external programs to completion.
pub trait Toolchain {
    /// Run `program` with `args`, optionally from `working_dir`.
    ///
    /// Returns `None` if the process could not be started.
    fn invoke(&self, program: &Path, args: &[String], working_dir: Option<&Path>)
    -> Option<CommandOutput>;
}

/// [`Toolchain`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessToolchain;

impl Toolchain for ProcessToolchain {
    fn invoke(
        &self,
        program: &Path,
        args: &[String],
        working_dir: Option<&Path>,
    ) -> Option<CommandOutput> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        match command.output() {
            Ok(output) => Some(CommandOutput {
                status: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Err(e) => {
                tracing::warn!(program = %program.display(), error = %e, "failed to start process");
                None
            }
        }
    }
}

/// Compiles generated sources into an archive and runs it.
///
/// Neither step interprets the tool's output; callers inspect the returned
/// status themselves.
pub struct ToolchainBridge {
    toolchain: Box<dyn Toolchain>,
    config: ToolchainConfig,
}

impl ToolchainBridge {
    pub fn new(toolchain: impl Toolchain + 'static, config: ToolchainConfig) -> Self {
        Self {
            toolchain: Box::new(toolchain),
            config,
        }
    }

    /// Replace the process runner, keeping the configuration.
    pub fn with_toolchain(mut self, toolchain: impl Toolchain + 'static) -> Self {
        self.toolchain = Box::new(toolchain);
        self
    }

    /// Replace the configuration, keeping the process runner.
    pub fn with_config(mut self, config: ToolchainConfig) -> Self {
        self.config = config;
        self
    }

    /// Language of the sources this bridge compiles.
    pub fn language(&self) -> TargetLanguage {
        self.config.language
    }

    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    /// Arguments passed to the build tool: `-include-runtime -d <archive> <paths…>`.
    pub fn compile_arguments(&self, paths: &[PathBuf], output_dir: &str) -> Vec<String> {
        let mut args = vec![
            "-include-runtime".to_string(),
            "-d".to_string(),
            archive_path(output_dir, self.config.language),
        ];
        args.extend(paths.iter().map(|p| p.display().to_string()));
        args
    }

    /// Arguments passed to the runtime: `-jar <archive> <extra_args…>`.
    pub fn run_arguments(&self, extra_args: &[String]) -> Vec<String> {
        let mut args = vec![
            "-jar".to_string(),
            self.config.language.archive_name().to_string(),
        ];
        args.extend_from_slice(extra_args);
        args
    }

    /// Build `paths` into the archive inside `output_dir`.
    pub fn compile(&self, paths: &[PathBuf], output_dir: &str) -> Option<CommandOutput> {
        let args = self.compile_arguments(paths, output_dir);
        tracing::debug!(compiler = %self.config.compiler.display(), ?args, "compiling");
        let output = self.toolchain.invoke(&self.config.compiler, &args, None);
        tracing::debug!(status = ?output.as_ref().map(|o| o.status), "compile finished");
        output
    }

    /// Run the archive inside `output_dir`, from that directory.
    pub fn run(&self, output_dir: &str, extra_args: &[String]) -> Option<CommandOutput> {
        let args = self.run_arguments(extra_args);
        tracing::debug!(runtime = %self.config.runtime.display(), ?args, "running");
        let output = self
            .toolchain
            .invoke(&self.config.runtime, &args, Some(Path::new(output_dir)));
        tracing::debug!(status = ?output.as_ref().map(|o| o.status), "run finished");
        output
    }
}

impl Default for ToolchainBridge {
    fn default() -> Self {
        Self::new(ProcessToolchain, ToolchainConfig::default())
    }
}
