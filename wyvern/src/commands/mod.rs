mod compile;
mod completions;
mod config;
mod run;

use std::path::Path;

use clap::{Parser, Subcommand};
use compile::CompileCommand;
use completions::CompletionsCommand;
use config::ConfigCommand;
use eyre::Result;
use run::RunCommand;
use wyvern_pipeline::{CommandOutput, Log, TracingLog, progress_log};

#[derive(Parser)]
#[command(name = "wyvern")]
#[command(version)]
#[command(about = "Build and run Kotlin sources produced by the Wyvern transpiler")]
pub(crate) struct Cli {
    /// Show debug events from every stage
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not print progress lines
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let log = self.progress();
        match &self.command {
            Commands::Compile(cmd) => cmd.run(log.as_ref()),
            Commands::Run(cmd) => cmd.run(log.as_ref()),
            Commands::Config(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }

    /// Progress goes through `tracing` in verbose mode so it interleaves with
    /// the debug events.
    fn progress(&self) -> Box<dyn Log> {
        if self.verbose {
            Box::new(TracingLog)
        } else {
            progress_log(!self.quiet)
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile generated Kotlin sources into a runnable archive
    Compile(CompileCommand),

    /// Run the compiled archive
    Run(RunCommand),

    /// Print the effective toolchain configuration
    Config(ConfigCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Forward a tool's captured output and exit with its status.
fn finish(output: Option<CommandOutput>, program: &Path) -> Result<()> {
    let Some(output) = output else {
        eyre::bail!("failed to start '{}'", program.display());
    };
    tracing::debug!(program = %program.display(), status = ?output.status, "tool exited");

    print!("{}", output.stdout);
    eprint!("{}", output.stderr);

    if output.succeeded() {
        Ok(())
    } else {
        std::process::exit(output.status.unwrap_or(1));
    }
}
