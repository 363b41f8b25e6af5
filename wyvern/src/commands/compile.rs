use std::path::PathBuf;

use clap::Args;
use eyre::{Result, WrapErr};
use wyvern_core::ToolchainConfig;
use wyvern_pipeline::{Log, ProcessToolchain, ToolchainBridge};

use super::finish;

#[derive(Args)]
pub struct CompileCommand {
    /// Generated source files to compile
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory that receives the compiled archive
    #[arg(short, long, default_value = "build")]
    pub output: String,

    /// Path to wyvern.toml (defaults to ./wyvern.toml)
    #[arg(short, long, default_value = "wyvern.toml")]
    pub config: PathBuf,
}

impl CompileCommand {
    pub fn run(&self, log: &dyn Log) -> Result<()> {
        let config = ToolchainConfig::load_or_default(&self.config)?;

        // Fail on a missing source here rather than inside the compiler.
        for file in &self.files {
            std::fs::metadata(file)
                .wrap_err_with(|| format!("cannot access '{}'", file.display()))?;
        }
        std::fs::create_dir_all(&self.output)
            .wrap_err_with(|| format!("failed to create '{}'", self.output))?;

        let bridge = ToolchainBridge::new(ProcessToolchain, config);
        log.emit(&format!(
            "\t- Compiling {}...",
            bridge.language().display_name()
        ));
        let output = bridge.compile(&self.files, &self.output);
        finish(output, &bridge.config().compiler)
    }
}
