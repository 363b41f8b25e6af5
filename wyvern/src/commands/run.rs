use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use wyvern_core::{ToolchainConfig, archive_path};
use wyvern_pipeline::{Log, ProcessToolchain, ToolchainBridge};

use super::finish;

#[derive(Args)]
pub struct RunCommand {
    /// Directory holding the compiled archive
    #[arg(short, long, default_value = "build")]
    pub output: String,

    /// Path to wyvern.toml (defaults to ./wyvern.toml)
    #[arg(short, long, default_value = "wyvern.toml")]
    pub config: PathBuf,

    /// Arguments to pass to the program
    #[arg(last = true)]
    pub args: Vec<String>,
}

impl RunCommand {
    pub fn run(&self, log: &dyn Log) -> Result<()> {
        let config = ToolchainConfig::load_or_default(&self.config)?;

        let archive = archive_path(&self.output, config.language);
        if !Path::new(&archive).exists() {
            eyre::bail!("no compiled archive at '{}', run `wyvern compile` first", archive);
        }

        let bridge = ToolchainBridge::new(ProcessToolchain, config);
        log.emit(&format!("\t- Running {}...", bridge.language().display_name()));
        let output = bridge.run(&self.output, &self.args);
        finish(output, &bridge.config().runtime)
    }
}
