use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use wyvern_core::ToolchainConfig;

#[derive(Args)]
pub struct ConfigCommand {
    /// Path to wyvern.toml (defaults to ./wyvern.toml)
    #[arg(short, long, default_value = "wyvern.toml")]
    pub config: PathBuf,
}

impl ConfigCommand {
    pub fn run(&self) -> Result<()> {
        let config = ToolchainConfig::load_or_default(&self.config)?;
        if !self.config.exists() {
            eprintln!("{} not found, using defaults", self.config.display());
        }
        print!("{}", config.to_toml_string()?);
        Ok(())
    }
}
