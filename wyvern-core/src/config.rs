//! Toolchain and pipeline configuration.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::TargetLanguage;

/// Default location of the Kotlin compiler for the host OS.
pub fn default_compiler_path() -> PathBuf {
    if cfg!(target_os = "linux") {
        PathBuf::from("/opt/kotlinc/bin/kotlinc")
    } else {
        PathBuf::from("/usr/local/bin/kotlinc")
    }
}

fn default_runtime() -> PathBuf {
    PathBuf::from("java")
}

/// External tools used to build and run generated sources.
///
/// Loaded from a `wyvern.toml` file; every key is optional.
///
/// ```toml
/// language = "kotlin"
/// compiler = "/opt/kotlinc/bin/kotlinc"
/// runtime = "java"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Language the generated sources are written in.
    pub language: TargetLanguage,
    /// Build tool invoked on the generated sources.
    pub compiler: PathBuf,
    /// Runtime used to execute the compiled archive.
    pub runtime: PathBuf,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            language: TargetLanguage::default(),
            compiler: default_compiler_path(),
            runtime: default_runtime(),
        }
    }
}

impl ToolchainConfig {
    /// Open and parse a configuration file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("failed to parse '{}'", path.display()))
    }

    /// Like [`ToolchainConfig::open`], but falls back to the defaults when the
    /// file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::open(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Switches that shape how a pipeline run behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Propagate the first failure instead of recording it and moving on.
    pub stop_at_first_error: bool,
    /// Emit progress lines while stages run.
    pub log_progress: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            stop_at_first_error: false,
            log_progress: true,
        }
    }
}
