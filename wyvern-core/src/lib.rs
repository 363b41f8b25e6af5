//! Core utilities and types for the Wyvern transpiler.
//!
//! This crate provides the target-language metadata, artifact naming and
//! configuration shared by the diagnostics and pipeline crates.

mod config;
mod file;
mod paths;
mod target;

// Configuration
pub use config::{PipelineOptions, ToolchainConfig, default_compiler_path};
// File operations
pub use file::write_file;
// Artifact naming
pub use paths::{archive_path, base_name, change_extension, folder_with_slash, output_file_path};
pub use target::TargetLanguage;
