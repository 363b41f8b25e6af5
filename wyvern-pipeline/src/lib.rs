//! Transpilation pipeline.
//!
//! This crate provides a [`Pipeline`] orchestrator that drives an AST dump
//! through every stage of transpilation:
//!
//! - decode the dump into a tree ([`Decoder`])
//! - translate it into the intermediate tree ([`Translator`])
//! - run the two rounds of transformation passes ([`PassRunner`])
//! - generate target-language source ([`CodeGenerator`])
//! - compile and run the result ([`ToolchainBridge`])
//!
//! Every operation works on a batch of inputs. Failures are routed through the
//! [`DiagnosticStore`](wyvern_diagnostics::DiagnosticStore) held by the
//! [`CompilationContext`], which either aborts the operation or records the
//! failure and drops that input from later stages.
//!
//! # Example
//!
//! ```ignore
//! use wyvern_pipeline::{CompilationContext, Pipeline};
//!
//! let pipeline = Pipeline::new(decoder, translator, passes, generator);
//! let mut ctx = CompilationContext::new(options);
//! let output = pipeline.transpile_compile_and_run(&mut ctx, &inputs, "build", &[])?;
//!
//! ctx.diagnostics.summary().render(&mut TerminalOutput::new());
//! ```

mod batch;
mod context;
mod log;
mod runner;
mod stages;
mod toolchain;

pub use batch::{Batch, is_single_element_batch};
pub use context::CompilationContext;
pub use log::{Log, SilentLog, StdoutLog, TracingLog, progress_log};
pub use runner::Pipeline;
pub use stages::{CodeGenerator, Decoder, FileSystem, LocalFileSystem, PassRound, PassRunner, Translator};
pub use toolchain::{CommandOutput, ProcessToolchain, Toolchain, ToolchainBridge};
