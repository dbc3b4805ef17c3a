//! Command Line Interface (CLI) layer for SOMPRO.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the train, classify, and dump
//! flows. It wires user-provided options to the underlying library
//! functionality exposed via `sompro::api`.
//!
//! If you are embedding SOMPRO into another application, prefer using the
//! high-level `sompro::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
