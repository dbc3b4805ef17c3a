use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use sompro::{MissingValuePolicy, WrapPolicy};

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum Mode {
    /// Train a SOM from a sample file and persist the model
    Train,
    /// Map samples to their winning neurons using a persisted model
    Classify,
    /// Write the human-readable dump of a persisted model
    Dump,
}

#[derive(Parser)]
#[command(name = "sompro", version, about = "SOMPRO CLI")]
pub struct CliArgs {
    /// Operation to perform
    #[arg(long, value_enum, default_value_t = Mode::Train)]
    pub mode: Mode,

    /// Input sample file: one sample per line, whitespace-separated
    /// components, `nan` for missing values
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (trained model, classification labels, or dump text)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Persisted model to classify against or to dump
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Map extent per axis, e.g. 8x8 or 4x4x4 (2 to 5 axes)
    #[arg(long, default_value = "8x8")]
    pub map_size: String,

    /// Initial neighborhood radius per axis, e.g. 3x3
    #[arg(long, default_value = "3x3")]
    pub radius: String,

    /// Total number of training iterations
    #[arg(long, default_value_t = 100)]
    pub iterations: usize,

    /// Learning rate at iteration 0
    #[arg(long, default_value_t = 1.0)]
    pub beta_init: f64,

    /// Learning rate at the start of the fine-tuning phase
    #[arg(long, default_value_t = 0.1)]
    pub beta_end: f64,

    /// Lower bound of the uniform random weight initialization
    #[arg(long, default_value_t = 0.0)]
    pub min_weight: f64,

    /// Upper bound of the uniform random weight initialization
    #[arg(long, default_value_t = 1.0)]
    pub max_weight: f64,

    /// Comma-separated constant initialization vector; overrides the random
    /// initialization when present
    #[arg(long)]
    pub init_vector: Option<String>,

    /// Seed for the random weight initialization
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Edge policy at the grid border (clip or wrap)
    #[arg(long, value_enum, default_value_t = WrapPolicy::Clip)]
    pub wrap: WrapPolicy,

    /// Missing-value handling (none or ignore)
    #[arg(long, value_enum, default_value_t = MissingValuePolicy::None)]
    pub missing: MissingValuePolicy,

    /// Write a JSON metadata sidecar next to the trained model
    #[arg(long, default_value_t = false)]
    pub metadata: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
