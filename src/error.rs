//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Configuration errors are raised before training starts, format errors during
//! model load, and I/O errors are propagated unchanged from the underlying storage.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {param}={value}")]
    InvalidParameter { param: &'static str, value: String },

    #[error("Map dimensionality must be between 2 and 5, got: {dims}")]
    UnsupportedDimensionality { dims: usize },

    #[error("Sample length {sample} does not match neuron length {neuron}")]
    LengthMismatch { sample: usize, neuron: usize },

    #[error(
        "Degenerate learning schedule: iteration threshold {threshold} must be below total iterations {total}"
    )]
    DegenerateSchedule { threshold: usize, total: usize },

    #[error("Sample set error: {0}")]
    SampleSet(String),

    #[error("Unknown model magic token: {found:?}")]
    UnknownMagic { found: [u8; 3] },

    #[error("Model dimensionality mismatch: expected {expected}, found {found}")]
    DimensionalityMismatch { expected: u32, found: u32 },

    #[error("Corrupt model header: {0}")]
    CorruptHeader(String),

    #[error("Truncated model stream while reading {0}")]
    Truncated(&'static str),

    #[error("Metadata error: {0}")]
    Metadata(String),
}

impl Error {
    /// True for errors detected by the pre-training configuration checks.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameter { .. }
                | Error::UnsupportedDimensionality { .. }
                | Error::LengthMismatch { .. }
                | Error::DegenerateSchedule { .. }
                | Error::SampleSet(_)
        )
    }

    /// True for errors detected while decoding a persisted model.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Error::UnknownMagic { .. }
                | Error::DimensionalityMismatch { .. }
                | Error::CorruptHeader(_)
                | Error::Truncated(_)
        )
    }
}
