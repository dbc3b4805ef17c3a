//! Shared types and enums used across SOMPRO.
//! Includes the edge-wrap and missing-value policies consumed by the trainer,
//! and the persisted model kinds recognized by the magic-token registry.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Edge policy applied when a neighborhood offset leaves the grid.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum WrapPolicy {
    /// Offsets outside the grid extent are not visited.
    Clip,
    /// Coordinates wrap on every axis; the grid behaves as a torus.
    Wrap,
}

impl std::fmt::Display for WrapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WrapPolicy::Clip => write!(f, "Clip"),
            WrapPolicy::Wrap => write!(f, "Wrap"),
        }
    }
}

/// Treatment of the missing-value sentinel (IEEE NaN) in sample components.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum MissingValuePolicy {
    /// Samples are assumed complete; no sentinel handling.
    None,
    /// Sentinel components contribute nothing to distance or update.
    Ignore,
}

impl std::fmt::Display for MissingValuePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingValuePolicy::None => write!(f, "None"),
            MissingValuePolicy::Ignore => write!(f, "Ignore"),
        }
    }
}

/// Persisted model kinds, one per 3-byte magic token.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum ModelKind {
    Som,
}

impl ModelKind {
    /// The raw magic token written at the head of a persisted model.
    pub fn magic(&self) -> [u8; 3] {
        match self {
            ModelKind::Som => *b"som",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelKind::Som => write!(f, "Som"),
        }
    }
}

/// Map weight initialization, chosen at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InitStrategy {
    /// Independent per-component draws, uniform over [min_weight, max_weight],
    /// from a seedable generator.
    Random { min_weight: f64, max_weight: f64 },
    /// Every neuron starts as a copy of the given vector.
    Constant(Vec<f64>),
}

impl std::fmt::Display for InitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitStrategy::Random { min_weight, max_weight } => {
                write!(f, "Random[{}, {}]", min_weight, max_weight)
            }
            InitStrategy::Constant(v) => write!(f, "Constant({} components)", v.len()),
        }
    }
}
