use serde::{Deserialize, Serialize};

use crate::core::som::behavior::iteration_threshold;
use crate::error::{Error, Result};
use crate::types::{InitStrategy, MissingValuePolicy, WrapPolicy};

/// Training parameters suitable for config files and presets.
///
/// Validated once, at training start; training never begins on invalid
/// geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SomParams {
    /// Per-axis map extent, 2 to 5 axes.
    pub map_size: Vec<usize>,
    /// Per-axis initial neighborhood radius; same number of axes as `map_size`.
    pub initial_radius: Vec<u32>,
    /// Total iteration count T.
    pub iterations: usize,
    /// Learning rate at iteration 0.
    pub beta_init: f64,
    /// Learning rate at the start of the fine-tuning phase.
    pub beta_end: f64,
    pub init: InitStrategy,
    /// Seed for the uniform-random weight initialization.
    pub seed: u64,
    pub wrap: WrapPolicy,
    pub missing: MissingValuePolicy,
}

impl Default for SomParams {
    fn default() -> Self {
        Self {
            map_size: vec![8, 8],
            initial_radius: vec![3, 3],
            iterations: 100,
            beta_init: 1.0,
            beta_end: 0.1,
            init: InitStrategy::Random { min_weight: 0.0, max_weight: 1.0 },
            seed: 0,
            wrap: WrapPolicy::Clip,
            missing: MissingValuePolicy::None,
        }
    }
}

impl SomParams {
    /// Checks every training precondition against a given sample length.
    ///
    /// All failures here leave the trainer untouched: no map is allocated and
    /// no sample is consumed.
    pub fn validate(&self, sample_len: usize) -> Result<()> {
        let dims = self.map_size.len();
        if !(2..=5).contains(&dims) {
            return Err(Error::UnsupportedDimensionality { dims });
        }
        if self.map_size.iter().any(|&e| e == 0) {
            return Err(Error::InvalidParameter {
                param: "map_size",
                value: format!("{:?}", self.map_size),
            });
        }
        if self.initial_radius.len() != dims {
            return Err(Error::InvalidParameter {
                param: "initial_radius",
                value: format!("{:?} (expected {} axes)", self.initial_radius, dims),
            });
        }
        if self.initial_radius.iter().any(|&r| r == 0) {
            return Err(Error::InvalidParameter {
                param: "initial_radius",
                value: format!("{:?}", self.initial_radius),
            });
        }
        if self.iterations == 0 {
            return Err(Error::InvalidParameter { param: "iterations", value: "0".to_string() });
        }
        if sample_len == 0 {
            return Err(Error::InvalidParameter {
                param: "samples",
                value: "empty vectors".to_string(),
            });
        }
        match &self.init {
            InitStrategy::Random { min_weight, max_weight } => {
                if !(min_weight <= max_weight) {
                    return Err(Error::InvalidParameter {
                        param: "min_weight/max_weight",
                        value: format!("[{}, {}]", min_weight, max_weight),
                    });
                }
            }
            InitStrategy::Constant(v) => {
                if v.len() != sample_len {
                    return Err(Error::LengthMismatch { sample: sample_len, neuron: v.len() });
                }
            }
        }
        let threshold = iteration_threshold(&self.initial_radius, self.iterations);
        if threshold >= self.iterations {
            return Err(Error::DegenerateSchedule { threshold, total: self.iterations });
        }
        Ok(())
    }

    /// Number of map axes.
    pub fn dimensionality(&self) -> usize {
        self.map_size.len()
    }
}
