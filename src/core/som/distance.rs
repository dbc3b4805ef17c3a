//! Dissimilarity between a sample and a neuron: plain squared Euclidean
//! distance, and a missing-value-tolerant variant where sentinel components
//! are excluded from the sum.
use ndarray::ArrayView1;

use crate::types::MissingValuePolicy;

/// A sample component holding the missing-value sentinel (IEEE NaN) is
/// treated as unobserved: it contributes neither to distance nor to update.
#[inline]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// Sum of squared per-component differences.
pub fn squared_distance(sample: ArrayView1<f64>, neuron: ArrayView1<f64>) -> f64 {
    sample
        .iter()
        .zip(neuron.iter())
        .map(|(&s, &n)| {
            let d = s - n;
            d * d
        })
        .sum()
}

/// Same sum, silently skipping unobserved sample components.
pub fn squared_distance_ignoring_missing(sample: ArrayView1<f64>, neuron: ArrayView1<f64>) -> f64 {
    sample
        .iter()
        .zip(neuron.iter())
        .filter(|&(&s, _)| !is_missing(s))
        .map(|(&s, &n)| {
            let d = s - n;
            d * d
        })
        .sum()
}

/// Metric dispatch on the construction-time missing-value policy.
pub fn sample_distance(
    sample: ArrayView1<f64>,
    neuron: ArrayView1<f64>,
    missing: MissingValuePolicy,
) -> f64 {
    match missing {
        MissingValuePolicy::None => squared_distance(sample, neuron),
        MissingValuePolicy::Ignore => squared_distance_ignoring_missing(sample, neuron),
    }
}
