//! Iteration schedules controlling neighborhood shrinkage and learning-rate
//! decay. Both are pure functions of the iteration index and are recomputed
//! from scratch every step; nothing here is accumulated across steps.

/// Integer breakpoint between the organization and fine-tuning phases of the
/// learning-rate schedule: `trunc(T * (1 - 1/sqrt(max(initial_radius))))`.
///
/// The breakpoint depends on map geometry, not only on the iteration count.
pub fn iteration_threshold(initial_radius: &[u32], total: usize) -> usize {
    let v0 = initial_radius.iter().copied().max().unwrap_or(1) as f64;
    (total as f64 * (1.0 - 1.0 / v0.sqrt())) as usize
}

/// Per-axis neighborhood radius schedule: quadratic shrink from the initial
/// radius down to zero at the final iteration.
#[derive(Debug, Clone)]
pub struct CzihoNeighborhood {
    pub initial_radius: Vec<u32>,
}

impl CzihoNeighborhood {
    pub fn new(initial_radius: Vec<u32>) -> Self {
        Self { initial_radius }
    }

    /// Radius on every axis at iteration `t` of `total`:
    /// `round(r0 * (1 - t/total)^2)`.
    pub fn radius(&self, t: usize, total: usize) -> Vec<u32> {
        let shrink = (1.0 - t as f64 / total as f64).powi(2);
        self.initial_radius.iter().map(|&r0| (r0 as f64 * shrink).round() as u32).collect()
    }
}

/// Two-phase learning-rate schedule: a fast global-organization ramp from
/// `beta_init`, then a slow fine-tuning ramp from `beta_end` once the
/// iteration threshold is crossed. The two branches are evaluated
/// independently; no continuity holds at the breakpoint.
#[derive(Debug, Clone)]
pub struct CzihoLearning {
    pub beta_init: f64,
    pub beta_end: f64,
    pub iteration_threshold: usize,
}

impl CzihoLearning {
    pub fn new(beta_init: f64, beta_end: f64, initial_radius: &[u32], total: usize) -> Self {
        Self { beta_init, beta_end, iteration_threshold: iteration_threshold(initial_radius, total) }
    }

    /// Learning rate at iteration `t` of `total`.
    ///
    /// The caller must have rejected `total <= iteration_threshold` up front;
    /// the second branch divides by their difference.
    pub fn beta(&self, t: usize, total: usize) -> f64 {
        if t < self.iteration_threshold {
            self.beta_init * (1.0 - t as f64 / total as f64)
        } else {
            self.beta_end
                * (1.0
                    - (t - self.iteration_threshold) as f64
                        / (total - self.iteration_threshold) as f64)
        }
    }
}
