//! Dense n-dimensional grid of neuron vectors: the trained model state.
//! Neurons are stored as rows of a 2-D weight matrix in grid-scan order
//! (row-major over the extents, last axis fastest), which fixes the winner
//! tie-break and the persistence traversal order.
use ndarray::{Array2, ArrayView1, ArrayViewMut1};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::core::som::distance::sample_distance;
use crate::types::MissingValuePolicy;

#[derive(Debug, Clone, PartialEq)]
pub struct SomMap {
    extent: Vec<usize>,
    neuron_len: usize,
    weights: Array2<f64>,
}

impl SomMap {
    /// Allocates a map with every neuron set to a copy of `neuron`.
    pub fn filled(extent: &[usize], neuron: &[f64]) -> Self {
        let count = extent.iter().product();
        let mut weights = Array2::zeros((count, neuron.len()));
        for mut row in weights.rows_mut() {
            for (w, &v) in row.iter_mut().zip(neuron.iter()) {
                *w = v;
            }
        }
        Self { extent: extent.to_vec(), neuron_len: neuron.len(), weights }
    }

    /// Allocates a map with independent per-component draws, uniform over
    /// [min_weight, max_weight]. A fixed seed reproduces the identical
    /// initial state; draws run over neurons in grid-scan order, components
    /// in index order.
    pub fn random(
        extent: &[usize],
        neuron_len: usize,
        min_weight: f64,
        max_weight: f64,
        seed: u64,
    ) -> Self {
        let count: usize = extent.iter().product();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut weights = Array2::zeros((count, neuron_len));
        for mut row in weights.rows_mut() {
            for w in row.iter_mut() {
                *w = rng.gen_range(min_weight..=max_weight);
            }
        }
        Self { extent: extent.to_vec(), neuron_len, weights }
    }

    /// Reassembles a map from persisted parts.
    pub(crate) fn from_parts(extent: Vec<usize>, neuron_len: usize, weights: Array2<f64>) -> Self {
        debug_assert_eq!(weights.nrows(), extent.iter().product::<usize>());
        debug_assert_eq!(weights.ncols(), neuron_len);
        Self { extent, neuron_len, weights }
    }

    /// Per-axis sizes.
    pub fn extent(&self) -> &[usize] {
        &self.extent
    }

    /// Number of map axes.
    pub fn dimensionality(&self) -> usize {
        self.extent.len()
    }

    /// Components per neuron.
    pub fn neuron_len(&self) -> usize {
        self.neuron_len
    }

    /// Total number of neurons.
    pub fn neuron_count(&self) -> usize {
        self.weights.nrows()
    }

    /// Row-major linear index of a coordinate tuple (last axis fastest).
    pub fn linear_index(&self, coord: &[usize]) -> usize {
        debug_assert_eq!(coord.len(), self.extent.len());
        coord.iter().zip(self.extent.iter()).fold(0, |acc, (&c, &e)| {
            debug_assert!(c < e);
            acc * e + c
        })
    }

    /// Coordinate tuple of a linear index; inverse of [`Self::linear_index`].
    pub fn coordinate_of(&self, index: usize) -> Vec<usize> {
        let mut coord = vec![0; self.extent.len()];
        let mut rest = index;
        for axis in (0..self.extent.len()).rev() {
            coord[axis] = rest % self.extent[axis];
            rest /= self.extent[axis];
        }
        coord
    }

    pub fn neuron(&self, coord: &[usize]) -> ArrayView1<'_, f64> {
        self.weights.row(self.linear_index(coord))
    }

    pub fn set_neuron(&mut self, coord: &[usize], values: &[f64]) {
        debug_assert_eq!(values.len(), self.neuron_len);
        let index = self.linear_index(coord);
        for (w, &v) in self.weights.row_mut(index).iter_mut().zip(values.iter()) {
            *w = v;
        }
    }

    pub(crate) fn neuron_at(&self, index: usize) -> ArrayView1<'_, f64> {
        self.weights.row(index)
    }

    pub(crate) fn neuron_at_mut(&mut self, index: usize) -> ArrayViewMut1<'_, f64> {
        self.weights.row_mut(index)
    }

    /// The full weight matrix, neurons as rows in grid-scan order.
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Linear index of the neuron minimizing the distance metric.
    ///
    /// The scan is linear in grid order and keeps the first minimum
    /// encountered; equidistant neurons later in the scan never win. Every
    /// downstream result depends on this scan order, so it must not change.
    pub fn winner_index(&self, sample: ArrayView1<f64>, missing: MissingValuePolicy) -> usize {
        let mut best_distance = f64::INFINITY;
        let mut best_index = 0;
        for (index, neuron) in self.weights.rows().into_iter().enumerate() {
            let distance = sample_distance(sample, neuron, missing);
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }
        best_index
    }

    /// Coordinate of the winning neuron for a sample.
    pub fn winner(&self, sample: ArrayView1<f64>, missing: MissingValuePolicy) -> Vec<usize> {
        self.coordinate_of(self.winner_index(sample, missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn constant_fill_copies_the_vector_into_every_neuron() {
        let map = SomMap::filled(&[3, 2], &[0.5, -1.0]);
        assert_eq!(map.neuron_count(), 6);
        for index in 0..map.neuron_count() {
            assert_eq!(map.neuron_at(index).to_vec(), vec![0.5, -1.0]);
        }
    }

    #[test]
    fn random_fill_is_reproducible_for_a_fixed_seed() {
        let a = SomMap::random(&[4, 4], 3, 0.0, 1.0, 7);
        let b = SomMap::random(&[4, 4], 3, 0.0, 1.0, 7);
        let c = SomMap::random(&[4, 4], 3, 0.0, 1.0, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
        for &w in a.weights().iter() {
            assert!((0.0..=1.0).contains(&w));
        }
    }

    #[test]
    fn linear_index_and_coordinate_round_trip() {
        let map = SomMap::filled(&[3, 4, 2], &[0.0]);
        for index in 0..map.neuron_count() {
            let coord = map.coordinate_of(index);
            assert_eq!(map.linear_index(&coord), index);
        }
        // last axis fastest
        assert_eq!(map.coordinate_of(1), vec![0, 0, 1]);
        assert_eq!(map.coordinate_of(2), vec![0, 1, 0]);
    }

    #[test]
    fn winner_prefers_the_exact_matching_neuron() {
        let mut map = SomMap::filled(&[4, 4], &[0.0, 0.0]);
        map.set_neuron(&[2, 3], &[5.0, 5.0]);
        let sample = array![5.0, 5.0];
        assert_eq!(map.winner(sample.view(), MissingValuePolicy::None), vec![2, 3]);
    }

    #[test]
    fn winner_tie_break_keeps_the_first_scanned_coordinate() {
        // Every neuron is equidistant from the sample; the grid-scan order
        // decides, and the origin is scanned first.
        let map = SomMap::filled(&[3, 3], &[1.0, 1.0]);
        let sample = array![0.0, 0.0];
        assert_eq!(map.winner(sample.view(), MissingValuePolicy::None), vec![0, 0]);
    }

    #[test]
    fn all_missing_sample_still_selects_the_first_scanned_coordinate() {
        let map = SomMap::random(&[3, 3], 2, 0.0, 1.0, 1);
        let sample = array![f64::NAN, f64::NAN];
        assert_eq!(map.winner(sample.view(), MissingValuePolicy::Ignore), vec![0, 0]);
    }
}
