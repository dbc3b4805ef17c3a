//! Training loop orchestration: winner search, neighborhood scan, weighted
//! update. The edge-wrap and missing-value variants are construction-time
//! policy flags consumed by one parameterized step loop, not separate
//! implementations.
use ndarray::ArrayView1;
use tracing::{debug, info};

use crate::core::params::SomParams;
use crate::core::som::behavior::{CzihoLearning, CzihoNeighborhood};
use crate::core::som::distance::is_missing;
use crate::core::som::map::SomMap;
use crate::error::{Error, Result};
use crate::io::samples::SampleSet;
use crate::types::{InitStrategy, MissingValuePolicy, WrapPolicy};

/// Trainer lifecycle. `Trained` is terminal: the map is never mutated again.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TrainerState {
    Uninitialized,
    Initialized,
    Training,
    Trained,
}

/// Sequential SOM trainer over a dense grid.
///
/// Holds exclusive mutation rights over its map for the duration of a run;
/// step t+1 reads the state produced by step t, so steps are never
/// parallelized.
pub struct SomTrainer {
    params: SomParams,
    neighborhood: CzihoNeighborhood,
    learning: CzihoLearning,
    map: Option<SomMap>,
    state: TrainerState,
}

impl SomTrainer {
    pub fn new(params: SomParams) -> Self {
        let neighborhood = CzihoNeighborhood::new(params.initial_radius.clone());
        let learning = CzihoLearning::new(
            params.beta_init,
            params.beta_end,
            &params.initial_radius,
            params.iterations,
        );
        Self { params, neighborhood, learning, map: None, state: TrainerState::Uninitialized }
    }

    pub fn state(&self) -> TrainerState {
        self.state
    }

    pub fn params(&self) -> &SomParams {
        &self.params
    }

    /// The current map, if one has been allocated.
    pub fn map(&self) -> Option<&SomMap> {
        self.map.as_ref()
    }

    /// Consumes the trainer and releases its map.
    pub fn into_map(self) -> Option<SomMap> {
        self.map
    }

    /// Validates every precondition and allocates the seeded map.
    ///
    /// On failure the trainer stays `Uninitialized` and owns no map.
    pub fn initialize(&mut self, samples: &SampleSet) -> Result<()> {
        self.params.validate(samples.sample_len())?;
        let map = match &self.params.init {
            InitStrategy::Constant(neuron) => SomMap::filled(&self.params.map_size, neuron),
            InitStrategy::Random { min_weight, max_weight } => SomMap::random(
                &self.params.map_size,
                samples.sample_len(),
                *min_weight,
                *max_weight,
                self.params.seed,
            ),
        };
        info!(
            "initialized SOM map {:?} with {}-component neurons ({})",
            self.params.map_size,
            samples.sample_len(),
            self.params.init
        );
        self.map = Some(map);
        self.state = TrainerState::Initialized;
        Ok(())
    }

    /// Runs the full iteration loop: t = 0..T, one sample per step, cycling
    /// over the set when it is shorter than T. Idempotent once `Trained`.
    pub fn run(&mut self, samples: &SampleSet) -> Result<()> {
        match self.state {
            TrainerState::Uninitialized => self.initialize(samples)?,
            TrainerState::Initialized => {}
            TrainerState::Training => unreachable!("run is not re-entrant"),
            TrainerState::Trained => return Ok(()),
        }
        let total = self.params.iterations;
        let wrap = self.params.wrap;
        let missing = self.params.missing;
        let map = match self.map.as_mut() {
            Some(map) => map,
            None => unreachable!("initialized trainer always owns a map"),
        };
        if map.neuron_len() != samples.sample_len() {
            return Err(Error::LengthMismatch {
                sample: samples.sample_len(),
                neuron: map.neuron_len(),
            });
        }

        self.state = TrainerState::Training;
        info!("training over {} iterations on {} samples", total, samples.len());
        for t in 0..total {
            let radius = self.neighborhood.radius(t, total);
            let beta = self.learning.beta(t, total);
            let sample = samples.cyclic(t);
            let winner = map.winner(sample, missing);
            debug!("t={} radius={:?} beta={:.6} winner={:?}", t, radius, beta, winner);
            update_neighborhood(map, &winner, sample, &radius, beta, wrap, missing);
        }
        self.state = TrainerState::Trained;
        info!("training complete");
        Ok(())
    }
}

/// Applies one weighted neighborhood update around the winner.
///
/// The neighborhood is elliptic: an offset belongs when
/// `sum_j (offset_j / radius_j)^2 <= 1`, where an axis with radius 0 admits
/// only offset 0 and contributes nothing to the sum. Offsets are visited in
/// lexicographic order (first axis slowest); on a torus smaller than the
/// neighborhood the same neuron can be hit more than once and the hits
/// compose in that order.
pub(crate) fn update_neighborhood(
    map: &mut SomMap,
    winner: &[usize],
    sample: ArrayView1<f64>,
    radius: &[u32],
    beta: f64,
    wrap: WrapPolicy,
    missing: MissingValuePolicy,
) {
    let dims = winner.len();
    let mut offset: Vec<i64> = radius.iter().map(|&r| -(r as i64)).collect();
    loop {
        let mut elliptical = 0.0;
        for axis in 0..dims {
            if radius[axis] > 0 {
                let ratio = offset[axis] as f64 / radius[axis] as f64;
                elliptical += ratio * ratio;
            }
        }
        if elliptical <= 1.0 {
            if let Some(coord) = resolve_coordinate(winner, &offset, map.extent(), wrap) {
                let temp_beta = beta / (1.0 + elliptical);
                let index = map.linear_index(&coord);
                let mut neuron = map.neuron_at_mut(index);
                for (w, &s) in neuron.iter_mut().zip(sample.iter()) {
                    if missing == MissingValuePolicy::Ignore && is_missing(s) {
                        continue;
                    }
                    *w += temp_beta * (s - *w);
                }
            }
        }

        // advance the offset odometer, last axis fastest
        let mut axis = dims;
        loop {
            if axis == 0 {
                return;
            }
            axis -= 1;
            if offset[axis] < radius[axis] as i64 {
                offset[axis] += 1;
                break;
            }
            offset[axis] = -(radius[axis] as i64);
        }
    }
}

/// Maps a winner-relative offset to a grid coordinate under the edge policy.
/// Clip drops offsets that leave the extent; Wrap folds every axis onto the
/// torus so the result is always within [0, extent).
fn resolve_coordinate(
    winner: &[usize],
    offset: &[i64],
    extent: &[usize],
    wrap: WrapPolicy,
) -> Option<Vec<usize>> {
    let mut coord = Vec::with_capacity(winner.len());
    for axis in 0..winner.len() {
        let raw = winner[axis] as i64 + offset[axis];
        let size = extent[axis] as i64;
        let resolved = match wrap {
            WrapPolicy::Clip => {
                if raw < 0 || raw >= size {
                    return None;
                }
                raw
            }
            WrapPolicy::Wrap => ((raw % size) + size) % size,
        };
        coord.push(resolved as usize);
    }
    Some(coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn test_params() -> SomParams {
        SomParams {
            map_size: vec![4, 4],
            initial_radius: vec![2, 2],
            iterations: 5,
            beta_init: 1.0,
            beta_end: 0.1,
            init: InitStrategy::Random { min_weight: 0.0, max_weight: 1.0 },
            seed: 42,
            wrap: WrapPolicy::Clip,
            missing: MissingValuePolicy::None,
        }
    }

    fn test_samples() -> SampleSet {
        SampleSet::new(vec![
            vec![0.9, 0.1, 0.1],
            vec![0.1, 0.9, 0.1],
            vec![0.1, 0.1, 0.9],
        ])
        .unwrap()
    }

    #[test]
    fn invalid_configuration_keeps_the_trainer_uninitialized() {
        let cases = vec![
            SomParams { map_size: vec![8], initial_radius: vec![2], ..test_params() },
            SomParams {
                map_size: vec![2; 6],
                initial_radius: vec![1; 6],
                ..test_params()
            },
            SomParams { map_size: vec![4, 0], ..test_params() },
            SomParams { initial_radius: vec![2, 0], ..test_params() },
            SomParams { initial_radius: vec![2], ..test_params() },
            SomParams { iterations: 0, ..test_params() },
            SomParams {
                init: InitStrategy::Random { min_weight: 1.0, max_weight: 0.0 },
                ..test_params()
            },
            SomParams { init: InitStrategy::Constant(vec![0.5, 0.5]), ..test_params() },
        ];
        for params in cases {
            let mut trainer = SomTrainer::new(params);
            let err = trainer.run(&test_samples()).unwrap_err();
            assert!(err.is_configuration(), "unexpected error kind: {err}");
            assert_eq!(trainer.state(), TrainerState::Uninitialized);
            assert!(trainer.map().is_none());
        }
    }

    #[test]
    fn zero_iterations_never_touch_a_map() {
        let params = SomParams { iterations: 0, ..test_params() };
        let mut trainer = SomTrainer::new(params);
        assert!(trainer.run(&test_samples()).is_err());
        assert!(trainer.map().is_none());
    }

    #[test]
    fn training_is_deterministic_for_a_fixed_seed() {
        let samples = test_samples();
        let mut a = SomTrainer::new(test_params());
        let mut b = SomTrainer::new(test_params());
        a.run(&samples).unwrap();
        b.run(&samples).unwrap();
        assert_eq!(a.state(), TrainerState::Trained);
        assert_eq!(a.map().unwrap(), b.map().unwrap());

        let mut c = SomTrainer::new(SomParams { seed: 43, ..test_params() });
        c.run(&samples).unwrap();
        assert_ne!(a.map().unwrap(), c.map().unwrap());
    }

    #[test]
    fn run_is_a_no_op_once_trained() {
        let samples = test_samples();
        let mut trainer = SomTrainer::new(test_params());
        trainer.run(&samples).unwrap();
        let snapshot = trainer.map().unwrap().clone();
        trainer.run(&samples).unwrap();
        assert_eq!(trainer.map().unwrap(), &snapshot);
    }

    #[test]
    fn training_moves_neurons_toward_the_samples() {
        let params = SomParams {
            iterations: 60,
            init: InitStrategy::Constant(vec![0.5, 0.5, 0.5]),
            ..test_params()
        };
        let samples = test_samples();
        let mut trainer = SomTrainer::new(params);
        trainer.run(&samples).unwrap();
        let map = trainer.map().unwrap();
        for sample in 0..samples.len() {
            let winner = map.winner_index(samples.cyclic(sample), MissingValuePolicy::None);
            let distance = crate::core::som::distance::squared_distance(
                samples.cyclic(sample),
                map.neuron_at(winner),
            );
            assert!(distance < 0.25, "winner stayed far from its sample: {distance}");
        }
    }

    #[test]
    fn clip_policy_never_visits_offsets_outside_the_grid() {
        let mut map = SomMap::filled(&[4, 4], &[0.0, 0.0]);
        let sample = array![1.0, 1.0];
        update_neighborhood(
            &mut map,
            &[0, 0],
            sample.view(),
            &[1, 1],
            0.5,
            WrapPolicy::Clip,
            MissingValuePolicy::None,
        );
        // inside the clipped ellipse around the corner winner
        assert!(map.neuron(&[0, 0])[0] > 0.0);
        assert!(map.neuron(&[0, 1])[0] > 0.0);
        assert!(map.neuron(&[1, 0])[0] > 0.0);
        // diagonal fails the elliptic test, far corner is out of reach
        assert_eq!(map.neuron(&[1, 1])[0], 0.0);
        assert_eq!(map.neuron(&[3, 3])[0], 0.0);
    }

    #[test]
    fn wrapped_updates_are_symmetric_between_corner_and_center() {
        // On a 3x3 torus with radius 2 the corner winner must receive the
        // exact update pattern a center winner does, rigidly shifted.
        let sample = array![1.0, 1.0];
        let mut corner = SomMap::filled(&[3, 3], &[0.0, 0.0]);
        let mut center = SomMap::filled(&[3, 3], &[0.0, 0.0]);
        update_neighborhood(
            &mut corner,
            &[0, 0],
            sample.view(),
            &[2, 2],
            0.8,
            WrapPolicy::Wrap,
            MissingValuePolicy::None,
        );
        update_neighborhood(
            &mut center,
            &[1, 1],
            sample.view(),
            &[2, 2],
            0.8,
            WrapPolicy::Wrap,
            MissingValuePolicy::None,
        );
        for x in 0..3 {
            for y in 0..3 {
                let shifted = [(x + 1) % 3, (y + 1) % 3];
                assert_eq!(
                    corner.neuron(&[x, y]).to_vec(),
                    center.neuron(&shifted).to_vec(),
                    "asymmetry at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn wrapping_reaches_every_neuron_when_the_radius_exceeds_the_extent() {
        let mut map = SomMap::filled(&[3, 3], &[0.0]);
        let sample = array![1.0];
        update_neighborhood(
            &mut map,
            &[0, 0],
            sample.view(),
            &[5, 5],
            0.5,
            WrapPolicy::Wrap,
            MissingValuePolicy::None,
        );
        for index in 0..map.neuron_count() {
            let w = map.neuron_at(index)[0];
            assert!(w > 0.0 && w.is_finite(), "neuron {index} missed: {w}");
        }
    }

    #[test]
    fn all_missing_sample_produces_zero_net_weight_change() {
        let mut map = SomMap::random(&[3, 3], 2, 0.0, 1.0, 5);
        let snapshot = map.clone();
        let sample = array![f64::NAN, f64::NAN];
        let winner = map.winner(sample.view(), MissingValuePolicy::Ignore);
        assert_eq!(winner, vec![0, 0]);
        update_neighborhood(
            &mut map,
            &winner,
            sample.view(),
            &[2, 2],
            0.9,
            WrapPolicy::Clip,
            MissingValuePolicy::Ignore,
        );
        assert_eq!(map, snapshot);
    }

    #[test]
    fn partially_missing_sample_updates_only_observed_components() {
        let mut map = SomMap::filled(&[3, 3], &[0.25, 0.75]);
        let sample = array![1.0, f64::NAN];
        let winner = map.winner(sample.view(), MissingValuePolicy::Ignore);
        update_neighborhood(
            &mut map,
            &winner,
            sample.view(),
            &[1, 1],
            1.0,
            WrapPolicy::Clip,
            MissingValuePolicy::Ignore,
        );
        let updated = map.neuron(&winner);
        assert_eq!(updated[0], 1.0);
        assert_eq!(updated[1], 0.75);
    }
}
