//! The self-organizing map engine: distance metrics, iteration schedules,
//! the neuron grid, and the sequential trainer. Training is deterministic:
//! a fixed seed and sample order reproduce the map exactly.
pub mod behavior;
pub mod distance;
pub mod map;
pub mod trainer;

pub use behavior::{CzihoLearning, CzihoNeighborhood, iteration_threshold};
pub use map::SomMap;
pub use trainer::{SomTrainer, TrainerState};
