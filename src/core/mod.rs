//! Core building blocks: training parameters and the SOM engine itself.
//! These are the primitives consumed by the high-level `api` module.
pub mod params;
pub mod som;
