//! JSON metadata sidecar written next to a saved model: the training
//! parameters and provenance of the run, for inspection only. The sidecar is
//! never read back.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::core::params::SomParams;
use crate::error::{Error, Result};
use crate::types::{InitStrategy, MissingValuePolicy, WrapPolicy};

#[derive(Debug, Serialize)]
pub struct ModelMetadata {
    pub generator: String,
    pub created: String,
    pub map_size: Vec<usize>,
    pub initial_radius: Vec<u32>,
    pub iterations: usize,
    pub beta_init: f64,
    pub beta_end: f64,
    pub init: InitStrategy,
    pub seed: u64,
    pub wrap: WrapPolicy,
    pub missing: MissingValuePolicy,
    pub sample_count: usize,
}

/// Writes `<model>.json` beside the model file and returns its path.
pub fn create_model_metadata_sidecar(
    model_path: &Path,
    params: &SomParams,
    sample_count: usize,
) -> Result<PathBuf> {
    let metadata = ModelMetadata {
        generator: format!("sompro {}", env!("CARGO_PKG_VERSION")),
        created: chrono::Utc::now().to_rfc3339(),
        map_size: params.map_size.clone(),
        initial_radius: params.initial_radius.clone(),
        iterations: params.iterations,
        beta_init: params.beta_init,
        beta_end: params.beta_end,
        init: params.init.clone(),
        seed: params.seed,
        wrap: params.wrap,
        missing: params.missing,
        sample_count,
    };
    let json =
        serde_json::to_string_pretty(&metadata).map_err(|e| Error::Metadata(e.to_string()))?;
    let sidecar = model_path.with_extension("json");
    fs::write(&sidecar, json)?;
    info!("wrote model metadata sidecar: {:?}", sidecar);
    Ok(sidecar)
}
