//! High-level, ergonomic library API: train a map from a sample file or an
//! in-memory set, classify samples against a trained map, and write the
//! inspection dump. Prefer these entrypoints over the low-level core modules
//! when integrating SOMPRO.
use std::fs;
use std::path::Path;

use tracing::info;

use crate::core::params::SomParams;
use crate::core::som::map::SomMap;
use crate::core::som::trainer::SomTrainer;
use crate::error::Result;
use crate::io::metadata::create_model_metadata_sidecar;
use crate::io::model::{dump_model_to_path, load_model_auto, save_model};
use crate::io::samples::{SampleSet, read_samples};
use crate::types::MissingValuePolicy;

/// Trains a map over an in-memory sample set.
pub fn train_sample_set(samples: &SampleSet, params: &SomParams) -> Result<SomMap> {
    let mut trainer = SomTrainer::new(params.clone());
    trainer.run(samples)?;
    match trainer.into_map() {
        Some(map) => Ok(map),
        None => unreachable!("a trained trainer always owns a map"),
    }
}

/// Trains from a sample text file and persists the model, optionally with a
/// JSON metadata sidecar.
pub fn train_from_path(
    samples_path: &Path,
    model_path: &Path,
    params: &SomParams,
    write_metadata: bool,
) -> Result<()> {
    let samples = read_samples(samples_path)?;
    let map = train_sample_set(&samples, params)?;
    save_model(&map, model_path)?;
    if write_metadata {
        create_model_metadata_sidecar(model_path, params, samples.len())?;
    }
    Ok(())
}

/// Maps every sample to the linear index of its winning neuron
/// (vector-quantization labels).
pub fn classify_sample_set(
    map: &SomMap,
    samples: &SampleSet,
    missing: MissingValuePolicy,
) -> Vec<usize> {
    samples.iter().map(|sample| map.winner_index(sample, missing)).collect()
}

/// Classifies a sample file against a persisted model and writes one winner
/// index per line. Returns the number of classified samples.
pub fn classify_to_path(
    model_path: &Path,
    samples_path: &Path,
    output_path: &Path,
    missing: MissingValuePolicy,
) -> Result<usize> {
    let map = load_model_auto(model_path)?;
    let samples = read_samples(samples_path)?;
    let labels = classify_sample_set(&map, &samples, missing);
    let mut text =
        labels.iter().map(|label| label.to_string()).collect::<Vec<_>>().join("\n");
    text.push('\n');
    fs::write(output_path, text)?;
    info!("classified {} samples against {:?}", labels.len(), model_path);
    Ok(labels.len())
}

/// Writes the human-readable dump of a persisted model.
pub fn dump_model_file(model_path: &Path, output_path: &Path) -> Result<()> {
    let map = load_model_auto(model_path)?;
    dump_model_to_path(&map, output_path)
}
