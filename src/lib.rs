#![doc = r#"
SOMPRO — a self-organizing map (SOM) training and classification engine.

This crate provides a typed, ergonomic API for training Kohonen
self-organizing maps over remote-sensing sample data: a dense 2- to
5-dimensional neuron grid, deterministic sequential competitive learning,
bounded and toroidal edge policies, missing-value-tolerant distances, and a
compact binary model format. It powers the SOMPRO CLI and can be embedded in
your own Rust applications.

Determinism
-----------
Training is strictly sequential and reproducible: a fixed seed, sample order,
and parameter set produce a bit-identical map, and two identical runs persist
byte-identical model files.

Add dependency
--------------
```toml
[dependencies]
sompro = "0.1"
```

Quick start: train in memory
----------------------------
```rust
use sompro::{api, MissingValuePolicy, SampleSet, SomParams};

fn main() -> sompro::Result<()> {
    let samples = SampleSet::new(vec![
        vec![0.9, 0.1, 0.1],
        vec![0.1, 0.9, 0.1],
        vec![0.1, 0.1, 0.9],
    ])?;
    let params = SomParams {
        map_size: vec![4, 4],
        initial_radius: vec![2, 2],
        iterations: 25,
        seed: 42,
        ..Default::default()
    };

    let map = api::train_sample_set(&samples, &params)?;
    let winner = map.winner(samples.get(0), MissingValuePolicy::None);
    assert_eq!(winner.len(), 2);
    Ok(())
}
```

Train from a sample file and persist the model
----------------------------------------------
```rust,no_run
use std::path::Path;
use sompro::{api, SomParams};

fn main() -> sompro::Result<()> {
    let params = SomParams::default();
    api::train_from_path(
        Path::new("/data/samples.txt"),
        Path::new("/out/model.som"),
        &params,
        true, // write the JSON metadata sidecar
    )
}
```

Classify new samples against a persisted model
----------------------------------------------
```rust,no_run
use std::path::Path;
use sompro::{api, MissingValuePolicy};

fn main() -> sompro::Result<()> {
    let count = api::classify_to_path(
        Path::new("/out/model.som"),
        Path::new("/data/new_samples.txt"),
        Path::new("/out/labels.txt"),
        MissingValuePolicy::Ignore,
    )?;
    println!("classified {count} samples");
    Ok(())
}
```

Error handling
--------------
All public functions return `sompro::Result<T>`; match on `sompro::Error` to
handle specific cases, e.g. configuration or model-format errors.

```rust,no_run
use std::path::Path;
use sompro::{load_model, Error};

fn main() {
    match load_model(Path::new("/out/model.som"), 2) {
        Ok(map) => println!("map extent: {:?}", map.extent()),
        Err(Error::UnknownMagic { found }) => eprintln!("not a model file: {found:?}"),
        Err(Error::DimensionalityMismatch { expected, found }) => {
            eprintln!("expected a {expected}-axis map, file holds {found}")
        }
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`types`] — enums and core types (e.g. `WrapPolicy`, `MissingValuePolicy`).
- [`core`] — the SOM engine: map, trainer, schedules, distances.
- [`io`] — sample files, the binary model format, metadata sidecars.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::SomParams;
pub use crate::core::som::{
    CzihoLearning, CzihoNeighborhood, SomMap, SomTrainer, TrainerState, iteration_threshold,
};
pub use error::{Error, Result};
pub use types::{InitStrategy, MissingValuePolicy, ModelKind, WrapPolicy};

// Sample and model I/O
pub use io::model::{
    MODEL_REGISTRY, dump_model, dump_model_to_path, load_model, load_model_auto, save_model,
};
pub use io::samples::{SampleSet, read_samples};

// High-level API re-exports
pub use api::{
    classify_sample_set, classify_to_path, dump_model_file, train_from_path, train_sample_set,
};
