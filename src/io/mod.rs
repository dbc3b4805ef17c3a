//! I/O layer: sample text files, the binary model format with its
//! magic-token registry, and the JSON metadata sidecar.
pub mod samples;
pub use samples::{SampleSet, read_samples};

pub mod model;
pub use model::{
    MODEL_REGISTRY, ModelHeader, dump_model, dump_model_to_path, kind_for_magic, load_model,
    load_model_auto, read_header, read_model, read_model_any, save_model, write_model,
};

pub mod metadata;
pub use metadata::{ModelMetadata, create_model_metadata_sidecar};
