//! Sample input: an ordered, finite, restartable sequence of equal-length
//! vectors, loaded from whitespace-separated text files. The trainer consumes
//! one sample per step and cycles over the set when it is shorter than the
//! iteration count.
use std::fs;
use std::path::Path;

use ndarray::{Array2, ArrayView1};
use tracing::info;

use crate::error::{Error, Result};

/// Read-only sample storage, one sample per row.
///
/// Guaranteed non-empty with a uniform row length, so cyclic access never
/// fails mid-training.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    data: Array2<f64>,
}

impl SampleSet {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let count = rows.len();
        if count == 0 {
            return Err(Error::SampleSet("no samples".to_string()));
        }
        let sample_len = rows[0].len();
        let mut flat = Vec::with_capacity(count * sample_len);
        for (line, row) in rows.iter().enumerate() {
            if row.len() != sample_len {
                return Err(Error::SampleSet(format!(
                    "sample {} has {} components, expected {}",
                    line,
                    row.len(),
                    sample_len
                )));
            }
            flat.extend_from_slice(row);
        }
        let data = Array2::from_shape_vec((count, sample_len), flat)
            .map_err(|e| Error::SampleSet(e.to_string()))?;
        Ok(Self { data })
    }

    pub fn from_array(data: Array2<f64>) -> Result<Self> {
        if data.nrows() == 0 {
            return Err(Error::SampleSet("no samples".to_string()));
        }
        Ok(Self { data })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Components per sample.
    pub fn sample_len(&self) -> usize {
        self.data.ncols()
    }

    pub fn get(&self, index: usize) -> ArrayView1<'_, f64> {
        self.data.row(index)
    }

    /// Sample for training step `t`, wrapping around the set.
    pub fn cyclic(&self, t: usize) -> ArrayView1<'_, f64> {
        self.data.row(t % self.data.nrows())
    }

    pub fn iter(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.data.rows().into_iter()
    }
}

/// Reads a sample set from a text file: one sample per line, components
/// separated by whitespace. `nan` marks a missing component. Blank lines and
/// lines starting with `#` are skipped.
pub fn read_samples(path: &Path) -> Result<SampleSet> {
    let content = fs::read_to_string(path)?;
    let mut rows = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut row = Vec::new();
        for token in trimmed.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| {
                Error::SampleSet(format!("line {}: invalid value '{}'", number + 1, token))
            })?;
            row.push(value);
        }
        rows.push(row);
    }
    let samples = SampleSet::new(rows)?;
    info!(
        "read {} samples of {} components from {:?}",
        samples.len(),
        samples.sample_len(),
        path
    );
    Ok(samples)
}
