//! Binary model persistence and the human-readable dump.
//!
//! Layout, in this exact order: 3 raw magic bytes, map dimensionality (u32),
//! per-axis extents (u32 each, axis order matching construction), components
//! per neuron (u32), then every neuron's components in grid iteration order,
//! component-major, each narrowed to f32. All integers and floats are
//! little-endian. Anything else at the head of the stream is a wrong file,
//! not a warning.
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use ndarray::Array2;
use tracing::info;

use crate::core::som::map::SomMap;
use crate::error::{Error, Result};
use crate::types::ModelKind;

/// Static lookup table keyed by the 3-byte magic token. Replaces the runtime
/// object-factory registration used for model auto-detection.
pub const MODEL_REGISTRY: &[(&[u8; 3], ModelKind)] = &[(b"som", ModelKind::Som)];

/// Resolves a magic token through the registry.
pub fn kind_for_magic(magic: &[u8; 3]) -> Option<ModelKind> {
    MODEL_REGISTRY.iter().find(|(token, _)| **token == *magic).map(|(_, kind)| *kind)
}

/// Decoded model header; the weight body follows it in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHeader {
    pub kind: ModelKind,
    pub extent: Vec<usize>,
    pub neuron_len: usize,
}

/// Serializes a map, narrowing every component to f32.
pub fn write_model<W: Write>(map: &SomMap, writer: &mut W) -> Result<()> {
    writer.write_all(&ModelKind::Som.magic())?;
    writer.write_all(&(map.dimensionality() as u32).to_le_bytes())?;
    for &size in map.extent() {
        writer.write_all(&(size as u32).to_le_bytes())?;
    }
    writer.write_all(&(map.neuron_len() as u32).to_le_bytes())?;
    for &weight in map.weights().iter() {
        writer.write_all(&(weight as f32).to_le_bytes())?;
    }
    Ok(())
}

/// Saves a map to a file.
pub fn save_model(map: &SomMap, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_model(map, &mut writer)?;
    writer.flush()?;
    info!("saved SOM model {:?} to {:?}", map.extent(), path);
    Ok(())
}

/// Reads and validates a model header. Fails before anything is allocated:
/// unknown magic, a dimensionality outside 2 to 5, or a zero-sized field is
/// a wrong or corrupt file.
pub fn read_header<R: Read>(reader: &mut R) -> Result<ModelHeader> {
    let mut magic = [0u8; 3];
    read_exact_or(reader, &mut magic, "magic token")?;
    let kind = kind_for_magic(&magic).ok_or(Error::UnknownMagic { found: magic })?;

    let dims = read_u32(reader, "dimensionality")? as usize;
    if !(2..=5).contains(&dims) {
        return Err(Error::CorruptHeader(format!("dimensionality {}", dims)));
    }
    let mut extent = Vec::with_capacity(dims);
    for axis in 0..dims {
        let size = read_u32(reader, "axis extent")? as usize;
        if size == 0 {
            return Err(Error::CorruptHeader(format!("zero extent on axis {}", axis)));
        }
        extent.push(size);
    }
    let neuron_len = read_u32(reader, "vector length")? as usize;
    if neuron_len == 0 {
        return Err(Error::CorruptHeader("zero vector length".to_string()));
    }
    Ok(ModelHeader { kind, extent, neuron_len })
}

/// Deserializes a map, validating the dimensionality against the expected
/// one. On mismatch no map is produced.
pub fn read_model<R: Read>(reader: &mut R, expected_dimensionality: usize) -> Result<SomMap> {
    let header = read_header(reader)?;
    if header.extent.len() != expected_dimensionality {
        return Err(Error::DimensionalityMismatch {
            expected: expected_dimensionality as u32,
            found: header.extent.len() as u32,
        });
    }
    read_body(reader, header)
}

/// Deserializes a map of any registered kind and dimensionality, the
/// file-probing counterpart of [`read_model`].
pub fn read_model_any<R: Read>(reader: &mut R) -> Result<SomMap> {
    let header = read_header(reader)?;
    read_body(reader, header)
}

/// Loads a model file, expecting a map of the given dimensionality.
pub fn load_model(path: &Path, expected_dimensionality: usize) -> Result<SomMap> {
    let mut reader = BufReader::new(File::open(path)?);
    let map = read_model(&mut reader, expected_dimensionality)?;
    info!("loaded SOM model {:?} from {:?}", map.extent(), path);
    Ok(map)
}

/// Loads a model file of any registered kind.
pub fn load_model_auto(path: &Path) -> Result<SomMap> {
    let mut reader = BufReader::new(File::open(path)?);
    let map = read_model_any(&mut reader)?;
    info!("loaded SOM model {:?} from {:?}", map.extent(), path);
    Ok(map)
}

fn read_body<R: Read>(reader: &mut R, header: ModelHeader) -> Result<SomMap> {
    let count: usize = header.extent.iter().product();
    let mut flat = Vec::with_capacity(count * header.neuron_len);
    for _ in 0..count * header.neuron_len {
        flat.push(read_f32(reader, "neuron components")? as f64);
    }
    let weights = Array2::from_shape_vec((count, header.neuron_len), flat)
        .map_err(|e| Error::CorruptHeader(e.to_string()))?;
    Ok(SomMap::from_parts(header.extent, header.neuron_len, weights))
}

/// Writes the inspection dump: one line per neuron, space-separated
/// components, same traversal order as the binary body. No round-trip
/// contract.
pub fn dump_model<W: Write>(map: &SomMap, writer: &mut W) -> Result<()> {
    for neuron in map.weights().rows() {
        let line =
            neuron.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ");
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

pub fn dump_model_to_path(map: &SomMap, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    dump_model(map, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn read_exact_or<R: Read>(reader: &mut R, buf: &mut [u8], what: &'static str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof { Error::Truncated(what) } else { Error::Io(e) }
    })
}

fn read_u32<R: Read>(reader: &mut R, what: &'static str) -> Result<u32> {
    let mut buf = [0u8; 4];
    read_exact_or(reader, &mut buf, what)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_f32<R: Read>(reader: &mut R, what: &'static str) -> Result<f32> {
    let mut buf = [0u8; 4];
    read_exact_or(reader, &mut buf, what)?;
    Ok(f32::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_map() -> SomMap {
        SomMap::random(&[3, 2], 4, -1.0, 1.0, 11)
    }

    #[test]
    fn round_trip_preserves_weights_to_f32_precision() {
        let map = sample_map();
        let mut buffer = Vec::new();
        write_model(&map, &mut buffer).unwrap();
        let loaded = read_model(&mut Cursor::new(&buffer), 2).unwrap();

        assert_eq!(loaded.extent(), map.extent());
        assert_eq!(loaded.neuron_len(), map.neuron_len());
        for (&original, &restored) in map.weights().iter().zip(loaded.weights().iter()) {
            assert_eq!(restored, (original as f32) as f64);
        }
    }

    #[test]
    fn the_byte_layout_is_fixed() {
        let map = SomMap::filled(&[2, 2], &[1.5]);
        let mut buffer = Vec::new();
        write_model(&map, &mut buffer).unwrap();

        assert_eq!(&buffer[0..3], b"som");
        assert_eq!(buffer[3..7], 2u32.to_le_bytes());
        assert_eq!(buffer[7..11], 2u32.to_le_bytes());
        assert_eq!(buffer[11..15], 2u32.to_le_bytes());
        assert_eq!(buffer[15..19], 1u32.to_le_bytes());
        assert_eq!(buffer[19..23], 1.5f32.to_le_bytes());
        assert_eq!(buffer.len(), 19 + 4 * 4);
    }

    #[test]
    fn a_wrong_magic_token_is_a_fatal_format_error() {
        let mut buffer = Vec::new();
        write_model(&sample_map(), &mut buffer).unwrap();
        buffer[0..3].copy_from_slice(b"xxx");
        let err = read_model(&mut Cursor::new(&buffer), 2).unwrap_err();
        assert!(matches!(err, Error::UnknownMagic { found } if &found == b"xxx"));
    }

    #[test]
    fn a_dimensionality_mismatch_produces_no_map() {
        let mut buffer = Vec::new();
        write_model(&sample_map(), &mut buffer).unwrap();
        let err = read_model(&mut Cursor::new(&buffer), 3).unwrap_err();
        assert!(matches!(err, Error::DimensionalityMismatch { expected: 3, found: 2 }));
    }

    #[test]
    fn an_out_of_range_dimensionality_is_corrupt() {
        let mut buffer = Vec::new();
        write_model(&sample_map(), &mut buffer).unwrap();
        buffer[3..7].copy_from_slice(&7u32.to_le_bytes());
        let err = read_model(&mut Cursor::new(&buffer), 7).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn a_truncated_stream_is_a_format_error() {
        let mut buffer = Vec::new();
        write_model(&sample_map(), &mut buffer).unwrap();
        buffer.truncate(buffer.len() / 2);
        let err = read_model(&mut Cursor::new(&buffer), 2).unwrap_err();
        assert!(matches!(err, Error::Truncated(_)));
    }

    #[test]
    fn files_round_trip_and_auto_load_resolves_the_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.som");
        let map = sample_map();
        save_model(&map, &path).unwrap();

        let by_dim = load_model(&path, 2).unwrap();
        let by_probe = load_model_auto(&path).unwrap();
        assert_eq!(by_dim, by_probe);
    }

    #[test]
    fn the_dump_has_one_line_per_neuron_in_grid_order() {
        let mut map = SomMap::filled(&[2, 2], &[0.0, 0.0]);
        map.set_neuron(&[0, 1], &[1.0, 2.0]);
        let mut buffer = Vec::new();
        dump_model(&map, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "1 2");
    }
}
