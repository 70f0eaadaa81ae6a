//! On-disk index artifacts: a binary vectors file plus a JSON position map.
//!
//! Vectors file layout (little-endian):
//! `b"STVX"` | u32 version | u32 dimension | u64 count | u32 model length |
//! model name bytes | `count * dimension` f32 values.

use crate::domain::entities::embedding_index::EmbeddingIndex;
use crate::domain::error::DomainError;
use std::path::Path;

const MAGIC: &[u8; 4] = b"STVX";
const VERSION: u32 = 1;

pub fn encode_vectors(index: &EmbeddingIndex) -> Vec<u8> {
    let model = index.model().as_bytes();
    let mut out = Vec::with_capacity(24 + model.len() + index.data().len() * 4);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&(index.dimension() as u32).to_le_bytes());
    out.extend_from_slice(&(index.len() as u64).to_le_bytes());
    out.extend_from_slice(&(model.len() as u32).to_le_bytes());
    out.extend_from_slice(model);
    out.extend(index.data().iter().flat_map(|f| f.to_le_bytes()));
    out
}

/// Decoded vectors file, before it is paired with a position map.
#[derive(Debug)]
pub struct VectorsFile {
    pub dimension: usize,
    pub count: usize,
    pub model: String,
    pub data: Vec<f32>,
}

pub fn decode_vectors(bytes: &[u8]) -> Result<VectorsFile, DomainError> {
    let mut cursor = Cursor { bytes, pos: 0 };
    if cursor.take(4)? != MAGIC {
        return Err(DomainError::Artifact("not an index file (bad magic)".into()));
    }
    let version = cursor.u32()?;
    if version != VERSION {
        return Err(DomainError::Artifact(format!("unsupported index version {version}")));
    }
    let dimension = cursor.u32()? as usize;
    let count = cursor.u64()? as usize;
    let model_len = cursor.u32()? as usize;
    let model = String::from_utf8(cursor.take(model_len)?.to_vec())
        .map_err(|e| DomainError::Artifact(format!("model name is not UTF-8: {e}")))?;

    let expected = dimension
        .checked_mul(count)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| DomainError::Artifact("index header overflows".into()))?;
    let body = cursor.take(expected)?;
    if cursor.pos != bytes.len() {
        return Err(DomainError::Artifact(format!(
            "{} trailing bytes after index body",
            bytes.len() - cursor.pos
        )));
    }
    let data = body
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    Ok(VectorsFile {
        dimension,
        count,
        model,
        data,
    })
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], DomainError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| DomainError::Artifact("index file is truncated".into()))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u32(&mut self) -> Result<u32, DomainError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn u64(&mut self) -> Result<u64, DomainError> {
        let b = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(b);
        Ok(u64::from_le_bytes(buf))
    }
}

pub fn save(index: &EmbeddingIndex, index_path: &Path, map_path: &Path) -> Result<(), DomainError> {
    std::fs::write(index_path, encode_vectors(index))?;
    std::fs::write(map_path, serde_json::to_string(index.position_map())?)?;
    Ok(())
}

pub fn load(index_path: &Path, map_path: &Path) -> Result<EmbeddingIndex, DomainError> {
    let bytes = std::fs::read(index_path).map_err(|e| {
        DomainError::Artifact(format!("cannot read index {}: {e}", index_path.display()))
    })?;
    let raw_map = std::fs::read_to_string(map_path).map_err(|e| {
        DomainError::Artifact(format!("cannot read product map {}: {e}", map_path.display()))
    })?;
    let position_map: Vec<String> = serde_json::from_str(&raw_map).map_err(|e| {
        DomainError::Artifact(format!("invalid product map {}: {e}", map_path.display()))
    })?;

    let file = decode_vectors(&bytes)?;
    if file.count != position_map.len() {
        return Err(DomainError::Artifact(format!(
            "index has {} vectors but product map has {} ids",
            file.count,
            position_map.len()
        )));
    }
    EmbeddingIndex::from_flat(file.dimension, file.model, file.data, position_map)
}
