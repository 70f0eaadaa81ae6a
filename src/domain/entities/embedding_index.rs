use crate::domain::error::DomainError;
use std::collections::HashSet;

/// Precomputed catalog embeddings: one fixed-dimension vector per position,
/// with `position_map[i]` naming the product whose vector sits at position `i`.
#[derive(Debug, Clone)]
pub struct EmbeddingIndex {
    dimension: usize,
    model: String,
    data: Vec<f32>,
    position_map: Vec<String>,
}

impl EmbeddingIndex {
    pub fn new(
        dimension: usize,
        model: impl Into<String>,
        vectors: Vec<Vec<f32>>,
        position_map: Vec<String>,
    ) -> Result<Self, DomainError> {
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(DomainError::DimensionMismatch {
                expected: dimension,
                actual: bad.len(),
            });
        }
        let data = vectors.into_iter().flatten().collect();
        Self::from_flat(dimension, model, data, position_map)
    }

    /// Build from row-major vector data (`position_map.len() * dimension` floats).
    pub fn from_flat(
        dimension: usize,
        model: impl Into<String>,
        data: Vec<f32>,
        position_map: Vec<String>,
    ) -> Result<Self, DomainError> {
        if dimension == 0 {
            return Err(DomainError::Artifact("index dimension must be positive".into()));
        }
        if data.len() != dimension * position_map.len() {
            return Err(DomainError::Artifact(format!(
                "index holds {} vectors but position map has {} entries",
                data.len() / dimension,
                position_map.len()
            )));
        }
        let mut seen = HashSet::with_capacity(position_map.len());
        if let Some(dup) = position_map.iter().find(|id| !seen.insert(id.as_str())) {
            return Err(DomainError::Artifact(format!(
                "product {dup} appears more than once in position map"
            )));
        }
        Ok(Self {
            dimension,
            model: model.into(),
            data,
            position_map,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embedding model the vectors were produced with.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn len(&self) -> usize {
        self.position_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position_map.is_empty()
    }

    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        let start = position.checked_mul(self.dimension)?;
        self.data.get(start..start + self.dimension)
    }

    pub fn product_id(&self, position: usize) -> Option<&str> {
        self.position_map.get(position).map(String::as_str)
    }

    pub fn position_map(&self) -> &[String] {
        &self.position_map
    }

    /// Raw row-major vector data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}
