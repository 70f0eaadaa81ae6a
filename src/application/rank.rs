use crate::domain::entities::embedding_index::EmbeddingIndex;
use crate::infrastructure::index::flat_l2::FlatL2Index;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub product_id: String,
    /// Squared Euclidean distance to the query vector.
    pub distance: f32,
}

/// Exact top-`k` search restricted to `eligible_ids`.
///
/// A transient flat index is built over the eligible vectors (in index
/// position order) for this call only. Eligible ids with no vector are
/// unreachable and silently skipped.
pub fn rank(
    query_vector: &[f32],
    eligible_ids: &HashSet<String>,
    index: &EmbeddingIndex,
    k: usize,
) -> Vec<Ranked> {
    if k == 0 {
        return Vec::new();
    }

    // `positions[i]` is the index position of the i-th vector in `subset`.
    let mut subset = FlatL2Index::with_capacity(index.dimension(), eligible_ids.len());
    let mut positions = Vec::new();
    for (pos, id) in index.position_map().iter().enumerate() {
        if !eligible_ids.contains(id.as_str()) {
            continue;
        }
        if let Some(v) = index.vector(pos) {
            if subset.add(v) {
                positions.push(pos);
            }
        }
    }
    if positions.is_empty() {
        return Vec::new();
    }

    subset
        .search(query_vector, k)
        .into_iter()
        .filter_map(|hit| {
            let pos = *positions.get(hit.position)?;
            Some(Ranked {
                product_id: index.product_id(pos)?.to_string(),
                distance: hit.distance,
            })
        })
        .collect()
}
