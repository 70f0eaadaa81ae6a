/// Exact brute-force nearest-neighbor index under squared Euclidean distance.
///
/// Built per request over a subset of the catalog and dropped afterwards.
pub struct FlatL2Index {
    dimension: usize,
    data: Vec<f32>,
}

/// A search hit: position within this index and its squared L2 distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub distance: f32,
}

impl FlatL2Index {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            data: Vec::new(),
        }
    }

    pub fn with_capacity(dimension: usize, vectors: usize) -> Self {
        Self {
            dimension,
            data: Vec::with_capacity(dimension * vectors),
        }
    }

    /// Append one vector; returns `false` (and adds nothing) on dimension mismatch.
    pub fn add(&mut self, vector: &[f32]) -> bool {
        if vector.len() != self.dimension {
            return false;
        }
        self.data.extend_from_slice(vector);
        true
    }

    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `k` nearest vectors, closest first. Equal distances keep insertion
    /// order. Returns fewer than `k` when the index is smaller.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<Neighbor> {
        if k == 0 || query.len() != self.dimension || self.is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(position, v)| Neighbor {
                position,
                distance: squared_l2(query, v),
            })
            .collect();
        // Stable sort keeps lower positions first among ties.
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);
        hits
    }
}

pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
