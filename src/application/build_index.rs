use crate::domain::entities::embedding_index::EmbeddingIndex;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::product_catalog::ProductCatalog;
use crate::infrastructure::index::artifacts;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

const BATCH_SIZE: usize = 32;

#[derive(Debug, Serialize)]
pub struct BuildReport {
    pub products: usize,
    pub dimension: usize,
    pub model: String,
    pub built_at: DateTime<Utc>,
}

pub struct BuildIndexUseCase {
    catalog: Arc<dyn ProductCatalog>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl BuildIndexUseCase {
    pub fn new(catalog: Arc<dyn ProductCatalog>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { catalog, embedder }
    }

    /// Embed every catalog record, in catalog order.
    pub async fn build(&self) -> Result<EmbeddingIndex, DomainError> {
        let dimension = self.embedder.dimension();
        let products = self.catalog.all();
        let mut vectors = Vec::with_capacity(products.len());

        for chunk in products.chunks(BATCH_SIZE) {
            let texts: Vec<String> = chunk.iter().map(|p| p.searchable_text()).collect();
            let batch = self.embedder.embed(&texts, InputType::Document).await?;
            if batch.len() != chunk.len() {
                return Err(DomainError::Embedding(format!(
                    "encoder returned {} vectors for {} texts",
                    batch.len(),
                    chunk.len()
                )));
            }
            vectors.extend(batch);
            tracing::debug!(embedded = vectors.len(), total = products.len(), "embedding batch done");
        }

        let ids = products.iter().map(|p| p.product_id.clone()).collect();
        EmbeddingIndex::new(dimension, self.embedder.model(), vectors, ids)
    }

    pub async fn execute(&self, index_path: &Path, map_path: &Path) -> Result<BuildReport, DomainError> {
        let index = self.build().await?;
        artifacts::save(&index, index_path, map_path)?;
        tracing::info!(
            products = index.len(),
            index = %index_path.display(),
            map = %map_path.display(),
            "index written"
        );
        Ok(BuildReport {
            products: index.len(),
            dimension: index.dimension(),
            model: index.model().to_string(),
            built_at: Utc::now(),
        })
    }
}
