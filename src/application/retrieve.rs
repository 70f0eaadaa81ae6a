use crate::application::intent_filter::classify_and_filter;
use crate::application::rank::rank;
use crate::domain::entities::embedding_index::EmbeddingIndex;
use crate::domain::entities::product::ProductRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::product_catalog::ProductCatalog;
use std::sync::Arc;

pub struct RetrieveUseCase {
    catalog: Arc<dyn ProductCatalog>,
    index: Arc<EmbeddingIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl RetrieveUseCase {
    pub fn new(
        catalog: Arc<dyn ProductCatalog>,
        index: Arc<EmbeddingIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        top_k: usize,
    ) -> Self {
        Self { catalog, index, embedder, top_k }
    }

    /// Query text → vector in the index's embedding space.
    pub async fn encode(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let vectors = self.embedder.embed(&[text.to_string()], InputType::Query).await?;
        let vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Embedding("encoder returned no vector".into()))?;
        if vector.len() != self.index.dimension() {
            return Err(DomainError::Embedding(format!(
                "encoder returned {} dimensions, index has {}",
                vector.len(),
                self.index.dimension()
            )));
        }
        Ok(vector)
    }

    pub async fn execute(&self, text: &str) -> Result<Vec<ProductRecord>, DomainError> {
        self.execute_with_k(text, self.top_k).await
    }

    /// Nearest eligible products, closest first; at most `k`, possibly none.
    pub async fn execute_with_k(&self, text: &str, k: usize) -> Result<Vec<ProductRecord>, DomainError> {
        let eligible = classify_and_filter(text, self.catalog.all());
        tracing::debug!(intent = %eligible.intent, eligible = eligible.ids.len(), "intent filter applied");
        if eligible.is_empty() {
            return Ok(vec![]);
        }

        let query_vector = self.encode(text).await?;
        let ranked = rank(&query_vector, &eligible.ids, &self.index, k);

        Ok(ranked
            .iter()
            .filter_map(|r| self.catalog.get(&r.product_id).cloned())
            .collect())
    }
}
