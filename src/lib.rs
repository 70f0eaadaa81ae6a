pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::ask::{AskResponse, AskUseCase};
use crate::application::compose::ComposeUseCase;
use crate::application::retrieve::RetrieveUseCase;
use crate::config::{Config, Settings};
use crate::domain::entities::embedding_index::EmbeddingIndex;
use crate::domain::entities::product::ProductRecord;
use crate::domain::entities::query::UserQuery;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::generation_port::TextGenerator;
use crate::domain::ports::product_catalog::ProductCatalog;
use crate::infrastructure::catalog::json_catalog::JsonCatalog;
use crate::infrastructure::index::artifacts;
use std::sync::Arc;

/// The assistant backend: catalog, index and providers are wired once here
/// and shared read-only by every request.
pub struct Stacy {
    retrieve_uc: Arc<RetrieveUseCase>,
    ask_uc: AskUseCase,
    catalog: Arc<dyn ProductCatalog>,
    index: Arc<EmbeddingIndex>,
}

impl Stacy {
    /// Load startup artifacts named by `config` and build its providers.
    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        let generator = config.build_generator()?;
        let catalog = JsonCatalog::load(&config.catalog_path)?;
        tracing::info!(products = catalog.len(), path = %config.catalog_path.display(), "catalog loaded");

        let index = artifacts::load(&config.index_path, &config.map_path)?;
        tracing::info!(
            vectors = index.len(),
            dimension = index.dimension(),
            model = index.model(),
            "embedding index loaded"
        );

        Self::with_providers(
            Arc::new(catalog),
            Arc::new(index),
            config.build_embedder()?,
            generator,
            config.settings.clone(),
        )
    }

    pub fn with_providers(
        catalog: Arc<dyn ProductCatalog>,
        index: Arc<EmbeddingIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn TextGenerator>,
        settings: Settings,
    ) -> Result<Self, DomainError> {
        if settings.top_k == 0 {
            return Err(DomainError::Config("top_k must be at least 1".into()));
        }
        if embedder.dimension() != index.dimension() {
            return Err(DomainError::DimensionMismatch {
                expected: index.dimension(),
                actual: embedder.dimension(),
            });
        }
        if let Some(missing) = index.position_map().iter().find(|id| catalog.get(id).is_none()) {
            return Err(DomainError::Artifact(format!(
                "product map references {missing}, which is not in the catalog"
            )));
        }
        if index.model() != embedder.model() {
            tracing::warn!(
                index_model = index.model(),
                encoder_model = embedder.model(),
                "index was built with a different embedding model"
            );
        }

        let retrieve_uc = Arc::new(RetrieveUseCase::new(
            catalog.clone(),
            index.clone(),
            embedder,
            settings.top_k,
        ));
        let compose_uc = ComposeUseCase::new(generator, settings.assistant_name);

        Ok(Self {
            ask_uc: AskUseCase::new(retrieve_uc.clone(), compose_uc),
            retrieve_uc,
            catalog,
            index,
        })
    }

    pub async fn ask(&self, query: &UserQuery) -> Result<AskResponse, DomainError> {
        self.ask_uc.execute(query).await
    }

    pub async fn retrieve(&self, text: &str) -> Result<Vec<ProductRecord>, DomainError> {
        self.retrieve_uc.execute(text).await
    }

    pub async fn retrieve_top(&self, text: &str, k: usize) -> Result<Vec<ProductRecord>, DomainError> {
        self.retrieve_uc.execute_with_k(text, k).await
    }

    pub async fn encode(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        self.retrieve_uc.encode(text).await
    }

    pub fn catalog_size(&self) -> usize {
        self.catalog.len()
    }

    pub fn index_size(&self) -> usize {
        self.index.len()
    }
}
