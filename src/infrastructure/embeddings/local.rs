//! In-process sentence embeddings through fastembed's ONNX build of
//! `all-MiniLM-L6-v2`. The model is fetched into the cache directory on
//! first use and then runs offline.

use crate::domain::error::DomainError;

pub const MODEL_NAME: &str = "all-MiniLM-L6-v2";
pub const DIMENSION: usize = 384;

/// Reject model or dimension overrides the bundled model cannot honor.
pub fn check_overrides(model: Option<&str>, dimension: Option<usize>) -> Result<(), DomainError> {
    if let Some(name) = model {
        let bare = name.strip_prefix("sentence-transformers/").unwrap_or(name);
        if !bare.eq_ignore_ascii_case(MODEL_NAME) {
            return Err(DomainError::Config(format!(
                "local embeddings only support {MODEL_NAME}, got {name}"
            )));
        }
    }
    match dimension {
        Some(d) if d != DIMENSION => Err(DomainError::Config(format!(
            "{MODEL_NAME} produces {DIMENSION}-dimensional vectors, STACY_EMBEDDING_DIMENSION is {d}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(feature = "local-embeddings")]
pub use provider::LocalProvider;

#[cfg(feature = "local-embeddings")]
mod provider {
    use super::{DIMENSION, MODEL_NAME};
    use crate::domain::error::DomainError;
    use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
    use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
    use std::path::PathBuf;
    use std::sync::Arc;

    pub struct LocalProvider {
        model: Arc<TextEmbedding>,
    }

    impl LocalProvider {
        pub fn new(cache_dir: Option<PathBuf>) -> Result<Self, DomainError> {
            let mut options = InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
            if let Some(dir) = cache_dir {
                options = options.with_cache_dir(dir);
            }
            let model = TextEmbedding::try_new(options)
                .map_err(|e| DomainError::Config(format!("cannot load {MODEL_NAME}: {e}")))?;
            tracing::info!(model = MODEL_NAME, "local embedding model ready");
            Ok(Self { model: Arc::new(model) })
        }
    }

    #[async_trait::async_trait]
    impl EmbeddingProvider for LocalProvider {
        async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
            let model = self.model.clone();
            let texts = texts.to_vec();
            // ONNX inference is CPU-bound; keep it off the async workers.
            tokio::task::spawn_blocking(move || model.embed(texts, None))
                .await
                .map_err(|e| DomainError::Embedding(format!("embedding task failed: {e}")))?
                .map_err(|e| DomainError::Embedding(format!("{MODEL_NAME}: {e}")))
        }

        fn dimension(&self) -> usize {
            DIMENSION
        }

        fn model(&self) -> &str {
            MODEL_NAME
        }
    }
}
