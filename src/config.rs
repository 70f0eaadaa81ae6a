//! Environment-driven configuration.
//!
//! Every setting comes from a `STACY_*` variable (optionally loaded from a
//! `.env` file). Validation runs once, before anything is served.

use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::generation_port::TextGenerator;
use crate::infrastructure::embeddings::hash::HashProvider;
use crate::infrastructure::embeddings::local;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::generation::disabled::DisabledGenerator;
use crate::infrastructure::generation::gemini::GeminiGenerator;
use crate::infrastructure::generation::openai::OpenAiChatGenerator;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_DIMENSION: usize = 384;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    Local,
    Hash,
    OpenAi,
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(EmbeddingBackend::Local),
            "hash" => Ok(EmbeddingBackend::Hash),
            "openai" => Ok(EmbeddingBackend::OpenAi),
            _ => Err(format!("Unknown embedding provider: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationBackend {
    Gemini,
    OpenAi,
    Disabled,
}

impl FromStr for GenerationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(GenerationBackend::Gemini),
            "openai" => Ok(GenerationBackend::OpenAi),
            "disabled" | "none" => Ok(GenerationBackend::Disabled),
            _ => Err(format!("Unknown generation provider: {s}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub dimension: Option<usize>,
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub backend: GenerationBackend,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

/// Request-pipeline knobs.
#[derive(Debug, Clone)]
pub struct Settings {
    pub top_k: usize,
    pub assistant_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            assistant_name: "Stacy".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub index_path: PathBuf,
    pub map_path: PathBuf,
    pub settings: Settings,
    pub embedding: EmbeddingConfig,
    pub generation: GenerationConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let top_k = parse_positive(&get, "STACY_TOP_K")?.unwrap_or(DEFAULT_TOP_K);

        let embedding = EmbeddingConfig {
            backend: get("STACY_EMBEDDING_PROVIDER")
                .map(|s| s.parse::<EmbeddingBackend>())
                .transpose()
                .map_err(DomainError::Config)?
                .unwrap_or(EmbeddingBackend::Local),
            model: get("STACY_EMBEDDING_MODEL"),
            api_key: get("STACY_EMBEDDING_API_KEY"),
            base_url: get("STACY_EMBEDDING_BASE_URL"),
            dimension: parse_positive(&get, "STACY_EMBEDDING_DIMENSION")?,
            cache_dir: get("STACY_EMBEDDING_CACHE_DIR").map(PathBuf::from),
        };

        let generation = GenerationConfig {
            backend: get("STACY_GENERATION_PROVIDER")
                .map(|s| s.parse::<GenerationBackend>())
                .transpose()
                .map_err(DomainError::Config)?
                .unwrap_or(GenerationBackend::Gemini),
            model: get("STACY_GENERATION_MODEL"),
            api_key: get("STACY_GENERATION_API_KEY"),
            base_url: get("STACY_GENERATION_BASE_URL"),
            timeout: Duration::from_secs(
                parse_positive(&get, "STACY_GENERATION_TIMEOUT_SECS")?.unwrap_or(30) as u64,
            ),
        };

        Ok(Self {
            catalog_path: get("STACY_CATALOG")
                .unwrap_or_else(|| "formatted_products.json".into())
                .into(),
            index_path: get("STACY_INDEX")
                .unwrap_or_else(|| "product_index.bin".into())
                .into(),
            map_path: get("STACY_PRODUCT_MAP")
                .unwrap_or_else(|| "product_map.json".into())
                .into(),
            settings: Settings {
                top_k,
                assistant_name: get("STACY_ASSISTANT_NAME").unwrap_or_else(|| "Stacy".into()),
            },
            embedding,
            generation,
        })
    }

    /// `local` loads the bundled model here, so this can fail on first
    /// download or on a bad override.
    pub fn build_embedder(&self) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        let e = &self.embedding;
        Ok(match e.backend {
            EmbeddingBackend::Local => {
                local::check_overrides(e.model.as_deref(), e.dimension)?;
                local_embedder(e.cache_dir.clone())?
            }
            EmbeddingBackend::Hash => Arc::new(HashProvider::new(e.dimension.unwrap_or(DEFAULT_DIMENSION))),
            EmbeddingBackend::OpenAi => Arc::new(OpenAiProvider::new(
                e.api_key.clone(),
                e.model.clone(),
                e.base_url.clone(),
                e.dimension,
            )),
        })
    }

    /// Fails when a hosted provider is selected without a credential.
    pub fn build_generator(&self) -> Result<Arc<dyn TextGenerator>, DomainError> {
        let g = &self.generation;
        if g.backend == GenerationBackend::Disabled {
            return Ok(Arc::new(DisabledGenerator));
        }
        let key = g.api_key.clone().ok_or_else(|| {
            DomainError::Config(
                "STACY_GENERATION_API_KEY is required unless STACY_GENERATION_PROVIDER=disabled".into(),
            )
        })?;
        Ok(match g.backend {
            GenerationBackend::OpenAi => Arc::new(OpenAiChatGenerator::new(key, g.model.clone(), g.base_url.clone(), g.timeout)?),
            _ => Arc::new(GeminiGenerator::new(key, g.model.clone(), g.base_url.clone(), g.timeout)?),
        })
    }
}

#[cfg(feature = "local-embeddings")]
fn local_embedder(cache_dir: Option<PathBuf>) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    Ok(Arc::new(local::LocalProvider::new(cache_dir)?))
}

#[cfg(not(feature = "local-embeddings"))]
fn local_embedder(_cache_dir: Option<PathBuf>) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    Err(DomainError::Config(
        "built without the local-embeddings feature; set STACY_EMBEDDING_PROVIDER to hash or openai".into(),
    ))
}

fn parse_positive<G>(get: &G, key: &str) -> Result<Option<usize>, DomainError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(None),
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(DomainError::Config(format!("{key} must be a positive integer, got {raw:?}"))),
        },
    }
}

/// Load a `.env` file from the working directory or its ancestors, if one
/// exists. Must run before the tracing subscriber reads `RUST_LOG`.
pub fn load_env() -> Result<Option<PathBuf>, DomainError> {
    env_file_result(dotenvy::dotenv())
}

/// Load a specific `.env` file. A missing file yields `Ok(None)`.
pub fn load_env_from(path: &Path) -> Result<Option<PathBuf>, DomainError> {
    env_file_result(dotenvy::from_path(path).map(|_| path.to_path_buf()))
}

fn env_file_result(result: dotenvy::Result<PathBuf>) -> Result<Option<PathBuf>, DomainError> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(dotenvy::Error::Io(_)) => Ok(None),
        Err(e) => Err(DomainError::Config(format!("Failed to load .env file: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, DomainError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[("STACY_GENERATION_API_KEY", "k")]).unwrap();
        assert_eq!(c.settings.top_k, 5);
        assert_eq!(c.settings.assistant_name, "Stacy");
        assert_eq!(c.embedding.backend, EmbeddingBackend::Local);
        assert_eq!(c.generation.backend, GenerationBackend::Gemini);
        assert_eq!(c.generation.timeout, Duration::from_secs(30));
        assert_eq!(c.catalog_path, PathBuf::from("formatted_products.json"));
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let c = config(&[]).unwrap();
        assert!(matches!(c.build_generator(), Err(DomainError::Config(_))));
        let blank = config(&[("STACY_GENERATION_API_KEY", "   ")]).unwrap();
        assert!(matches!(blank.build_generator(), Err(DomainError::Config(_))));
    }

    #[test]
    fn test_generator_selection() {
        let c = config(&[("STACY_GENERATION_PROVIDER", "disabled")]).unwrap();
        assert_eq!(c.build_generator().unwrap().name(), "disabled");
        let c = config(&[("STACY_GENERATION_API_KEY", "k")]).unwrap();
        assert_eq!(c.build_generator().unwrap().name(), "gemini");
        let c = config(&[("STACY_GENERATION_PROVIDER", "OpenAI"), ("STACY_GENERATION_API_KEY", "k")]).unwrap();
        assert_eq!(c.build_generator().unwrap().name(), "openai");
    }

    #[test]
    fn test_invalid_top_k() {
        let pairs = [("STACY_GENERATION_API_KEY", "k"), ("STACY_TOP_K", "0")];
        assert!(matches!(config(&pairs), Err(DomainError::Config(_))));
        let pairs = [("STACY_GENERATION_API_KEY", "k"), ("STACY_TOP_K", "ten")];
        assert!(matches!(config(&pairs), Err(DomainError::Config(_))));
    }

    #[test]
    fn test_unknown_provider() {
        let pairs = [("STACY_GENERATION_API_KEY", "k"), ("STACY_EMBEDDING_PROVIDER", "word2vec")];
        assert!(matches!(config(&pairs), Err(DomainError::Config(_))));
    }

    #[test]
    fn test_openai_embedding_dimension_override() {
        let c = config(&[
            ("STACY_GENERATION_PROVIDER", "disabled"),
            ("STACY_EMBEDDING_PROVIDER", "openai"),
            ("STACY_EMBEDDING_MODEL", "text-embedding-3-small"),
            ("STACY_EMBEDDING_DIMENSION", "256"),
        ])
        .unwrap();
        let e = c.build_embedder().unwrap();
        assert_eq!(e.dimension(), 256);
        assert_eq!(e.model(), "text-embedding-3-small");
    }

    #[test]
    fn test_env_file_populates_process_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "STACY_ENV_FILE_LOG_LEVEL=stacy=debug\n").unwrap();

        assert_eq!(load_env_from(&path).unwrap(), Some(path.clone()));
        assert_eq!(std::env::var("STACY_ENV_FILE_LOG_LEVEL").unwrap(), "stacy=debug");
        assert_eq!(load_env_from(&dir.path().join("missing.env")).unwrap(), None);
    }

    #[test]
    fn test_hash_embedder_for_offline_runs() {
        let c = config(&[("STACY_EMBEDDING_PROVIDER", "hash"), ("STACY_EMBEDDING_DIMENSION", "64")]).unwrap();
        let e = c.build_embedder().unwrap();
        assert_eq!(e.dimension(), 64);
        assert_eq!(e.model(), "feature-hash");
    }

    #[test]
    fn test_local_embedder_rejects_overrides_before_loading() {
        let c = config(&[("STACY_EMBEDDING_DIMENSION", "256")]).unwrap();
        assert!(matches!(c.build_embedder(), Err(DomainError::Config(_))));
        let c = config(&[("STACY_EMBEDDING_PROVIDER", "local"), ("STACY_EMBEDDING_MODEL", "bge-small")]).unwrap();
        assert!(matches!(c.build_embedder(), Err(DomainError::Config(_))));
    }
}
