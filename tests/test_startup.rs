//! Startup: artifact loading, validation and the offline index build.

mod common;

use common::{product, Script, ScriptedGenerator, TableEmbedder};
use stacy::application::build_index::BuildIndexUseCase;
use stacy::config::{Config, Settings};
use stacy::domain::entities::embedding_index::EmbeddingIndex;
use stacy::domain::entities::product::ProductRecord;
use stacy::domain::entities::query::UserQuery;
use stacy::domain::error::DomainError;
use stacy::domain::values::fallback::FallbackKind;
use stacy::infrastructure::catalog::json_catalog::JsonCatalog;
use stacy::infrastructure::embeddings::hash::HashProvider;
use stacy::infrastructure::index::artifacts;
use stacy::Stacy;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

fn config_for(dir: &Path, dimension: usize) -> Config {
    let vars: HashMap<&str, String> = [
        ("STACY_CATALOG", dir.join("formatted_products.json").display().to_string()),
        ("STACY_INDEX", dir.join("product_index.bin").display().to_string()),
        ("STACY_PRODUCT_MAP", dir.join("product_map.json").display().to_string()),
        ("STACY_EMBEDDING_PROVIDER", "hash".to_string()),
        ("STACY_EMBEDDING_DIMENSION", dimension.to_string()),
        ("STACY_GENERATION_PROVIDER", "disabled".to_string()),
        ("STACY_TOP_K", "3".to_string()),
    ]
    .into_iter()
    .collect();
    Config::from_lookup(|k| vars.get(k).cloned()).unwrap()
}

fn catalog() -> Vec<ProductRecord> {
    vec![
        product("p1", "Men's Cotton Tank", "Tops", 9.5, "A1"),
        product("p2", "Women's Blouse", "Tops", 24.0, "B2"),
        product("p3", "Whole Milk", "Dairy", 3.49, "D4"),
        product("p4", "Sourdough Bread", "Bakery", 5.0, "D1"),
    ]
}

async fn write_artifacts(config: &Config, dimension: usize) {
    JsonCatalog::save(&catalog(), &config.catalog_path).unwrap();
    let uc = BuildIndexUseCase::new(
        Arc::new(JsonCatalog::new(catalog()).unwrap()),
        Arc::new(HashProvider::new(dimension)),
    );
    let report = uc.execute(&config.index_path, &config.map_path).await.unwrap();
    assert_eq!(report.products, 4);
    assert_eq!(report.dimension, dimension);
    assert_eq!(report.model, "feature-hash");
}

#[tokio::test]
async fn test_build_then_serve_from_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), 64);
    write_artifacts(&config, 64).await;

    let stacy = Stacy::from_config(&config).unwrap();
    assert_eq!(stacy.catalog_size(), 4);
    assert_eq!(stacy.index_size(), 4);

    // Same text the product was indexed under → identical vector → rank 1.
    let results = stacy.retrieve("Whole Milk in Dairy").await.unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].product_id, "p3");

    let resp = stacy.ask(&UserQuery::new("Whole Milk in Dairy", "s1")).await.unwrap();
    assert_eq!(resp.answer, FallbackKind::NotConfigured.message());
    assert_eq!(resp.products[0].name, "Whole Milk");
}

#[tokio::test]
async fn test_position_map_follows_catalog_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), 16);
    write_artifacts(&config, 16).await;

    let index = artifacts::load(&config.index_path, &config.map_path).unwrap();
    assert_eq!(index.position_map(), &["p1", "p2", "p3", "p4"]);
    let expected = HashProvider::new(16).encode("Sourdough Bread in Bakery");
    assert_eq!(index.vector(3).unwrap(), expected.as_slice());
}

#[tokio::test]
async fn test_missing_artifacts_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), 16);
    assert!(matches!(Stacy::from_config(&config), Err(DomainError::Artifact(_))));

    JsonCatalog::save(&catalog(), &config.catalog_path).unwrap();
    let err = Stacy::from_config(&config).err().unwrap();
    assert!(err.to_string().contains("product_index.bin"), "{err}");
}

#[tokio::test]
async fn test_encoder_dimension_mismatch_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(&config_for(dir.path(), 32), 32).await;

    let err = Stacy::from_config(&config_for(dir.path(), 64)).err().unwrap();
    assert!(matches!(err, DomainError::DimensionMismatch { expected: 32, actual: 64 }));
}

#[tokio::test]
async fn test_map_length_mismatch_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), 16);
    write_artifacts(&config, 16).await;
    std::fs::write(&config.map_path, r#"["p1","p2"]"#).unwrap();

    assert!(matches!(Stacy::from_config(&config), Err(DomainError::Artifact(_))));
}

#[tokio::test]
async fn test_map_id_missing_from_catalog_is_fatal() {
    let index = EmbeddingIndex::new(3, "table", vec![vec![0.0, 0.0, 1.0]], vec!["ghost".into()]).unwrap();
    let result = Stacy::with_providers(
        Arc::new(JsonCatalog::new(catalog()).unwrap()),
        Arc::new(index),
        Arc::new(TableEmbedder::new(&[])),
        Arc::new(ScriptedGenerator::new(Script::Answer("ok"))),
        Settings::default(),
    );
    assert!(matches!(result, Err(DomainError::Artifact(_))));
}

#[tokio::test]
async fn test_catalog_without_vectors_is_unreachable() {
    // Only p1 has a vector; the women's products are in the catalog but unreachable.
    let index = EmbeddingIndex::new(3, "table", vec![vec![1.0, 0.0, 0.0]], vec!["p1".into()]).unwrap();
    let embedder = Arc::new(TableEmbedder::new(&[("ladies", [0.0, 1.0, 0.0])]));
    let stacy = Stacy::with_providers(
        Arc::new(JsonCatalog::new(catalog()).unwrap()),
        Arc::new(index),
        embedder.clone(),
        Arc::new(ScriptedGenerator::new(Script::Answer("ok"))),
        Settings::default(),
    )
    .unwrap();

    assert!(stacy.retrieve("ladies").await.unwrap().is_empty());
    assert_eq!(stacy.retrieve("tank").await.unwrap().len(), 1);
}
