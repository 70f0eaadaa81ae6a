//! Shared test helpers.
#![allow(dead_code)]

use stacy::config::Settings;
use stacy::domain::entities::embedding_index::EmbeddingIndex;
use stacy::domain::entities::product::ProductRecord;
use stacy::domain::error::DomainError;
use stacy::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use stacy::domain::ports::generation_port::{GenerationError, TextGenerator};
use stacy::domain::values::price::Price;
use stacy::infrastructure::catalog::json_catalog::JsonCatalog;
use stacy::Stacy;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const DIM: usize = 3;

/// Encoder that looks texts up in a fixed table (zero vector otherwise)
/// and counts how often it is called.
pub struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl TableEmbedder {
    pub fn new(entries: &[(&str, [f32; DIM])]) -> Self {
        Self {
            table: entries.iter().map(|(t, v)| (t.to_string(), v.to_vec())).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for TableEmbedder {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|t| self.table.get(t).cloned().unwrap_or_else(|| vec![0.0; DIM]))
            .collect())
    }

    fn dimension(&self) -> usize {
        DIM
    }

    fn model(&self) -> &str {
        "table"
    }
}

pub enum Script {
    Answer(&'static str),
    Transport,
    Status(u16),
    Malformed,
}

/// Generator with a canned outcome that records every prompt it receives.
pub struct ScriptedGenerator {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.script {
            Script::Answer(a) => Ok(a.to_string()),
            Script::Transport => Err(GenerationError::Transport("connection refused".into())),
            Script::Status(code) => Err(GenerationError::Status {
                status: *code,
                body: "boom".into(),
            }),
            Script::Malformed => Err(GenerationError::Malformed("no candidates".into())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn product(id: &str, name: &str, category: &str, price: f64, aisle: &str) -> ProductRecord {
    let mut p = ProductRecord::new(id, name, category);
    p.original_price = Price::new(price).unwrap();
    p.discounted_price = Price::new(price * 0.8).unwrap();
    p.aisle_location = aisle.to_string();
    p.product_image_url = format!("https://img.example/{id}.jpeg");
    p
}

/// Six products with hand-placed vectors.
pub fn fixture() -> Vec<(ProductRecord, [f32; DIM])> {
    vec![
        (product("p1", "Men's Cotton Tank", "Tops", 9.5, "A1"), [1.0, 0.0, 0.0]),
        (product("p2", "Women's Blouse", "Tops", 24.0, "B2"), [0.0, 1.0, 0.0]),
        (product("p3", "Whole Milk", "Dairy", 3.49, "D4"), [0.0, 0.0, 1.0]),
        (product("p4", "Men's Graphic T-Shirt", "Men's T-Shirts", 12.0, "A2"), [0.9, 0.1, 0.0]),
        (product("p5", "Women's Yoga Pants", "Women's Activewear", 30.0, "B3"), [0.1, 0.9, 0.0]),
        (product("p6", "Men's Leather Belt", "Accessories", 18.0, "C1"), [0.5, 0.0, 0.5]),
    ]
}

pub fn build(
    rows: Vec<(ProductRecord, [f32; DIM])>,
    embedder: Arc<TableEmbedder>,
    generator: Arc<ScriptedGenerator>,
    top_k: usize,
) -> Result<Stacy, DomainError> {
    let ids = rows.iter().map(|(p, _)| p.product_id.clone()).collect();
    let vectors = rows.iter().map(|(_, v)| v.to_vec()).collect();
    let products = rows.into_iter().map(|(p, _)| p).collect();
    let index = EmbeddingIndex::new(DIM, "table", vectors, ids)?;
    Stacy::with_providers(
        Arc::new(JsonCatalog::new(products)?),
        Arc::new(index),
        embedder,
        generator,
        Settings {
            top_k,
            ..Settings::default()
        },
    )
}

pub fn setup(
    queries: &[(&str, [f32; DIM])],
    script: Script,
) -> (Stacy, Arc<TableEmbedder>, Arc<ScriptedGenerator>) {
    let embedder = Arc::new(TableEmbedder::new(queries));
    let generator = Arc::new(ScriptedGenerator::new(script));
    let stacy = build(fixture(), embedder.clone(), generator.clone(), 5).unwrap();
    (stacy, embedder, generator)
}

pub fn ids(products: &[ProductRecord]) -> Vec<&str> {
    products.iter().map(|p| p.product_id.as_str()).collect()
}
