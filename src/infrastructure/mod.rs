pub mod catalog;
pub mod embeddings;
pub mod generation;
pub mod http;
pub mod index;
