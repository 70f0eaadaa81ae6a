pub mod embedding_port;
pub mod generation_port;
pub mod product_catalog;
