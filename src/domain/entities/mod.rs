pub mod embedding_index;
pub mod product;
pub mod query;
