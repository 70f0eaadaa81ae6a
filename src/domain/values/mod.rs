pub mod fallback;
pub mod intent;
pub mod price;
