pub mod hash;
pub mod local;
pub mod openai;
