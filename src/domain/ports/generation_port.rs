use crate::domain::values::fallback::FallbackKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation service not configured: {0}")]
    NotConfigured(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl GenerationError {
    pub fn fallback(&self) -> FallbackKind {
        match self {
            GenerationError::NotConfigured(_) => FallbackKind::NotConfigured,
            GenerationError::Transport(_) | GenerationError::Status { .. } => FallbackKind::Unavailable,
            GenerationError::Malformed(_) => FallbackKind::Malformed,
        }
    }
}

/// External text-generation service: one prompt in, generated text out.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
