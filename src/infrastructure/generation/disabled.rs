use crate::domain::ports::generation_port::{GenerationError, TextGenerator};

/// Stand-in when no generation service is configured; every call degrades
/// to the not-configured fallback.
pub struct DisabledGenerator;

#[async_trait::async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured("generation provider is disabled".into()))
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
