use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// A shopper's question. `session_id` is carried for future conversational
/// context; retrieval does not read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserQuery {
    pub query: String,
    pub session_id: String,
}

impl UserQuery {
    pub fn new(query: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            session_id: session_id.into(),
        }
    }

    /// Trimmed query text, or `InvalidInput` when nothing is left.
    pub fn text(&self) -> Result<&str, DomainError> {
        let text = self.query.trim();
        if text.is_empty() {
            return Err(DomainError::InvalidInput("Query is required.".into()));
        }
        Ok(text)
    }
}
