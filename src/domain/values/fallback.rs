use serde::Serialize;
use std::fmt;

/// What the shopper is told when the generation service cannot answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackKind {
    /// No usable credential or provider.
    NotConfigured,
    /// Network failure or non-success status.
    Unavailable,
    /// Response arrived but the expected text field was missing.
    Malformed,
}

impl FallbackKind {
    pub fn message(&self) -> &'static str {
        match self {
            FallbackKind::NotConfigured => {
                "My connection to the AI is not configured correctly. Please check the backend server."
            }
            FallbackKind::Unavailable => {
                "I'm having a bit of trouble connecting to my brain right now. Please try again in a moment."
            }
            FallbackKind::Malformed => "Sorry, I couldn't formulate a proper response.",
        }
    }
}

impl fmt::Display for FallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackKind::NotConfigured => write!(f, "not_configured"),
            FallbackKind::Unavailable => write!(f, "unavailable"),
            FallbackKind::Malformed => write!(f, "malformed"),
        }
    }
}
