pub mod disabled;
pub mod gemini;
pub mod openai;

use crate::domain::error::DomainError;
use std::time::Duration;

/// Client shared by the hosted generators; every call is bounded by `timeout`.
fn http_client(timeout: Duration) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::Config(format!("cannot build generation HTTP client: {e}")))
}
