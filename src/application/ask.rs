use crate::application::compose::ComposeUseCase;
use crate::application::retrieve::RetrieveUseCase;
use crate::domain::entities::product::ProductCard;
use crate::domain::entities::query::UserQuery;
use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Products,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(rename = "type")]
    pub result_type: ResultType,
    pub products: Vec<ProductCard>,
}

pub struct AskUseCase {
    retrieve: Arc<RetrieveUseCase>,
    compose: ComposeUseCase,
}

impl AskUseCase {
    pub fn new(retrieve: Arc<RetrieveUseCase>, compose: ComposeUseCase) -> Self {
        Self { retrieve, compose }
    }

    /// Validate → retrieve → compose. Generation failures surface as a
    /// fallback answer, never as an error.
    pub async fn execute(&self, query: &UserQuery) -> Result<AskResponse, DomainError> {
        let text = query.text()?;
        let products = self.retrieve.execute(text).await?;
        tracing::info!(session = %query.session_id, results = products.len(), "retrieved products");

        let answer = self.compose.execute(text, &products).await;

        Ok(AskResponse {
            answer,
            result_type: ResultType::Products,
            products: products.iter().map(ProductCard::from).collect(),
        })
    }
}
