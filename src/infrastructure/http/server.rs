use crate::application::ask::AskResponse;
use crate::domain::entities::query::UserQuery;
use crate::domain::error::DomainError;
use crate::Stacy;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

pub fn router(stacy: Arc<Stacy>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/ask", post(ask_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(stacy)
}

pub async fn serve(stacy: Arc<Stacy>, addr: SocketAddr) -> Result<(), DomainError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("stacy listening on http://{addr}");
    axum::serve(listener, router(stacy)).await?;
    Ok(())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn ask_handler(
    State(stacy): State<Arc<Stacy>>,
    Json(request): Json<UserQuery>,
) -> Result<Json<AskResponse>, ApiError> {
    stacy.ask(&request).await.map(Json).map_err(error_response)
}

fn error_response(err: DomainError) -> ApiError {
    let status = match &err {
        DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DomainError::Embedding(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "ask request failed");
    }
    let detail = match err {
        DomainError::InvalidInput(msg) => msg,
        other => other.to_string(),
    };
    (status, Json(ErrorBody { detail }))
}
