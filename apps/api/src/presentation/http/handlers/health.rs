use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_status = match state.listings.health().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::error!("Health check failed: store unreachable: {}", e);
            "down"
        }
    };

    let (code, status) = if db_status == "up" {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    let response = HealthResponse {
        status: status.into(),
        database: db_status.into(),
        version: env!("CARGO_PKG_VERSION").into(),
    };

    (code, Json(response))
}
