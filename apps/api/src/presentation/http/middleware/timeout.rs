use crate::presentation::http::{errors::AppError, state::AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Bounds every request by `AppState::request_timeout`.
///
/// On expiry the inner future is dropped, which also drops any in-flight
/// store call it was awaiting.
pub async fn timeout_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(state.request_timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                timeout_ms = state.request_timeout.as_millis() as u64,
                "Request exceeded deadline"
            );
            AppError::Timeout.into_response()
        }
    }
}
