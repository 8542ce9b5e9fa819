use super::{
    errors::handle_panic,
    handlers::{fallback, health, listings},
    middleware::{
        logging::logging_middleware, request_id::request_id_middleware,
        timeout::timeout_middleware,
    },
    state::AppState,
};
use crate::config::Config;
use axum::{Router, extract::DefaultBodyLimit, middleware, routing::get};
use http::{HeaderValue, Method, header};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Listings CRUD
        .route(
            "/api/v1/listings",
            get(listings::get_listings).post(listings::create_listing),
        )
        .route("/api/v1/listings/search", get(listings::search_listings))
        .route(
            "/api/v1/listings/{id}",
            get(listings::get_single_listing)
                .put(listings::update_listing)
                .delete(listings::delete_listing),
        )
        .fallback(fallback::route_not_found)
        .method_not_allowed_fallback(fallback::method_not_allowed)
        .layer(middleware::from_fn_with_state(state.clone(), timeout_middleware))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Wraps the router in the transport-level layers: tracing, body limit,
/// CORS and security headers.
///
/// # Errors
///
/// Returns an error if an `ALLOWED_ORIGINS` entry is not a valid header value.
pub fn with_http_layers(router: Router, config: &Config) -> anyhow::Result<Router> {
    Ok(router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::max(config.body_limit_bytes))
            .layer(cors_layer(config)?)
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            )),
    ))
}

/// Configured origins when `ALLOWED_ORIGINS` is set; otherwise any origin in
/// debug builds and none in release builds.
fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let origin = if !config.allowed_origins.is_empty() {
        let origins = config
            .allowed_origins
            .iter()
            .map(|o| HeaderValue::from_str(o))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid ALLOWED_ORIGINS entry: {}", e))?;
        AllowOrigin::list(origins)
    } else if cfg!(debug_assertions) {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(Vec::<HeaderValue>::new())
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}
