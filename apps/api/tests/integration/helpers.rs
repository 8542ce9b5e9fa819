use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use listings_api::{
    application::listings::dto::ListingDto,
    config::Config,
    domain::listing::repository::ListingRepository,
    infrastructure::repositories::in_memory_listing_repository::InMemoryListingRepository,
    presentation::http::{
        response::ApiResponse,
        routes::{create_router, with_http_layers},
        state::AppState,
    },
};
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
    pub repo: InMemoryListingRepository,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with_env(&[])
}

/// Like [`spawn_app`], with extra environment entries fed to [`Config`].
pub fn spawn_app_with_env(vars: &[(&str, &str)]) -> TestApp {
    let repo = InMemoryListingRepository::new();
    let state = AppState::new(Arc::new(repo.clone()), Duration::from_secs(5));
    let app = with_http_layers(create_router(state), &test_config(vars))
        .expect("failed to apply http layers");
    TestApp { app, repo }
}

pub fn app_with_repository(repository: Arc<dyn ListingRepository>, timeout: Duration) -> Router {
    with_http_layers(
        create_router(AppState::new(repository, timeout)),
        &test_config(&[]),
    )
    .expect("failed to apply http layers")
}

pub fn test_config(vars: &[(&str, &str)]) -> Config {
    Config::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
            .or_else(|| (key == "DATABASE_URL").then(|| "postgres://unused".to_string()))
    })
    .expect("invalid test config")
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();
    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!("expected status {}, got {}: {}", expected, actual, body);
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub async fn create_listing(app: &Router, name: &str, location: &str, price: f64) -> ListingDto {
    let res = send(
        app,
        json_request(
            "POST",
            "/api/v1/listings",
            serde_json::json!({ "name": name, "location": location, "price": price }),
        ),
    )
    .await;
    let res = expect_status(res, StatusCode::CREATED).await;
    read_json::<ApiResponse<ListingDto>>(res).await.data
}
