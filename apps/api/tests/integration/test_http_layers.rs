use crate::helpers::*;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::json;

fn assert_security_headers(res: &axum::response::Response) {
    let headers = res.headers();
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    assert_eq!(
        headers[header::REFERRER_POLICY],
        "strict-origin-when-cross-origin"
    );
}

#[tokio::test]
async fn security_headers_on_success() {
    let t = spawn_app();
    let res = expect_status(send(&t.app, get("/api/v1/listings")).await, StatusCode::OK).await;
    assert_security_headers(&res);
}

#[tokio::test]
async fn security_headers_on_error() {
    let t = spawn_app();
    let res = send(&t.app, get("/api/v1/nope")).await;
    let res = expect_status(res, StatusCode::NOT_FOUND).await;
    assert_security_headers(&res);
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn oversized_body_is_rejected_without_write() {
    let t = spawn_app_with_env(&[("BODY_LIMIT_BYTES", "64")]);
    let body = json!({ "name": "x".repeat(256), "location": "Pune", "price": 1.0 });

    let res = send(&t.app, json_request("POST", "/api/v1/listings", body)).await;
    let res = expect_status(res, StatusCode::PAYLOAD_TOO_LARGE).await;
    let body: serde_json::Value = read_json(res).await;

    assert_eq!(body["statusCode"], 413);
    assert_eq!(body["message"], "Payload Too Large");
    assert!(t.repo.is_empty().await);
}

#[tokio::test]
async fn body_under_limit_is_accepted() {
    let t = spawn_app_with_env(&[("BODY_LIMIT_BYTES", "256")]);
    let dto = create_listing(&t.app, "Sattva", "Hyderabad", 10.0).await;
    assert_eq!(dto.name, "Sattva");
}

#[tokio::test]
async fn cors_preflight_from_allowed_origin() {
    let origins = "https://app.example, https://admin.example";
    let t = spawn_app_with_env(&[("ALLOWED_ORIGINS", origins)]);
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/listings")
        .header(header::ORIGIN, "https://app.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .expect("failed to build request");

    let res = expect_status(send(&t.app, req).await, StatusCode::OK).await;
    let headers = res.headers();

    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://app.example"
    );
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .expect("ascii header");
    assert!(methods.contains("POST"));
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "3600");
}

#[tokio::test]
async fn cors_ignores_unlisted_origin() {
    let t = spawn_app_with_env(&[("ALLOWED_ORIGINS", "https://app.example")]);
    let req = Request::builder()
        .uri("/api/v1/listings")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .expect("failed to build request");

    let res = expect_status(send(&t.app, req).await, StatusCode::OK).await;
    assert!(!res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
