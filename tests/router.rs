use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{offline_app, openapi_path, send};

#[tokio::test]
async fn unknown_route_returns_not_found_envelope() {
    let app = offline_app(openapi_path());
    let (status, body) = send(&app, "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"status": "Not Found", "message": "Endpoint not found", "response": null})
    );

    let (status, _) = send(&app, "GET", "/elsewhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_uptime() {
    let app = offline_app(openapi_path());
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Server is running");
    assert!(body["response"]["uptime"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn specification_is_served_from_disk() {
    let app = offline_app(openapi_path());
    let (status, body) = send(&app, "GET", "/api/specification", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["openapi"].as_str().unwrap().starts_with("3."));
    assert!(body["paths"]["/api/stanice"].is_object());
}

#[tokio::test]
async fn missing_specification_is_an_error_envelope() {
    let app = offline_app(std::env::temp_dir().join("nextbike-api-missing-openapi.json"));
    let (status, body) = send(&app, "GET", "/api/specification", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "Error");
    assert_eq!(body["message"], "Cannot load OpenAPI specification");
    assert!(body["response"].is_null());
}

#[tokio::test]
async fn non_numeric_ids_are_bad_requests() {
    let app = offline_app(openapi_path());
    for (method, uri, message) in [
        ("GET", "/api/stanice/abc", "Invalid station ID"),
        ("GET", "/api/stanice/abc/bicikli", "Invalid station ID"),
        ("PUT", "/api/stanice/abc", "Invalid station ID"),
        ("DELETE", "/api/stanice/1x", "Invalid station ID"),
        ("GET", "/api/bicikli/abc", "Invalid bike ID"),
        ("PUT", "/api/bicikli/abc", "Invalid bike ID"),
        ("DELETE", "/api/bicikli/abc", "Invalid bike ID"),
    ] {
        let body = (method == "PUT").then(|| json!({"naziv": "X"}));
        let (status, body) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(body["status"], "Bad Request");
        assert_eq!(body["message"], message);
        assert!(body["response"].is_null());
    }
}

#[tokio::test]
async fn create_station_without_required_fields_is_rejected() {
    let app = offline_app(openapi_path());
    let (status, body) = send(
        &app,
        "POST",
        "/api/stanice",
        Some(json!({"naziv": "Test", "kapacitet": 10, "geo_lat": 45.8, "geo_lon": 16.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields");
}

#[tokio::test]
async fn create_bike_without_station_is_rejected() {
    let app = offline_app(openapi_path());
    let (status, body) = send(&app, "POST", "/api/bicikli", Some(json!({"status": "dostupan", "tip": "obicni"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "Bad Request");
}

#[tokio::test]
async fn malformed_body_is_a_bad_request_envelope() {
    let app = offline_app(openapi_path());
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/stanice")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "Bad Request");

    let (status, body) = send(&app, "PUT", "/api/bicikli/5", Some(json!(["status"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Request body must be a JSON object");
}

#[tokio::test]
async fn unknown_search_attribute_uses_legacy_error_shape() {
    let app = offline_app(openapi_path());
    for uri in [
        "/api/data?search=x&attribute=naziv%3B%20DROP%20TABLE%20stanice",
        "/api/export/csv?search=x&attribute=status",
        "/api/export/json?search=x&attribute=bogus",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid search attribute"));
    }
}

#[tokio::test]
async fn shared_layers_answer_preflight_and_cap_bodies() {
    let app = offline_app(openapi_path());
    let preflight = axum::http::Request::builder()
        .method("OPTIONS")
        .uri("/api/stanice")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.clone(), preflight).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let oversized = vec![b' '; 2 * 1024 * 1024];
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/stanice")
        .header("content-type", "application/json")
        .header("content-length", oversized.len())
        .body(axum::body::Body::from(oversized))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
