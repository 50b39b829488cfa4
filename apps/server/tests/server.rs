use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use std::io::Write;
use tower::ServiceExt;
use trek_domain::config::ApiConfig;
use trek_server::Server;

const SEED: &str = r#"[
    {"name": "Paris Getaway", "country": "France", "budget": 450,
     "image": "https://img.example/paris.jpg", "description": "Museums"},
    {"name": "Kyoto Temples", "country": "Japan", "budget": 900,
     "image": "https://img.example/kyoto.jpg", "description": "Shrines"}
]"#;

fn config(database: &str) -> ApiConfig {
    let mut cfg = ApiConfig::default();
    cfg.database.database = database.to_owned();
    cfg
}

async fn body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn seeded_server_serves_catalog() {
    let mut seed = tempfile::NamedTempFile::new().unwrap();
    seed.write_all(SEED.as_bytes()).unwrap();

    let server = Server::builder().config(config("seeded")).seed(seed.path()).build().await.unwrap();
    let app = server.router();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/destinations.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let destinations = body(response).await;
    assert_eq!(destinations.as_array().unwrap().len(), 2);
    assert_eq!(destinations[0]["name"], "Paris Getaway");

    let response = app
        .oneshot(Request::builder().uri("/api/countries").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body(response).await, serde_json::json!(["France", "Japan"]));
}

#[tokio::test]
async fn health_and_openapi_are_mounted() {
    let server = Server::builder().config(config("docs")).build().await.unwrap();
    assert_eq!(server.state().slice_count(), 1);

    let response = server
        .router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await["slices"], 1);

    let response = server
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/countries")
                .header(header::ORIGIN, "http://localhost:8080")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn missing_ssl_material_fails_fast() {
    let mut cfg = config("ssl");
    cfg.server.ssl = Some(trek_domain::config::SslConfig {
        cert: "/nonexistent/cert.pem".into(),
        key: "/nonexistent/key.pem".into(),
    });

    let err = Server::builder().config(cfg).build().await.unwrap_err();
    assert!(err.to_string().contains("SSL certificate not found"));
}

#[tokio::test]
async fn missing_ssl_key_is_reported_separately() {
    let dir = tempfile::tempdir().unwrap();
    let cert = dir.path().join("cert.pem");
    std::fs::write(&cert, "-----BEGIN CERTIFICATE-----").unwrap();

    let mut cfg = config("ssl-key");
    cfg.server.ssl =
        Some(trek_domain::config::SslConfig { cert, key: dir.path().join("key.pem") });

    let err = Server::builder().config(cfg).build().await.unwrap_err();
    assert!(err.to_string().contains("SSL key not found"));
}
