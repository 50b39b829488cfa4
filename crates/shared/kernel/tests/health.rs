#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use trek_domain::config::ApiConfig;
use trek_kernel::server::router::system_router;
use trek_kernel::server::state::ApiState;

#[tokio::test]
async fn health_reports_up() {
    let state = ApiState::builder().config(ApiConfig::default()).build().unwrap();
    let (router, api) = system_router().split_for_parts();
    let app = router.with_state(state);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(api.paths.paths.contains_key("/health"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "up");
    assert_eq!(body["slices"], 0);
}
