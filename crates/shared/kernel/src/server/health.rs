use super::state::ApiState;
use axum::extract::State;
use axum::http::header;
use axum::{Json, response::IntoResponse};
use trek_derive::{api_handler, api_model};
use trek_domain::constants::SYSTEM_TAG;

#[api_model]
/// Liveness report.
pub struct HealthResponse {
    /// Always `up` while the server answers.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Seconds since the state was built.
    pub uptime: u64,
    /// Number of registered feature slices.
    pub slices: usize,
}

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Server is up", body = HealthResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let body = HealthResponse {
        status: "up".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        uptime: state.started_at.elapsed().as_secs(),
        slices: state.slice_count(),
    };

    (
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}
