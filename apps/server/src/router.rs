use axum::Router;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use trek_kernel::server::state::ApiState;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Trek", description = "Travel destination catalog"))]
struct ApiDoc;

/// Assembles the documented routes, the Scalar UI at `/api` and the shared layers.
pub(crate) fn init(state: ApiState) -> Router {
    let (routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(trek_kernel::server::router::system_router())
        .merge(trek_catalog::api::catalog_router())
        .with_state(state)
        .split_for_parts();

    // The desktop client and browser front-ends load the catalog cross-origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .merge(routes)
        .merge(Scalar::with_url("/api", api_doc))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
