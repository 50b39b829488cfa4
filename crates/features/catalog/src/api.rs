//! REST surface of the catalog.
//!
//! `/destinations.json` serves the raw collection for clients that load everything and
//! filter locally. The `/api` routes expose filtering, lookup and record writing.

use crate::error::CatalogError;
use crate::filter::{DestinationFilter, country_options};
use crate::model::{Destination, DestinationDraft};
use crate::state::Lookup;
use crate::{Catalog, service};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use trek_derive::{api_handler, api_model};
use trek_domain::constants::CATALOG_TAG;
use trek_kernel::server::state::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[api_model]
/// Error payload returned by every failing catalog route.
pub struct ErrorBody {
    pub error: String,
}

#[api_model]
/// Identifier assigned to a freshly written destination.
pub struct CreatedResponse {
    pub id: String,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Catalog request failed");
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

fn catalog(state: &ApiState) -> Result<&Catalog, CatalogError> {
    Ok(state.try_get_slice::<Catalog>()?)
}

#[api_handler(
    get,
    path = "/destinations.json",
    responses(
        (status = OK, description = "Whole collection in load order", body = Vec<Destination>),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = CATALOG_TAG,
)]
pub(crate) async fn collection_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Destination>>, CatalogError> {
    let catalog = catalog(&state)?;
    Ok(Json(service::load(catalog.store.as_ref()).await?))
}

#[api_handler(
    get,
    path = "/api/destinations",
    params(DestinationFilter),
    responses(
        (status = OK, description = "Destinations matching every criterion", body = Vec<Destination>),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = CATALOG_TAG,
)]
pub(crate) async fn list_handler(
    State(state): State<ApiState>,
    Query(filter): Query<DestinationFilter>,
) -> Result<Json<Vec<Destination>>, CatalogError> {
    let catalog = catalog(&state)?;
    let destinations = service::load(catalog.store.as_ref()).await?;
    Ok(Json(filter.apply_owned(destinations)))
}

#[api_handler(
    post,
    path = "/api/destinations",
    request_body = DestinationDraft,
    responses(
        (status = CREATED, description = "Destination appended", body = CreatedResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Required field missing", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = CATALOG_TAG,
)]
pub(crate) async fn create_handler(
    State(state): State<ApiState>,
    Json(draft): Json<DestinationDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), CatalogError> {
    let catalog = catalog(&state)?;
    let id = service::submit(catalog.store.as_ref(), draft).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[api_handler(
    get,
    path = "/api/destinations/{id}",
    params(("id" = String, Path, description = "Destination identifier")),
    responses(
        (status = OK, body = Destination),
        (status = NOT_FOUND, description = "No destination with this id", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = CATALOG_TAG,
)]
pub(crate) async fn detail_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Response, CatalogError> {
    let catalog = catalog(&state)?;
    let lookup = service::lookup(catalog.store.as_ref(), &id).await?;
    detail_response(&id, lookup)
}

fn detail_response(id: &str, lookup: Lookup) -> Result<Response, CatalogError> {
    match lookup {
        Lookup::Found(destination) => Ok(Json(destination).into_response()),
        Lookup::NotFound => Ok((
            StatusCode::NOT_FOUND,
            Json(ErrorBody { error: format!("Destination {id} not found") }),
        )
            .into_response()),
        // The service resolves every lookup before returning.
        Lookup::Pending => Err(CatalogError::from(format!("lookup of {id} did not resolve"))),
    }
}

#[api_handler(
    get,
    path = "/api/countries",
    responses(
        (status = OK, description = "Distinct countries in first-appearance order", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = CATALOG_TAG,
)]
pub(crate) async fn countries_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<String>>, CatalogError> {
    let catalog = catalog(&state)?;
    let destinations = service::load(catalog.store.as_ref()).await?;
    Ok(Json(country_options(&destinations).into_iter().map(str::to_owned).collect()))
}

/// Catalog routes, merged into the server router.
pub fn catalog_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(collection_handler))
        .routes(routes!(list_handler, create_handler))
        .routes(routes!(detail_handler))
        .routes(routes!(countries_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_lookup_is_a_server_error() {
        let err = detail_response("abc", Lookup::Pending).unwrap_err();
        assert!(matches!(err, CatalogError::Internal { .. }));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_destination_is_not_found() {
        let response = detail_response("abc", Lookup::NotFound).unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
