use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch},
};

use homestock_core::LocationId;
use homestock_infra::InventoryService;
use homestock_inventory::LocationPatch;

use crate::app::routes::{created_or_ok, mutate, no_content, respond};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_locations).post(create_location))
        .route(
            "/:id",
            patch(update_location).put(update_location).delete(delete_location),
        )
        .route("/:id/inventory", get(location_inventory))
}

pub async fn list_locations(Extension(services): Extension<Arc<InventoryService>>) -> axum::response::Response {
    respond(StatusCode::OK, services.list_locations())
}

/// Find-or-create by name, ignoring case.
pub async fn create_location(
    Extension(services): Extension<Arc<InventoryService>>,
    body: Result<Json<dto::NameRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    match mutate(services, move |s| s.create_location(&body.name)).await {
        Ok(resolved) => respond(created_or_ok(resolved.created), Ok(resolved.value)),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_location(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
    body: Result<Json<LocationPatch>, JsonRejection>,
) -> axum::response::Response {
    let id: LocationId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(patch) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    respond(
        StatusCode::OK,
        mutate(services, move |s| s.update_location(id, patch)).await,
    )
}

pub async fn delete_location(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: LocationId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    no_content(mutate(services, move |s| s.delete_location(id)).await)
}

pub async fn location_inventory(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: LocationId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    respond(StatusCode::OK, services.records_at_location(id))
}
