use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, patch},
};

use homestock_core::AisleId;
use homestock_infra::InventoryService;
use homestock_inventory::{AislePatch, NewAisle};

use crate::app::routes::{mutate, no_content, respond};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_aisles).post(create_aisle))
        .route(
            "/:id",
            patch(update_aisle).put(update_aisle).delete(delete_aisle),
        )
}

pub async fn list_aisles(
    Extension(services): Extension<Arc<InventoryService>>,
    query: Result<Query<dto::AisleQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    respond(StatusCode::OK, services.list_aisles(query.store_id))
}

pub async fn create_aisle(
    Extension(services): Extension<Arc<InventoryService>>,
    body: Result<Json<NewAisle>, JsonRejection>,
) -> axum::response::Response {
    let Json(input) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    respond(
        StatusCode::CREATED,
        mutate(services, move |s| s.create_aisle(input)).await,
    )
}

pub async fn update_aisle(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
    body: Result<Json<AislePatch>, JsonRejection>,
) -> axum::response::Response {
    let id: AisleId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(patch) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    respond(
        StatusCode::OK,
        mutate(services, move |s| s.update_aisle(id, patch)).await,
    )
}

pub async fn delete_aisle(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: AisleId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    no_content(mutate(services, move |s| s.delete_aisle(id)).await)
}
