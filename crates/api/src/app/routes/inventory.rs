use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, patch, post},
};

use homestock_core::RecordId;
use homestock_infra::{InventoryService, RecordFilter};

use crate::app::routes::{created_or_ok, mutate, no_content, respond};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_records).post(add_stock))
        .route("/:id", patch(set_quantity).put(set_quantity).delete(delete_record))
        .route("/:id/adjust", post(adjust_quantity))
}

pub async fn list_records(
    Extension(services): Extension<Arc<InventoryService>>,
    query: Result<Query<dto::RecordQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    let filter = RecordFilter {
        item_id: query.item_id,
        location_id: query.location_id,
    };
    respond(StatusCode::OK, services.list_inventory_records(filter))
}

/// Add stock; merges into an existing record for the same item and location.
pub async fn add_stock(
    Extension(services): Extension<Arc<InventoryService>>,
    body: Result<Json<dto::AddStockRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    let added = mutate(services, move |s| {
        s.add_stock(body.item_id, body.location_id, body.quantity)
    })
    .await;
    match added {
        Ok(resolved) => respond(created_or_ok(resolved.created), Ok(resolved.value)),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn set_quantity(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
    body: Result<Json<dto::SetQuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: RecordId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    respond(
        StatusCode::OK,
        mutate(services, move |s| s.update_record_quantity(id, body.quantity)).await,
    )
}

pub async fn adjust_quantity(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
    body: Result<Json<dto::AdjustQuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: RecordId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    respond(
        StatusCode::OK,
        mutate(services, move |s| s.adjust_record_quantity(id, body.delta)).await,
    )
}

pub async fn delete_record(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RecordId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    no_content(mutate(services, move |s| s.delete_record(id)).await)
}
