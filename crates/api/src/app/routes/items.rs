use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};

use homestock_core::ItemId;
use homestock_infra::InventoryService;

use crate::app::routes::{mutate, no_content, respond};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route(
            "/:id",
            get(get_item).patch(update_item).put(update_item).delete(delete_item),
        )
        .route("/:id/locations", get(item_locations).put(save_item_locations))
}

/// All items, or those whose name contains `?q=`.
pub async fn list_items(
    Extension(services): Extension<Arc<InventoryService>>,
    query: Result<Query<dto::ItemQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    match query.q {
        Some(text) => respond(StatusCode::OK, services.search_items(&text)),
        None => respond(StatusCode::OK, services.list_items()),
    }
}

pub async fn create_item(
    Extension(services): Extension<Arc<InventoryService>>,
    body: Result<Json<dto::CreateItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    let (item, locations) = body.into_parts();
    respond(
        StatusCode::CREATED,
        mutate(services, move |s| s.create_item(item, locations.as_deref())).await,
    )
}

pub async fn get_item(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    respond(StatusCode::OK, services.get_item(id))
}

pub async fn update_item(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: ItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    let (patch, locations) = body.into_parts();
    respond(
        StatusCode::OK,
        mutate(services, move |s| s.update_item(id, patch, locations.as_deref())).await,
    )
}

pub async fn delete_item(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    no_content(mutate(services, move |s| s.delete_item(id)).await)
}

pub async fn item_locations(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    respond(StatusCode::OK, services.records_for_item(id))
}

/// Replace the item's locations and quantities with the posted list.
pub async fn save_item_locations(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
    body: Result<Json<dto::SavePlacementsRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: ItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    let placements = body.into_list();
    respond(
        StatusCode::OK,
        mutate(services, move |s| s.save_item_placements(id, &placements)).await,
    )
}
