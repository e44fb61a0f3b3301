use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use homestock_core::StoreId;
use homestock_infra::InventoryService;
use homestock_inventory::StorePatch;

use crate::app::routes::{mutate, no_content, respond};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_stores).post(create_store))
        .route(
            "/:id",
            get(get_store).patch(update_store).put(update_store).delete(delete_store),
        )
        .route("/:id/items", get(store_items))
}

pub async fn list_stores(Extension(services): Extension<Arc<InventoryService>>) -> axum::response::Response {
    respond(StatusCode::OK, services.list_stores())
}

pub async fn create_store(
    Extension(services): Extension<Arc<InventoryService>>,
    body: Result<Json<dto::NameRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    respond(
        StatusCode::CREATED,
        mutate(services, move |s| s.create_store(&body.name)).await,
    )
}

pub async fn get_store(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: StoreId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    respond(StatusCode::OK, services.get_store(id))
}

pub async fn update_store(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
    body: Result<Json<StorePatch>, JsonRejection>,
) -> axum::response::Response {
    let id: StoreId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(patch) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    respond(
        StatusCode::OK,
        mutate(services, move |s| s.update_store(id, patch)).await,
    )
}

pub async fn delete_store(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: StoreId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    no_content(mutate(services, move |s| s.delete_store(id)).await)
}

pub async fn store_items(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: StoreId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    respond(StatusCode::OK, services.by_store(id))
}
