use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;

use homestock_infra::{InventoryService, ServiceResult, StoreError};

use crate::app::errors;

pub mod aisles;
pub mod inventory;
pub mod items;
pub mod locations;
pub mod reports;
pub mod stores;
pub mod system;

/// Router for every inventory endpoint.
pub fn router() -> Router {
    Router::new()
        .nest("/stores", stores::router())
        .nest("/aisles", aisles::router())
        .nest("/locations", locations::router())
        .nest("/items", items::router())
        .nest("/inventory", inventory::router())
        .route("/reports/low-stock", get(reports::low_stock))
        .route("/shopping-list", get(reports::shopping_list))
        .route("/seed", post(system::seed))
}

/// Run a mutation; a store that writes snapshots to disk runs it on the blocking pool.
pub(crate) async fn mutate<T, F>(services: Arc<InventoryService>, f: F) -> ServiceResult<T>
where
    T: Send + 'static,
    F: FnOnce(&InventoryService) -> ServiceResult<T> + Send + 'static,
{
    if !services.entity_store().is_persistent() {
        return f(&*services);
    }
    match tokio::task::spawn_blocking(move || f(&*services)).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "blocking mutation task failed");
            Err(StoreError::Unavailable)
        }
    }
}

/// Serialize a service result with `status`, or map its error.
pub(crate) fn respond<T: Serialize>(status: StatusCode, result: ServiceResult<T>) -> axum::response::Response {
    match result {
        Ok(value) => (status, Json(value)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// 204 on success.
pub(crate) fn no_content<T>(result: ServiceResult<T>) -> axum::response::Response {
    match result {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// 201 when the value was created, 200 when it already existed.
pub(crate) fn created_or_ok(created: bool) -> StatusCode {
    if created { StatusCode::CREATED } else { StatusCode::OK }
}
