use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode};

use homestock_infra::{InventoryService, seed_demo_data};

use crate::app::errors;
use crate::app::routes::{created_or_ok, mutate, respond};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn seed(Extension(services): Extension<Arc<InventoryService>>) -> axum::response::Response {
    match mutate(services, seed_demo_data).await {
        Ok(report) => respond(created_or_ok(report.seeded), Ok(report)),
        Err(e) => errors::store_error_to_response(e),
    }
}
