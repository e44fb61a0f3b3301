use std::sync::Arc;

use axum::{
    extract::{Extension, Query, rejection::QueryRejection},
    http::StatusCode,
};

use homestock_infra::InventoryService;

use crate::app::routes::respond;
use crate::app::{dto, errors};

pub async fn low_stock(
    Extension(services): Extension<Arc<InventoryService>>,
    query: Result<Query<dto::ThresholdQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    respond(StatusCode::OK, services.low_stock(query.threshold))
}

/// Low-stock items grouped by where to buy them, optionally for one store.
pub async fn shopping_list(
    Extension(services): Extension<Arc<InventoryService>>,
    query: Result<Query<dto::ThresholdQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    respond(
        StatusCode::OK,
        services.shopping_list(query.threshold, query.store_id),
    )
}
