//! HTTP application wiring (Axum router + service construction).
//!
//! - `routes/`: handlers, one file per resource
//! - `dto.rs`: request bodies and query strings
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use homestock_infra::{EntityStore, InventoryService, JsonFileSnapshots, StoreError};

use crate::config::ApiConfig;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the inventory service described by `config`.
///
/// With a data file, the last saved snapshot is loaded and every mutation is
/// written back to it; otherwise state lives only in memory.
pub fn build_services(config: &ApiConfig) -> Result<InventoryService, StoreError> {
    let store = match &config.data_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "opening snapshot file");
            EntityStore::open(JsonFileSnapshots::new(path))?
        }
        None => {
            tracing::info!("no data file configured; state is in memory only");
            EntityStore::in_memory()
        }
    };
    Ok(InventoryService::new(store))
}

/// Build the full HTTP router.
pub fn build_app(services: Arc<InventoryService>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
