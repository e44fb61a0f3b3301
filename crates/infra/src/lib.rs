//! Storage and application services for the household inventory.
//!
//! - `entity_store`: the transactional tables and their snapshot persistence
//! - `integrity`: delete policies and the referential-integrity audit
//! - `query`: read-only views
//! - `service`: the mutation API
//! - `seed`: demo data

pub mod entity_store;
pub mod error;
pub mod integrity;
pub mod query;
pub mod seed;
pub mod service;

pub use entity_store::{EntityStore, InMemorySnapshots, JsonFileSnapshots, SnapshotStore, Tables};
pub use error::StoreError;
pub use integrity::{DeleteOutcome, Violation, audit};
pub use query::{ItemDetail, ItemPlacement, LocationStock, LowStockEntry, Queries, ShoppingListEntry};
pub use seed::{SeedReport, seed_demo_data};
pub use service::{InventoryService, RecordFilter, Resolved, ServiceResult};
