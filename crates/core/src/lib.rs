//! `homestock-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod name;

pub use entity::{Entity, EntityKind, UniquelyNamed};
pub use error::{DomainError, DomainResult};
pub use id::{AisleId, ItemId, LocationId, RecordId, StoreId};
pub use name::NameKey;
