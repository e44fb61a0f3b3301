//! Household inventory domain model.
//!
//! This crate contains the records, patches and rules of the inventory,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod aisle;
pub mod item;
pub mod location;
pub mod placement;
pub mod policy;
pub mod record;
pub mod store;

pub use aisle::{Aisle, AislePatch, NewAisle};
pub use item::{Item, ItemPatch, NewItem};
pub use location::{Location, LocationPatch};
pub use placement::{Placement, PlacementRequest, normalize_placements};
pub use policy::{DeletePolicy, Relation};
pub use record::{InventoryRecord, adjust_quantity, clamp_quantity};
pub use store::{Store, StorePatch};
