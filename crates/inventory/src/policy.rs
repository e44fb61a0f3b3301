//! What happens to dependents when a referenced record is deleted.

use homestock_core::EntityKind;

/// Behaviour applied to dependents of a deleted record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Refuse the delete while dependents exist.
    Deny,
    /// Keep dependents, clearing their reference.
    Nullify,
    /// Delete dependents together with the parent.
    Cascade,
}

/// A reference from one kind of record to another.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Relation {
    /// `Aisle.store_id`
    StoreAisles,
    /// `Item.aisle_id`
    AisleItems,
    /// `InventoryRecord.location_id`
    LocationRecords,
    /// `InventoryRecord.item_id`
    ItemRecords,
}

impl Relation {
    pub fn parent(self) -> EntityKind {
        match self {
            Relation::StoreAisles => EntityKind::Store,
            Relation::AisleItems => EntityKind::Aisle,
            Relation::LocationRecords => EntityKind::Location,
            Relation::ItemRecords => EntityKind::Item,
        }
    }

    pub fn dependent(self) -> EntityKind {
        match self {
            Relation::StoreAisles => EntityKind::Aisle,
            Relation::AisleItems => EntityKind::Item,
            Relation::LocationRecords | Relation::ItemRecords => EntityKind::InventoryRecord,
        }
    }

    /// The fixed delete policy for this relation.
    pub const fn policy(self) -> DeletePolicy {
        match self {
            Relation::StoreAisles => DeletePolicy::Deny,
            Relation::AisleItems => DeletePolicy::Nullify,
            Relation::LocationRecords => DeletePolicy::Cascade,
            Relation::ItemRecords => DeletePolicy::Cascade,
        }
    }
}
