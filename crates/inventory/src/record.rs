use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use homestock_core::{Entity, EntityKind, ItemId, LocationId, RecordId};

/// How many of one item are stored at one location.
///
/// At most one record exists per `(item_id, location_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: RecordId,
    pub item_id: ItemId,
    pub location_id: LocationId,
    pub quantity: u64,
    pub updated_at: DateTime<Utc>,
}

impl InventoryRecord {
    pub fn new(
        id: RecordId,
        item_id: ItemId,
        location_id: LocationId,
        quantity: u64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            item_id,
            location_id,
            quantity,
            updated_at: at,
        }
    }

    /// Set the quantity; returns whether it changed. `updated_at` only moves on change.
    pub fn set_quantity(&mut self, quantity: u64, at: DateTime<Utc>) -> bool {
        if self.quantity == quantity {
            return false;
        }
        self.quantity = quantity;
        self.updated_at = at;
        true
    }
}

impl Entity for InventoryRecord {
    type Id = RecordId;

    const KIND: EntityKind = EntityKind::InventoryRecord;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Directly entered quantity, floored at zero.
pub fn clamp_quantity(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Apply a `+`/`-` step to a quantity. Never goes below zero.
pub fn adjust_quantity(current: u64, delta: i64) -> u64 {
    if delta >= 0 {
        current.saturating_add(delta.unsigned_abs())
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}
