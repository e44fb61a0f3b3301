//! Entity trait: identity + continuity across state changes.

use serde::{Deserialize, Serialize};

use crate::name::NameKey;

/// The kinds of records the inventory owns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Store,
    Aisle,
    Location,
    Item,
    InventoryRecord,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Store => "store",
            EntityKind::Aisle => "aisle",
            EntityKind::Location => "location",
            EntityKind::Item => "item",
            EntityKind::InventoryRecord => "inventory_record",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity marker + minimal interface.
///
/// Storage is generic over this trait: lookups, reference checks and
/// not-found errors take the kind from `KIND`.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug + core::fmt::Display + Into<u64>;

    const KIND: EntityKind;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// An entity whose name is unique within its kind, ignoring case.
pub trait UniquelyNamed: Entity {
    fn name(&self) -> &str;

    fn key(&self) -> NameKey {
        NameKey::new(self.name())
    }
}
