use serde::{Deserialize, Serialize};

use homestock_core::name::{optional_text, require_name};
use homestock_core::{AisleId, DomainResult, Entity, EntityKind, ItemId, UniquelyNamed};

/// Catalog entry for something the household keeps on hand.
///
/// An item carries no quantity; quantities live in
/// [`InventoryRecord`](crate::record::InventoryRecord)s, one per location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub aisle_id: Option<AisleId>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub category: Option<String>,
    pub default_unit: Option<String>,
}

/// Input for creating an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub aisle_id: Option<AisleId>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub category: Option<String>,
    pub default_unit: Option<String>,
}

/// Mutable fields of an item.
///
/// Outer `None` leaves a field unchanged; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub aisle_id: Option<Option<AisleId>>,
    pub notes: Option<Option<String>>,
    pub photo_url: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub default_unit: Option<Option<String>>,
}

impl NewItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl ItemPatch {
    /// The aisle this patch files the item under, if it sets one.
    pub fn assigned_aisle(&self) -> Option<AisleId> {
        self.aisle_id.flatten()
    }
}

impl Item {
    pub fn new(id: ItemId, input: NewItem) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: require_name("name", &input.name)?,
            aisle_id: input.aisle_id,
            notes: optional_text(input.notes),
            photo_url: optional_text(input.photo_url),
            category: optional_text(input.category),
            default_unit: optional_text(input.default_unit),
        })
    }

    pub fn apply(&mut self, patch: ItemPatch) -> DomainResult<()> {
        if let Some(name) = patch.name {
            self.name = require_name("name", &name)?;
        }
        if let Some(aisle_id) = patch.aisle_id {
            self.aisle_id = aisle_id;
        }
        if let Some(notes) = patch.notes {
            self.notes = optional_text(notes);
        }
        if let Some(photo_url) = patch.photo_url {
            self.photo_url = optional_text(photo_url);
        }
        if let Some(category) = patch.category {
            self.category = optional_text(category);
        }
        if let Some(default_unit) = patch.default_unit {
            self.default_unit = optional_text(default_unit);
        }
        Ok(())
    }

    /// Detach the item from its aisle (the aisle is going away).
    pub fn unfile(&mut self) {
        self.aisle_id = None;
    }
}

impl Entity for Item {
    type Id = ItemId;

    const KIND: EntityKind = EntityKind::Item;

    fn id(&self) -> ItemId {
        self.id
    }
}

impl UniquelyNamed for Item {
    fn name(&self) -> &str {
        &self.name
    }
}
