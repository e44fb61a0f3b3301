use serde::{Deserialize, Serialize};

use homestock_core::name::require_name;
use homestock_core::{AisleId, DomainResult, Entity, EntityKind, NameKey, StoreId};

/// An aisle inside exactly one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aisle {
    pub id: AisleId,
    pub name: String,
    pub store_id: StoreId,
}

/// Input for creating an aisle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewAisle {
    #[serde(default)]
    pub name: String,
    pub store_id: StoreId,
}

/// Mutable fields of an aisle. Setting `store_id` moves the aisle to another store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AislePatch {
    pub name: Option<String>,
    pub store_id: Option<StoreId>,
}

impl Aisle {
    pub fn new(id: AisleId, input: NewAisle) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: require_name("name", &input.name)?,
            store_id: input.store_id,
        })
    }

    pub fn key(&self) -> NameKey {
        NameKey::new(&self.name)
    }

    pub fn apply(&mut self, patch: AislePatch) -> DomainResult<()> {
        if let Some(name) = patch.name {
            self.name = require_name("name", &name)?;
        }
        if let Some(store_id) = patch.store_id {
            self.store_id = store_id;
        }
        Ok(())
    }
}

impl Entity for Aisle {
    type Id = AisleId;

    const KIND: EntityKind = EntityKind::Aisle;

    fn id(&self) -> AisleId {
        self.id
    }
}
