use serde::{Deserialize, Serialize};

use homestock_core::name::require_name;
use homestock_core::{DomainResult, Entity, EntityKind, StoreId, UniquelyNamed};

/// A retail store the household shops at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
}

/// Mutable fields of a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StorePatch {
    pub name: Option<String>,
}

impl Store {
    pub fn new(id: StoreId, name: &str) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: require_name("name", name)?,
        })
    }

    pub fn apply(&mut self, patch: StorePatch) -> DomainResult<()> {
        if let Some(name) = patch.name {
            self.name = require_name("name", &name)?;
        }
        Ok(())
    }
}

impl Entity for Store {
    type Id = StoreId;

    const KIND: EntityKind = EntityKind::Store;

    fn id(&self) -> StoreId {
        self.id
    }
}

impl UniquelyNamed for Store {
    fn name(&self) -> &str {
        &self.name
    }
}
