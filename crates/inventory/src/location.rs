use serde::{Deserialize, Serialize};

use homestock_core::name::require_name;
use homestock_core::{DomainResult, Entity, EntityKind, LocationId, UniquelyNamed};

/// A physical storage place in the home ("Pantry", "Freezer").
///
/// Unrelated to stores and aisles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocationPatch {
    pub name: Option<String>,
}

impl Location {
    pub fn new(id: LocationId, name: &str) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: require_name("name", name)?,
        })
    }

    pub fn apply(&mut self, patch: LocationPatch) -> DomainResult<()> {
        if let Some(name) = patch.name {
            self.name = require_name("name", &name)?;
        }
        Ok(())
    }
}

impl Entity for Location {
    type Id = LocationId;

    const KIND: EntityKind = EntityKind::Location;

    fn id(&self) -> LocationId {
        self.id
    }
}

impl UniquelyNamed for Location {
    fn name(&self) -> &str {
        &self.name
    }
}
