use serde::{Deserialize, Deserializer};

use homestock_core::{AisleId, ItemId, LocationId, StoreId};
use homestock_inventory::{ItemPatch, NewItem, PlacementRequest};

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// -------------------------
// Request DTOs
// -------------------------

/// A missing `name` reads as blank so the name check reports it.
#[derive(Debug, Deserialize)]
pub struct NameRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub aisle_id: Option<AisleId>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub default_unit: Option<String>,
    /// Placements applied in the same transaction.
    #[serde(default)]
    pub locations: Option<Vec<PlacementRequest>>,
}

impl CreateItemRequest {
    pub fn into_parts(self) -> (NewItem, Option<Vec<PlacementRequest>>) {
        let item = NewItem {
            name: self.name,
            aisle_id: self.aisle_id,
            notes: self.notes,
            photo_url: self.photo_url,
            category: self.category,
            default_unit: self.default_unit,
        };
        (item, self.locations)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub aisle_id: Option<Option<AisleId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub photo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub default_unit: Option<Option<String>>,
    /// Replaces the item's placements when present.
    #[serde(default)]
    pub locations: Option<Vec<PlacementRequest>>,
}

impl UpdateItemRequest {
    pub fn into_parts(self) -> (ItemPatch, Option<Vec<PlacementRequest>>) {
        let patch = ItemPatch {
            name: self.name,
            aisle_id: self.aisle_id,
            notes: self.notes,
            photo_url: self.photo_url,
            category: self.category,
            default_unit: self.default_unit,
        };
        (patch, self.locations)
    }
}

/// Body of `PUT /items/:id/locations`: a bare list or `{"locations": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SavePlacementsRequest {
    List(Vec<PlacementRequest>),
    Wrapped { locations: Vec<PlacementRequest> },
}

impl SavePlacementsRequest {
    pub fn into_list(self) -> Vec<PlacementRequest> {
        match self {
            SavePlacementsRequest::List(list) => list,
            SavePlacementsRequest::Wrapped { locations } => locations,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddStockRequest {
    pub item_id: ItemId,
    pub location_id: LocationId,
    #[serde(default)]
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct AdjustQuantityRequest {
    pub delta: i64,
}

// -------------------------
// Query strings
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct AisleQuery {
    pub store_id: Option<StoreId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    pub item_id: Option<ItemId>,
    pub location_id: Option<LocationId>,
}

fn default_threshold() -> u64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct ThresholdQuery {
    #[serde(default = "default_threshold")]
    pub threshold: u64,
    #[serde(default)]
    pub store_id: Option<StoreId>,
}
