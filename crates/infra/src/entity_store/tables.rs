//! In-memory tables for every entity kind plus their lookup indexes.
//!
//! `Tables` enforces per-record rules (required fields, unique names, live
//! references on create/update, one record per item/location pair). Deletes
//! are raw here; dependents are handled by [`crate::integrity`].

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use homestock_core::{
    AisleId, DomainError, DomainResult, Entity, ItemId, LocationId, NameKey, RecordId, StoreId,
    UniquelyNamed,
};
use homestock_inventory::{
    Aisle, AislePatch, InventoryRecord, Item, ItemPatch, Location, LocationPatch, NewAisle,
    NewItem, Store, StorePatch,
};

use super::snapshot::{Snapshot, SnapshotError};
use crate::integrity;

/// Last id handed out per entity kind. Ids are never reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequences {
    pub store: u64,
    pub aisle: u64,
    pub location: u64,
    pub item: u64,
    pub record: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Tables {
    stores: BTreeMap<StoreId, Store>,
    aisles: BTreeMap<AisleId, Aisle>,
    locations: BTreeMap<LocationId, Location>,
    items: BTreeMap<ItemId, Item>,
    records: BTreeMap<RecordId, InventoryRecord>,

    store_names: HashMap<NameKey, StoreId>,
    location_names: HashMap<NameKey, LocationId>,
    item_names: HashMap<NameKey, ItemId>,
    placements: HashMap<(ItemId, LocationId), RecordId>,

    sequences: Sequences,
}

fn lookup<E: Entity>(table: &BTreeMap<E::Id, E>, id: E::Id) -> DomainResult<&E> {
    table.get(&id).ok_or_else(|| DomainError::not_found(E::KIND, id))
}

/// A create or update may only point at a live row.
fn require_ref<E: Entity>(table: &BTreeMap<E::Id, E>, field: &str, id: E::Id) -> DomainResult<()> {
    if table.contains_key(&id) {
        Ok(())
    } else {
        Err(DomainError::validation(field, format!("unknown {} {id}", E::KIND)))
    }
}

/// Reserve the record's name key in a unique-name index.
fn claim_name<E: UniquelyNamed>(index: &mut HashMap<NameKey, E::Id>, record: &E) -> DomainResult<()> {
    let key = record.key();
    match index.get(&key) {
        Some(existing) if *existing != record.id() => Err(DomainError::conflict(
            E::KIND,
            *existing,
            format!("a {} named `{}` already exists", E::KIND, record.name()),
        )),
        _ => {
            index.insert(key, record.id());
            Ok(())
        }
    }
}

/// Move the record from `old` to its current name key.
fn rekey_name<E: UniquelyNamed>(
    index: &mut HashMap<NameKey, E::Id>,
    old: &NameKey,
    record: &E,
) -> DomainResult<()> {
    if *old == record.key() {
        return Ok(());
    }
    claim_name(index, record)?;
    index.remove(old);
    Ok(())
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
            && self.aisles.is_empty()
            && self.locations.is_empty()
            && self.items.is_empty()
            && self.records.is_empty()
    }

    pub fn sequences(&self) -> Sequences {
        self.sequences
    }

    // -------------------------
    // Stores
    // -------------------------

    pub fn stores(&self) -> impl Iterator<Item = &Store> {
        self.stores.values()
    }

    pub fn get_store(&self, id: StoreId) -> Option<&Store> {
        self.stores.get(&id)
    }

    pub fn store(&self, id: StoreId) -> DomainResult<&Store> {
        lookup(&self.stores, id)
    }

    pub(crate) fn insert_store(&mut self, name: &str) -> DomainResult<Store> {
        let id = StoreId::new(self.sequences.store + 1);
        let store = Store::new(id, name)?;
        claim_name(&mut self.store_names, &store)?;

        self.sequences.store = id.get();
        self.stores.insert(id, store.clone());
        Ok(store)
    }

    pub(crate) fn update_store(&mut self, id: StoreId, patch: StorePatch) -> DomainResult<Store> {
        let mut store = self.store(id)?.clone();
        let old_key = store.key();
        store.apply(patch)?;
        rekey_name(&mut self.store_names, &old_key, &store)?;

        self.stores.insert(id, store.clone());
        Ok(store)
    }

    pub(crate) fn remove_store(&mut self, id: StoreId) -> Option<Store> {
        let store = self.stores.remove(&id)?;
        self.store_names.remove(&store.key());
        Some(store)
    }

    // -------------------------
    // Aisles
    // -------------------------

    pub fn aisles(&self) -> impl Iterator<Item = &Aisle> {
        self.aisles.values()
    }

    pub fn get_aisle(&self, id: AisleId) -> Option<&Aisle> {
        self.aisles.get(&id)
    }

    pub fn aisle(&self, id: AisleId) -> DomainResult<&Aisle> {
        lookup(&self.aisles, id)
    }

    pub fn aisles_of_store(&self, store_id: StoreId) -> impl Iterator<Item = &Aisle> {
        self.aisles.values().filter(move |a| a.store_id == store_id)
    }

    fn warn_on_duplicate_aisle(&self, aisle: &Aisle) {
        let key = aisle.key();
        if let Some(twin) = self
            .aisles_of_store(aisle.store_id)
            .find(|a| a.id != aisle.id && a.key() == key)
        {
            tracing::warn!(
                aisle_id = %aisle.id,
                existing_aisle_id = %twin.id,
                store_id = %aisle.store_id,
                "aisle name repeated within store"
            );
        }
    }

    pub(crate) fn insert_aisle(&mut self, input: NewAisle) -> DomainResult<Aisle> {
        require_ref(&self.stores, "store_id", input.store_id)?;
        let id = AisleId::new(self.sequences.aisle + 1);
        let aisle = Aisle::new(id, input)?;
        self.warn_on_duplicate_aisle(&aisle);

        self.sequences.aisle = id.get();
        self.aisles.insert(id, aisle.clone());
        Ok(aisle)
    }

    pub(crate) fn update_aisle(&mut self, id: AisleId, patch: AislePatch) -> DomainResult<Aisle> {
        let mut aisle = self.aisle(id)?.clone();
        if let Some(store_id) = patch.store_id {
            require_ref(&self.stores, "store_id", store_id)?;
        }
        aisle.apply(patch)?;
        self.warn_on_duplicate_aisle(&aisle);

        self.aisles.insert(id, aisle.clone());
        Ok(aisle)
    }

    pub(crate) fn remove_aisle(&mut self, id: AisleId) -> Option<Aisle> {
        self.aisles.remove(&id)
    }

    // -------------------------
    // Locations
    // -------------------------

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    pub fn get_location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    pub fn location(&self, id: LocationId) -> DomainResult<&Location> {
        lookup(&self.locations, id)
    }

    pub fn location_by_key(&self, key: &NameKey) -> Option<&Location> {
        self.location_names
            .get(key)
            .and_then(|id| self.locations.get(id))
    }

    pub(crate) fn insert_location(&mut self, name: &str) -> DomainResult<Location> {
        let id = LocationId::new(self.sequences.location + 1);
        let location = Location::new(id, name)?;
        claim_name(&mut self.location_names, &location)?;

        self.sequences.location = id.get();
        self.locations.insert(id, location.clone());
        Ok(location)
    }

    pub(crate) fn update_location(
        &mut self,
        id: LocationId,
        patch: LocationPatch,
    ) -> DomainResult<Location> {
        let mut location = self.location(id)?.clone();
        let old_key = location.key();
        location.apply(patch)?;
        rekey_name(&mut self.location_names, &old_key, &location)?;

        self.locations.insert(id, location.clone());
        Ok(location)
    }

    pub(crate) fn remove_location(&mut self, id: LocationId) -> Option<Location> {
        let location = self.locations.remove(&id)?;
        self.location_names.remove(&location.key());
        Some(location)
    }

    // -------------------------
    // Items
    // -------------------------

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn item(&self, id: ItemId) -> DomainResult<&Item> {
        lookup(&self.items, id)
    }

    pub fn items_in_aisle(&self, aisle_id: AisleId) -> impl Iterator<Item = &Item> {
        self.items
            .values()
            .filter(move |i| i.aisle_id == Some(aisle_id))
    }

    pub(crate) fn insert_item(&mut self, input: NewItem) -> DomainResult<Item> {
        if let Some(aisle_id) = input.aisle_id {
            require_ref(&self.aisles, "aisle_id", aisle_id)?;
        }
        let id = ItemId::new(self.sequences.item + 1);
        let item = Item::new(id, input)?;
        claim_name(&mut self.item_names, &item)?;

        self.sequences.item = id.get();
        self.items.insert(id, item.clone());
        Ok(item)
    }

    pub(crate) fn update_item(&mut self, id: ItemId, patch: ItemPatch) -> DomainResult<Item> {
        let mut item = self.item(id)?.clone();
        if let Some(aisle_id) = patch.assigned_aisle() {
            require_ref(&self.aisles, "aisle_id", aisle_id)?;
        }
        let old_key = item.key();
        item.apply(patch)?;
        rekey_name(&mut self.item_names, &old_key, &item)?;

        self.items.insert(id, item.clone());
        Ok(item)
    }

    pub(crate) fn unfile_item(&mut self, id: ItemId) {
        if let Some(item) = self.items.get_mut(&id) {
            item.unfile();
        }
    }

    pub(crate) fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let item = self.items.remove(&id)?;
        self.item_names.remove(&item.key());
        Some(item)
    }

    // -------------------------
    // Inventory records
    // -------------------------

    pub fn records(&self) -> impl Iterator<Item = &InventoryRecord> {
        self.records.values()
    }

    pub fn get_record(&self, id: RecordId) -> Option<&InventoryRecord> {
        self.records.get(&id)
    }

    pub fn record(&self, id: RecordId) -> DomainResult<&InventoryRecord> {
        lookup(&self.records, id)
    }

    /// The record for one item at one location, if the item is stored there.
    pub fn record_at(&self, item_id: ItemId, location_id: LocationId) -> Option<&InventoryRecord> {
        self.placements
            .get(&(item_id, location_id))
            .and_then(|id| self.records.get(id))
    }

    pub fn records_of_item(&self, item_id: ItemId) -> impl Iterator<Item = &InventoryRecord> {
        self.records.values().filter(move |r| r.item_id == item_id)
    }

    pub fn records_at_location(
        &self,
        location_id: LocationId,
    ) -> impl Iterator<Item = &InventoryRecord> {
        self.records
            .values()
            .filter(move |r| r.location_id == location_id)
    }

    /// Sum of the item's quantities across all locations.
    pub fn total_quantity(&self, item_id: ItemId) -> u64 {
        self.records_of_item(item_id)
            .fold(0u64, |acc, r| acc.saturating_add(r.quantity))
    }

    pub(crate) fn insert_record(
        &mut self,
        item_id: ItemId,
        location_id: LocationId,
        quantity: u64,
        at: DateTime<Utc>,
    ) -> DomainResult<InventoryRecord> {
        require_ref(&self.items, "item_id", item_id)?;
        require_ref(&self.locations, "location_id", location_id)?;
        if let Some(existing) = self.placements.get(&(item_id, location_id)) {
            return Err(DomainError::conflict(
                InventoryRecord::KIND,
                *existing,
                format!("item {item_id} already has a record at location {location_id}"),
            ));
        }

        let id = RecordId::new(self.sequences.record + 1);
        let record = InventoryRecord::new(id, item_id, location_id, quantity, at);
        self.sequences.record = id.get();
        self.placements.insert((item_id, location_id), id);
        self.records.insert(id, record.clone());
        Ok(record)
    }

    pub(crate) fn set_record_quantity(
        &mut self,
        id: RecordId,
        quantity: u64,
        at: DateTime<Utc>,
    ) -> DomainResult<InventoryRecord> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(InventoryRecord::KIND, id))?;
        record.set_quantity(quantity, at);
        Ok(record.clone())
    }

    pub(crate) fn remove_record(&mut self, id: RecordId) -> Option<InventoryRecord> {
        let record = self.records.remove(&id)?;
        self.placements.remove(&(record.item_id, record.location_id));
        Some(record)
    }

    // -------------------------
    // Snapshots
    // -------------------------

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            version: Snapshot::CURRENT_VERSION,
            sequences: self.sequences,
            stores: self.stores.values().cloned().collect(),
            aisles: self.aisles.values().cloned().collect(),
            locations: self.locations.values().cloned().collect(),
            items: self.items.values().cloned().collect(),
            records: self.records.values().cloned().collect(),
        }
    }

    /// Rebuild tables and indexes from a snapshot, refusing inconsistent data.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        if snapshot.version != Snapshot::CURRENT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }

        let mut tables = Tables {
            sequences: snapshot.sequences,
            ..Tables::default()
        };

        for store in snapshot.stores {
            tables.sequences.store = tables.sequences.store.max(store.id.get());
            tables.store_names.insert(store.key(), store.id);
            tables.stores.insert(store.id, store);
        }
        for aisle in snapshot.aisles {
            tables.sequences.aisle = tables.sequences.aisle.max(aisle.id.get());
            tables.aisles.insert(aisle.id, aisle);
        }
        for location in snapshot.locations {
            tables.sequences.location = tables.sequences.location.max(location.id.get());
            tables.location_names.insert(location.key(), location.id);
            tables.locations.insert(location.id, location);
        }
        for item in snapshot.items {
            tables.sequences.item = tables.sequences.item.max(item.id.get());
            tables.item_names.insert(item.key(), item.id);
            tables.items.insert(item.id, item);
        }
        for record in snapshot.records {
            tables.sequences.record = tables.sequences.record.max(record.id.get());
            tables
                .placements
                .insert((record.item_id, record.location_id), record.id);
            tables.records.insert(record.id, record);
        }

        let violations = integrity::audit(&tables);
        if !violations.is_empty() {
            let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
            return Err(SnapshotError::Integrity(details.join("; ")));
        }
        Ok(tables)
    }
}
