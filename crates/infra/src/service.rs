//! Inventory service: the typed operations the UI calls.
//!
//! Each mutation is one entity-store transaction and returns the canonical
//! post-mutation state. Reads return snapshots.

use chrono::{DateTime, Utc};
use serde::Serialize;

use homestock_core::{AisleId, ItemId, LocationId, NameKey, RecordId, StoreId};
use homestock_inventory::{
    Aisle, AislePatch, InventoryRecord, Item, ItemPatch, Location, LocationPatch, NewAisle,
    NewItem, PlacementRequest, Store, StorePatch, adjust_quantity, clamp_quantity,
    normalize_placements,
};

use crate::entity_store::{EntityStore, Tables};
use crate::error::StoreError;
use crate::integrity::{self, DeleteOutcome};
use crate::query::{ItemDetail, ItemPlacement, LocationStock, LowStockEntry, Queries, ShoppingListEntry};

pub type ServiceResult<T> = Result<T, StoreError>;

/// Result of a find-or-create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved<T> {
    #[serde(flatten)]
    pub value: T,
    pub created: bool,
}

/// Filter for listing inventory records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub item_id: Option<ItemId>,
    pub location_id: Option<LocationId>,
}

/// Find a location by name, creating it when no name matches ignoring case.
fn resolve_location(tables: &mut Tables, name: &str) -> homestock_core::DomainResult<Resolved<Location>> {
    if let Some(existing) = tables.location_by_key(&NameKey::new(name)) {
        return Ok(Resolved {
            value: existing.clone(),
            created: false,
        });
    }
    let location = tables.insert_location(name)?;
    Ok(Resolved {
        value: location,
        created: true,
    })
}

/// Replace an item's records with `requests` (full replace, not merge).
fn replace_placements(
    tables: &mut Tables,
    item_id: ItemId,
    requests: &[PlacementRequest],
    at: DateTime<Utc>,
) -> homestock_core::DomainResult<()> {
    tables.item(item_id)?;
    let placements = normalize_placements(requests)?;

    let mut kept: Vec<LocationId> = Vec::with_capacity(placements.len());
    for placement in &placements {
        let location = resolve_location(tables, &placement.name)?.value;
        match tables.record_at(item_id, location.id).map(|r| r.id) {
            Some(record_id) => {
                tables.set_record_quantity(record_id, placement.quantity, at)?;
            }
            None => {
                tables.insert_record(item_id, location.id, placement.quantity, at)?;
            }
        }
        kept.push(location.id);
    }

    let stale: Vec<RecordId> = tables
        .records_of_item(item_id)
        .filter(|r| !kept.contains(&r.location_id))
        .map(|r| r.id)
        .collect();
    for record_id in stale {
        tables.remove_record(record_id);
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct InventoryService {
    store: EntityStore,
}

impl InventoryService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(EntityStore::in_memory())
    }

    pub fn entity_store(&self) -> &EntityStore {
        &self.store
    }

    fn query<T>(&self, f: impl FnOnce(Queries<'_>) -> T) -> ServiceResult<T> {
        self.store.read(|tables| f(Queries::new(tables)))
    }

    // -------------------------
    // Stores
    // -------------------------

    pub fn list_stores(&self) -> ServiceResult<Vec<Store>> {
        self.store.read(|t| t.stores().cloned().collect())
    }

    pub fn get_store(&self, id: StoreId) -> ServiceResult<Store> {
        Ok(self.store.read(|t| t.store(id).cloned())??)
    }

    pub fn create_store(&self, name: &str) -> ServiceResult<Store> {
        let store = self.store.transact(|t| t.insert_store(name))?;
        tracing::info!(store_id = %store.id, name = %store.name, "store created");
        Ok(store)
    }

    pub fn update_store(&self, id: StoreId, patch: StorePatch) -> ServiceResult<Store> {
        let store = self.store.transact(|t| t.update_store(id, patch))?;
        tracing::info!(store_id = %id, "store updated");
        Ok(store)
    }

    /// Refused with a conflict while any aisle belongs to the store.
    pub fn delete_store(&self, id: StoreId) -> ServiceResult<DeleteOutcome> {
        let outcome = self.store.transact(|t| integrity::delete_store(t, id))?;
        tracing::info!(store_id = %id, "store deleted");
        Ok(outcome)
    }

    // -------------------------
    // Aisles
    // -------------------------

    pub fn list_aisles(&self, store_id: Option<StoreId>) -> ServiceResult<Vec<Aisle>> {
        self.store.read(|t| {
            t.aisles()
                .filter(|a| store_id.is_none_or(|s| a.store_id == s))
                .cloned()
                .collect()
        })
    }

    pub fn create_aisle(&self, input: NewAisle) -> ServiceResult<Aisle> {
        let aisle = self.store.transact(|t| t.insert_aisle(input))?;
        tracing::info!(aisle_id = %aisle.id, store_id = %aisle.store_id, "aisle created");
        Ok(aisle)
    }

    pub fn update_aisle(&self, id: AisleId, patch: AislePatch) -> ServiceResult<Aisle> {
        let aisle = self.store.transact(|t| t.update_aisle(id, patch))?;
        tracing::info!(aisle_id = %id, store_id = %aisle.store_id, "aisle updated");
        Ok(aisle)
    }

    /// Items filed under the aisle stay, unfiled.
    pub fn delete_aisle(&self, id: AisleId) -> ServiceResult<DeleteOutcome> {
        let outcome = self.store.transact(|t| integrity::delete_aisle(t, id))?;
        tracing::info!(aisle_id = %id, unfiled = outcome.unfiled_items.len(), "aisle deleted");
        Ok(outcome)
    }

    // -------------------------
    // Locations
    // -------------------------

    pub fn list_locations(&self) -> ServiceResult<Vec<Location>> {
        self.store.read(|t| t.locations().cloned().collect())
    }

    /// Find-or-create: a name matching an existing location ignoring case
    /// returns that location.
    pub fn create_location(&self, name: &str) -> ServiceResult<Resolved<Location>> {
        let resolved = self.store.transact(|t| resolve_location(t, name))?;
        if resolved.created {
            tracing::info!(location_id = %resolved.value.id, name = %resolved.value.name, "location created");
        }
        Ok(resolved)
    }

    pub fn update_location(&self, id: LocationId, patch: LocationPatch) -> ServiceResult<Location> {
        let location = self.store.transact(|t| t.update_location(id, patch))?;
        tracing::info!(location_id = %id, "location updated");
        Ok(location)
    }

    /// Deletes the location and every record stored there.
    pub fn delete_location(&self, id: LocationId) -> ServiceResult<DeleteOutcome> {
        let outcome = self.store.transact(|t| integrity::delete_location(t, id))?;
        tracing::info!(location_id = %id, records = outcome.removed_records.len(), "location deleted");
        Ok(outcome)
    }

    // -------------------------
    // Items
    // -------------------------

    pub fn list_items(&self) -> ServiceResult<Vec<Item>> {
        self.store.read(|t| t.items().cloned().collect())
    }

    pub fn get_item(&self, id: ItemId) -> ServiceResult<ItemDetail> {
        Ok(self.query(|q| q.item_detail(id))??)
    }

    /// Create an item, optionally placing it in locations in the same transaction.
    pub fn create_item(
        &self,
        input: NewItem,
        placements: Option<&[PlacementRequest]>,
    ) -> ServiceResult<ItemDetail> {
        let now = Utc::now();
        let detail = self.store.transact(|t| {
            let item = t.insert_item(input)?;
            if let Some(requests) = placements {
                replace_placements(t, item.id, requests, now)?;
            }
            Queries::new(t).item_detail(item.id)
        })?;
        tracing::info!(item_id = %detail.item.id, name = %detail.item.name, "item created");
        Ok(detail)
    }

    /// Patch an item; a placement list, when given, replaces its locations.
    pub fn update_item(
        &self,
        id: ItemId,
        patch: ItemPatch,
        placements: Option<&[PlacementRequest]>,
    ) -> ServiceResult<ItemDetail> {
        let now = Utc::now();
        let detail = self.store.transact(|t| {
            t.update_item(id, patch)?;
            if let Some(requests) = placements {
                replace_placements(t, id, requests, now)?;
            }
            Queries::new(t).item_detail(id)
        })?;
        tracing::info!(item_id = %id, "item updated");
        Ok(detail)
    }

    /// Deletes the item and all of its records.
    pub fn delete_item(&self, id: ItemId) -> ServiceResult<DeleteOutcome> {
        let outcome = self.store.transact(|t| integrity::delete_item(t, id))?;
        tracing::info!(item_id = %id, records = outcome.removed_records.len(), "item deleted");
        Ok(outcome)
    }

    /// Make the item's records exactly mirror `requests`.
    ///
    /// Location names resolve ignoring case, creating missing locations.
    /// Records at locations not listed are deleted.
    pub fn save_item_placements(
        &self,
        item_id: ItemId,
        requests: &[PlacementRequest],
    ) -> ServiceResult<ItemDetail> {
        let now = Utc::now();
        let detail = self.store.transact(|t| {
            replace_placements(t, item_id, requests, now)?;
            Queries::new(t).item_detail(item_id)
        })?;
        tracing::info!(
            item_id = %item_id,
            locations = detail.locations.len(),
            total = detail.total,
            "item placements saved"
        );
        Ok(detail)
    }

    // -------------------------
    // Inventory records
    // -------------------------

    pub fn list_inventory_records(&self, filter: RecordFilter) -> ServiceResult<Vec<InventoryRecord>> {
        self.store.read(|t| {
            t.records()
                .filter(|r| filter.item_id.is_none_or(|i| r.item_id == i))
                .filter(|r| filter.location_id.is_none_or(|l| r.location_id == l))
                .cloned()
                .collect()
        })
    }

    /// Add stock of an item at a location, merging into the existing record.
    pub fn add_stock(
        &self,
        item_id: ItemId,
        location_id: LocationId,
        quantity: i64,
    ) -> ServiceResult<Resolved<InventoryRecord>> {
        let amount = clamp_quantity(quantity);
        let now = Utc::now();
        let resolved = self.store.transact(|t| {
            match t.record_at(item_id, location_id).map(|r| (r.id, r.quantity)) {
                Some((record_id, current)) => Ok(Resolved {
                    value: t.set_record_quantity(record_id, current.saturating_add(amount), now)?,
                    created: false,
                }),
                None => Ok(Resolved {
                    value: t.insert_record(item_id, location_id, amount, now)?,
                    created: true,
                }),
            }
        })?;
        tracing::info!(
            record_id = %resolved.value.id,
            item_id = %item_id,
            location_id = %location_id,
            quantity = resolved.value.quantity,
            "stock added"
        );
        Ok(resolved)
    }

    /// Set a record's quantity directly; negative input floors to zero.
    pub fn update_record_quantity(&self, id: RecordId, quantity: i64) -> ServiceResult<InventoryRecord> {
        let now = Utc::now();
        let record = self
            .store
            .transact(|t| t.set_record_quantity(id, clamp_quantity(quantity), now))?;
        tracing::info!(record_id = %id, quantity = record.quantity, "record quantity set");
        Ok(record)
    }

    /// Step a record's quantity up or down; never below zero.
    pub fn adjust_record_quantity(&self, id: RecordId, delta: i64) -> ServiceResult<InventoryRecord> {
        let now = Utc::now();
        let record = self.store.transact(|t| {
            let current = t.record(id)?.quantity;
            t.set_record_quantity(id, adjust_quantity(current, delta), now)
        })?;
        tracing::info!(record_id = %id, delta, quantity = record.quantity, "record quantity adjusted");
        Ok(record)
    }

    pub fn delete_record(&self, id: RecordId) -> ServiceResult<DeleteOutcome> {
        let outcome = self.store.transact(|t| integrity::delete_record(t, id))?;
        tracing::info!(record_id = %id, "record deleted");
        Ok(outcome)
    }

    // -------------------------
    // Queries
    // -------------------------

    pub fn records_at_location(&self, location_id: LocationId) -> ServiceResult<Vec<LocationStock>> {
        self.query(|q| q.records_at_location(location_id))
    }

    pub fn records_for_item(&self, item_id: ItemId) -> ServiceResult<Vec<ItemPlacement>> {
        self.query(|q| q.records_for_item(item_id))
    }

    pub fn low_stock(&self, threshold: u64) -> ServiceResult<Vec<LowStockEntry>> {
        self.query(|q| q.low_stock(threshold))
    }

    pub fn by_store(&self, store_id: StoreId) -> ServiceResult<Vec<Item>> {
        self.query(|q| q.by_store(store_id))
    }

    pub fn shopping_list(
        &self,
        threshold: u64,
        store_id: Option<StoreId>,
    ) -> ServiceResult<Vec<ShoppingListEntry>> {
        self.query(|q| q.shopping_list(threshold, store_id))
    }

    pub fn search_items(&self, text: &str) -> ServiceResult<Vec<Item>> {
        self.query(|q| q.search_items(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrity::audit;
    use homestock_core::{DomainError, EntityKind};

    fn domain(err: StoreError) -> DomainError {
        match err {
            StoreError::Domain(e) => e,
            other => panic!("expected domain error, got {other:?}"),
        }
    }

    fn placements(svc: &InventoryService, item: ItemId) -> Vec<(String, u64)> {
        svc.records_for_item(item)
            .unwrap()
            .into_iter()
            .map(|p| (p.location_name, p.quantity))
            .collect()
    }

    #[test]
    fn save_placements_replaces_the_full_set() {
        let svc = InventoryService::in_memory();
        let soup = svc.create_item(NewItem::named("Soup"), None).unwrap().item.id;

        svc.save_item_placements(
            soup,
            &[PlacementRequest::new("Pantry", 3), PlacementRequest::new("Freezer", 2)],
        )
        .unwrap();
        assert_eq!(
            placements(&svc, soup),
            vec![("Freezer".to_string(), 2), ("Pantry".to_string(), 3)]
        );

        let detail = svc
            .save_item_placements(soup, &[PlacementRequest::new("Pantry", 5)])
            .unwrap();
        assert_eq!(detail.total, 5);
        assert_eq!(placements(&svc, soup), vec![("Pantry".to_string(), 5)]);
        assert_eq!(svc.list_inventory_records(RecordFilter::default()).unwrap().len(), 1);
        // Freezer survives as a location; only the record went away.
        assert_eq!(svc.list_locations().unwrap().len(), 2);
    }

    #[test]
    fn save_placements_reuses_locations_ignoring_case() {
        let svc = InventoryService::in_memory();
        let pantry = svc.create_location("Pantry").unwrap().value.id;
        let milk = svc.create_item(NewItem::named("Milk"), None).unwrap().item.id;

        svc.save_item_placements(milk, &[PlacementRequest::new("  pantry ", 2)])
            .unwrap();
        let records = svc
            .list_inventory_records(RecordFilter {
                item_id: Some(milk),
                location_id: None,
            })
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location_id, pantry);
        assert_eq!(svc.list_locations().unwrap().len(), 1);
    }

    #[test]
    fn save_placements_keeps_record_identity_and_timestamp_when_unchanged() {
        let svc = InventoryService::in_memory();
        let rice = svc.create_item(NewItem::named("Rice"), None).unwrap().item.id;
        let first = svc
            .save_item_placements(rice, &[PlacementRequest::new("Pantry", 4)])
            .unwrap();
        let second = svc
            .save_item_placements(rice, &[PlacementRequest::new("PANTRY", 4)])
            .unwrap();
        assert_eq!(first.locations[0].record_id, second.locations[0].record_id);
        assert_eq!(first.locations[0].updated_at, second.locations[0].updated_at);
    }

    #[test]
    fn save_placements_rejects_blank_names_without_side_effects() {
        let svc = InventoryService::in_memory();
        let eggs = svc.create_item(NewItem::named("Eggs"), None).unwrap().item.id;
        svc.save_item_placements(eggs, &[PlacementRequest::new("Fridge", 12)])
            .unwrap();

        let err = domain(
            svc.save_item_placements(
                eggs,
                &[PlacementRequest::new("Garage", 1), PlacementRequest::new("   ", 1)],
            )
            .unwrap_err(),
        );
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "locations[1].location_name"));
        assert_eq!(placements(&svc, eggs), vec![("Fridge".to_string(), 12)]);
        assert_eq!(svc.list_locations().unwrap().len(), 1);
    }

    #[test]
    fn save_placements_for_unknown_item_is_not_found() {
        let svc = InventoryService::in_memory();
        let err = domain(
            svc.save_item_placements(ItemId::new(9), &[PlacementRequest::new("Pantry", 1)])
                .unwrap_err(),
        );
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(svc.list_locations().unwrap().is_empty());
    }

    #[test]
    fn updating_unknown_ids_is_not_found_and_changes_nothing() {
        let svc = InventoryService::in_memory();
        let rename = || Some("Anything".to_string());

        let err = domain(svc.update_store(StoreId::new(99), StorePatch { name: rename() }).unwrap_err());
        assert_eq!(err, DomainError::not_found(EntityKind::Store, 99u64));

        let err = domain(
            svc.update_location(LocationId::new(99), LocationPatch { name: rename() })
                .unwrap_err(),
        );
        assert_eq!(err, DomainError::not_found(EntityKind::Location, 99u64));

        let patch = ItemPatch {
            name: rename(),
            ..ItemPatch::default()
        };
        let err = domain(svc.update_item(ItemId::new(99), patch, None).unwrap_err());
        assert_eq!(err, DomainError::not_found(EntityKind::Item, 99u64));

        assert!(svc.entity_store().read(|t| t.is_empty()).unwrap());
    }

    #[test]
    fn update_aisle_moves_between_stores() {
        let svc = InventoryService::in_memory();
        let costco = svc.create_store("Costco").unwrap();
        let target = svc.create_store("Target").unwrap();
        let aisle = svc
            .create_aisle(NewAisle {
                name: "Bakery".into(),
                store_id: costco.id,
            })
            .unwrap();

        let moved = svc
            .update_aisle(
                aisle.id,
                AislePatch {
                    store_id: Some(target.id),
                    ..AislePatch::default()
                },
            )
            .unwrap();
        assert_eq!(moved.store_id, target.id);
        assert_eq!(moved.name, "Bakery");
        svc.delete_store(costco.id).unwrap();

        let err = domain(
            svc.update_aisle(
                AisleId::new(99),
                AislePatch {
                    name: Some("Deli".into()),
                    ..AislePatch::default()
                },
            )
            .unwrap_err(),
        );
        assert_eq!(err, DomainError::not_found(EntityKind::Aisle, 99u64));
    }

    #[test]
    fn create_location_is_find_or_create() {
        let svc = InventoryService::in_memory();
        let first = svc.create_location("Pantry").unwrap();
        let again = svc.create_location("pantry").unwrap();
        assert!(first.created);
        assert!(!again.created);
        assert_eq!(first.value.id, again.value.id);
        assert_eq!(again.value.name, "Pantry");
    }

    #[test]
    fn deleting_location_removes_its_records() {
        let svc = InventoryService::in_memory();
        let oats = svc
            .create_item(NewItem::named("Oats"), Some(&[PlacementRequest::new("Pantry", 2)]))
            .unwrap();
        let pantry = oats.locations[0].location_id;

        let outcome = svc.delete_location(pantry).unwrap();
        assert_eq!(outcome.removed_records.len(), 1);
        assert!(svc.records_at_location(pantry).unwrap().is_empty());
        assert_eq!(svc.get_item(oats.item.id).unwrap().total, 0);
    }

    #[test]
    fn deleting_store_with_aisles_conflicts_every_time() {
        let svc = InventoryService::in_memory();
        let store = svc.create_store("Walmart").unwrap();
        svc.create_aisle(NewAisle {
            name: "A3".into(),
            store_id: store.id,
        })
        .unwrap();

        for _ in 0..2 {
            let err = domain(svc.delete_store(store.id).unwrap_err());
            assert!(matches!(err, DomainError::Conflict { .. }));
        }
        assert_eq!(svc.list_stores().unwrap(), vec![store]);
        assert_eq!(svc.list_aisles(None).unwrap().len(), 1);
    }

    #[test]
    fn deleting_aisle_unfiles_items() {
        let svc = InventoryService::in_memory();
        let store = svc.create_store("Costco").unwrap();
        let aisle = svc
            .create_aisle(NewAisle {
                name: "B1".into(),
                store_id: store.id,
            })
            .unwrap();
        let coffee = svc
            .create_item(
                NewItem {
                    aisle_id: Some(aisle.id),
                    ..NewItem::named("Coffee")
                },
                None,
            )
            .unwrap();
        assert_eq!(coffee.store.as_ref().map(|s| s.id), Some(store.id));

        svc.delete_aisle(aisle.id).unwrap();
        let detail = svc.get_item(coffee.item.id).unwrap();
        assert_eq!(detail.item.aisle_id, None);
        assert!(svc.by_store(store.id).unwrap().is_empty());
        svc.delete_store(store.id).unwrap();
    }

    #[test]
    fn empty_item_name_persists_nothing() {
        let svc = InventoryService::in_memory();
        let err = domain(
            svc.create_item(NewItem::named("  "), Some(&[PlacementRequest::new("Pantry", 1)]))
                .unwrap_err(),
        );
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "name"));
        assert!(svc.list_items().unwrap().is_empty());
        assert!(svc.list_locations().unwrap().is_empty());
    }

    #[test]
    fn item_with_unknown_aisle_is_rejected() {
        let svc = InventoryService::in_memory();
        let err = domain(
            svc.create_item(
                NewItem {
                    aisle_id: Some(AisleId::new(5)),
                    ..NewItem::named("Tea")
                },
                None,
            )
            .unwrap_err(),
        );
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "aisle_id"));
    }

    #[test]
    fn update_item_clears_fields_and_replaces_placements() {
        let svc = InventoryService::in_memory();
        let jam = svc
            .create_item(
                NewItem {
                    notes: Some("strawberry".into()),
                    ..NewItem::named("Jam")
                },
                Some(&[PlacementRequest::new("Pantry", 1)]),
            )
            .unwrap();

        let patch = ItemPatch {
            name: Some("Jelly".into()),
            notes: Some(None),
            ..ItemPatch::default()
        };
        let detail = svc
            .update_item(jam.item.id, patch, Some(&[PlacementRequest::new("Fridge", 2)]))
            .unwrap();
        assert_eq!(detail.item.name, "Jelly");
        assert_eq!(detail.item.notes, None);
        assert_eq!(placements(&svc, jam.item.id), vec![("Fridge".to_string(), 2)]);
    }

    #[test]
    fn quantities_never_go_negative() {
        let svc = InventoryService::in_memory();
        let item = svc.create_item(NewItem::named("Salt"), None).unwrap().item.id;
        let pantry = svc.create_location("Pantry").unwrap().value.id;

        let record = svc.add_stock(item, pantry, -3).unwrap();
        assert!(record.created);
        assert_eq!(record.value.quantity, 0);

        let down = svc.adjust_record_quantity(record.value.id, -1).unwrap();
        assert_eq!(down.quantity, 0);
        let set = svc.update_record_quantity(record.value.id, -10).unwrap();
        assert_eq!(set.quantity, 0);
        let up = svc.adjust_record_quantity(record.value.id, 4).unwrap();
        assert_eq!(up.quantity, 4);
    }

    #[test]
    fn add_stock_merges_into_existing_record() {
        let svc = InventoryService::in_memory();
        let item = svc.create_item(NewItem::named("Beans"), None).unwrap().item.id;
        let pantry = svc.create_location("Pantry").unwrap().value.id;

        let first = svc.add_stock(item, pantry, 2).unwrap();
        let merged = svc.add_stock(item, pantry, 3).unwrap();
        assert!(!merged.created);
        assert_eq!(merged.value.id, first.value.id);
        assert_eq!(merged.value.quantity, 5);

        let err = domain(svc.add_stock(item, LocationId::new(99), 1).unwrap_err());
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "location_id"));
    }

    #[test]
    fn delete_record_leaves_item_and_location() {
        let svc = InventoryService::in_memory();
        let item = svc.create_item(NewItem::named("Flour"), None).unwrap().item.id;
        let pantry = svc.create_location("Pantry").unwrap().value.id;
        let record = svc.add_stock(item, pantry, 1).unwrap().value;

        svc.delete_record(record.id).unwrap();
        assert!(svc.records_for_item(item).unwrap().is_empty());
        assert_eq!(svc.list_items().unwrap().len(), 1);
        assert_eq!(svc.list_locations().unwrap().len(), 1);
        assert!(matches!(
            domain(svc.delete_record(record.id).unwrap_err()),
            DomainError::NotFound { .. }
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            CreateStore(u8),
            CreateAisle(u8, u8),
            CreateItem(u8, Option<u8>),
            SavePlacements(u8, Vec<(u8, i64)>),
            Adjust(u8, i64),
            DeleteStore(u8),
            DeleteAisle(u8),
            DeleteLocation(u8),
            DeleteItem(u8),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u8..4).prop_map(Op::CreateStore),
                (0u8..6, 0u8..4).prop_map(|(a, s)| Op::CreateAisle(a, s)),
                (0u8..8, proptest::option::of(0u8..6)).prop_map(|(i, a)| Op::CreateItem(i, a)),
                (0u8..8, proptest::collection::vec((0u8..4, -3i64..10), 0..4))
                    .prop_map(|(i, p)| Op::SavePlacements(i, p)),
                (0u8..12, -5i64..5).prop_map(|(r, d)| Op::Adjust(r, d)),
                (0u8..4).prop_map(Op::DeleteStore),
                (0u8..6).prop_map(Op::DeleteAisle),
                (0u8..4).prop_map(Op::DeleteLocation),
                (0u8..8).prop_map(Op::DeleteItem),
            ]
        }

        const LOCATIONS: [&str; 4] = ["Pantry", "pantry", "Freezer", "Garage"];

        fn apply(svc: &InventoryService, op: Op) {
            // Domain failures are expected; only integrity matters here.
            let _ = match op {
                Op::CreateStore(n) => svc.create_store(&format!("Store {n}")).map(drop),
                Op::CreateAisle(n, s) => svc
                    .create_aisle(NewAisle {
                        name: format!("Aisle {n}"),
                        store_id: StoreId::new(u64::from(s) + 1),
                    })
                    .map(drop),
                Op::CreateItem(n, aisle) => svc
                    .create_item(
                        NewItem {
                            aisle_id: aisle.map(|a| AisleId::new(u64::from(a) + 1)),
                            ..NewItem::named(format!("Item {n}"))
                        },
                        None,
                    )
                    .map(drop),
                Op::SavePlacements(i, list) => {
                    let requests: Vec<PlacementRequest> = list
                        .into_iter()
                        .map(|(l, q)| PlacementRequest::new(LOCATIONS[usize::from(l)], q))
                        .collect();
                    svc.save_item_placements(ItemId::new(u64::from(i) + 1), &requests)
                        .map(drop)
                }
                Op::Adjust(r, d) => svc
                    .adjust_record_quantity(RecordId::new(u64::from(r) + 1), d)
                    .map(drop),
                Op::DeleteStore(s) => svc.delete_store(StoreId::new(u64::from(s) + 1)).map(drop),
                Op::DeleteAisle(a) => svc.delete_aisle(AisleId::new(u64::from(a) + 1)).map(drop),
                Op::DeleteLocation(l) => svc
                    .delete_location(LocationId::new(u64::from(l) + 1))
                    .map(drop),
                Op::DeleteItem(i) => svc.delete_item(ItemId::new(u64::from(i) + 1)).map(drop),
            };
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: no sequence of operations leaves a dangling reference or duplicate.
            #[test]
            fn random_operations_preserve_integrity(ops in proptest::collection::vec(op(), 1..40)) {
                let svc = InventoryService::in_memory();
                for op in ops {
                    apply(&svc, op);
                    let violations = svc.entity_store().read(audit).unwrap();
                    prop_assert!(violations.is_empty(), "violations: {:?}", violations);
                }
            }

            /// Property: the total low_stock uses equals the sum over records_for_item.
            #[test]
            fn totals_agree_across_views(ops in proptest::collection::vec(op(), 1..40)) {
                let svc = InventoryService::in_memory();
                for op in ops {
                    apply(&svc, op);
                }
                for entry in svc.low_stock(u64::MAX).unwrap() {
                    let sum: u64 = svc
                        .records_for_item(entry.item.id)
                        .unwrap()
                        .iter()
                        .map(|p| p.quantity)
                        .sum();
                    prop_assert_eq!(sum, entry.total);
                }
            }
        }
    }
}
