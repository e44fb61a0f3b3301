//! Read-only views over the entity store.
//!
//! Every view is computed from the tables at call time and returned as owned
//! data; nothing is cached across mutations.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use homestock_core::{DomainResult, ItemId, LocationId, RecordId, StoreId};
use homestock_inventory::{Aisle, InventoryRecord, Item, Store};

use crate::entity_store::Tables;

/// A record at a location, joined with its item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationStock {
    pub record: InventoryRecord,
    pub item: Item,
}

/// One of an item's locations with its quantity there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemPlacement {
    pub record_id: RecordId,
    pub location_id: LocationId,
    pub location_name: String,
    pub quantity: u64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockEntry {
    pub item: Item,
    pub total: u64,
}

/// An item with everything the editor shows for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDetail {
    pub item: Item,
    pub aisle: Option<Aisle>,
    pub store: Option<Store>,
    pub locations: Vec<ItemPlacement>,
    pub total: u64,
}

/// One line of a shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingListEntry {
    pub item_id: ItemId,
    pub name: String,
    pub on_hand: u64,
    pub aisle: Option<String>,
    pub store_id: Option<StoreId>,
    pub store: Option<String>,
}

fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Query engine over a borrowed view of the tables.
#[derive(Debug, Clone, Copy)]
pub struct Queries<'a> {
    tables: &'a Tables,
}

impl<'a> Queries<'a> {
    pub fn new(tables: &'a Tables) -> Self {
        Self { tables }
    }

    /// Records at one location with their items, by item name. Unknown location: empty.
    pub fn records_at_location(&self, location_id: LocationId) -> Vec<LocationStock> {
        let mut rows: Vec<LocationStock> = self
            .tables
            .records_at_location(location_id)
            .filter_map(|record| {
                self.tables.get_item(record.item_id).map(|item| LocationStock {
                    record: record.clone(),
                    item: item.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| by_name(&a.item.name, &b.item.name).then(a.record.id.cmp(&b.record.id)));
        rows
    }

    /// An item's records across locations, by location name. Unknown item: empty.
    pub fn records_for_item(&self, item_id: ItemId) -> Vec<ItemPlacement> {
        let mut rows: Vec<ItemPlacement> = self
            .tables
            .records_of_item(item_id)
            .filter_map(|record| {
                self.tables
                    .get_location(record.location_id)
                    .map(|location| ItemPlacement {
                        record_id: record.id,
                        location_id: location.id,
                        location_name: location.name.clone(),
                        quantity: record.quantity,
                        updated_at: record.updated_at,
                    })
            })
            .collect();
        rows.sort_by(|a, b| by_name(&a.location_name, &b.location_name).then(a.record_id.cmp(&b.record_id)));
        rows
    }

    /// Sum of the item's quantities over all its locations.
    pub fn total_quantity(&self, item_id: ItemId) -> u64 {
        self.tables.total_quantity(item_id)
    }

    /// Total quantity per item, in one pass over the records. Items without
    /// records are absent.
    pub fn stock_totals(&self) -> HashMap<ItemId, u64> {
        let mut totals: HashMap<ItemId, u64> = HashMap::new();
        for record in self.tables.records() {
            let total = totals.entry(record.item_id).or_default();
            *total = total.saturating_add(record.quantity);
        }
        totals
    }

    /// Items whose total quantity is strictly below `threshold`, by id.
    pub fn low_stock(&self, threshold: u64) -> Vec<LowStockEntry> {
        let totals = self.stock_totals();
        self.tables
            .items()
            .filter_map(|item| {
                let total = totals.get(&item.id).copied().unwrap_or(0);
                (total < threshold).then(|| LowStockEntry {
                    item: item.clone(),
                    total,
                })
            })
            .collect()
    }

    /// The store an item is filed under, through its aisle.
    fn store_of(&self, item: &Item) -> Option<(&'a Aisle, &'a Store)> {
        let aisle = self.tables.get_aisle(item.aisle_id?)?;
        let store = self.tables.get_store(aisle.store_id)?;
        Some((aisle, store))
    }

    /// Items filed under an aisle of `store_id`, by id. Unknown store: empty.
    pub fn by_store(&self, store_id: StoreId) -> Vec<Item> {
        self.tables
            .items()
            .filter(|item| {
                self.store_of(item)
                    .is_some_and(|(_, store)| store.id == store_id)
            })
            .cloned()
            .collect()
    }

    pub fn item_detail(&self, item_id: ItemId) -> DomainResult<ItemDetail> {
        let item = self.tables.item(item_id)?;
        let filed = self.store_of(item);
        Ok(ItemDetail {
            item: item.clone(),
            aisle: filed.map(|(aisle, _)| aisle.clone()),
            store: filed.map(|(_, store)| store.clone()),
            locations: self.records_for_item(item_id),
            total: self.total_quantity(item_id),
        })
    }

    /// Low-stock items with where to buy them, grouped by store then aisle.
    /// Unfiled items come last and are dropped when filtering by store.
    pub fn shopping_list(&self, threshold: u64, store_id: Option<StoreId>) -> Vec<ShoppingListEntry> {
        let mut entries: Vec<ShoppingListEntry> = self
            .low_stock(threshold)
            .into_iter()
            .filter_map(|entry| {
                let filed = self.store_of(&entry.item);
                if let Some(wanted) = store_id {
                    if filed.map(|(_, s)| s.id) != Some(wanted) {
                        return None;
                    }
                }
                Some(ShoppingListEntry {
                    item_id: entry.item.id,
                    name: entry.item.name,
                    on_hand: entry.total,
                    aisle: filed.map(|(a, _)| a.name.clone()),
                    store_id: filed.map(|(_, s)| s.id),
                    store: filed.map(|(_, s)| s.name.clone()),
                })
            })
            .collect();

        let shelf = |e: &ShoppingListEntry| {
            (
                e.store.is_none(),
                e.store.as_deref().map(str::to_lowercase),
                e.aisle.as_deref().map(str::to_lowercase),
            )
        };
        entries.sort_by(|a, b| {
            shelf(a)
                .cmp(&shelf(b))
                .then_with(|| by_name(&a.name, &b.name))
        });
        entries
    }

    /// Items whose name contains `text`, ignoring case, by id.
    pub fn search_items(&self, text: &str) -> Vec<Item> {
        let needle = text.trim().to_lowercase();
        self.tables
            .items()
            .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestock_inventory::{NewAisle, NewItem};

    fn seeded() -> (Tables, Vec<ItemId>, Vec<LocationId>, Vec<StoreId>) {
        let mut t = Tables::new();
        let costco = t.insert_store("Costco").unwrap().id;
        let walmart = t.insert_store("Walmart").unwrap().id;
        let b1 = t
            .insert_aisle(NewAisle {
                name: "B1".into(),
                store_id: costco,
            })
            .unwrap()
            .id;
        let a3 = t
            .insert_aisle(NewAisle {
                name: "A3".into(),
                store_id: walmart,
            })
            .unwrap()
            .id;

        let coffee = t
            .insert_item(NewItem {
                aisle_id: Some(b1),
                ..NewItem::named("Coffee")
            })
            .unwrap()
            .id;
        let soup = t
            .insert_item(NewItem {
                aisle_id: Some(a3),
                ..NewItem::named("Soup")
            })
            .unwrap()
            .id;
        let shampoo = t.insert_item(NewItem::named("Shampoo")).unwrap().id;

        let pantry = t.insert_location("Pantry").unwrap().id;
        let bathroom = t.insert_location("Bathroom").unwrap().id;
        let now = Utc::now();
        t.insert_record(coffee, pantry, 1, now).unwrap();
        t.insert_record(coffee, bathroom, 1, now).unwrap();
        t.insert_record(soup, pantry, 5, now).unwrap();

        (t, vec![coffee, soup, shampoo], vec![pantry, bathroom], vec![costco, walmart])
    }

    #[test]
    fn low_stock_uses_total_across_locations() {
        let (t, items, _, _) = seeded();
        let q = Queries::new(&t);

        // Coffee: 1 + 1 = 2, Soup: 5, Shampoo: 0.
        let low: Vec<ItemId> = q.low_stock(2).into_iter().map(|e| e.item.id).collect();
        assert_eq!(low, vec![items[2]]);

        let low: Vec<(ItemId, u64)> = q.low_stock(3).into_iter().map(|e| (e.item.id, e.total)).collect();
        assert_eq!(low, vec![(items[0], 2), (items[2], 0)]);
    }

    #[test]
    fn records_for_item_sum_matches_low_stock_total() {
        let (t, items, _, _) = seeded();
        let q = Queries::new(&t);
        for item in items {
            let sum: u64 = q.records_for_item(item).iter().map(|p| p.quantity).sum();
            assert_eq!(sum, q.total_quantity(item));
        }
    }

    #[test]
    fn stock_totals_agree_with_per_item_totals() {
        let (t, items, _, _) = seeded();
        let q = Queries::new(&t);
        let totals = q.stock_totals();
        assert_eq!(totals.get(&items[0]), Some(&2));
        assert_eq!(totals.get(&items[1]), Some(&5));
        assert_eq!(totals.get(&items[2]), None);
        for item in items {
            assert_eq!(totals.get(&item).copied().unwrap_or(0), q.total_quantity(item));
        }
    }

    #[test]
    fn records_at_location_are_joined_and_sorted_by_item_name() {
        let (t, items, locations, _) = seeded();
        let q = Queries::new(&t);
        let names: Vec<String> = q
            .records_at_location(locations[0])
            .into_iter()
            .map(|row| row.item.name)
            .collect();
        assert_eq!(names, vec!["Coffee", "Soup"]);
        assert!(q.records_at_location(LocationId::new(77)).is_empty());
        assert!(q.records_for_item(items[2]).is_empty());
    }

    #[test]
    fn by_store_follows_aisle_to_store() {
        let (t, items, _, stores) = seeded();
        let q = Queries::new(&t);
        let costco: Vec<ItemId> = q.by_store(stores[0]).into_iter().map(|i| i.id).collect();
        assert_eq!(costco, vec![items[0]]);
        assert!(q.by_store(StoreId::new(42)).is_empty());
    }

    #[test]
    fn item_detail_includes_filing_and_locations() {
        let (t, items, _, _) = seeded();
        let detail = Queries::new(&t).item_detail(items[0]).unwrap();
        assert_eq!(detail.store.map(|s| s.name), Some("Costco".to_string()));
        assert_eq!(detail.aisle.map(|a| a.name), Some("B1".to_string()));
        let locs: Vec<&str> = detail.locations.iter().map(|p| p.location_name.as_str()).collect();
        assert_eq!(locs, vec!["Bathroom", "Pantry"]);
        assert_eq!(detail.total, 2);

        assert!(Queries::new(&t).item_detail(ItemId::new(99)).is_err());
    }

    #[test]
    fn shopping_list_groups_by_store_and_puts_unfiled_last() {
        let (t, _, _, stores) = seeded();
        let q = Queries::new(&t);

        let names: Vec<String> = q.shopping_list(10, None).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Coffee", "Soup", "Shampoo"]);

        let walmart: Vec<String> = q
            .shopping_list(10, Some(stores[1]))
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(walmart, vec!["Soup"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let (t, items, _, _) = seeded();
        let q = Queries::new(&t);
        let hits: Vec<ItemId> = q.search_items("OU").into_iter().map(|i| i.id).collect();
        assert_eq!(hits, vec![items[1]]);
        assert_eq!(q.search_items("  ").len(), 3);
    }
}
