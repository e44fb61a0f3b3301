//! Demo data for a fresh household.

use chrono::Utc;
use serde::Serialize;

use homestock_inventory::{NewAisle, NewItem};

use crate::error::StoreError;
use crate::service::InventoryService;

const LOCATIONS: [&str; 3] = ["Pantry", "Refrigerator", "Freezer"];

const STORE: &str = "Grocery Mart";

/// Aisle name and the items filed under it.
const AISLES: [(&str, &[&str]); 4] = [
    ("Dairy", &["Milk", "Eggs", "Butter", "Cheddar Cheese", "Yogurt"]),
    ("Produce", &["Apples", "Bananas", "Carrots", "Potatoes", "Onions", "Lettuce"]),
    ("Frozen", &["Ice Cream", "Frozen Pizza", "Frozen Vegetables"]),
    ("Dry Goods", &["Rice", "Pasta", "Cereal", "Peanut Butter", "Soup", "Crackers"]),
];

/// Unfiled items.
const EXTRA_ITEMS: [&str; 3] = ["Ketchup", "Mustard", "Mayonnaise"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub seeded: bool,
    pub locations: usize,
    pub items: usize,
    pub records: usize,
}

impl SeedReport {
    fn skipped() -> Self {
        Self {
            seeded: false,
            locations: 0,
            items: 0,
            records: 0,
        }
    }
}

/// Populate an empty store with demo locations, a store, aisles and stocked items.
///
/// Does nothing when the store already holds data. Item `i` goes to location
/// `i % 3` with quantity `i % 6`.
pub fn seed_demo_data(service: &InventoryService) -> Result<SeedReport, StoreError> {
    let now = Utc::now();
    let report = service.entity_store().transact(|t| {
        if !t.is_empty() {
            return Ok(SeedReport::skipped());
        }

        let mut locations = Vec::with_capacity(LOCATIONS.len());
        for name in LOCATIONS {
            locations.push(t.insert_location(name)?.id);
        }

        let store_id = t.insert_store(STORE)?.id;
        let mut items = Vec::new();
        for (aisle_name, names) in AISLES {
            let aisle_id = t
                .insert_aisle(NewAisle {
                    name: aisle_name.to_string(),
                    store_id,
                })?
                .id;
            for name in names {
                let item = t.insert_item(NewItem {
                    aisle_id: Some(aisle_id),
                    ..NewItem::named(*name)
                })?;
                items.push(item.id);
            }
        }
        for name in EXTRA_ITEMS {
            items.push(t.insert_item(NewItem::named(name))?.id);
        }

        for (i, item_id) in items.iter().enumerate() {
            let location_id = locations[i % locations.len()];
            t.insert_record(*item_id, location_id, (i % 6) as u64, now)?;
        }

        Ok(SeedReport {
            seeded: true,
            locations: locations.len(),
            items: items.len(),
            records: items.len(),
        })
    })?;

    if report.seeded {
        tracing::info!(items = report.items, locations = report.locations, "demo data seeded");
    } else {
        tracing::info!("demo seed skipped; store not empty");
    }
    Ok(report)
}
