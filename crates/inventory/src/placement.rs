//! Item placement lists: where an item is kept and how many.
//!
//! Saving a placement list replaces the item's records wholesale. This module
//! only cleans the incoming list; resolving names and writing records happens
//! against the store.

use serde::{Deserialize, Serialize};

use homestock_core::{DomainError, DomainResult, NameKey};

use crate::record::clamp_quantity;

/// One `{location_name, quantity}` entry as sent by the item editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub location_name: String,
    #[serde(default)]
    pub quantity: i64,
}

impl PlacementRequest {
    pub fn new(location_name: impl Into<String>, quantity: i64) -> Self {
        Self {
            location_name: location_name.into(),
            quantity,
        }
    }
}

/// A cleaned placement: trimmed name, lookup key, non-negative quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub key: NameKey,
    pub name: String,
    pub quantity: u64,
}

/// Validate and merge a placement list.
///
/// Names are trimmed and must be non-empty. Quantities are floored at zero.
/// Entries naming the same location (case-insensitively) collapse into one,
/// keeping the first spelling and summing quantities. Order of first
/// appearance is preserved.
pub fn normalize_placements(requests: &[PlacementRequest]) -> DomainResult<Vec<Placement>> {
    let mut out: Vec<Placement> = Vec::with_capacity(requests.len());

    for (i, req) in requests.iter().enumerate() {
        let name = req.location_name.trim();
        if name.is_empty() {
            return Err(DomainError::validation(
                format!("locations[{i}].location_name"),
                "cannot be empty",
            ));
        }

        let key = NameKey::new(name);
        let quantity = clamp_quantity(req.quantity);
        match out.iter_mut().find(|p| p.key == key) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => out.push(Placement {
                key,
                name: name.to_string(),
                quantity,
            }),
        }
    }

    Ok(out)
}
