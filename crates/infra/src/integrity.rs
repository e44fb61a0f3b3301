//! Referential integrity: deletes with their dependents, and a consistency audit.
//!
//! Deletes consult [`Relation::policy`] for every relation in which the deleted
//! kind is the referenced side. They run inside an entity-store transaction,
//! so a refused delete (policy `Deny`) leaves everything untouched.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use homestock_core::{
    AisleId, DomainError, DomainResult, EntityKind, ItemId, LocationId, NameKey, RecordId, StoreId,
    UniquelyNamed,
};
use homestock_inventory::{DeletePolicy, Relation};

use crate::entity_store::Tables;

/// Everything a delete removed or changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub entity: EntityKind,
    pub id: u64,
    pub removed_aisles: Vec<AisleId>,
    pub unfiled_items: Vec<ItemId>,
    pub removed_items: Vec<ItemId>,
    pub removed_records: Vec<RecordId>,
}

impl DeleteOutcome {
    fn new(entity: EntityKind, id: impl Into<u64>) -> Self {
        Self {
            entity,
            id: id.into(),
            removed_aisles: Vec::new(),
            unfiled_items: Vec::new(),
            removed_items: Vec::new(),
            removed_records: Vec::new(),
        }
    }

    fn absorb(&mut self, nested: DeleteOutcome) {
        match nested.entity {
            EntityKind::Aisle => self.removed_aisles.push(AisleId::new(nested.id)),
            EntityKind::Item => self.removed_items.push(ItemId::new(nested.id)),
            _ => {}
        }
        self.removed_aisles.extend(nested.removed_aisles);
        self.unfiled_items.extend(nested.unfiled_items);
        self.removed_items.extend(nested.removed_items);
        self.removed_records.extend(nested.removed_records);
    }
}

fn blocked(relation: Relation, parent_id: u64, dependents: &[u64]) -> DomainError {
    let ids: Vec<String> = dependents.iter().map(ToString::to_string).collect();
    DomainError::conflict(
        relation.parent(),
        parent_id,
        format!(
            "{} is referenced by {} {}(s): {}",
            relation.parent(),
            dependents.len(),
            relation.dependent(),
            ids.join(", ")
        ),
    )
}

/// Delete a store. Aisles cannot outlive their store, so any policy other
/// than `Deny` removes them.
pub(crate) fn delete_store(tables: &mut Tables, id: StoreId) -> DomainResult<DeleteOutcome> {
    tables.store(id)?;
    let mut outcome = DeleteOutcome::new(EntityKind::Store, id);

    let aisles: Vec<AisleId> = tables.aisles_of_store(id).map(|a| a.id).collect();
    if !aisles.is_empty() {
        match Relation::StoreAisles.policy() {
            DeletePolicy::Deny => {
                let raw: Vec<u64> = aisles.iter().map(|a| a.get()).collect();
                return Err(blocked(Relation::StoreAisles, id.get(), &raw));
            }
            DeletePolicy::Nullify | DeletePolicy::Cascade => {
                for aisle_id in aisles {
                    let nested = delete_aisle(tables, aisle_id)?;
                    outcome.absorb(nested);
                }
            }
        }
    }

    tables.remove_store(id);
    tracing::debug!(store_id = %id, aisles = outcome.removed_aisles.len(), "store deleted");
    Ok(outcome)
}

pub(crate) fn delete_aisle(tables: &mut Tables, id: AisleId) -> DomainResult<DeleteOutcome> {
    tables.aisle(id)?;
    let mut outcome = DeleteOutcome::new(EntityKind::Aisle, id);

    let items: Vec<ItemId> = tables.items_in_aisle(id).map(|i| i.id).collect();
    if !items.is_empty() {
        match Relation::AisleItems.policy() {
            DeletePolicy::Deny => {
                let raw: Vec<u64> = items.iter().map(|i| i.get()).collect();
                return Err(blocked(Relation::AisleItems, id.get(), &raw));
            }
            DeletePolicy::Nullify => {
                for item_id in items {
                    tables.unfile_item(item_id);
                    outcome.unfiled_items.push(item_id);
                }
            }
            DeletePolicy::Cascade => {
                for item_id in items {
                    let nested = delete_item(tables, item_id)?;
                    outcome.absorb(nested);
                }
            }
        }
    }

    tables.remove_aisle(id);
    tracing::debug!(
        aisle_id = %id,
        unfiled = outcome.unfiled_items.len(),
        removed_items = outcome.removed_items.len(),
        "aisle deleted"
    );
    Ok(outcome)
}

/// Apply a record relation's policy to `records`. Records always need both
/// their item and location, so `Nullify` behaves as `Cascade`.
fn drop_records(
    tables: &mut Tables,
    relation: Relation,
    parent_id: u64,
    records: Vec<RecordId>,
    outcome: &mut DeleteOutcome,
) -> DomainResult<()> {
    if records.is_empty() {
        return Ok(());
    }
    match relation.policy() {
        DeletePolicy::Deny => {
            let raw: Vec<u64> = records.iter().map(|r| r.get()).collect();
            Err(blocked(relation, parent_id, &raw))
        }
        DeletePolicy::Nullify | DeletePolicy::Cascade => {
            for record_id in records {
                tables.remove_record(record_id);
                outcome.removed_records.push(record_id);
            }
            Ok(())
        }
    }
}

pub(crate) fn delete_location(tables: &mut Tables, id: LocationId) -> DomainResult<DeleteOutcome> {
    tables.location(id)?;
    let mut outcome = DeleteOutcome::new(EntityKind::Location, id);

    let records: Vec<RecordId> = tables.records_at_location(id).map(|r| r.id).collect();
    drop_records(tables, Relation::LocationRecords, id.get(), records, &mut outcome)?;

    tables.remove_location(id);
    tracing::debug!(location_id = %id, records = outcome.removed_records.len(), "location deleted");
    Ok(outcome)
}

pub(crate) fn delete_item(tables: &mut Tables, id: ItemId) -> DomainResult<DeleteOutcome> {
    tables.item(id)?;
    let mut outcome = DeleteOutcome::new(EntityKind::Item, id);

    let records: Vec<RecordId> = tables.records_of_item(id).map(|r| r.id).collect();
    drop_records(tables, Relation::ItemRecords, id.get(), records, &mut outcome)?;

    tables.remove_item(id);
    tracing::debug!(item_id = %id, records = outcome.removed_records.len(), "item deleted");
    Ok(outcome)
}

pub(crate) fn delete_record(tables: &mut Tables, id: RecordId) -> DomainResult<DeleteOutcome> {
    tables.record(id)?;
    tables.remove_record(id);
    Ok(DeleteOutcome::new(EntityKind::InventoryRecord, id))
}

/// A broken cross-entity rule found by [`audit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{entity} {id}: `{field}` references missing {target} {target_id}")]
    DanglingReference {
        entity: EntityKind,
        id: u64,
        field: &'static str,
        target: EntityKind,
        target_id: u64,
    },

    #[error("item {item_id} has more than one record at location {location_id}")]
    DuplicatePlacement { item_id: ItemId, location_id: LocationId },

    #[error("more than one {entity} is named `{name}`")]
    DuplicateName { entity: EntityKind, name: NameKey },
}

fn dangling(
    entity: EntityKind,
    id: impl Into<u64>,
    field: &'static str,
    target: EntityKind,
    target_id: impl Into<u64>,
) -> Violation {
    Violation::DanglingReference {
        entity,
        id: id.into(),
        field,
        target,
        target_id: target_id.into(),
    }
}

fn duplicate_names<'a, E: UniquelyNamed + 'a>(
    records: impl Iterator<Item = &'a E>,
    out: &mut Vec<Violation>,
) {
    let entity = E::KIND;
    let mut seen: HashMap<NameKey, usize> = HashMap::new();
    for record in records {
        *seen.entry(record.key()).or_default() += 1;
    }
    let mut dups: Vec<NameKey> = seen.into_iter().filter(|(_, n)| *n > 1).map(|(k, _)| k).collect();
    dups.sort();
    out.extend(dups.into_iter().map(|name| Violation::DuplicateName { entity, name }));
}

/// Check every cross-entity invariant. Empty result means consistent.
pub fn audit(tables: &Tables) -> Vec<Violation> {
    let mut out = Vec::new();

    for aisle in tables.aisles() {
        if tables.get_store(aisle.store_id).is_none() {
            out.push(dangling(EntityKind::Aisle, aisle.id, "store_id", EntityKind::Store, aisle.store_id));
        }
    }

    for item in tables.items() {
        if let Some(aisle_id) = item.aisle_id {
            if tables.get_aisle(aisle_id).is_none() {
                out.push(dangling(EntityKind::Item, item.id, "aisle_id", EntityKind::Aisle, aisle_id));
            }
        }
    }

    let mut pairs: HashMap<(ItemId, LocationId), usize> = HashMap::new();
    for record in tables.records() {
        if tables.get_item(record.item_id).is_none() {
            out.push(dangling(
                EntityKind::InventoryRecord,
                record.id,
                "item_id",
                EntityKind::Item,
                record.item_id,
            ));
        }
        if tables.get_location(record.location_id).is_none() {
            out.push(dangling(
                EntityKind::InventoryRecord,
                record.id,
                "location_id",
                EntityKind::Location,
                record.location_id,
            ));
        }
        *pairs.entry((record.item_id, record.location_id)).or_default() += 1;
    }
    let mut dup_pairs: Vec<(ItemId, LocationId)> =
        pairs.into_iter().filter(|(_, n)| *n > 1).map(|(p, _)| p).collect();
    dup_pairs.sort();
    out.extend(
        dup_pairs
            .into_iter()
            .map(|(item_id, location_id)| Violation::DuplicatePlacement { item_id, location_id }),
    );

    duplicate_names(tables.stores(), &mut out);
    duplicate_names(tables.locations(), &mut out);
    duplicate_names(tables.items(), &mut out);

    out
}
