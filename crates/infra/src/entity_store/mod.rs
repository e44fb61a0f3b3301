//! The single authoritative entity store.
//!
//! ## Transactions
//!
//! Every mutation runs against a working copy of the tables. The copy is
//! persisted and swapped in only when the whole operation succeeded, so a
//! failed operation (validation, conflict, cascade refusal, snapshot write)
//! leaves no trace, and readers never observe a half-applied cascade.
//!
//! ## Thread Safety
//!
//! One `RwLock` guards the tables: mutations hold the write lock for the whole
//! transaction; reads hold the read lock only while copying out their result.

pub mod snapshot;
pub mod tables;

use std::sync::RwLock;

use homestock_core::DomainResult;

pub use snapshot::{InMemorySnapshots, JsonFileSnapshots, Snapshot, SnapshotError, SnapshotStore};
pub use tables::{Sequences, Tables};

use crate::error::StoreError;

#[derive(Debug)]
pub struct EntityStore {
    tables: RwLock<Tables>,
    /// `None` keeps state in memory only; nothing is written per mutation.
    snapshots: Option<Box<dyn SnapshotStore>>,
}

impl EntityStore {
    /// Empty store without persistence.
    pub fn in_memory() -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
            snapshots: None,
        }
    }

    /// Open a store backed by `snapshots`, loading the last saved state if any.
    pub fn open(snapshots: impl SnapshotStore + 'static) -> Result<Self, StoreError> {
        let tables = match snapshots.load()? {
            Some(snapshot) => Tables::from_snapshot(snapshot)?,
            None => Tables::new(),
        };
        Ok(Self {
            tables: RwLock::new(tables),
            snapshots: Some(Box::new(snapshots)),
        })
    }

    /// Whether mutations write through to a snapshot store (and may block on I/O).
    pub fn is_persistent(&self) -> bool {
        self.snapshots.is_some()
    }

    /// Run a read-only projection over the current state.
    pub fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T, StoreError> {
        let guard = self.tables.read().map_err(|_| {
            tracing::error!("entity store lock poisoned (read)");
            StoreError::Unavailable
        })?;
        Ok(f(&guard))
    }

    /// Run `f` as one atomic mutation.
    pub fn transact<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> DomainResult<T>,
    ) -> Result<T, StoreError> {
        let mut guard = self.tables.write().map_err(|_| {
            tracing::error!("entity store lock poisoned (write)");
            StoreError::Unavailable
        })?;

        let mut working = guard.clone();
        let out = f(&mut working)?;

        if let Some(snapshots) = &self.snapshots {
            if let Err(e) = snapshots.save(&working.to_snapshot()) {
                tracing::error!(error = %e, "snapshot save failed; mutation discarded");
                return Err(e.into());
            }
        }

        *guard = working;
        Ok(out)
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
