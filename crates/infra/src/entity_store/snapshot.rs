//! Snapshot persistence for the entity store.
//!
//! The whole inventory is small, so it is persisted as one document that is
//! rewritten on every committed mutation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use homestock_inventory::{Aisle, InventoryRecord, Item, Location, Store};

use super::tables::Sequences;

/// Serializable image of every table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub sequences: Sequences,
    pub stores: Vec<Store>,
    pub aisles: Vec<Aisle>,
    pub locations: Vec<Location>,
    pub items: Vec<Item>,
    pub records: Vec<InventoryRecord>,
}

impl Snapshot {
    pub const CURRENT_VERSION: u32 = 1;
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("snapshot is inconsistent: {0}")]
    Integrity(String),

    /// A writer panicked while holding the in-memory snapshot.
    #[error("snapshot slot poisoned")]
    Poisoned,
}

/// Where committed state is written and read back from at start-up.
pub trait SnapshotStore: Send + Sync + core::fmt::Debug {
    /// Last saved snapshot, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError>;

    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError>;
}

impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        (**self).save(snapshot)
    }
}

/// Keeps the last snapshot in memory, so a store can be reopened from it.
#[derive(Debug, Default)]
pub struct InMemorySnapshots {
    inner: RwLock<Option<Snapshot>>,
}

impl InMemorySnapshots {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for InMemorySnapshots {
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        let slot = self.inner.read().map_err(|_| SnapshotError::Poisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let mut slot = self.inner.write().map_err(|_| SnapshotError::Poisoned)?;
        *slot = Some(snapshot.clone());
        Ok(())
    }
}

/// JSON document on disk.
///
/// Saves go to `<path>.tmp` first and are renamed over `path`, so a crash
/// mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshots {
    path: PathBuf,
}

impl JsonFileSnapshots {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SnapshotStore for JsonFileSnapshots {
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_slice(&bytes)?;
        tracing::info!(path = %self.path.display(), "loaded inventory snapshot");
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            serde_json::to_writer_pretty(&mut file, snapshot)?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot() -> Snapshot {
        Snapshot {
            version: Snapshot::CURRENT_VERSION,
            sequences: Sequences::default(),
            stores: vec![],
            aisles: vec![],
            locations: vec![],
            items: vec![],
            records: vec![],
        }
    }

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("homestock-{}", uuid::Uuid::now_v7()))
            .join("inventory.json")
    }

    #[test]
    fn missing_file_loads_as_none() {
        let snapshots = JsonFileSnapshots::new(scratch_path());
        assert!(snapshots.load().unwrap().is_none());
    }

    #[test]
    fn json_file_round_trip() {
        let path = scratch_path();
        let snapshots = JsonFileSnapshots::new(&path);
        let mut snapshot = empty_snapshot();
        snapshot.stores.push(Store {
            id: homestock_core::StoreId::new(1),
            name: "Costco".into(),
        });
        snapshot.sequences.store = 1;

        snapshots.save(&snapshot).unwrap();
        assert!(!snapshots.temp_path().exists());
        assert_eq!(snapshots.load().unwrap(), Some(snapshot));

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn corrupt_file_is_an_encoding_error() {
        let path = scratch_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{ not json").unwrap();

        let err = JsonFileSnapshots::new(&path).load().unwrap_err();
        assert!(matches!(err, SnapshotError::Encoding(_)));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn in_memory_keeps_last_save() {
        let snapshots = InMemorySnapshots::new();
        assert!(snapshots.load().unwrap().is_none());
        snapshots.save(&empty_snapshot()).unwrap();
        assert_eq!(snapshots.load().unwrap(), Some(empty_snapshot()));
    }

    #[test]
    fn in_memory_reports_poisoning() {
        let snapshots = Arc::new(InMemorySnapshots::new());
        let poisoner = snapshots.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("writer died");
        })
        .join();

        assert!(matches!(snapshots.load(), Err(SnapshotError::Poisoned)));
        assert!(matches!(
            snapshots.save(&empty_snapshot()),
            Err(SnapshotError::Poisoned)
        ));
    }
}
