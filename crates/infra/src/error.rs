use thiserror::Error;

use homestock_core::DomainError;

use crate::entity_store::SnapshotError;

/// Failure of one entity-store operation. Nothing of the operation was applied.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Validation, not-found or conflict; the caller can correct and retry.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The snapshot could not be written (mutation discarded) or read (start-up).
    #[error("persistence failed: {0}")]
    Persistence(#[from] SnapshotError),

    /// A previous operation panicked while holding the store lock.
    #[error("entity store unavailable")]
    Unavailable,
}

impl StoreError {
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            StoreError::Domain(e) => Some(e),
            _ => None,
        }
    }
}
