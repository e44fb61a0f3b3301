//! Domain error model.

use thiserror::Error;

use crate::entity::EntityKind;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is local to one operation and recoverable by the caller:
/// fix the input, refresh the view, or resolve the blocking dependents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing/empty or references something that does not exist.
    #[error("validation failed on `{field}`: {message}")]
    Validation { field: String, message: String },

    /// The operation targeted an unknown id.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: u64 },

    /// The operation is blocked by another record (dependents, duplicate unique name).
    #[error("conflict with {entity} {id}: {message}")]
    Conflict {
        entity: EntityKind,
        id: u64,
        message: String,
    },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: EntityKind, id: impl Into<u64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn conflict(entity: EntityKind, id: impl Into<u64>, message: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            id: id.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code, used by transports.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "validation_error",
            DomainError::NotFound { .. } => "not_found",
            DomainError::Conflict { .. } => "conflict",
        }
    }
}
