//! Errors returned by workflow operations

use thiserror::Error;

use crate::core::identity::{EntityId, EntityKind};
use crate::core::store::StoreError;

/// Errors that can occur during workflow operations.
///
/// Every variant except `Store` is a local, non-retryable rejection: the
/// operation made no change.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("{} not found: {id}", kind.label())]
    NotFound { kind: EntityKind, id: String },

    #[error("insufficient quantity on {id}: requested {requested}, available {available}")]
    InsufficientQuantity {
        id: EntityId,
        requested: u32,
        available: u32,
    },

    #[error("inconsistent reference: {0}")]
    InconsistentReference(String),

    #[error("invalid status transition on {id}: {from} -> {to}")]
    InvalidTransition {
        id: EntityId,
        from: String,
        to: String,
    },

    #[error("store error: {0}")]
    Store(#[source] StoreError),
}

impl WorkflowError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        WorkflowError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Short machine-readable name of the variant
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::InvalidInput { .. } => "invalid_input",
            WorkflowError::NotFound { .. } => "not_found",
            WorkflowError::InsufficientQuantity { .. } => "insufficient_quantity",
            WorkflowError::InconsistentReference(_) => "inconsistent_reference",
            WorkflowError::InvalidTransition { .. } => "invalid_transition",
            WorkflowError::Store(_) => "store",
        }
    }
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => WorkflowError::NotFound { kind, id },
            other => WorkflowError::Store(other),
        }
    }
}
