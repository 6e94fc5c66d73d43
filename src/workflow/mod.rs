//! Workflow engine - status state machines and their notifications
//!
//! Each operation validates its input, then runs as one unit of work against
//! the [`EntityStore`]. Notifications produced inside the unit of work are
//! handed to the [`Dispatcher`] only after the store commits; a rejected
//! operation never notifies anyone.

mod error;
mod inspection;
mod installation;
mod material;
mod order;
mod records;
mod requirement;
mod shipment;
mod widget;

pub use error::WorkflowError;
pub use inspection::{FlagOutcome, InspectionRoute};
pub use material::DemandReportRequest;
pub use records::NotificationReceipt;

use crate::core::dispatch::{Dispatcher, Notice};
use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::store::{EntityStore, Transaction, TransactionExt};

pub type Result<T> = std::result::Result<T, WorkflowError>;

/// The workflow engine over a store and a notification dispatcher.
///
/// Holds no state of its own between calls.
pub struct Engine<S, D> {
    store: S,
    dispatcher: D,
}

impl<S: EntityStore, D: Dispatcher> Engine<S, D> {
    pub fn new(store: S, dispatcher: D) -> Self {
        Self { store, dispatcher }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Fetch a record of type `R`
    pub fn get<R: Entity>(&self, id: &EntityId) -> Result<R> {
        self.store.transact(|tx| Ok(tx.get::<R>(id)?))
    }

    /// All records of type `R`, oldest first
    pub fn list<R: Entity>(&self) -> Result<Vec<R>> {
        self.find(|_: &R| true)
    }

    /// Records of type `R` matching a predicate, oldest first
    pub fn find<R: Entity, P: Fn(&R) -> bool>(&self, predicate: P) -> Result<Vec<R>> {
        self.store.transact(|tx| Ok(tx.find::<R, _>(predicate)?))
    }

    /// Run `f` as one unit of work and dispatch its notices after commit
    fn unit_of_work<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Transaction, &mut Vec<Notice>) -> Result<T>,
    {
        let mut notices = Vec::new();
        match self.store.transact(|tx| f(tx, &mut notices)) {
            Ok(value) => {
                self.dispatch(notices);
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(op, code = err.code(), error = %err, "operation rejected");
                Err(err)
            }
        }
    }

    fn dispatch(&self, notices: Vec<Notice>) {
        for notice in notices {
            self.dispatcher.enqueue(notice.task, notice.payload);
        }
    }
}

/// Trimmed non-empty text or `InvalidInput`
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WorkflowError::invalid(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// A strictly positive quantity that fits a record's `u32` field
pub(crate) fn require_quantity(field: &'static str, value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(WorkflowError::invalid(
            field,
            format!("must be greater than zero, got {}", value),
        ));
    }
    u32::try_from(value)
        .map_err(|_| WorkflowError::invalid(field, format!("{} is too large", value)))
}

/// Load a referenced record, reporting a missing one as `NotFound`
pub(crate) fn resolve<R: Entity>(tx: &mut dyn Transaction, id: &EntityId) -> Result<R> {
    Ok(tx.get::<R>(id)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("location", "  Aisle 5 ").unwrap(), "Aisle 5");
        assert!(matches!(
            require_text("location", "   "),
            Err(WorkflowError::InvalidInput { field: "location", .. })
        ));
    }

    #[test]
    fn test_require_quantity_bounds() {
        assert_eq!(require_quantity("quantity", 1).unwrap(), 1);
        assert!(require_quantity("quantity", 0).is_err());
        assert!(require_quantity("quantity", -4).is_err());
        assert!(require_quantity("quantity", i64::from(u32::MAX) + 1).is_err());
    }
}
