//! Entity store - keyed repository of typed records
//!
//! Every workflow operation runs as one unit of work through
//! [`EntityStore::transact`]. Writes made inside the closure become visible
//! only if it returns `Ok`; an `Err` discards them.
//!
//! Backends implement the untyped [`Transaction`] trait over JSON bodies.
//! [`TransactionExt`] layers typed create/get/update/find/delete on top, and
//! deletion follows the per-relationship table in [`policy`].

mod memory;
pub mod policy;
pub(crate) mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use policy::{Dependency, OnDelete, RefField, DELETION_POLICY};
pub use sqlite::SqliteStore;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityKind};

/// Errors raised by store backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("record already exists: {0}")]
    Duplicate(EntityId),

    #[error("failed to encode or decode {kind} record: {source}")]
    Serde {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("corrupt record {id}: {message}")]
    Corrupt { id: String, message: String },

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store lock poisoned by a panicked writer")]
    Poisoned,

    #[error("database schema version {found} is not supported (expected {expected})")]
    SchemaVersion { found: i32, expected: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn not_found(id: &EntityId) -> Self {
        StoreError::NotFound {
            kind: id.kind(),
            id: id.to_string(),
        }
    }
}

/// A unit of work against a store backend.
///
/// Bodies are the JSON encoding of an [`Entity`]; reference fields are named
/// by [`RefField::as_str`].
pub trait Transaction {
    /// Load a record body, `None` if absent
    fn load(&mut self, id: &EntityId) -> Result<Option<Value>, StoreError>;

    /// Insert a new record; fails with `Duplicate` if the id exists
    fn insert(&mut self, id: &EntityId, body: Value) -> Result<(), StoreError>;

    /// Replace an existing record; fails with `NotFound` if absent
    fn save(&mut self, id: &EntityId, body: Value) -> Result<(), StoreError>;

    /// Remove a record, returning whether it existed
    fn remove(&mut self, id: &EntityId) -> Result<bool, StoreError>;

    /// All record bodies of a kind, oldest first
    fn scan(&mut self, kind: EntityKind) -> Result<Vec<Value>, StoreError>;

    /// Bodies of `kind` whose `field` points at `target`
    fn referencing(
        &mut self,
        kind: EntityKind,
        field: RefField,
        target: &EntityId,
    ) -> Result<Vec<Value>, StoreError> {
        let target = target.to_string();
        Ok(self
            .scan(kind)?
            .into_iter()
            .filter(|body| body.get(field.as_str()).and_then(Value::as_str) == Some(&target))
            .collect())
    }
}

/// A keyed repository of records with transactional units of work
pub trait EntityStore: Send + Sync {
    /// Run `f` as one unit of work, committing only if it returns `Ok`.
    ///
    /// Units of work are serialized against each other, so a
    /// read-modify-write inside `f` cannot interleave with another writer.
    fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Transaction) -> Result<T, E>,
        E: From<StoreError>;
}

/// Outcome of a policy-driven delete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteReport {
    /// Every record removed, the requested one first
    pub deleted: Vec<EntityId>,
    /// Records that survived with a reference cleared
    pub detached: Vec<EntityId>,
}

/// Typed record access on top of [`Transaction`]
pub trait TransactionExt: Transaction {
    /// Persist a new record
    fn create<R: Entity>(&mut self, record: &R) -> Result<(), StoreError> {
        let body = encode(record)?;
        self.insert(record.id(), body)
    }

    /// Fetch a record by id; an id of another kind does not resolve
    fn get<R: Entity>(&mut self, id: &EntityId) -> Result<R, StoreError> {
        if id.kind() != R::KIND {
            return Err(StoreError::NotFound {
                kind: R::KIND,
                id: id.to_string(),
            });
        }
        let body = self.load(id)?.ok_or_else(|| StoreError::not_found(id))?;
        decode(body)
    }

    /// Check that a record exists
    fn exists(&mut self, id: &EntityId) -> Result<bool, StoreError> {
        Ok(self.load(id)?.is_some())
    }

    /// Persist changes to an existing record
    fn update<R: Entity>(&mut self, record: &R) -> Result<(), StoreError> {
        let body = encode(record)?;
        self.save(record.id(), body)
    }

    /// All records of a kind matching a predicate
    fn find<R: Entity, P: Fn(&R) -> bool>(&mut self, predicate: P) -> Result<Vec<R>, StoreError> {
        let mut records = Vec::new();
        for body in self.scan(R::KIND)? {
            let record: R = decode(body)?;
            if predicate(&record) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Delete a record, cascading or detaching dependents per
    /// [`DELETION_POLICY`]
    fn delete(&mut self, id: &EntityId) -> Result<DeleteReport, StoreError> {
        if !self.remove(id)? {
            return Err(StoreError::not_found(id));
        }

        let mut report = DeleteReport {
            deleted: vec![id.clone()],
            detached: Vec::new(),
        };

        for dep in policy::dependents_of(id.kind()) {
            for mut body in self.referencing(dep.child, dep.field, id)? {
                let child_id = body_id(&body)?;
                match dep.on_delete {
                    OnDelete::Cascade => {
                        let nested = self.delete(&child_id)?;
                        report.deleted.extend(nested.deleted);
                        report.detached.extend(nested.detached);
                    }
                    OnDelete::Nullify => {
                        if let Some(map) = body.as_object_mut() {
                            map.insert(dep.field.as_str().to_string(), Value::Null);
                        }
                        self.save(&child_id, body)?;
                        if !report.detached.contains(&child_id) {
                            report.detached.push(child_id);
                        }
                    }
                }
            }
        }

        Ok(report)
    }
}

impl<T: Transaction + ?Sized> TransactionExt for T {}

fn encode<R: Entity>(record: &R) -> Result<Value, StoreError> {
    serde_json::to_value(record).map_err(|source| StoreError::Serde {
        kind: R::KIND,
        source,
    })
}

fn decode<R: Entity>(body: Value) -> Result<R, StoreError> {
    serde_json::from_value(body).map_err(|source| StoreError::Serde {
        kind: R::KIND,
        source,
    })
}

/// Extract the `id` field of a record body
pub(crate) fn body_id(body: &Value) -> Result<EntityId, StoreError> {
    let raw = body
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Corrupt {
            id: "<unknown>".to_string(),
            message: "record body has no id".to_string(),
        })?;
    raw.parse().map_err(|e: crate::core::identity::IdParseError| StoreError::Corrupt {
        id: raw.to_string(),
        message: e.to_string(),
    })
}

/// Extract a reference field of a record body as a string
pub(crate) fn body_ref(body: &Value, field: RefField) -> Option<String> {
    body.get(field.as_str())
        .and_then(Value::as_str)
        .map(str::to_string)
}
