//! In-memory store with staged writes

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::Value;

use super::{EntityStore, StoreError, Transaction};
use crate::core::identity::{EntityId, EntityKind};

/// A mutex-guarded map of record bodies.
///
/// A unit of work holds the lock for its whole duration and stages writes in
/// an overlay that is applied only on success.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<EntityId, Value>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed records
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether the store has no committed records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EntityStore for MemoryStore {
    fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Transaction) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut committed = self
            .records
            .lock()
            .map_err(|_| E::from(StoreError::Poisoned))?;

        let mut txn = MemoryTxn {
            committed: &committed,
            staged: BTreeMap::new(),
        };
        let out = f(&mut txn)?;
        let staged = txn.staged;

        for (id, body) in staged {
            match body {
                Some(body) => {
                    committed.insert(id, body);
                }
                None => {
                    committed.remove(&id);
                }
            }
        }

        Ok(out)
    }
}

struct MemoryTxn<'a> {
    committed: &'a BTreeMap<EntityId, Value>,
    /// `None` marks a staged removal
    staged: BTreeMap<EntityId, Option<Value>>,
}

impl Transaction for MemoryTxn<'_> {
    fn load(&mut self, id: &EntityId) -> Result<Option<Value>, StoreError> {
        Ok(match self.staged.get(id) {
            Some(staged) => staged.clone(),
            None => self.committed.get(id).cloned(),
        })
    }

    fn insert(&mut self, id: &EntityId, body: Value) -> Result<(), StoreError> {
        if self.load(id)?.is_some() {
            return Err(StoreError::Duplicate(id.clone()));
        }
        self.staged.insert(id.clone(), Some(body));
        Ok(())
    }

    fn save(&mut self, id: &EntityId, body: Value) -> Result<(), StoreError> {
        if self.load(id)?.is_none() {
            return Err(StoreError::not_found(id));
        }
        self.staged.insert(id.clone(), Some(body));
        Ok(())
    }

    fn remove(&mut self, id: &EntityId) -> Result<bool, StoreError> {
        let existed = self.load(id)?.is_some();
        if existed {
            self.staged.insert(id.clone(), None);
        }
        Ok(existed)
    }

    fn scan(&mut self, kind: EntityKind) -> Result<Vec<Value>, StoreError> {
        let mut view: BTreeMap<&EntityId, &Value> = self
            .committed
            .iter()
            .filter(|(id, _)| id.kind() == kind)
            .collect();

        for (id, staged) in self.staged.iter().filter(|(id, _)| id.kind() == kind) {
            match staged {
                Some(body) => {
                    view.insert(id, body);
                }
                None => {
                    view.remove(id);
                }
            }
        }

        Ok(view.into_values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::TransactionExt;
    use serde_json::json;

    fn body(id: &EntityId, extra: Value) -> Value {
        let mut body = json!({ "id": id.to_string() });
        if let (Some(map), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                map.insert(k.clone(), v.clone());
            }
        }
        body
    }

    #[test]
    fn test_commit_on_ok() {
        let store = MemoryStore::new();
        let id = EntityId::new(EntityKind::Material);

        store
            .transact(|tx| tx.insert(&id, body(&id, json!({"quantity": 5}))))
            .unwrap();

        assert_eq!(store.len(), 1);
        let loaded: Option<Value> = store.transact(|tx| tx.load(&id)).unwrap();
        assert_eq!(loaded.unwrap()["quantity"], 5);
    }

    #[test]
    fn test_rollback_on_err() {
        let store = MemoryStore::new();
        let id = EntityId::new(EntityKind::Material);

        let result: Result<(), StoreError> = store.transact(|tx| {
            tx.insert(&id, body(&id, json!({})))?;
            Err(StoreError::Corrupt {
                id: id.to_string(),
                message: "abort".into(),
            })
        });

        assert!(result.is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_staged_writes_visible_within_unit_of_work() {
        let store = MemoryStore::new();
        let a = EntityId::new(EntityKind::Widget);
        let b = EntityId::new(EntityKind::Widget);

        store
            .transact(|tx| tx.insert(&a, body(&a, json!({}))))
            .unwrap();

        let seen = store
            .transact(|tx| {
                tx.insert(&b, body(&b, json!({})))?;
                tx.remove(&a)?;
                tx.scan(EntityKind::Widget)
            })
            .unwrap();

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0]["id"], b.to_string());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let store = MemoryStore::new();
        let id = EntityId::new(EntityKind::Shipment);

        store
            .transact(|tx| tx.insert(&id, body(&id, json!({}))))
            .unwrap();
        let err = store
            .transact(|tx| tx.insert(&id, body(&id, json!({}))))
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[test]
    fn test_save_missing_is_not_found() {
        let store = MemoryStore::new();
        let id = EntityId::new(EntityKind::Shipment);
        let err = store
            .transact(|tx| tx.save(&id, body(&id, json!({}))))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_referencing_uses_staged_state() {
        let store = MemoryStore::new();
        let material = EntityId::new(EntityKind::Material);
        let req = EntityId::new(EntityKind::Requirement);

        let found = store
            .transact(|tx| {
                tx.insert(
                    &req,
                    body(&req, json!({ "material": material.to_string() })),
                )?;
                tx.referencing(
                    EntityKind::Requirement,
                    crate::core::store::RefField::Material,
                    &material,
                )
            })
            .unwrap();

        assert_eq!(found.len(), 1);
        assert!(store.transact(|tx| tx.exists(&req)).unwrap());
    }
}
