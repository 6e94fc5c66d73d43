//! SQLite-backed entity store
//!
//! Records live in a single `records` table keyed by entity id. The JSON body
//! is the source of truth; `kind`, `created` and the reference columns are
//! extracted on write so scans and dependent lookups can use indexes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde_json::Value;

use super::policy::RefField;
use super::{body_ref, schema, EntityStore, StoreError, Transaction};
use crate::core::identity::{EntityId, EntityKind};

/// The durable store backed by SQLite
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open or create a store at `path`, creating parent directories
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        schema::configure(&conn)?;
        schema::init_records(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::init_records(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file location, if file-backed
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl EntityStore for SqliteStore {
    fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Transaction) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| E::from(StoreError::Poisoned))?;

        // IMMEDIATE takes the write lock up front so a read-modify-write
        // cannot race another process on the same file
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| E::from(StoreError::from(e)))?;

        let out = {
            let mut txn = SqliteTxn { conn: &tx };
            f(&mut txn)?
        };

        tx.commit().map_err(|e| E::from(StoreError::from(e)))?;
        Ok(out)
    }
}

struct SqliteTxn<'a> {
    conn: &'a Connection,
}

impl SqliteTxn<'_> {
    fn query_bodies(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Value>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, |row| row.get::<_, String>(0))?;

        let mut bodies = Vec::new();
        for row in rows {
            bodies.push(parse_body(&row?)?);
        }
        Ok(bodies)
    }
}

impl Transaction for SqliteTxn<'_> {
    fn load(&mut self, id: &EntityId) -> Result<Option<Value>, StoreError> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM records WHERE id = ?1",
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        body.map(|b| parse_body(&b)).transpose()
    }

    fn insert(&mut self, id: &EntityId, body: Value) -> Result<(), StoreError> {
        if self.load(id)?.is_some() {
            return Err(StoreError::Duplicate(id.clone()));
        }

        let created = body
            .get("created")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        self.conn.execute(
            "INSERT INTO records (id, kind, material_ref, widget_ref, created, body)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id.to_string(),
                id.kind().prefix(),
                body_ref(&body, RefField::Material),
                body_ref(&body, RefField::Widget),
                created,
                body.to_string(),
            ],
        )?;
        Ok(())
    }

    fn save(&mut self, id: &EntityId, body: Value) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE records SET material_ref = ?2, widget_ref = ?3, body = ?4 WHERE id = ?1",
            params![
                id.to_string(),
                body_ref(&body, RefField::Material),
                body_ref(&body, RefField::Widget),
                body.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::not_found(id));
        }
        Ok(())
    }

    fn remove(&mut self, id: &EntityId) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM records WHERE id = ?1", params![id.to_string()])?;
        Ok(changed > 0)
    }

    fn scan(&mut self, kind: EntityKind) -> Result<Vec<Value>, StoreError> {
        self.query_bodies(
            "SELECT body FROM records WHERE kind = ?1 ORDER BY created, id",
            &[&kind.prefix()],
        )
    }

    fn referencing(
        &mut self,
        kind: EntityKind,
        field: RefField,
        target: &EntityId,
    ) -> Result<Vec<Value>, StoreError> {
        let sql = format!(
            "SELECT body FROM records WHERE kind = ?1 AND {} = ?2 ORDER BY created, id",
            field.column()
        );
        self.query_bodies(&sql, &[&kind.prefix(), &target.to_string()])
    }
}

fn parse_body(raw: &str) -> Result<Value, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::Corrupt {
        id: "<unparsed>".to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::TransactionExt;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(id: &EntityId, material: Option<&EntityId>) -> Value {
        json!({
            "id": id.to_string(),
            "material": material.map(|m| m.to_string()),
            "created": chrono::Utc::now().to_rfc3339(),
        })
    }

    #[test]
    fn test_open_creates_database_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/mtrack.db");

        let store = SqliteStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), Some(path.as_path()));
    }

    #[test]
    fn test_records_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mtrack.db");
        let id = EntityId::new(EntityKind::Material);

        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .transact(|tx| tx.insert(&id, record(&id, None)))
                .unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert!(store.transact(|tx| tx.exists(&id)).unwrap());
    }

    #[test]
    fn test_rollback_on_err() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = EntityId::new(EntityKind::Material);

        let result: Result<(), StoreError> = store.transact(|tx| {
            tx.insert(&id, record(&id, None))?;
            Err(StoreError::Poisoned)
        });
        assert!(result.is_err());

        assert!(!store.transact(|tx| tx.exists(&id)).unwrap());
    }

    #[test]
    fn test_referencing_uses_index_columns() {
        let store = SqliteStore::open_in_memory().unwrap();
        let material = EntityId::new(EntityKind::Material);
        let other = EntityId::new(EntityKind::Material);
        let linked = EntityId::new(EntityKind::Requirement);
        let unlinked = EntityId::new(EntityKind::Requirement);

        store
            .transact(|tx| {
                tx.insert(&linked, record(&linked, Some(&material)))?;
                tx.insert(&unlinked, record(&unlinked, Some(&other)))
            })
            .unwrap();

        let found = store
            .transact(|tx| tx.referencing(EntityKind::Requirement, RefField::Material, &material))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["id"], linked.to_string());
    }

    #[test]
    fn test_save_refreshes_reference_columns() {
        let store = SqliteStore::open_in_memory().unwrap();
        let material = EntityId::new(EntityKind::Material);
        let req = EntityId::new(EntityKind::Requirement);

        store
            .transact(|tx| tx.insert(&req, record(&req, Some(&material))))
            .unwrap();
        store
            .transact(|tx| tx.save(&req, record(&req, None)))
            .unwrap();

        let found = store
            .transact(|tx| tx.referencing(EntityKind::Requirement, RefField::Material, &material))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_scan_filters_by_kind() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = EntityId::new(EntityKind::Widget);
        let b = EntityId::new(EntityKind::Shipment);

        store
            .transact(|tx| {
                tx.insert(&a, record(&a, None))?;
                tx.insert(&b, record(&b, None))
            })
            .unwrap();

        let widgets = store.transact(|tx| tx.scan(EntityKind::Widget)).unwrap();
        assert_eq!(widgets.len(), 1);
    }
}
