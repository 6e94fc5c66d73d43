//! Database schema initialization

use rusqlite::{params, Connection, OptionalExtension};

use super::StoreError;

/// Current schema version
pub(crate) const SCHEMA_VERSION: i32 = 1;

/// Open-time pragmas shared by the store and outbox connections
pub(crate) fn configure(conn: &Connection) -> Result<(), StoreError> {
    // WAL lets the outbox connection write while the store connection reads
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA busy_timeout=5000;
        "#,
    )?;
    Ok(())
}

/// Create the record tables, or verify the version of an existing database
pub(crate) fn init_records(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );

        -- One row per record; body holds the full JSON encoding
        CREATE TABLE IF NOT EXISTS records (
            id TEXT PRIMARY KEY,
            kind TEXT NOT NULL,
            material_ref TEXT,
            widget_ref TEXT,
            created TEXT NOT NULL,
            body TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_records_kind ON records(kind, created);
        CREATE INDEX IF NOT EXISTS idx_records_material ON records(material_ref);
        CREATE INDEX IF NOT EXISTS idx_records_widget ON records(widget_ref);
        "#,
    )?;

    let found: Option<i32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .optional()?
        .flatten();

    match found {
        None => {
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )?;
            Ok(())
        }
        Some(v) if v == SCHEMA_VERSION => Ok(()),
        Some(v) => Err(StoreError::SchemaVersion {
            found: v,
            expected: SCHEMA_VERSION,
        }),
    }
}

/// Create the notification outbox table
pub(crate) fn init_outbox(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS outbox (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task TEXT NOT NULL,
            payload TEXT NOT NULL,
            enqueued_at TEXT NOT NULL,
            delivered_at TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_outbox_pending ON outbox(delivered_at, id);
        "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_records(&conn).unwrap();
        init_records(&conn).unwrap();

        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        init_records(&conn).unwrap();
        conn.execute("UPDATE schema_version SET version = 99", [])
            .unwrap();

        let err = init_records(&conn).unwrap_err();
        assert!(matches!(
            err,
            StoreError::SchemaVersion {
                found: 99,
                expected: SCHEMA_VERSION
            }
        ));
    }
}
