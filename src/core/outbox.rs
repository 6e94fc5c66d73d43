//! Durable notification outbox
//!
//! [`OutboxDispatcher`] appends each task to an `outbox` table on its own
//! SQLite connection. Workers read pending rows and acknowledge them once
//! delivered. Write failures are logged and swallowed so that a queue outage
//! never reaches the workflow operation that triggered it.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;
use serde_json::Value;

use crate::core::dispatch::{Dispatcher, TaskName};
use crate::core::store::{schema, StoreError};

/// One queued task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboxEntry {
    pub id: i64,
    pub task: TaskName,
    pub payload: Value,
    pub enqueued_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl OutboxEntry {
    /// The `message` field of the payload, falling back to the raw payload
    pub fn message(&self) -> String {
        self.payload
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| self.payload.to_string())
    }

    /// The line a notification worker prints when it handles this task
    pub fn worker_line(&self) -> String {
        let field = |name: &str| {
            self.payload
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or("?")
                .to_string()
        };
        match self.task {
            TaskName::GenerateDemandReport => format!(
                "Generated report {} for dates {} to {}",
                field("report_id"),
                field("start_date"),
                field("end_date")
            ),
            TaskName::SendNotification => {
                format!("Notification sent to {}: {}", field("recipient"), self.message())
            }
            task => format!("{} Notification: {}", task.audience(), self.message()),
        }
    }
}

/// Dispatcher backed by a SQLite outbox table
pub struct OutboxDispatcher {
    conn: Mutex<Connection>,
}

impl OutboxDispatcher {
    /// Open the outbox in the database at `path`
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        schema::configure(&conn)?;
        schema::init_outbox(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a private in-memory outbox
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::init_outbox(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn append(&self, task: TaskName, payload: &Value) -> Result<i64, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "INSERT INTO outbox (task, payload, enqueued_at) VALUES (?1, ?2, ?3)",
            params![task.as_str(), payload.to_string(), Utc::now().to_rfc3339()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Tasks not yet acknowledged, oldest first
    pub fn pending(&self) -> Result<Vec<OutboxEntry>, StoreError> {
        self.select("SELECT id, task, payload, enqueued_at, delivered_at FROM outbox WHERE delivered_at IS NULL ORDER BY id")
    }

    /// Every task ever enqueued, oldest first
    pub fn all(&self) -> Result<Vec<OutboxEntry>, StoreError> {
        self.select("SELECT id, task, payload, enqueued_at, delivered_at FROM outbox ORDER BY id")
    }

    /// Mark a task delivered; returns false if it was unknown or already acknowledged
    pub fn acknowledge(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let changed = conn.execute(
            "UPDATE outbox SET delivered_at = ?2 WHERE id = ?1 AND delivered_at IS NULL",
            params![id, Utc::now().to_rfc3339()],
        )?;
        Ok(changed > 0)
    }

    fn select(&self, sql: &str) -> Result<Vec<OutboxEntry>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, task, payload, enqueued_at, delivered_at) = row?;
            entries.push(OutboxEntry {
                id,
                task: task
                    .parse::<TaskName>()
                    .map_err(|message| corrupt(id, message))?,
                payload: serde_json::from_str(&payload).map_err(|e| corrupt(id, e.to_string()))?,
                enqueued_at: parse_time(id, &enqueued_at)?,
                delivered_at: delivered_at
                    .as_deref()
                    .map(|t| parse_time(id, t))
                    .transpose()?,
            });
        }
        Ok(entries)
    }
}

impl Dispatcher for OutboxDispatcher {
    fn enqueue(&self, task: TaskName, payload: Value) {
        match self.append(task, &payload) {
            Ok(row) => tracing::debug!(task = %task, row, "task written to outbox"),
            Err(e) => tracing::error!(task = %task, error = %e, "failed to write task to outbox"),
        }
    }
}

fn parse_time(id: i64, raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| corrupt(id, e.to_string()))
}

fn corrupt(id: i64, message: String) -> StoreError {
    StoreError::Corrupt {
        id: format!("outbox#{}", id),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_enqueue_then_pending() {
        let outbox = OutboxDispatcher::open_in_memory().unwrap();
        outbox.enqueue(TaskName::NotifyWarehouse, json!({"message": "inspect"}));
        outbox.enqueue(TaskName::NotifyShipping, json!({"message": "ship"}));

        let pending = outbox.pending().unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].task, TaskName::NotifyWarehouse);
        assert_eq!(pending[0].message(), "inspect");
        assert!(pending[0].delivered_at.is_none());
    }

    #[test]
    fn test_acknowledge_removes_from_pending() {
        let outbox = OutboxDispatcher::open_in_memory().unwrap();
        outbox.enqueue(TaskName::NotifyEngineer, json!({"message": "feedback"}));
        let id = outbox.pending().unwrap()[0].id;

        assert!(outbox.acknowledge(id).unwrap());
        assert!(!outbox.acknowledge(id).unwrap());
        assert!(outbox.pending().unwrap().is_empty());

        let all = outbox.all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].delivered_at.is_some());
    }

    #[test]
    fn test_worker_lines() {
        let outbox = OutboxDispatcher::open_in_memory().unwrap();
        outbox.enqueue(TaskName::NotifyWarehouse, json!({"message": "Inspect MAT-1."}));
        outbox.enqueue(
            TaskName::SendNotification,
            json!({"message": "hello", "recipient": "ops"}),
        );
        outbox.enqueue(
            TaskName::GenerateDemandReport,
            json!({"message": "m", "report_id": "R1", "start_date": "2025-01-01", "end_date": "2025-01-31"}),
        );

        let lines: Vec<String> = outbox.pending().unwrap().iter().map(|e| e.worker_line()).collect();
        assert_eq!(lines[0], "Warehouse Notification: Inspect MAT-1.");
        assert_eq!(lines[1], "Notification sent to ops: hello");
        assert_eq!(lines[2], "Generated report R1 for dates 2025-01-01 to 2025-01-31");
    }

    #[test]
    fn test_enqueue_failure_is_swallowed() {
        let outbox = OutboxDispatcher::open_in_memory().unwrap();
        outbox
            .conn
            .lock()
            .unwrap()
            .execute_batch("DROP TABLE outbox;")
            .unwrap();

        // Must not panic or surface an error
        outbox.enqueue(TaskName::NotifyProcurement, json!({"message": "lost"}));
    }

    #[test]
    fn test_outbox_shares_database_file_with_store() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mtrack.db");

        let _store = crate::core::store::SqliteStore::open(&path).unwrap();
        let outbox = OutboxDispatcher::open(&path).unwrap();
        outbox.enqueue(TaskName::SendNotification, json!({"message": "hi"}));

        let reopened = OutboxDispatcher::open(&path).unwrap();
        assert_eq!(reopened.pending().unwrap().len(), 1);
    }
}
