//! Maintenance and inventory records, and direct notifications

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use ulid::Ulid;

use super::{require_text, resolve, Engine, Result, WorkflowError};
use crate::core::dispatch::{Dispatcher, Notice, TaskName};
use crate::core::identity::EntityId;
use crate::core::store::{EntityStore, TransactionExt};
use crate::entities::{InventoryRecord, MaintenanceRecord, Material};

/// Acknowledgement of a queued direct notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationReceipt {
    pub notification_id: String,
    pub status: String,
}

fn require_date(field: &'static str, date: Option<NaiveDate>) -> Result<NaiveDate> {
    date.ok_or_else(|| WorkflowError::invalid(field, "date required"))
}

impl<S: EntityStore, D: Dispatcher> Engine<S, D> {
    pub fn create_maintenance(
        &self,
        material: &EntityId,
        date: Option<NaiveDate>,
        condition: &str,
    ) -> Result<MaintenanceRecord> {
        let date = require_date("date", date)?;
        let condition = require_text("condition", condition)?;

        let record = self.unit_of_work("create_maintenance", |tx, _| {
            let _: Material = resolve(tx, material)?;
            let record = MaintenanceRecord::new(material.clone(), date, condition);
            tx.create(&record)?;
            Ok(record)
        })?;

        tracing::info!(id = %record.id, material = %record.material, "maintenance recorded");
        Ok(record)
    }

    pub fn update_maintenance(
        &self,
        id: &EntityId,
        date: Option<NaiveDate>,
        condition: Option<&str>,
    ) -> Result<MaintenanceRecord> {
        if date.is_none() && condition.is_none() {
            return Err(WorkflowError::invalid(
                "update",
                "nothing to change; give a date or a condition",
            ));
        }
        let condition = condition.map(|c| require_text("condition", c)).transpose()?;

        let record = self.unit_of_work("update_maintenance", |tx, _| {
            let mut record: MaintenanceRecord = resolve(tx, id)?;
            if let Some(date) = date {
                record.date = date;
            }
            if let Some(condition) = condition {
                record.condition = condition;
            }
            tx.update(&record)?;
            Ok(record)
        })?;

        tracing::info!(id = %record.id, "maintenance record updated");
        Ok(record)
    }

    pub fn create_inventory(
        &self,
        material: &EntityId,
        location: &str,
        last_checked: Option<NaiveDate>,
    ) -> Result<InventoryRecord> {
        let location = require_text("location", location)?;
        let last_checked = require_date("last_checked", last_checked)?;

        let record = self.unit_of_work("create_inventory", |tx, _| {
            let _: Material = resolve(tx, material)?;
            let record = InventoryRecord::new(material.clone(), location, last_checked);
            tx.create(&record)?;
            Ok(record)
        })?;

        tracing::info!(id = %record.id, material = %record.material, location = %record.location, "inventory recorded");
        Ok(record)
    }

    pub fn update_inventory(
        &self,
        id: &EntityId,
        location: Option<&str>,
        last_checked: Option<NaiveDate>,
    ) -> Result<InventoryRecord> {
        if location.is_none() && last_checked.is_none() {
            return Err(WorkflowError::invalid(
                "update",
                "nothing to change; give a location or a last-checked date",
            ));
        }
        let location = location.map(|l| require_text("location", l)).transpose()?;

        let record = self.unit_of_work("update_inventory", |tx, _| {
            let mut record: InventoryRecord = resolve(tx, id)?;
            if let Some(location) = location {
                record.location = location;
            }
            if let Some(date) = last_checked {
                record.last_checked = date;
            }
            tx.update(&record)?;
            Ok(record)
        })?;

        tracing::info!(id = %record.id, "inventory record updated");
        Ok(record)
    }

    /// Send a free-form message to a recipient through the task queue
    pub fn send_notification(&self, recipient: &str, message: &str) -> Result<NotificationReceipt> {
        let recipient = require_text("recipient", recipient)?;
        let message = require_text("message", message)?;

        let receipt = NotificationReceipt {
            notification_id: Ulid::new().to_string(),
            status: "Sent".to_string(),
        };

        self.dispatch(vec![Notice::new(
            TaskName::SendNotification,
            json!({
                "message": message,
                "recipient": recipient,
                "notification_id": receipt.notification_id,
            }),
        )]);

        tracing::info!(notification_id = %receipt.notification_id, %recipient, "notification sent");
        Ok(receipt)
    }
}
