//! Material transitions: arrival, storage, issue, deletion, demand reports

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use ulid::Ulid;

use super::{require_quantity, require_text, resolve, Engine, Result, WorkflowError};
use crate::core::dispatch::{Dispatcher, Notice, TaskName};
use crate::core::identity::EntityId;
use crate::core::store::{DeleteReport, EntityStore, TransactionExt};
use crate::entities::{Material, MaterialStatus};

/// Acknowledgement of a queued demand report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemandReportRequest {
    pub report_id: String,
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl<S: EntityStore, D: Dispatcher> Engine<S, D> {
    /// Record a newly arrived material and ask the warehouse to inspect it
    pub fn record_arrival(&self, material_type: &str, quantity: i64) -> Result<Material> {
        let material_type = require_text("type", material_type)?;
        let quantity = require_quantity("quantity", quantity)?;

        let material = self.unit_of_work("record_arrival", |tx, notices| {
            let material = Material::new(material_type, quantity);
            tx.create(&material)?;
            notices.push(Notice::about(
                TaskName::NotifyWarehouse,
                &material.id,
                "Inspection task assigned for material arrival.",
            ));
            Ok(material)
        })?;

        tracing::info!(id = %material.id, quantity = material.quantity, status = %material.status, "material arrived");
        Ok(material)
    }

    /// Put a material in storage. Applies from any status.
    pub fn store_material(&self, id: &EntityId, location: &str) -> Result<Material> {
        let location = require_text("location", location)?;

        let material = self.unit_of_work("store_material", |tx, _| {
            let mut material: Material = resolve(tx, id)?;
            material.location = Some(location);
            material.status = MaterialStatus::Stored;
            tx.update(&material)?;
            Ok(material)
        })?;

        tracing::info!(id = %material.id, location = ?material.location, status = %material.status, "material stored");
        Ok(material)
    }

    /// Issue part of a material to fabrication.
    ///
    /// The quantity check and the decrement happen in the same unit of
    /// work, so concurrent issuers can never drive the quantity negative.
    pub fn issue_material(&self, id: &EntityId, quantity: i64) -> Result<Material> {
        let requested = require_quantity("quantity", quantity)?;

        let material = self.unit_of_work("issue_material", |tx, notices| {
            let mut material: Material = resolve(tx, id)?;
            if requested > material.quantity {
                return Err(WorkflowError::InsufficientQuantity {
                    id: material.id.clone(),
                    requested,
                    available: material.quantity,
                });
            }
            material.quantity -= requested;
            material.status = MaterialStatus::Issued;
            tx.update(&material)?;
            notices.push(Notice::about(
                TaskName::NotifyFabrication,
                &material.id,
                format!("Material {} issued for fabrication.", material.id),
            ));
            Ok(material)
        })?;

        tracing::info!(
            id = %material.id,
            issued = requested,
            remaining = material.quantity,
            status = %material.status,
            "material issued"
        );
        Ok(material)
    }

    /// Delete a material and apply the deletion policy to its dependents
    pub fn delete_material(&self, id: &EntityId) -> Result<DeleteReport> {
        let report = self.unit_of_work("delete_material", |tx, _| {
            let _: Material = resolve(tx, id)?;
            Ok(tx.delete(id)?)
        })?;

        tracing::info!(
            id = %id,
            deleted = report.deleted.len(),
            detached = report.detached.len(),
            "material deleted"
        );
        Ok(report)
    }

    /// Queue a demand report for the given date range
    pub fn request_demand_report(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<DemandReportRequest> {
        let (start_date, end_date) = match (start_date, end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(WorkflowError::invalid(
                    "date range",
                    "start and end dates required",
                ))
            }
        };
        if start_date > end_date {
            return Err(WorkflowError::invalid(
                "date range",
                format!("start {} is after end {}", start_date, end_date),
            ));
        }

        let request = DemandReportRequest {
            report_id: Ulid::new().to_string(),
            status: "Generating".to_string(),
            start_date,
            end_date,
        };

        self.dispatch(vec![Notice::new(
            TaskName::GenerateDemandReport,
            json!({
                "message": format!(
                    "Generate report {} for dates {} to {}",
                    request.report_id, start_date, end_date
                ),
                "report_id": request.report_id,
                "start_date": start_date,
                "end_date": end_date,
            }),
        )]);

        tracing::info!(report_id = %request.report_id, %start_date, %end_date, "demand report requested");
        Ok(request)
    }
}
