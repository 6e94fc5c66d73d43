//! Requirement transitions: Draft -> Feedback -> Finalized

use chrono::NaiveDate;

use super::{require_quantity, require_text, resolve, Engine, Result, WorkflowError};
use crate::core::dispatch::{Dispatcher, Notice, TaskName};
use crate::core::identity::EntityId;
use crate::core::store::{EntityStore, TransactionExt};
use crate::entities::{Material, Requirement, RequirementStatus, SupplierFeedback};

impl<S: EntityStore, D: Dispatcher> Engine<S, D> {
    /// Draft a requirement against an existing material and notify procurement
    pub fn submit_requirement(
        &self,
        material: &EntityId,
        quantity: i64,
        delivery_date: NaiveDate,
    ) -> Result<Requirement> {
        let quantity = require_quantity("quantity", quantity)?;

        let req = self.unit_of_work("submit_requirement", |tx, notices| {
            let _: Material = resolve(tx, material)?;
            let req = Requirement::new(material.clone(), quantity, delivery_date);
            tx.create(&req)?;
            notices.push(Notice::about(
                TaskName::NotifyProcurement,
                &req.id,
                format!("New requirement {} created.", req.id),
            ));
            Ok(req)
        })?;

        tracing::info!(id = %req.id, material = %req.material, status = %req.status, "requirement submitted");
        Ok(req)
    }

    /// Record supplier feedback and notify engineering.
    ///
    /// Allowed from Draft or Feedback; a finalized requirement is closed.
    pub fn provide_feedback(
        &self,
        id: &EntityId,
        availability: &str,
        lead_time: &str,
    ) -> Result<Requirement> {
        let availability = require_text("availability", availability)?;
        let lead_time = require_text("lead_time", lead_time)?;

        let req = self.unit_of_work("provide_feedback", |tx, notices| {
            let mut req: Requirement = resolve(tx, id)?;
            if req.status == RequirementStatus::Finalized {
                return Err(WorkflowError::InvalidTransition {
                    id: req.id.clone(),
                    from: req.status.to_string(),
                    to: RequirementStatus::Feedback.to_string(),
                });
            }
            req.feedback = Some(SupplierFeedback {
                availability,
                lead_time,
            });
            req.status = RequirementStatus::Feedback;
            tx.update(&req)?;
            notices.push(Notice::about(
                TaskName::NotifyEngineer,
                &req.id,
                format!("Feedback received for requirement {}.", req.id),
            ));
            Ok(req)
        })?;

        tracing::info!(id = %req.id, status = %req.status, "requirement feedback recorded");
        Ok(req)
    }

    /// Settle quantity and delivery date, finalize, and notify fabrication
    pub fn finalize_requirement(
        &self,
        id: &EntityId,
        quantity: i64,
        delivery_date: NaiveDate,
    ) -> Result<Requirement> {
        let quantity = require_quantity("quantity", quantity)?;

        let req = self.unit_of_work("finalize_requirement", |tx, notices| {
            let mut req: Requirement = resolve(tx, id)?;
            req.quantity = quantity;
            req.delivery_date = delivery_date;
            req.status = RequirementStatus::Finalized;
            tx.update(&req)?;
            notices.push(Notice::about(
                TaskName::NotifyFabrication,
                &req.id,
                format!("Requirement {} finalized.", req.id),
            ));
            Ok(req)
        })?;

        tracing::info!(id = %req.id, quantity = req.quantity, status = %req.status, "requirement finalized");
        Ok(req)
    }
}
