//! Installation requirements: submit notifies the warehouse, update is silent

use chrono::NaiveDate;

use super::{require_quantity, resolve, Engine, Result, WorkflowError};
use crate::core::dispatch::{Dispatcher, Notice, TaskName};
use crate::core::identity::EntityId;
use crate::core::store::{EntityStore, TransactionExt};
use crate::entities::{InstallationRequirement, Material};

impl<S: EntityStore, D: Dispatcher> Engine<S, D> {
    pub fn submit_installation(
        &self,
        material: &EntityId,
        quantity: i64,
        fabrication_date: NaiveDate,
    ) -> Result<InstallationRequirement> {
        let quantity = require_quantity("quantity", quantity)?;

        let ireq = self.unit_of_work("submit_installation", |tx, notices| {
            let _: Material = resolve(tx, material)?;
            let ireq = InstallationRequirement::new(material.clone(), quantity, fabrication_date);
            tx.create(&ireq)?;
            notices.push(Notice::about(
                TaskName::NotifyWarehouse,
                &ireq.id,
                format!("Installation requirement {} created for fabrication.", ireq.id),
            ));
            Ok(ireq)
        })?;

        tracing::info!(id = %ireq.id, material = %ireq.material, "installation requirement submitted");
        Ok(ireq)
    }

    /// Change quantity and/or fabrication date; at least one is required
    pub fn update_installation(
        &self,
        id: &EntityId,
        quantity: Option<i64>,
        fabrication_date: Option<NaiveDate>,
    ) -> Result<InstallationRequirement> {
        if quantity.is_none() && fabrication_date.is_none() {
            return Err(WorkflowError::invalid(
                "update",
                "nothing to change; give a quantity or a fabrication date",
            ));
        }
        let quantity = quantity
            .map(|q| require_quantity("quantity", q))
            .transpose()?;

        let ireq = self.unit_of_work("update_installation", |tx, _| {
            let mut ireq: InstallationRequirement = resolve(tx, id)?;
            if let Some(quantity) = quantity {
                ireq.quantity = quantity;
            }
            if let Some(date) = fabrication_date {
                ireq.fabrication_date = date;
            }
            tx.update(&ireq)?;
            Ok(ireq)
        })?;

        tracing::info!(id = %ireq.id, quantity = ireq.quantity, "installation requirement updated");
        Ok(ireq)
    }
}
