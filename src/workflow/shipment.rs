//! Shipment preparation and delivery confirmation

use super::{require_text, resolve, Engine, Result, WorkflowError};
use crate::core::dispatch::{Dispatcher, Notice, TaskName};
use crate::core::entity::Status;
use crate::core::identity::EntityId;
use crate::core::store::{EntityStore, TransactionExt};
use crate::entities::{Material, Shipment, ShipmentStatus, Widget, WidgetStatus};

impl<S: EntityStore, D: Dispatcher> Engine<S, D> {
    /// Ship an inspected widget to a customer.
    ///
    /// The shipment is created directly in `Shipped` (there is no separate
    /// dispatch step) and the widget moves to `Shipped` in the same unit of
    /// work.
    pub fn prepare_shipment(
        &self,
        widget: &EntityId,
        material: Option<&EntityId>,
        tracking_id: &str,
        customer_id: &str,
    ) -> Result<Shipment> {
        let tracking_id = require_text("tracking_id", tracking_id)?;
        let customer_id = require_text("customer_id", customer_id)?;

        let shipment = self.unit_of_work("prepare_shipment", |tx, notices| {
            let mut source: Widget = resolve(tx, widget)?;
            let shippable = source.status.known().is_some_and(|s| s.is_shippable());
            if !shippable {
                return Err(WorkflowError::InvalidTransition {
                    id: source.id.clone(),
                    from: source.status.to_string(),
                    to: WidgetStatus::Shipped.to_string(),
                });
            }
            if let Some(material) = material {
                let _: Material = resolve(tx, material)?;
            }

            let shipment = Shipment::new(
                source.id.clone(),
                material.cloned(),
                tracking_id,
                customer_id,
                ShipmentStatus::Shipped,
            );
            tx.create(&shipment)?;

            source.status = Status::Known(WidgetStatus::Shipped);
            tx.update(&source)?;

            notices.push(Notice::about(
                TaskName::NotifyShipping,
                &shipment.id,
                format!("Shipment {} prepared.", shipment.id),
            ));
            Ok(shipment)
        })?;

        tracing::info!(
            id = %shipment.id,
            widget = %widget,
            tracking_id = %shipment.tracking_id,
            status = %shipment.status,
            "shipment prepared"
        );
        Ok(shipment)
    }

    /// Mark a shipment delivered. Repeating the confirmation is harmless and
    /// notifies shipping again.
    pub fn confirm_delivery(&self, id: &EntityId, delivered: bool) -> Result<Shipment> {
        let shipment = self.unit_of_work("confirm_delivery", |tx, notices| {
            let mut shipment: Shipment = resolve(tx, id)?;
            if !delivered {
                return Err(WorkflowError::invalid(
                    "delivered",
                    "delivery must be confirmed as delivered",
                ));
            }
            shipment.status = ShipmentStatus::Delivered;
            tx.update(&shipment)?;
            notices.push(Notice::about(
                TaskName::NotifyShipping,
                &shipment.id,
                format!("Shipment {} delivered.", shipment.id),
            ));
            Ok(shipment)
        })?;

        tracing::info!(id = %shipment.id, status = %shipment.status, "shipment delivered");
        Ok(shipment)
    }
}
