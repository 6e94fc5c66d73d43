//! Customer orders and progress

use super::{require_text, resolve, Engine, Result, WorkflowError};
use crate::core::dispatch::Dispatcher;
use crate::core::entity::Status;
use crate::core::identity::EntityId;
use crate::core::store::{EntityStore, TransactionExt};
use crate::entities::{CustomerOrder, Material, OrderProgress, OrderStatus, Widget};

impl<S: EntityStore, D: Dispatcher> Engine<S, D> {
    /// Place an order for a material and/or a widget.
    ///
    /// `status` is persisted verbatim; it does not pass through the state
    /// machine.
    pub fn create_order(
        &self,
        material: Option<&EntityId>,
        widget: Option<&EntityId>,
        customer_id: &str,
        status: &str,
    ) -> Result<CustomerOrder> {
        if material.is_none() && widget.is_none() {
            return Err(WorkflowError::invalid(
                "order",
                "an order needs a material or a widget",
            ));
        }
        let customer_id = require_text("customer_id", customer_id)?;
        let status = require_text("status", status)?;

        let order = self.unit_of_work("create_order", |tx, _| {
            if let Some(material) = material {
                let _: Material = resolve(tx, material)?;
            }
            if let Some(widget) = widget {
                let _: Widget = resolve(tx, widget)?;
            }
            let order = CustomerOrder::new(
                material.cloned(),
                widget.cloned(),
                customer_id,
                Status::verbatim(&status),
            );
            tx.create(&order)?;
            Ok(order)
        })?;

        tracing::info!(id = %order.id, customer = %order.customer_id, status = %order.status, "order created");
        Ok(order)
    }

    /// Confirm the customer received the order
    pub fn confirm_receipt(&self, id: &EntityId, received: bool) -> Result<CustomerOrder> {
        let order = self.unit_of_work("confirm_receipt", |tx, _| {
            let mut order: CustomerOrder = resolve(tx, id)?;
            if !received {
                return Err(WorkflowError::invalid(
                    "received",
                    "receipt must be confirmed as received",
                ));
            }
            order.status = Status::Known(OrderStatus::Received);
            tx.update(&order)?;
            Ok(order)
        })?;

        tracing::info!(id = %order.id, status = %order.status, "order received");
        Ok(order)
    }

    /// Completion percentage of an order
    pub fn order_progress(&self, id: &EntityId) -> Result<OrderProgress> {
        let order: CustomerOrder = self.get(id)?;
        Ok(OrderProgress {
            progress_percentage: order.progress(),
            status: order.status.to_string(),
            order_id: order.id,
        })
    }
}
