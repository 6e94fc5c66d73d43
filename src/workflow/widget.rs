//! Widget creation, raw status override, and deletion

use super::{require_text, resolve, Engine, Result};
use crate::core::dispatch::Dispatcher;
use crate::core::entity::Status;
use crate::core::identity::EntityId;
use crate::core::store::{DeleteReport, EntityStore, TransactionExt};
use crate::entities::{Material, Widget, WidgetStatus};

impl<S: EntityStore, D: Dispatcher> Engine<S, D> {
    /// Fabricate a widget from a material. The material's status is not
    /// checked, only its existence.
    pub fn create_widget(
        &self,
        material: &EntityId,
        status: Option<WidgetStatus>,
    ) -> Result<Widget> {
        let widget = self.unit_of_work("create_widget", |tx, _| {
            let _: Material = resolve(tx, material)?;
            let widget = Widget::new(material.clone(), status.unwrap_or_default().into());
            tx.create(&widget)?;
            Ok(widget)
        })?;

        tracing::info!(id = %widget.id, material = %widget.material, status = %widget.status, "widget created");
        Ok(widget)
    }

    /// Overwrite a widget's status with a caller-supplied value.
    ///
    /// Bypasses the state machine. The text is stored exactly as given;
    /// recognized spellings still count as their status for shipping.
    pub fn override_widget_status(&self, id: &EntityId, raw: &str) -> Result<Widget> {
        let raw = require_text("status", raw)?;

        let widget = self.unit_of_work("override_widget_status", |tx, _| {
            let mut widget: Widget = resolve(tx, id)?;
            widget.status = Status::verbatim(&raw);
            tx.update(&widget)?;
            Ok(widget)
        })?;

        tracing::info!(
            id = %widget.id,
            status = %widget.status,
            recognized = !widget.status.is_unrecognized(),
            "widget status overridden"
        );
        Ok(widget)
    }

    /// Delete a widget, clearing references to it
    pub fn delete_widget(&self, id: &EntityId) -> Result<DeleteReport> {
        let report = self.unit_of_work("delete_widget", |tx, _| {
            let _: Widget = resolve(tx, id)?;
            Ok(tx.delete(id)?)
        })?;

        tracing::info!(id = %id, detached = report.detached.len(), "widget deleted");
        Ok(report)
    }
}
