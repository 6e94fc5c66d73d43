//! Inspections and the notification routing table keyed by target

use serde::Serialize;

use super::{resolve, Engine, Result, WorkflowError};
use crate::core::dispatch::{Dispatcher, Notice, TaskName};
use crate::core::entity::Status;
use crate::core::identity::EntityId;
use crate::core::store::{EntityStore, Transaction, TransactionExt};
use crate::entities::{
    Inspection, InspectionResult, InspectionTarget, Material, MaterialStatus, Widget, WidgetStatus,
};

/// Where inspection notifications go for one kind of target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectionRoute {
    /// Noun used in messages
    pub noun: &'static str,
    /// Task enqueued when an inspection is recorded
    pub completed: TaskName,
    /// Task enqueued when an inspection is flagged with defects
    pub flagged: TaskName,
}

const MATERIAL_ROUTE: InspectionRoute = InspectionRoute {
    noun: "material",
    completed: TaskName::NotifyWarehouse,
    flagged: TaskName::NotifyProcurement,
};

const WIDGET_ROUTE: InspectionRoute = InspectionRoute {
    noun: "widget",
    completed: TaskName::NotifyShipping,
    flagged: TaskName::NotifyFabrication,
};

impl InspectionRoute {
    pub fn for_target(target: &InspectionTarget) -> &'static InspectionRoute {
        match target {
            InspectionTarget::Material(_) => &MATERIAL_ROUTE,
            InspectionTarget::Widget(_) => &WIDGET_ROUTE,
        }
    }
}

/// Response to flagging an inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagOutcome {
    pub inspection_id: EntityId,
    pub status: String,
}

impl<S: EntityStore, D: Dispatcher> Engine<S, D> {
    /// Record an inspection of exactly one material or widget and move the
    /// target to its post-inspection status
    pub fn create_inspection(
        &self,
        material: Option<&EntityId>,
        widget: Option<&EntityId>,
        result: InspectionResult,
        defects: &str,
    ) -> Result<Inspection> {
        let target = InspectionTarget::from_refs(material.cloned(), widget.cloned())
            .map_err(WorkflowError::InconsistentReference)?;
        let route = InspectionRoute::for_target(&target);
        let defects = defects.trim().to_string();

        let (inspection, target_status) = self.unit_of_work("create_inspection", |tx, notices| {
            let target_status = apply_result(tx, &target, result)?;
            let inspection = Inspection::new(&target, result, defects);
            tx.create(&inspection)?;
            notices.push(Notice::about(
                route.completed,
                &inspection.id,
                format!("Inspection {} completed for {}.", inspection.id, route.noun),
            ));
            Ok((inspection, target_status))
        })?;

        tracing::info!(
            id = %inspection.id,
            target = %target.id(),
            result = %inspection.result,
            target_status = %target_status,
            "inspection recorded"
        );
        Ok(inspection)
    }

    /// Report defects on an inspection to the team that owns the target.
    /// No status changes.
    pub fn flag_inspection(&self, id: &EntityId, defects: &str) -> Result<FlagOutcome> {
        let defects = defects.trim();
        if defects.is_empty() {
            return Err(WorkflowError::invalid("defects", "defects required"));
        }

        let outcome = self.unit_of_work("flag_inspection", |tx, notices| {
            let inspection: Inspection = resolve(tx, id)?;
            let target = inspection.target().map_err(|reason| {
                WorkflowError::InconsistentReference(format!("{}: {}", inspection.id, reason))
            })?;
            let route = InspectionRoute::for_target(&target);
            let noun = capitalize(route.noun);
            notices.push(Notice::about(
                route.flagged,
                target.id(),
                format!("{} flagged with defects: {}", noun, defects),
            ));
            Ok(FlagOutcome {
                inspection_id: inspection.id,
                status: "Notified".to_string(),
            })
        })?;

        tracing::info!(id = %outcome.inspection_id, "inspection flagged");
        Ok(outcome)
    }
}

/// Move the inspected record to its post-inspection status, returning it
fn apply_result(
    tx: &mut dyn Transaction,
    target: &InspectionTarget,
    result: InspectionResult,
) -> Result<String> {
    match target {
        InspectionTarget::Material(id) => {
            let mut material: Material = resolve(tx, id)?;
            material.status = MaterialStatus::after_inspection(result);
            tx.update(&material)?;
            Ok(material.status.to_string())
        }
        InspectionTarget::Widget(id) => {
            let mut widget: Widget = resolve(tx, id)?;
            widget.status = Status::Known(WidgetStatus::after_inspection(result));
            tx.update(&widget)?;
            Ok(widget.status.to_string())
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityKind;

    #[test]
    fn test_routes() {
        let mat = InspectionTarget::Material(EntityId::new(EntityKind::Material));
        let wdg = InspectionTarget::Widget(EntityId::new(EntityKind::Widget));

        assert_eq!(InspectionRoute::for_target(&mat).completed, TaskName::NotifyWarehouse);
        assert_eq!(InspectionRoute::for_target(&mat).flagged, TaskName::NotifyProcurement);
        assert_eq!(InspectionRoute::for_target(&wdg).completed, TaskName::NotifyShipping);
        assert_eq!(InspectionRoute::for_target(&wdg).flagged, TaskName::NotifyFabrication);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("widget"), "Widget");
        assert_eq!(capitalize(""), "");
    }
}
