//! INSP entity type - Inspection of a material or a widget

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{normalize_status, Entity};
use crate::core::identity::{EntityId, EntityKind};

/// Inspection outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionResult {
    Pass,
    Fail,
}

impl std::fmt::Display for InspectionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InspectionResult::Pass => write!(f, "pass"),
            InspectionResult::Fail => write!(f, "fail"),
        }
    }
}

impl std::str::FromStr for InspectionResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_status(s).as_str() {
            "pass" | "passed" => Ok(InspectionResult::Pass),
            "fail" | "failed" => Ok(InspectionResult::Fail),
            _ => Err(format!("Invalid inspection result: {}. Use pass or fail", s)),
        }
    }
}

/// The record an inspection was performed on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InspectionTarget {
    Material(EntityId),
    Widget(EntityId),
}

impl InspectionTarget {
    /// Resolve a target from the optional reference pair; exactly one must
    /// be set and it must be of the matching kind
    pub fn from_refs(
        material: Option<EntityId>,
        widget: Option<EntityId>,
    ) -> Result<Self, String> {
        match (material, widget) {
            (Some(m), None) if m.kind() == EntityKind::Material => Ok(InspectionTarget::Material(m)),
            (None, Some(w)) if w.kind() == EntityKind::Widget => Ok(InspectionTarget::Widget(w)),
            (Some(m), None) => Err(format!("{} is not a material", m)),
            (None, Some(w)) => Err(format!("{} is not a widget", w)),
            (Some(_), Some(_)) => {
                Err("an inspection targets either a material or a widget, not both".to_string())
            }
            (None, None) => Err("an inspection must target a material or a widget".to_string()),
        }
    }

    pub fn id(&self) -> &EntityId {
        match self {
            InspectionTarget::Material(id) | InspectionTarget::Widget(id) => id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            InspectionTarget::Material(_) => EntityKind::Material,
            InspectionTarget::Widget(_) => EntityKind::Widget,
        }
    }
}

/// A terminal inspection record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    /// Unique identifier (INSP-xxx)
    pub id: EntityId,

    /// Inspected material, if any
    #[serde(default)]
    pub material: Option<EntityId>,

    /// Inspected widget, if any
    #[serde(default)]
    pub widget: Option<EntityId>,

    /// Pass or fail
    pub result: InspectionResult,

    /// Free-text defect notes
    #[serde(default)]
    pub defects: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Inspection {
    const KIND: EntityKind = EntityKind::Inspection;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn status(&self) -> Option<String> {
        Some(self.result.to_string())
    }
}

impl Inspection {
    pub fn new(target: &InspectionTarget, result: InspectionResult, defects: String) -> Self {
        let (material, widget) = match target {
            InspectionTarget::Material(id) => (Some(id.clone()), None),
            InspectionTarget::Widget(id) => (None, Some(id.clone())),
        };
        Self {
            id: EntityId::new(EntityKind::Inspection),
            material,
            widget,
            result,
            defects,
            created: Utc::now(),
        }
    }

    /// The surviving target, re-validated from the stored references
    pub fn target(&self) -> Result<InspectionTarget, String> {
        InspectionTarget::from_refs(self.material.clone(), self.widget.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_requires_exactly_one_ref() {
        let mat = EntityId::new(EntityKind::Material);
        let wdg = EntityId::new(EntityKind::Widget);

        assert!(InspectionTarget::from_refs(None, None).is_err());
        assert!(InspectionTarget::from_refs(Some(mat.clone()), Some(wdg.clone())).is_err());
        assert_eq!(
            InspectionTarget::from_refs(Some(mat.clone()), None).unwrap(),
            InspectionTarget::Material(mat)
        );
        assert_eq!(
            InspectionTarget::from_refs(None, Some(wdg.clone())).unwrap(),
            InspectionTarget::Widget(wdg)
        );
    }

    #[test]
    fn test_target_rejects_wrong_kind() {
        let wdg = EntityId::new(EntityKind::Widget);
        let err = InspectionTarget::from_refs(Some(wdg), None).unwrap_err();
        assert!(err.contains("not a material"));
    }

    #[test]
    fn test_inspection_target_is_lost_after_nullify() {
        let target = InspectionTarget::Widget(EntityId::new(EntityKind::Widget));
        let mut insp = Inspection::new(&target, InspectionResult::Fail, "scratches".to_string());
        assert_eq!(insp.target().unwrap(), target);

        insp.widget = None;
        assert!(insp.target().is_err());
    }

    #[test]
    fn test_result_parsing() {
        assert_eq!("Pass".parse::<InspectionResult>().unwrap(), InspectionResult::Pass);
        assert_eq!("failed".parse::<InspectionResult>().unwrap(), InspectionResult::Fail);
        assert!("maybe".parse::<InspectionResult>().is_err());
    }
}
