//! WDG entity type - Widget fabricated from a material

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{normalize_status, Entity, Status};
use crate::core::identity::{EntityId, EntityKind};
use crate::entities::inspection::InspectionResult;

/// Widget status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum WidgetStatus {
    #[default]
    Fabricated,
    Inspected,
    ReadyForShipping,
    Shipped,
    Flagged,
}

impl WidgetStatus {
    /// Status a widget takes after an inspection with `result`
    pub fn after_inspection(result: InspectionResult) -> Self {
        match result {
            InspectionResult::Pass => WidgetStatus::ReadyForShipping,
            InspectionResult::Fail => WidgetStatus::Flagged,
        }
    }

    /// Whether a shipment may be prepared from a widget in this status
    pub fn is_shippable(&self) -> bool {
        matches!(self, WidgetStatus::Inspected | WidgetStatus::ReadyForShipping)
    }
}

impl std::fmt::Display for WidgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetStatus::Fabricated => write!(f, "fabricated"),
            WidgetStatus::Inspected => write!(f, "inspected"),
            WidgetStatus::ReadyForShipping => write!(f, "ready_for_shipping"),
            WidgetStatus::Shipped => write!(f, "shipped"),
            WidgetStatus::Flagged => write!(f, "flagged"),
        }
    }
}

impl std::str::FromStr for WidgetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_status(s).as_str() {
            "fabricated" => Ok(WidgetStatus::Fabricated),
            "inspected" => Ok(WidgetStatus::Inspected),
            "ready_for_shipping" => Ok(WidgetStatus::ReadyForShipping),
            "shipped" => Ok(WidgetStatus::Shipped),
            "flagged" => Ok(WidgetStatus::Flagged),
            _ => Err(format!(
                "Invalid widget status: {}. Use fabricated, inspected, ready_for_shipping, shipped, or flagged",
                s
            )),
        }
    }
}

/// A widget fabricated from a material lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    /// Unique identifier (WDG-xxx)
    pub id: EntityId,

    /// Source material (MAT-xxx)
    pub material: EntityId,

    /// Workflow status; may hold a raw override
    #[serde(default)]
    pub status: Status<WidgetStatus>,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Widget {
    const KIND: EntityKind = EntityKind::Widget;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn status(&self) -> Option<String> {
        Some(self.status.to_string())
    }
}

impl Widget {
    pub fn new(material: EntityId, status: Status<WidgetStatus>) -> Self {
        Self {
            id: EntityId::new(EntityKind::Widget),
            material,
            status,
            created: Utc::now(),
        }
    }
}
