//! REQ entity type - Material requirement negotiated with procurement

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{normalize_status, Entity};
use crate::core::identity::{EntityId, EntityKind};

/// Requirement status (linear: draft -> feedback -> finalized)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum RequirementStatus {
    #[default]
    Draft,
    Feedback,
    Finalized,
}

impl std::fmt::Display for RequirementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequirementStatus::Draft => write!(f, "draft"),
            RequirementStatus::Feedback => write!(f, "feedback"),
            RequirementStatus::Finalized => write!(f, "finalized"),
        }
    }
}

impl std::str::FromStr for RequirementStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_status(s).as_str() {
            "draft" => Ok(RequirementStatus::Draft),
            "feedback" => Ok(RequirementStatus::Feedback),
            "finalized" => Ok(RequirementStatus::Finalized),
            _ => Err(format!(
                "Invalid requirement status: {}. Use draft, feedback, or finalized",
                s
            )),
        }
    }
}

/// Supplier availability reported back on a requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierFeedback {
    /// Free-text availability (e.g. "limited")
    pub availability: String,

    /// Free-text lead time (e.g. "2 weeks")
    pub lead_time: String,
}

/// A requirement for a quantity of material by a delivery date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Unique identifier (REQ-xxx)
    pub id: EntityId,

    /// Material this requirement draws on (MAT-xxx)
    pub material: EntityId,

    /// Required quantity
    pub quantity: u32,

    /// Requested delivery date
    pub delivery_date: NaiveDate,

    /// Most recent procurement feedback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<SupplierFeedback>,

    /// Workflow status
    #[serde(default)]
    pub status: RequirementStatus,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Requirement {
    const KIND: EntityKind = EntityKind::Requirement;

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

impl Requirement {
    /// Create a draft requirement
    pub fn new(material: EntityId, quantity: u32, delivery_date: NaiveDate) -> Self {
        Self {
            id: EntityId::new(EntityKind::Requirement),
            material,
            quantity,
            delivery_date,
            feedback: None,
            status: RequirementStatus::Draft,
            created: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_creation() {
        let material = EntityId::new(EntityKind::Material);
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let req = Requirement::new(material.clone(), 50, date);

        assert!(req.id.to_string().starts_with("REQ-"));
        assert_eq!(req.material, material);
        assert_eq!(req.status, RequirementStatus::Draft);
        assert!(req.feedback.is_none());
    }

    #[test]
    fn test_status_order_is_linear() {
        assert!(RequirementStatus::Draft < RequirementStatus::Feedback);
        assert!(RequirementStatus::Feedback < RequirementStatus::Finalized);
    }

    #[test]
    fn test_requirement_deserialization() {
        let yaml = r#"
id: REQ-01HC2JB7SMQX7RS1Y0GFKBHPTD
material: MAT-01HC2JB7SMQX7RS1Y0GFKBHPTE
quantity: 80
delivery_date: 2025-06-15
feedback:
  availability: limited
  lead_time: 2 weeks
status: feedback
created: 2024-01-15T10:00:00Z
"#;
        let req: Requirement = serde_yml::from_str(yaml).unwrap();
        assert_eq!(req.quantity, 80);
        assert_eq!(req.status, RequirementStatus::Feedback);
        assert_eq!(req.feedback.unwrap().lead_time, "2 weeks");
    }
}
