//! MAT entity type - Material lot received into the facility

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{normalize_status, Entity};
use crate::core::identity::{EntityId, EntityKind};
use crate::entities::inspection::InspectionResult;

/// Material status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum MaterialStatus {
    #[default]
    Received,
    Inspected,
    Stored,
    Issued,
    Shipped,
    /// Failed inspection; reachable only through an inspection
    Flagged,
}

impl MaterialStatus {
    /// Status a material takes after an inspection with `result`
    pub fn after_inspection(result: InspectionResult) -> Self {
        match result {
            InspectionResult::Pass => MaterialStatus::Stored,
            InspectionResult::Fail => MaterialStatus::Flagged,
        }
    }
}

impl std::fmt::Display for MaterialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialStatus::Received => write!(f, "received"),
            MaterialStatus::Inspected => write!(f, "inspected"),
            MaterialStatus::Stored => write!(f, "stored"),
            MaterialStatus::Issued => write!(f, "issued"),
            MaterialStatus::Shipped => write!(f, "shipped"),
            MaterialStatus::Flagged => write!(f, "flagged"),
        }
    }
}

impl std::str::FromStr for MaterialStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_status(s).as_str() {
            "received" => Ok(MaterialStatus::Received),
            "inspected" => Ok(MaterialStatus::Inspected),
            "stored" => Ok(MaterialStatus::Stored),
            "issued" => Ok(MaterialStatus::Issued),
            "shipped" => Ok(MaterialStatus::Shipped),
            "flagged" => Ok(MaterialStatus::Flagged),
            _ => Err(format!(
                "Invalid material status: {}. Use received, inspected, stored, issued, shipped, or flagged",
                s
            )),
        }
    }
}

/// A lot of raw material tracked from arrival to issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique identifier (MAT-xxx)
    pub id: EntityId,

    /// Material type (e.g. "steel", "aluminum")
    #[serde(rename = "type")]
    pub material_type: String,

    /// Units on hand
    pub quantity: u32,

    /// Storage location from the last store operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Workflow status
    #[serde(default)]
    pub status: MaterialStatus,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Material {
    const KIND: EntityKind = EntityKind::Material;

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

impl Material {
    /// Create a newly received material
    pub fn new(material_type: String, quantity: u32) -> Self {
        Self {
            id: EntityId::new(EntityKind::Material),
            material_type,
            quantity,
            location: None,
            status: MaterialStatus::Received,
            created: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_creation() {
        let mat = Material::new("steel".to_string(), 100);
        assert!(mat.id.to_string().starts_with("MAT-"));
        assert_eq!(mat.status, MaterialStatus::Received);
        assert_eq!(mat.quantity, 100);
        assert!(mat.location.is_none());
    }

    #[test]
    fn test_material_status_parsing() {
        assert_eq!(
            "Received".parse::<MaterialStatus>().unwrap(),
            MaterialStatus::Received
        );
        assert_eq!(
            "FLAGGED".parse::<MaterialStatus>().unwrap(),
            MaterialStatus::Flagged
        );
        assert!("lost".parse::<MaterialStatus>().is_err());
    }

    #[test]
    fn test_after_inspection() {
        assert_eq!(
            MaterialStatus::after_inspection(InspectionResult::Pass),
            MaterialStatus::Stored
        );
        assert_eq!(
            MaterialStatus::after_inspection(InspectionResult::Fail),
            MaterialStatus::Flagged
        );
    }

    #[test]
    fn test_material_serializes_type_field() {
        let mat = Material::new("aluminum".to_string(), 200);
        let json = serde_json::to_value(&mat).unwrap();
        assert_eq!(json["type"], "aluminum");
        assert_eq!(json["status"], "received");
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_material_deserialization() {
        let yaml = r#"
id: MAT-01HC2JB7SMQX7RS1Y0GFKBHPTD
type: steel
quantity: 100
location: Aisle 5
status: stored
created: 2024-01-15T10:00:00Z
"#;
        let mat: Material = serde_yml::from_str(yaml).unwrap();
        assert_eq!(mat.material_type, "steel");
        assert_eq!(mat.location.as_deref(), Some("Aisle 5"));
        assert_eq!(mat.status, MaterialStatus::Stored);
    }
}
