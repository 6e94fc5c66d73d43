//! IREQ entity type - Installation requirement raised by fabrication

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityKind};

/// Material needed on the fabrication floor by a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationRequirement {
    /// Unique identifier (IREQ-xxx)
    pub id: EntityId,

    /// Material to install (MAT-xxx)
    pub material: EntityId,

    /// Quantity needed
    pub quantity: u32,

    /// Planned fabrication date
    pub fabrication_date: NaiveDate,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for InstallationRequirement {
    const KIND: EntityKind = EntityKind::InstallationRequirement;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl InstallationRequirement {
    pub fn new(material: EntityId, quantity: u32, fabrication_date: NaiveDate) -> Self {
        Self {
            id: EntityId::new(EntityKind::InstallationRequirement),
            material,
            quantity,
            fabrication_date,
            created: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installation_requirement_has_no_status() {
        let ireq = InstallationRequirement::new(
            EntityId::new(EntityKind::Material),
            60,
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        );
        assert!(ireq.id.to_string().starts_with("IREQ-"));
        assert!(ireq.status().is_none());

        let json = serde_json::to_value(&ireq).unwrap();
        assert_eq!(json["fabrication_date"], "2025-06-15");
    }
}
