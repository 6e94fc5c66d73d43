//! INV entity type - Inventory location check for a material

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Unique identifier (INV-xxx)
    pub id: EntityId,

    /// Counted material (MAT-xxx)
    pub material: EntityId,

    /// Where the material was found
    pub location: String,

    /// Date of the last physical check
    pub last_checked: NaiveDate,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for InventoryRecord {
    const KIND: EntityKind = EntityKind::InventoryRecord;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl InventoryRecord {
    pub fn new(material: EntityId, location: String, last_checked: NaiveDate) -> Self {
        Self {
            id: EntityId::new(EntityKind::InventoryRecord),
            material,
            location,
            last_checked,
            created: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_record_yaml() {
        let yaml = r#"
id: INV-01HC2JB7SMQX7RS1Y0GFKBHPTD
material: MAT-01HC2JB7SMQX7RS1Y0GFKBHPTE
location: Bay 3
last_checked: 2025-03-01
created: 2025-03-01T08:00:00Z
"#;
        let inv: InventoryRecord = serde_yml::from_str(yaml).unwrap();
        assert_eq!(inv.location, "Bay 3");
        assert_eq!(inv.last_checked, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }
}
