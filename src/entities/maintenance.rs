//! MNT entity type - Maintenance log entry for a material

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// Unique identifier (MNT-xxx)
    pub id: EntityId,

    /// Maintained material (MAT-xxx)
    pub material: EntityId,

    /// Date the maintenance was performed
    pub date: NaiveDate,

    /// Observed condition
    pub condition: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for MaintenanceRecord {
    const KIND: EntityKind = EntityKind::MaintenanceRecord;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl MaintenanceRecord {
    pub fn new(material: EntityId, date: NaiveDate, condition: String) -> Self {
        Self {
            id: EntityId::new(EntityKind::MaintenanceRecord),
            material,
            date,
            condition,
            created: Utc::now(),
        }
    }
}
