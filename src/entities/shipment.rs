//! SHIP entity type - Outbound shipment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{normalize_status, Entity};
use crate::core::identity::{EntityId, EntityKind};

/// Shipment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum ShipmentStatus {
    #[default]
    Prepared,
    Shipped,
    Delivered,
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShipmentStatus::Prepared => write!(f, "prepared"),
            ShipmentStatus::Shipped => write!(f, "shipped"),
            ShipmentStatus::Delivered => write!(f, "delivered"),
        }
    }
}

impl std::str::FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_status(s).as_str() {
            "prepared" => Ok(ShipmentStatus::Prepared),
            "shipped" => Ok(ShipmentStatus::Shipped),
            "delivered" => Ok(ShipmentStatus::Delivered),
            _ => Err(format!(
                "Invalid shipment status: {}. Use prepared, shipped, or delivered",
                s
            )),
        }
    }
}

/// A shipment of a widget (and optionally its material) to a customer.
///
/// `tracking_id` and `customer_id` are fixed at creation; no operation
/// rewrites them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    /// Unique identifier (SHIP-xxx)
    pub id: EntityId,

    /// Shipped material, cleared if the material is deleted
    #[serde(default)]
    pub material: Option<EntityId>,

    /// Shipped widget, cleared if the widget is deleted
    #[serde(default)]
    pub widget: Option<EntityId>,

    /// Carrier tracking number
    pub tracking_id: String,

    /// Receiving customer
    pub customer_id: String,

    /// Workflow status
    #[serde(default)]
    pub status: ShipmentStatus,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Shipment {
    const KIND: EntityKind = EntityKind::Shipment;

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

impl Shipment {
    pub fn new(
        widget: EntityId,
        material: Option<EntityId>,
        tracking_id: String,
        customer_id: String,
        status: ShipmentStatus,
    ) -> Self {
        Self {
            id: EntityId::new(EntityKind::Shipment),
            material,
            widget: Some(widget),
            tracking_id,
            customer_id,
            status,
            created: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipment_references_serialize_as_null_when_cleared() {
        let mut ship = Shipment::new(
            EntityId::new(EntityKind::Widget),
            None,
            "TRK123".to_string(),
            "CUST001".to_string(),
            ShipmentStatus::Shipped,
        );
        ship.widget = None;

        let json = serde_json::to_value(&ship).unwrap();
        assert!(json["widget"].is_null());
        assert!(json["material"].is_null());
        assert_eq!(json["status"], "shipped");
    }
}
