//! ORD entity type - Customer order and its progress calculation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{normalize_status, Entity, Status};
use crate::core::identity::{EntityId, EntityKind};

/// Customer order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Received,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Received => write!(f, "received"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_status(s).as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "shipped" => Ok(OrderStatus::Shipped),
            "received" => Ok(OrderStatus::Received),
            _ => Err(format!(
                "Invalid order status: {}. Use pending, shipped, or received",
                s
            )),
        }
    }
}

/// Completion percentage for an order status: shipped 75, received 100,
/// anything else (including raw values) 50
pub fn progress_percentage(status: &Status<OrderStatus>) -> u8 {
    match status.known() {
        Some(OrderStatus::Shipped) => 75,
        Some(OrderStatus::Received) => 100,
        _ => 50,
    }
}

/// A customer's order for a widget or a material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerOrder {
    /// Unique identifier (ORD-xxx)
    pub id: EntityId,

    /// Ordered material, if any
    #[serde(default)]
    pub material: Option<EntityId>,

    /// Ordered widget, if any
    #[serde(default)]
    pub widget: Option<EntityId>,

    /// Ordering customer
    pub customer_id: String,

    /// Status as supplied by the caller or set by receipt confirmation
    #[serde(default)]
    pub status: Status<OrderStatus>,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for CustomerOrder {
    const KIND: EntityKind = EntityKind::CustomerOrder;

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

impl CustomerOrder {
    pub fn new(
        material: Option<EntityId>,
        widget: Option<EntityId>,
        customer_id: String,
        status: Status<OrderStatus>,
    ) -> Self {
        Self {
            id: EntityId::new(EntityKind::CustomerOrder),
            material,
            widget,
            customer_id,
            status,
            created: Utc::now(),
        }
    }

    pub fn progress(&self) -> u8 {
        progress_percentage(&self.status)
    }
}

/// Result of an order progress query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderProgress {
    pub order_id: EntityId,
    pub progress_percentage: u8,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_mapping() {
        assert_eq!(progress_percentage(&OrderStatus::Shipped.into()), 75);
        assert_eq!(progress_percentage(&OrderStatus::Received.into()), 100);
        assert_eq!(progress_percentage(&OrderStatus::Pending.into()), 50);
        assert_eq!(progress_percentage(&Status::Raw("On Hold".to_string())), 50);
    }

    #[test]
    fn test_verbatim_status_parses_known_spellings() {
        let shipped = Status::<OrderStatus>::verbatim("Shipped");
        assert_eq!(shipped.known(), Some(OrderStatus::Shipped));
        assert_eq!(shipped.to_string(), "Shipped");
        assert!(Status::<OrderStatus>::verbatim("Backordered").is_unrecognized());
    }
}
