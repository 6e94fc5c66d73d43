//! Entity identity system using kind-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// The nine persisted record kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Raw material lot
    Material,
    /// Engineering requirement against a material
    Requirement,
    /// Fabrication-side installation requirement
    InstallationRequirement,
    /// Fabricated widget
    Widget,
    /// Outbound shipment
    Shipment,
    /// Inspection of a material or widget
    Inspection,
    /// Customer order
    CustomerOrder,
    /// Maintenance log entry
    MaintenanceRecord,
    /// Inventory location check
    InventoryRecord,
}

impl EntityKind {
    /// Get the id prefix for this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Material => "MAT",
            EntityKind::Requirement => "REQ",
            EntityKind::InstallationRequirement => "IREQ",
            EntityKind::Widget => "WDG",
            EntityKind::Shipment => "SHIP",
            EntityKind::Inspection => "INSP",
            EntityKind::CustomerOrder => "ORD",
            EntityKind::MaintenanceRecord => "MNT",
            EntityKind::InventoryRecord => "INV",
        }
    }

    /// Human-readable name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Material => "material",
            EntityKind::Requirement => "requirement",
            EntityKind::InstallationRequirement => "installation requirement",
            EntityKind::Widget => "widget",
            EntityKind::Shipment => "shipment",
            EntityKind::Inspection => "inspection",
            EntityKind::CustomerOrder => "customer order",
            EntityKind::MaintenanceRecord => "maintenance record",
            EntityKind::InventoryRecord => "inventory record",
        }
    }

    /// Get all kinds
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Material,
            EntityKind::Requirement,
            EntityKind::InstallationRequirement,
            EntityKind::Widget,
            EntityKind::Shipment,
            EntityKind::Inspection,
            EntityKind::CustomerOrder,
            EntityKind::MaintenanceRecord,
            EntityKind::InventoryRecord,
        ]
    }

    /// Look up a kind from its id prefix
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let upper = prefix.to_uppercase();
        Self::all().iter().copied().find(|k| k.prefix() == upper)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A unique entity identifier combining a kind prefix and ULID
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    kind: EntityKind,
    ulid: Ulid,
}

impl EntityId {
    /// Create a new EntityId for the given kind
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            ulid: Ulid::new(),
        }
    }

    /// Create an EntityId from a kind and existing ULID
    pub fn from_parts(kind: EntityKind, ulid: Ulid) -> Self {
        Self { kind, ulid }
    }

    /// Get the entity kind
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Get the ULID component
    pub fn ulid(&self) -> Ulid {
        self.ulid
    }

    /// Parse an EntityId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.prefix(), self.ulid)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let kind = EntityKind::from_prefix(prefix_str)
            .ok_or_else(|| IdParseError::InvalidPrefix(prefix_str.to_string()))?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { kind, ulid })
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing entity IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid entity prefix: '{0}' (valid: MAT, REQ, IREQ, WDG, SHIP, INSP, ORD, MNT, INV)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in entity ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}
