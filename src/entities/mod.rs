//! Entity type definitions
//!
//! mtrack tracks the following record types:
//!
//! **Inbound material:**
//! - [`Material`] - Material lots from arrival through issue
//! - [`Requirement`] - Quantity/date requirements negotiated with procurement
//! - [`InstallationRequirement`] - Fabrication-side material needs
//! - [`MaintenanceRecord`] / [`InventoryRecord`] - Plain log entries
//!
//! **Fabrication and outbound:**
//! - [`Widget`] - Widgets fabricated from a material
//! - [`Inspection`] - Pass/fail inspection of a material or widget
//! - [`Shipment`] - Widget shipments to customers
//! - [`CustomerOrder`] - Customer orders and their progress

pub mod inspection;
pub mod installation;
pub mod inventory;
pub mod maintenance;
pub mod material;
pub mod order;
pub mod requirement;
pub mod shipment;
pub mod widget;

pub use inspection::{Inspection, InspectionResult, InspectionTarget};
pub use installation::InstallationRequirement;
pub use inventory::InventoryRecord;
pub use maintenance::MaintenanceRecord;
pub use material::{Material, MaterialStatus};
pub use order::{progress_percentage, CustomerOrder, OrderProgress, OrderStatus};
pub use requirement::{Requirement, RequirementStatus, SupplierFeedback};
pub use shipment::{Shipment, ShipmentStatus};
pub use widget::{Widget, WidgetStatus};
