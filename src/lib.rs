//! mtrack: material tracking workflow engine
//!
//! Tracks materials through arrival, inspection, storage, issue,
//! fabrication into widgets, shipment and customer-order fulfillment, and
//! notifies downstream teams as each transition commits.

pub mod cli;
pub mod core;
pub mod entities;
pub mod workflow;
