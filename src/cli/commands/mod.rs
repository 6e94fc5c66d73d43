//! CLI command implementations

pub mod completions;
pub mod config;
pub mod insp;
pub mod inv;
pub mod ireq;
pub mod maint;
pub mod mat;
pub mod notify;
pub mod order;
pub mod queue;
pub mod req;
pub mod ship;
pub mod widget;
