//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, insp::InspCommands,
    inv::InvCommands, ireq::IreqCommands, maint::MaintCommands, mat::MatCommands,
    notify::NotifyArgs, order::OrderCommands, queue::QueueCommands, req::ReqCommands,
    ship::ShipCommands, widget::WidgetCommands,
};

#[derive(Parser)]
#[command(name = "mtrack")]
#[command(author, version, about = "Material tracking workflow engine")]
#[command(long_about = "Tracks materials from arrival through inspection, storage, issue, fabrication into widgets, shipment and customer-order fulfillment, notifying downstream teams as state changes.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose (debug) logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// SQLite database (default: from config, then the platform data dir)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Material arrival, storage, issue and demand reports
    #[command(subcommand)]
    Mat(MatCommands),

    /// Material requirements (draft, feedback, finalize)
    #[command(subcommand)]
    Req(ReqCommands),

    /// Installation requirements from fabrication
    #[command(subcommand)]
    Ireq(IreqCommands),

    /// Widgets fabricated from materials
    #[command(subcommand)]
    Widget(WidgetCommands),

    /// Shipments of widgets to customers
    #[command(subcommand)]
    Ship(ShipCommands),

    /// Inspections of materials and widgets
    #[command(subcommand)]
    Insp(InspCommands),

    /// Customer orders and progress
    #[command(subcommand)]
    Order(OrderCommands),

    /// Maintenance records
    #[command(subcommand)]
    Maint(MaintCommands),

    /// Inventory records
    #[command(subcommand)]
    Inv(InvCommands),

    /// Send a direct notification
    Notify(NotifyArgs),

    /// Inspect and drain the notification outbox
    #[command(subcommand)]
    Queue(QueueCommands),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, table for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// Just IDs, one per line
    Id,
}
