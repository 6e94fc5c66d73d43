//! `mtrack mat` command - Material arrival, storage, issue and reports

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_engine;
use crate::cli::{output, GlobalOpts, OutputFormat};
use crate::core::identity::EntityId;
use crate::entities::{Material, MaterialStatus};

/// CLI-friendly material status enum
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliMaterialStatus {
    Received,
    Inspected,
    Stored,
    Issued,
    Shipped,
    Flagged,
}

impl From<CliMaterialStatus> for MaterialStatus {
    fn from(cli: CliMaterialStatus) -> Self {
        match cli {
            CliMaterialStatus::Received => MaterialStatus::Received,
            CliMaterialStatus::Inspected => MaterialStatus::Inspected,
            CliMaterialStatus::Stored => MaterialStatus::Stored,
            CliMaterialStatus::Issued => MaterialStatus::Issued,
            CliMaterialStatus::Shipped => MaterialStatus::Shipped,
            CliMaterialStatus::Flagged => MaterialStatus::Flagged,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum MatCommands {
    /// Record a material arrival (notifies the warehouse)
    Arrive(ArriveArgs),

    /// Put a material in storage
    Store(StoreArgs),

    /// Issue material to fabrication (notifies fabrication)
    Issue(IssueArgs),

    /// Show a material's details
    Show(ShowArgs),

    /// List materials
    List(ListArgs),

    /// Delete a material and its dependent records
    Delete(ShowArgs),

    /// Request a demand report for a date range
    Report(ReportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ArriveArgs {
    /// Material type (e.g. steel)
    #[arg(long = "type", short = 't')]
    pub material_type: String,

    /// Quantity received
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    pub quantity: i64,
}

#[derive(clap::Args, Debug)]
pub struct StoreArgs {
    /// Material ID
    pub id: EntityId,

    /// Storage location
    #[arg(long, short = 'l')]
    pub location: String,
}

#[derive(clap::Args, Debug)]
pub struct IssueArgs {
    /// Material ID
    pub id: EntityId,

    /// Quantity to issue
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    pub quantity: i64,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Material ID
    pub id: EntityId,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's')]
    pub status: Option<CliMaterialStatus>,
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

/// Run a material subcommand
pub fn run(cmd: MatCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MatCommands::Arrive(args) => run_arrive(args, global),
        MatCommands::Store(args) => run_store(args, global),
        MatCommands::Issue(args) => run_issue(args, global),
        MatCommands::Show(args) => run_show(args, global),
        MatCommands::List(args) => run_list(args, global),
        MatCommands::Delete(args) => run_delete(args, global),
        MatCommands::Report(args) => run_report(args, global),
    }
}

fn run_arrive(args: ArriveArgs, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    let material = engine
        .record_arrival(&args.material_type, args.quantity)
        .into_diagnostic()?;
    output::changed(&material, "Received", global)
}

fn run_store(args: StoreArgs, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    let material = engine
        .store_material(&args.id, &args.location)
        .into_diagnostic()?;
    output::changed(&material, "Stored", global)
}

fn run_issue(args: IssueArgs, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    let material = engine
        .issue_material(&args.id, args.quantity)
        .into_diagnostic()?;
    output::changed(&material, "Issued", global)?;
    if !global.quiet && global.format == OutputFormat::Auto {
        println!("   {} remaining", style(material.quantity).yellow());
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    let material: Material = engine.get(&args.id).into_diagnostic()?;
    output::show(&material, global)
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    let filter = args.status.map(MaterialStatus::from);
    let materials = engine
        .find(|m: &Material| filter.map_or(true, |s| m.status == s))
        .into_diagnostic()?;

    output::list(
        &materials,
        &["ID", "TYPE", "QTY", "LOCATION", "STATUS", "CREATED"],
        |m| {
            vec![
                m.id.to_string(),
                m.material_type.clone(),
                m.quantity.to_string(),
                m.location.clone().unwrap_or_else(|| "-".to_string()),
                m.status.to_string(),
                m.created.format("%Y-%m-%d %H:%M").to_string(),
            ]
        },
        global,
    )
}

fn run_delete(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    let report = engine.delete_material(&args.id).into_diagnostic()?;
    output::value(&report, global, || {
        println!(
            "{} Deleted material {} ({} record(s) removed, {} detached)",
            style("✓").green(),
            style(&args.id).cyan(),
            report.deleted.len(),
            report.detached.len()
        );
    })
}

fn run_report(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    let request = engine
        .request_demand_report(args.start, args.end)
        .into_diagnostic()?;
    output::value(&request, global, || {
        println!(
            "{} Report {} is {} ({} to {})",
            style("✓").green(),
            style(&request.report_id).cyan(),
            style(&request.status).yellow(),
            request.start_date,
            request.end_date
        );
    })
}
