//! `mtrack insp` command - Inspections

use clap::{ArgGroup, Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_ref, open_engine, truncate_str};
use crate::cli::{output, GlobalOpts};
use crate::core::identity::EntityId;
use crate::entities::{Inspection, InspectionResult};

/// CLI-friendly inspection result
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliInspectionResult {
    Pass,
    Fail,
}

impl From<CliInspectionResult> for InspectionResult {
    fn from(cli: CliInspectionResult) -> Self {
        match cli {
            CliInspectionResult::Pass => InspectionResult::Pass,
            CliInspectionResult::Fail => InspectionResult::Fail,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum InspCommands {
    /// Record an inspection of a material or a widget
    New(NewArgs),

    /// Report defects to the owning team
    Flag(FlagArgs),

    /// Show an inspection's details
    Show(ShowArgs),

    /// List inspections
    List,
}

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).multiple(true).args(["material", "widget"])))]
pub struct NewArgs {
    /// Inspected material ID
    #[arg(long, short = 'm')]
    pub material: Option<EntityId>,

    /// Inspected widget ID
    #[arg(long, short = 'w')]
    pub widget: Option<EntityId>,

    /// Inspection outcome
    #[arg(long, short = 'r')]
    pub result: CliInspectionResult,

    /// Defect notes
    #[arg(long, short = 'd', default_value = "")]
    pub defects: String,
}

#[derive(clap::Args, Debug)]
pub struct FlagArgs {
    /// Inspection ID
    pub id: EntityId,

    /// Defects found
    #[arg(long, short = 'd')]
    pub defects: String,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Inspection ID
    pub id: EntityId,
}

pub fn run(cmd: InspCommands, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    match cmd {
        InspCommands::New(args) => {
            let inspection = engine
                .create_inspection(
                    args.material.as_ref(),
                    args.widget.as_ref(),
                    args.result.into(),
                    &args.defects,
                )
                .into_diagnostic()?;
            output::changed(&inspection, "Recorded", global)
        }
        InspCommands::Flag(args) => {
            let outcome = engine
                .flag_inspection(&args.id, &args.defects)
                .into_diagnostic()?;
            output::value(&outcome, global, || {
                println!(
                    "{} Flagged inspection {} [{}]",
                    style("✓").green(),
                    style(&outcome.inspection_id).cyan(),
                    style(&outcome.status).yellow()
                );
            })
        }
        InspCommands::Show(args) => {
            let inspection: Inspection = engine.get(&args.id).into_diagnostic()?;
            output::show(&inspection, global)
        }
        InspCommands::List => {
            let inspections: Vec<Inspection> = engine.list().into_diagnostic()?;
            output::list(
                &inspections,
                &["ID", "MATERIAL", "WIDGET", "RESULT", "DEFECTS"],
                |i| {
                    vec![
                        i.id.to_string(),
                        format_ref(i.material.as_ref()),
                        format_ref(i.widget.as_ref()),
                        i.result.to_string(),
                        truncate_str(&i.defects, 30),
                    ]
                },
                global,
            )
        }
    }
}
