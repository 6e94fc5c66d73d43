//! `mtrack maint` command - Maintenance records

use chrono::NaiveDate;
use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_engine, truncate_str};
use crate::cli::{output, GlobalOpts};
use crate::core::identity::EntityId;
use crate::entities::MaintenanceRecord;

#[derive(Subcommand, Debug)]
pub enum MaintCommands {
    /// Record maintenance on a material
    New(NewArgs),

    /// Change a maintenance record
    Update(UpdateArgs),

    /// Show a maintenance record
    Show(ShowArgs),

    /// List maintenance records
    List,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Material ID
    #[arg(long, short = 'm')]
    pub material: EntityId,

    /// Maintenance date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Observed condition
    #[arg(long)]
    pub condition: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Maintenance record ID
    pub id: EntityId,

    /// New date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// New condition
    #[arg(long)]
    pub condition: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Maintenance record ID
    pub id: EntityId,
}

pub fn run(cmd: MaintCommands, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    match cmd {
        MaintCommands::New(args) => {
            let record = engine
                .create_maintenance(&args.material, args.date, &args.condition)
                .into_diagnostic()?;
            output::changed(&record, "Recorded", global)
        }
        MaintCommands::Update(args) => {
            let record = engine
                .update_maintenance(&args.id, args.date, args.condition.as_deref())
                .into_diagnostic()?;
            output::changed(&record, "Updated", global)
        }
        MaintCommands::Show(args) => {
            let record: MaintenanceRecord = engine.get(&args.id).into_diagnostic()?;
            output::show(&record, global)
        }
        MaintCommands::List => {
            let records: Vec<MaintenanceRecord> = engine.list().into_diagnostic()?;
            output::list(
                &records,
                &["ID", "MATERIAL", "DATE", "CONDITION"],
                |r| {
                    vec![
                        r.id.to_string(),
                        r.material.to_string(),
                        r.date.to_string(),
                        truncate_str(&r.condition, 40),
                    ]
                },
                global,
            )
        }
    }
}
