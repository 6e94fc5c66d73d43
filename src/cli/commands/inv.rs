//! `mtrack inv` command - Inventory records

use chrono::NaiveDate;
use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_engine;
use crate::cli::{output, GlobalOpts};
use crate::core::identity::EntityId;
use crate::entities::InventoryRecord;

#[derive(Subcommand, Debug)]
pub enum InvCommands {
    /// Record an inventory check
    New(NewArgs),

    /// Change an inventory record
    Update(UpdateArgs),

    /// Show an inventory record
    Show(ShowArgs),

    /// List inventory records
    List,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Material ID
    #[arg(long, short = 'm')]
    pub material: EntityId,

    /// Where the material is
    #[arg(long, short = 'l')]
    pub location: String,

    /// Date of the check (YYYY-MM-DD)
    #[arg(long)]
    pub last_checked: Option<NaiveDate>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Inventory record ID
    pub id: EntityId,

    /// New location
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// New check date (YYYY-MM-DD)
    #[arg(long)]
    pub last_checked: Option<NaiveDate>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Inventory record ID
    pub id: EntityId,
}

pub fn run(cmd: InvCommands, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    match cmd {
        InvCommands::New(args) => {
            let record = engine
                .create_inventory(&args.material, &args.location, args.last_checked)
                .into_diagnostic()?;
            output::changed(&record, "Recorded", global)
        }
        InvCommands::Update(args) => {
            let record = engine
                .update_inventory(&args.id, args.location.as_deref(), args.last_checked)
                .into_diagnostic()?;
            output::changed(&record, "Updated", global)
        }
        InvCommands::Show(args) => {
            let record: InventoryRecord = engine.get(&args.id).into_diagnostic()?;
            output::show(&record, global)
        }
        InvCommands::List => {
            let records: Vec<InventoryRecord> = engine.list().into_diagnostic()?;
            output::list(
                &records,
                &["ID", "MATERIAL", "LOCATION", "LAST CHECKED"],
                |r| {
                    vec![
                        r.id.to_string(),
                        r.material.to_string(),
                        r.location.clone(),
                        r.last_checked.to_string(),
                    ]
                },
                global,
            )
        }
    }
}
