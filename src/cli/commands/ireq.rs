//! `mtrack ireq` command - Installation requirements

use chrono::NaiveDate;
use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_engine;
use crate::cli::{output, GlobalOpts};
use crate::core::identity::EntityId;
use crate::entities::InstallationRequirement;

#[derive(Subcommand, Debug)]
pub enum IreqCommands {
    /// Submit an installation requirement (notifies the warehouse)
    Submit(SubmitArgs),

    /// Change quantity or fabrication date
    Update(UpdateArgs),

    /// Show an installation requirement
    Show(ShowArgs),

    /// List installation requirements
    List,
}

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// Material ID
    #[arg(long, short = 'm')]
    pub material: EntityId,

    /// Quantity needed
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    pub quantity: i64,

    /// Planned fabrication date (YYYY-MM-DD)
    #[arg(long)]
    pub fab_date: NaiveDate,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Installation requirement ID
    pub id: EntityId,

    /// New quantity
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    pub quantity: Option<i64>,

    /// New fabrication date (YYYY-MM-DD)
    #[arg(long)]
    pub fab_date: Option<NaiveDate>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Installation requirement ID
    pub id: EntityId,
}

pub fn run(cmd: IreqCommands, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    match cmd {
        IreqCommands::Submit(args) => {
            let ireq = engine
                .submit_installation(&args.material, args.quantity, args.fab_date)
                .into_diagnostic()?;
            output::changed(&ireq, "Submitted", global)
        }
        IreqCommands::Update(args) => {
            let ireq = engine
                .update_installation(&args.id, args.quantity, args.fab_date)
                .into_diagnostic()?;
            output::changed(&ireq, "Updated", global)
        }
        IreqCommands::Show(args) => {
            let ireq: InstallationRequirement = engine.get(&args.id).into_diagnostic()?;
            output::show(&ireq, global)
        }
        IreqCommands::List => {
            let ireqs: Vec<InstallationRequirement> = engine.list().into_diagnostic()?;
            output::list(
                &ireqs,
                &["ID", "MATERIAL", "QTY", "FAB DATE"],
                |r| {
                    vec![
                        r.id.to_string(),
                        r.material.to_string(),
                        r.quantity.to_string(),
                        r.fabrication_date.to_string(),
                    ]
                },
                global,
            )
        }
    }
}
