//! `mtrack req` command - Material requirement workflow

use chrono::NaiveDate;
use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_engine;
use crate::cli::{output, GlobalOpts};
use crate::core::identity::EntityId;
use crate::entities::Requirement;

#[derive(Subcommand, Debug)]
pub enum ReqCommands {
    /// Draft a requirement (notifies procurement)
    Submit(SubmitArgs),

    /// Record supplier feedback (notifies engineering)
    Feedback(FeedbackArgs),

    /// Finalize quantity and delivery date (notifies fabrication)
    Finalize(FinalizeArgs),

    /// Show a requirement's details
    Show(ShowArgs),

    /// List requirements
    List,
}

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// Material ID
    #[arg(long, short = 'm')]
    pub material: EntityId,

    /// Required quantity
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    pub quantity: i64,

    /// Requested delivery date (YYYY-MM-DD)
    #[arg(long)]
    pub delivery: NaiveDate,
}

#[derive(clap::Args, Debug)]
pub struct FeedbackArgs {
    /// Requirement ID
    pub id: EntityId,

    /// Supplier availability
    #[arg(long)]
    pub availability: String,

    /// Supplier lead time
    #[arg(long)]
    pub lead_time: String,
}

#[derive(clap::Args, Debug)]
pub struct FinalizeArgs {
    /// Requirement ID
    pub id: EntityId,

    /// Final quantity
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    pub quantity: i64,

    /// Final delivery date (YYYY-MM-DD)
    #[arg(long)]
    pub delivery: NaiveDate,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Requirement ID
    pub id: EntityId,
}

pub fn run(cmd: ReqCommands, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    match cmd {
        ReqCommands::Submit(args) => {
            let req = engine
                .submit_requirement(&args.material, args.quantity, args.delivery)
                .into_diagnostic()?;
            output::changed(&req, "Submitted", global)
        }
        ReqCommands::Feedback(args) => {
            let req = engine
                .provide_feedback(&args.id, &args.availability, &args.lead_time)
                .into_diagnostic()?;
            output::changed(&req, "Recorded feedback on", global)
        }
        ReqCommands::Finalize(args) => {
            let req = engine
                .finalize_requirement(&args.id, args.quantity, args.delivery)
                .into_diagnostic()?;
            output::changed(&req, "Finalized", global)
        }
        ReqCommands::Show(args) => {
            let req: Requirement = engine.get(&args.id).into_diagnostic()?;
            output::show(&req, global)
        }
        ReqCommands::List => {
            let reqs: Vec<Requirement> = engine.list().into_diagnostic()?;
            output::list(
                &reqs,
                &["ID", "MATERIAL", "QTY", "DELIVERY", "STATUS"],
                |r| {
                    vec![
                        r.id.to_string(),
                        r.material.to_string(),
                        r.quantity.to_string(),
                        r.delivery_date.to_string(),
                        r.status.to_string(),
                    ]
                },
                global,
            )
        }
    }
}
