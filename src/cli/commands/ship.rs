//! `mtrack ship` command - Shipments

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_ref, open_engine};
use crate::cli::{output, GlobalOpts};
use crate::core::identity::EntityId;
use crate::entities::Shipment;

#[derive(Subcommand, Debug)]
pub enum ShipCommands {
    /// Ship an inspected widget (notifies shipping)
    Prepare(PrepareArgs),

    /// Confirm delivery (notifies shipping)
    Confirm(ConfirmArgs),

    /// Show a shipment's details
    Show(ShowArgs),

    /// List shipments
    List,
}

#[derive(clap::Args, Debug)]
pub struct PrepareArgs {
    /// Widget ID
    #[arg(long, short = 'w')]
    pub widget: EntityId,

    /// Material ID shipped alongside the widget
    #[arg(long, short = 'm')]
    pub material: Option<EntityId>,

    /// Carrier tracking number
    #[arg(long)]
    pub tracking: String,

    /// Customer ID
    #[arg(long)]
    pub customer: String,
}

#[derive(clap::Args, Debug)]
pub struct ConfirmArgs {
    /// Shipment ID
    pub id: EntityId,

    /// Report the shipment as not delivered (rejected)
    #[arg(long)]
    pub not_delivered: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Shipment ID
    pub id: EntityId,
}

pub fn run(cmd: ShipCommands, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    match cmd {
        ShipCommands::Prepare(args) => {
            let shipment = engine
                .prepare_shipment(
                    &args.widget,
                    args.material.as_ref(),
                    &args.tracking,
                    &args.customer,
                )
                .into_diagnostic()?;
            output::changed(&shipment, "Prepared", global)
        }
        ShipCommands::Confirm(args) => {
            let shipment = engine
                .confirm_delivery(&args.id, !args.not_delivered)
                .into_diagnostic()?;
            output::changed(&shipment, "Confirmed", global)
        }
        ShipCommands::Show(args) => {
            let shipment: Shipment = engine.get(&args.id).into_diagnostic()?;
            output::show(&shipment, global)
        }
        ShipCommands::List => {
            let shipments: Vec<Shipment> = engine.list().into_diagnostic()?;
            output::list(
                &shipments,
                &["ID", "WIDGET", "MATERIAL", "TRACKING", "CUSTOMER", "STATUS"],
                |s| {
                    vec![
                        s.id.to_string(),
                        format_ref(s.widget.as_ref()),
                        format_ref(s.material.as_ref()),
                        s.tracking_id.clone(),
                        s.customer_id.clone(),
                        s.status.to_string(),
                    ]
                },
                global,
            )
        }
    }
}
