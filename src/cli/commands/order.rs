//! `mtrack order` command - Customer orders

use clap::{ArgGroup, Subcommand};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_ref, open_engine};
use crate::cli::{output, GlobalOpts};
use crate::core::identity::EntityId;
use crate::entities::CustomerOrder;

#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// Place an order for a material or a widget
    New(NewArgs),

    /// Confirm the customer received an order
    Confirm(IdArgs),

    /// Show an order's completion percentage
    Progress(IdArgs),

    /// Show an order's details
    Show(IdArgs),

    /// List orders
    List,
}

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("item").required(true).multiple(true).args(["material", "widget"])))]
pub struct NewArgs {
    /// Ordered material ID
    #[arg(long, short = 'm')]
    pub material: Option<EntityId>,

    /// Ordered widget ID
    #[arg(long, short = 'w')]
    pub widget: Option<EntityId>,

    /// Customer ID
    #[arg(long)]
    pub customer: String,

    /// Order status, stored verbatim
    #[arg(long, short = 's', default_value = "pending")]
    pub status: String,
}

#[derive(clap::Args, Debug)]
pub struct IdArgs {
    /// Order ID
    pub id: EntityId,
}

pub fn run(cmd: OrderCommands, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    match cmd {
        OrderCommands::New(args) => {
            let order = engine
                .create_order(
                    args.material.as_ref(),
                    args.widget.as_ref(),
                    &args.customer,
                    &args.status,
                )
                .into_diagnostic()?;
            output::changed(&order, "Created", global)
        }
        OrderCommands::Confirm(args) => {
            let order = engine.confirm_receipt(&args.id, true).into_diagnostic()?;
            output::changed(&order, "Confirmed", global)
        }
        OrderCommands::Progress(args) => {
            let progress = engine.order_progress(&args.id).into_diagnostic()?;
            output::value(&progress, global, || {
                println!(
                    "{} {}% [{}]",
                    style(&progress.order_id).cyan(),
                    style(progress.progress_percentage).bold(),
                    style(&progress.status).yellow()
                );
            })
        }
        OrderCommands::Show(args) => {
            let order: CustomerOrder = engine.get(&args.id).into_diagnostic()?;
            output::show(&order, global)
        }
        OrderCommands::List => {
            let orders: Vec<CustomerOrder> = engine.list().into_diagnostic()?;
            output::list(
                &orders,
                &["ID", "MATERIAL", "WIDGET", "CUSTOMER", "STATUS", "PROGRESS"],
                |o| {
                    vec![
                        o.id.to_string(),
                        format_ref(o.material.as_ref()),
                        format_ref(o.widget.as_ref()),
                        o.customer_id.clone(),
                        o.status.to_string(),
                        format!("{}%", o.progress()),
                    ]
                },
                global,
            )
        }
    }
}
