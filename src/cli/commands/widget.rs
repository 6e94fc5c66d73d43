//! `mtrack widget` command - Widgets fabricated from materials

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_engine;
use crate::cli::{output, GlobalOpts};
use crate::core::identity::EntityId;
use crate::entities::{Widget, WidgetStatus};

/// CLI-friendly widget status enum
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliWidgetStatus {
    Fabricated,
    Inspected,
    ReadyForShipping,
    Shipped,
    Flagged,
}

impl From<CliWidgetStatus> for WidgetStatus {
    fn from(cli: CliWidgetStatus) -> Self {
        match cli {
            CliWidgetStatus::Fabricated => WidgetStatus::Fabricated,
            CliWidgetStatus::Inspected => WidgetStatus::Inspected,
            CliWidgetStatus::ReadyForShipping => WidgetStatus::ReadyForShipping,
            CliWidgetStatus::Shipped => WidgetStatus::Shipped,
            CliWidgetStatus::Flagged => WidgetStatus::Flagged,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum WidgetCommands {
    /// Create a widget from a material
    New(NewArgs),

    /// Overwrite a widget's status with any value
    SetStatus(SetStatusArgs),

    /// Show a widget's details
    Show(IdArgs),

    /// List widgets
    List,

    /// Delete a widget (clears references to it)
    Delete(IdArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Source material ID
    #[arg(long, short = 'm')]
    pub material: EntityId,

    /// Initial status (default: fabricated)
    #[arg(long, short = 's')]
    pub status: Option<CliWidgetStatus>,
}

#[derive(clap::Args, Debug)]
pub struct SetStatusArgs {
    /// Widget ID
    pub id: EntityId,

    /// New status, stored verbatim if not a known value
    pub status: String,
}

#[derive(clap::Args, Debug)]
pub struct IdArgs {
    /// Widget ID
    pub id: EntityId,
}

pub fn run(cmd: WidgetCommands, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    match cmd {
        WidgetCommands::New(args) => {
            let widget = engine
                .create_widget(&args.material, args.status.map(WidgetStatus::from))
                .into_diagnostic()?;
            output::changed(&widget, "Created", global)
        }
        WidgetCommands::SetStatus(args) => {
            let widget = engine
                .override_widget_status(&args.id, &args.status)
                .into_diagnostic()?;
            if widget.status.is_unrecognized() && !global.quiet {
                eprintln!(
                    "{} '{}' is not a known widget status; stored as-is",
                    style("!").yellow(),
                    widget.status
                );
            }
            output::changed(&widget, "Updated", global)
        }
        WidgetCommands::Show(args) => {
            let widget: Widget = engine.get(&args.id).into_diagnostic()?;
            output::show(&widget, global)
        }
        WidgetCommands::List => {
            let widgets: Vec<Widget> = engine.list().into_diagnostic()?;
            output::list(
                &widgets,
                &["ID", "MATERIAL", "STATUS", "CREATED"],
                |w| {
                    vec![
                        w.id.to_string(),
                        w.material.to_string(),
                        w.status.to_string(),
                        w.created.format("%Y-%m-%d %H:%M").to_string(),
                    ]
                },
                global,
            )
        }
        WidgetCommands::Delete(args) => {
            let report = engine.delete_widget(&args.id).into_diagnostic()?;
            output::value(&report, global, || {
                println!(
                    "{} Deleted widget {} ({} reference(s) cleared)",
                    style("✓").green(),
                    style(&args.id).cyan(),
                    report.detached.len()
                );
            })
        }
    }
}
