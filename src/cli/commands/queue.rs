//! `mtrack queue` command - Notification outbox
//!
//! `drain` plays the part of the notification workers: it prints each
//! pending task the way the consuming team would see it, then acknowledges
//! it.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{open_outbox, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum QueueCommands {
    /// List queued tasks
    List(ListArgs),

    /// Deliver and acknowledge every pending task
    Drain,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Include delivered tasks
    #[arg(long)]
    pub all: bool,
}

pub fn run(cmd: QueueCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        QueueCommands::List(args) => run_list(args, global),
        QueueCommands::Drain => run_drain(global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let outbox = open_outbox(global)?;
    let entries = if args.all {
        outbox.all()
    } else {
        outbox.pending()
    }
    .into_diagnostic()?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&entries).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for entry in &entries {
                println!("{}", entry.id);
            }
        }
        OutputFormat::Tsv => {
            println!("ID\tTASK\tMESSAGE\tENQUEUED\tDELIVERED");
            for entry in &entries {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    entry.id,
                    entry.task,
                    entry.message(),
                    entry.enqueued_at.to_rfc3339(),
                    entry
                        .delivered_at
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_default()
                );
            }
        }
        OutputFormat::Auto => {
            if entries.is_empty() {
                if !global.quiet {
                    println!("No queued tasks.");
                }
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(["ID", "TASK", "AUDIENCE", "MESSAGE", "ENQUEUED", "DELIVERED"]);
            for entry in &entries {
                builder.push_record([
                    entry.id.to_string(),
                    entry.task.to_string(),
                    entry.task.audience().to_string(),
                    truncate_str(&entry.message(), 50),
                    entry.enqueued_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    entry
                        .delivered_at
                        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ]);
            }
            println!("{}", builder.build().with(Style::markdown()));
            if !global.quiet {
                println!();
                println!("{} task(s).", style(entries.len()).cyan());
            }
        }
    }
    Ok(())
}

fn run_drain(global: &GlobalOpts) -> Result<()> {
    let outbox = open_outbox(global)?;
    let mut delivered = 0usize;

    for entry in outbox.pending().into_diagnostic()? {
        println!("{}", entry.worker_line());
        if outbox.acknowledge(entry.id).into_diagnostic()? {
            delivered += 1;
            tracing::debug!(id = entry.id, task = %entry.task, "task acknowledged");
        }
    }

    if !global.quiet {
        eprintln!("{} {} task(s) delivered", style("✓").green(), delivered);
    }
    Ok(())
}
