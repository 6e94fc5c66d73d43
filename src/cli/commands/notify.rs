//! `mtrack notify` command - Direct notifications

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_engine;
use crate::cli::{output, GlobalOpts};

#[derive(clap::Args, Debug)]
pub struct NotifyArgs {
    /// Recipient ID
    #[arg(long, short = 'r')]
    pub recipient: String,

    /// Message text
    #[arg(long, short = 'm')]
    pub message: String,
}

pub fn run(args: NotifyArgs, global: &GlobalOpts) -> Result<()> {
    let engine = open_engine(global)?;
    let receipt = engine
        .send_notification(&args.recipient, &args.message)
        .into_diagnostic()?;
    output::value(&receipt, global, || {
        println!(
            "{} Notification {} [{}]",
            style("✓").green(),
            style(&receipt.notification_id).cyan(),
            style(&receipt.status).yellow()
        );
    })
}
