//! `mtrack config` command - Configuration inspection

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::helpers::load_config;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::{Config, DispatcherKind, LogFormat, LOCAL_CONFIG_FILE};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Show paths to configuration files
    Path,
}

/// Fully resolved configuration
#[derive(Debug, Serialize)]
struct Effective {
    database: PathBuf,
    log_level: String,
    log_format: LogFormat,
    dispatcher: DispatcherKind,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(global),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let effective = Effective {
        database: config.database().into_diagnostic()?,
        log_level: config.log_level().to_string(),
        log_format: config.log_format(),
        dispatcher: config.dispatcher(),
    };

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&effective).into_diagnostic()?);
        }
        _ => {
            print!("{}", serde_yml::to_string(&effective).into_diagnostic()?);
        }
    }
    Ok(())
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    let global_path = Config::global_config_path();

    if global.quiet {
        if let Some(path) = global_path {
            println!("{}", path.display());
        }
        return Ok(());
    }

    match global_path {
        Some(path) => {
            let marker = if path.exists() {
                style("(exists)").green()
            } else {
                style("(not found)").dim()
            };
            println!("{}: {} {}", style("Global").bold(), path.display(), marker);
        }
        None => println!("{}: {}", style("Global").bold(), style("unavailable").dim()),
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    let marker = if local.exists() {
        style("(exists)").green()
    } else {
        style("(not found)").dim()
    };
    println!("{}: {} {}", style("Local").bold(), local.display(), marker);
    Ok(())
}
