//! Output rendering for command results
//!
//! `show` prints one record (YAML by default), `list` prints a table, and
//! mutating commands print a one-line confirmation unless a machine format
//! was requested.

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Entity;

/// Print a single serializable value in a machine format
fn print_value<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            let yaml = serde_yml::to_string(value).into_diagnostic()?;
            print!("{}", yaml);
        }
    }
    Ok(())
}

/// Print one record for `show`
pub fn show<R: Entity>(record: &R, global: &GlobalOpts) -> Result<()> {
    match global.format {
        OutputFormat::Id => {
            println!("{}", record.id());
            Ok(())
        }
        OutputFormat::Json => print_value(record, OutputFormat::Json),
        OutputFormat::Auto | OutputFormat::Yaml | OutputFormat::Tsv => {
            print_value(record, OutputFormat::Yaml)
        }
    }
}

/// Report the result of a mutating command
pub fn changed<R: Entity>(record: &R, verb: &str, global: &GlobalOpts) -> Result<()> {
    match global.format {
        OutputFormat::Id => {
            println!("{}", record.id());
            Ok(())
        }
        OutputFormat::Json => print_value(record, OutputFormat::Json),
        OutputFormat::Yaml => print_value(record, OutputFormat::Yaml),
        OutputFormat::Auto | OutputFormat::Tsv => {
            if global.quiet {
                println!("{}", record.id());
                return Ok(());
            }
            let kind = R::KIND.label();
            match record.status() {
                Some(status) => println!(
                    "{} {} {} {} [{}]",
                    style("✓").green(),
                    verb,
                    kind,
                    style(record.id()).cyan(),
                    style(status).yellow()
                ),
                None => println!(
                    "{} {} {} {}",
                    style("✓").green(),
                    verb,
                    kind,
                    style(record.id()).cyan()
                ),
            }
            Ok(())
        }
    }
}

/// Print a non-record result (progress, receipts, delete reports)
pub fn value<T: Serialize, F: FnOnce()>(value: &T, global: &GlobalOpts, human: F) -> Result<()> {
    match global.format {
        OutputFormat::Json => print_value(value, OutputFormat::Json),
        OutputFormat::Yaml => print_value(value, OutputFormat::Yaml),
        _ => {
            human();
            Ok(())
        }
    }
}

/// Print records for `list`.
///
/// `row` renders the cells for one record in the order of `headers`.
pub fn list<R, F>(records: &[R], headers: &[&str], row: F, global: &GlobalOpts) -> Result<()>
where
    R: Entity,
    F: Fn(&R) -> Vec<String>,
{
    match global.format {
        OutputFormat::Json => print_value(records, OutputFormat::Json),
        OutputFormat::Yaml => print_value(records, OutputFormat::Yaml),
        OutputFormat::Id => {
            for record in records {
                println!("{}", record.id());
            }
            Ok(())
        }
        OutputFormat::Tsv => {
            println!("{}", headers.join("\t"));
            for record in records {
                println!("{}", row(record).join("\t"));
            }
            Ok(())
        }
        OutputFormat::Auto => {
            if records.is_empty() {
                if !global.quiet {
                    println!("No {} records found.", R::KIND.label());
                }
                return Ok(());
            }

            let mut builder = Builder::default();
            builder.push_record(headers.iter().copied());
            for record in records {
                builder.push_record(row(record));
            }
            println!("{}", builder.build().with(Style::markdown()));

            if !global.quiet {
                println!();
                println!(
                    "{} {} record(s) found.",
                    style(records.len()).cyan(),
                    R::KIND.label()
                );
            }
            Ok(())
        }
    }
}
