//! Command-line front end: argument parsing, engine wiring and output

pub mod args;
pub mod commands;
pub mod helpers;
pub mod output;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
pub use helpers::CliEngine;
