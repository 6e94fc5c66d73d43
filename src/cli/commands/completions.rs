//! `mtrack completions` - shell completion scripts
//!
//! `source <(mtrack completions bash)` in `~/.bashrc`, or write
//! `mtrack completions fish` into fish's completions directory.

use clap::CommandFactory;
use clap_complete::Shell;
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};

use crate::cli::Cli;

const BIN_NAME: &str = "mtrack";

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Render the completion script for `shell` into `out`
pub fn write_completions<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_completions(args.shell, &mut lock);
    lock.flush().into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_covers_subcommands() {
        let mut buf = Vec::new();
        write_completions(Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains(BIN_NAME));
        for sub in ["mat", "widget", "queue", "notify"] {
            assert!(script.contains(sub), "missing {}", sub);
        }
    }
}
