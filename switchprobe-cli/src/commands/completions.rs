//! Shell completion generation.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;
use crate::error::CliError;

/// Name the scripts complete for
const BIN_NAME: &str = "switchprobe";

/// Writes the completion script for `shell` to `out`
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    generate(shell, &mut Cli::command(), BIN_NAME, out);
}

/// Generate shell completions and write to stdout.
pub fn cmd_completions(shell: Shell) -> Result<(), CliError> {
    write_completions(shell, &mut std::io::stdout().lock());
    Ok(())
}
