//! Command handler modules for the CLI.

mod check;
mod completions;
mod manpage;

use switchprobe_core::{CheckKind, FinalReport};

use crate::cli::{Commands, ProbeOptions};
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
///
/// Checks return the report to print; utility commands write their own output
/// and return `None`.
pub fn dispatch(options: &ProbeOptions, command: Commands) -> Result<Option<FinalReport>, CliError> {
    match command {
        Commands::Cpu(thresholds) => check::cmd_check(options, CheckKind::Cpu, &thresholds).map(Some),
        Commands::Memory(thresholds) => {
            check::cmd_check(options, CheckKind::Memory, &thresholds).map(Some)
        }
        Commands::Sensor => {
            check::cmd_check(options, CheckKind::Sensor, &Default::default()).map(Some)
        }
        Commands::Completions { shell } => completions::cmd_completions(shell).map(|()| None),
        Commands::Manpage => manpage::cmd_manpage().map(|()| None),
    }
}
