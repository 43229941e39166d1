//! `switchprobe` - monitoring plugin for HP ProCurve switches
//!
//! Queries CPU load, memory allocation or sensor states over SNMP and prints a
//! single plugin-format status line. The exit code carries the severity.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use clap::error::ErrorKind;
use cli::Cli;
use error::CliError;
use switchprobe_core::tracing::{TracingConfig, TracingLevel, TracingOutput, init_tracing};

fn init_logging(cli: &Cli) {
    let output = cli
        .log_file
        .clone()
        .map_or(TracingOutput::Stderr, |path| TracingOutput::File { path });
    let config = TracingConfig::new()
        .with_level(TracingLevel::from_verbosity(cli.verbose))
        .with_output(output)
        .with_env_override();

    if let Err(e) = init_tracing(&config) {
        eprintln!("Warning: {e}");
    }
}

/// Prints the error as the report line and returns its exit code
fn fail(err: CliError) -> i32 {
    let code = err.exit_code();
    println!("{}", err.into_report().line);
    code
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => std::process::exit(fail(CliError::from(e))),
    };

    init_logging(&cli);

    let code = match commands::dispatch(&cli.options, cli.command) {
        Ok(Some(report)) => {
            println!("{}", report.line);
            report.exit_code()
        }
        Ok(None) => 0,
        Err(e) => fail(e),
    };

    std::process::exit(code);
}
