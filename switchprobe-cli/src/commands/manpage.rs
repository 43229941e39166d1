//! Man page generation via `clap_mangen`.

use std::io::Write;

use clap::CommandFactory;

use crate::cli::Cli;
use crate::error::CliError;

/// Manual the page is filed under
const MANUAL: &str = "Monitoring Plugins";

/// Renders the section 1 man page to `out`
pub fn write_manpage(out: &mut dyn Write) -> std::io::Result<()> {
    clap_mangen::Man::new(Cli::command())
        .section("1")
        .manual(MANUAL)
        .render(out)
}

/// Generate a man page for the plugin and write it to stdout.
pub fn cmd_manpage() -> Result<(), CliError> {
    write_manpage(&mut std::io::stdout().lock())?;
    Ok(())
}
