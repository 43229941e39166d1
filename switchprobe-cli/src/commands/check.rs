//! The `cpu`, `memory` and `sensor` check commands.

use switchprobe_core::{CheckKind, FinalReport, probe};

use crate::cli::{ProbeOptions, ThresholdArgs};
use crate::error::CliError;
use crate::util::{connector, load_settings, session_params};

/// Runs one check and returns its report.
///
/// Only a broken settings file fails here; every failure inside the probe is
/// already part of the returned report.
pub fn cmd_check(
    options: &ProbeOptions,
    kind: CheckKind,
    thresholds: &ThresholdArgs,
) -> Result<FinalReport, CliError> {
    let settings = load_settings(options.config.as_deref())?;
    let params = session_params(options, &settings.connection);
    let connector = connector(options.replay.as_deref(), settings.transport);

    tracing::debug!(check = %kind, host = %params.host, "Running check");
    Ok(probe(
        kind,
        thresholds.warning.as_deref(),
        thresholds.critical.as_deref(),
        &params,
        connector.as_ref(),
    ))
}
