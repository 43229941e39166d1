//! Switch health checks
//!
//! Each check reads a handful of HP ProCurve values through a
//! [`MetricSource`] and turns them into verdicts. [`Check::prepare`] parses
//! threshold flags before any I/O; [`run`] negotiates the session, opens it,
//! and executes the check. Failures are returned to the caller, which records
//! them on the report so partial results survive.

mod cpu;
mod memory;
mod sensor;

use std::fmt;
use std::str::FromStr;

use crate::error::ProbeResult;
use crate::evaluator::Thresholds;
use crate::report::{FinalReport, Report};
use crate::session::{SessionNegotiator, SessionParams};
use crate::source::{Connector, MetricSource};
use crate::tracing::span_names;

pub use cpu::CPU_LOAD_OID;
pub use memory::{MEMORY_ALLOC_OID, MEMORY_FREE_OID, MEMORY_TOTAL_OID};
pub use sensor::{SENSOR_DESCRIPTION_OID, SENSOR_STATUS_OID};

/// Available checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// CPU load percentage
    Cpu,
    /// Memory allocation percentage
    Memory,
    /// Fan, power supply and temperature sensor states
    Sensor,
}

impl CheckKind {
    /// All checks
    pub const ALL: [Self; 3] = [Self::Cpu, Self::Memory, Self::Sensor];

    /// Subcommand name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Sensor => "sensor",
        }
    }

    /// Returns true if the check classifies a value against thresholds
    #[must_use]
    pub const fn needs_thresholds(self) -> bool {
        matches!(self, Self::Cpu | Self::Memory)
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown check '{s}'"))
    }
}

/// A check with its thresholds already parsed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    /// CPU load against thresholds
    Cpu(Thresholds),
    /// Memory usage against thresholds
    Memory(Thresholds),
    /// Sensor enumeration
    Sensor,
}

impl Check {
    /// Validates the threshold flags for `kind`.
    ///
    /// The sensor check takes no thresholds and ignores both arguments.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a required threshold is missing or
    /// malformed.
    pub fn prepare(
        kind: CheckKind,
        warning: Option<&str>,
        critical: Option<&str>,
    ) -> ProbeResult<Self> {
        Ok(match kind {
            CheckKind::Cpu => Self::Cpu(Thresholds::parse(warning, critical)?),
            CheckKind::Memory => Self::Memory(Thresholds::parse(warning, critical)?),
            CheckKind::Sensor => Self::Sensor,
        })
    }

    /// Which check this is
    #[must_use]
    pub const fn kind(&self) -> CheckKind {
        match self {
            Self::Cpu(_) => CheckKind::Cpu,
            Self::Memory(_) => CheckKind::Memory,
            Self::Sensor => CheckKind::Sensor,
        }
    }

    /// Runs the check against an open source
    ///
    /// # Errors
    ///
    /// Returns collection or evaluation failures. Verdicts recorded before the
    /// failure stay on the report.
    pub fn execute(&self, source: &mut dyn MetricSource, report: &mut Report) -> ProbeResult<()> {
        match self {
            Self::Cpu(thresholds) => cpu::check(source, thresholds, report),
            Self::Memory(thresholds) => memory::check(source, thresholds, report),
            Self::Sensor => sensor::check(source, report),
        }
    }
}

/// Negotiates the session, opens it through `connector`, and executes `check`.
///
/// Nothing is opened if negotiation fails. The session is closed before this
/// returns, on success and on failure.
///
/// # Errors
///
/// Returns negotiation, collection or evaluation failures.
pub fn run(
    check: &Check,
    params: &SessionParams,
    connector: &dyn Connector,
    report: &mut Report,
) -> ProbeResult<()> {
    let _span = tracing::info_span!(span_names::CHECK, kind = %check.kind()).entered();
    let config = SessionNegotiator::negotiate(params)?;
    let mut session = connector.open(&config)?;
    check.execute(&mut *session, report)
}

/// Runs a complete probe and returns the finished report.
///
/// Every failure, from threshold parsing through evaluation, is recorded as a
/// verdict, so this always yields exactly one report line.
#[must_use]
pub fn probe(
    kind: CheckKind,
    warning: Option<&str>,
    critical: Option<&str>,
    params: &SessionParams,
    connector: &dyn Connector,
) -> FinalReport {
    let mut report = Report::new();
    let outcome = Check::prepare(kind, warning, critical)
        .and_then(|check| run(&check, params, connector, &mut report));
    if let Err(err) = outcome {
        report.record_failure(&err);
    }
    report.finish()
}
