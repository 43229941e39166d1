//! CLI error types and exit codes.

use switchprobe_core::{FinalReport, ProbeError, Report, Severity};

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The command line could not be parsed
    #[error("Invalid arguments: {0}")]
    Usage(String),

    /// The probe could not be set up
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Severity the error is reported with.
    ///
    /// A malformed command line means the plugin itself is misconfigured, so
    /// it is UNKNOWN; everything else follows the probe's own rules.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Usage(_) | Self::Io(_) => Severity::Unknown,
            Self::Probe(e) => e.severity(),
        }
    }

    /// Returns the plugin exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.severity().exit_code()
    }

    /// Renders the error as a one-line report
    #[must_use]
    pub fn into_report(self) -> FinalReport {
        Report::from_failure(self.severity(), self.to_string()).finish()
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        let text = err.to_string();
        let first = text.lines().next().unwrap_or_default().trim();
        Self::Usage(first.strip_prefix("error: ").unwrap_or(first).to_string())
    }
}
