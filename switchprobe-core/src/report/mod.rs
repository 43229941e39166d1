//! Result aggregation and the plugin output line
//!
//! A [`Report`] collects verdicts during a run and is consumed exactly once by
//! [`Report::finish`], which yields the [`FinalReport`] printed for the
//! supervisor. Output format version 1:
//!
//! ```text
//! <SEVERITY>: <label>[, <label>...][ | <name>=<value><unit> ...]
//! ```

use crate::error::ProbeError;
use crate::models::{PerfDatum, Severity, Verdict, max_severity};

/// Version of the report line layout
pub const FORMAT_VERSION: u32 = 1;

/// Separator between verdict labels in the summary
pub const SUMMARY_DELIMITER: &str = ", ";

/// Separator between the summary and the performance data
pub const PERFDATA_DELIMITER: &str = " | ";

/// Summary used when no verdict was recorded
pub const EMPTY_SUMMARY: &str = "no check results";

/// Accumulates verdicts and performance data for one check run
#[derive(Debug, Clone, Default)]
pub struct Report {
    verdicts: Vec<Verdict>,
    perf: Vec<PerfDatum>,
}

impl Report {
    /// Creates an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a report holding a single failure
    #[must_use]
    pub fn from_failure(severity: Severity, message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.add(Verdict::new(severity, message));
        report
    }

    /// Records a verdict and its performance datum, if any
    pub fn add(&mut self, verdict: Verdict) {
        tracing::debug!(severity = %verdict.severity, label = %verdict.label, "Verdict");
        if let Some(perf) = &verdict.perf {
            self.perf.push(perf.clone());
        }
        self.verdicts.push(verdict);
    }

    /// Records a performance datum that belongs to no single verdict
    pub fn add_perf(&mut self, perf: PerfDatum) {
        self.perf.push(perf);
    }

    /// Records several verdicts in order
    pub fn extend(&mut self, verdicts: impl IntoIterator<Item = Verdict>) {
        for verdict in verdicts {
            self.add(verdict);
        }
    }

    /// Records a failure that ended the run, keeping earlier verdicts
    pub fn record_failure(&mut self, error: &ProbeError) {
        tracing::warn!(error = %error, "Check aborted");
        self.add(Verdict::new(error.severity(), error.to_string()));
    }

    /// Verdicts recorded so far
    #[must_use]
    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    /// Returns true if nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// Most urgent severity of all verdicts, `Ok` when empty.
    /// Independent of insertion order.
    #[must_use]
    pub fn overall_severity(&self) -> Severity {
        max_severity(self.verdicts.iter().map(|v| v.severity))
    }

    /// Labels joined in insertion order.
    ///
    /// The output must stay on one line and a `|` would start the performance
    /// data section, so line breaks become spaces and `|` becomes `/`.
    #[must_use]
    pub fn summary_text(&self) -> String {
        if self.verdicts.is_empty() {
            return EMPTY_SUMMARY.to_string();
        }
        self.verdicts
            .iter()
            .map(|v| v.label.replace('|', "/").replace(['\r', '\n'], " "))
            .collect::<Vec<_>>()
            .join(SUMMARY_DELIMITER)
    }

    /// Performance data in insertion order; duplicate names are kept
    #[must_use]
    pub fn perf_data(&self) -> &[PerfDatum] {
        &self.perf
    }

    /// Renders the output line without consuming the report
    #[must_use]
    pub fn render(&self) -> String {
        let mut line = format!("{}: {}", self.overall_severity(), self.summary_text());
        let perf: Vec<String> = self.perf.iter().map(ToString::to_string).collect();
        if !perf.is_empty() {
            line.push_str(PERFDATA_DELIMITER);
            line.push_str(&perf.join(" "));
        }
        line
    }

    /// Finalizes the run
    #[must_use]
    pub fn finish(self) -> FinalReport {
        FinalReport {
            severity: self.overall_severity(),
            line: self.render(),
        }
    }
}

/// The finalized outcome of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalReport {
    /// Overall severity
    pub severity: Severity,
    /// The single output line
    pub line: String,
}

impl FinalReport {
    /// Exit code matching the overall severity
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }
}
