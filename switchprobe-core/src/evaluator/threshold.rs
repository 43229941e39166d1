//! Threshold mode

use crate::error::{ProbeError, ProbeResult};
use crate::models::Severity;
use crate::range::RangeSpec;

/// A warning/critical range pair for one metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Warning range
    pub warning: RangeSpec,
    /// Critical range
    pub critical: RangeSpec,
}

impl Thresholds {
    /// Creates a threshold pair
    #[must_use]
    pub const fn new(warning: RangeSpec, critical: RangeSpec) -> Self {
        Self { warning, critical }
    }

    /// Parses the `--warning` and `--critical` flag values.
    ///
    /// Both are required; a missing flag is a configuration error. Parsing
    /// happens before any I/O.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::MissingThreshold`] for an absent flag, or
    /// [`ProbeError::Range`] for a malformed one.
    pub fn parse(warning: Option<&str>, critical: Option<&str>) -> ProbeResult<Self> {
        let warning = warning.ok_or(ProbeError::MissingThreshold("warning"))?;
        let critical = critical.ok_or(ProbeError::MissingThreshold("critical"))?;
        Ok(Self {
            warning: RangeSpec::parse(warning)?,
            critical: RangeSpec::parse(critical)?,
        })
    }

    /// Classifies a sample. The critical range is checked first and wins
    /// even when the warning range also alerts.
    #[must_use]
    pub fn classify(&self, value: f64) -> Severity {
        if self.critical.evaluate(value) {
            Severity::Critical
        } else if self.warning.evaluate(value) {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }
}
