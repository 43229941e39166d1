//! Per-metric verdicts and performance data

use std::fmt;

use super::Severity;

/// A named numeric sample attached to a verdict for graphing
#[derive(Debug, Clone, PartialEq)]
pub struct PerfDatum {
    /// Label, e.g. `LOAD`
    pub name: String,
    /// Unit of measure, e.g. `%` or `KB`
    pub unit: String,
    /// Sampled value
    pub value: f64,
}

impl PerfDatum {
    /// Creates a new performance datum
    #[must_use]
    pub fn new(name: impl Into<String>, unit: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            value,
        }
    }
}

/// Renders `name=valueunit`, quoting the name when it contains
/// whitespace, `=` or `'`.
impl fmt::Display for PerfDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let needs_quotes = self
            .name
            .chars()
            .any(|c| c.is_whitespace() || c == '=' || c == '\'');
        if needs_quotes {
            write!(f, "'{}'", self.name.replace('\'', "''"))?;
        } else {
            f.write_str(&self.name)?;
        }
        write!(f, "={}{}", self.value, self.unit)
    }
}

/// Classification of one sampled metric
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Severity of this metric
    pub severity: Severity,
    /// Human-readable description
    pub label: String,
    /// Optional sample for graphing
    pub perf: Option<PerfDatum>,
}

impl Verdict {
    /// Creates a verdict without performance data
    #[must_use]
    pub fn new(severity: Severity, label: impl Into<String>) -> Self {
        Self {
            severity,
            label: label.into(),
            perf: None,
        }
    }

    /// Attaches a performance datum
    #[must_use]
    pub fn with_perf(mut self, perf: PerfDatum) -> Self {
        self.perf = Some(perf);
        self
    }
}
