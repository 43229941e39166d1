//! Check severity

use std::fmt;

/// Outcome severity of a check
///
/// Variants are declared in precedence order, so the derived `Ord` gives
/// `Ok < Warning < Critical < Unknown`. `Unknown` outranks `Critical`: a state
/// that could not be determined is treated as more urgent than a confirmed
/// bad one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Everything within thresholds
    #[default]
    Ok,
    /// Warning threshold breached
    Warning,
    /// Critical threshold breached or collection failed
    Critical,
    /// State could not be determined
    Unknown,
}

impl Severity {
    /// All severities in precedence order
    pub const ALL: [Self; 4] = [Self::Ok, Self::Warning, Self::Critical, Self::Unknown];

    /// Keyword printed at the start of the report line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Process exit code expected by monitoring supervisors
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }

    /// Returns the more urgent of two severities
    #[must_use]
    pub fn escalate(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Folds severities into the most urgent one; an empty input is `Ok`.
pub fn max_severity<I>(severities: I) -> Severity
where
    I: IntoIterator<Item = Severity>,
{
    severities
        .into_iter()
        .fold(Severity::Ok, Severity::escalate)
}
