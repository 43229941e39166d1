//! Enumeration mode for device sensor states

use super::{EvaluationError, EvaluationResult};
use crate::models::{Severity, Verdict};

/// Sensor state as reported by the HP ICF sensor table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorStatus {
    /// State unknown to the device (1)
    Unknown,
    /// Sensor reports a failure (2)
    Bad,
    /// Sensor reports a warning (3)
    Warning,
    /// Sensor is healthy (4)
    Good,
    /// Sensor slot is empty (5)
    NotPresent,
}

impl SensorStatus {
    /// Maps a raw status code; unknown codes yield `None`.
    #[must_use]
    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::Unknown),
            2 => Some(Self::Bad),
            3 => Some(Self::Warning),
            4 => Some(Self::Good),
            5 => Some(Self::NotPresent),
            _ => None,
        }
    }

    /// Severity for this state; `None` means no verdict is produced
    #[must_use]
    pub const fn severity(self) -> Option<Severity> {
        match self {
            Self::Good => Some(Severity::Ok),
            Self::Warning => Some(Severity::Warning),
            Self::Bad => Some(Severity::Critical),
            Self::Unknown => Some(Severity::Unknown),
            Self::NotPresent => None,
        }
    }

    /// Word used in the verdict label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Warning => "Warning",
            Self::Bad => "Error",
            Self::Unknown => "Unknown",
            Self::NotPresent => "Not present",
        }
    }
}

/// Pairs status codes with their descriptions and maps each to a verdict.
///
/// Codes for absent sensors and codes outside the known table are skipped
/// without a verdict, since devices may report vendor extension codes.
///
/// # Errors
///
/// Returns [`EvaluationError::InconsistentData`] if the two sequences differ
/// in length.
pub fn try_evaluate_sensors(
    statuses: &[u64],
    descriptions: &[String],
) -> EvaluationResult<Vec<Verdict>> {
    if statuses.len() != descriptions.len() {
        return Err(EvaluationError::InconsistentData(format!(
            "received {} sensor states but {} descriptions",
            statuses.len(),
            descriptions.len()
        )));
    }

    let verdicts = statuses
        .iter()
        .zip(descriptions)
        .filter_map(|(&code, description)| {
            let Some(status) = SensorStatus::from_code(code) else {
                tracing::debug!(code, sensor = %description, "Skipping unrecognized sensor state");
                return None;
            };
            let severity = status.severity()?;
            Some(Verdict::new(
                severity,
                format!("{description}: {}", status.label()),
            ))
        })
        .collect();

    Ok(verdicts)
}
