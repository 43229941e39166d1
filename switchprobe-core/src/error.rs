//! Error types for switchprobe
//!
//! Each module has its own error enum; [`ProbeError`] wraps them so a check run
//! can fail with one type and still be turned into a report line.

use thiserror::Error;

use crate::evaluator::EvaluationError;
use crate::models::Severity;
use crate::range::RangeError;
use crate::session::NegotiationError;
use crate::settings::SettingsError;
use crate::source::CollectionError;

/// Any failure that ends a check run
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A threshold flag was not supplied
    #[error("Missing required threshold --{0}")]
    MissingThreshold(&'static str),

    /// A threshold flag could not be parsed
    #[error(transparent)]
    Range(#[from] RangeError),

    /// The connection parameters were rejected
    #[error(transparent)]
    Negotiation(#[from] NegotiationError),

    /// The device could not be queried
    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// Collected data was unusable
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// The settings file could not be used
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Result type for check runs
pub type ProbeResult<T> = Result<T, ProbeError>;

impl ProbeError {
    /// Severity the failure is reported with.
    ///
    /// Every failure is CRITICAL, so a broken check is never mistaken for a
    /// healthy one.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::MissingThreshold(_)
            | Self::Range(_)
            | Self::Negotiation(_)
            | Self::Collection(_)
            | Self::Evaluation(_)
            | Self::Settings(_) => Severity::Critical,
        }
    }

    /// Returns true if the failure happened before any connection attempt
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingThreshold(_) | Self::Range(_) | Self::Negotiation(_) | Self::Settings(_)
        )
    }
}
