//! Per-metric evaluation
//!
//! Two modes:
//! - threshold mode for continuous values, using a warning and a critical
//!   [`RangeSpec`](crate::range::RangeSpec)
//! - enumeration mode for device-reported status codes, using a fixed
//!   mapping table

mod sensor;
mod threshold;

use thiserror::Error;

pub use sensor::{SensorStatus, try_evaluate_sensors};
pub use threshold::Thresholds;

/// Errors raised when collected data cannot be evaluated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// Paired data did not line up, or a value makes the metric undefined
    #[error("Inconsistent data: {0}")]
    InconsistentData(String),
}

/// Result type for evaluation
pub type EvaluationResult<T> = Result<T, EvaluationError>;
