//! `switchprobe` Core Library
//!
//! Health checks for managed network switches, reported in the monitoring
//! plugin line format.
//!
//! # Crate Structure
//!
//! - [`range`] - Threshold range syntax and evaluation
//! - [`session`] - SNMP version and USM security-level negotiation
//! - [`source`] - Metric source trait, session guard, live SNMP transport, offline replay
//! - [`evaluator`] - Threshold mode and sensor enumeration mode
//! - [`report`] - Severity aggregation and the output line
//! - [`checks`] - CPU, memory and sensor checks
//! - [`settings`] - Optional TOML settings file
//! - [`tracing`] - Logging setup

#![warn(missing_docs)]

pub mod checks;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod range;
pub mod report;
pub mod session;
pub mod settings;
pub mod source;
pub mod tracing;

pub use checks::{Check, CheckKind, probe, run};
pub use error::{ProbeError, ProbeResult};
pub use evaluator::{EvaluationError, EvaluationResult, SensorStatus, Thresholds};
pub use models::{PerfDatum, Severity, Verdict};
pub use range::{Bound, RangeError, RangeResult, RangeSpec};
pub use report::{FinalReport, Report};
pub use session::{NegotiationError, NegotiationResult, SessionConfig, SessionNegotiator, SessionParams};
pub use settings::{ProbeSettings, SettingsError, SettingsResult};
pub use source::{
    CollectionError, CollectionResult, Connector, MetricSource, NetworkConnector, Oid, RawValue,
    ReplayConnector, ReplaySnapshot, ReplaySource, Session, TransportSettings,
};
pub use tracing::{TracingConfig, TracingError, TracingLevel, TracingOutput, init_tracing};
