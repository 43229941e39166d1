//! Core data models shared by the evaluator and the report

mod severity;
mod verdict;

pub use severity::{Severity, max_severity};
pub use verdict::{PerfDatum, Verdict};
