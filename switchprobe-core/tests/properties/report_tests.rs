//! Property tests for severity aggregation and the report line

use proptest::prelude::*;
use switchprobe_core::models::{Severity, Verdict, max_severity};
use switchprobe_core::report::Report;

/// Strategy for any severity
fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Ok),
        Just(Severity::Warning),
        Just(Severity::Critical),
        Just(Severity::Unknown),
    ]
}

proptest! {
    /// Property: The overall severity does not depend on insertion order
    #[test]
    fn overall_severity_is_order_independent(
        severities in prop::collection::vec(severity(), 0..12).prop_shuffle(),
    ) {
        let mut forward = Report::new();
        let mut backward = Report::new();
        for (i, s) in severities.iter().enumerate() {
            forward.add(Verdict::new(*s, format!("m{i}")));
        }
        for (i, s) in severities.iter().enumerate().rev() {
            backward.add(Verdict::new(*s, format!("m{i}")));
        }
        prop_assert_eq!(forward.overall_severity(), backward.overall_severity());
        prop_assert_eq!(forward.overall_severity(), max_severity(severities.iter().copied()));
    }

    /// Property: The overall severity is never milder than any verdict
    #[test]
    fn overall_dominates_every_verdict(severities in prop::collection::vec(severity(), 1..12)) {
        let mut report = Report::new();
        report.extend(severities.iter().map(|s| Verdict::new(*s, "x")));
        let overall = report.overall_severity();
        prop_assert!(severities.iter().all(|s| *s <= overall));
        prop_assert!(severities.contains(&overall));
    }

    /// Property: The exit code always matches the overall severity
    #[test]
    fn exit_code_matches_severity(severities in prop::collection::vec(severity(), 0..12)) {
        let mut report = Report::new();
        report.extend(severities.iter().map(|s| Verdict::new(*s, "x")));
        let done = report.finish();
        prop_assert_eq!(done.exit_code(), done.severity.exit_code());
        prop_assert!(done.line.starts_with(done.severity.as_str()));
    }

    /// Property: The report is always a single line with at most one perf separator
    #[test]
    fn report_is_one_line(labels in prop::collection::vec(".{0,16}", 0..6)) {
        let mut report = Report::new();
        report.extend(labels.iter().map(|l| Verdict::new(Severity::Ok, l.clone())));
        let line = report.finish().line;
        prop_assert!(!line.contains('\n'));
        prop_assert!(!line.contains('\r'));
        prop_assert!(!line.contains('|'));
    }
}
