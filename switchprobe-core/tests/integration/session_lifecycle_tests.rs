//! Connection lifetime across every exit path of a check run

use std::cell::Cell;
use std::rc::Rc;

use switchprobe_core::checks::{CPU_LOAD_OID, Check, CheckKind, probe, run};
use switchprobe_core::report::Report;
use switchprobe_core::session::{SessionConfig, SessionParams};
use switchprobe_core::source::{
    CollectionResult, Connector, MetricSource, Oid, RawValue, ReplaySnapshot, ReplaySource,
    WalkVisitor,
};

#[derive(Default)]
struct Counters {
    opened: Cell<u32>,
    closed: Cell<u32>,
}

/// Wraps a replay source and counts `close` calls
struct TrackedSource {
    inner: ReplaySource,
    counters: Rc<Counters>,
}

impl MetricSource for TrackedSource {
    fn get(&mut self, addresses: &[Oid]) -> CollectionResult<Vec<RawValue>> {
        self.inner.get(addresses)
    }

    fn walk(&mut self, root: &Oid, visit: &mut WalkVisitor<'_>) -> CollectionResult<()> {
        self.inner.walk(root, visit)
    }

    fn close(&mut self) {
        self.counters.closed.set(self.counters.closed.get() + 1);
    }
}

struct TrackedConnector {
    snapshot: ReplaySnapshot,
    counters: Rc<Counters>,
}

impl TrackedConnector {
    fn new(snapshot: ReplaySnapshot) -> Self {
        Self {
            snapshot,
            counters: Rc::new(Counters::default()),
        }
    }

    fn opened(&self) -> u32 {
        self.counters.opened.get()
    }

    fn closed(&self) -> u32 {
        self.counters.closed.get()
    }
}

impl Connector for TrackedConnector {
    fn connect(&self, _config: &SessionConfig) -> CollectionResult<Box<dyn MetricSource>> {
        self.counters.opened.set(self.counters.opened.get() + 1);
        Ok(Box::new(TrackedSource {
            inner: ReplaySource::new(self.snapshot.clone()),
            counters: Rc::clone(&self.counters),
        }))
    }
}

fn cpu_snapshot(load: u64) -> ReplaySnapshot {
    ReplaySnapshot::new().with_value(
        Oid::from_arcs(CPU_LOAD_OID.to_vec()),
        RawValue::Unsigned(load),
    )
}

#[test]
fn test_closed_after_success() {
    let connector = TrackedConnector::new(cpu_snapshot(10));

    let params = SessionParams::new("sw1");

    let done = probe(CheckKind::Cpu, Some("70"), Some("90"), &params, &connector);

    assert_eq!(done.line, "OK: CPU 10.0% | LOAD=10%");
    assert_eq!(connector.opened(), 1);
    assert_eq!(connector.closed(), 1);
}

#[test]
fn test_closed_after_collection_failure() {
    let connector = TrackedConnector::new(ReplaySnapshot::new().failing("no response"));

    let params = SessionParams::new("sw1");

    let done = probe(CheckKind::Sensor, None, None, &params, &connector);

    assert_eq!(done.line, "CRITICAL: Device error: no response");
    assert_eq!(connector.opened(), 1);
    assert_eq!(connector.closed(), 1);
}

#[test]
fn test_closed_after_evaluation_failure() {
    let connector = TrackedConnector::new(
        ReplaySnapshot::new().with_value(
            Oid::from_arcs(CPU_LOAD_OID.to_vec()),
            RawValue::Text("n/a".to_string()),
        ),
    );
    let mut report = Report::new();
    let check = Check::prepare(CheckKind::Cpu, Some("70"), Some("90")).unwrap();

    assert!(run(&check, &SessionParams::new("sw1"), &connector, &mut report).is_err());
    assert_eq!(connector.closed(), 1);
}

#[test]
fn test_never_opened_when_thresholds_invalid() {
    let connector = TrackedConnector::new(cpu_snapshot(10));

    let params = SessionParams::new("sw1");

    let done = probe(CheckKind::Cpu, Some("90:10"), Some("95"), &params, &connector);

    assert_eq!(done.severity.exit_code(), 2);
    assert_eq!(connector.opened(), 0);
    assert_eq!(connector.closed(), 0);
}

#[test]
fn test_never_opened_when_negotiation_fails() {
    let connector = TrackedConnector::new(cpu_snapshot(10));
    let params = SessionParams::new("sw1")
        .with_version("3")
        .with_user_name("monitor")
        .with_security_level("authNoPriv");

    let done = probe(CheckKind::Cpu, Some("70"), Some("90"), &params, &connector);

    assert_eq!(done.line, "CRITICAL: snmp-auth-password is required");
    assert_eq!(connector.opened(), 0);
}

#[test]
fn test_never_opened_without_host() {
    let connector = TrackedConnector::new(cpu_snapshot(10));

    let done = probe(CheckKind::Sensor, None, None, &SessionParams::default(), &connector);

    assert_eq!(done.line, "CRITICAL: snmp-host is required");
    assert_eq!(connector.opened(), 0);
}
