//! End-to-end check runs over replayed snapshots

use std::io::Write;

use switchprobe_core::checks::{
    CPU_LOAD_OID, CheckKind, MEMORY_ALLOC_OID, MEMORY_FREE_OID, MEMORY_TOTAL_OID,
    SENSOR_DESCRIPTION_OID, SENSOR_STATUS_OID, probe,
};
use switchprobe_core::models::Severity;
use switchprobe_core::session::SessionParams;
use switchprobe_core::source::{Oid, RawValue, ReplayConnector, ReplaySnapshot};

fn oid(arcs: &[u32]) -> Oid {
    Oid::from_arcs(arcs.to_vec())
}

fn params() -> SessionParams {
    SessionParams::new("core-sw-01")
}

fn sensor_snapshot(descriptions: &[&str], statuses: &[u64]) -> ReplaySnapshot {
    let descr = oid(SENSOR_DESCRIPTION_OID);
    let status = oid(SENSOR_STATUS_OID);
    let snapshot = descriptions
        .iter()
        .zip(1u32..)
        .fold(ReplaySnapshot::new(), |s, (name, i)| {
            s.with_value(descr.child(i), RawValue::Text((*name).to_string()))
        });
    statuses
        .iter()
        .zip(1u32..)
        .fold(snapshot, |s, (code, i)| {
            s.with_value(status.child(i), RawValue::Unsigned(*code))
        })
}

// ============================================================================
// Threshold checks
// ============================================================================

#[test]
fn test_cpu_between_warning_and_critical() {
    let connector = ReplayConnector::from_snapshot(
        ReplaySnapshot::new().with_value(oid(CPU_LOAD_OID), RawValue::Unsigned(85)),
    );

    let done = probe(CheckKind::Cpu, Some("0:70"), Some("0:90"), &params(), &connector);

    assert_eq!(done.severity, Severity::Warning);
    assert_eq!(done.exit_code(), 1);
    assert_eq!(done.line, "WARNING: CPU 85.0% | LOAD=85%");
}

#[test]
fn test_memory_above_critical() {
    let connector = ReplayConnector::from_snapshot(
        ReplaySnapshot::new()
            .with_value(oid(MEMORY_TOTAL_OID), RawValue::Unsigned(1000))
            .with_value(oid(MEMORY_FREE_OID), RawValue::Unsigned(50))
            .with_value(oid(MEMORY_ALLOC_OID), RawValue::Unsigned(950)),
    );

    let done = probe(CheckKind::Memory, Some("0:80"), Some("0:90"), &params(), &connector);

    assert_eq!(done.severity, Severity::Critical);
    assert!(done.line.starts_with("CRITICAL: Memory 95.0% "), "{}", done.line);
}

#[test]
fn test_missing_thresholds_are_critical() {
    let connector = ReplayConnector::from_snapshot(ReplaySnapshot::new());

    let done = probe(CheckKind::Cpu, None, Some("90"), &params(), &connector);
    assert_eq!(done.line, "CRITICAL: Missing required threshold --warning");

    let done = probe(CheckKind::Memory, Some("80"), None, &params(), &connector);
    assert_eq!(done.line, "CRITICAL: Missing required threshold --critical");
}

#[test]
fn test_inverted_range_alerts_inside() {
    let connector = ReplayConnector::from_snapshot(
        ReplaySnapshot::new().with_value(oid(CPU_LOAD_OID), RawValue::Unsigned(15)),
    );

    let done = probe(CheckKind::Cpu, Some("@10:20"), Some("~:"), &params(), &connector);
    assert_eq!(done.severity, Severity::Warning);
}

// ============================================================================
// Sensor enumeration
// ============================================================================

#[test]
fn test_sensor_states() {
    let connector = ReplayConnector::from_snapshot(sensor_snapshot(
        &["Fan1", "Fan2", "PSU1"],
        &[4, 3, 2],
    ));

    let done = probe(CheckKind::Sensor, None, None, &params(), &connector);

    assert_eq!(done.severity, Severity::Critical);
    assert_eq!(done.line, "CRITICAL: Fan1: Good, Fan2: Warning, PSU1: Error");
}

#[test]
fn test_sensor_unknown_outranks_error() {
    let connector = ReplayConnector::from_snapshot(sensor_snapshot(
        &["PSU1", "Temp"],
        &[2, 1],
    ));

    let done = probe(CheckKind::Sensor, None, None, &params(), &connector);

    assert_eq!(done.severity, Severity::Unknown);
    assert_eq!(done.exit_code(), 3);
}

#[test]
fn test_sensor_count_mismatch_is_single_critical() {
    let connector = ReplayConnector::from_snapshot(sensor_snapshot(
        &["Fan1", "Fan2"],
        &[4, 4, 4],
    ));

    let done = probe(CheckKind::Sensor, None, None, &params(), &connector);

    assert_eq!(done.severity, Severity::Critical);
    assert_eq!(
        done.line,
        "CRITICAL: Inconsistent data: received 3 sensor states but 2 descriptions"
    );
}

#[test]
fn test_sensor_rows_with_different_indices_are_critical() {
    let descr = oid(SENSOR_DESCRIPTION_OID);
    let status = oid(SENSOR_STATUS_OID);
    let connector = ReplayConnector::from_snapshot(
        ReplaySnapshot::new()
            .with_value(descr.child(1), RawValue::Text("Fan1".to_string()))
            .with_value(descr.child(2), RawValue::Text("PSU1".to_string()))
            .with_value(status.child(1), RawValue::Unsigned(4))
            .with_value(status.child(3), RawValue::Unsigned(2)),
    );

    let done = probe(CheckKind::Sensor, None, None, &params(), &connector);

    assert_eq!(done.severity, Severity::Critical);
    assert_eq!(
        done.line,
        "CRITICAL: Inconsistent data: sensor rows do not line up: description row 2, status row 3"
    );
}

#[test]
fn test_sensor_absent_slots_are_skipped() {
    let connector = ReplayConnector::from_snapshot(sensor_snapshot(
        &["Fan1", "PSU2"],
        &[4, 5],
    ));

    let done = probe(CheckKind::Sensor, None, None, &params(), &connector);
    assert_eq!(done.line, "OK: Fan1: Good");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_device_failure_is_critical() {
    let connector = ReplayConnector::from_snapshot(ReplaySnapshot::new().failing("timeout"));

    let done = probe(CheckKind::Cpu, Some("70"), Some("90"), &params(), &connector);
    assert_eq!(done.line, "CRITICAL: Device error: timeout");
}

#[test]
fn test_v3_without_privacy_passphrase() {
    let connector = ReplayConnector::from_snapshot(ReplaySnapshot::new());
    let params = SessionParams::new("core-sw-01")
        .with_version("3")
        .with_security_level("authPriv")
        .with_user_name("monitor")
        .with_auth("SHA", "authsecret");

    let done = probe(CheckKind::Sensor, None, None, &params, &connector);
    assert_eq!(done.line, "CRITICAL: snmp-priv-password is required");
}

#[test]
fn test_snapshot_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"values": {{"1.3.6.1.4.1.11.2.14.11.5.1.9.6.1.0": 42}}}}"#
    )
    .unwrap();

    let connector = ReplayConnector::from_file(file.path());
    let done = probe(CheckKind::Cpu, Some("70"), Some("90"), &params(), &connector);
    assert_eq!(done.line, "OK: CPU 42.0% | LOAD=42%");
}

#[test]
fn test_missing_snapshot_file() {
    let connector = ReplayConnector::from_file("/nonexistent/snapshot.json");

    let done = probe(CheckKind::Sensor, None, None, &params(), &connector);
    assert_eq!(done.severity, Severity::Critical);
    assert!(done.line.contains("Failed to load snapshot"), "{}", done.line);
}
