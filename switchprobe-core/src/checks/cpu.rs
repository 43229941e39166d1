//! CPU load check

use crate::error::ProbeResult;
use crate::evaluator::Thresholds;
use crate::models::{PerfDatum, Verdict};
use crate::report::Report;
use crate::source::{CollectionError, MetricSource, Oid};
use crate::tracing::span_names;

/// `hpSwitchCpuStat`: CPU load in percent
pub const CPU_LOAD_OID: &[u32] = &[1, 3, 6, 1, 4, 1, 11, 2, 14, 11, 5, 1, 9, 6, 1, 0];

pub(super) fn check(
    source: &mut dyn MetricSource,
    thresholds: &Thresholds,
    report: &mut Report,
) -> ProbeResult<()> {
    let oid = Oid::from_arcs(CPU_LOAD_OID.to_vec());
    let load = {
        let _span = tracing::debug_span!(span_names::COLLECT, oid = %oid).entered();
        let values = source.get(std::slice::from_ref(&oid))?;
        let value = values.first().ok_or(CollectionError::ShortResponse {
            requested: 1,
            received: 0,
        })?;
        value.expect_u64(&oid)? as f64
    };

    report.add(
        Verdict::new(thresholds.classify(load), format!("CPU {load:.1}%"))
            .with_perf(PerfDatum::new("LOAD", "%", load)),
    );
    Ok(())
}
