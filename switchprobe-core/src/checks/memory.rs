//! Memory usage check

use crate::error::ProbeResult;
use crate::evaluator::{EvaluationError, Thresholds};
use crate::models::{PerfDatum, Verdict};
use crate::report::Report;
use crate::source::{CollectionError, MetricSource, Oid};
use crate::tracing::span_names;

/// `hpGlobalMemTotalBytes`
pub const MEMORY_TOTAL_OID: &[u32] = &[1, 3, 6, 1, 4, 1, 11, 2, 14, 11, 5, 1, 1, 2, 2, 1, 1, 5, 1];
/// `hpGlobalMemFreeBytes`
pub const MEMORY_FREE_OID: &[u32] = &[1, 3, 6, 1, 4, 1, 11, 2, 14, 11, 5, 1, 1, 2, 2, 1, 1, 6, 1];
/// `hpGlobalMemAllocBytes`
pub const MEMORY_ALLOC_OID: &[u32] = &[1, 3, 6, 1, 4, 1, 11, 2, 14, 11, 5, 1, 1, 2, 2, 1, 1, 7, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MemoryStats {
    total: u64,
    free: u64,
    alloc: u64,
}

impl MemoryStats {
    fn collect(source: &mut dyn MetricSource) -> ProbeResult<Self> {
        let oids = [MEMORY_TOTAL_OID, MEMORY_FREE_OID, MEMORY_ALLOC_OID]
            .map(|arcs| Oid::from_arcs(arcs.to_vec()));
        let _span = tracing::debug_span!(span_names::COLLECT, count = oids.len()).entered();

        let values = source.get(&oids)?;
        if values.len() < oids.len() {
            return Err(CollectionError::ShortResponse {
                requested: oids.len(),
                received: values.len(),
            }
            .into());
        }

        Ok(Self {
            total: values[0].expect_u64(&oids[0])?,
            free: values[1].expect_u64(&oids[1])?,
            alloc: values[2].expect_u64(&oids[2])?,
        })
    }

    fn percent_used(self) -> Result<f64, EvaluationError> {
        if self.total == 0 {
            return Err(EvaluationError::InconsistentData(
                "device reports 0 bytes of total memory".to_string(),
            ));
        }
        Ok(self.alloc as f64 / self.total as f64 * 100.0)
    }
}

fn kilobytes(bytes: u64) -> f64 {
    (bytes / 1024) as f64
}

pub(super) fn check(
    source: &mut dyn MetricSource,
    thresholds: &Thresholds,
    report: &mut Report,
) -> ProbeResult<()> {
    let stats = MemoryStats::collect(source)?;
    let used = stats.percent_used()?;

    report.add(
        Verdict::new(
            thresholds.classify(used),
            format!("Memory {used:.1}% ({} kB) used", stats.alloc / 1024),
        )
        .with_perf(PerfDatum::new("USED", "KB", kilobytes(stats.alloc))),
    );
    report.add_perf(PerfDatum::new("FREE", "KB", kilobytes(stats.free)));
    report.add_perf(PerfDatum::new("TOTAL", "KB", kilobytes(stats.total)));
    Ok(())
}
