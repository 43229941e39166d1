//! Sensor table check

use crate::error::ProbeResult;
use crate::evaluator::{EvaluationError, EvaluationResult, try_evaluate_sensors};
use crate::report::Report;
use crate::source::{CollectionResult, MetricSource, Oid, RawValue};
use crate::tracing::span_names;

/// `hpicfSensorDescr` column
pub const SENSOR_DESCRIPTION_OID: &[u32] = &[1, 3, 6, 1, 4, 1, 11, 2, 14, 11, 1, 2, 6, 1, 7];
/// `hpicfSensorStatus` column
pub const SENSOR_STATUS_OID: &[u32] = &[1, 3, 6, 1, 4, 1, 11, 2, 14, 11, 1, 2, 6, 1, 4];

/// One table row: the index below the column root and the row's value
type Row<T> = (Vec<u32>, T);

fn walk_column<T>(
    source: &mut dyn MetricSource,
    column: &[u32],
    mut convert: impl FnMut(&Oid, RawValue) -> CollectionResult<T>,
) -> CollectionResult<Vec<Row<T>>> {
    let root = Oid::from_arcs(column.to_vec());
    let _span = tracing::debug_span!(span_names::COLLECT, root = %root).entered();
    let mut rows = Vec::new();
    source.walk(&root, &mut |oid, value| {
        let index = oid.arcs().get(column.len()..).unwrap_or(&[]).to_vec();
        rows.push((index, convert(oid, value)?));
        Ok(())
    })?;
    Ok(rows)
}

fn dotted(index: &[u32]) -> String {
    index
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Splits the two columns into parallel value lists.
///
/// Equal-length columns must carry the same row indices in the same order.
/// Unequal lengths are left for the evaluator to report.
fn align(
    descriptions: Vec<Row<String>>,
    statuses: Vec<Row<u64>>,
) -> EvaluationResult<(Vec<u64>, Vec<String>)> {
    if descriptions.len() == statuses.len()
        && let Some(((descr_index, _), (status_index, _))) = descriptions
            .iter()
            .zip(&statuses)
            .find(|((a, _), (b, _))| a != b)
    {
        return Err(EvaluationError::InconsistentData(format!(
            "sensor rows do not line up: description row {}, status row {}",
            dotted(descr_index),
            dotted(status_index)
        )));
    }

    let statuses = statuses.into_iter().map(|(_, code)| code).collect();
    let descriptions = descriptions.into_iter().map(|(_, text)| text).collect();
    Ok((statuses, descriptions))
}

pub(super) fn check(source: &mut dyn MetricSource, report: &mut Report) -> ProbeResult<()> {
    let descriptions = walk_column(source, SENSOR_DESCRIPTION_OID, |_, value| {
        Ok(value.as_text())
    })?;
    let statuses = walk_column(source, SENSOR_STATUS_OID, |oid, value| value.expect_u64(oid))?;

    let (statuses, descriptions) = align(descriptions, statuses)?;
    report.extend(try_evaluate_sensors(&statuses, &descriptions)?);
    Ok(())
}
