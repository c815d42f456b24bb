//! Turns run history into a plottable series for one metric.

use std::ops::RangeInclusive;

use time::UtcOffset;

use crate::gateway::HistoryRecord;

use super::Metric;
use super::timestamp;

/// One chart point: the run's formatted time and the metric value.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Project `history` onto `metric`, labelling points in the local time zone.
pub fn project(history: &[HistoryRecord], metric: Metric) -> Vec<SeriesPoint> {
    project_with_offset(history, metric, timestamp::local_offset())
}

/// Like [`project`], with labels rendered at `offset`.
///
/// One point per record, in input order. Missing or null values plot as `0.0`.
pub fn project_with_offset(
    history: &[HistoryRecord],
    metric: Metric,
    offset: UtcOffset,
) -> Vec<SeriesPoint> {
    history
        .iter()
        .map(|record| SeriesPoint {
            label: timestamp::label(&record.timestamp, offset),
            value: record.metric(metric).unwrap_or(0.0),
        })
        .collect()
}

/// Y-axis range for `points`: starts at zero and covers at least `0..=1`.
pub fn value_range(points: &[SeriesPoint]) -> RangeInclusive<f64> {
    let max = points
        .iter()
        .map(|point| point.value)
        .filter(|value| value.is_finite())
        .fold(1.0_f64, f64::max);
    0.0..=max
}
