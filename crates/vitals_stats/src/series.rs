use chrono::{Duration, NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vitals_client::{Measurement, MetricKind};

use crate::round1;

/// One chart point: a calendar-day bucket with the mean of that day's
/// values. `label` is the rendered `MM/DD`; ordering always follows `day`,
/// never the label (lexicographic label order breaks across year
/// boundaries).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, JsonSchema)]
pub struct SeriesPoint {
    pub day: NaiveDate,
    pub label: String,
    pub mean: f64,
}

/// Chart-ready series for one metric and window.
///
/// `NoData` is a deliberate sentinel: callers must branch on it and render
/// an empty state. It is not interchangeable with a series of zero-valued
/// points.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChartSeries {
    NoData,
    Points(Vec<SeriesPoint>),
}

impl ChartSeries {
    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartSeries::NoData)
    }
}

/// Build a per-day mean series for `kind` over a trailing window.
///
/// Keeps measurements with `logged_at >= reference - window_days`
/// (inclusive); the upper bound is implicit. Measurements with unparsable
/// timestamps cannot be bucketed and are dropped with a warning. Points
/// come out in ascending day order.
pub fn build_series(
    measurements: &[Measurement],
    kind: MetricKind,
    window_days: i64,
    reference: NaiveDateTime,
) -> ChartSeries {
    let cutoff = reference - Duration::days(window_days);

    let mut buckets: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for m in measurements.iter().filter(|m| m.kind == kind) {
        let Some(at) = m.logged_at() else {
            tracing::warn!(
                id = m.id.as_deref().unwrap_or("<none>"),
                metric = %m.kind,
                logged_at = %m.logged_at,
                "measurement has unparsable timestamp, excluded from chart series"
            );
            continue;
        };
        if at >= cutoff {
            buckets.entry(at.date()).or_default().push(m.value);
        }
    }

    if buckets.is_empty() {
        return ChartSeries::NoData;
    }

    let points = buckets
        .into_iter()
        .map(|(day, values)| {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            SeriesPoint {
                day,
                label: day.format("%m/%d").to_string(),
                mean: round1(mean),
            }
        })
        .collect();
    ChartSeries::Points(points)
}
