use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use vitals_client::{Measurement, MetricKind};

use crate::round1;
use crate::thresholds::Thresholds;

/// Coarse direction of change for a metric over the supplied collection.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
    #[default]
    None,
}

/// Derived statistics for one metric, fully recomputed on every run.
///
/// Numeric fields are `None` when no measurement of the metric exists;
/// `current` and `change` additionally require parseable timestamps since
/// both depend on chronological order.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, JsonSchema)]
pub struct MetricSummary {
    pub current: Option<f64>,
    pub average: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub trend: Trend,
    pub change: f64,
}

/// Summarize all measurements of one metric.
///
/// Extrema and the average cover every matching measurement, including
/// ones with malformed timestamps. `current` is the chronologically last
/// value and `change` is last-minus-first over the chronologically sorted
/// subset; fewer than two datable measurements means `change = 0` and
/// `trend = None`. Malformed timestamps are reported as data-quality
/// warnings, never errors.
pub fn summarize(
    measurements: &[Measurement],
    kind: MetricKind,
    thresholds: &Thresholds,
) -> MetricSummary {
    let matching: Vec<&Measurement> = measurements.iter().filter(|m| m.kind == kind).collect();
    if matching.is_empty() {
        return MetricSummary::default();
    }

    let sum: f64 = matching.iter().map(|m| m.value).sum();
    let average = round1(sum / matching.len() as f64);
    let minimum = round1(matching.iter().map(|m| m.value).fold(f64::INFINITY, f64::min));
    let maximum = round1(
        matching
            .iter()
            .map(|m| m.value)
            .fold(f64::NEG_INFINITY, f64::max),
    );

    let mut dated: Vec<(NaiveDateTime, f64)> = Vec::with_capacity(matching.len());
    for m in &matching {
        match m.logged_at() {
            Some(at) => dated.push((at, m.value)),
            None => tracing::warn!(
                id = m.id.as_deref().unwrap_or("<none>"),
                metric = %m.kind,
                logged_at = %m.logged_at,
                "measurement has unparsable timestamp, excluded from trend computation"
            ),
        }
    }
    // Stable sort keeps source order for equal timestamps.
    dated.sort_by_key(|(at, _)| *at);

    let current = dated.last().map(|(_, v)| *v);
    let (change, trend) = if dated.len() >= 2 {
        let change = round1(dated[dated.len() - 1].1 - dated[0].1);
        let threshold = thresholds.for_kind(kind);
        let trend = if change > threshold {
            Trend::Up
        } else if change < -threshold {
            Trend::Down
        } else {
            Trend::Stable
        };
        (change, trend)
    } else {
        (0.0, Trend::None)
    };

    MetricSummary {
        current,
        average: Some(average),
        minimum: Some(minimum),
        maximum: Some(maximum),
        trend,
        change,
    }
}
