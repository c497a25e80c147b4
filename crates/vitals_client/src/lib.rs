//! Wire model and `VitalsSource` trait for the health-measurement API,
//! plus a reqwest-based implementation.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod timeparse;

#[derive(Debug, Error)]
pub enum VitalsError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("api error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("configuration error: {0}")]
    Config(String),
}

impl VitalsError {
    pub fn from_status(status: u16, body: String) -> Self {
        VitalsError::Api { status, body }
    }
}

/// Health-measurement categories tracked by the app.
///
/// Unrecognized wire values collapse into `Unknown`; those measurements stay
/// out of metric-specific aggregation but can still render generically.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    Weight,
    HeartRate,
    Steps,
    Sleep,
    Water,
    #[serde(other)]
    Unknown,
}

impl MetricKind {
    /// All concrete kinds, in display order. Excludes `Unknown`.
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Weight,
        MetricKind::HeartRate,
        MetricKind::Steps,
        MetricKind::Sleep,
        MetricKind::Water,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Weight => "weight",
            MetricKind::HeartRate => "heartRate",
            MetricKind::Steps => "steps",
            MetricKind::Sleep => "sleep",
            MetricKind::Water => "water",
            MetricKind::Unknown => "unknown",
        }
    }

    /// Canonical display unit for the kind.
    pub fn canonical_unit(self) -> &'static str {
        match self {
            MetricKind::Weight => "kg",
            MetricKind::HeartRate => "bpm",
            MetricKind::Steps => "steps",
            MetricKind::Sleep => "hours",
            MetricKind::Water => "glasses",
            MetricKind::Unknown => "",
        }
    }

    /// Calendar marker color for days carrying this kind of measurement.
    pub fn marker_color(self) -> &'static str {
        match self {
            MetricKind::Weight => "#4A90D9",
            MetricKind::HeartRate => "#E05A5A",
            MetricKind::Steps => "#57B894",
            MetricKind::Sleep => "#8E6FC9",
            MetricKind::Water => "#3BB3C4",
            MetricKind::Unknown => "#9B9B9B",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dated health measurement as delivered by the API.
///
/// `logged_at` is kept as the raw wire string; consumers parse it through
/// [`Measurement::logged_at`] so an unparsable timestamp degrades to a
/// data-quality warning instead of a deserialization failure.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, JsonSchema)]
pub struct Measurement {
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub id: Option<String>,
    #[serde(rename = "metricType")]
    pub kind: MetricKind,
    pub value: f64,
    pub unit: Option<String>,
    #[serde(rename = "loggedAt")]
    pub logged_at: String,
}

impl Measurement {
    /// Parsed occurrence instant, or `None` when the wire timestamp is
    /// malformed.
    pub fn logged_at(&self) -> Option<chrono::NaiveDateTime> {
        timeparse::parse_logged_at(&self.logged_at)
    }

    /// Display unit: the measurement's own unit when present, else the
    /// kind's canonical unit.
    pub fn display_unit(&self) -> &str {
        self.unit.as_deref().unwrap_or(self.kind.canonical_unit())
    }
}

/// Server-precomputed trend payload for a single metric, from the optional
/// trends endpoint. Bypasses client-side aggregation for simple trend views.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, JsonSchema)]
pub struct TrendSummary {
    #[serde(default)]
    pub points: Vec<f64>,
    pub trend: Option<String>,
    pub weekly_change: Option<f64>,
    pub unit: Option<String>,
}

fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string().into()),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Read side of the health-measurement API.
///
/// One bulk read plus the optional precomputed-trend endpoint; windowing and
/// aggregation happen client-side.
#[async_trait]
pub trait VitalsSource: Send + Sync + 'static {
    /// Fetch all health measurements for the configured user.
    async fn fetch_measurements(&self) -> Result<Vec<Measurement>, VitalsError>;

    /// Fetch the server-precomputed trend summary for one metric.
    async fn fetch_trend_summary(&self, kind: MetricKind) -> Result<TrendSummary, VitalsError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn measurement_deserializes_numeric_id() {
        let payload = json!({
            "id": 421,
            "metricType": "weight",
            "value": 70.4,
            "unit": "kg",
            "loggedAt": "2026-03-02T08:15:00"
        });
        let m: Measurement = serde_json::from_value(payload).expect("deserialize numeric id");
        assert_eq!(m.id.unwrap(), "421");
        assert_eq!(m.kind, MetricKind::Weight);
    }

    #[test]
    fn measurement_rejects_structured_id() {
        let payload = json!({
            "id": {"nested": true},
            "metricType": "weight",
            "value": 70.4,
            "loggedAt": "2026-03-02T08:15:00"
        });
        let res: Result<Measurement, _> = serde_json::from_value(payload);
        assert!(res.is_err());
    }

    #[test]
    fn unrecognized_metric_type_maps_to_unknown() {
        let payload = json!({
            "id": "m1",
            "metricType": "bloodOxygen",
            "value": 98.0,
            "loggedAt": "2026-03-02T08:15:00"
        });
        let m: Measurement = serde_json::from_value(payload).expect("deserialize measurement");
        assert_eq!(m.kind, MetricKind::Unknown);
    }

    #[test]
    fn display_unit_falls_back_to_canonical() {
        let payload = json!({
            "id": "m1",
            "metricType": "heartRate",
            "value": 61.0,
            "loggedAt": "2026-03-02T08:15:00"
        });
        let m: Measurement = serde_json::from_value(payload).expect("deserialize measurement");
        assert_eq!(m.display_unit(), "bpm");
    }

    #[test]
    fn marker_colors_are_distinct_per_kind() {
        let mut colors: Vec<&str> = MetricKind::ALL.iter().map(|k| k.marker_color()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), MetricKind::ALL.len());
    }
}
