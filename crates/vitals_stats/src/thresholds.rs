use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use vitals_client::MetricKind;

/// Per-metric change thresholds for trend classification.
///
/// A summary's change must exceed the metric's threshold (in either
/// direction) to count as a trend; anything inside `[-t, t]` is stable.
/// Fields are overridable so callers can tune sensitivity per metric.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, JsonSchema)]
pub struct Thresholds {
    pub weight: f64,
    pub heart_rate: f64,
    pub steps: f64,
    pub sleep: f64,
    pub water: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            weight: 0.5,
            heart_rate: 5.0,
            steps: 500.0,
            sleep: 0.5,
            water: 1.0,
        }
    }
}

impl Thresholds {
    /// Threshold for a kind. Unknown metrics get 0.0, so any nonzero
    /// change registers as a trend.
    pub fn for_kind(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Weight => self.weight,
            MetricKind::HeartRate => self.heart_rate,
            MetricKind::Steps => self.steps,
            MetricKind::Sleep => self.sleep,
            MetricKind::Water => self.water,
            MetricKind::Unknown => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_configured_constants() {
        let t = Thresholds::default();
        assert_eq!(t.for_kind(MetricKind::Weight), 0.5);
        assert_eq!(t.for_kind(MetricKind::HeartRate), 5.0);
        assert_eq!(t.for_kind(MetricKind::Steps), 500.0);
        assert_eq!(t.for_kind(MetricKind::Sleep), 0.5);
        assert_eq!(t.for_kind(MetricKind::Water), 1.0);
        assert_eq!(t.for_kind(MetricKind::Unknown), 0.0);
    }

    #[test]
    fn overrides_take_effect() {
        let t = Thresholds {
            steps: 1000.0,
            ..Thresholds::default()
        };
        assert_eq!(t.for_kind(MetricKind::Steps), 1000.0);
    }
}
