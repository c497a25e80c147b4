use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use vitals_client::{Measurement, MetricKind};

use crate::round1;

/// Week-over-week comparison for one metric. A week with no data averages
/// to 0.0 rather than absent, a simplification the consuming UI relies on.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, JsonSchema)]
pub struct WeekComparison {
    pub current_week_average: f64,
    pub last_week_average: f64,
    pub change: f64,
}

/// Sunday-based start of the calendar week containing `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

fn week_mean(measurements: &[Measurement], kind: MetricKind, start: NaiveDate) -> f64 {
    let end = start + Duration::days(6);
    let mut sum = 0.0;
    let mut count = 0usize;
    for m in measurements.iter().filter(|m| m.kind == kind) {
        let Some(at) = m.logged_at() else {
            tracing::warn!(
                id = m.id.as_deref().unwrap_or("<none>"),
                metric = %m.kind,
                logged_at = %m.logged_at,
                "measurement has unparsable timestamp, excluded from week comparison"
            );
            continue;
        };
        let day = at.date();
        if day >= start && day <= end {
            sum += m.value;
            count += 1;
        }
    }
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Compare the calendar week containing `reference` against the one before
/// it. Change is current minus last, rounded to one decimal.
pub fn compare_weeks(
    measurements: &[Measurement],
    kind: MetricKind,
    reference: NaiveDateTime,
) -> WeekComparison {
    let current_start = week_start(reference.date());
    let last_start = week_start(reference.date() - Duration::days(7));

    let current = week_mean(measurements, kind, current_start);
    let last = week_mean(measurements, kind, last_start);

    WeekComparison {
        current_week_average: round1(current),
        last_week_average: round1(last),
        change: round1(current - last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(kind: MetricKind, value: f64, logged_at: &str) -> Measurement {
        Measurement {
            id: None,
            kind,
            value,
            unit: None,
            logged_at: logged_at.into(),
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").expect("test timestamp")
    }

    #[test]
    fn week_start_is_sunday() {
        // 2026-03-04 is a Wednesday; the containing week starts Sunday 03-01.
        let d = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        assert_eq!(week_start(d), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        // A Sunday is its own week start.
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(week_start(sunday), sunday);
    }

    #[test]
    fn empty_weeks_compare_to_zero_change() {
        let out = compare_weeks(&[], MetricKind::Steps, at("2026-03-04T12:00:00"));
        assert_eq!(out.current_week_average, 0.0);
        assert_eq!(out.last_week_average, 0.0);
        assert_eq!(out.change, 0.0);
    }

    #[test]
    fn averages_split_by_calendar_week() {
        // Reference week: Sun 2026-03-01 .. Sat 2026-03-07.
        // Last week: Sun 2026-02-22 .. Sat 2026-02-28.
        let data = [
            m(MetricKind::Sleep, 8.0, "2026-03-02T23:00:00"),
            m(MetricKind::Sleep, 7.0, "2026-03-04T23:00:00"),
            m(MetricKind::Sleep, 6.0, "2026-02-24T23:00:00"),
            m(MetricKind::Sleep, 6.5, "2026-02-15T23:00:00"), // two weeks back, ignored
        ];
        let out = compare_weeks(&data, MetricKind::Sleep, at("2026-03-04T12:00:00"));
        assert_eq!(out.current_week_average, 7.5);
        assert_eq!(out.last_week_average, 6.0);
        assert_eq!(out.change, 1.5);
    }

    #[test]
    fn missing_last_week_counts_as_zero() {
        let data = [m(MetricKind::Water, 6.0, "2026-03-03T12:00:00")];
        let out = compare_weeks(&data, MetricKind::Water, at("2026-03-04T12:00:00"));
        assert_eq!(out.current_week_average, 6.0);
        assert_eq!(out.last_week_average, 0.0);
        assert_eq!(out.change, 6.0);
    }
}
