use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use vitals_client::{Measurement, MetricKind, TrendSummary, VitalsError, VitalsSource};
use vitals_stats::{RefreshService, Thresholds, Trend};

struct FakeSource {
    measurements: Vec<Measurement>,
    fail: AtomicBool,
}

impl FakeSource {
    fn with(measurements: Vec<Measurement>) -> Self {
        Self {
            measurements,
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl VitalsSource for FakeSource {
    async fn fetch_measurements(&self) -> Result<Vec<Measurement>, VitalsError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(VitalsError::Api {
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(self.measurements.clone())
    }

    async fn fetch_trend_summary(&self, _kind: MetricKind) -> Result<TrendSummary, VitalsError> {
        Err(VitalsError::NotFound("no trends".into()))
    }
}

fn m(kind: MetricKind, value: f64, logged_at: &str) -> Measurement {
    Measurement {
        id: None,
        kind,
        value,
        unit: None,
        logged_at: logged_at.into(),
    }
}

#[tokio::test]
async fn refresh_now_applies_fetched_measurements() {
    let source = FakeSource::with(vec![
        m(MetricKind::Weight, 70.0, "2026-03-01T08:00:00"),
        m(MetricKind::Weight, 71.2, "2026-03-05T08:00:00"),
    ]);
    let service = RefreshService::new();
    let generation = service.refresh_now(&source).await.expect("refresh");
    assert_eq!(generation, 1);

    let summary = service
        .summary(MetricKind::Weight, &Thresholds::default())
        .await;
    assert_eq!(summary.current, Some(71.2));
    assert_eq!(summary.trend, Trend::Up);
}

#[tokio::test]
async fn failed_fetch_leaves_snapshot_untouched() {
    let source = FakeSource::with(vec![m(MetricKind::Water, 5.0, "2026-03-01T08:00:00")]);
    let service = RefreshService::new();
    service.refresh_now(&source).await.expect("first refresh");

    source.fail.store(true, Ordering::SeqCst);
    let err = service.refresh_now(&source).await.unwrap_err();
    assert!(matches!(
        err,
        vitals_stats::StatsError::Source(VitalsError::Api { status: 503, .. })
    ));

    // The prior snapshot survives a failed refresh wholesale.
    let snap = service.snapshot().await;
    assert_eq!(snap.generation, 1);
    assert_eq!(snap.measurements.len(), 1);
}

#[tokio::test]
async fn background_refresh_eventually_applies() {
    let source: Arc<dyn VitalsSource> = Arc::new(FakeSource::with(vec![m(
        MetricKind::Steps,
        8000.0,
        "2026-03-03T21:00:00",
    )]));
    let service = RefreshService::new();
    let generation = service.start_refresh(source);

    // Poll until the spawned fetch lands.
    for _ in 0..100 {
        if service.snapshot().await.generation == generation {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    let snap = service.snapshot().await;
    assert_eq!(snap.generation, generation);
    assert_eq!(snap.measurements.len(), 1);
}

#[tokio::test]
async fn service_accessors_reflect_snapshot() {
    let source = FakeSource::with(vec![
        m(MetricKind::Sleep, 8.0, "2026-03-02T23:00:00"),
        m(MetricKind::Sleep, 7.0, "2026-03-04T23:00:00"),
    ]);
    let service = RefreshService::new();
    service.refresh_now(&source).await.expect("refresh");

    let reference =
        NaiveDateTime::parse_from_str("2026-03-04T12:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();
    let comparison = service.week_comparison(MetricKind::Sleep, reference).await;
    assert_eq!(comparison.current_week_average, 7.5);

    let series = service.series(MetricKind::Sleep, 7, reference).await;
    assert!(!series.is_no_data());

    let markers = service.calendar_markers().await;
    assert_eq!(markers.len(), 2);
}
