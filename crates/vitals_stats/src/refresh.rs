//! Last-wins refresh orchestration over a [`VitalsSource`].
//!
//! The aggregation functions are pure; someone still has to own the input
//! collection and replace it wholesale after each fetch. This service does
//! that: each refresh gets a monotonically increasing generation, and a
//! completed fetch is applied only when no newer fetch has been applied
//! already, so a slow stale fetch can never overwrite fresher data. A
//! failed fetch applies nothing.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::Mutex;
use vitals_client::{Measurement, MetricKind, VitalsSource};

use crate::error::StatsResult;
use crate::series::ChartSeries;
use crate::summary::MetricSummary;
use crate::thresholds::Thresholds;
use crate::weekly::WeekComparison;

/// The currently applied measurement collection plus its generation.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub measurements: Vec<Measurement>,
    pub generation: u64,
}

#[derive(Clone)]
pub struct RefreshService {
    snapshot: Arc<Mutex<Snapshot>>,
    next_generation: Arc<AtomicU64>,
}

impl Default for RefreshService {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshService {
    pub fn new() -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(Snapshot::default())),
            next_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    fn claim_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn apply_if_newer(&self, generation: u64, measurements: Vec<Measurement>) -> bool {
        let mut snap = self.snapshot.lock().await;
        if generation <= snap.generation {
            tracing::debug!(
                generation,
                applied = snap.generation,
                "discarding superseded refresh result"
            );
            return false;
        }
        snap.measurements = measurements;
        snap.generation = generation;
        true
    }

    /// Fetch from `source` and apply the result inline.
    ///
    /// Returns the refresh generation. A fetch error leaves the current
    /// snapshot untouched.
    pub async fn refresh_now(&self, source: &dyn VitalsSource) -> StatsResult<u64> {
        let generation = self.claim_generation();
        let measurements = source.fetch_measurements().await?;
        self.apply_if_newer(generation, measurements).await;
        Ok(generation)
    }

    /// Fire-and-forget refresh on the tokio runtime. Returns the claimed
    /// generation immediately; a fetch error is logged and discarded.
    pub fn start_refresh(&self, source: Arc<dyn VitalsSource>) -> u64 {
        let generation = self.claim_generation();
        let service = self.clone();
        tokio::spawn(async move {
            match source.fetch_measurements().await {
                Ok(measurements) => {
                    service.apply_if_newer(generation, measurements).await;
                }
                Err(e) => {
                    tracing::warn!(generation, error = %e, "refresh fetch failed, keeping previous data");
                }
            }
        });
        generation
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.lock().await.clone()
    }

    /// Summarize one metric over the applied snapshot.
    pub async fn summary(&self, kind: MetricKind, thresholds: &Thresholds) -> MetricSummary {
        let snap = self.snapshot.lock().await;
        crate::summary::summarize(&snap.measurements, kind, thresholds)
    }

    /// Chart series for one metric over the applied snapshot.
    pub async fn series(
        &self,
        kind: MetricKind,
        window_days: i64,
        reference: NaiveDateTime,
    ) -> ChartSeries {
        let snap = self.snapshot.lock().await;
        crate::series::build_series(&snap.measurements, kind, window_days, reference)
    }

    /// Week-over-week comparison for one metric over the applied snapshot.
    pub async fn week_comparison(
        &self,
        kind: MetricKind,
        reference: NaiveDateTime,
    ) -> WeekComparison {
        let snap = self.snapshot.lock().await;
        crate::weekly::compare_weeks(&snap.measurements, kind, reference)
    }

    /// Calendar day markers over the applied snapshot.
    pub async fn calendar_markers(&self) -> BTreeMap<NaiveDate, BTreeSet<&'static str>> {
        let snap = self.snapshot.lock().await;
        crate::calendar::group_by_calendar_day(&snap.measurements)
    }
}
