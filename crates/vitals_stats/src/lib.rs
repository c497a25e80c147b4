//! Client-side aggregation of health measurements: per-metric summaries,
//! trend classification, chart series, week-over-week comparison, and
//! calendar markers.
//!
//! Every operation here is a pure function of its input collection plus an
//! explicit reference instant. Callers own selection state (which metric,
//! which window, which date) and re-invoke on every data change; the
//! [`refresh::RefreshService`] handles replacing the input wholesale after
//! each fetch.

pub mod calendar;
pub mod error;
pub mod refresh;
pub mod series;
pub mod summary;
pub mod thresholds;
pub mod weekly;

pub use calendar::group_by_calendar_day;
pub use error::{StatsError, StatsResult};
pub use refresh::RefreshService;
pub use series::{ChartSeries, SeriesPoint, build_series};
pub use summary::{MetricSummary, Trend, summarize};
pub use thresholds::Thresholds;
pub use weekly::{WeekComparison, compare_weeks};

/// Round to one decimal place. Idempotent.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
