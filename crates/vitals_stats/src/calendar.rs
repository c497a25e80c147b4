use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use vitals_client::Measurement;

/// Map each calendar day to the set of marker colors for the metrics
/// logged on it.
///
/// Presence only: several measurements of the same metric on one day
/// dedup to a single marker. Days with only undatable measurements do
/// not appear.
pub fn group_by_calendar_day(
    measurements: &[Measurement],
) -> BTreeMap<NaiveDate, BTreeSet<&'static str>> {
    let mut days: BTreeMap<NaiveDate, BTreeSet<&'static str>> = BTreeMap::new();
    for m in measurements {
        let Some(at) = m.logged_at() else {
            tracing::warn!(
                id = m.id.as_deref().unwrap_or("<none>"),
                metric = %m.kind,
                logged_at = %m.logged_at,
                "measurement has unparsable timestamp, excluded from calendar markers"
            );
            continue;
        };
        days.entry(at.date()).or_default().insert(m.kind.marker_color());
    }
    days
}
