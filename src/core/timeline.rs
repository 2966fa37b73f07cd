//! Time aggregation over the scrobble collection
//!
//! Buckets timestamped events into daily and monthly counts, derives
//! range-filtered and range-labeled series, and computes the fact panel
//! figures. Everything here is a pure function of its inputs.

use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, Timelike};
use std::collections::BTreeMap;

use crate::models::{DailyBucket, Scrobble, SeriesPoint};

/// Time range selection for the scrobble charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Range {
    #[default]
    All,
    Year,
    Month,
    Week,
}

impl Range {
    pub fn as_str(&self) -> &'static str {
        match self {
            Range::All => "all",
            Range::Year => "year",
            Range::Month => "month",
            Range::Week => "week",
        }
    }

    /// Parse a range name; anything unrecognized falls back to All,
    /// which matches the unfiltered behavior for unknown ranges.
    pub fn parse(value: &str) -> Self {
        match value {
            "year" => Range::Year,
            "month" => Range::Month,
            "week" => Range::Week,
            _ => Range::All,
        }
    }
}

/// Group scrobbles by UTC calendar day, ascending by date
///
/// Scrobbles whose timestamp does not map to a valid datetime are excluded,
/// so the bucket counts always sum to the number of valid scrobbles.
pub fn aggregate_daily(scrobbles: &[Scrobble]) -> Vec<DailyBucket> {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for scrobble in scrobbles {
        if let Some(dt) = DateTime::from_timestamp(scrobble.uts, 0) {
            *by_day.entry(dt.date_naive()).or_insert(0) += 1;
        }
    }
    by_day
        .into_iter()
        .map(|(date, count)| DailyBucket {
            day: date.format("%Y-%m-%d").to_string(),
            count,
            date,
        })
        .collect()
}

/// Roll daily buckets up into one point per distinct month
///
/// Points are labeled "YYYY-MM" and dated at the first of the month. The
/// rollup neither loses nor duplicates events: counts sum to the daily sum.
pub fn aggregate_monthly(daily: &[DailyBucket]) -> Vec<SeriesPoint> {
    let mut monthly: BTreeMap<String, u64> = BTreeMap::new();
    for bucket in daily {
        let month = bucket.day.chars().take(7).collect::<String>();
        *monthly.entry(month).or_insert(0) += bucket.count;
    }
    monthly
        .into_iter()
        .map(|(month, count)| {
            let date = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok();
            SeriesPoint::new(month, count as f64, date)
        })
        .collect()
}

/// Cutoff timestamp for a range, anchored at the most recent scrobble
///
/// Calendar arithmetic in UTC: one year / one calendar month / seven days
/// before the latest timestamp. All (and an invalid anchor) yields None,
/// meaning no filtering.
pub fn range_cutoff(range: Range, latest_uts: i64) -> Option<i64> {
    let latest = DateTime::from_timestamp(latest_uts, 0)?;
    let cutoff = match range {
        Range::All => return None,
        Range::Year => latest.checked_sub_months(Months::new(12))?,
        Range::Month => latest.checked_sub_months(Months::new(1))?,
        Range::Week => latest - chrono::Duration::days(7),
    };
    Some(cutoff.timestamp())
}

/// Filter a descending-sorted scrobble collection down to the active range
pub fn scrobbles_for_range(scrobbles: &[Scrobble], range: Range) -> Vec<Scrobble> {
    let latest = match scrobbles.first() {
        Some(s) => s.uts,
        None => return Vec::new(),
    };
    match range_cutoff(range, latest) {
        Some(cutoff) => scrobbles
            .iter()
            .filter(|s| s.uts >= cutoff)
            .cloned()
            .collect(),
        None => scrobbles.to_vec(),
    }
}

/// Chart series for a range selection
///
/// All: monthly rollup over the whole history, labeled "YYYY-MM".
/// Year: daily buckets labeled "YY-MM-DD". Month/Week: daily buckets
/// labeled "MM-DD".
pub fn series_for_range(scrobbles: &[Scrobble], range: Range) -> Vec<SeriesPoint> {
    if range == Range::All {
        return aggregate_monthly(&aggregate_daily(scrobbles));
    }

    let filtered = scrobbles_for_range(scrobbles, range);
    aggregate_daily(&filtered)
        .into_iter()
        .map(|b| {
            let label = match range {
                Range::Year => b.day.get(2..).unwrap_or(&b.day).to_string(),
                _ => b.day.get(5..).unwrap_or(&b.day).to_string(),
            };
            SeriesPoint::new(label, b.count as f64, Some(b.date))
        })
        .collect()
}

/// The day with the most scrobbles; earliest date wins on a tie
pub fn busiest_day(daily: &[DailyBucket]) -> Option<&DailyBucket> {
    let mut best: Option<&DailyBucket> = None;
    for bucket in daily {
        // buckets are ascending by date, so strictly-greater keeps the earliest
        if best.map_or(true, |b| bucket.count > b.count) {
            best = Some(bucket);
        }
    }
    best
}

/// Fact panel figures for the active range
///
/// Always computed over the range-filtered collection, so the facts agree
/// with the visible chart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeFacts {
    /// Scrobbles inside the range
    pub total: usize,
    /// Busiest day inside the range
    pub busiest: Option<DailyBucket>,
    /// Oldest scrobble timestamp inside the range
    pub first_uts: Option<i64>,
    /// Newest scrobble timestamp inside the range
    pub last_uts: Option<i64>,
}

pub fn range_facts(scrobbles: &[Scrobble], range: Range) -> RangeFacts {
    let filtered = scrobbles_for_range(scrobbles, range);
    if filtered.is_empty() {
        return RangeFacts::default();
    }
    let daily = aggregate_daily(&filtered);
    RangeFacts {
        total: filtered.len(),
        busiest: busiest_day(&daily).cloned(),
        first_uts: filtered.last().map(|s| s.uts),
        last_uts: filtered.first().map(|s| s.uts),
    }
}

/// Scrobble counts by weekday (Sun..Sat) and hour of day at a given offset
///
/// The embedding application passes its local UTC offset; tests pass a
/// fixed one.
pub fn peak_hour_matrix(scrobbles: &[Scrobble], offset: FixedOffset) -> [[u64; 24]; 7] {
    let mut counts = [[0u64; 24]; 7];
    for scrobble in scrobbles {
        if let Some(dt) = DateTime::from_timestamp(scrobble.uts, 0) {
            let local = dt.with_timezone(&offset);
            let day = local.weekday().num_days_from_sunday() as usize;
            let hour = local.hour() as usize;
            counts[day][hour] += 1;
        }
    }
    counts
}

/// Artist play counts over a scrobble collection, descending
///
/// Ties keep encounter order, which for the canonical descending collection
/// means the most recently played artist first.
pub fn top_artists(scrobbles: &[Scrobble]) -> Vec<(String, u64)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: std::collections::HashMap<String, u64> = std::collections::HashMap::new();
    for scrobble in scrobbles {
        if scrobble.artist.is_empty() {
            continue;
        }
        let entry = counts.entry(scrobble.artist.clone()).or_insert_with(|| {
            order.push(scrobble.artist.clone());
            0
        });
        *entry += 1;
    }
    let mut ranked: Vec<(String, u64)> = order
        .into_iter()
        .map(|name| {
            let count = counts[&name];
            (name, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}
