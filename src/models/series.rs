//! Chart-ready time series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point of a chart series
///
/// Ordering within a series is chronological and positionally meaningful:
/// the index is the x-axis position. `count` is fractional mid-animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Axis label for this point
    pub label: String,
    /// Value, fractional while a chart transition is in flight
    pub count: f64,
    /// Calendar day backing the point, when one exists
    pub date: Option<NaiveDate>,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, count: f64, date: Option<NaiveDate>) -> Self {
        Self {
            label: label.into(),
            count,
            date,
        }
    }

    /// Same point with a different count
    pub fn with_count(&self, count: f64) -> Self {
        Self {
            label: self.label.clone(),
            count,
            date: self.date,
        }
    }
}
