//! Scrobble model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single listening event exported from last.fm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scrobble {
    /// Play timestamp (unix seconds)
    pub uts: i64,
    /// Artist name
    pub artist: String,
    /// Track title
    pub track: String,
}

impl Scrobble {
    pub fn new(uts: i64, artist: impl Into<String>, track: impl Into<String>) -> Self {
        Self {
            uts,
            artist: artist.into(),
            track: track.into(),
        }
    }
}

/// Scrobble count for one UTC calendar day
///
/// Sequences of buckets are always sorted ascending by `date`; days with no
/// scrobbles are absent, not zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// Day key, "YYYY-MM-DD" in UTC
    pub day: String,
    /// Number of scrobbles on that day
    pub count: u64,
    /// Parsed calendar day
    pub date: NaiveDate,
}
