//! Data models for reflectiv
//!
//! Core data structures shared by the aggregation engines and renderers.

mod geo;
mod library;
mod scrobble;
mod series;

pub use geo::{Geometry, WorldFeature, WorldGeo};
pub use library::LibraryRow;
pub use scrobble::{DailyBucket, Scrobble};
pub use series::SeriesPoint;
