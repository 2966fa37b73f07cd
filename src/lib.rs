//! Listening-history analytics
//!
//! Aggregates an exported scrobble history and music library into
//! chart-ready series and stats, and renders them headlessly: a line chart
//! of plays over time, top-artist and top-genre rankings, genre and
//! file-type donuts, an album-year histogram, a duration distribution,
//! peak listening hours, and a world choropleth of album countries.
//!
//! The pipeline is split into pure layers: `utils` parses, `core`
//! aggregates, `render` draws through an abstract surface, `fetch` loads
//! and memoizes the three sources, and [`session::Session`] ties the
//! active selections together.

pub mod core;
pub mod error;
pub mod fetch;
pub mod models;
pub mod render;
pub mod session;
pub mod utils;

pub use error::Error;
pub use session::{Session, ViewState};
