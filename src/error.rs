//! Crate error type
//!
//! Only the I/O boundary can fail: fetching a source, decoding the world
//! boundaries payload, or encoding a rendered chart. Aggregation is total.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure or non-2xx status while loading a source
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The world boundaries payload was not valid GeoJSON
    #[error("invalid world boundaries payload")]
    Geo(#[from] serde_json::Error),

    /// PNG encoding of a rendered surface failed
    #[error("chart encoding failed")]
    Png(#[from] image::ImageError),
}
