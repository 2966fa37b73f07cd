//! Source loading with per-session memoization
//!
//! The three inputs (scrobbles CSV, library CSV, world GeoJSON) are fetched
//! at most once per cache; every later access reuses the decoded result.
//! Load failures surface at the call site that triggered the load and leave
//! the cache unfilled, so a retry is possible.

use tracing::{debug, info};

use crate::error::Error;
use crate::models::{LibraryRow, Scrobble, WorldGeo};
use crate::utils::csv;

/// Default world boundaries source
const WORLD_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";

/// Where the three sources live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    pub scrobbles: String,
    pub library: String,
    pub world: String,
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            scrobbles: "/data/scrobbles.csv".to_string(),
            library: "/data/collection.csv".to_string(),
            world: WORLD_GEOJSON_URL.to_string(),
        }
    }
}

/// Memoized access to the decoded sources
#[derive(Debug, Default)]
pub struct SourceCache {
    urls: SourceUrls,
    client: reqwest::Client,
    scrobbles: Option<Vec<Scrobble>>,
    library: Option<Vec<LibraryRow>>,
    world: Option<WorldGeo>,
}

impl SourceCache {
    pub fn new(urls: SourceUrls) -> Self {
        Self {
            urls,
            ..Default::default()
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String, Error> {
        let wrap = |source| Error::Fetch {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(wrap)?;
        let response = response.error_for_status().map_err(wrap)?;
        response.text().await.map_err(wrap)
    }

    /// The scrobble collection, most recent first
    pub async fn scrobbles(&mut self) -> Result<&[Scrobble], Error> {
        if self.scrobbles.is_none() {
            let text = self.fetch_text(&self.urls.scrobbles).await?;
            let scrobbles = scrobbles_from_csv(&text);
            info!(count = scrobbles.len(), "loaded scrobbles");
            self.scrobbles = Some(scrobbles);
        }
        Ok(self.scrobbles.as_deref().unwrap_or_default())
    }

    /// The library collection, in file order
    pub async fn library(&mut self) -> Result<&[LibraryRow], Error> {
        if self.library.is_none() {
            let text = self.fetch_text(&self.urls.library).await?;
            let rows = library_from_csv(&text);
            info!(count = rows.len(), "loaded library rows");
            self.library = Some(rows);
        }
        Ok(self.library.as_deref().unwrap_or_default())
    }

    /// The world boundaries feature collection
    pub async fn world(&mut self) -> Result<&WorldGeo, Error> {
        if self.world.is_none() {
            let text = self.fetch_text(&self.urls.world).await?;
            let world: WorldGeo = serde_json::from_str(&text)?;
            info!(features = world.features.len(), "loaded world boundaries");
            self.world = Some(world);
        }
        Ok(&*self.world.get_or_insert_with(WorldGeo::default))
    }
}

/// Decode scrobble rows, dropping any without uts/artist/track
///
/// The result is sorted most recent first, the canonical order the session
/// and the range filter rely on.
pub fn scrobbles_from_csv(text: &str) -> Vec<Scrobble> {
    let records = csv::parse(text);
    let total = records.len();
    let mut scrobbles: Vec<Scrobble> = records
        .iter()
        .filter_map(|record| {
            let uts: i64 = record.get("uts")?.trim().parse().ok()?;
            let artist = record.get("artist")?.trim();
            let track = record.get("track")?.trim();
            if artist.is_empty() || track.is_empty() {
                return None;
            }
            Some(Scrobble::new(uts, artist, track))
        })
        .collect();
    if scrobbles.len() < total {
        debug!(dropped = total - scrobbles.len(), "scrobble rows missing uts/artist/track");
    }
    scrobbles.sort_by(|a, b| b.uts.cmp(&a.uts));
    scrobbles
}

/// Decode library rows; every parsed record yields a row
pub fn library_from_csv(text: &str) -> Vec<LibraryRow> {
    csv::parse(text).iter().map(LibraryRow::from_record).collect()
}
