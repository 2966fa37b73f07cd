//! Library aggregation over the collection rows
//!
//! One pass over the denormalized rows builds every album-level and
//! song-level aggregate the library panel needs. Recomputation after a
//! filter or metric change is full and side-effect free: same rows plus
//! same filters always yield the same stats.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::core::countries::normalize_country_key;
use crate::core::genres::umbrella_for;
use crate::models::LibraryRow;
use crate::utils::parsers::{file_type_label, parse_album_year, parse_duration_seconds};

/// Value shown when the umbrella-genre filter is inactive
pub const FILTER_ALL: &str = "all";

/// Ranking metric for top artists/genres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Rank by track rows
    #[default]
    Songs,
    /// Rank by distinct albums
    Albums,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Songs => "songs",
            Metric::Albums => "albums",
        }
    }
}

/// Active library filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryFilters {
    pub metric: Metric,
    /// Umbrella filter for the year histogram, or "all"
    pub year_genre: String,
    /// Umbrella filter for the country map, or "all"
    pub country_genre: String,
    /// Year histogram values as proportion of the filtered total
    pub year_proportion: bool,
}

impl Default for LibraryFilters {
    fn default() -> Self {
        Self {
            metric: Metric::Songs,
            year_genre: FILTER_ALL.to_string(),
            country_genre: FILTER_ALL.to_string(),
            year_proportion: true,
        }
    }
}

/// One row of a top-artists or top-genres ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub name: String,
    pub count: u64,
    /// Percentage of the metric total, at most one decimal, "0%" when the
    /// total is zero
    pub share: String,
}

/// One year of the dense album-year histogram
#[derive(Debug, Clone, PartialEq)]
pub struct YearBucket {
    pub year: i32,
    pub count: u64,
    /// `count`, or the proportion of the filtered total in proportion mode
    pub value: f64,
}

/// Duration distribution: dense 30-second bins over 0..=16 minutes
#[derive(Debug, Clone, PartialEq)]
pub struct DurationHistogram {
    /// (bin start seconds, track count), every bin present
    pub bins: Vec<(i64, u64)>,
    /// Mean of the under-cap durations, for the reference marker
    pub mean_seconds: f64,
}

/// Histogram bin width in seconds
pub const DURATION_BIN_SECONDS: i64 = 30;
/// Durations above this are excluded from the distribution entirely
pub const DURATION_CAP_SECONDS: i64 = 16 * 60;

/// Everything the library panel renders, derived from rows + filters only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryStats {
    /// Distinct album keys
    pub album_count: usize,
    /// Total track rows
    pub song_count: usize,
    /// Distinct artists
    pub artist_count: usize,
    /// Distinct lowercased genre labels
    pub genre_count: usize,
    /// All artists, alphabetical
    pub artists: Vec<String>,
    /// All lowercased genres, alphabetical
    pub genres: Vec<String>,
    /// Top 100 artists by the active metric
    pub top_artists: Vec<RankedEntry>,
    /// Top 50 genres by the active metric
    pub top_genres: Vec<RankedEntry>,
    /// Song rows per umbrella genre, encounter order
    pub umbrella_counts: Vec<(String, u64)>,
    /// Song rows per file-type label, encounter order
    pub file_type_counts: Vec<(String, u64)>,
    /// Parsed positive track durations, row order
    pub durations: Vec<i64>,
    /// Binned duration distribution, None when no duration is under the cap
    pub duration_histogram: Option<DurationHistogram>,
    /// Dense year histogram, umbrella-filtered
    pub albums_by_year: Vec<YearBucket>,
    /// Albums per normalized country key, umbrella-filtered
    pub country_album_counts: HashMap<String, u64>,
    /// Umbrella categories present on albums, alphabetical (filter options)
    pub umbrella_options: Vec<String>,
    /// Effective year filter after validation against the options
    pub year_genre_filter: String,
    /// Effective country filter after validation against the options
    pub country_genre_filter: String,
}

/// Counter that remembers first-encounter order, for stable tie-breaks
#[derive(Default)]
struct OrderedCounts {
    order: Vec<String>,
    counts: HashMap<String, u64>,
}

impl OrderedCounts {
    fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.order.push(key.to_string());
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    fn into_vec(self) -> Vec<(String, u64)> {
        self.order
            .into_iter()
            .map(|key| {
                let count = self.counts[&key];
                (key, count)
            })
            .collect()
    }
}

/// Album-key sets per name, remembering first-encounter order
#[derive(Default)]
struct OrderedSets {
    order: Vec<String>,
    sets: HashMap<String, HashSet<String>>,
}

impl OrderedSets {
    fn insert(&mut self, key: &str, member: &str) {
        match self.sets.get_mut(key) {
            Some(set) => {
                set.insert(member.to_string());
            }
            None => {
                self.order.push(key.to_string());
                self.sets
                    .insert(key.to_string(), HashSet::from([member.to_string()]));
            }
        }
    }

    fn into_vec(self) -> Vec<(String, u64)> {
        self.order
            .into_iter()
            .map(|key| {
                let count = self.sets[&key].len() as u64;
                (key, count)
            })
            .collect()
    }
}

/// Build the complete library stats for the given rows and filters
pub fn aggregate_library(rows: &[LibraryRow], filters: &LibraryFilters) -> LibraryStats {
    let mut albums: HashSet<String> = HashSet::new();
    let mut artists: HashSet<String> = HashSet::new();
    let mut genres: HashSet<String> = HashSet::new();
    let mut artist_song_counts = OrderedCounts::default();
    let mut genre_song_counts = OrderedCounts::default();
    let mut umbrella_counts = OrderedCounts::default();
    let mut file_type_counts = OrderedCounts::default();
    let mut artist_album_sets = OrderedSets::default();
    let mut genre_album_sets = OrderedSets::default();
    let mut durations: Vec<i64> = Vec::new();
    let mut album_year: HashMap<String, i32> = HashMap::new();
    let mut album_umbrellas: HashMap<String, HashSet<&'static str>> = HashMap::new();
    let mut album_countries: HashMap<String, HashSet<String>> = HashMap::new();
    let mut dropped_durations = 0usize;

    for row in rows {
        let album_key = row.album_key();
        let artist = row.artist.trim();

        if !artist.is_empty() {
            artists.insert(artist.to_string());
            artist_song_counts.increment(artist);
        }
        if let Some(key) = &album_key {
            albums.insert(key.clone());
        }
        file_type_counts.increment(&file_type_label(&row.file));

        let row_genres = row.genre_list();
        for genre in &row_genres {
            genres.insert(genre.clone());
            genre_song_counts.increment(genre);
            umbrella_counts.increment(umbrella_for(genre));
        }

        match parse_duration_seconds(&row.duration) {
            Some(secs) if secs > 0 => durations.push(secs),
            _ if !row.duration.trim().is_empty() => dropped_durations += 1,
            _ => {}
        }

        if let Some(key) = &album_key {
            if let Some(year) = parse_album_year(&row.year) {
                // first valid year wins; later rows never overwrite it
                album_year.entry(key.clone()).or_insert(year);
            }

            if !artist.is_empty() {
                artist_album_sets.insert(artist, key);
            }
            let umbrella_set = album_umbrellas.entry(key.clone()).or_default();
            for genre in &row_genres {
                genre_album_sets.insert(genre, key);
                umbrella_set.insert(umbrella_for(genre));
            }

            for country in row.countries.split(';') {
                let country = normalize_country_key(country);
                if !country.is_empty() {
                    album_countries.entry(key.clone()).or_default().insert(country);
                }
            }
        }
    }

    if dropped_durations > 0 {
        debug!(dropped = dropped_durations, "unparseable duration fields");
    }

    let umbrella_options = {
        let mut options: Vec<String> = album_umbrellas
            .values()
            .flatten()
            .map(|u| u.to_string())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        options.sort_by_key(|u| u.to_lowercase());
        options
    };

    // a stale filter selection resets to "all"
    let effective = |wanted: &str| {
        if wanted == FILTER_ALL || umbrella_options.iter().any(|u| u == wanted) {
            wanted.to_string()
        } else {
            FILTER_ALL.to_string()
        }
    };
    let year_genre_filter = effective(&filters.year_genre);
    let country_genre_filter = effective(&filters.country_genre);

    let album_passes = |key: &String, filter: &str| {
        filter == FILTER_ALL
            || album_umbrellas
                .get(key)
                .map_or(false, |set| set.contains(filter))
    };

    let mut year_counts: HashMap<i32, u64> = HashMap::new();
    for (key, year) in &album_year {
        if album_passes(key, &year_genre_filter) {
            *year_counts.entry(*year).or_insert(0) += 1;
        }
    }
    let albums_by_year = dense_year_histogram(&year_counts, filters.year_proportion);

    let mut country_album_counts: HashMap<String, u64> = HashMap::new();
    for (key, countries) in &album_countries {
        if album_passes(key, &country_genre_filter) {
            for country in countries {
                *country_album_counts.entry(country.clone()).or_insert(0) += 1;
            }
        }
    }

    let metric_total = match filters.metric {
        Metric::Albums => albums.len() as u64,
        Metric::Songs => rows.len() as u64,
    };
    let ranked = |songs: OrderedCounts, album_sets: OrderedSets, top_n: usize| {
        let mut entries = match filters.metric {
            Metric::Songs => songs.into_vec(),
            Metric::Albums => album_sets.into_vec(),
        };
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(top_n);
        entries
            .into_iter()
            .map(|(name, count)| RankedEntry {
                share: format_share(count, metric_total),
                name,
                count,
            })
            .collect::<Vec<_>>()
    };

    let mut artists_sorted: Vec<String> = artists.into_iter().collect();
    artists_sorted.sort_by_key(|a| a.to_lowercase());
    let mut genres_sorted: Vec<String> = genres.into_iter().collect();
    genres_sorted.sort_by_key(|g| g.to_lowercase());

    LibraryStats {
        album_count: albums.len(),
        song_count: rows.len(),
        artist_count: artists_sorted.len(),
        genre_count: genres_sorted.len(),
        top_artists: ranked(artist_song_counts, artist_album_sets, 100),
        top_genres: ranked(genre_song_counts, genre_album_sets, 50),
        artists: artists_sorted,
        genres: genres_sorted,
        umbrella_counts: umbrella_counts.into_vec(),
        file_type_counts: file_type_counts.into_vec(),
        duration_histogram: duration_histogram(&durations),
        durations,
        albums_by_year,
        country_album_counts,
        umbrella_options,
        year_genre_filter,
        country_genre_filter,
    }
}

/// Format a count as a percentage of `total`: at most one decimal place,
/// "0%" when the total is zero
pub fn format_share(count: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    let pct = count as f64 * 100.0 / total as f64;
    let fixed = format!("{:.1}", pct);
    match fixed.strip_suffix(".0") {
        Some(whole) => format!("{whole}%"),
        None => format!("{fixed}%"),
    }
}

/// Gap-fill sparse year counts into a dense min..=max histogram
fn dense_year_histogram(year_counts: &HashMap<i32, u64>, proportion: bool) -> Vec<YearBucket> {
    let (Some(&min), Some(&max)) = (
        year_counts.keys().min(),
        year_counts.keys().max(),
    ) else {
        return Vec::new();
    };
    let total: u64 = year_counts.values().sum();
    (min..=max)
        .map(|year| {
            let count = year_counts.get(&year).copied().unwrap_or(0);
            let value = if proportion && total > 0 {
                count as f64 / total as f64
            } else {
                count as f64
            };
            YearBucket { year, count, value }
        })
        .collect()
}

/// Bin durations into the dense 30-second histogram, excluding values above
/// the 16-minute cap; the mean covers exactly the binned set
pub fn duration_histogram(durations: &[i64]) -> Option<DurationHistogram> {
    let kept: Vec<i64> = durations
        .iter()
        .copied()
        .filter(|d| *d > 0 && *d <= DURATION_CAP_SECONDS)
        .collect();
    if kept.is_empty() {
        return None;
    }

    let mut by_bin: HashMap<i64, u64> = HashMap::new();
    for duration in &kept {
        let bin = duration / DURATION_BIN_SECONDS * DURATION_BIN_SECONDS;
        *by_bin.entry(bin).or_insert(0) += 1;
    }

    let bins = (0..=DURATION_CAP_SECONDS)
        .step_by(DURATION_BIN_SECONDS as usize)
        .map(|bin| (bin, by_bin.get(&bin).copied().unwrap_or(0)))
        .collect();
    let mean_seconds = kept.iter().sum::<i64>() as f64 / kept.len() as f64;

    Some(DurationHistogram { bins, mean_seconds })
}
