//! Library collection row model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One track row of the exported library collection
///
/// All fields are free text straight from the CSV; typed interpretation
/// (year, duration, file type, country keys) happens at aggregation time so
/// a bad value never drops the row from song-level totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRow {
    pub artist: String,
    pub album: String,
    /// Semicolon-separated genre labels
    pub genres: String,
    /// Semicolon-separated country names
    pub countries: String,
    pub year: String,
    /// "H:MM:SS" or "MM:SS"
    pub duration: String,
    /// File path or URL, used only to infer a file-type label
    pub file: String,
}

impl LibraryRow {
    /// Build a row from a parsed CSV record, trimming every field
    pub fn from_record(record: &HashMap<String, String>) -> Self {
        let field = |name: &str| {
            record
                .get(name)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        Self {
            artist: field("Artist"),
            album: field("Album"),
            genres: field("Genres"),
            countries: field("Countries"),
            year: field("Year"),
            duration: field("Duration"),
            file: field("File"),
        }
    }

    /// Album identity: lowercased `artist::album`, or None when either is blank
    ///
    /// Used to deduplicate album-level aggregates so a multi-track album
    /// contributes once to album metrics but once per track to song metrics.
    pub fn album_key(&self) -> Option<String> {
        let artist = self.artist.trim();
        let album = self.album.trim();
        if artist.is_empty() || album.is_empty() {
            return None;
        }
        Some(format!(
            "{}::{}",
            artist.to_lowercase(),
            album.to_lowercase()
        ))
    }

    /// Distinct lowercased genre labels of this row, in encounter order
    pub fn genre_list(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for genre in self.genres.split(';') {
            let genre = genre.trim().to_lowercase();
            if !genre.is_empty() && !seen.contains(&genre) {
                seen.push(genre);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_album_key_blank_fields() {
        let mut row = LibraryRow {
            artist: "Can".into(),
            album: "Future Days".into(),
            ..Default::default()
        };
        assert_eq!(row.album_key().as_deref(), Some("can::future days"));

        row.album = "  ".into();
        assert_eq!(row.album_key(), None);
    }

    #[test]
    fn test_genre_list_dedupes_case_insensitively() {
        let row = LibraryRow {
            genres: "Krautrock; ambient;KRAUTROCK; ;".into(),
            ..Default::default()
        };
        assert_eq!(row.genre_list(), vec!["krautrock", "ambient"]);
    }
}
