//! Defensive field parsers for library metadata
//!
//! Invalid or out-of-range values are treated as absent, never as zero and
//! never as an error: a bad year or duration drops out of its histogram
//! while the row keeps counting toward song totals.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A bare extension-like token ("flac", "mp3") with no dot at all
    static ref EXTENSION_TOKEN: Regex = Regex::new(r"^[a-z0-9]{2,8}$").unwrap();
}

/// Album years are only plausible inside this window
const YEAR_MIN: i32 = 1900;
const YEAR_MAX: i32 = 2100;

/// Parse "H:MM:SS" or "MM:SS" into seconds
///
/// Exactly 2 or 3 colon-separated integer parts; anything else is None.
pub fn parse_duration_seconds(value: &str) -> Option<i64> {
    let raw = value.trim();
    if raw.is_empty() {
        return None;
    }
    let parts: Vec<i64> = raw
        .split(':')
        .map(|p| p.trim().parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()?;
    match parts[..] {
        [m, s] => Some(m * 60 + s),
        [h, m, s] => Some(h * 3600 + m * 60 + s),
        _ => None,
    }
}

/// Parse an album year, accepting only integers in [1900, 2100]
pub fn parse_album_year(value: &str) -> Option<i32> {
    let year: i32 = value.trim().parse().ok()?;
    (YEAR_MIN..=YEAR_MAX).contains(&year).then_some(year)
}

/// Infer a file-type label from a path or URL
///
/// Query/fragment stripped, last path segment taken, lowercased extension
/// after the last interior dot. A bare extension-like token passes through;
/// everything else is "unknown".
pub fn file_type_label(value: &str) -> String {
    let raw = value.trim().to_lowercase();
    if raw.is_empty() {
        return "unknown".to_string();
    }
    let cleaned = raw.split(['?', '#']).next().unwrap_or(&raw);
    let last_segment = cleaned
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(cleaned);

    if let Some(dot) = last_segment.rfind('.') {
        if dot > 0 && dot < last_segment.len() - 1 {
            return last_segment[dot + 1..].to_string();
        }
    }
    if EXTENSION_TOKEN.is_match(last_segment) {
        return last_segment.to_string();
    }
    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_seconds() {
        assert_eq!(parse_duration_seconds("3:45"), Some(225));
        assert_eq!(parse_duration_seconds("1:02:03"), Some(3723));
        assert_eq!(parse_duration_seconds("abc"), None);
        assert_eq!(parse_duration_seconds(""), None);
        assert_eq!(parse_duration_seconds("1:2:3:4"), None);
        assert_eq!(parse_duration_seconds("10"), None);
    }

    #[test]
    fn test_parse_album_year() {
        assert_eq!(parse_album_year("1973"), Some(1973));
        assert_eq!(parse_album_year(" 2024 "), Some(2024));
        assert_eq!(parse_album_year("1899"), None);
        assert_eq!(parse_album_year("2101"), None);
        assert_eq!(parse_album_year("n/a"), None);
        assert_eq!(parse_album_year(""), None);
    }

    #[test]
    fn test_file_type_label_url_with_query() {
        assert_eq!(file_type_label("https://x/y/cover.JPG?x=1"), "jpg");
        assert_eq!(file_type_label("music/album/track.flac#t=10"), "flac");
    }

    #[test]
    fn test_file_type_label_bare_token() {
        assert_eq!(file_type_label("flac"), "flac");
        assert_eq!(file_type_label("MP3"), "mp3");
    }

    #[test]
    fn test_file_type_label_unknown() {
        assert_eq!(file_type_label(""), "unknown");
        assert_eq!(file_type_label("no extension here"), "unknown");
        assert_eq!(file_type_label(".hidden"), "unknown");
        assert_eq!(file_type_label("trailingdot."), "unknown");
    }

    #[test]
    fn test_file_type_label_windows_path() {
        assert_eq!(file_type_label(r"C:\music\song.OGG"), "ogg");
    }
}
