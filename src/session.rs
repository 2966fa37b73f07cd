//! Session state for the analytics view
//!
//! Owns the loaded collections and the active filter selections, and
//! derives everything else through the pure aggregation functions. The
//! line chart's tween state lives here so a range change can animate from
//! the previously displayed series.

use chrono::FixedOffset;

use crate::core::library::{
    aggregate_library, LibraryFilters, LibraryStats, Metric, FILTER_ALL,
};
use crate::core::genres::group_by_umbrella;
use crate::core::resample::ChartTransition;
use crate::core::timeline::{
    peak_hour_matrix, range_facts, scrobbles_for_range, series_for_range, top_artists, Range,
    RangeFacts,
};
use crate::models::{LibraryRow, Scrobble, SeriesPoint};
use crate::utils::dates::{format_day_key, format_uts};

/// The user's current selections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub range: Range,
    pub metric: Metric,
    pub year_genre_filter: String,
    pub country_genre_filter: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            range: Range::All,
            metric: Metric::Songs,
            year_genre_filter: FILTER_ALL.to_string(),
            country_genre_filter: FILTER_ALL.to_string(),
        }
    }
}

/// One loaded analytics view
pub struct Session {
    pub view: ViewState,
    scrobbles: Vec<Scrobble>,
    library: Vec<LibraryRow>,
    transition: ChartTransition,
}

impl Session {
    /// Build a session; scrobbles are re-sorted most recent first
    pub fn new(mut scrobbles: Vec<Scrobble>, library: Vec<LibraryRow>) -> Self {
        scrobbles.sort_by(|a, b| b.uts.cmp(&a.uts));
        let mut session = Self {
            view: ViewState::default(),
            scrobbles,
            library,
            transition: ChartTransition::new(),
        };
        // commit the initial series so the first frame has a curve
        let initial = session.series();
        session.transition.begin(initial);
        session.transition.finish();
        session
    }

    pub fn scrobbles(&self) -> &[Scrobble] {
        &self.scrobbles
    }

    pub fn library(&self) -> &[LibraryRow] {
        &self.library
    }

    /// The line chart series for the active range
    pub fn series(&self) -> Vec<SeriesPoint> {
        series_for_range(&self.scrobbles, self.view.range)
    }

    /// Change the time range and start the chart tween toward its series
    pub fn set_range(&mut self, range: Range) {
        if self.view.range == range {
            return;
        }
        self.view.range = range;
        let target = self.series();
        self.transition.begin(target);
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.view.metric = metric;
    }

    pub fn set_year_genre_filter(&mut self, umbrella: impl Into<String>) {
        self.view.year_genre_filter = umbrella.into();
    }

    pub fn set_country_genre_filter(&mut self, umbrella: impl Into<String>) {
        self.view.country_genre_filter = umbrella.into();
    }

    /// Tween state for the line chart
    pub fn transition(&mut self) -> &mut ChartTransition {
        &mut self.transition
    }

    /// Fact panel figures for the active range
    pub fn facts(&self) -> RangeFacts {
        range_facts(&self.scrobbles, self.view.range)
    }

    /// Artist ranking over the range-filtered scrobbles
    pub fn top_artists(&self) -> Vec<(String, u64)> {
        top_artists(&scrobbles_for_range(&self.scrobbles, self.view.range))
    }

    /// Genre song counts over the whole library, descending
    pub fn top_tags(&self) -> Vec<(String, u64)> {
        let stats = aggregate_library(&self.library, &LibraryFilters::default());
        stats
            .top_genres
            .into_iter()
            .map(|entry| (entry.name, entry.count))
            .collect()
    }

    /// Display lines for the fact panel under the line chart
    pub fn fact_lines(&self) -> Vec<String> {
        let facts = self.facts();
        let mut lines = vec![format!("{} scrobbles", facts.total)];
        if let Some(busiest) = &facts.busiest {
            lines.push(format!(
                "busiest day: {} ({})",
                format_day_key(&busiest.day),
                busiest.count
            ));
        }
        if let (Some(first), Some(last)) = (facts.first_uts, facts.last_uts) {
            lines.push(format!("{} to {}", format_uts(first), format_uts(last)));
        }
        lines
    }

    /// All library genres listed under their umbrella categories
    pub fn genres_by_umbrella(&self) -> Vec<(String, Vec<String>)> {
        let stats = aggregate_library(&self.library, &LibraryFilters::default());
        group_by_umbrella(&stats.genres)
    }

    /// Weekday x hour scrobble counts at the given local offset
    pub fn peak_hours(&self, offset: FixedOffset) -> [[u64; 24]; 7] {
        peak_hour_matrix(
            &scrobbles_for_range(&self.scrobbles, self.view.range),
            offset,
        )
    }

    /// Library stats under the current filters
    ///
    /// A filter pointing at an umbrella no longer present resets to "all",
    /// and the reset is written back so the view matches what was computed.
    pub fn library_stats(&mut self) -> LibraryStats {
        let filters = LibraryFilters {
            metric: self.view.metric,
            year_genre: self.view.year_genre_filter.clone(),
            country_genre: self.view.country_genre_filter.clone(),
            year_proportion: true,
        };
        let stats = aggregate_library(&self.library, &filters);
        self.view.year_genre_filter = stats.year_genre_filter.clone();
        self.view.country_genre_filter = stats.country_genre_filter.clone();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrobbles() -> Vec<Scrobble> {
        // deliberately unsorted
        vec![
            Scrobble::new(1700000000, "A", "X"),
            Scrobble::new(1700090000, "B", "Z"),
            Scrobble::new(1700003600, "A", "Y"),
        ]
    }

    fn library() -> Vec<LibraryRow> {
        vec![
            LibraryRow {
                artist: "Can".into(),
                album: "Future Days".into(),
                genres: "krautrock".into(),
                ..Default::default()
            },
            LibraryRow {
                artist: "Can".into(),
                album: "Future Days".into(),
                genres: "krautrock".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_new_sorts_and_commits_initial_series() {
        let mut session = Session::new(scrobbles(), vec![]);
        assert_eq!(session.scrobbles()[0].uts, 1700090000);
        assert!(!session.transition().is_active());
        assert_eq!(session.transition().committed().len(), 1); // one month
    }

    #[test]
    fn test_set_range_starts_transition() {
        let mut session = Session::new(scrobbles(), vec![]);
        session.set_range(Range::Week);
        assert!(session.transition().is_active());
        // same range again must not restart anything
        session.transition().finish();
        session.set_range(Range::Week);
        assert!(!session.transition().is_active());
    }

    #[test]
    fn test_facts_and_top_artists_follow_range() {
        let session = Session::new(scrobbles(), vec![]);
        let facts = session.facts();
        assert_eq!(facts.total, 3);
        assert_eq!(facts.last_uts, Some(1700090000));
        let top = session.top_artists();
        assert_eq!(top[0], ("A".to_string(), 2));
    }

    #[test]
    fn test_library_stats_resets_stale_filter() {
        let mut session = Session::new(vec![], library());
        session.set_year_genre_filter("jazz");
        let stats = session.library_stats();
        assert_eq!(stats.year_genre_filter, FILTER_ALL);
        assert_eq!(session.view.year_genre_filter, FILTER_ALL);
        assert_eq!(stats.album_count, 1);
        assert_eq!(stats.song_count, 2);
    }

    #[test]
    fn test_fact_lines() {
        let session = Session::new(scrobbles(), vec![]);
        let lines = session.fact_lines();
        assert_eq!(lines[0], "3 scrobbles");
        assert_eq!(lines[1], "busiest day: 14 Nov 2023 (2)");
        assert_eq!(lines[2], "14 Nov 2023 to 15 Nov 2023");
    }

    #[test]
    fn test_genres_by_umbrella() {
        let session = Session::new(vec![], library());
        assert_eq!(
            session.genres_by_umbrella(),
            vec![("rock".to_string(), vec!["krautrock".to_string()])]
        );
    }

    #[test]
    fn test_top_tags_from_library() {
        let session = Session::new(vec![], library());
        assert_eq!(session.top_tags(), vec![("krautrock".to_string(), 2)]);
    }
}
