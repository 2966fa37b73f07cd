//! Series resampling for animated chart transitions
//!
//! When a filter change replaces a chart's series, the old curve is
//! reshaped onto the new series' points and blended toward it over a few
//! frames. This is a visual interpolation aid only, not statistical
//! resampling.

use crate::models::SeriesPoint;

/// Reshape `source` onto `target`'s points, linearly interpolating the
/// source value curve across the target's index positions.
///
/// Empty target yields an empty result. An empty source yields the target's
/// points with counts forced to zero. A single-point source is used as a
/// constant.
pub fn resample(source: &[SeriesPoint], target: &[SeriesPoint]) -> Vec<SeriesPoint> {
    if target.is_empty() {
        return Vec::new();
    }
    target
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let count = if source.is_empty() {
                0.0
            } else if source.len() == 1 || target.len() == 1 {
                source[0].count
            } else {
                // map target index i onto the fractional source index
                let pos = i as f64 * (source.len() - 1) as f64 / (target.len() - 1) as f64;
                let lo = pos.floor() as usize;
                let hi = (lo + 1).min(source.len() - 1);
                let frac = pos - lo as f64;
                source[lo].count * (1.0 - frac) + source[hi].count * frac
            };
            point.with_count(count)
        })
        .collect()
}

/// Per-index linear mix of two equal-shaped series, keeping `to`'s labels
/// and dates
pub fn blend(from: &[SeriesPoint], to: &[SeriesPoint], progress: f64) -> Vec<SeriesPoint> {
    let progress = progress.clamp(0.0, 1.0);
    to.iter()
        .enumerate()
        .map(|(i, point)| {
            let start = from.get(i).map_or(0.0, |p| p.count);
            point.with_count(start + (point.count - start) * progress)
        })
        .collect()
}

/// Tween bookkeeping for one chart: holds the last committed series and
/// blends it toward a new target.
///
/// Beginning a new transition while one is in flight supersedes it: the
/// current blended shape becomes the new starting curve and the old
/// target is abandoned.
#[derive(Debug, Default, Clone)]
pub struct ChartTransition {
    committed: Vec<SeriesPoint>,
    from: Vec<SeriesPoint>,
    target: Vec<SeriesPoint>,
    progress: f64,
    active: bool,
}

impl ChartTransition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start blending toward `target`, superseding any in-flight transition
    pub fn begin(&mut self, target: Vec<SeriesPoint>) {
        let current = if self.active {
            blend(&self.from, &self.target, self.progress)
        } else {
            self.committed.clone()
        };
        self.from = resample(&current, &target);
        self.target = target;
        self.progress = 0.0;
        self.active = true;
    }

    /// The series to draw at `progress` in [0, 1]
    pub fn frame(&mut self, progress: f64) -> Vec<SeriesPoint> {
        if !self.active {
            return self.committed.clone();
        }
        self.progress = progress.clamp(0.0, 1.0);
        blend(&self.from, &self.target, self.progress)
    }

    /// Commit the target as the displayed series and end the transition
    pub fn finish(&mut self) -> &[SeriesPoint] {
        if self.active {
            self.committed = std::mem::take(&mut self.target);
            self.from.clear();
            self.progress = 0.0;
            self.active = false;
        }
        &self.committed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The last fully committed series
    pub fn committed(&self) -> &[SeriesPoint] {
        &self.committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(counts: &[f64]) -> Vec<SeriesPoint> {
        counts
            .iter()
            .enumerate()
            .map(|(i, c)| SeriesPoint::new(format!("p{i}"), *c, None))
            .collect()
    }

    fn counts(points: &[SeriesPoint]) -> Vec<f64> {
        points.iter().map(|p| p.count).collect()
    }

    #[test]
    fn test_resample_empty_target() {
        assert!(resample(&series(&[1.0, 2.0]), &[]).is_empty());
    }

    #[test]
    fn test_resample_empty_source_zero_fills() {
        let target = series(&[3.0, 4.0, 5.0]);
        let out = resample(&[], &target);
        assert_eq!(counts(&out), vec![0.0, 0.0, 0.0]);
        assert_eq!(out[1].label, "p1");
    }

    #[test]
    fn test_resample_single_point_source_is_constant() {
        let out = resample(&series(&[7.0]), &series(&[0.0, 0.0, 0.0]));
        assert_eq!(counts(&out), vec![7.0, 7.0, 7.0]);
    }

    #[test]
    fn test_resample_same_shape_is_identity() {
        let source = series(&[1.0, 5.0, 2.0, 8.0]);
        let out = resample(&source, &source);
        for (a, b) in counts(&out).iter().zip([1.0, 5.0, 2.0, 8.0]) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_resample_upsamples_linearly() {
        let out = resample(&series(&[0.0, 10.0]), &series(&[0.0; 5]));
        assert_eq!(counts(&out), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn test_blend_midpoint() {
        let from = series(&[0.0, 10.0]);
        let to = series(&[10.0, 0.0]);
        assert_eq!(counts(&blend(&from, &to, 0.5)), vec![5.0, 5.0]);
        assert_eq!(counts(&blend(&from, &to, 1.0)), vec![10.0, 0.0]);
    }

    #[test]
    fn test_transition_supersede_starts_from_blended_shape() {
        let mut transition = ChartTransition::new();
        transition.begin(series(&[0.0, 10.0]));
        transition.frame(1.0);
        transition.finish();
        assert_eq!(counts(transition.committed()), vec![0.0, 10.0]);

        // halfway toward [20, 20], then supersede with [0, 0]
        transition.begin(series(&[20.0, 20.0]));
        let mid = transition.frame(0.5);
        assert_eq!(counts(&mid), vec![10.0, 15.0]);
        transition.begin(series(&[0.0, 0.0]));
        assert_eq!(counts(&transition.frame(0.0)), vec![10.0, 15.0]);
        assert_eq!(counts(&transition.frame(1.0)), vec![0.0, 0.0]);
        transition.finish();
        assert_eq!(counts(transition.committed()), vec![0.0, 0.0]);
    }

    #[test]
    fn test_inactive_frame_returns_committed() {
        let mut transition = ChartTransition::new();
        assert!(transition.frame(0.7).is_empty());
        assert!(!transition.is_active());
    }
}
