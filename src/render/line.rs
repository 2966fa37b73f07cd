//! Scrobbles-over-time line chart

use chrono::Datelike;

use crate::core::timeline::Range;
use crate::models::SeriesPoint;
use crate::render::chart::{self, Padding};
use crate::render::surface::{Stroke, Surface, TextAlign, TextBaseline, TextStyle, INK};

const PADDING: Padding = Padding::new(34.0, 12.0, 12.0, 22.0);
/// Minimum pixels between two x-axis labels
const TICK_SPACING: f32 = 30.0;

/// Draw the scrobble series for the active range
///
/// A single point renders as a dot; two or more get the smoothed curve.
pub fn draw_line_chart(
    surface: &mut dyn Surface,
    points: &[SeriesPoint],
    range: Range,
    width: u32,
    height: u32,
) {
    chart::prepare(surface, width, height);
    if points.is_empty() {
        chart::draw_placeholder(surface);
        return;
    }

    let plot = PADDING.plot(surface);
    let max = chart::scale_max(points.iter().map(|p| p.count));

    let positions: Vec<(f32, f32)> = points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x_frac = if points.len() == 1 {
                0.5
            } else {
                i as f32 / (points.len() - 1) as f32
            };
            (plot.x_at(x_frac), plot.y_at((point.count / max) as f32))
        })
        .collect();

    draw_y_axis(surface, &plot, max);
    draw_x_ticks(surface, &plot, points, &positions, range);

    surface.begin_path();
    if positions.len() == 1 {
        let (x, y) = positions[0];
        surface.arc(x, y, 3.0, 0.0, std::f32::consts::TAU);
        surface.fill(INK);
    } else {
        chart::smooth_path_through(surface, &positions);
        surface.stroke(Stroke::solid(INK, 2.0));
    }
}

fn draw_y_axis(surface: &mut dyn Surface, plot: &chart::Plot, max: f64) {
    let style = TextStyle::new(INK.with_alpha(0.7), 7.0)
        .align(TextAlign::Right)
        .baseline(TextBaseline::Middle);
    surface.fill_text(&format!("{}", max.round() as i64), plot.x - 4.0, plot.y, style);
    surface.fill_text("0", plot.x - 4.0, plot.bottom(), style);
    surface.fill_rect(plot.x, plot.bottom(), plot.w, 1.0, INK.with_alpha(0.4));
}

/// Tick label for one point, or None when the range strategy skips it
fn tick_label(point: &SeriesPoint, index: usize, last: usize, range: Range) -> Option<String> {
    match range {
        // every point is a day of the week
        Range::Week => point.date.map(|d| d.format("%a").to_string()),
        // first, last, and round day numbers
        Range::Month => {
            let date = point.date?;
            if index == 0 || index == last || date.day() % 5 == 0 {
                Some(date.day().to_string())
            } else {
                None
            }
        }
        // month boundaries
        Range::Year => {
            let date = point.date?;
            (date.day() == 1 || index == 0).then(|| date.format("%b").to_string())
        }
        // year boundaries of the monthly rollup
        Range::All => {
            let date = point.date?;
            (date.month() == 1 || index == 0).then(|| date.format("%Y").to_string())
        }
    }
}

fn draw_x_ticks(
    surface: &mut dyn Surface,
    plot: &chart::Plot,
    points: &[SeriesPoint],
    positions: &[(f32, f32)],
    range: Range,
) {
    let style = TextStyle::new(INK.with_alpha(0.7), 7.0)
        .align(TextAlign::Center)
        .baseline(TextBaseline::Top);
    let last = points.len() - 1;
    let mut previous_x = f32::MIN;
    for (i, point) in points.iter().enumerate() {
        let Some(label) = tick_label(point, i, last, range) else {
            continue;
        };
        let x = positions[i].0;
        // never crowd labels; the first and last always fit by spacing
        if x - previous_x < TICK_SPACING && i != last {
            continue;
        }
        surface.fill_text(&label, x, plot.bottom() + 4.0, style);
        surface.fill_rect(x, plot.bottom() - 3.0, 1.0, 3.0, INK.with_alpha(0.4));
        previous_x = x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::raster::RasterSurface;
    use chrono::NaiveDate;

    fn inked_pixels(surface: &RasterSurface, w: u32, h: u32) -> usize {
        (0..w)
            .flat_map(|x| (0..h).map(move |y| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y) != (236, 229, 218, 255))
            .count()
    }

    fn day_series(days: u32) -> Vec<SeriesPoint> {
        (0..days)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2023, 11, 1 + i).unwrap();
                SeriesPoint::new(date.format("%m-%d").to_string(), (i % 5) as f64, Some(date))
            })
            .collect()
    }

    #[test]
    fn test_empty_series_draws_placeholder() {
        let mut surface = RasterSurface::new(1, 1);
        draw_line_chart(&mut surface, &[], Range::All, 200, 100);
        assert_eq!(surface.width(), 200);
        assert!(inked_pixels(&surface, 200, 100) > 0);
    }

    #[test]
    fn test_curve_and_single_dot() {
        let mut surface = RasterSurface::new(1, 1);
        draw_line_chart(&mut surface, &day_series(7), Range::Week, 300, 120);
        let curve = inked_pixels(&surface, 300, 120);
        assert!(curve > 100);

        draw_line_chart(&mut surface, &day_series(1), Range::Week, 300, 120);
        assert!(inked_pixels(&surface, 300, 120) > 0);
    }

    #[test]
    fn test_tick_strategy_per_range() {
        let series = day_series(28);
        let last = series.len() - 1;
        // month: first, last and multiples of 5
        assert_eq!(tick_label(&series[0], 0, last, Range::Month).as_deref(), Some("1"));
        assert_eq!(tick_label(&series[1], 1, last, Range::Month), None);
        assert_eq!(tick_label(&series[4], 4, last, Range::Month).as_deref(), Some("5"));
        assert_eq!(tick_label(&series[last], last, last, Range::Month).as_deref(), Some("28"));
        // week: weekday abbreviation everywhere
        assert_eq!(tick_label(&series[0], 0, last, Range::Week).as_deref(), Some("Wed"));
        // year: month boundaries only
        assert_eq!(tick_label(&series[0], 0, last, Range::Year).as_deref(), Some("Nov"));
        assert_eq!(tick_label(&series[3], 3, last, Range::Year), None);
    }

    #[test]
    fn test_all_range_year_boundaries() {
        let points: Vec<SeriesPoint> = (0..14)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2022 + i / 12, 1 + (i % 12) as u32, 1).unwrap();
                SeriesPoint::new(date.format("%Y-%m").to_string(), 1.0, Some(date))
            })
            .collect();
        let last = points.len() - 1;
        assert_eq!(tick_label(&points[0], 0, last, Range::All).as_deref(), Some("2022"));
        assert_eq!(tick_label(&points[5], 5, last, Range::All), None);
        assert_eq!(tick_label(&points[12], 12, last, Range::All).as_deref(), Some("2023"));
    }
}
