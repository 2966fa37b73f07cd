//! Track duration distribution

use crate::core::library::{DurationHistogram, DURATION_CAP_SECONDS};
use crate::render::chart::{self, Padding};
use crate::render::surface::{Stroke, Surface, TextAlign, TextBaseline, TextStyle, INK};
use crate::utils::dates::format_minutes_seconds;

const PADDING: Padding = Padding::new(12.0, 12.0, 14.0, 20.0);

/// Draw the 30-second-bin distribution with the dashed mean marker
pub fn draw_duration_chart(
    surface: &mut dyn Surface,
    histogram: Option<&DurationHistogram>,
    width: u32,
    height: u32,
) {
    chart::prepare(surface, width, height);
    let Some(histogram) = histogram else {
        chart::draw_placeholder(surface);
        return;
    };

    let plot = PADDING.plot(surface);
    let max = chart::scale_max(histogram.bins.iter().map(|(_, count)| *count as f64));
    let span = DURATION_CAP_SECONDS as f32;

    let positions: Vec<(f32, f32)> = histogram
        .bins
        .iter()
        .map(|(bin, count)| {
            (
                plot.x_at(*bin as f32 / span),
                plot.y_at((*count as f64 / max) as f32),
            )
        })
        .collect();

    // minute ticks along the x axis
    surface.fill_rect(plot.x, plot.bottom(), plot.w, 1.0, INK.with_alpha(0.4));
    let tick_style = TextStyle::new(INK.with_alpha(0.7), 7.0)
        .align(TextAlign::Center)
        .baseline(TextBaseline::Top);
    for minute in 0..=(DURATION_CAP_SECONDS / 60) {
        let x = plot.x_at(minute as f32 * 60.0 / span);
        surface.fill_rect(x, plot.bottom() - 3.0, 1.0, 3.0, INK.with_alpha(0.4));
        if minute % 2 == 0 {
            surface.fill_text(&minute.to_string(), x, plot.bottom() + 4.0, tick_style);
        }
    }

    surface.begin_path();
    chart::smooth_path_through(surface, &positions);
    surface.stroke(Stroke::solid(INK, 2.0));

    // mean marker
    let mean = histogram.mean_seconds.clamp(0.0, DURATION_CAP_SECONDS as f64) as f32;
    let mean_x = plot.x_at(mean / span);
    surface.begin_path();
    surface.move_to(mean_x, plot.y);
    surface.line_to(mean_x, plot.bottom());
    surface.stroke(Stroke::dashed(INK.with_alpha(0.8), 1.0, 4.0, 3.0));
    surface.fill_text(
        &format_minutes_seconds(histogram.mean_seconds),
        mean_x + 4.0,
        plot.y + 2.0,
        TextStyle::new(INK, 7.0).baseline(TextBaseline::Top),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::library::duration_histogram;
    use crate::render::raster::RasterSurface;

    fn inked(surface: &RasterSurface, w: u32, h: u32) -> usize {
        (0..w)
            .flat_map(|x| (0..h).map(move |y| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y) != (236, 229, 218, 255))
            .count()
    }

    #[test]
    fn test_none_draws_placeholder() {
        let mut surface = RasterSurface::new(1, 1);
        draw_duration_chart(&mut surface, None, 200, 100);
        assert!(inked(&surface, 200, 100) > 0);
    }

    #[test]
    fn test_curve_and_mean_marker() {
        let mut surface = RasterSurface::new(1, 1);
        let hist = duration_histogram(&[200, 210, 220, 400]).unwrap();
        draw_duration_chart(&mut surface, Some(&hist), 400, 140);
        // the mean column carries dashed marker pixels above the curve peak
        let plot_w = 400.0 - 24.0;
        let mean_x = (12.0 + plot_w * (hist.mean_seconds as f32 / 960.0)) as u32;
        let column = (14..40)
            .filter(|&y| surface.pixel(mean_x, y) != (236, 229, 218, 255))
            .count();
        assert!(column > 0);
        assert!(inked(&surface, 400, 140) > 100);
    }
}
