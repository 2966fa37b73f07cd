//! Peak listening hours, one curve per weekday

use crate::render::chart::{self, Padding};
use crate::render::surface::{
    slice_color, Stroke, Surface, TextAlign, TextBaseline, TextStyle, INK,
};

const PADDING: Padding = Padding::new(12.0, 56.0, 10.0, 20.0);
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Draw seven overlaid hour-of-day curves sharing one y scale
pub fn draw_peak_hours(
    surface: &mut dyn Surface,
    matrix: &[[u64; 24]; 7],
    width: u32,
    height: u32,
) {
    chart::prepare(surface, width, height);
    let total: u64 = matrix.iter().flatten().sum();
    if total == 0 {
        chart::draw_placeholder(surface);
        return;
    }

    let plot = PADDING.plot(surface);
    let max = chart::scale_max(matrix.iter().flatten().map(|&c| c as f64));

    surface.fill_rect(plot.x, plot.bottom(), plot.w, 1.0, INK.with_alpha(0.4));
    let tick_style = TextStyle::new(INK.with_alpha(0.7), 7.0)
        .align(TextAlign::Center)
        .baseline(TextBaseline::Top);
    for hour in (0..24).step_by(3).chain([23]) {
        let x = plot.x_at(hour as f32 / 23.0);
        surface.fill_rect(x, plot.bottom() - 3.0, 1.0, 3.0, INK.with_alpha(0.4));
        surface.fill_text(&hour.to_string(), x, plot.bottom() + 4.0, tick_style);
    }

    for (day, counts) in matrix.iter().enumerate() {
        let positions: Vec<(f32, f32)> = counts
            .iter()
            .enumerate()
            .map(|(hour, &count)| {
                (
                    plot.x_at(hour as f32 / 23.0),
                    plot.y_at((count as f64 / max) as f32),
                )
            })
            .collect();
        surface.begin_path();
        chart::smooth_path_through(surface, &positions);
        surface.stroke(Stroke::solid(slice_color(day), 1.5));
    }

    draw_legend(surface, width as f32);
}

fn draw_legend(surface: &mut dyn Surface, width: f32) {
    let style = TextStyle::new(INK, 7.0).baseline(TextBaseline::Middle);
    for (day, name) in WEEKDAYS.iter().enumerate() {
        let y = 10.0 + day as f32 * 11.0;
        surface.fill_rect(width - 48.0, y - 3.0, 7.0, 7.0, slice_color(day));
        surface.fill_text(name, width - 38.0, y, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::raster::RasterSurface;

    fn inked(surface: &RasterSurface, w: u32, h: u32) -> usize {
        (0..w)
            .flat_map(|x| (0..h).map(move |y| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y) != (236, 229, 218, 255))
            .count()
    }

    #[test]
    fn test_empty_matrix_draws_placeholder() {
        let mut surface = RasterSurface::new(1, 1);
        draw_peak_hours(&mut surface, &[[0; 24]; 7], 300, 120);
        assert!(inked(&surface, 300, 120) > 0);
    }

    #[test]
    fn test_seven_curves_and_legend() {
        let mut surface = RasterSurface::new(1, 1);
        let mut matrix = [[0u64; 24]; 7];
        for (day, row) in matrix.iter_mut().enumerate() {
            for (hour, cell) in row.iter_mut().enumerate() {
                *cell = ((day + hour) % 5) as u64;
            }
        }
        draw_peak_hours(&mut surface, &matrix, 400, 160);
        assert!(inked(&surface, 400, 160) > 300);
        // legend swatch for Sunday
        let sun = slice_color(0);
        let (r, g, b, _) = surface.pixel(400 - 45, 10);
        assert_eq!((r, g, b), (sun.r, sun.g, sun.b));
    }
}
