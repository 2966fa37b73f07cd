//! Donut chart with side legend

use std::f32::consts::PI;

use crate::render::chart;
use crate::render::surface::{
    slice_color, Surface, TextBaseline, TextStyle, INK, PAPER,
};

/// Hole radius as a fraction of the outer radius
const CUTOUT: f32 = 0.55;
const LEGEND_ROW: f32 = 12.0;

/// Draw a donut of the entries plus a legend with percentage shares
///
/// Slices are ordered descending by count and start at twelve o'clock.
/// Legend rows are truncated to however many fit the surface height.
pub fn draw_donut(
    surface: &mut dyn Surface,
    entries: &[(String, u64)],
    width: u32,
    height: u32,
) {
    chart::prepare(surface, width, height);
    let total: u64 = entries.iter().map(|(_, count)| count).sum();
    if total == 0 {
        chart::draw_placeholder(surface);
        return;
    }

    let mut slices: Vec<&(String, u64)> = entries.iter().filter(|(_, c)| *c > 0).collect();
    slices.sort_by(|a, b| b.1.cmp(&a.1));

    let h = height as f32;
    let radius = (h / 2.0 - 8.0).min(width as f32 / 4.0).max(8.0);
    let (cx, cy) = (radius + 8.0, h / 2.0);

    let mut angle = -PI / 2.0;
    for (i, (_, count)) in slices.iter().enumerate() {
        let sweep = (*count as f32 / total as f32) * 2.0 * PI;
        surface.begin_path();
        surface.move_to(cx + radius * CUTOUT * angle.cos(), cy + radius * CUTOUT * angle.sin());
        surface.line_to(cx + radius * angle.cos(), cy + radius * angle.sin());
        surface.arc(cx, cy, radius, angle, angle + sweep);
        surface.line_to(
            cx + radius * CUTOUT * (angle + sweep).cos(),
            cy + radius * CUTOUT * (angle + sweep).sin(),
        );
        surface.arc(cx, cy, radius * CUTOUT, angle + sweep, angle);
        surface.close_path();
        surface.fill(slice_color(i));
        angle += sweep;
    }
    // hole stays background-colored even with rounding overlap
    surface.begin_path();
    surface.arc(cx, cy, radius * CUTOUT - 1.0, 0.0, 2.0 * PI);
    surface.fill(PAPER);

    draw_legend(surface, &slices, total, cx + radius + 14.0);
}

fn draw_legend(surface: &mut dyn Surface, slices: &[&(String, u64)], total: u64, x: f32) {
    let style = TextStyle::new(INK, 7.0).baseline(TextBaseline::Middle);
    let rows_that_fit = ((surface.height() as f32 - 8.0) / LEGEND_ROW) as usize;
    for (i, (name, count)) in slices.iter().take(rows_that_fit).enumerate() {
        let y = 8.0 + i as f32 * LEGEND_ROW;
        surface.fill_rect(x, y - 3.0, 7.0, 7.0, slice_color(i));
        let pct = *count as f32 * 100.0 / total as f32;
        surface.fill_text(&format!("{name} {pct:.1}%"), x + 11.0, y, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::raster::RasterSurface;

    fn paper(surface: &RasterSurface, x: u32, y: u32) -> bool {
        surface.pixel(x, y) == (236, 229, 218, 255)
    }

    #[test]
    fn test_zero_total_draws_placeholder() {
        let mut surface = RasterSurface::new(1, 1);
        draw_donut(&mut surface, &[("empty".to_string(), 0)], 200, 100);
        let inked = (0..200)
            .flat_map(|x| (0..100).map(move |y| (x, y)))
            .filter(|&(x, y)| !paper(&surface, x, y))
            .count();
        assert!(inked > 0);
    }

    #[test]
    fn test_ring_filled_hole_empty() {
        let mut surface = RasterSurface::new(1, 1);
        let entries = vec![("rock".to_string(), 3), ("jazz".to_string(), 1)];
        draw_donut(&mut surface, &entries, 240, 120);
        // center of the donut: radius 52, cx = 60, cy = 60
        assert!(paper(&surface, 60, 60));
        // a point inside the ring band, straight up from center
        assert!(!paper(&surface, 60, 60 - 45));
        // legend text area has ink
        let legend_inked = (130..240)
            .flat_map(|x| (0..40).map(move |y| (x, y)))
            .filter(|&(x, y)| !paper(&surface, x, y))
            .count();
        assert!(legend_inked > 0);
    }

    #[test]
    fn test_majority_slice_covers_right_side() {
        let mut surface = RasterSurface::new(1, 1);
        // 3/4 of the sweep starts at the top and covers the right side
        let entries = vec![("big".to_string(), 3), ("small".to_string(), 1)];
        draw_donut(&mut surface, &entries, 240, 120);
        let big = slice_color(0);
        let (r, g, b, _) = surface.pixel(60 + 45, 60);
        assert_eq!((r, g, b), (big.r, big.g, big.b));
    }
}
