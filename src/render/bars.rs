//! Horizontal bar chart for top tags

use crate::render::chart;
use crate::render::surface::{Surface, TextAlign, TextBaseline, TextStyle, INK};

/// Rows shown regardless of how many entries exist
const MAX_BARS: usize = 8;
const LABEL_WIDTH: f32 = 90.0;
const VALUE_WIDTH: f32 = 28.0;

/// Draw up to eight entries as horizontal bars, widest at the top
pub fn draw_bar_chart(
    surface: &mut dyn Surface,
    entries: &[(String, u64)],
    width: u32,
    height: u32,
) {
    chart::prepare(surface, width, height);
    if entries.is_empty() {
        chart::draw_placeholder(surface);
        return;
    }

    let shown = &entries[..entries.len().min(MAX_BARS)];
    let max = chart::scale_max(shown.iter().map(|(_, count)| *count as f64));
    let bar_area = (width as f32 - LABEL_WIDTH - VALUE_WIDTH - 16.0).max(1.0);
    let row_height = height as f32 / shown.len() as f32;
    let bar_height = (row_height * 0.55).min(14.0);

    let label_style = TextStyle::new(INK, 7.0).baseline(TextBaseline::Middle);
    let value_style = TextStyle::new(INK.with_alpha(0.7), 7.0)
        .align(TextAlign::Right)
        .baseline(TextBaseline::Middle);

    for (i, (name, count)) in shown.iter().enumerate() {
        let center_y = row_height * (i as f32 + 0.5);
        let bar_width = (*count as f64 / max) as f32 * bar_area;
        surface.fill_text(name, 6.0, center_y, label_style);
        surface.fill_rect(
            LABEL_WIDTH,
            center_y - bar_height / 2.0,
            bar_width.max(1.0),
            bar_height,
            INK.with_alpha(0.8),
        );
        surface.fill_text(
            &count.to_string(),
            width as f32 - 6.0,
            center_y,
            value_style,
        );
    }
}
