//! Album-year bar histogram

use crate::core::library::YearBucket;
use crate::render::chart::{self, Padding};
use crate::render::surface::{Surface, TextAlign, TextBaseline, TextStyle, INK};

const PADDING: Padding = Padding::new(10.0, 10.0, 10.0, 18.0);

/// Draw one bar per year of the dense histogram, decade labels below
///
/// Zero-count years keep their slot on the axis so gaps in a collection
/// stay visible.
pub fn draw_year_chart(
    surface: &mut dyn Surface,
    buckets: &[YearBucket],
    width: u32,
    height: u32,
) {
    chart::prepare(surface, width, height);
    if buckets.is_empty() {
        chart::draw_placeholder(surface);
        return;
    }

    let plot = PADDING.plot(surface);
    let max = chart::scale_max(buckets.iter().map(|b| b.value));
    let slot = plot.w / buckets.len() as f32;
    let bar_width = (slot * 0.8).max(1.0);

    for (i, bucket) in buckets.iter().enumerate() {
        let bar_height = (bucket.value / max) as f32 * plot.h;
        if bar_height <= 0.0 {
            continue;
        }
        let x = plot.x + slot * i as f32 + (slot - bar_width) / 2.0;
        surface.fill_rect(
            x,
            plot.bottom() - bar_height,
            bar_width,
            bar_height,
            INK.with_alpha(0.85),
        );
    }

    surface.fill_rect(plot.x, plot.bottom(), plot.w, 1.0, INK.with_alpha(0.4));
    let style = TextStyle::new(INK.with_alpha(0.7), 7.0)
        .align(TextAlign::Center)
        .baseline(TextBaseline::Top);
    for (i, bucket) in buckets.iter().enumerate() {
        if bucket.year % 10 != 0 {
            continue;
        }
        let x = plot.x + slot * (i as f32 + 0.5);
        surface.fill_rect(x, plot.bottom() - 3.0, 1.0, 3.0, INK.with_alpha(0.4));
        surface.fill_text(&bucket.year.to_string(), x, plot.bottom() + 4.0, style);
    }
}
