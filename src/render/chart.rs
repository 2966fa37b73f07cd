//! Shared chart scaffolding
//!
//! Sizing, the "no data" placeholder, and the curve smoothing every line
//! style chart uses.

use crate::render::surface::{Surface, TextAlign, TextBaseline, TextStyle, INK, PAPER};

/// Inner margins between the surface edge and the plot area
#[derive(Debug, Clone, Copy)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Plot rectangle for the surface's current size
    pub fn plot(&self, surface: &dyn Surface) -> Plot {
        let w = surface.width() as f32;
        let h = surface.height() as f32;
        Plot {
            x: self.left,
            y: self.top,
            w: (w - self.left - self.right).max(1.0),
            h: (h - self.top - self.bottom).max(1.0),
        }
    }
}

/// The axis-aligned drawing area of a chart
#[derive(Debug, Clone, Copy)]
pub struct Plot {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Plot {
    /// X pixel for a horizontal fraction in [0, 1]
    pub fn x_at(&self, frac: f32) -> f32 {
        self.x + self.w * frac
    }

    /// Y pixel for a vertical fraction, 0 at the bottom edge
    pub fn y_at(&self, frac: f32) -> f32 {
        self.y + self.h * (1.0 - frac)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Resize and clear the surface for a fresh chart
pub fn prepare(surface: &mut dyn Surface, width: u32, height: u32) {
    surface.set_size(width, height);
    surface.clear(PAPER);
}

/// Centered "no data" message, used by every renderer on empty input
pub fn draw_placeholder(surface: &mut dyn Surface) {
    let (w, h) = (surface.width() as f32, surface.height() as f32);
    surface.fill_text(
        "No data available",
        w / 2.0,
        h / 2.0,
        TextStyle::new(INK.with_alpha(0.6), 7.0)
            .align(TextAlign::Center)
            .baseline(TextBaseline::Middle),
    );
}

/// Largest value, floored at 1 so scaling never divides by zero
pub fn scale_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(1.0_f64, f64::max)
}

/// Append a smoothed curve through `points` to the current path
///
/// Catmull-Rom derived control points: each segment's handles pull toward
/// the neighbouring points, giving the canvas-style smooth line. With two
/// points this degenerates to a straight segment.
pub fn smooth_path_through(surface: &mut dyn Surface, points: &[(f32, f32)]) {
    let n = points.len();
    if n == 0 {
        return;
    }
    surface.move_to(points[0].0, points[0].1);
    for i in 0..n.saturating_sub(1) {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];
        let c1 = (p1.0 + (p2.0 - p0.0) / 6.0, p1.1 + (p2.1 - p0.1) / 6.0);
        let c2 = (p2.0 - (p3.0 - p1.0) / 6.0, p2.1 - (p3.1 - p1.1) / 6.0);
        surface.bezier_curve_to(c1.0, c1.1, c2.0, c2.1, p2.0, p2.1);
    }
}
