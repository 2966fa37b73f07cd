//! Abstract drawing surface
//!
//! Renderers draw through this trait so they can be exercised headlessly.
//! The API mirrors an immediate-mode 2D canvas: build a path, then fill or
//! stroke it.

/// RGBA color, alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Foreground used for axes, labels and default curves
pub const INK: Color = Color::rgb(78, 71, 56);
/// Background every chart clears to
pub const PAPER: Color = Color::rgb(236, 229, 218);

/// Stroke settings, dash as (on, off) run lengths in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub dash: Option<(f32, f32)>,
}

impl Stroke {
    pub const fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub const fn dashed(color: Color, width: f32, on: f32, off: f32) -> Self {
        Self {
            color,
            width,
            dash: Some((on, off)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
}

/// Text settings for [`Surface::fill_text`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    /// Glyph height in pixels
    pub size: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextStyle {
    pub const fn new(color: Color, size: f32) -> Self {
        Self {
            color,
            size,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }

    pub const fn align(self, align: TextAlign) -> Self {
        Self { align, ..self }
    }

    pub const fn baseline(self, baseline: TextBaseline) -> Self {
        Self { baseline, ..self }
    }
}

/// Minimal 2D drawing sink
///
/// Path state is implicit: `begin_path` resets it, the move/line/curve/arc
/// calls extend it, and `fill`/`stroke` consume the current path without
/// clearing it.
pub trait Surface {
    fn set_size(&mut self, width: u32, height: u32);
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self, color: Color);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn bezier_curve_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32);
    /// Append a circular arc, sweeping from `start` to `end` radians
    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32);
    fn close_path(&mut self);

    fn fill(&mut self, color: Color);
    fn stroke(&mut self, stroke: Stroke);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
}

/// Mix two colors component-wise, `t` in [0, 1] toward `b`
pub fn mix_rgb(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color {
        r: lerp(a.r, b.r),
        g: lerp(a.g, b.g),
        b: lerp(a.b, b.b),
        a: a.a + (b.a - a.a) * t,
    }
}

/// Slice color for donut charts and the weekday legend
///
/// Rotates hue/saturation/lightness with co-prime steps so neighbouring
/// slices stay distinguishable at any slice count.
pub fn slice_color(index: usize) -> Color {
    let i = index as u32;
    let hue = (34 + (31 * i) % 56) as f32;
    let sat = (20 + (17 * i) % 18) as f32 / 100.0;
    let light = (28 + (13 * i) % 30) as f32 / 100.0;
    hsl_to_rgb(hue, sat, light)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    Color::rgb(
        ((r1 + m) * 255.0).round() as u8,
        ((g1 + m) * 255.0).round() as u8,
        ((b1 + m) * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_rgb_endpoints() {
        assert_eq!(mix_rgb(INK, PAPER, 0.0), INK);
        assert_eq!(mix_rgb(INK, PAPER, 1.0), PAPER);
        let mid = mix_rgb(Color::rgb(0, 0, 0), Color::rgb(100, 200, 50), 0.5);
        assert_eq!((mid.r, mid.g, mid.b), (50, 100, 25));
    }

    #[test]
    fn test_slice_colors_distinct_for_small_indexes() {
        let colors: Vec<Color> = (0..8).map(slice_color).collect();
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                assert_ne!(colors[i], colors[j], "slices {i} and {j} collide");
            }
        }
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::rgb(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Color::rgb(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Color::rgb(0, 0, 255));
    }
}
