//! Headless raster backend
//!
//! Flattens paths into polylines and rasterizes them into an RGBA buffer:
//! even-odd scanline fills sampled at pixel centers, strokes as filled
//! quads per segment. Good enough for chart-sized geometry and for golden
//! PNG comparisons in tests.

use std::io::Cursor;

use image::{ImageOutputFormat, Rgba, RgbaImage};

use crate::error::Error;
use crate::render::font;
use crate::render::surface::{Color, Stroke, Surface, TextAlign, TextBaseline, TextStyle};

/// Segments used to flatten one cubic bezier
const BEZIER_STEPS: usize = 16;

/// In-memory drawing surface backed by an RGBA image
pub struct RasterSurface {
    image: RgbaImage,
    subpaths: Vec<Vec<(f32, f32)>>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
            subpaths: Vec::new(),
        }
    }

    /// Encode the current buffer as PNG
    pub fn to_png(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
        Ok(bytes)
    }

    /// Pixel color at (x, y), for assertions
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let p = self.image.get_pixel(x, y).0;
        (p[0], p[1], p[2], p[3])
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let alpha = color.a.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if alpha >= 1.0 {
            self.image.put_pixel(x, y, Rgba([color.r, color.g, color.b, 255]));
            return;
        }
        let under = self.image.get_pixel(x, y).0;
        let mix = |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8;
        self.image.put_pixel(
            x,
            y,
            Rgba([
                mix(color.r, under[0]),
                mix(color.g, under[1]),
                mix(color.b, under[2]),
                mix(255, under[3]),
            ]),
        );
    }

    fn last_point(&self) -> Option<(f32, f32)> {
        self.subpaths.last().and_then(|sub| sub.last().copied())
    }

    fn push_point(&mut self, x: f32, y: f32) {
        match self.subpaths.last_mut() {
            Some(sub) => sub.push((x, y)),
            None => self.subpaths.push(vec![(x, y)]),
        }
    }

    /// Fill the polygon formed by closing every subpath, even-odd rule
    fn fill_subpaths(&mut self, color: Color) {
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for sub in &self.subpaths {
            for &(_, y) in sub {
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
        if min_y > max_y {
            return;
        }
        let y_start = (min_y.floor().max(0.0)) as i64;
        let y_end = (max_y.ceil() as i64).min(self.image.height() as i64 - 1);

        let mut crossings: Vec<f32> = Vec::new();
        for y in y_start..=y_end {
            let sample = y as f32 + 0.5;
            crossings.clear();
            for sub in &self.subpaths {
                if sub.len() < 2 {
                    continue;
                }
                for i in 0..sub.len() {
                    let (x1, y1) = sub[i];
                    let (x2, y2) = sub[(i + 1) % sub.len()];
                    if (y1 <= sample) != (y2 <= sample) {
                        crossings.push(x1 + (sample - y1) / (y2 - y1) * (x2 - x1));
                    }
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let x_start = (pair[0] - 0.5).ceil().max(0.0) as i64;
                let x_end = ((pair[1] - 0.5).floor() as i64).min(self.image.width() as i64 - 1);
                for x in x_start..=x_end {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Rasterize one segment as a width-thick quad
    fn stroke_segment(&mut self, a: (f32, f32), b: (f32, f32), width: f32, color: Color) {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len = (dx * dx + dy * dy).sqrt();
        let half = (width / 2.0).max(0.5);
        if len < 1e-6 {
            // dot
            let saved = std::mem::take(&mut self.subpaths);
            self.subpaths = vec![vec![
                (a.0 - half, a.1 - half),
                (a.0 + half, a.1 - half),
                (a.0 + half, a.1 + half),
                (a.0 - half, a.1 + half),
            ]];
            self.fill_subpaths(color);
            self.subpaths = saved;
            return;
        }
        let (nx, ny) = (-dy / len * half, dx / len * half);
        let quad = vec![
            (a.0 + nx, a.1 + ny),
            (b.0 + nx, b.1 + ny),
            (b.0 - nx, b.1 - ny),
            (a.0 - nx, a.1 - ny),
        ];
        let saved = std::mem::take(&mut self.subpaths);
        self.subpaths = vec![quad];
        self.fill_subpaths(color);
        self.subpaths = saved;
    }

    fn stroke_polyline(&mut self, points: &[(f32, f32)], stroke: Stroke) {
        match stroke.dash {
            None => {
                for pair in points.windows(2) {
                    self.stroke_segment(pair[0], pair[1], stroke.width, stroke.color);
                }
            }
            Some((on, off)) => {
                let period = (on + off).max(0.1);
                // distance along the polyline decides pen-down state
                let mut travelled = 0.0f32;
                for pair in points.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    let seg_len = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
                    if seg_len < 1e-6 {
                        continue;
                    }
                    let mut offset = 0.0f32;
                    while offset < seg_len {
                        let phase = (travelled + offset) % period;
                        let (down, run) = if phase < on {
                            (true, on - phase)
                        } else {
                            (false, period - phase)
                        };
                        let end = (offset + run).min(seg_len);
                        if down {
                            let at = |d: f32| {
                                (
                                    a.0 + (b.0 - a.0) * d / seg_len,
                                    a.1 + (b.1 - a.1) * d / seg_len,
                                )
                            };
                            self.stroke_segment(at(offset), at(end), stroke.width, stroke.color);
                        }
                        offset = end;
                    }
                    travelled += seg_len;
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        if width != self.image.width() || height != self.image.height() {
            self.image = RgbaImage::new(width.max(1), height.max(1));
        }
        self.subpaths.clear();
    }

    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn clear(&mut self, color: Color) {
        let pixel = Rgba([color.r, color.g, color.b, 255]);
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.subpaths.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push_point(x, y);
    }

    fn bezier_curve_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        let Some((px, py)) = self.last_point() else {
            self.move_to(x, y);
            return;
        };
        for step in 1..=BEZIER_STEPS {
            let t = step as f32 / BEZIER_STEPS as f32;
            let u = 1.0 - t;
            let bx = u * u * u * px
                + 3.0 * u * u * t * c1x
                + 3.0 * u * t * t * c2x
                + t * t * t * x;
            let by = u * u * u * py
                + 3.0 * u * u * t * c1y
                + 3.0 * u * t * t * c2y
                + t * t * t * y;
            self.push_point(bx, by);
        }
    }

    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32) {
        let sweep = end - start;
        let steps = ((sweep.abs() * radius.max(1.0) / 3.0).ceil() as usize).clamp(8, 128);
        for step in 0..=steps {
            let angle = start + sweep * step as f32 / steps as f32;
            let (x, y) = (cx + radius * angle.cos(), cy + radius * angle.sin());
            if step == 0 && self.last_point().is_none() {
                self.move_to(x, y);
            } else {
                self.push_point(x, y);
            }
        }
    }

    fn close_path(&mut self) {
        if let Some(sub) = self.subpaths.last_mut() {
            if let Some(&first) = sub.first() {
                if sub.last() != Some(&first) {
                    sub.push(first);
                }
            }
        }
    }

    fn fill(&mut self, color: Color) {
        self.fill_subpaths(color);
    }

    fn stroke(&mut self, stroke: Stroke) {
        let subpaths = std::mem::take(&mut self.subpaths);
        for sub in &subpaths {
            if sub.len() == 1 {
                self.stroke_segment(sub[0], sub[0], stroke.width, stroke.color);
            } else {
                self.stroke_polyline(sub, stroke);
            }
        }
        self.subpaths = subpaths;
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let x_start = x.floor().max(0.0) as i64;
        let y_start = y.floor().max(0.0) as i64;
        let x_end = ((x + w).ceil() as i64).min(self.image.width() as i64);
        let y_end = ((y + h).ceil() as i64).min(self.image.height() as i64);
        for py in y_start..y_end {
            for px in x_start..x_end {
                self.blend_pixel(px, py, color);
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        let scale = ((style.size / font::GLYPH_HEIGHT as f32).round() as i64).max(1);
        let char_count = text.chars().count() as i64;
        if char_count == 0 {
            return;
        }
        let text_width =
            (char_count * font::ADVANCE as i64 - (font::ADVANCE - font::GLYPH_WIDTH) as i64) * scale;
        let text_height = font::GLYPH_HEIGHT as i64 * scale;

        let mut pen_x = match style.align {
            TextAlign::Left => x as i64,
            TextAlign::Center => x as i64 - text_width / 2,
            TextAlign::Right => x as i64 - text_width,
        };
        let top = match style.baseline {
            TextBaseline::Top => y as i64,
            TextBaseline::Middle => y as i64 - text_height / 2,
            TextBaseline::Alphabetic => y as i64 - text_height,
        };

        for c in text.chars() {
            if let Some(rows) = font::glyph(c) {
                for (row_index, row) in rows.iter().enumerate() {
                    for col in 0..font::GLYPH_WIDTH {
                        if row & (1 << (font::GLYPH_WIDTH - 1 - col)) == 0 {
                            continue;
                        }
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.blend_pixel(
                                    pen_x + col as i64 * scale + sx,
                                    top + row_index as i64 * scale + sy,
                                    style.color,
                                );
                            }
                        }
                    }
                }
            }
            pen_x += font::ADVANCE as i64 * scale;
        }
    }
}
