use image::{imageops, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH};
use crate::geometry::Point;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Pen colour and width, in native pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: [u8; 4],
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_STROKE_COLOR,
            width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl StrokeStyle {
    fn half_width(&self) -> f32 {
        (self.width / 2.0).max(0.5)
    }
}

/// Transparent RGBA raster holding annotation ink at native resolution.
#[derive(Clone, Debug)]
pub struct InkLayer {
    pixels: RgbaImage,
}

impl InkLayer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, TRANSPARENT),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        let (w, h) = self.dimensions();
        (x < w && y < h).then(|| *self.pixels.get_pixel(x, y))
    }

    pub fn is_inked(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y).is_some_and(|p| p.0[3] > 0)
    }

    /// Number of non-transparent pixels.
    pub fn inked_count(&self) -> usize {
        self.pixels.pixels().filter(|p| p.0[3] > 0).count()
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p.0[3] == 0)
    }

    pub fn clear(&mut self) {
        for p in self.pixels.pixels_mut() {
            *p = TRANSPARENT;
        }
    }

    /// Draw `other` over this layer.
    pub fn merge(&mut self, other: &InkLayer) {
        imageops::overlay(&mut self.pixels, &other.pixels, 0, 0);
    }

    /// Paint every pixel whose centre satisfies `inside`, within a bounding box.
    fn fill_where<F>(&mut self, min: Point, max: Point, color: [u8; 4], inside: F)
    where
        F: Fn(Point) -> bool,
    {
        let (w, h) = self.dimensions();
        if w == 0 || h == 0 {
            return;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(w - 1);
        let y1 = (max.y.ceil().max(0.0) as u32).min(h - 1);
        if min.x > (w - 1) as f32 || min.y > (h - 1) as f32 {
            return;
        }
        for y in y0..=y1 {
            for x in x0..=x1 {
                if inside(Point::new(x as f32 + 0.5, y as f32 + 0.5)) {
                    self.pixels.put_pixel(x, y, Rgba(color));
                }
            }
        }
    }

    /// Stroke a straight segment with round caps.
    pub fn stroke_segment(&mut self, a: Point, b: Point, style: &StrokeStyle) {
        let r = style.half_width();
        let min = Point::new(a.x.min(b.x) - r, a.y.min(b.y) - r);
        let max = Point::new(a.x.max(b.x) + r, a.y.max(b.y) + r);
        self.fill_where(min, max, style.color, |p| distance_to_segment(p, a, b) <= r);
    }

    /// Stroke a circle outline.
    pub fn stroke_circle(&mut self, center: Point, radius: f32, style: &StrokeStyle) {
        let r = style.half_width();
        let reach = radius + r;
        let min = Point::new(center.x - reach, center.y - reach);
        let max = Point::new(center.x + reach, center.y + reach);
        self.fill_where(min, max, style.color, |p| {
            (p.distance_to(center) - radius).abs() <= r
        });
    }
}

/// Euclidean distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + ab.x * t, a.y + ab.y * t))
}
