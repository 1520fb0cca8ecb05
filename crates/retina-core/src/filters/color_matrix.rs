use image::RgbaImage;
use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Affine colour transform on normalised RGB.
///
/// Shape is (3, 4): `out[c] = m[c][0]*r + m[c][1]*g + m[c][2]*b + m[c][3]`.
/// Alpha is never touched.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMatrix {
    pub m: Array2<f32>,
}

impl ColorMatrix {
    pub fn identity() -> Self {
        Self::diagonal(1.0, 0.0)
    }

    /// `out = scale * in + bias` on every channel.
    pub fn diagonal(scale: f32, bias: f32) -> Self {
        let mut m = Array2::<f32>::zeros((3, 4));
        for c in 0..3 {
            m[[c, c]] = scale;
            m[[c, 3]] = bias;
        }
        Self { m }
    }

    pub fn from_rows(rows: [[f32; 4]; 3]) -> Self {
        let mut m = Array2::<f32>::zeros((3, 4));
        for (c, row) in rows.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                m[[c, j]] = *v;
            }
        }
        Self { m }
    }

    /// Coefficients as plain rows, for tight per-pixel loops.
    pub fn rows(&self) -> [[f32; 4]; 3] {
        let mut rows = [[0.0; 4]; 3];
        for ((c, j), v) in self.m.indexed_iter() {
            rows[c][j] = *v;
        }
        rows
    }

    /// Transform one normalised RGB triple, clamping to [0, 1].
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        apply_rows(&self.rows(), rgb)
    }
}

fn apply_rows(rows: &[[f32; 4]; 3], rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    (*rows).map(|m| (m[0] * r + m[1] * g + m[2] * b + m[3]).clamp(0.0, 1.0))
}

/// Run a pixel through each stage in order, clamping after every stage.
fn transform_pixel(px: &mut [u8], stages: &[[[f32; 4]; 3]]) {
    let mut rgb = [
        px[0] as f32 / 255.0,
        px[1] as f32 / 255.0,
        px[2] as f32 / 255.0,
    ];
    for rows in stages {
        rgb = apply_rows(rows, rgb);
    }
    px[0] = (rgb[0] * 255.0).round() as u8;
    px[1] = (rgb[1] * 255.0).round() as u8;
    px[2] = (rgb[2] * 255.0).round() as u8;
}

/// Apply a chain of colour matrices to every pixel of an RGBA image.
///
/// Stages are not folded into one matrix: each clamps before the next runs.
pub fn apply_stages(img: &RgbaImage, stages: &[ColorMatrix]) -> RgbaImage {
    let mut out = img.clone();
    if stages.is_empty() {
        return out;
    }
    let stages: Vec<[[f32; 4]; 3]> = stages.iter().map(ColorMatrix::rows).collect();
    let stages = stages.as_slice();

    let (w, h) = out.dimensions();
    let row_len = w as usize * 4;
    let buf: &mut [u8] = &mut out;

    if (w as usize) * (h as usize) >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_mut(row_len).for_each(|row| {
            for px in row.chunks_exact_mut(4) {
                transform_pixel(px, stages);
            }
        });
    } else {
        for px in buf.chunks_exact_mut(4) {
            transform_pixel(px, stages);
        }
    }

    out
}
