use image::{imageops, Rgba, RgbaImage};
use rayon::prelude::*;

use crate::consts::{NEUTRAL_LEVEL_PERCENT, PARALLEL_PIXEL_THRESHOLD};
use crate::filters::channel::{green_isolate_matrix, invert_matrix};
use crate::filters::color_matrix::{apply_stages, ColorMatrix};
use crate::filters::levels::{brightness_matrix, contrast_matrix};
use crate::geometry::{Point, Size};
use crate::viewport::{ColorFilter, DisplayTransform, ViewportState};

/// Colour stages for a viewport, in compositing order:
/// brightness, contrast, then negative or green isolation.
///
/// Neutral stages are skipped.
pub fn filter_stages(viewport: &ViewportState) -> Vec<ColorMatrix> {
    let mut stages = Vec::with_capacity(3);
    if viewport.brightness() != NEUTRAL_LEVEL_PERCENT {
        stages.push(brightness_matrix(viewport.brightness()));
    }
    if viewport.contrast() != NEUTRAL_LEVEL_PERCENT {
        stages.push(contrast_matrix(viewport.contrast()));
    }
    match viewport.filter() {
        ColorFilter::None => {}
        ColorFilter::Negative => stages.push(invert_matrix()),
        ColorFilter::GreenChannel => stages.push(green_isolate_matrix()),
    }
    stages
}

/// Apply the viewport's colour adjustments to a native raster.
pub fn render_filtered(img: &RgbaImage, viewport: &ViewportState) -> RgbaImage {
    apply_stages(img, &filter_stages(viewport))
}

/// Draw `overlay` over `base` (same size) with source-over alpha blending.
pub fn composite_over(base: &mut RgbaImage, overlay: &RgbaImage) {
    imageops::overlay(base, overlay, 0, 0);
}

/// Project a native raster into a container-sized frame: scale by zoom, then
/// translate by the pan offset. Nearest-neighbour sampling.
pub fn render_view(
    native: &RgbaImage,
    transform: &DisplayTransform,
    viewport: &ViewportState,
    background: Rgba<u8>,
) -> RgbaImage {
    let out_w = transform.container.width.max(0.0).round() as u32;
    let out_h = transform.container.height.max(0.0).round() as u32;
    let mut out = RgbaImage::from_pixel(out_w, out_h, background);
    let (nw, nh) = native.dimensions();
    if out_w == 0 || out_h == 0 || nw == 0 || nh == 0 {
        return out;
    }

    let rect = transform.image_rect(viewport);
    let native_size = Size::from_dimensions((nw, nh));

    let sample_row = |y: u32, row: &mut [u8]| {
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            if !rect.contains(p) {
                continue;
            }
            let sx = ((p.x - rect.min.x) * native_size.width / rect.size.width) as u32;
            let sy = ((p.y - rect.min.y) * native_size.height / rect.size.height) as u32;
            let src = native.get_pixel(sx.min(nw - 1), sy.min(nh - 1));
            px.copy_from_slice(&src.0);
        }
    };

    let row_len = out_w as usize * 4;
    let buf: &mut [u8] = &mut out;
    if (out_w as usize) * (out_h as usize) >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| sample_row(y as u32, row));
    } else {
        for (y, row) in buf.chunks_mut(row_len).enumerate() {
            sample_row(y as u32, row);
        }
    }

    out
}
