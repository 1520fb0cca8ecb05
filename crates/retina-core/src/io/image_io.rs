use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, RgbaImage};

use crate::error::{RetinaError, Result};

/// Strip an optional `data:<mime>;base64,` prefix from an embedded payload.
fn strip_data_url(payload: &str) -> &str {
    match payload.split_once(";base64,") {
        Some((prefix, body)) if prefix.starts_with("data:") => body,
        _ => payload,
    }
}

/// Decode an opaque base64 image payload into an RGBA raster.
pub fn decode_payload(payload: &str) -> Result<RgbaImage> {
    let body = strip_data_url(payload.trim());
    let bytes = STANDARD.decode(body)?;
    let img = image::load_from_memory(&bytes)?.to_rgba8();
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(RetinaError::InvalidDimensions { width: w, height: h });
    }
    Ok(img)
}

/// Encode a raster as base64 PNG, the inverse of [`decode_payload`].
pub fn encode_payload(img: &RgbaImage) -> Result<String> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(STANDARD.encode(buf.into_inner()))
}

/// Save an RGBA raster as 8-bit PNG.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save an RGBA raster, choosing the format from the file extension.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg" | "jpeg") => {
            let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            rgb.save_with_format(path, ImageFormat::Jpeg)?;
            Ok(())
        }
        Some("tiff" | "tif") => {
            img.save_with_format(path, ImageFormat::Tiff)?;
            Ok(())
        }
        _ => save_png(img, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_prefix_is_ignored() {
        assert_eq!(strip_data_url("data:image/jpeg;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_url("AAAA"), "AAAA");
    }
}
