use image::RgbaImage;

/// Convert an RGBA raster to an egui ColorImage.
///
/// Ink layers are straight (not premultiplied) alpha, so transparent pixels
/// stay transparent on upload.
pub fn rgba_to_color_image(img: &RgbaImage) -> egui::ColorImage {
    let size = [img.width() as usize, img.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_size_and_alpha() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(1, 0, image::Rgba([255, 0, 0, 255]));
        let color = rgba_to_color_image(&img);
        assert_eq!(color.size, [3, 2]);
        assert_eq!(color.pixels[0], egui::Color32::TRANSPARENT);
        assert_eq!(color.pixels[1], egui::Color32::from_rgb(255, 0, 0));
    }
}
