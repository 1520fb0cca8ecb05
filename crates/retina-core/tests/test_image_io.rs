mod common;

use image::{Rgba, RgbaImage};

use retina_core::error::RetinaError;
use retina_core::io::image_io::{decode_payload, encode_payload, save_image};

#[test]
fn test_payload_decodes_to_rgba() {
    let payload = common::solid_payload(7, 3, [10, 200, 30]);
    let img = decode_payload(&payload).unwrap();
    assert_eq!(img.dimensions(), (7, 3));
    assert_eq!(img.get_pixel(6, 2).0, [10, 200, 30, 255]);
}

#[test]
fn test_data_url_payload_is_accepted() {
    let payload = format!("data:image/png;base64,{}", common::solid_payload(2, 2, [1, 2, 3]));
    assert_eq!(decode_payload(&payload).unwrap().dimensions(), (2, 2));
}

#[test]
fn test_invalid_base64_is_reported() {
    assert!(matches!(
        decode_payload("%%%"),
        Err(RetinaError::InvalidPayload(_))
    ));
}

#[test]
fn test_non_image_bytes_are_reported() {
    // "hello" in base64
    assert!(matches!(
        decode_payload("aGVsbG8="),
        Err(RetinaError::ImageError(_))
    ));
}

#[test]
fn test_save_by_extension() {
    let img = RgbaImage::from_pixel(4, 4, Rgba([90, 90, 90, 255]));
    let dir = tempfile::tempdir().unwrap();
    for name in ["out.png", "out.jpg", "out.tiff"] {
        let path = dir.path().join(name);
        save_image(&img, &path).unwrap();
        assert!(path.exists());
    }
    assert!(!encode_payload(&img).unwrap().is_empty());
}
