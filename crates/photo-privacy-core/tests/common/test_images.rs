use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use once_cell::sync::Lazy;
use std::io::Cursor;

use super::exif_fixture::{full_exif_entries, tiff_block, with_exif, Entry, TAG_ORIENTATION};

/// A small gradient so the encoders have something to compress
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
    });
    DynamicImage::ImageRgb8(image)
}

/// Plain JPEG bytes without any metadata segments
pub fn plain_jpeg(width: u32, height: u32) -> Vec<u8> {
    let rgb = gradient(width, height).to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, 90)
        .encode(rgb.as_raw(), width, height, ColorType::Rgb8)
        .expect("Failed to encode test JPEG");
    bytes
}

/// Plain PNG bytes
#[allow(dead_code)]
pub fn plain_png(width: u32, height: u32) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    gradient(width, height)
        .write_to(&mut cursor, ImageOutputFormat::Png)
        .expect("Failed to encode test PNG");
    cursor.into_inner()
}

/// JPEG carrying device, time and GPS metadata
#[allow(dead_code)]
pub static LOCATED_JPEG: Lazy<Vec<u8>> = Lazy::new(|| {
    let (primary, gps) = full_exif_entries();
    with_exif(&plain_jpeg(16, 8), &tiff_block(&primary, &gps))
});

/// JPEG with a latitude but no longitude
#[allow(dead_code)]
pub static HALF_GPS_JPEG: Lazy<Vec<u8>> = Lazy::new(|| {
    let (primary, gps) = full_exif_entries();
    with_exif(&plain_jpeg(16, 8), &tiff_block(&primary, &gps[..2]))
});

/// Landscape JPEG whose orientation tag says to rotate 90 degrees clockwise
#[allow(dead_code)]
pub static ROTATED_JPEG: Lazy<Vec<u8>> = Lazy::new(|| {
    let primary = vec![Entry::Short(TAG_ORIENTATION, 6)];
    with_exif(&plain_jpeg(16, 8), &tiff_block(&primary, &[]))
});
