//! Metadata stripping by raster round trip.
//!
//! The source is decoded to a pixel surface at its native dimensions and
//! re-encoded into a fresh JPEG. Metadata lives in container chunks that the
//! pixel surface cannot carry, so the output holds none of it. The round trip
//! is lossy and the output is always JPEG regardless of the input container.

use chrono::{DateTime, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage};
use log::{debug, info};
use std::path::Path;

use crate::error::{Error, Result};
use crate::metadata::read_orientation;

/// JPEG quality used for every sanitized output
pub const OUTPUT_QUALITY: u8 = 95;

/// A sanitized copy ready for download
#[derive(Debug, Clone)]
pub struct StrippedImage {
    /// JPEG bytes with no metadata segments
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Suggested download name, embedding the strip time
    pub file_name: String,
}

/// Strip all metadata from an in-memory image
pub fn strip(data: &[u8]) -> Result<StrippedImage> {
    strip_at(data, Utc::now())
}

/// Strip all metadata from an image on disk
pub fn strip_file<P: AsRef<Path>>(path: P) -> Result<StrippedImage> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(Error::FileNotFound(path_ref.to_path_buf()));
    }
    let data = std::fs::read(path_ref)?;
    strip(&data)
}

/// Strip all metadata, naming the output after the given timestamp
pub fn strip_at(data: &[u8], timestamp: DateTime<Utc>) -> Result<StrippedImage> {
    let decoded = image::load_from_memory(data).map_err(|e| Error::Decode(e.to_string()))?;

    // The orientation tag is about to disappear, so bake it into the pixels
    let surface = match read_orientation(data) {
        Some(orientation) if orientation != 1 => {
            debug!("Applying EXIF orientation {} before re-encode", orientation);
            apply_orientation(decoded, orientation)
        }
        _ => decoded,
    };

    let bytes = encode_jpeg(&surface)?;
    let file_name = sanitized_file_name(timestamp);

    info!(
        "Re-encoded {}x{} image without metadata ({} -> {} bytes)",
        surface.width(),
        surface.height(),
        data.len(),
        bytes.len()
    );

    Ok(StrippedImage {
        bytes,
        width: surface.width(),
        height: surface.height(),
        file_name,
    })
}

/// Download name for a sanitized copy
pub fn sanitized_file_name(timestamp: DateTime<Utc>) -> String {
    format!("metadata_removed_{}.jpg", timestamp.timestamp_millis())
}

/// Rotate/flip a decoded image so it displays as the EXIF code intends
pub fn apply_orientation(image: DynamicImage, orientation: u16) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    // JPEG has no alpha channel
    let rgb = image.to_rgb8();
    let mut bytes = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, OUTPUT_QUALITY);
        encoder
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
            .map_err(|e| Error::Encode(e.to_string()))?;
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use image::{ImageOutputFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 10) as u8, (y * 10) as u8, 128, 200])
        });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageOutputFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_png_becomes_jpeg() {
        let stripped = strip(&png_bytes(12, 8)).unwrap();
        assert_eq!(&stripped.bytes[0..3], &[0xFF, 0xD8, 0xFF]);
        assert_eq!((stripped.width, stripped.height), (12, 8));
    }

    #[test]
    fn test_undecodable_input_is_decode_error() {
        let result = strip(b"definitely not an image");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_file_name_embeds_timestamp() {
        let ts = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(sanitized_file_name(ts), "metadata_removed_1700000000123.jpg");
        let stripped = strip_at(&png_bytes(2, 2), ts).unwrap();
        assert_eq!(stripped.file_name, "metadata_removed_1700000000123.jpg");
    }

    #[test]
    fn test_orientation_swaps_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 2));
        let rotated = apply_orientation(img.clone(), 6);
        assert_eq!((rotated.width(), rotated.height()), (2, 4));
        let flipped = apply_orientation(img, 2);
        assert_eq!((flipped.width(), flipped.height()), (4, 2));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            strip_file("/nonexistent/photo.jpg"),
            Err(Error::FileNotFound(_))
        ));
    }
}
