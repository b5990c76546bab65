mod common;

use common::{LOCATED_JPEG, ROTATED_JPEG};
use photo_privacy_core::metadata::extract;
use photo_privacy_core::strip::{strip, strip_file};
use photo_privacy_core::Error;
use tempfile::tempdir;

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn test_stripped_copy_has_no_metadata() {
    assert!(!extract(&LOCATED_JPEG).is_empty());

    let stripped = strip(&LOCATED_JPEG).unwrap();
    assert!(extract(&stripped.bytes).is_empty());
    assert!(!contains(&stripped.bytes, b"Exif\x00\x00"));
    assert!(!contains(&stripped.bytes, b"Acme"));
    assert_eq!((stripped.width, stripped.height), (16, 8));
    assert!(stripped.file_name.starts_with("metadata_removed_"));
    assert!(stripped.file_name.ends_with(".jpg"));
}

#[test]
fn test_orientation_is_baked_into_pixels() {
    let stripped = strip(&ROTATED_JPEG).unwrap();
    assert_eq!((stripped.width, stripped.height), (8, 16));
    assert_eq!(extract(&stripped.bytes).orientation, None);
}

#[test]
fn test_png_becomes_jpeg() {
    let stripped = strip(&common::plain_png(10, 10)).unwrap();
    assert_eq!(&stripped.bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_undecodable_input_is_an_error() {
    let result = strip(b"definitely not an image");
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[test]
fn test_strip_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("located.jpg");
    std::fs::write(&path, LOCATED_JPEG.as_slice()).unwrap();

    let stripped = strip_file(&path).unwrap();
    assert!(extract(&stripped.bytes).is_empty());

    let missing = strip_file(dir.path().join("missing.jpg"));
    assert!(matches!(missing, Err(Error::FileNotFound(_))));
}
