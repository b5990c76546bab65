//! Embedded metadata extraction and normalization

pub mod extractor;
pub mod types;

pub use extractor::{extract, read_orientation, try_extract};
pub use types::{CaptureTime, GpsCoordinate, NormalizedMetadata};
