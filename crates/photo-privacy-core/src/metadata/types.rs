use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// EXIF date/time layout (`2024:05:01 14:03:22`)
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// A resolved GPS position. Latitude and longitude are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsCoordinate {
    /// Decimal degrees, negative south of the equator
    pub latitude: f64,
    /// Decimal degrees, negative west of Greenwich
    pub longitude: f64,
    /// Metres, negative below sea level
    pub altitude: Option<f64>,
}

impl GpsCoordinate {
    /// Build a coordinate only when both axes are finite
    pub fn new(latitude: f64, longitude: f64, altitude: Option<f64>) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
            altitude: altitude.filter(|a| a.is_finite()),
        })
    }
}

/// Capture timestamp; unparsable values are kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureTime {
    Parsed(NaiveDateTime),
    Raw(String),
}

impl CaptureTime {
    /// Parse an EXIF date/time string, keeping the original text on failure
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match NaiveDateTime::parse_from_str(trimmed, EXIF_DATETIME_FORMAT) {
            Ok(dt) => Self::Parsed(dt),
            Err(_) => Self::Raw(trimmed.to_string()),
        }
    }

    /// Human-readable form used in reports
    pub fn display(&self) -> String {
        match self {
            Self::Parsed(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

/// Normalized view of the metadata embedded in one photo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetadata {
    pub make: Option<String>,
    pub model: Option<String>,
    pub software: Option<String>,
    pub capture_time: Option<CaptureTime>,
    pub gps: Option<GpsCoordinate>,

    /// Seconds
    pub exposure_time: Option<f64>,
    pub f_number: Option<f64>,
    pub iso: Option<u32>,
    /// Millimetres
    pub focal_length: Option<f64>,
    pub flash: Option<bool>,

    /// Raw EXIF orientation code (1-8)
    pub orientation: Option<u16>,
    pub color_space: Option<String>,
    pub x_resolution: Option<f64>,
    pub y_resolution: Option<f64>,
    pub resolution_unit: Option<String>,

    /// Unrecognized tags, name to displayed value
    pub other: BTreeMap<String, String>,
}

impl NormalizedMetadata {
    /// True when no tag at all was recovered
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when the record identifies the capture device
    pub fn has_device_info(&self) -> bool {
        self.make.is_some() || self.model.is_some()
    }

    /// Human-readable orientation, following the EXIF code table
    pub fn orientation_label(&self) -> Option<&'static str> {
        let label = match self.orientation? {
            1 => "Horizontal (normal)",
            2 => "Mirror horizontal",
            3 => "Rotate 180",
            4 => "Mirror vertical",
            5 => "Mirror horizontal and rotate 270 CW",
            6 => "Rotate 90 CW",
            7 => "Mirror horizontal and rotate 90 CW",
            8 => "Rotate 270 CW",
            _ => return None,
        };
        Some(label)
    }
}
