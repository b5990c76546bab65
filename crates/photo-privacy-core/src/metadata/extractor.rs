//! EXIF/TIFF/GPS tag extraction from image bytes.
//!
//! Reads the primary IFD of any container kamadak-exif understands (JPEG,
//! PNG eXIf, WebP, TIFF, HEIF) and remaps the recognized tags onto
//! [`NormalizedMetadata`]. Everything else lands in `other` with its
//! displayed value.
//!
//! An image without EXIF data yields an empty record without logging an
//! error, as this is expected for most PNG and WebP uploads.

use exif::{Exif, Field, In, Reader, Tag, Value};
use log::{debug, warn};
use std::io::Cursor;

use super::types::{CaptureTime, GpsCoordinate, NormalizedMetadata};
use crate::error::{Error, Result};

/// Extract normalized metadata, recovering any failure into an empty record
pub fn extract(data: &[u8]) -> NormalizedMetadata {
    try_extract(data).unwrap_or_else(|e| {
        warn!("Metadata extraction failed, treating as no metadata: {}", e);
        NormalizedMetadata::default()
    })
}

/// Extract normalized metadata, surfacing malformed tag data as an error.
///
/// A container without any EXIF section is not an error.
pub fn try_extract(data: &[u8]) -> Result<NormalizedMetadata> {
    match read_exif(data) {
        Ok(exif) => {
            let metadata = normalize(&exif);
            debug!(
                "Extracted metadata: gps={}, device={}, {} unrecognized tags",
                metadata.gps.is_some(),
                metadata.has_device_info(),
                metadata.other.len()
            );
            Ok(metadata)
        }
        Err(exif::Error::NotFound(_)) => {
            debug!("No EXIF data found");
            Ok(NormalizedMetadata::default())
        }
        Err(e) => Err(Error::MetadataParse(e.to_string())),
    }
}

/// Read only the primary-image orientation code (1-8)
pub fn read_orientation(data: &[u8]) -> Option<u16> {
    let exif = read_exif(data).ok()?;
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .and_then(|n| u16::try_from(n).ok())
        .filter(|n| (1..=8).contains(n))
}

fn read_exif(data: &[u8]) -> std::result::Result<Exif, exif::Error> {
    let mut cursor = Cursor::new(data);
    Reader::new().read_from_container(&mut cursor)
}

/// GPS fields gathered while walking the IFD
#[derive(Default)]
struct GpsParts {
    latitude: Option<f64>,
    latitude_ref: Option<String>,
    longitude: Option<f64>,
    longitude_ref: Option<String>,
    altitude: Option<f64>,
    below_sea_level: bool,
    /// Displayed values, returned to `other` if no coordinate forms
    raw: Vec<(String, String)>,
}

impl GpsParts {
    fn resolve(&self) -> Option<GpsCoordinate> {
        let latitude = signed(self.latitude?, self.latitude_ref.as_deref(), "S");
        let longitude = signed(self.longitude?, self.longitude_ref.as_deref(), "W");
        let altitude = self
            .altitude
            .map(|a| if self.below_sea_level { -a } else { a });
        GpsCoordinate::new(latitude, longitude, altitude)
    }
}

fn signed(value: f64, reference: Option<&str>, negative: &str) -> f64 {
    match reference {
        Some(r) if r.eq_ignore_ascii_case(negative) => -value,
        _ => value,
    }
}

fn normalize(exif: &Exif) -> NormalizedMetadata {
    let mut metadata = NormalizedMetadata::default();
    let mut gps = GpsParts::default();

    let mut date_time = None;
    let mut date_time_original = None;
    let mut date_time_digitized = None;

    for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
        match field.tag {
            // Camera info
            Tag::Make => metadata.make = field_as_string(field),
            Tag::Model => metadata.model = field_as_string(field),
            Tag::Software => metadata.software = field_as_string(field),

            // DateTime, in order of preference
            Tag::DateTime => date_time = field_as_string(field),
            Tag::DateTimeOriginal => date_time_original = field_as_string(field),
            Tag::DateTimeDigitized => date_time_digitized = field_as_string(field),

            // Capture settings
            Tag::ExposureTime => metadata.exposure_time = field_as_f64(field),
            Tag::FNumber => metadata.f_number = field_as_f64(field),
            Tag::PhotographicSensitivity => metadata.iso = field.value.get_uint(0),
            Tag::FocalLength => metadata.focal_length = field_as_f64(field),
            Tag::Flash => metadata.flash = field.value.get_uint(0).map(|v| v & 0x1 == 1),

            // Image info
            Tag::Orientation => {
                metadata.orientation = field.value.get_uint(0).and_then(|n| u16::try_from(n).ok())
            }
            Tag::ColorSpace => {
                metadata.color_space = field.value.get_uint(0).map(translate_color_space)
            }
            Tag::XResolution => metadata.x_resolution = field_as_f64(field),
            Tag::YResolution => metadata.y_resolution = field_as_f64(field),
            Tag::ResolutionUnit => {
                metadata.resolution_unit = field.value.get_uint(0).map(translate_resolution_unit)
            }

            // GPS coordinates (accumulate for conversion)
            Tag::GPSLatitude => {
                gps.latitude = field_as_rational_vec(field).and_then(|dms| dms_to_decimal(&dms));
                gps.raw.push(raw_entry(field, exif));
            }
            Tag::GPSLatitudeRef => {
                gps.latitude_ref = field_as_string(field);
                gps.raw.push(raw_entry(field, exif));
            }
            Tag::GPSLongitude => {
                gps.longitude = field_as_rational_vec(field).and_then(|dms| dms_to_decimal(&dms));
                gps.raw.push(raw_entry(field, exif));
            }
            Tag::GPSLongitudeRef => {
                gps.longitude_ref = field_as_string(field);
                gps.raw.push(raw_entry(field, exif));
            }
            Tag::GPSAltitude => {
                gps.altitude = field_as_f64(field);
                gps.raw.push(raw_entry(field, exif));
            }
            Tag::GPSAltitudeRef => {
                gps.below_sea_level = field.value.get_uint(0) == Some(1);
                gps.raw.push(raw_entry(field, exif));
            }

            // Structural pointers carry no user data
            Tag::ExifIFDPointer | Tag::GPSInfoIFDPointer | Tag::InteropIFDPointer => {}

            _ => {
                let (name, value) = raw_entry(field, exif);
                metadata.other.insert(name, value);
            }
        }
    }

    metadata.capture_time = date_time
        .or(date_time_original)
        .or(date_time_digitized)
        .map(|s| CaptureTime::parse(&s));

    match gps.resolve() {
        Some(coordinate) => metadata.gps = Some(coordinate),
        None => metadata.other.extend(gps.raw),
    }

    metadata
}

fn raw_entry(field: &Field, exif: &Exif) -> (String, String) {
    (
        field.tag.to_string(),
        field.display_value().with_unit(exif).to_string(),
    )
}

/// Extracts a string value from an EXIF field.
fn field_as_string(field: &Field) -> Option<String> {
    let s = match &field.value {
        Value::Ascii(vecs) => vecs
            .first()
            .map(|v| String::from_utf8_lossy(v).to_string())?,
        _ => field.display_value().to_string(),
    };
    let trimmed = s.trim_matches(char::from(0)).trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extracts the first numeric value of a field as f64.
fn field_as_f64(field: &Field) -> Option<f64> {
    match &field.value {
        Value::Rational(v) => v.first().map(|r| r.to_f64()),
        Value::SRational(v) => v.first().map(|r| r.to_f64()),
        Value::Float(v) => v.first().map(|&f| f as f64),
        Value::Double(v) => v.first().copied(),
        other => other.get_uint(0).map(|n| n as f64),
    }
    .filter(|f| f.is_finite())
}

/// Extracts a rational vector from an EXIF field (for GPS coordinates).
fn field_as_rational_vec(field: &Field) -> Option<Vec<exif::Rational>> {
    match &field.value {
        Value::Rational(v) => Some(v.clone()),
        _ => None,
    }
}

/// Converts DMS (degrees/minutes/seconds) to decimal degrees.
fn dms_to_decimal(dms: &[exif::Rational]) -> Option<f64> {
    if dms.len() < 3 {
        return None;
    }
    let decimal = dms[0].to_f64() + dms[1].to_f64() / 60.0 + dms[2].to_f64() / 3600.0;
    decimal.is_finite().then_some(decimal)
}

fn translate_color_space(value: u32) -> String {
    match value {
        1 => "sRGB".to_string(),
        2 => "Adobe RGB".to_string(),
        65535 => "Uncalibrated".to_string(),
        other => other.to_string(),
    }
}

fn translate_resolution_unit(value: u32) -> String {
    match value {
        1 => "none".to_string(),
        2 => "inches".to_string(),
        3 => "cm".to_string(),
        other => other.to_string(),
    }
}
