//! Upload intake: one photo per request, restricted type and size.

use log::{debug, warn};
use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::ImageFormat;

/// A single user-supplied photo held in memory
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// Original file name, used in the report
    pub file_name: String,

    /// Declared container type
    pub format: ImageFormat,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// Build an upload from a declared MIME type and raw bytes
    pub fn from_parts(file_name: impl Into<String>, mime: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            format: ImageFormat::from_mime(mime),
            bytes,
        }
    }

    /// Read an upload from disk, inferring the MIME type from the extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(Error::FileNotFound(path_ref.to_path_buf()));
        }

        let format = ImageFormat::from_extension(&get_file_extension(path_ref));
        let bytes = std::fs::read(path_ref)?;
        let file_name = path_ref
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path_ref.display().to_string());

        Ok(Self {
            file_name,
            format,
            bytes,
        })
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Check an upload against the configured type and size limits
pub fn validate_upload(upload: &PhotoUpload, config: &Config) -> Result<()> {
    let mime = upload.format.mime();

    if !upload.format.is_supported()
        || !config
            .allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime))
    {
        warn!("Rejected {}: unsupported type {}", upload.file_name, mime);
        return Err(Error::UnsupportedFormat(mime.to_string()));
    }

    if upload.bytes.is_empty() {
        return Err(Error::EmptyFile(upload.file_name.clone()));
    }

    if upload.size() > config.max_upload_bytes {
        warn!(
            "Rejected {}: {} bytes exceeds {} byte limit",
            upload.file_name,
            upload.size(),
            config.max_upload_bytes
        );
        return Err(Error::FileTooLarge {
            size: upload.size(),
            limit: config.max_upload_bytes,
        });
    }

    // The declared type must match the container actually supplied
    match ImageFormat::detect(&upload.bytes) {
        Some(detected) if detected == upload.format => {}
        Some(detected) => {
            return Err(Error::Upload(format!(
                "{} declared as {} but contains {}",
                upload.file_name,
                mime,
                detected.mime()
            )));
        }
        None => {
            return Err(Error::Upload(format!(
                "{} is not a recognizable {} file",
                upload.file_name, mime
            )));
        }
    }

    debug!("Accepted upload {} ({} bytes)", upload.file_name, upload.size());
    Ok(())
}

/// Enforce exactly one file per upload and hand it back
pub fn single_upload(mut uploads: Vec<PhotoUpload>) -> Result<PhotoUpload> {
    match uploads.len() {
        1 => Ok(uploads.remove(0)),
        0 => Err(Error::Upload("no file supplied".to_string())),
        n => Err(Error::Upload(format!(
            "exactly one file per upload is accepted, got {}",
            n
        ))),
    }
}

/// Get file extension as lowercase string
pub fn get_file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
