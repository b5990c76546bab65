use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the photo-privacy library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image codec error that was not classified as decode or encode
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Source image could not be decoded into a pixel surface
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Pixel surface could not be re-encoded
    #[error("Failed to encode image: {0}")]
    Encode(String),

    /// File not found error
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Unsupported image format
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Upload exceeds the configured size limit
    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    /// Upload contains no bytes
    #[error("File is empty: {0}")]
    EmptyFile(String),

    /// Upload request is malformed (wrong file count, mismatched type)
    #[error("Invalid upload: {0}")]
    Upload(String),

    /// Embedded metadata could not be parsed
    #[error("Metadata parse error: {0}")]
    MetadataParse(String),

    /// Vision collaborator failed (network, timeout, non-2xx, missing credential)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Vision signals that cannot be scored (non-finite confidence)
    #[error("Invalid signal: {0}")]
    InvalidSignal(String),

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the failure is recovered locally into safe defaults rather
    /// than surfaced to the caller
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::MetadataParse(_) | Error::ExternalService(_) | Error::InvalidSignal(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::ExternalService(format!("request timed out: {}", err))
        } else {
            Error::ExternalService(err.to_string())
        }
    }
}
