use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{ImageFormat, Locale};
use crate::vision::request::VisionFeature;

/// Default upload limit (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Environment variable consulted when no API key is configured
pub const VISION_API_KEY_ENV: &str = "PHOTO_PRIVACY_VISION_API_KEY";

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Settings for the external vision collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Annotate endpoint, without the key query parameter
    pub endpoint: String,

    /// API key; falls back to `PHOTO_PRIVACY_VISION_API_KEY` when unset
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Features requested from the service
    pub features: Vec<VisionFeature>,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://vision.googleapis.com/v1/images:annotate".to_string(),
            api_key: None,
            timeout_secs: 30,
            features: VisionFeature::ALL.to_vec(),
        }
    }
}

impl VisionConfig {
    /// Resolve the API key from config, then `.env`/process environment
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return Some(key.clone());
        }

        // A missing .env file is not an error
        let _ = dotenv::dotenv();
        std::env::var(VISION_API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

/// Configuration for the photo privacy analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: u64,

    /// MIME types accepted at intake
    pub allowed_mime_types: Vec<String>,

    /// Language for report descriptions and recommendations
    pub locale: Locale,

    /// Vision collaborator settings
    pub vision: VisionConfig,

    /// Offset given to Joy/Surprise when a face shows no strong emotion
    pub emotion_ambiguity_offset: f64,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_mime_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
            locale: Locale::English,
            vision: VisionConfig::default(),
            emotion_ambiguity_offset: 0.25,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_upload_bytes == 0 {
            return Err(Error::Configuration(
                "Upload size limit must be greater than zero".to_string(),
            ));
        }

        if self.allowed_mime_types.is_empty() {
            return Err(Error::Configuration(
                "At least one MIME type must be allowed".to_string(),
            ));
        }

        // Only formats the stripper can decode may be accepted
        if let Some(mime) = self
            .allowed_mime_types
            .iter()
            .find(|m| !ImageFormat::from_mime(m).is_supported())
        {
            return Err(Error::Configuration(format!(
                "MIME type {} is not supported",
                mime
            )));
        }

        if self.vision.timeout_secs == 0 {
            return Err(Error::Configuration(
                "Vision timeout must be greater than zero".to_string(),
            ));
        }

        // Must stay below the 0.3 secondary-emotion cutoff
        if !(0.0..0.3).contains(&self.emotion_ambiguity_offset) {
            return Err(Error::Configuration(
                "Emotion ambiguity offset must be in [0, 0.3)".to_string(),
            ));
        }

        Ok(())
    }
}
