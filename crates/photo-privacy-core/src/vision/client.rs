use log::{debug, info};
use std::time::Duration;

use super::request::AnnotateRequest;
use super::types::{BatchAnnotateResponse, VisionResponse};
use crate::config::VisionConfig;
use crate::error::{Error, Result};

/// Source of vision annotations for one image
pub trait VisionProvider {
    /// Annotate the image, returning the per-image response
    fn annotate(&self, image: &[u8]) -> Result<VisionResponse>;
}

/// Provider that replays a fixed response, for offline analysis
pub struct StaticVisionProvider {
    response: VisionResponse,
}

impl StaticVisionProvider {
    pub fn new(response: VisionResponse) -> Self {
        Self { response }
    }

    /// Load a previously saved per-image response from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let response = serde_json::from_str(json)?;
        Ok(Self::new(response))
    }
}

impl VisionProvider for StaticVisionProvider {
    fn annotate(&self, _image: &[u8]) -> Result<VisionResponse> {
        Ok(self.response.clone())
    }
}

/// Blocking HTTP client for the annotate endpoint
pub struct HttpVisionProvider {
    client: reqwest::blocking::Client,
    config: VisionConfig,
    api_key: String,
}

impl HttpVisionProvider {
    /// Build a client; fails when no API key can be resolved
    pub fn new(config: VisionConfig) -> Result<Self> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            Error::ExternalService("vision API key is not configured".to_string())
        })?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }
}

impl VisionProvider for HttpVisionProvider {
    fn annotate(&self, image: &[u8]) -> Result<VisionResponse> {
        let request = AnnotateRequest::for_image(image, &self.config.features);
        debug!(
            "Sending {} byte image to {} with {} features",
            image.len(),
            self.config.endpoint,
            self.config.features.len()
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::ExternalService(format!(
                "vision API returned {}: {}",
                status, body
            )));
        }

        let batch: BatchAnnotateResponse = response.json()?;
        let response = first_response(batch)?;
        info!(
            "Vision API returned {} labels, {} faces",
            response.label_annotations.len(),
            response.face_annotations.len()
        );
        Ok(response)
    }
}

/// Unwrap the single per-image response, surfacing embedded errors
pub fn first_response(batch: BatchAnnotateResponse) -> Result<VisionResponse> {
    let response = batch
        .responses
        .into_iter()
        .next()
        .ok_or_else(|| Error::ExternalService("vision API returned no responses".to_string()))?;

    if let Some(status) = &response.error {
        return Err(Error::ExternalService(format!(
            "vision API error {}: {}",
            status.code, status.message
        )));
    }

    Ok(response)
}
