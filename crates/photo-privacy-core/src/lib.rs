//! Core functionality for photo privacy analysis.
//!
//! This library provides the components behind a photo privacy check:
//! - Upload validation and EXIF/GPS metadata extraction
//! - Metadata stripping by re-encoding the pixel data
//! - Fusion of vision-service labels into one deduplicated label set
//! - Heuristic inference over labels and faces
//! - Privacy risk reports
//!
//! Everything runs locally; the only network call is the optional vision
//! collaborator behind [`vision::VisionProvider`].

// -- External Dependencies --
use log::{debug, info};
use serde::Serialize;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use types::*;

// -- Public Modules --
pub mod config;
pub mod fusion;
pub mod inference;
pub mod intake;
pub mod logging;
pub mod metadata;
pub mod report;
pub mod session;
pub mod strip;
pub mod types;
pub mod vision;

use fusion::{FusedLabel, LabelSources, Stemmer, SuffixStemmer};
use inference::{ClassificationBundle, FaceShapeClassifier, InferenceEngine};
use intake::PhotoUpload;
use metadata::NormalizedMetadata;
use report::AnalysisReport;
use strip::StrippedImage;
use vision::{HttpVisionProvider, VisionProvider};

/// Reason attached to the classification when no vision provider is supplied
pub const VISION_NOT_CONFIGURED: &str = "vision analysis is not configured";

/// Everything derived from one uploaded photo
#[derive(Debug, Clone, Serialize)]
pub struct PhotoAnalysis {
    pub metadata: NormalizedMetadata,
    pub report: AnalysisReport,
    pub labels: Vec<FusedLabel>,
    pub classification: ClassificationBundle,
}

/// Main entry point for analyzing and sanitizing photos
pub struct PhotoPrivacy {
    config: Config,
    engine: InferenceEngine,
    stemmer: Box<dyn Stemmer + Send + Sync>,
}

impl PhotoPrivacy {
    /// Create a new PhotoPrivacy with the provided configuration
    pub fn new(config: Config) -> Self {
        let engine = InferenceEngine::from_config(&config);
        Self {
            config,
            engine,
            stemmer: Box::new(SuffixStemmer),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the word stemmer used for label similarity
    pub fn with_stemmer(mut self, stemmer: impl Stemmer + Send + Sync + 'static) -> Self {
        self.stemmer = Box::new(stemmer);
        self
    }

    /// Replace the face-shape strategy used for demographic guesses
    pub fn with_shape_classifier(
        mut self,
        classifier: impl FaceShapeClassifier + Send + Sync + 'static,
    ) -> Self {
        self.engine = self.engine.with_shape_classifier(classifier);
        self
    }

    /// Build the HTTP vision provider described by the configuration
    pub fn vision_provider(&self) -> Result<HttpVisionProvider> {
        HttpVisionProvider::new(self.config.vision.clone())
    }

    /// Run the full analysis for one photo.
    ///
    /// Only intake validation can fail. Metadata and vision failures are
    /// logged and replaced by empty metadata or the default classification.
    pub fn analyze(
        &self,
        upload: &PhotoUpload,
        provider: Option<&dyn VisionProvider>,
    ) -> Result<PhotoAnalysis> {
        intake::validate_upload(upload, &self.config)?;

        let metadata = match metadata::try_extract(&upload.bytes) {
            Ok(metadata) => metadata,
            Err(e) => {
                logging::log_metadata_error(&upload.file_name, &e);
                NormalizedMetadata::default()
            }
        };

        let report = report::build_report(&upload.file_name, &metadata, self.config.locale);
        info!(
            "Metadata report for {}: {} risks, score {}",
            upload.file_name,
            report.risks.len(),
            report.summary.risk_score
        );

        let (labels, classification) = match provider {
            Some(provider) => self.classify(upload, provider),
            None => {
                debug!("No vision provider, using default classification");
                (Vec::new(), ClassificationBundle::unavailable(VISION_NOT_CONFIGURED))
            }
        };

        Ok(PhotoAnalysis {
            metadata,
            report,
            labels,
            classification,
        })
    }

    /// Analyze the one photo of an upload request; zero or several files are rejected
    pub fn analyze_request(
        &self,
        uploads: Vec<PhotoUpload>,
        provider: Option<&dyn VisionProvider>,
    ) -> Result<PhotoAnalysis> {
        let upload = intake::single_upload(uploads)?;
        self.analyze(&upload, provider)
    }

    fn classify(
        &self,
        upload: &PhotoUpload,
        provider: &dyn VisionProvider,
    ) -> (Vec<FusedLabel>, ClassificationBundle) {
        let mut response = match provider.annotate(&upload.bytes) {
            Ok(response) => response,
            Err(e) => {
                logging::log_vision_error(&upload.file_name, &e);
                return (Vec::new(), ClassificationBundle::unavailable(e.to_string()));
            }
        };

        vision::enhance_response(&mut response);
        let sources = LabelSources::from_response(&response);
        let labels = fusion::fuse_with(&sources, self.stemmer.as_ref());
        let classification = self.engine.infer(&labels, &response.face_annotations);
        info!(
            "Classified {}: {} fused labels, {} faces",
            upload.file_name,
            labels.len(),
            response.face_annotations.len()
        );
        (labels, classification)
    }

    /// Produce a metadata-free copy of the photo.
    ///
    /// Failures are surfaced; the original bytes are never returned in place
    /// of a sanitized copy.
    pub fn strip(&self, upload: &PhotoUpload) -> Result<StrippedImage> {
        intake::validate_upload(upload, &self.config)?;
        match strip::strip(&upload.bytes) {
            Ok(stripped) => {
                logging::log_strip(&upload.file_name, Ok(stripped.file_name.as_str()));
                Ok(stripped)
            }
            Err(e) => {
                logging::log_strip(&upload.file_name, Err(&e));
                Err(e)
            }
        }
    }

    /// Strip the one photo of an upload request; zero or several files are rejected
    pub fn strip_request(&self, uploads: Vec<PhotoUpload>) -> Result<StrippedImage> {
        let upload = intake::single_upload(uploads)?;
        self.strip(&upload)
    }
}

impl Default for PhotoPrivacy {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
