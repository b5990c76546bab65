//! Annotate request construction.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// Detection features the collaborator can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisionFeature {
    LabelDetection,
    TextDetection,
    FaceDetection,
    LandmarkDetection,
    LogoDetection,
    ObjectLocalization,
    SafeSearchDetection,
    ImageProperties,
    CropHints,
    WebDetection,
}

impl VisionFeature {
    /// Every feature, in request order
    pub const ALL: [VisionFeature; 10] = [
        VisionFeature::LabelDetection,
        VisionFeature::TextDetection,
        VisionFeature::FaceDetection,
        VisionFeature::LandmarkDetection,
        VisionFeature::LogoDetection,
        VisionFeature::ObjectLocalization,
        VisionFeature::SafeSearchDetection,
        VisionFeature::ImageProperties,
        VisionFeature::CropHints,
        VisionFeature::WebDetection,
    ];

    /// Result cap requested for this feature
    pub fn max_results(self) -> u32 {
        match self {
            VisionFeature::LabelDetection => 100,
            VisionFeature::ObjectLocalization | VisionFeature::WebDetection => 75,
            VisionFeature::FaceDetection => 50,
            _ => 40,
        }
    }

    /// Features that should run on the latest model
    fn model(self) -> Option<&'static str> {
        match self {
            VisionFeature::LabelDetection
            | VisionFeature::FaceDetection
            | VisionFeature::LandmarkDetection
            | VisionFeature::ObjectLocalization => Some("builtin/latest"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRequest {
    #[serde(rename = "type")]
    pub feature: VisionFeature,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'static str>,
}

impl From<VisionFeature> for FeatureRequest {
    fn from(feature: VisionFeature) -> Self {
        Self {
            feature,
            max_results: feature.max_results(),
            model: feature.model(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageContent {
    /// Base64-encoded file bytes
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropHintsParams {
    pub aspect_ratios: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebDetectionParams {
    pub include_geo_results: bool,
}

/// Asks for every facial landmark so eye positions come back with each face
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceDetectionParams {
    pub model: &'static str,
    pub landmark_types: Vec<&'static str>,
    pub detection_type: VisionFeature,
    pub max_results: u32,
}

impl Default for FaceDetectionParams {
    fn default() -> Self {
        Self {
            model: "builtin/latest",
            landmark_types: vec!["ALL_LANDMARKS"],
            detection_type: VisionFeature::FaceDetection,
            max_results: VisionFeature::FaceDetection.max_results(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContext {
    pub language_hints: Vec<&'static str>,
    pub crop_hints_params: CropHintsParams,
    pub web_detection_params: WebDetectionParams,
    pub face_detection_params: FaceDetectionParams,
}

impl Default for ImageContext {
    fn default() -> Self {
        Self {
            language_hints: vec![
                "zh-CN", "en", "zh-TW", "ja", "ko", "fr", "de", "es", "ru", "it", "pt", "ar",
            ],
            crop_hints_params: CropHintsParams {
                aspect_ratios: vec![0.8, 1.0, 1.2, 1.5, 0.67],
            },
            web_detection_params: WebDetectionParams {
                include_geo_results: true,
            },
            face_detection_params: FaceDetectionParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageRequest {
    pub image: ImageContent,
    pub features: Vec<FeatureRequest>,
    pub image_context: ImageContext,
}

/// Batch request body; this application always sends exactly one image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotateRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

impl AnnotateRequest {
    /// Build the request body for one image
    pub fn for_image(image: &[u8], features: &[VisionFeature]) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: general_purpose::STANDARD.encode(image),
                },
                features: features.iter().copied().map(FeatureRequest::from).collect(),
                image_context: ImageContext::default(),
            }],
        }
    }
}
