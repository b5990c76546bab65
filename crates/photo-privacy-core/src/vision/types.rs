//! Response schema of the vision collaborator, consumed as-is.

use serde::{Deserialize, Serialize};

/// Categorical likelihood reported per face attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Likelihood {
    VeryLikely,
    Likely,
    Possible,
    Unlikely,
    VeryUnlikely,
    #[serde(other)]
    Unknown,
}

impl Likelihood {
    /// Numeric score used by the emotion ranking
    pub fn score(self) -> f64 {
        match self {
            Likelihood::VeryLikely => 0.95,
            Likelihood::Likely => 0.8,
            Likelihood::Possible => 0.6,
            Likelihood::Unlikely => 0.3,
            Likelihood::VeryUnlikely => 0.1,
            Likelihood::Unknown => 0.0,
        }
    }
}

/// Score of an optional likelihood; absent counts as zero
pub fn likelihood_score(likelihood: Option<Likelihood>) -> f64 {
    likelihood.map(Likelihood::score).unwrap_or(0.0)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityAnnotation {
    pub description: String,
    pub score: f64,
    pub locale: Option<String>,
    pub locations: Vec<LocationInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationInfo {
    pub lat_lng: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingPoly {
    pub vertices: Vec<Vertex>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceLandmark {
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaceAnnotation {
    pub joy_likelihood: Option<Likelihood>,
    pub sorrow_likelihood: Option<Likelihood>,
    pub anger_likelihood: Option<Likelihood>,
    pub surprise_likelihood: Option<Likelihood>,
    pub blurred_likelihood: Option<Likelihood>,
    pub headwear_likelihood: Option<Likelihood>,
    pub under_exposed_likelihood: Option<Likelihood>,
    pub detection_confidence: Option<f64>,
    pub landmarking_confidence: Option<f64>,
    pub roll_angle: Option<f64>,
    pub pan_angle: Option<f64>,
    pub tilt_angle: Option<f64>,
    pub bounding_poly: Option<BoundingPoly>,
    pub fd_bounding_poly: Option<BoundingPoly>,
    pub landmarks: Vec<FaceLandmark>,
}

impl FaceAnnotation {
    /// Position of the named landmark, if detected
    pub fn landmark(&self, kind: &str) -> Option<Position> {
        self.landmarks
            .iter()
            .find(|l| l.kind == kind)
            .map(|l| l.position)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizedObjectAnnotation {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SafeSearchAnnotation {
    pub adult: Option<Likelihood>,
    pub spoof: Option<Likelihood>,
    pub medical: Option<Likelihood>,
    pub violence: Option<Likelihood>,
    pub racy: Option<Likelihood>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorInfo {
    pub color: Color,
    pub score: f64,
    pub pixel_fraction: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DominantColors {
    pub colors: Vec<ColorInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProperties {
    pub dominant_colors: DominantColors,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropHint {
    pub bounding_poly: Option<BoundingPoly>,
    pub confidence: f64,
    pub importance_fraction: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropHintsAnnotation {
    pub crop_hints: Vec<CropHint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebEntity {
    pub entity_id: Option<String>,
    pub score: f64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebImage {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebPage {
    pub url: String,
    pub page_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebLabel {
    pub label: String,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebDetection {
    pub web_entities: Vec<WebEntity>,
    pub full_matching_images: Vec<WebImage>,
    pub partial_matching_images: Vec<WebImage>,
    pub pages_with_matching_images: Vec<WebPage>,
    pub visually_similar_images: Vec<WebImage>,
    pub best_guess_labels: Vec<WebLabel>,
}

/// Error object embedded in a per-image response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiStatus {
    pub code: i32,
    pub message: String,
}

/// One per-image annotate response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisionResponse {
    pub label_annotations: Vec<EntityAnnotation>,
    pub text_annotations: Vec<EntityAnnotation>,
    pub face_annotations: Vec<FaceAnnotation>,
    pub landmark_annotations: Vec<EntityAnnotation>,
    pub logo_annotations: Vec<EntityAnnotation>,
    #[serde(alias = "objectAnnotations")]
    pub localized_object_annotations: Vec<LocalizedObjectAnnotation>,
    pub safe_search_annotation: Option<SafeSearchAnnotation>,
    pub image_properties_annotation: Option<ImageProperties>,
    pub crop_hints_annotation: Option<CropHintsAnnotation>,
    pub web_detection: Option<WebDetection>,
    pub error: Option<ApiStatus>,
}

impl VisionResponse {
    /// True when the response carries no usable signal at all
    pub fn is_empty(&self) -> bool {
        self.label_annotations.is_empty()
            && self.face_annotations.is_empty()
            && self.web_detection.is_none()
    }
}

/// Batch envelope returned by the annotate endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchAnnotateResponse {
    pub responses: Vec<VisionResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_partial_response() {
        let json = r#"{
            "labelAnnotations": [{"description": "Dog", "score": 0.97, "mid": "/m/0bt9lr"}],
            "faceAnnotations": [{"joyLikelihood": "VERY_LIKELY", "sorrowLikelihood": "SOMETHING_NEW"}],
            "objectAnnotations": [{"name": "Person", "score": 0.8}],
            "webDetection": {"bestGuessLabels": [{"label": "golden retriever"}]}
        }"#;
        let response: VisionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.label_annotations[0].description, "Dog");
        assert_eq!(
            response.face_annotations[0].joy_likelihood,
            Some(Likelihood::VeryLikely)
        );
        assert_eq!(
            response.face_annotations[0].sorrow_likelihood,
            Some(Likelihood::Unknown)
        );
        assert_eq!(response.localized_object_annotations[0].name, "Person");
        assert!(!response.is_empty());
    }

    #[test]
    fn test_likelihood_scores() {
        assert_eq!(likelihood_score(Some(Likelihood::VeryLikely)), 0.95);
        assert_eq!(likelihood_score(Some(Likelihood::Possible)), 0.6);
        assert_eq!(likelihood_score(None), 0.0);
    }
}
