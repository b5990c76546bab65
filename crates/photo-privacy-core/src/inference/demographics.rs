//! Landmark-geometry guesses about gender and age.
//!
//! These are weak proxies. The face-shape step is a strategy so a real
//! landmark classifier can replace the fixed default.

use crate::vision::types::{FaceAnnotation, FaceLandmark};

use super::bundle::{AgeGuess, GenderGuess};

const CHILD_RATIO: f64 = 0.3;
const YOUNG_ADULT_RATIO: f64 = 0.25;
/// Vertex count assumed when the face box is missing
const DEFAULT_VERTEX_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Rectangle,
    Heart,
}

/// Classifies face shape from landmarks
pub trait FaceShapeClassifier {
    fn classify(&self, landmarks: &[FaceLandmark]) -> FaceShape;
}

/// Always answers [`FaceShape::Oval`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedShapeClassifier;

impl FaceShapeClassifier for FixedShapeClassifier {
    fn classify(&self, _landmarks: &[FaceLandmark]) -> FaceShape {
        FaceShape::Oval
    }
}

/// Guesses for one face; `None` where the face gives no evidence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceDemographics {
    pub gender: Option<GenderGuess>,
    pub age: Option<AgeGuess>,
}

/// Euclidean distance between LEFT_EYE and RIGHT_EYE in the image plane
pub fn eye_distance(face: &FaceAnnotation) -> Option<f64> {
    let left = face.landmark("LEFT_EYE")?;
    let right = face.landmark("RIGHT_EYE")?;
    Some(((left.x - right.x).powi(2) + (left.y - right.y).powi(2)).sqrt())
}

pub fn gender_for_shape(shape: FaceShape) -> Option<GenderGuess> {
    match shape {
        FaceShape::Square | FaceShape::Rectangle => Some(GenderGuess::Male),
        FaceShape::Heart | FaceShape::Oval => Some(GenderGuess::Female),
        FaceShape::Round => None,
    }
}

/// Bucket the eye distance scaled by the face-box vertex count
pub fn age_for_face(face: &FaceAnnotation) -> Option<AgeGuess> {
    let distance = eye_distance(face).filter(|d| *d > 0.0)?;
    let vertices = face
        .fd_bounding_poly
        .as_ref()
        .map(|p| p.vertices.len())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_VERTEX_COUNT);

    let ratio = distance / (vertices as f64).sqrt();
    Some(if ratio > CHILD_RATIO {
        AgeGuess::Child
    } else if ratio > YOUNG_ADULT_RATIO {
        AgeGuess::YoungAdult
    } else {
        AgeGuess::Adult
    })
}

/// Gender and age guesses for one face; faces without landmarks give none
pub fn analyze_face(face: &FaceAnnotation, shapes: &dyn FaceShapeClassifier) -> FaceDemographics {
    if face.landmarks.is_empty() {
        return FaceDemographics::default();
    }
    FaceDemographics {
        gender: gender_for_shape(shapes.classify(&face.landmarks)),
        age: age_for_face(face),
    }
}
