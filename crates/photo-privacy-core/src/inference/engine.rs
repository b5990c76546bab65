//! Classification of fused labels and face attributes.
//!
//! [`InferenceEngine::infer`] never fails. Signals that cannot be scored are
//! logged and replaced by the all-defaults bundle so a partial vision
//! response still renders.

use log::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fusion::FusedLabel;
use crate::vision::types::FaceAnnotation;

use super::ads::suggest_ads;
use super::bundle::{
    AgeGuess, ClassificationBundle, GenderGuess, IncomeRange, PeopleSummary, PersonEmotion,
    PoliticalLeaning, CASUAL_CLOTHING, GENERAL_INTERESTS,
};
use super::clothing::detect_clothing;
use super::demographics::{analyze_face, FaceShapeClassifier, FixedShapeClassifier};
use super::emotion::classify_emotion;
use super::taxonomy::{
    any_label_matches, contains_keyword, CONSERVATIVE_HINTS, CONSERVATIVE_HINT_THRESHOLD,
    DEFAULT_INTEREST_HINTS, HIGH_END_ACTIVITY_HINTS, INCOME, INCOME_THRESHOLD,
    INTEREST_BASE_THRESHOLD, INTERESTS, LUXURY_HINTS, OBJECT_THRESHOLD, PERSON_HINTS, POLITICAL,
    POLITICAL_THRESHOLD, RACE, RACE_THRESHOLD, SIMPLE_LIFESTYLE_HINTS,
};

/// Labels averaged for the interest threshold multiplier
const TOP_LABELS_FOR_CONFIDENCE: usize = 10;

pub struct InferenceEngine {
    ambiguity_offset: f64,
    shapes: Box<dyn FaceShapeClassifier + Send + Sync>,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new(Config::default().emotion_ambiguity_offset)
    }
}

impl InferenceEngine {
    pub fn new(ambiguity_offset: f64) -> Self {
        Self {
            ambiguity_offset,
            shapes: Box::new(FixedShapeClassifier),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.emotion_ambiguity_offset)
    }

    /// Replace the face-shape strategy
    pub fn with_shape_classifier(
        mut self,
        classifier: impl FaceShapeClassifier + Send + Sync + 'static,
    ) -> Self {
        self.shapes = Box::new(classifier);
        self
    }

    /// Classify a photo, degrading to defaults instead of failing
    pub fn infer(&self, labels: &[FusedLabel], faces: &[FaceAnnotation]) -> ClassificationBundle {
        match self.try_infer(labels, faces) {
            Ok(bundle) => bundle,
            Err(e) => {
                warn!("Inference failed, using default classification: {}", e);
                ClassificationBundle::default()
            }
        }
    }

    /// Classify a photo, surfacing unscorable input as an error
    pub fn try_infer(
        &self,
        labels: &[FusedLabel],
        faces: &[FaceAnnotation],
    ) -> Result<ClassificationBundle> {
        if let Some(bad) = labels.iter().find(|l| !l.score.is_finite()) {
            return Err(Error::InvalidSignal(format!(
                "label '{}' has non-finite score",
                bad.description
            )));
        }

        let mut bundle = ClassificationBundle::default();

        if labels.is_empty() {
            if faces.is_empty() {
                debug!("No labels or faces, using default classification");
            } else {
                bundle.people = self.people_from_faces(faces);
            }
            return Ok(bundle);
        }

        bundle.people = if faces.is_empty() {
            people_without_faces(labels)
        } else {
            self.people_from_faces(faces)
        };

        let races = RACE.all_matches(labels, RACE_THRESHOLD);
        if !races.is_empty() {
            bundle.people.race = races.into_iter().map(String::from).collect();
        }

        let clothing = detect_clothing(labels);
        if !clothing.is_empty() {
            bundle.people.clothing = clothing;
        }

        bundle.objects = labels
            .iter()
            .filter(|l| l.score > OBJECT_THRESHOLD)
            .map(|l| l.description.clone())
            .collect();

        let matched_interests = INTERESTS.all_matches(labels, interest_threshold(labels));
        bundle.interests = if !matched_interests.is_empty() {
            matched_interests.iter().map(|s| s.to_string()).collect()
        } else {
            let hinted = default_interests(labels);
            if hinted.is_empty() {
                vec![GENERAL_INTERESTS.to_string()]
            } else {
                hinted
            }
        };

        bundle.political_affiliation = political_leaning(labels, &matched_interests);
        bundle.income_range = income_range(labels);
        bundle.targeted_ads = suggest_ads(&bundle.interests, bundle.income_range, labels);

        debug!(
            "Inferred {} people, {} interests, {}, {}, {} ad categories",
            bundle.people.count,
            bundle.interests.len(),
            bundle.income_range,
            bundle.political_affiliation,
            bundle.targeted_ads.len()
        );
        Ok(bundle)
    }

    fn people_from_faces(&self, faces: &[FaceAnnotation]) -> PeopleSummary {
        let mut gender = Vec::new();
        let mut age = Vec::new();
        let mut emotions = Vec::with_capacity(faces.len());

        for (index, face) in faces.iter().enumerate() {
            emotions.push(PersonEmotion::new(
                index,
                classify_emotion(face, self.ambiguity_offset),
            ));
            let guess = analyze_face(face, self.shapes.as_ref());
            gender.extend(guess.gender);
            age.extend(guess.age);
        }

        if gender.is_empty() {
            gender.push(GenderGuess::Unknown);
        }
        if age.is_empty() {
            age.push(AgeGuess::Adult);
        }

        PeopleSummary {
            count: faces.len(),
            emotions,
            gender,
            age,
            ..PeopleSummary::default()
        }
    }
}

/// No face was detected: keep the default person only if labels hint at one
fn people_without_faces(labels: &[FusedLabel]) -> PeopleSummary {
    if labels
        .iter()
        .any(|l| contains_keyword(&l.description, PERSON_HINTS))
    {
        PeopleSummary::default()
    } else {
        PeopleSummary {
            count: 0,
            emotions: Vec::new(),
            clothing: vec![CASUAL_CLOTHING.to_string()],
            ..PeopleSummary::default()
        }
    }
}

/// Interest threshold scaled by how confident the top labels are
fn interest_threshold(labels: &[FusedLabel]) -> f64 {
    let top = &labels[..labels.len().min(TOP_LABELS_FOR_CONFIDENCE)];
    if top.is_empty() {
        return INTEREST_BASE_THRESHOLD;
    }
    let average = top.iter().map(|l| l.score).sum::<f64>() / top.len() as f64;
    INTEREST_BASE_THRESHOLD * (average * 1.2).clamp(0.5, 1.0)
}

fn default_interests(labels: &[FusedLabel]) -> Vec<String> {
    let mut interests: Vec<String> = Vec::new();
    for (keywords, hinted) in DEFAULT_INTEREST_HINTS {
        if labels
            .iter()
            .any(|l| contains_keyword(&l.description, keywords))
        {
            for interest in hinted.iter() {
                if !interests.iter().any(|i| i == interest) {
                    interests.push(interest.to_string());
                }
            }
        }
    }
    interests
}

fn political_leaning(labels: &[FusedLabel], matched_interests: &[&str]) -> PoliticalLeaning {
    match POLITICAL.first_match(labels, POLITICAL_THRESHOLD) {
        Some("Conservative Leaning") => return PoliticalLeaning::Conservative,
        Some("Liberal Leaning") => return PoliticalLeaning::Liberal,
        Some(_) => return PoliticalLeaning::Neutral,
        None => {}
    }

    let has = |name: &str| matched_interests.iter().any(|i| *i == name);
    if has("Nature") && has("Travel") && !has("Technology") {
        PoliticalLeaning::Liberal
    } else if any_label_matches(labels, CONSERVATIVE_HINTS, CONSERVATIVE_HINT_THRESHOLD) {
        PoliticalLeaning::Conservative
    } else {
        PoliticalLeaning::Neutral
    }
}

fn income_range(labels: &[FusedLabel]) -> IncomeRange {
    match INCOME.first_match(labels, INCOME_THRESHOLD) {
        Some("High Income") => return IncomeRange::High,
        Some("Low Income") => return IncomeRange::Low,
        Some(_) => return IncomeRange::Middle,
        None => {}
    }

    let mentions = |keywords: &[&str]| {
        labels
            .iter()
            .any(|l| contains_keyword(&l.description, keywords))
    };
    if mentions(LUXURY_HINTS) || mentions(HIGH_END_ACTIVITY_HINTS) {
        IncomeRange::High
    } else if mentions(SIMPLE_LIFESTYLE_HINTS) {
        IncomeRange::Low
    } else {
        IncomeRange::Middle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::bundle::MAX_AD_CATEGORIES;
    use crate::vision::types::Likelihood;

    fn label(description: &str, score: f64) -> FusedLabel {
        FusedLabel {
            description: description.to_string(),
            score,
        }
    }

    fn joyful_face() -> FaceAnnotation {
        FaceAnnotation {
            joy_likelihood: Some(Likelihood::VeryLikely),
            sorrow_likelihood: Some(Likelihood::VeryUnlikely),
            anger_likelihood: Some(Likelihood::VeryUnlikely),
            surprise_likelihood: Some(Likelihood::VeryUnlikely),
            ..FaceAnnotation::default()
        }
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        let engine = InferenceEngine::default();
        assert_eq!(engine.infer(&[], &[]), ClassificationBundle::default());
    }

    #[test]
    fn test_non_finite_score_gives_defaults() {
        let engine = InferenceEngine::default();
        let labels = vec![label("Dog", f64::NAN), label("Car", 0.9)];
        assert!(engine.try_infer(&labels, &[]).is_err());
        assert_eq!(engine.infer(&labels, &[]), ClassificationBundle::default());
    }

    #[test]
    fn test_faces_drive_people() {
        let engine = InferenceEngine::default();
        let bundle = engine.infer(&[label("Smile", 0.9)], &[joyful_face(), joyful_face()]);

        assert_eq!(bundle.people.count, 2);
        assert_eq!(bundle.people.emotions[1].person, "Person 2");
        assert_eq!(bundle.people.emotions[1].emotion, "Joy");
        // no landmarks, so no geometry guesses
        assert_eq!(bundle.people.gender, vec![GenderGuess::Unknown]);
        assert_eq!(bundle.people.age, vec![AgeGuess::Adult]);
    }

    #[test]
    fn test_no_person_signal_means_zero_people() {
        let engine = InferenceEngine::default();
        let bundle = engine.infer(&[label("Mountain", 0.9)], &[]);
        assert_eq!(bundle.people.count, 0);
        assert!(bundle.people.emotions.is_empty());

        let bundle = engine.infer(&[label("Portrait", 0.9)], &[]);
        assert_eq!(bundle.people.count, 1);
    }

    #[test]
    fn test_nature_and_travel_lean_liberal() {
        let engine = InferenceEngine::default();
        let labels = vec![
            label("Mountain", 0.95),
            label("Hiking trail", 0.9),
            label("Tourism", 0.8),
        ];
        let bundle = engine.infer(&labels, &[]);
        assert_eq!(bundle.interests, vec!["Travel", "Nature"]);
        assert_eq!(bundle.political_affiliation, PoliticalLeaning::Liberal);
        // "tourism" is a high-end activity hint
        assert_eq!(bundle.income_range, IncomeRange::High);
        assert_eq!(bundle.targeted_ads[0], "Travel Destinations");
    }

    #[test]
    fn test_taxonomy_match_beats_fallback() {
        let engine = InferenceEngine::default();
        let labels = vec![label("Budget hotel", 0.6), label("Church", 0.5)];
        let bundle = engine.infer(&labels, &[]);
        assert_eq!(bundle.income_range, IncomeRange::Low);
        assert_eq!(bundle.political_affiliation, PoliticalLeaning::Conservative);
    }

    #[test]
    fn test_default_interest_hints() {
        let engine = InferenceEngine::default();
        // below the dynamic interest threshold, still picked up by hints
        let labels = vec![label("Restaurant", 0.04)];
        let bundle = engine.infer(&labels, &[]);
        assert_eq!(bundle.interests, vec!["Food"]);
        assert!(bundle.objects.is_empty());
    }

    #[test]
    fn test_ads_always_bounded() {
        let engine = InferenceEngine::default();
        let labels = vec![
            label("Sports car", 0.9),
            label("Laptop computer", 0.9),
            label("Dog", 0.9),
            label("Luxury yacht", 0.9),
            label("Gym workout", 0.9),
            label("Guitar concert", 0.9),
        ];
        let bundle = engine.infer(&labels, &[]);
        assert!(!bundle.targeted_ads.is_empty());
        assert!(bundle.targeted_ads.len() <= MAX_AD_CATEGORIES);
    }
}
