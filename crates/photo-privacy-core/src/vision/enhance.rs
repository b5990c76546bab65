//! Post-processing of a raw vision response before fusion.
//!
//! Weak labels are dropped, strong ones boosted, a confident landmark is
//! promoted to a label, and labels matching the dominant scene or event are
//! reinforced. Every boost is capped at 1.0.

use log::debug;

use super::types::{EntityAnnotation, VisionResponse};

/// Labels at or below this score are discarded
const MIN_LABEL_SCORE: f64 = 0.25;
const STRONG_LABEL_SCORE: f64 = 0.7;
const STRONG_LABEL_BOOST: f64 = 1.2;
const LANDMARK_PROMOTION_SCORE: f64 = 0.7;
const SCENE_BOOST: f64 = 1.3;
const INDOOR_BOOST: f64 = 1.25;
const EVENT_MIN_SCORE: f64 = 0.5;
const EVENT_BOOST: f64 = 1.3;

const ENVIRONMENT_KEYWORDS: &[&str] = &[
    "outdoor", "nature", "sky", "landscape", "building", "architecture", "street", "indoor",
    "room", "house", "interior", "furniture", "office", "home",
];
const OUTDOOR_KEYWORDS: &[&str] = &[
    "outdoor", "nature", "sky", "landscape", "forest", "mountain", "beach", "sea", "ocean",
];
const INDOOR_KEYWORDS: &[&str] = &[
    "indoor", "room", "house", "interior", "furniture", "office", "home", "wall", "floor",
];
const NATURE_KEYWORDS: &[&str] = &[
    "nature", "forest", "mountain", "beach", "sea", "ocean", "river", "lake", "tree", "flower",
    "grass",
];
const URBAN_KEYWORDS: &[&str] = &[
    "city", "building", "architecture", "street", "road", "urban", "downtown", "skyscraper",
];
const NATURE_BOOSTED: &[&str] = &["nature", "natural", "landscape", "outdoor", "scenery"];
const URBAN_BOOSTED: &[&str] = &["urban", "city", "building", "architecture"];
const INDOOR_BOOSTED: &[&str] = &["indoor", "interior", "room", "home", "house", "office"];
const EVENT_KEYWORDS: &[&str] = &[
    "wedding", "party", "ceremony", "celebration", "concert", "festival", "event", "meeting",
    "conference", "sport", "game", "match", "graduation", "birthday",
];

/// Scene inferred from environment labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Nature,
    Urban,
    Indoor,
}

/// Apply every enhancement step to a response in place
pub fn enhance_response(response: &mut VisionResponse) {
    let labels = &mut response.label_annotations;

    labels.retain(|l| l.score > MIN_LABEL_SCORE);
    for label in labels.iter_mut() {
        if label.score > STRONG_LABEL_SCORE {
            label.score = boost(label.score, STRONG_LABEL_BOOST);
        }
    }
    sort_by_score(labels);

    promote_landmark(labels, &response.landmark_annotations);

    if let Some(scene) = classify_scene(labels) {
        debug!("Scene classified as {:?}", scene);
        let (keywords, factor) = match scene {
            Scene::Nature => (NATURE_BOOSTED, SCENE_BOOST),
            Scene::Urban => (URBAN_BOOSTED, SCENE_BOOST),
            Scene::Indoor => (INDOOR_BOOSTED, INDOOR_BOOST),
        };
        for label in labels.iter_mut() {
            if contains_any(&label.description, keywords) {
                label.score = boost(label.score, factor);
            }
        }
    }

    boost_top_event(labels);
}

/// Decide the dominant scene from labels that describe the environment
pub fn classify_scene(labels: &[EntityAnnotation]) -> Option<Scene> {
    let environment: Vec<&EntityAnnotation> = labels
        .iter()
        .filter(|l| contains_any(&l.description, ENVIRONMENT_KEYWORDS))
        .collect();
    if environment.is_empty() {
        return None;
    }

    let outdoor = keyword_sum(&environment, OUTDOOR_KEYWORDS);
    let indoor = keyword_sum(&environment, INDOOR_KEYWORDS);

    if outdoor > indoor {
        let nature = keyword_sum(&environment, NATURE_KEYWORDS);
        let urban = keyword_sum(&environment, URBAN_KEYWORDS);
        Some(if nature > urban {
            Scene::Nature
        } else {
            Scene::Urban
        })
    } else if indoor > outdoor {
        Some(Scene::Indoor)
    } else {
        None
    }
}

fn promote_landmark(labels: &mut Vec<EntityAnnotation>, landmarks: &[EntityAnnotation]) {
    let Some(top) = landmarks.first() else {
        return;
    };
    if top.score <= LANDMARK_PROMOTION_SCORE {
        return;
    }

    let needle = top.description.to_lowercase();
    let already_labelled = labels
        .iter()
        .any(|l| l.description.to_lowercase().contains(&needle));
    if !already_labelled {
        debug!("Promoting landmark '{}' to a label", top.description);
        labels.push(EntityAnnotation {
            description: top.description.clone(),
            score: top.score,
            ..EntityAnnotation::default()
        });
    }
}

fn boost_top_event(labels: &mut [EntityAnnotation]) {
    let top_event = labels
        .iter()
        .filter(|l| contains_any(&l.description, EVENT_KEYWORDS))
        // first of equal scores wins, matching the sorted label order
        .reduce(|best, l| if l.score > best.score { l } else { best })
        .filter(|l| l.score > EVENT_MIN_SCORE)
        .map(|l| l.description.clone());

    if let Some(event) = top_event {
        debug!("Primary event: {}", event);
        for label in labels.iter_mut().filter(|l| l.description == event) {
            label.score = boost(label.score, EVENT_BOOST);
        }
    }
}

fn keyword_sum(labels: &[&EntityAnnotation], keywords: &[&str]) -> f64 {
    labels
        .iter()
        .filter(|l| contains_any(&l.description, keywords))
        .map(|l| l.score)
        .sum()
}

/// Case-insensitive check for any keyword as a substring
pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

fn boost(score: f64, factor: f64) -> f64 {
    (score * factor).min(1.0)
}

fn sort_by_score(labels: &mut [EntityAnnotation]) {
    labels.sort_by(|a, b| b.score.total_cmp(&a.score));
}
