use crate::vision::types::{likelihood_score, FaceAnnotation};

use super::bundle::Emotion;

/// Any emotion above this counts as clearly expressed
const STRONG_EMOTION: f64 = 0.6;
/// Neutral score when nothing is clearly expressed
const AMBIGUOUS_NEUTRAL: f64 = 0.8;
const BASE_NEUTRAL: f64 = 0.1;
/// Emotions at or below this never get reported
const REPORT_FLOOR: f64 = 0.3;
/// Top two emotions closer than this are reported together
const COMBINE_GAP: f64 = 0.3;

/// Score one face's emotions, highest first, ties in declaration order.
///
/// When no emotion is clearly expressed, Neutral is raised and weak Joy and
/// Surprise readings are lifted to `ambiguity_offset` as soft secondaries.
pub fn emotion_scores(face: &FaceAnnotation, ambiguity_offset: f64) -> Vec<(Emotion, f64)> {
    let mut scores = vec![
        (Emotion::Joy, likelihood_score(face.joy_likelihood)),
        (Emotion::Sorrow, likelihood_score(face.sorrow_likelihood)),
        (Emotion::Anger, likelihood_score(face.anger_likelihood)),
        (Emotion::Surprise, likelihood_score(face.surprise_likelihood)),
        (Emotion::Neutral, BASE_NEUTRAL),
    ];

    if scores.iter().all(|(_, s)| *s <= STRONG_EMOTION) {
        for (emotion, score) in scores.iter_mut() {
            match emotion {
                Emotion::Neutral => *score = AMBIGUOUS_NEUTRAL,
                Emotion::Joy | Emotion::Surprise if *score < REPORT_FLOOR => {
                    *score = ambiguity_offset
                }
                _ => {}
            }
        }
    }

    scores.sort_by(|a, b| b.1.total_cmp(&a.1));
    scores
}

/// Emotion tag for one face: the top emotion, or the top two joined by ", "
pub fn classify_emotion(face: &FaceAnnotation, ambiguity_offset: f64) -> String {
    let ranked: Vec<(Emotion, f64)> = emotion_scores(face, ambiguity_offset)
        .into_iter()
        .filter(|(_, s)| *s > REPORT_FLOOR)
        .collect();

    match ranked.as_slice() {
        [] => Emotion::Neutral.to_string(),
        [(top, top_score), (second, second_score), ..] if top_score - second_score < COMBINE_GAP => {
            format!("{}, {}", top, second)
        }
        [(top, _), ..] => top.to_string(),
    }
}
