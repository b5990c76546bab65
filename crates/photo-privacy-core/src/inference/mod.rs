//! Heuristic classification of people, interests and ad targeting

pub mod ads;
pub mod bundle;
pub mod clothing;
pub mod demographics;
pub mod emotion;
pub mod engine;
pub mod taxonomy;

pub use bundle::{
    AgeGuess, ClassificationBundle, Emotion, GenderGuess, IncomeRange, PeopleSummary,
    PersonEmotion, PoliticalLeaning,
};
pub use demographics::{FaceShape, FaceShapeClassifier, FixedShapeClassifier};
pub use engine::InferenceEngine;
