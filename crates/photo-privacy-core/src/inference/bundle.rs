use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback interest when no taxonomy category matches
pub const GENERAL_INTERESTS: &str = "General interests";
/// Fallback clothing description
pub const CASUAL_CLOTHING: &str = "Casual clothing";
/// Fallback ad category
pub const GENERAL_CONSUMER_PRODUCTS: &str = "General Consumer Products";
/// Most ad categories ever reported
pub const MAX_AD_CATEGORIES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emotion {
    Joy,
    Sorrow,
    Anger,
    Surprise,
    Neutral,
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Emotion::Joy => "Joy",
            Emotion::Sorrow => "Sorrow",
            Emotion::Anger => "Anger",
            Emotion::Surprise => "Surprise",
            Emotion::Neutral => "Neutral",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderGuess {
    Male,
    Female,
    Unknown,
}

impl fmt::Display for GenderGuess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenderGuess::Male => "Male",
            GenderGuess::Female => "Female",
            GenderGuess::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGuess {
    Child,
    #[serde(rename = "Young Adult")]
    YoungAdult,
    Adult,
}

impl fmt::Display for AgeGuess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgeGuess::Child => "Child",
            AgeGuess::YoungAdult => "Young Adult",
            AgeGuess::Adult => "Adult",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IncomeRange {
    #[serde(rename = "High Income")]
    High,
    #[default]
    #[serde(rename = "Middle Income")]
    Middle,
    #[serde(rename = "Low Income")]
    Low,
}

impl IncomeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeRange::High => "High Income",
            IncomeRange::Middle => "Middle Income",
            IncomeRange::Low => "Low Income",
        }
    }
}

impl fmt::Display for IncomeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PoliticalLeaning {
    #[serde(rename = "Conservative Leaning")]
    Conservative,
    #[serde(rename = "Liberal Leaning")]
    Liberal,
    #[default]
    #[serde(rename = "Neutral/Unknown")]
    Neutral,
}

impl PoliticalLeaning {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoliticalLeaning::Conservative => "Conservative Leaning",
            PoliticalLeaning::Liberal => "Liberal Leaning",
            PoliticalLeaning::Neutral => "Neutral/Unknown",
        }
    }
}

impl fmt::Display for PoliticalLeaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotion tag for one detected face, e.g. `Person 1` → `Joy, Surprise`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonEmotion {
    pub person: String,
    pub emotion: String,
}

impl PersonEmotion {
    pub fn new(index: usize, emotion: impl Into<String>) -> Self {
        Self {
            person: format!("Person {}", index + 1),
            emotion: emotion.into(),
        }
    }
}

/// Heuristic guesses about the people in a photo.
///
/// None of these are demographic facts; every field is a weak proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeopleSummary {
    pub count: usize,
    pub emotions: Vec<PersonEmotion>,
    pub gender: Vec<GenderGuess>,
    pub age: Vec<AgeGuess>,
    pub race: Vec<String>,
    pub clothing: Vec<String>,
}

impl Default for PeopleSummary {
    fn default() -> Self {
        Self {
            count: 1,
            emotions: vec![PersonEmotion::new(0, Emotion::Neutral.to_string())],
            gender: vec![GenderGuess::Unknown],
            age: vec![AgeGuess::Adult],
            race: vec!["Unknown".to_string()],
            clothing: vec![CASUAL_CLOTHING.to_string()],
        }
    }
}

/// Everything the inference engine derives for one photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationBundle {
    pub people: PeopleSummary,
    pub objects: Vec<String>,
    pub interests: Vec<String>,
    pub political_affiliation: PoliticalLeaning,
    pub income_range: IncomeRange,
    pub targeted_ads: Vec<String>,
    /// Set when the vision collaborator was unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for ClassificationBundle {
    fn default() -> Self {
        Self {
            people: PeopleSummary::default(),
            objects: vec!["image".to_string()],
            interests: vec![GENERAL_INTERESTS.to_string()],
            political_affiliation: PoliticalLeaning::Neutral,
            income_range: IncomeRange::Middle,
            targeted_ads: vec![GENERAL_CONSUMER_PRODUCTS.to_string()],
            error: None,
        }
    }
}

impl ClassificationBundle {
    /// All-defaults bundle labelled with why the real analysis is missing
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            error: Some(reason.into()),
            ..Self::default()
        }
    }
}
