//! Raw label sources gathered from one vision response.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::vision::types::{VisionResponse, WebDetection};

/// Web entities at or below this score are ignored
const WEB_ENTITY_FLOOR: f64 = 0.1;
/// Fixed score given to best-guess captions
const BEST_GUESS_SCORE: f64 = 0.9;
/// Detected objects are discounted against direct labels
const OBJECT_DISCOUNT: f64 = 0.9;

const TOP_TITLE_WORDS: usize = 15;
const TOP_TITLE_PHRASES: usize = 10;

/// A label before fusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLabel {
    pub description: String,
    pub score: f64,
}

impl RawLabel {
    pub fn new(description: impl Into<String>, score: f64) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }
}

/// Candidate labels split by where they came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSources {
    pub direct: Vec<RawLabel>,
    pub web_entities: Vec<RawLabel>,
    pub best_guesses: Vec<RawLabel>,
    pub page_keywords: Vec<RawLabel>,
    pub objects: Vec<RawLabel>,
}

impl LabelSources {
    /// Collect every source from a (typically enhanced) response
    pub fn from_response(response: &VisionResponse) -> Self {
        let direct = response
            .label_annotations
            .iter()
            .map(|l| RawLabel::new(l.description.clone(), l.score))
            .collect();

        let objects = response
            .localized_object_annotations
            .iter()
            .map(|o| RawLabel::new(o.name.clone(), o.score * OBJECT_DISCOUNT))
            .collect();

        let mut sources = Self {
            direct,
            objects,
            ..Self::default()
        };

        if let Some(web) = &response.web_detection {
            sources.web_entities = web_entity_labels(web);
            sources.best_guesses = web
                .best_guess_labels
                .iter()
                .map(|g| RawLabel::new(g.label.clone(), BEST_GUESS_SCORE))
                .collect();
            let titles: Vec<&str> = web
                .pages_with_matching_images
                .iter()
                .filter_map(|p| p.page_title.as_deref())
                .filter(|t| !t.is_empty())
                .collect();
            sources.page_keywords = page_title_keywords(&titles);
        }

        sources
    }

    pub fn len(&self) -> usize {
        self.direct.len()
            + self.web_entities.len()
            + self.best_guesses.len()
            + self.page_keywords.len()
            + self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn web_entity_labels(web: &WebDetection) -> Vec<RawLabel> {
    web.web_entities
        .iter()
        .filter(|e| e.score > WEB_ENTITY_FLOOR)
        .filter_map(|e| {
            e.description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| RawLabel::new(d, e.score))
        })
        .collect()
}

/// Occurrence counter that remembers first-seen order for tie breaks
#[derive(Default)]
struct Counter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl Counter {
    fn add(&mut self, key: String) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    fn top(mut self, n: usize) -> Vec<(String, usize)> {
        // stable, so equal counts keep first-seen order
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries.truncate(n);
        self.entries
    }
}

/// Mine frequent words and bigrams/trigrams from matching-page titles
pub fn page_title_keywords(titles: &[&str]) -> Vec<RawLabel> {
    if titles.is_empty() {
        return Vec::new();
    }

    let mut words = Counter::default();
    let mut phrases = Counter::default();

    for title in titles {
        let tokens = title_tokens(title);
        for (i, token) in tokens.iter().enumerate() {
            words.add(token.clone());
            if i + 1 < tokens.len() {
                phrases.add(format!("{} {}", token, tokens[i + 1]));
            }
            if i + 2 < tokens.len() {
                phrases.add(format!("{} {} {}", token, tokens[i + 1], tokens[i + 2]));
            }
        }
    }

    let total = titles.len() as f64;
    let mut keywords: Vec<RawLabel> = words
        .top(TOP_TITLE_WORDS)
        .into_iter()
        .map(|(word, count)| RawLabel::new(word, (0.6 + count as f64 / total * 0.4).min(0.9)))
        .collect();
    keywords.extend(
        phrases
            .top(TOP_TITLE_PHRASES)
            .into_iter()
            .map(|(phrase, count)| {
                RawLabel::new(phrase, (0.7 + count as f64 / total * 0.5).min(0.95))
            }),
    );
    keywords
}

/// Lower-case, blank out punctuation, keep words longer than two characters
fn title_tokens(title: &str) -> Vec<String> {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() || is_cjk(c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::types::{
        EntityAnnotation, LocalizedObjectAnnotation, WebEntity, WebLabel, WebPage,
    };

    #[test]
    fn test_title_tokens() {
        assert_eq!(
            title_tokens("Golden Retriever - Dog Breed Info!"),
            vec!["golden", "retriever", "dog", "breed", "info"]
        );
        assert_eq!(title_tokens("a to be"), Vec::<String>::new());
    }

    #[test]
    fn test_page_title_scores() {
        let keywords = page_title_keywords(&[
            "Golden Retriever puppies",
            "Golden Retriever training",
        ]);

        let golden = keywords.iter().find(|k| k.description == "golden").unwrap();
        assert!((golden.score - 0.9).abs() < 1e-9);

        let puppies = keywords.iter().find(|k| k.description == "puppies").unwrap();
        assert!((puppies.score - 0.8).abs() < 1e-9);

        let phrase = keywords
            .iter()
            .find(|k| k.description == "golden retriever")
            .unwrap();
        assert!((phrase.score - 0.95).abs() < 1e-9);

        // most frequent word leads
        assert_eq!(keywords[0].description, "golden");
    }

    #[test]
    fn test_from_response() {
        let response = VisionResponse {
            label_annotations: vec![EntityAnnotation {
                description: "Dog".to_string(),
                score: 0.9,
                ..EntityAnnotation::default()
            }],
            localized_object_annotations: vec![LocalizedObjectAnnotation {
                name: "Ball".to_string(),
                score: 0.5,
            }],
            web_detection: Some(WebDetection {
                web_entities: vec![
                    WebEntity {
                        description: Some("Labrador".to_string()),
                        score: 0.6,
                        ..WebEntity::default()
                    },
                    WebEntity {
                        description: Some("Noise".to_string()),
                        score: 0.05,
                        ..WebEntity::default()
                    },
                    WebEntity {
                        description: None,
                        score: 0.9,
                        ..WebEntity::default()
                    },
                ],
                best_guess_labels: vec![WebLabel {
                    label: "labrador retriever".to_string(),
                    language_code: None,
                }],
                pages_with_matching_images: vec![WebPage {
                    url: "https://example.com".to_string(),
                    page_title: Some("Labrador dog".to_string()),
                }],
                ..WebDetection::default()
            }),
            ..VisionResponse::default()
        };

        let sources = LabelSources::from_response(&response);
        assert_eq!(sources.direct, vec![RawLabel::new("Dog", 0.9)]);
        assert_eq!(sources.objects, vec![RawLabel::new("Ball", 0.45)]);
        assert_eq!(sources.web_entities, vec![RawLabel::new("Labrador", 0.6)]);
        assert_eq!(
            sources.best_guesses,
            vec![RawLabel::new("labrador retriever", 0.9)]
        );
        // two words and one bigram
        assert_eq!(sources.page_keywords.len(), 3);
        assert_eq!(sources.len(), 7);
    }

    #[test]
    fn test_empty_response() {
        assert!(LabelSources::from_response(&VisionResponse::default()).is_empty());
    }
}
