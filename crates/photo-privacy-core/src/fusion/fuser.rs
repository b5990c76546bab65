//! Greedy label clustering.
//!
//! Raw labels from every source are boosted by origin, sorted, and grouped
//! by [`labels_similar`]. Each group collapses to one label scored by the
//! self-weighted mean `Σs² / Σs`, so strong members dominate weak ones.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::sources::{LabelSources, RawLabel};
use super::stem::{labels_similar, Stemmer, SuffixStemmer};

const BEST_GUESS_BOOST: f64 = 1.2;
const PHRASE_KEYWORD_BOOST: f64 = 1.15;
const DIRECT_LABEL_BOOST: f64 = 1.1;

/// Scores further apart than this are ranked by score alone
const REPRESENTATIVE_SCORE_GAP: f64 = 0.2;
/// Description length preferred among close-scoring members
const PREFERRED_LENGTH: usize = 15;

/// A deduplicated, confidence-weighted concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedLabel {
    pub description: String,
    pub score: f64,
}

/// Fuse all sources with the default suffix stemmer
pub fn fuse(sources: &LabelSources) -> Vec<FusedLabel> {
    fuse_with(sources, &SuffixStemmer)
}

/// Fuse all sources, comparing words through `stemmer`
pub fn fuse_with(sources: &LabelSources, stemmer: &dyn Stemmer) -> Vec<FusedLabel> {
    if sources.is_empty() {
        return Vec::new();
    }

    let boosted = apply_source_boosts(sources);
    let fused = cluster(boosted, stemmer);
    debug!(
        "Fused {} raw labels into {} labels",
        sources.len(),
        fused.len()
    );
    fused
}

/// Boost labels by the source their description appears in.
///
/// Matching is by description, so a direct label that repeats a best guess
/// gets the best-guess boost.
fn apply_source_boosts(sources: &LabelSources) -> Vec<RawLabel> {
    let best_guesses: HashSet<&str> = sources
        .best_guesses
        .iter()
        .map(|l| l.description.as_str())
        .collect();
    let phrases: HashSet<&str> = sources
        .page_keywords
        .iter()
        .map(|l| l.description.as_str())
        .filter(|d| d.contains(' '))
        .collect();
    let direct: HashSet<&str> = sources
        .direct
        .iter()
        .map(|l| l.description.as_str())
        .collect();

    sources
        .direct
        .iter()
        .chain(&sources.web_entities)
        .chain(&sources.best_guesses)
        .chain(&sources.page_keywords)
        .chain(&sources.objects)
        .map(|label| {
            let key = label.description.as_str();
            let factor = if best_guesses.contains(key) {
                BEST_GUESS_BOOST
            } else if phrases.contains(key) {
                PHRASE_KEYWORD_BOOST
            } else if direct.contains(key) {
                DIRECT_LABEL_BOOST
            } else {
                1.0
            };
            RawLabel::new(label.description.clone(), (label.score * factor).min(1.0))
        })
        .collect()
}

/// Group similar labels and collapse each group to one fused label
pub fn cluster(mut labels: Vec<RawLabel>, stemmer: &dyn Stemmer) -> Vec<FusedLabel> {
    sort_descending(&mut labels);

    let mut processed: HashSet<String> = HashSet::new();
    let mut fused = Vec::new();

    for label in &labels {
        if processed.contains(&label.description.to_lowercase()) {
            continue;
        }

        let group: Vec<&RawLabel> = labels
            .iter()
            .filter(|l| !processed.contains(&l.description.to_lowercase()))
            .filter(|l| labels_similar(&l.description, &label.description, stemmer))
            .collect();

        if let Some(merged) = merge_group(&group) {
            fused.push(merged);
        }
        for member in &group {
            processed.insert(member.description.to_lowercase());
        }
    }

    // Anything not absorbed above survives unchanged
    for label in &labels {
        if processed.insert(label.description.to_lowercase()) {
            fused.push(FusedLabel {
                description: label.description.clone(),
                score: label.score,
            });
        }
    }

    fused.sort_by(|a, b| b.score.total_cmp(&a.score));
    fused
}

fn merge_group(group: &[&RawLabel]) -> Option<FusedLabel> {
    let total: f64 = group.iter().map(|l| l.score).sum();
    let representative = representative(group)?;
    let score = if total > 0.0 {
        group.iter().map(|l| l.score * l.score).sum::<f64>() / total
    } else {
        0.0
    };
    Some(FusedLabel {
        description: representative.description.clone(),
        score,
    })
}

/// Highest scorer wins outright unless another member is within the gap;
/// among close scorers the description nearest the preferred length wins.
fn representative<'a>(group: &[&'a RawLabel]) -> Option<&'a RawLabel> {
    let top = group
        .iter()
        .map(|l| l.score)
        .max_by(|a, b| a.total_cmp(b))?;

    group
        .iter()
        .copied()
        .filter(|l| top - l.score <= REPRESENTATIVE_SCORE_GAP)
        .min_by_key(|l| l.description.chars().count().abs_diff(PREFERRED_LENGTH))
}

fn sort_descending(labels: &mut [RawLabel]) {
    labels.sort_by(|a, b| b.score.total_cmp(&a.score));
}
