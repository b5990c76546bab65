use crate::fusion::FusedLabel;

use super::taxonomy::{
    contains_keyword, ACCESSORIES, CLOTHING_KEYWORDS, CLOTHING_THRESHOLD, LOWER_BODY, UPPER_BODY,
};

/// Clothing items worn in the photo.
///
/// Keeps at most one upper-body and one lower-body item (the highest scoring
/// of each), every accessory, and any other clothing label, deduplicated.
/// Returns an empty list when no clothing label clears the threshold.
pub fn detect_clothing(labels: &[FusedLabel]) -> Vec<String> {
    let items = labels
        .iter()
        .filter(|l| l.score > CLOTHING_THRESHOLD && contains_keyword(&l.description, CLOTHING_KEYWORDS))
        .map(|l| l.description.as_str());

    let mut other = Vec::new();
    let mut upper = None;
    let mut lower = None;
    let mut accessories = Vec::new();

    for item in items {
        if contains_keyword(item, UPPER_BODY) {
            if upper.is_none() {
                upper = Some(item);
            }
        } else if contains_keyword(item, LOWER_BODY) {
            if lower.is_none() {
                lower = Some(item);
            }
        } else if contains_keyword(item, ACCESSORIES) {
            accessories.push(item);
        } else {
            other.push(item);
        }
    }

    let mut clothing: Vec<String> = Vec::new();
    for item in other.into_iter().chain(upper).chain(lower).chain(accessories) {
        if !clothing.iter().any(|c| c == item) {
            clothing.push(item.to_string());
        }
    }
    clothing
}
