use crate::fusion::FusedLabel;

use super::bundle::{IncomeRange, GENERAL_CONSUMER_PRODUCTS, MAX_AD_CATEGORIES};
use super::taxonomy::{contains_keyword, AD_OBJECT_THRESHOLD, FALLBACK_ADS, INTEREST_ADS, OBJECT_ADS};

fn income_ads(income: IncomeRange) -> &'static [&'static str] {
    match income {
        IncomeRange::High => &["Luxury Goods", "Premium Vehicles", "Financial Services"],
        IncomeRange::Middle => &["Mid-range Products", "Affordable Services", "Family Packages"],
        IncomeRange::Low => &["Budget Options", "Discount Stores", "Coupons"],
    }
}

/// Ad categories a targeting system could derive from this photo.
///
/// Interest ads come first, then income-tier ads, then ads triggered by
/// object labels. The result is deduplicated in order, capped, and never
/// empty.
pub fn suggest_ads(interests: &[String], income: IncomeRange, labels: &[FusedLabel]) -> Vec<String> {
    let mut candidates: Vec<&str> = Vec::new();

    for interest in interests {
        match INTEREST_ADS.get(interest.as_str()) {
            Some(ads) => candidates.extend_from_slice(ads),
            None => candidates.push(GENERAL_CONSUMER_PRODUCTS),
        }
    }

    candidates.extend_from_slice(income_ads(income));

    for label in labels.iter().filter(|l| l.score > AD_OBJECT_THRESHOLD) {
        if let Some((_, ads)) = OBJECT_ADS
            .iter()
            .find(|(keywords, _)| contains_keyword(&label.description, keywords))
        {
            candidates.extend_from_slice(ads);
        }
    }

    if candidates.is_empty() {
        candidates.extend_from_slice(FALLBACK_ADS);
    }

    let mut ads: Vec<String> = Vec::with_capacity(MAX_AD_CATEGORIES);
    for candidate in candidates {
        if ads.len() == MAX_AD_CATEGORIES {
            break;
        }
        if !ads.iter().any(|a| a == candidate) {
            ads.push(candidate.to_string());
        }
    }
    ads
}
