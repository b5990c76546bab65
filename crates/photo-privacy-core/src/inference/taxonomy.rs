//! Keyword taxonomies driving the label-based classifiers.
//!
//! Each table maps a category to keywords matched as case-insensitive
//! substrings of fused label descriptions. Classifiers iterate the tables
//! uniformly; adding a category means adding a row here.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::fusion::FusedLabel;

/// One category and the keywords that evidence it
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// An ordered set of categories
#[derive(Debug, Clone, Copy)]
pub struct Taxonomy(pub &'static [Category]);

impl Taxonomy {
    /// Every category evidenced by a label scoring above `threshold`, in table order
    pub fn all_matches(&self, labels: &[FusedLabel], threshold: f64) -> Vec<&'static str> {
        self.0
            .iter()
            .filter(|c| any_label_matches(labels, c.keywords, threshold))
            .map(|c| c.name)
            .collect()
    }

    /// The first category in table order evidenced above `threshold`
    pub fn first_match(&self, labels: &[FusedLabel], threshold: f64) -> Option<&'static str> {
        self.0
            .iter()
            .find(|c| any_label_matches(labels, c.keywords, threshold))
            .map(|c| c.name)
    }
}

/// Whether any label scoring above `threshold` contains any keyword
pub fn any_label_matches(labels: &[FusedLabel], keywords: &[&str], threshold: f64) -> bool {
    labels
        .iter()
        .any(|l| l.score > threshold && contains_keyword(&l.description, keywords))
}

/// Case-insensitive substring match against a keyword list
pub fn contains_keyword(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

pub const RACE_THRESHOLD: f64 = 0.1;
pub const INTEREST_BASE_THRESHOLD: f64 = 0.1;
pub const POLITICAL_THRESHOLD: f64 = 0.2;
pub const INCOME_THRESHOLD: f64 = 0.2;
pub const CLOTHING_THRESHOLD: f64 = 0.1;
pub const OBJECT_THRESHOLD: f64 = 0.15;
pub const AD_OBJECT_THRESHOLD: f64 = 0.2;

pub const RACE: Taxonomy = Taxonomy(&[
    Category {
        name: "Asian",
        keywords: &[
            "asian", "chinese", "japanese", "korean", "vietnamese", "thai", "malaysian",
            "indonesian", "oriental", "east asian", "mongoloid", "filipino", "taiwan",
            "hongkong", "singapore",
        ],
    },
    Category {
        name: "Caucasian",
        keywords: &[
            "caucasian", "european", "white person", "western", "white", "fair skin", "anglo",
            "nordic", "slavic", "german", "french", "italian", "english", "american",
            "australian",
        ],
    },
    Category {
        name: "Black",
        keywords: &[
            "african", "black person", "african american", "dark skin", "ebony", "negro",
            "jamaican", "nigerian", "kenyan", "ethiopian", "somali",
        ],
    },
    Category {
        name: "Latino",
        keywords: &[
            "latino", "latina", "hispanic", "mexican", "spanish", "latin american",
            "puerto rican", "cuban", "dominican", "brazilian", "colombian", "central american",
            "south american",
        ],
    },
    Category {
        name: "Middle Eastern",
        keywords: &[
            "middle eastern", "arab", "persian", "turkish", "arabic", "saudi", "iranian",
            "iraqi", "egyptian", "lebanese", "syrian", "dubai", "qatar", "mediterranean",
        ],
    },
]);

pub const INTERESTS: Taxonomy = Taxonomy(&[
    Category {
        name: "Sports",
        keywords: &[
            "sport", "basketball", "football", "soccer", "tennis", "golf", "swimming", "athlete",
            "ball", "game", "baseball", "hockey", "running", "cycling", "fitness",
            "outdoor activity",
        ],
    },
    Category {
        name: "Fashion",
        keywords: &[
            "fashion", "model", "style", "clothing", "design", "luxury", "beauty", "cosmetics",
            "makeup", "accessory", "jewelry", "brand", "trend",
        ],
    },
    Category {
        name: "Technology",
        keywords: &[
            "technology", "computer", "device", "electronic", "digital", "smartphone",
            "internet", "tech", "gadget", "software", "hardware", "phone", "laptop", "tablet",
        ],
    },
    Category {
        name: "Art",
        keywords: &[
            "art", "painting", "museum", "gallery", "artist", "creative", "design", "sculpture",
            "photography", "drawing", "craft", "exhibition",
        ],
    },
    Category {
        name: "Travel",
        keywords: &[
            "travel", "tourism", "vacation", "trip", "tourist", "destination", "adventure",
            "explore", "journey", "sightseeing", "landmark", "hotel", "resort",
        ],
    },
    Category {
        name: "Food",
        keywords: &[
            "food", "cuisine", "restaurant", "cooking", "chef", "culinary", "dining", "meal",
            "dish", "recipe", "baking", "dessert", "drink", "coffee", "wine",
        ],
    },
    Category {
        name: "Nature",
        keywords: &[
            "nature", "outdoor", "landscape", "environment", "wildlife", "garden", "hiking",
            "camping", "mountain", "beach", "forest", "park", "sea", "ocean", "lake",
        ],
    },
    Category {
        name: "Music",
        keywords: &[
            "music", "concert", "instrument", "musician", "band", "singer", "audio", "sound",
            "song", "guitar", "piano", "vocal", "dance", "pop", "rock",
        ],
    },
    Category {
        name: "Reading",
        keywords: &[
            "book", "reading", "literature", "novel", "magazine", "publication", "library",
            "author", "story", "poetry", "education",
        ],
    },
    Category {
        name: "Fitness",
        keywords: &[
            "fitness", "exercise", "workout", "gym", "health", "training", "wellness", "yoga",
            "running", "strength", "sports", "athletic",
        ],
    },
]);

/// Scene hints used when no interest clears its threshold.
/// Matching is unthresholded; each row contributes all of its interests.
pub const DEFAULT_INTEREST_HINTS: &[(&[&str], &[&str])] = &[
    (&["outdoor", "nature", "landscape"], &["Nature", "Travel"]),
    (&["sport", "game", "activity", "exercise"], &["Sports", "Fitness"]),
    (&["food", "drink", "meal", "restaurant"], &["Food"]),
    (&["device", "technology", "phone", "computer"], &["Technology"]),
];

pub const POLITICAL: Taxonomy = Taxonomy(&[
    Category {
        name: "Conservative Leaning",
        keywords: &[
            "church", "traditional", "rural", "military", "flag", "prayer", "patriotic",
            "religious", "conservative", "conventional", "heritage", "nationalist",
        ],
    },
    Category {
        name: "Liberal Leaning",
        keywords: &[
            "protest", "university", "urban", "multicultural", "diversity", "progressive",
            "activism", "liberal", "inclusive", "modern", "international", "global",
        ],
    },
    Category {
        name: "Neutral/Unknown",
        keywords: &[
            "neutral", "business", "professional", "office", "formal", "casual", "everyday",
            "common", "regular", "standard",
        ],
    },
]);

/// Labels above this score nudge an unmatched leaning toward conservative
pub const CONSERVATIVE_HINT_THRESHOLD: f64 = 0.3;
pub const CONSERVATIVE_HINTS: &[&str] = &["business", "office", "formal", "traditional", "family"];

pub const INCOME: Taxonomy = Taxonomy(&[
    Category {
        name: "High Income",
        keywords: &[
            "luxury", "expensive", "yacht", "mansion", "designer", "high-end", "premium",
            "executive", "business", "elite", "upscale", "gourmet", "first class", "vip",
            "wealth", "rich", "exclusive",
        ],
    },
    Category {
        name: "Middle Income",
        keywords: &[
            "comfortable", "suburban", "middle-class", "standard", "common", "average",
            "typical", "normal", "regular", "modest", "ordinary", "conventional",
        ],
    },
    Category {
        name: "Low Income",
        keywords: &[
            "basic", "simple", "budget", "economy", "minimal", "modest", "affordable", "cheap",
            "discount", "essential", "plain", "frugal",
        ],
    },
]);

pub const LUXURY_HINTS: &[&str] = &[
    "luxury", "premium", "expensive", "designer", "elegant", "formal", "professional",
    "executive",
];
pub const HIGH_END_ACTIVITY_HINTS: &[&str] = &[
    "golf", "tennis", "yacht", "sailing", "resort", "cruise", "vacation", "travel", "tourism",
];
pub const SIMPLE_LIFESTYLE_HINTS: &[&str] =
    &["simple", "basic", "rural", "farm", "countryside", "village"];

pub const CLOTHING_KEYWORDS: &[&str] = &[
    "shirt", "dress", "pants", "jacket", "coat", "suit", "uniform", "t-shirt", "jeans", "shoes",
    "hat", "cap", "glasses", "sunglasses", "tie", "clothing", "outfit", "attire", "fashion",
    "wear", "apparel", "garment", "accessory", "jewelry", "hoodie", "sweater", "trouser",
    "shorts", "skirt", "blouse", "vest", "sock", "boot", "sneaker", "scarf", "glove", "collar",
    "pocket", "button", "zipper", "formal wear", "casual wear", "costume", "dress shirt",
    "polo shirt", "denim", "leather", "cotton", "wool", "silk", "linen", "sandals", "heels",
    "watch", "necklace", "bracelet", "ring", "earring",
];
pub const UPPER_BODY: &[&str] = &[
    "shirt", "t-shirt", "blouse", "jacket", "coat", "sweater", "hoodie", "suit",
];
pub const LOWER_BODY: &[&str] = &["pants", "jeans", "shorts", "skirt", "trouser", "dress"];
pub const ACCESSORIES: &[&str] = &[
    "hat", "cap", "glasses", "sunglasses", "tie", "jewelry", "watch", "necklace", "earring",
    "ring",
];

/// Weak hints that a person appears even without a detected face
pub const PERSON_HINTS: &[&str] = &[
    "photography", "portrait", "person", "people", "selfie", "photo", "human", "face",
    "individual", "figure", "model", "pose", "photographer",
];

/// Ad categories suggested per interest
pub static INTEREST_ADS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let table: [(&'static str, &'static [&'static str]); 10] = [
        ("Fashion", &["Fashion Apparel", "Beauty Products", "Accessories"]),
        (
            "Technology",
            &["Tech Products", "Electronics", "Software", "Smart Devices"],
        ),
        ("Travel", &["Travel Destinations", "Hotels", "Flight Tickets"]),
        (
            "Food",
            &["Food & Restaurants", "Cooking Equipment", "Food Delivery"],
        ),
        (
            "Sports",
            &["Sports Equipment", "Fitness Memberships", "Sports Apparel"],
        ),
        (
            "Nature",
            &["Outdoor Gear", "Eco-friendly Products", "Camping Equipment"],
        ),
        (
            "Music",
            &["Music Streaming", "Concert Tickets", "Audio Equipment"],
        ),
        (
            "Art",
            &["Art Supplies", "Gallery Exhibitions", "Design Software"],
        ),
        ("Reading", &["Books", "E-readers", "Magazine Subscriptions"]),
        (
            "Fitness",
            &["Fitness Equipment", "Health Supplements", "Workout Apparel"],
        ),
    ];
    table.into_iter().collect()
});

/// Object keywords and the ad categories they trigger; first match per label wins
pub const OBJECT_ADS: &[(&[&str], &[&str])] = &[
    (
        &["car", "vehicle", "automobile", "transportation", "driving"],
        &["Automotive", "Car Insurance", "Auto Parts"],
    ),
    (
        &["house", "home", "apartment", "real estate", "property", "building", "residence"],
        &["Real Estate", "Home Improvement", "Furniture"],
    ),
    (
        &["pet", "dog", "cat", "animal", "bird", "fish"],
        &["Pet Products", "Pet Food", "Veterinary Services"],
    ),
    (
        &["child", "baby", "kid", "family", "parent", "toddler", "infant"],
        &["Family Products", "Children Clothes", "Toys"],
    ),
    (
        &["fitness", "exercise", "workout", "gym", "sport", "training", "health"],
        &["Fitness Products", "Health Supplements", "Workout Plans"],
    ),
    (
        &["phone", "computer", "laptop", "tech", "digital", "electronic", "device"],
        &["Electronics", "Software", "Mobile Apps"],
    ),
];

pub const FALLBACK_ADS: &[&str] = &[
    "General Consumer Products",
    "Online Services",
    "Retail Stores",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn label(description: &str, score: f64) -> FusedLabel {
        FusedLabel {
            description: description.to_string(),
            score,
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let labels = vec![label("Korean food", 0.1)];
        assert!(RACE.all_matches(&labels, RACE_THRESHOLD).is_empty());
        let labels = vec![label("Korean food", 0.11)];
        assert_eq!(RACE.all_matches(&labels, RACE_THRESHOLD), vec!["Asian"]);
    }

    #[test]
    fn test_first_match_follows_table_order() {
        let labels = vec![label("Office", 0.9), label("Church", 0.5)];
        assert_eq!(
            POLITICAL.first_match(&labels, POLITICAL_THRESHOLD),
            Some("Conservative Leaning")
        );
    }

    #[test]
    fn test_interest_ads_cover_every_interest() {
        for category in INTERESTS.0 {
            assert!(INTEREST_ADS.contains_key(category.name), "{}", category.name);
        }
    }
}
