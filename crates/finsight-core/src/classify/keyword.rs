//! Keyword heuristic classification
//!
//! Deterministic, zero-setup fallback behind the trained-model path.
//! Categories are scanned in a fixed order and keywords within a category in
//! listed order; the first keyword found as a substring of the normalized
//! description wins. Multi-word phrases ("uber eats") match as literal
//! substrings without word-boundary anchoring — a known limitation kept for
//! predictability.

use super::ClassifyStrategy;
use crate::models::ClassificationResult;

/// Confidence assigned to every keyword match.
const KEYWORD_CONFIDENCE: f64 = 0.8;

/// Ordered category → keyword lists. Scan order matters: earlier categories
/// shadow later ones when a description contains keywords from both.
const KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &[
            "food",
            "grocery",
            "restaurant",
            "cafe",
            "coffee",
            "tea",
            "uber eats",
            "doordash",
            "walmart",
            "costco",
        ],
    ),
    (
        "Transportation",
        &[
            "gas", "uber", "lyft", "parking", "toll", "transit", "fuel", "bus", "train",
            "flight",
        ],
    ),
    (
        "Shopping",
        &["amazon", "store", "shop", "mall", "clothing", "shoes"],
    ),
    (
        "Utilities",
        &["electric", "water", "internet", "phone", "utility", "bill", "wifi"],
    ),
    (
        "Healthcare",
        &["pharmacy", "doctor", "hospital", "medical", "health", "dentist"],
    ),
    (
        "Entertainment",
        &[
            "netflix",
            "spotify",
            "movie",
            "game",
            "subscription",
            "ticket",
            "concert",
        ],
    ),
    (
        "Education",
        &["course", "tuition", "book", "school", "university", "class"],
    ),
];

/// Substring keyword matcher over the normalized description
#[derive(Debug, Default)]
pub struct KeywordStrategy;

impl KeywordStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl ClassifyStrategy for KeywordStrategy {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn attempt(&self, normalized: &str) -> Option<ClassificationResult> {
        for (category, words) in KEYWORDS {
            for word in *words {
                if normalized.contains(word) {
                    return Some(ClassificationResult::new(
                        *category,
                        KEYWORD_CONFIDENCE,
                        format!("Matched keyword '{}'", word),
                    ));
                }
            }
        }
        None
    }
}
