//! Category classification with an ordered fallback chain
//!
//! Classification never fails: the chain tries the trained-model path first
//! (when an artifact pair is available), then the keyword heuristic, and
//! finally returns the default category. Each strategy implements
//! [`ClassifyStrategy`] and is evaluated in registration order until one
//! yields a result — no nested conditionals, no exception-driven control
//! flow.

pub mod keyword;
pub mod model;

pub use keyword::KeywordStrategy;
pub use model::{ModelArtifact, TrainedModelStrategy};

use tracing::debug;

use crate::config::ModelConfig;
use crate::models::{ClassificationResult, FALLBACK_CATEGORY};
use crate::normalize::normalize;

/// Confidence reported for the default fallback category.
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Reason attached to the default fallback result.
const FALLBACK_REASON: &str = "Default fallback";

/// A single strategy in the classification fallback chain.
///
/// Strategies receive already-normalized text and return `None` to fall
/// through to the next strategy in the chain.
pub trait ClassifyStrategy: Send + Sync {
    /// Short identifier for logging
    fn name(&self) -> &'static str;

    /// Attempt to classify the normalized description.
    fn attempt(&self, normalized: &str) -> Option<ClassificationResult>;
}

/// Transaction description classifier.
///
/// Holds the ordered strategy chain plus the universal fallback. Safe to
/// share across threads; the only internal state is the one-time-loaded
/// model artifact, which is read-only after initialization.
pub struct Classifier {
    strategies: Vec<Box<dyn ClassifyStrategy>>,
}

impl Classifier {
    /// Build the standard chain: trained model (if configured) → keywords.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            strategies: vec![
                Box::new(TrainedModelStrategy::new(config)),
                Box::new(KeywordStrategy::new()),
            ],
        }
    }

    /// Build a chain with the keyword heuristic only (no artifact lookup).
    pub fn heuristic_only() -> Self {
        Self {
            strategies: vec![Box::new(KeywordStrategy::new())],
        }
    }

    /// Build a classifier from an explicit strategy chain.
    pub fn with_strategies(strategies: Vec<Box<dyn ClassifyStrategy>>) -> Self {
        Self { strategies }
    }

    /// Classify a transaction description.
    ///
    /// Total function: inputs that normalize to empty text short-circuit to
    /// the default category, and a chain with no matches falls back to it.
    pub fn classify(&self, description: &str) -> ClassificationResult {
        let normalized = normalize(description);
        if normalized.is_empty() {
            return Self::fallback();
        }

        for strategy in &self.strategies {
            if let Some(result) = strategy.attempt(&normalized) {
                debug!(
                    strategy = strategy.name(),
                    category = %result.category,
                    confidence = result.confidence,
                    "Classified description"
                );
                return result;
            }
        }

        debug!("No strategy matched, using fallback category");
        Self::fallback()
    }

    fn fallback() -> ClassificationResult {
        ClassificationResult::new(FALLBACK_CATEGORY, FALLBACK_CONFIDENCE, FALLBACK_REASON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_short_circuits_to_fallback() {
        let classifier = Classifier::heuristic_only();
        for input in ["", "   ", "!!!", "---***"] {
            let result = classifier.classify(input);
            assert_eq!(result.category, FALLBACK_CATEGORY);
            assert_eq!(result.confidence, 0.5);
            assert_eq!(result.reason, "Default fallback");
        }
    }

    #[test]
    fn test_no_match_falls_back() {
        let classifier = Classifier::heuristic_only();
        let result = classifier.classify("zzyzx qwyjibo");
        assert_eq!(result.category, FALLBACK_CATEGORY);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.reason, "Default fallback");
    }

    #[test]
    fn test_keyword_match_through_chain() {
        let classifier = Classifier::heuristic_only();
        let result = classifier.classify("UBER *TRIP 4321");
        assert_eq!(result.category, "Transportation");
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.reason, "Matched keyword 'uber'");
    }

    #[test]
    fn test_missing_artifact_degrades_to_keywords() {
        // Model strategy is configured but the directory holds no artifacts.
        let dir = tempfile::tempdir().unwrap();
        let classifier = Classifier::new(ModelConfig::with_dir(dir.path()));

        let result = classifier.classify("pharmacy pickup");
        assert_eq!(result.category, "Healthcare");
        assert_eq!(result.confidence, 0.8);
    }

    #[test]
    fn test_strategy_order_is_respected() {
        struct Fixed(&'static str);
        impl ClassifyStrategy for Fixed {
            fn name(&self) -> &'static str {
                "fixed"
            }
            fn attempt(&self, _normalized: &str) -> Option<ClassificationResult> {
                Some(ClassificationResult::new(self.0, 1.0, "fixed"))
            }
        }
        struct Never;
        impl ClassifyStrategy for Never {
            fn name(&self) -> &'static str {
                "never"
            }
            fn attempt(&self, _normalized: &str) -> Option<ClassificationResult> {
                None
            }
        }

        let classifier = Classifier::with_strategies(vec![
            Box::new(Never),
            Box::new(Fixed("Shopping")),
            Box::new(Fixed("Utilities")),
        ]);
        assert_eq!(classifier.classify("anything").category, "Shopping");
    }
}
