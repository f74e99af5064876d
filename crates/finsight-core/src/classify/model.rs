//! Trained-model classification strategy
//!
//! Optionally loads a pre-trained artifact pair from disk: a feature
//! vectorizer (`vectorizer.json`: token vocabulary + idf weights) and a
//! linear classifier (`category_classifier.json`: class labels, per-class
//! coefficient rows, intercepts). The pair is the serialized output of an
//! external training job; this crate never trains.
//!
//! Loading happens lazily, at most once per process, behind a `OnceLock`.
//! The loaded artifact is immutable and shared freely by concurrent readers.
//! Load failure is an explicit `Result` consumed here as "strategy declines"
//! so the fallback chain carries on with the keyword heuristic.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

use super::ClassifyStrategy;
use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::models::ClassificationResult;

/// Serialized tf-idf feature vectorizer
#[derive(Debug, Deserialize)]
pub struct Vectorizer {
    /// token → feature index
    vocabulary: HashMap<String, usize>,
    /// inverse document frequency weight per feature index
    idf: Vec<f64>,
}

impl Vectorizer {
    fn validate(&self) -> Result<()> {
        for (token, &idx) in &self.vocabulary {
            if idx >= self.idf.len() {
                return Err(Error::Artifact(format!(
                    "vocabulary index {} for token '{}' out of range ({} features)",
                    idx,
                    token,
                    self.idf.len()
                )));
            }
        }
        Ok(())
    }

    /// Map normalized text onto the feature space: per-token counts scaled
    /// by idf. Unknown tokens contribute nothing.
    fn transform(&self, normalized: &str) -> Vec<f64> {
        let mut features = vec![0.0; self.idf.len()];
        for token in normalized.split_whitespace() {
            if let Some(&idx) = self.vocabulary.get(token) {
                features[idx] += self.idf[idx];
            }
        }
        features
    }
}

/// Serialized linear classifier (one coefficient row per class)
#[derive(Debug, Deserialize)]
pub struct LinearClassifier {
    classes: Vec<String>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearClassifier {
    fn validate(&self, n_features: usize) -> Result<()> {
        if self.classes.is_empty() {
            return Err(Error::Artifact("classifier has no classes".to_string()));
        }
        if self.coefficients.len() != self.classes.len()
            || self.intercepts.len() != self.classes.len()
        {
            return Err(Error::Artifact(format!(
                "shape mismatch: {} classes, {} coefficient rows, {} intercepts",
                self.classes.len(),
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        for (i, row) in self.coefficients.iter().enumerate() {
            if row.len() != n_features {
                return Err(Error::Artifact(format!(
                    "coefficient row {} has {} features, vectorizer has {}",
                    i,
                    row.len(),
                    n_features
                )));
            }
        }
        Ok(())
    }

    /// Class-probability vector via softmax over the linear scores.
    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let scores: Vec<f64> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect();

        // Stabilized softmax
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let sum: f64 = exps.iter().sum();
        exps.iter().map(|e| e / sum).collect()
    }
}

/// Loaded, validated artifact pair
#[derive(Debug)]
pub struct ModelArtifact {
    vectorizer: Vectorizer,
    classifier: LinearClassifier,
}

impl ModelArtifact {
    /// Load and validate the artifact pair from the configured directory.
    ///
    /// Errors when the directory is unconfigured, either file is missing or
    /// unreadable, the JSON does not parse, or the shapes are inconsistent.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let vec_path = config
            .vectorizer_path()
            .ok_or_else(|| Error::Artifact("vectorizer artifact not found".to_string()))?;
        let clf_path = config
            .classifier_path()
            .ok_or_else(|| Error::Artifact("classifier artifact not found".to_string()))?;

        let vectorizer: Vectorizer = serde_json::from_str(&std::fs::read_to_string(vec_path)?)?;
        vectorizer.validate()?;

        let classifier: LinearClassifier =
            serde_json::from_str(&std::fs::read_to_string(clf_path)?)?;
        classifier.validate(vectorizer.idf.len())?;

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Predict the label for normalized text along with its probability.
    ///
    /// Deterministic: vectorize, score, softmax, argmax. The returned
    /// confidence is the probability assigned to the predicted label.
    pub fn classify_with_model(&self, normalized: &str) -> Option<(String, f64)> {
        let features = self.vectorizer.transform(normalized);
        let proba = self.classifier.predict_proba(&features);

        let (best_idx, best_p) = proba
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))?;
        Some((self.classifier.classes[best_idx].clone(), *best_p))
    }
}

/// Fallback-chain strategy wrapping the lazily loaded artifact
pub struct TrainedModelStrategy {
    config: ModelConfig,
    /// None once a load attempt failed; never retried within the process
    artifact: OnceLock<Option<Arc<ModelArtifact>>>,
}

impl TrainedModelStrategy {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            artifact: OnceLock::new(),
        }
    }

    fn artifact(&self) -> Option<&Arc<ModelArtifact>> {
        self.artifact
            .get_or_init(|| match ModelArtifact::load(&self.config) {
                Ok(artifact) => {
                    debug!("Loaded classifier artifact pair");
                    Some(Arc::new(artifact))
                }
                Err(err) => {
                    // Missing artifacts are routine; anything else deserves a warning.
                    match &err {
                        Error::Artifact(msg) if msg.contains("not found") => {
                            debug!("No classifier artifact: {}", msg);
                        }
                        _ => warn!(error = %err, "Failed to load classifier artifact"),
                    }
                    None
                }
            })
            .as_ref()
    }
}

impl ClassifyStrategy for TrainedModelStrategy {
    fn name(&self) -> &'static str {
        "trained_model"
    }

    fn attempt(&self, normalized: &str) -> Option<ClassificationResult> {
        let (category, confidence) = self.artifact()?.classify_with_model(normalized)?;
        let reason = if confidence > 0.8 {
            "Pattern match"
        } else {
            "Best guess based on history"
        };
        Some(ClassificationResult::new(category, confidence, reason))
    }
}
