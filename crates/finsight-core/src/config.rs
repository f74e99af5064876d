//! Model artifact location
//!
//! The classifier optionally consumes a pre-trained artifact pair
//! (vectorizer + classifier) from a configured directory. Absence of the
//! directory or either file is a normal, non-fatal condition: the classifier
//! degrades to its keyword heuristic.

use std::path::{Path, PathBuf};

/// Environment variable overriding the artifact directory.
pub const MODELS_DIR_ENV: &str = "FINSIGHT_MODELS_DIR";

/// Serialized feature vectorizer file name.
pub const VECTORIZER_FILE: &str = "vectorizer.json";

/// Serialized classifier file name.
pub const CLASSIFIER_FILE: &str = "category_classifier.json";

/// Resolved location of the optional trained-model artifact pair
#[derive(Debug, Clone)]
pub struct ModelConfig {
    models_dir: Option<PathBuf>,
}

impl ModelConfig {
    /// Resolve the artifact directory from the environment.
    ///
    /// Priority: `FINSIGHT_MODELS_DIR` env var, then the platform data
    /// directory (`~/.local/share/finsight/models` on Linux). `None` when
    /// neither resolves; the classifier then runs heuristics only.
    pub fn from_env() -> Self {
        let models_dir = std::env::var_os(MODELS_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::data_dir().map(|d| d.join("finsight").join("models")));
        Self { models_dir }
    }

    /// Use an explicit artifact directory (e.g., from a CLI flag).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: Some(dir.into()),
        }
    }

    /// Disable the trained-model path entirely.
    pub fn disabled() -> Self {
        Self { models_dir: None }
    }

    pub fn models_dir(&self) -> Option<&Path> {
        self.models_dir.as_deref()
    }

    /// Path to the vectorizer artifact, if it exists on disk.
    pub fn vectorizer_path(&self) -> Option<PathBuf> {
        self.existing_file(VECTORIZER_FILE)
    }

    /// Path to the classifier artifact, if it exists on disk.
    pub fn classifier_path(&self) -> Option<PathBuf> {
        self.existing_file(CLASSIFIER_FILE)
    }

    fn existing_file(&self, name: &str) -> Option<PathBuf> {
        let path = self.models_dir.as_ref()?.join(name);
        path.is_file().then_some(path)
    }
}
