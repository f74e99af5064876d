//! Finsight Core Library
//!
//! Inference pipeline for the Finsight financial insight service:
//! - Text normalization for merchant/description matching
//! - Category classification with a trained-model → keyword fallback chain
//! - Per-category spending forecasts via linear trend fitting
//! - Financial health scoring with recommendations
//! - Natural-language transaction parsing
//!
//! Every public operation is total: malformed records are skipped, missing
//! model artifacts degrade to heuristics, and no call surfaces an error to
//! the host layer.

pub mod classify;
pub mod config;
pub mod error;
pub mod forecast;
pub mod health;
pub mod models;
pub mod normalize;
pub mod parse;

pub use classify::{Classifier, ClassifyStrategy, KeywordStrategy, TrainedModelStrategy};
pub use config::ModelConfig;
pub use error::{Error, Result};
pub use forecast::{forecast_spending, target_month_labels};
pub use health::health_score;
pub use models::{
    ClassificationResult, ForecastPoint, HealthAssessment, HealthMetrics, ParsedEntry,
    Transaction, TransactionType, DEFAULT_CATEGORIES, FALLBACK_CATEGORY,
};
pub use normalize::normalize;
pub use parse::TextParser;
