//! Core value types for the inference pipeline
//!
//! All entities here are call-scoped: they are supplied per invocation and
//! never persisted by the core. The only process-wide state in the crate is
//! the lazily loaded classifier artifact (see `classify::model`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed default category set. The last entry, "Other Expense", is the
/// universal fallback and is always a member of this set.
pub const DEFAULT_CATEGORIES: [&str; 11] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Utilities",
    "Healthcare",
    "Entertainment",
    "Rent/Mortgage",
    "Insurance",
    "Education",
    "Personal Care",
    "Other Expense",
];

/// Category returned when nothing else matches.
pub const FALLBACK_CATEGORY: &str = "Other Expense";

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    #[default]
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "EXPENSE",
            TransactionType::Income => "INCOME",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXPENSE" => Ok(TransactionType::Expense),
            "INCOME" => Ok(TransactionType::Income),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

/// A single transaction record as supplied by the host layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to EXPENSE when absent from the input
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
}

impl Transaction {
    /// Label used to bucket this transaction in the forecaster:
    /// explicit category, else description, else the fallback category.
    pub fn resolved_category(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .or_else(|| self.description.as_deref().filter(|d| !d.is_empty()))
            .unwrap_or(FALLBACK_CATEGORY)
    }
}

/// Result of classifying a transaction description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: String,
    /// Bounded 0..1; not a calibrated probability
    pub confidence: f64,
    /// Human-readable justification (e.g., "Matched keyword 'uber'")
    pub reason: String,
}

impl ClassificationResult {
    pub fn new(
        category: impl Into<String>,
        confidence: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            confidence,
            reason: reason.into(),
        }
    }
}

/// One forecasted (category, month) cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub category: String,
    pub predicted_amount: f64,
    pub confidence: f64,
    /// 1-based offset from the forecast date (1 = next month)
    pub target_month: u32,
}

/// Named numeric figures backing a health score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// (income - expense) / income * 100, rounded to 2 decimals
    pub savings_rate: f64,
    pub income_total: f64,
    pub expense_total: f64,
    pub savings: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_adherence_pct: Option<f64>,
}

/// Output of the health scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    /// Clamped to 0..=100
    pub score: u8,
    pub metrics: HealthMetrics,
    pub recommendations: Vec<String>,
}

/// A structured record extracted from free-text input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub amount: f64,
    /// ISO calendar date (YYYY-MM-DD)
    pub date: String,
    /// Title-cased remainder of the text after amount/date/stop-word removal
    pub description: String,
    pub category: String,
    pub reason: String,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_roundtrip() {
        assert_eq!(TransactionType::Expense.as_str(), "EXPENSE");
        assert_eq!(
            TransactionType::from_str("INCOME").unwrap(),
            TransactionType::Income
        );
        assert!(TransactionType::from_str("TRANSFER").is_err());
    }

    #[test]
    fn test_transaction_type_defaults_to_expense() {
        let tx: Transaction =
            serde_json::from_str(r#"{"amount": 12.5, "date": "2026-03-01"}"#).unwrap();
        assert_eq!(tx.kind, TransactionType::Expense);
        assert!(tx.category.is_none());
        assert!(tx.description.is_none());
    }

    #[test]
    fn test_transaction_type_serde_rename() {
        let tx: Transaction = serde_json::from_str(
            r#"{"amount": 1.0, "date": "2026-03-01", "type": "INCOME"}"#,
        )
        .unwrap();
        assert_eq!(tx.kind, TransactionType::Income);

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "INCOME");
    }

    #[test]
    fn test_resolved_category_precedence() {
        let mut tx = Transaction {
            amount: 10.0,
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            category: Some("Utilities".to_string()),
            description: Some("comcast".to_string()),
            kind: TransactionType::Expense,
        };
        assert_eq!(tx.resolved_category(), "Utilities");

        tx.category = None;
        assert_eq!(tx.resolved_category(), "comcast");

        tx.description = None;
        assert_eq!(tx.resolved_category(), FALLBACK_CATEGORY);

        tx.category = Some(String::new());
        assert_eq!(tx.resolved_category(), FALLBACK_CATEGORY);
    }

    #[test]
    fn test_fallback_is_in_default_set() {
        assert!(DEFAULT_CATEGORIES.contains(&FALLBACK_CATEGORY));
    }
}
