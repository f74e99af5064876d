//! CLI command implementations
//!
//! Each command wraps one core contract and prints its result as pretty
//! JSON on stdout. The core never fails these calls; errors here are input
//! errors (unreadable or malformed forecast files).

use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::{
    forecast_spending, health_score, target_month_labels, Classifier, TextParser, Transaction,
};

/// Read an array of transactions from a JSON file.
///
/// Lenient per record: an element with a malformed date or amount is
/// dropped on its own rather than failing the batch. Only an unreadable
/// file or non-array input is an error.
pub fn read_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid transactions in {}", path.display()))?;

    let mut transactions = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<Transaction>(record) {
            Ok(tx) => transactions.push(tx),
            Err(err) => tracing::debug!(error = %err, "Skipping malformed transaction record"),
        }
    }
    Ok(transactions)
}

pub fn cmd_classify(classifier: &Classifier, description: &str) -> Result<()> {
    let result = classifier.classify(description);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub fn cmd_forecast(file: &Path, months: u32) -> Result<()> {
    let transactions = read_transactions(file)?;
    tracing::debug!(count = transactions.len(), months, "Forecasting spending");
    let predictions = forecast_spending(&transactions, months);

    let output = serde_json::json!({
        "predictions": predictions,
        "target_months": target_month_labels(months),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn cmd_score(income: f64, expenses: f64, budget_adherence: Option<f64>) -> Result<()> {
    let assessment = health_score(income, expenses, budget_adherence);
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

pub fn cmd_parse(parser: &TextParser, text: &str) -> Result<()> {
    let entry = parser.parse(text);
    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}
