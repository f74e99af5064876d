//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Finsight - financial insight inference
#[derive(Parser)]
#[command(name = "finsight")]
#[command(about = "Classify, forecast, score, and parse financial data", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the trained classifier artifact pair
    ///
    /// Defaults to FINSIGHT_MODELS_DIR, then the platform data directory.
    /// When no artifacts are found the classifier falls back to its
    /// built-in keyword heuristics.
    #[arg(long, global = true)]
    pub models_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a transaction description into a spending category
    Classify {
        /// Transaction description (e.g., "UBER *TRIP")
        description: String,
    },

    /// Forecast per-category spending from historical transactions
    Forecast {
        /// JSON file containing an array of transactions
        #[arg(short, long)]
        file: PathBuf,

        /// Number of future months to forecast
        #[arg(short, long, default_value = "6")]
        months: u32,
    },

    /// Score financial health from income/expense totals
    Score {
        /// Total income for the period
        #[arg(long)]
        income: f64,

        /// Total expenses for the period
        #[arg(long)]
        expenses: f64,

        /// Percentage of budgets adhered to (0-100)
        #[arg(long)]
        budget_adherence: Option<f64>,
    },

    /// Parse a natural-language transaction entry
    Parse {
        /// Free text (e.g., "Spent 50 on groceries yesterday")
        text: String,
    },
}
