//! Finsight CLI - financial insight inference
//!
//! Usage:
//!   finsight classify "UBER *TRIP"            Categorize a description
//!   finsight forecast --file txs.json         Forecast category spending
//!   finsight score --income 5000 --expenses 4200
//!   finsight parse "Spent 50 on groceries yesterday"

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use finsight_core::{Classifier, ModelConfig, TextParser};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let model_config = match &cli.models_dir {
        Some(dir) => ModelConfig::with_dir(dir),
        None => ModelConfig::from_env(),
    };

    match cli.command {
        Commands::Classify { description } => {
            let classifier = Classifier::new(model_config);
            commands::cmd_classify(&classifier, &description)
        }
        Commands::Forecast { file, months } => commands::cmd_forecast(&file, months),
        Commands::Score {
            income,
            expenses,
            budget_adherence,
        } => commands::cmd_score(income, expenses, budget_adherence),
        Commands::Parse { text } => {
            let parser = TextParser::new(Classifier::new(model_config));
            commands::cmd_parse(&parser, &text)
        }
    }
}
