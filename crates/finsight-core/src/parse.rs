//! Natural-language transaction parsing
//!
//! Extracts an amount, a date, and a description from free text such as
//! "Spent 50 on groceries yesterday", then completes the record through the
//! classifier. Date handling is a deliberate keyword heuristic
//! (yesterday/tomorrow only), not a date-parsing engine.

use chrono::{Duration, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

use crate::classify::Classifier;
use crate::models::ParsedEntry;

/// First number in the text, optionally preceded by a currency symbol, with
/// up to two decimal places. Note this is the *first* numeric token: a
/// leading day-of-month number will win over a later amount.
fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[$€£¥₹]?\s*(\d+(?:\.\d{1,2})?)").unwrap())
}

fn date_keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(yesterday|today|tomorrow)\b").unwrap())
}

fn stop_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(spent|on|for|at)\b").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Free-text transaction parser backed by a classifier for category
/// completion.
pub struct TextParser {
    classifier: Classifier,
}

impl TextParser {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Parse free text into a structured entry, relative to today's date.
    ///
    /// Never fails: a missing amount becomes 0.0, an unrecognized date
    /// defaults to today, and classification always yields a category.
    pub fn parse(&self, text: &str) -> ParsedEntry {
        self.parse_with_today(text, chrono::Local::now().date_naive())
    }

    /// Deterministic variant of [`parse`](Self::parse) with an explicit
    /// "today".
    pub fn parse_with_today(&self, text: &str, today: NaiveDate) -> ParsedEntry {
        let amount_match = amount_re().captures(text);
        let amount = amount_match
            .as_ref()
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0);

        let lower = text.to_lowercase();
        let date = if lower.contains("yesterday") {
            today - Duration::days(1)
        } else if lower.contains("tomorrow") {
            today + Duration::days(1)
        } else {
            today
        };

        // Description: drop the matched amount (first occurrence only),
        // date keywords, and filler stop-words; collapse what remains.
        let mut remaining = match &amount_match {
            Some(c) => text.replacen(c.get(0).map_or("", |m| m.as_str()), "", 1),
            None => text.to_string(),
        };
        remaining = date_keyword_re().replace_all(&remaining, "").into_owned();
        remaining = stop_word_re().replace_all(&remaining, "").into_owned();
        let description = whitespace_re()
            .replace_all(remaining.trim(), " ")
            .trim()
            .to_string();

        let classification = self.classifier.classify(&description);

        ParsedEntry {
            amount,
            date: date.format("%Y-%m-%d").to_string(),
            description: title_case(&description),
            category: classification.category,
            reason: classification.reason,
            confidence: classification.confidence,
        }
    }
}

/// Uppercase the first letter of each alphabetic run, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
