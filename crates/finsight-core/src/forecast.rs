//! Per-category spending forecasts
//!
//! History is bucketed into calendar months per category, resampled onto a
//! regular month-offset grid from each category's earliest transaction, and
//! extrapolated with an ordinary least-squares trend line. Categories with
//! too little history fall back to projecting their mean, and an empty input
//! still yields a complete category × month grid so callers never have to
//! special-case "no data".
//!
//! Each category is an independent computation over its own bucketed series;
//! there is no cross-category shared state.

use chrono::{Datelike, Months, NaiveDate};
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{ForecastPoint, Transaction, TransactionType, DEFAULT_CATEGORIES};

/// Confidence on the flat zero baseline emitted for empty input.
const BASELINE_CONFIDENCE: f64 = 0.1;

/// Confidence when a category has too few monthly buckets for a trend.
const MEAN_FALLBACK_CONFIDENCE: f64 = 0.5;

/// Trend confidence when exactly two monthly buckets exist (no meaningful R²).
const TWO_POINT_CONFIDENCE: f64 = 0.6;

/// Bounds applied to every trend confidence.
const CONFIDENCE_FLOOR: f64 = 0.1;
const CONFIDENCE_CEILING: f64 = 0.95;

/// Forecast per-category spending for the next `horizon_months` months.
///
/// Only EXPENSE transactions with a positive, finite amount participate;
/// malformed records are skipped individually. With no input at all, a flat
/// zero baseline over the default category set is returned so the output is
/// always a complete category × month grid.
pub fn forecast_spending(transactions: &[Transaction], horizon_months: u32) -> Vec<ForecastPoint> {
    if transactions.is_empty() {
        return baseline_grid(horizon_months);
    }

    // Bucket by resolved category. BTreeMap keeps output order deterministic
    // (sorted by category label).
    let mut by_category: BTreeMap<&str, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for tx in transactions {
        if tx.kind != TransactionType::Expense {
            continue;
        }
        if !(tx.amount.is_finite() && tx.amount > 0.0) {
            debug!(amount = tx.amount, "Skipping transaction with unusable amount");
            continue;
        }
        by_category
            .entry(tx.resolved_category())
            .or_default()
            .push((tx.date, tx.amount));
    }

    let mut result = Vec::new();
    for (category, points) in by_category {
        forecast_category(category, &points, horizon_months, &mut result);
    }
    result
}

/// Calendar-month labels ("YYYY-MM") for the next `horizon_months` months.
pub fn target_month_labels(horizon_months: u32) -> Vec<String> {
    labels_from(chrono::Local::now().date_naive(), horizon_months)
}

fn labels_from(start: NaiveDate, horizon_months: u32) -> Vec<String> {
    (1..=horizon_months)
        .map(|i| (start + Months::new(i)).format("%Y-%m").to_string())
        .collect()
}

fn baseline_grid(horizon_months: u32) -> Vec<ForecastPoint> {
    let mut result = Vec::with_capacity(DEFAULT_CATEGORIES.len() * horizon_months as usize);
    for category in DEFAULT_CATEGORIES {
        for month in 1..=horizon_months {
            result.push(ForecastPoint {
                category: category.to_string(),
                predicted_amount: 0.0,
                confidence: BASELINE_CONFIDENCE,
                target_month: month,
            });
        }
    }
    result
}

fn forecast_category(
    category: &str,
    points: &[(NaiveDate, f64)],
    horizon_months: u32,
    out: &mut Vec<ForecastPoint>,
) {
    // Aggregate into monthly buckets keyed by month-offset from the earliest
    // observed date; gaps in the history simply leave holes in the grid.
    let min_date = match points.iter().map(|(d, _)| *d).min() {
        Some(d) => d,
        None => return,
    };
    let mut monthly: BTreeMap<i64, f64> = BTreeMap::new();
    for (date, amount) in points {
        *monthly.entry(month_offset(min_date, *date)).or_default() += amount;
    }

    let xs: Vec<f64> = monthly.keys().map(|&k| k as f64).collect();
    let ys: Vec<f64> = monthly.values().copied().collect();

    // Fewer than two distinct months: no trend to fit, project the mean.
    if xs.len() < 2 {
        let mean = ys.iter().sum::<f64>() / ys.len() as f64;
        for month in 1..=horizon_months {
            out.push(ForecastPoint {
                category: category.to_string(),
                predicted_amount: round_cents(mean),
                confidence: MEAN_FALLBACK_CONFIDENCE,
                target_month: month,
            });
        }
        return;
    }

    let (slope, intercept) = fit_line(&xs, &ys);

    // R² only says something useful with more than two points; on exactly
    // two it is 1.0 by construction.
    let confidence = if xs.len() > 2 {
        r_squared(&xs, &ys, slope, intercept)
    } else {
        TWO_POINT_CONFIDENCE
    };
    let confidence = round_cents(confidence.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING));

    let last_offset = xs[xs.len() - 1];
    for month in 1..=horizon_months {
        let predicted = slope * (last_offset + month as f64) + intercept;
        out.push(ForecastPoint {
            category: category.to_string(),
            // Spending cannot be negative
            predicted_amount: round_cents(predicted.max(0.0)),
            confidence,
            target_month: month,
        });
    }
}

/// Whole months between `from` and `to` (calendar difference, not day-exact).
fn month_offset(from: NaiveDate, to: NaiveDate) -> i64 {
    (to.year() as i64 - from.year() as i64) * 12 + (to.month() as i64 - from.month() as i64)
}

/// Ordinary least-squares fit; callers guarantee at least two distinct xs.
fn fit_line(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        num += (x - mean_x) * (y - mean_y);
        den += (x - mean_x) * (x - mean_x);
    }
    let slope = num / den;
    (slope, mean_y - slope * mean_x)
}

/// Coefficient of determination of the fitted line.
fn r_squared(xs: &[f64], ys: &[f64], slope: f64, intercept: f64) -> f64 {
    let mean_y = ys.iter().sum::<f64>() / ys.len() as f64;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let predicted = slope * x + intercept;
        ss_res += (y - predicted) * (y - predicted);
        ss_tot += (y - mean_y) * (y - mean_y);
    }
    if ss_tot == 0.0 {
        // Constant series: the fit is exact.
        return 1.0;
    }
    1.0 - ss_res / ss_tot
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FALLBACK_CATEGORY;

    fn expense(amount: f64, date: &str, category: &str) -> Transaction {
        Transaction {
            amount,
            date: date.parse().unwrap(),
            category: Some(category.to_string()),
            description: None,
            kind: TransactionType::Expense,
        }
    }

    #[test]
    fn test_empty_input_yields_full_baseline_grid() {
        let points = forecast_spending(&[], 6);
        assert_eq!(points.len(), DEFAULT_CATEGORIES.len() * 6);
        for p in &points {
            assert_eq!(p.predicted_amount, 0.0);
            assert_eq!(p.confidence, 0.1);
            assert!((1..=6).contains(&p.target_month));
            assert!(DEFAULT_CATEGORIES.contains(&p.category.as_str()));
        }
    }

    #[test]
    fn test_single_transaction_projects_mean() {
        let txs = [expense(120.0, "2026-01-15", "Utilities")];
        let points = forecast_spending(&txs, 3);
        assert_eq!(points.len(), 3);
        for p in &points {
            assert_eq!(p.category, "Utilities");
            assert_eq!(p.predicted_amount, 120.0);
            assert_eq!(p.confidence, 0.5);
        }
    }

    #[test]
    fn test_same_month_transactions_aggregate_into_one_bucket() {
        // Two transactions in one calendar month: still a single bucket,
        // so the mean fallback projects their sum.
        let txs = [
            expense(40.0, "2026-01-05", "Food & Dining"),
            expense(60.0, "2026-01-28", "Food & Dining"),
        ];
        let points = forecast_spending(&txs, 2);
        assert_eq!(points.len(), 2);
        for p in &points {
            assert_eq!(p.predicted_amount, 100.0);
            assert_eq!(p.confidence, 0.5);
        }
    }

    #[test]
    fn test_two_month_trend_extrapolates() {
        // Offsets 0 and 1 with 100 then 200: slope 100/month.
        let txs = [
            expense(100.0, "2026-01-10", "Shopping"),
            expense(200.0, "2026-02-10", "Shopping"),
        ];
        let points = forecast_spending(&txs, 2);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].predicted_amount, 300.0);
        assert_eq!(points[1].predicted_amount, 400.0);
        // Exactly two buckets: fixed trend confidence.
        assert_eq!(points[0].confidence, 0.6);
    }

    #[test]
    fn test_perfect_linear_history_gets_capped_confidence() {
        let txs = [
            expense(100.0, "2026-01-01", "Transportation"),
            expense(150.0, "2026-02-01", "Transportation"),
            expense(200.0, "2026-03-01", "Transportation"),
        ];
        let points = forecast_spending(&txs, 1);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].predicted_amount, 250.0);
        // R² of 1.0 is clamped to the 0.95 ceiling.
        assert_eq!(points[0].confidence, 0.95);
    }

    #[test]
    fn test_declining_trend_clamps_at_zero() {
        let txs = [
            expense(200.0, "2026-01-01", "Entertainment"),
            expense(100.0, "2026-02-01", "Entertainment"),
        ];
        let points = forecast_spending(&txs, 3);
        assert_eq!(points[0].predicted_amount, 0.0);
        assert_eq!(points[1].predicted_amount, 0.0);
        assert_eq!(points[2].predicted_amount, 0.0);
    }

    #[test]
    fn test_never_negative_predictions() {
        let txs = [
            expense(500.0, "2025-10-01", "Shopping"),
            expense(300.0, "2025-11-01", "Shopping"),
            expense(120.0, "2025-12-01", "Shopping"),
            expense(50.0, "2026-01-01", "Shopping"),
        ];
        for p in forecast_spending(&txs, 12) {
            assert!(p.predicted_amount >= 0.0);
        }
    }

    #[test]
    fn test_noisy_history_confidence_stays_bounded() {
        let txs = [
            expense(10.0, "2025-09-01", "Food & Dining"),
            expense(900.0, "2025-10-01", "Food & Dining"),
            expense(15.0, "2025-11-01", "Food & Dining"),
            expense(880.0, "2025-12-01", "Food & Dining"),
        ];
        for p in forecast_spending(&txs, 2) {
            assert!(p.confidence >= 0.1 && p.confidence <= 0.95);
        }
    }

    #[test]
    fn test_income_and_invalid_amounts_are_skipped() {
        let mut income = expense(5000.0, "2026-01-01", "Salary");
        income.kind = TransactionType::Income;
        let zero = expense(0.0, "2026-01-01", "Shopping");
        let nan = expense(f64::NAN, "2026-01-01", "Shopping");

        // Non-empty input where nothing qualifies: no categories survive
        // filtering, so the output is empty (not the baseline grid).
        let points = forecast_spending(&[income, zero, nan], 4);
        assert!(points.is_empty());
    }

    #[test]
    fn test_description_used_when_category_missing() {
        let tx = Transaction {
            amount: 30.0,
            date: "2026-01-05".parse().unwrap(),
            category: None,
            description: Some("netflix".to_string()),
            kind: TransactionType::Expense,
        };
        let points = forecast_spending(&[tx], 1);
        assert_eq!(points[0].category, "netflix");
    }

    #[test]
    fn test_fallback_category_when_nothing_resolves() {
        let tx = Transaction {
            amount: 30.0,
            date: "2026-01-05".parse().unwrap(),
            category: None,
            description: None,
            kind: TransactionType::Expense,
        };
        let points = forecast_spending(&[tx], 1);
        assert_eq!(points[0].category, FALLBACK_CATEGORY);
    }

    #[test]
    fn test_month_offset_spans_years() {
        let a = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        assert_eq!(month_offset(a, b), 3);
        assert_eq!(month_offset(a, a), 0);
    }

    #[test]
    fn test_gap_months_stay_on_calendar_grid() {
        // January and April: offsets 0 and 3, slope 100/3 per month.
        let txs = [
            expense(100.0, "2026-01-10", "Utilities"),
            expense(200.0, "2026-04-10", "Utilities"),
        ];
        let points = forecast_spending(&txs, 1);
        // Next month after offset 3 is offset 4: 100 + 4 * (100/3) = 233.33
        assert_eq!(points[0].predicted_amount, 233.33);
    }

    #[test]
    fn test_target_month_labels() {
        let start = NaiveDate::from_ymd_opt(2026, 11, 15).unwrap();
        assert_eq!(
            labels_from(start, 3),
            vec!["2026-12", "2027-01", "2027-02"]
        );
        assert!(labels_from(start, 0).is_empty());
    }
}
