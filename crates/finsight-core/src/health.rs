//! Financial health scoring
//!
//! A deterministic tier table over the savings rate, with an optional second
//! tier over budget adherence. Starts at 50, adjusts per tier, clamps to
//! 0..=100. Each savings tier appends exactly one recommendation; the middle
//! budget tier adjusts the score without commentary.

use crate::models::{HealthAssessment, HealthMetrics};

/// Score a period's income/expense totals, optionally with the percentage of
/// budgets that were adhered to.
///
/// Pure and infallible: zero income is treated as "no savings, zero rate"
/// rather than a division error.
pub fn health_score(
    income_total: f64,
    expense_total: f64,
    budget_adherence_pct: Option<f64>,
) -> HealthAssessment {
    let mut recommendations = Vec::new();

    let savings = if income_total != 0.0 {
        income_total - expense_total
    } else {
        0.0
    };
    let savings_rate = if income_total != 0.0 {
        savings / income_total * 100.0
    } else {
        0.0
    };

    let mut score: i32 = 50;

    if savings_rate >= 20.0 {
        score += 25;
        recommendations.push("Great savings rate. Consider investing surplus.".to_string());
    } else if savings_rate >= 10.0 {
        score += 15;
        recommendations.push("Good savings. Try to reach 20% savings rate.".to_string());
    } else if savings_rate >= 0.0 {
        score += 5;
        recommendations.push("You're breaking even. Aim to save at least 10%.".to_string());
    } else {
        score -= 20;
        recommendations
            .push("Spending exceeds income. Review expenses and create a budget.".to_string());
    }

    if let Some(adherence) = budget_adherence_pct {
        if adherence >= 90.0 {
            score += 15;
            recommendations.push("You're staying within budget.".to_string());
        } else if adherence >= 70.0 {
            score += 5;
        } else {
            score -= 10;
            recommendations.push("Consider adjusting budgets or spending.".to_string());
        }
    }

    HealthAssessment {
        score: score.clamp(0, 100) as u8,
        metrics: HealthMetrics {
            savings_rate: (savings_rate * 100.0).round() / 100.0,
            income_total,
            expense_total,
            savings,
            budget_adherence_pct,
        },
        recommendations,
    }
}
