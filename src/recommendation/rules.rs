//! Heuristic rules that turn a [Summary] into budgeting advice.

use serde::{Deserialize, Serialize};

use crate::{
    currency::format_currency_rounded,
    summary::{Summary, round_to},
};

/// Savings rates below this fraction of income are flagged as low.
const HEALTHY_SAVINGS_RATE: f64 = 0.20;
/// A category taking more than this fraction of expenses is flagged.
const CATEGORY_CONCENTRATION_LIMIT: f64 = 0.35;
/// The category checked against [DINING_LIMIT].
const DINING_CATEGORY: &str = "Dining";
/// Dining expenses above this amount trigger a tip.
const DINING_LIMIT: f64 = 150.0;
/// The number of months of expenses an emergency fund should cover.
const EMERGENCY_FUND_MONTHS: f64 = 3.0;

/// A piece of budgeting advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// A short headline.
    pub title: String,
    /// What the user could do.
    pub advice: String,
    /// The number that triggered the advice, e.g. a percentage or an amount.
    pub metric: f64,
}

impl Recommendation {
    fn new(title: impl Into<String>, advice: impl Into<String>, metric: f64) -> Self {
        Self {
            title: title.into(),
            advice: advice.into(),
            metric,
        }
    }
}

/// Derive recommendations from `summary`.
///
/// Each rule is checked independently and the recommendations are returned in
/// the order: savings rate, category concentration, dining, missing income,
/// emergency fund.
pub fn recommend(summary: &Summary) -> Vec<Recommendation> {
    [
        savings_rate(summary),
        category_concentration(summary),
        dining(summary),
        no_income(summary),
        emergency_fund(summary),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn savings_rate(summary: &Summary) -> Option<Recommendation> {
    let income = summary.total_income;

    if income <= 0.0 {
        return None;
    }

    let rate = ((income - summary.total_expense) / income).max(0.0);
    let metric = round_to(rate * 100.0, 1);

    if rate < HEALTHY_SAVINGS_RATE {
        Some(Recommendation::new(
            "Low savings rate",
            "Your savings rate is below 20%. Try allocating a fixed percentage of every income \
            to savings first.",
            metric,
        ))
    } else {
        Some(Recommendation::new(
            "Healthy savings rate",
            "Nice work maintaining a sustainable savings rate. Consider automating transfers to \
            keep it consistent.",
            metric,
        ))
    }
}

fn category_concentration(summary: &Summary) -> Option<Recommendation> {
    let top = summary.top_categories.first()?;
    let expense = summary.total_expense;

    if expense <= 0.0 || top.total / expense <= CATEGORY_CONCENTRATION_LIMIT {
        return None;
    }

    Some(Recommendation::new(
        format!("High spend in {}", top.category),
        format!(
            "Over 35% of your expenses are in {}. Set a weekly cap and track it closely.",
            top.category
        ),
        round_to(top.total / expense.max(1e-9) * 100.0, 1),
    ))
}

fn dining(summary: &Summary) -> Option<Recommendation> {
    let dining = summary.category_total(DINING_CATEGORY);

    (dining > DINING_LIMIT).then(|| {
        Recommendation::new(
            "Cut back on dining out",
            "Plan 2-3 home-cooked meals per week to reduce dining expenses by 20-30%.",
            round_to(dining, 2),
        )
    })
}

fn no_income(summary: &Summary) -> Option<Recommendation> {
    (summary.total_income == 0.0 && summary.total_expense > 0.0).then(|| {
        Recommendation::new(
            "No income tracked",
            "You have expenses but no income recorded. Add income transactions to better gauge \
            your cash flow.",
            0.0,
        )
    })
}

fn emergency_fund(summary: &Summary) -> Option<Recommendation> {
    if summary.monthly.is_empty() {
        return None;
    }

    let total: f64 = summary.monthly.values().map(|month| month.expense).sum();
    let average = total / summary.monthly.len() as f64;

    if average <= 0.0 {
        return None;
    }

    let target = average * EMERGENCY_FUND_MONTHS;

    Some(Recommendation::new(
        "Build an emergency fund",
        format!(
            "Aim for about {} (≈3 months of expenses) as a buffer.",
            format_currency_rounded(target)
        ),
        round_to(target, 2),
    ))
}
