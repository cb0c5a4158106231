//! Transaction data aggregation into totals by type, category and month.

use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, Serializer, ser::SerializeMap};
use time::UtcOffset;

use crate::transaction::{EffectiveDate, Transaction, TransactionType};

/// The month bucket for transactions without a valid date.
pub const UNKNOWN_MONTH: &str = "unknown";

/// The number of categories listed in [Summary::top_categories].
const TOP_CATEGORY_COUNT: usize = 5;

/// The total expenses for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The sum of the expenses in the category.
    pub total: f64,
}

/// The expense and income totals for one month.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// The sum of the expenses in the month.
    pub expense: f64,
    /// The sum of the income in the month.
    pub income: f64,
}

/// Totals derived from a set of transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// The sum of all expenses, rounded to cents.
    pub total_expense: f64,
    /// The sum of all income, rounded to cents.
    pub total_income: f64,
    /// Income minus expenses, rounded to cents.
    pub net: f64,
    /// Expense totals per category in the order each category was first seen.
    ///
    /// Income is not included. Rendered as a JSON object keyed by category.
    #[serde(serialize_with = "serialize_category_totals")]
    pub by_category: Vec<CategoryTotal>,
    /// Expense and income totals keyed by "YYYY-MM", or [UNKNOWN_MONTH].
    pub monthly: BTreeMap<String, MonthlyTotals>,
    /// Up to five categories with the highest expense totals, highest first.
    pub top_categories: Vec<CategoryTotal>,
    /// The number of transactions summarized.
    pub count: usize,
}

impl Summary {
    /// The expense total for `category`, or zero if there are no expenses in it.
    pub fn category_total(&self, category: &str) -> f64 {
        self.by_category
            .iter()
            .find(|category_total| category_total.category == category)
            .map(|category_total| category_total.total)
            .unwrap_or(0.0)
    }
}

/// Summarize `transactions`.
///
/// Ties in [Summary::top_categories] keep the order in which the categories
/// first appear in `transactions`.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut total_expense = 0.0;
    let mut total_income = 0.0;
    let mut by_category: Vec<CategoryTotal> = Vec::new();
    let mut category_positions: HashMap<&str, usize> = HashMap::new();
    let mut monthly: BTreeMap<String, MonthlyTotals> = BTreeMap::new();

    for transaction in transactions {
        let month = monthly
            .entry(month_key(transaction.effective_date()))
            .or_default();

        match transaction.kind {
            TransactionType::Expense => {
                total_expense += transaction.amount;
                month.expense += transaction.amount;

                match category_positions.get(transaction.category.as_str()) {
                    Some(&position) => by_category[position].total += transaction.amount,
                    None => {
                        category_positions.insert(&transaction.category, by_category.len());
                        by_category.push(CategoryTotal {
                            category: transaction.category.clone(),
                            total: transaction.amount,
                        });
                    }
                }
            }
            TransactionType::Income => {
                total_income += transaction.amount;
                month.income += transaction.amount;
            }
        }
    }

    let mut top_categories = by_category.clone();
    // `sort_by` is stable, so ties stay in the order they were first seen.
    top_categories.sort_by(|a, b| b.total.total_cmp(&a.total));
    top_categories.truncate(TOP_CATEGORY_COUNT);

    Summary {
        total_expense: round_to(total_expense, 2),
        total_income: round_to(total_income, 2),
        net: round_to(total_income - total_expense, 2),
        by_category,
        monthly,
        top_categories,
        count: transactions.len(),
    }
}

/// The "YYYY-MM" month of `date` in UTC, or [UNKNOWN_MONTH].
fn month_key(date: EffectiveDate) -> String {
    match date {
        EffectiveDate::Valid(timestamp) => {
            let timestamp = timestamp.to_offset(UtcOffset::UTC);
            format!("{:04}-{:02}", timestamp.year(), u8::from(timestamp.month()))
        }
        EffectiveDate::Unknown => UNKNOWN_MONTH.to_owned(),
    }
}

/// Round `value` to `decimals` decimal places, with halves rounded to even.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

fn serialize_category_totals<S>(totals: &[CategoryTotal], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(totals.len()))?;
    for category_total in totals {
        map.serialize_entry(&category_total.category, &category_total.total)?;
    }
    map.end()
}
