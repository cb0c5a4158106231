//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::DatabaseId, timestamp};

/// The category name used for transactions that do not have a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Whether money was spent or earned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was spent.
    #[default]
    Expense,
    /// Money that was earned.
    Income,
}

impl TransactionType {
    /// The name of the type as it appears in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            other => Err(format!("unknown transaction type \"{other}\"")),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: String| FromSqlError::Other(error.into()))
    }
}

/// A validated transaction amount: a finite number greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::NonPositiveAmount] if `amount` is
    /// zero, negative, NaN or infinite.
    pub fn new(amount: f64) -> Result<Self, Error> {
        if amount.is_finite() && amount > 0.0 {
            Ok(Self(amount))
        } else {
            Err(Error::NonPositiveAmount(amount))
        }
    }

    /// The amount as a plain number.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

/// The date a transaction is filed under: its `date` if it has one, otherwise
/// when it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveDate {
    /// A valid timestamp was found.
    Valid(OffsetDateTime),
    /// Neither the transaction date nor the creation time is a valid timestamp.
    Unknown,
}

impl EffectiveDate {
    /// Pick `date`, falling back to `created_at`.
    pub fn resolve(date: Option<OffsetDateTime>, created_at: Option<OffsetDateTime>) -> Self {
        match date.or(created_at) {
            Some(timestamp) => EffectiveDate::Valid(timestamp),
            None => EffectiveDate::Unknown,
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    #[serde(with = "crate::database_id::as_string")]
    pub id: DatabaseId,
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    /// Whether the money was spent or earned.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The name of the category the transaction belongs to.
    pub category: String,
    /// Who the money was paid to or received from.
    pub merchant: Option<String>,
    /// A free text note.
    pub note: Option<String>,
    /// When the transaction happened, if known.
    #[serde(with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    /// When the transaction was recorded, if known.
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: Amount, category: impl Into<String>) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            kind: TransactionType::default(),
            category: category.into(),
            merchant: None,
            note: None,
            date: None,
        }
    }

    /// The date the transaction is filed under for summaries.
    pub fn effective_date(&self) -> EffectiveDate {
        EffectiveDate::resolve(self.date, self.created_at)
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```ignore
/// use time::macros::datetime;
///
/// let builder = Transaction::build(Amount::new(45.99)?, "Dining")
///     .merchant(Some("Coffee shop".to_owned()))
///     .date(Some(datetime!(2025-01-15 08:30 UTC)));
///
/// let transaction = create_transaction(builder, &connection)?;
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The amount of money spent or earned.
    pub amount: Amount,

    /// Whether the money was spent or earned. Defaults to an expense.
    pub kind: TransactionType,

    /// The category of the transaction, e.g. "Groceries", "Transport", "Rent".
    ///
    /// Free text that does not have to match a stored category.
    pub category: String,

    /// Who the money was paid to or received from.
    pub merchant: Option<String>,

    /// A free text note.
    pub note: Option<String>,

    /// When the transaction happened.
    ///
    /// Defaults to the time the transaction is inserted into the database.
    pub date: Option<OffsetDateTime>,
}

impl TransactionBuilder {
    /// Set the type of the transaction.
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = kind;
        self
    }

    /// Set the merchant for the transaction.
    pub fn merchant(mut self, merchant: Option<String>) -> Self {
        self.merchant = merchant;
        self
    }

    /// Set the note for the transaction.
    pub fn note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    /// Set when the transaction happened.
    pub fn date(mut self, date: Option<OffsetDateTime>) -> Self {
        self.date = date;
        self
    }
}

/// The request body for creating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionForm {
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
    pub category: String,
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_request_date",
        serialize_with = "time::serde::rfc3339::option::serialize"
    )]
    pub date: Option<OffsetDateTime>,
}

impl TryFrom<TransactionForm> for TransactionBuilder {
    type Error = Error;

    fn try_from(form: TransactionForm) -> Result<Self, Self::Error> {
        let amount = Amount::new(form.amount)?;

        Ok(Transaction::build(amount, form.category)
            .kind(form.kind)
            .merchant(form.merchant)
            .note(form.note)
            .date(form.date))
    }
}


#[cfg(test)]
mod effective_date_tests {
    use time::macros::datetime;

    use crate::transaction::EffectiveDate;

    #[test]
    fn prefers_date() {
        let date = datetime!(2024-02-01 12:00 UTC);
        let created_at = datetime!(2024-03-01 12:00 UTC);

        let got = EffectiveDate::resolve(Some(date), Some(created_at));

        assert_eq!(got, EffectiveDate::Valid(date));
    }

    #[test]
    fn falls_back_to_created_at() {
        let created_at = datetime!(2024-03-01 12:00 UTC);

        let got = EffectiveDate::resolve(None, Some(created_at));

        assert_eq!(got, EffectiveDate::Valid(created_at));
    }

    #[test]
    fn unknown_without_any_timestamp() {
        assert_eq!(EffectiveDate::resolve(None, None), EffectiveDate::Unknown);
    }
}

#[cfg(test)]
mod transaction_form_tests {
    use serde_json::json;
    use time::macros::datetime;

    use crate::{
        Error,
        transaction::{TransactionBuilder, TransactionType, domain::TransactionForm},
    };

    #[test]
    fn type_defaults_to_expense() {
        let form: TransactionForm =
            serde_json::from_value(json!({ "amount": 10.0, "category": "Dining" })).unwrap();

        assert_eq!(form.kind, TransactionType::Expense);
        assert_eq!(form.date, None);
    }

    #[test]
    fn parses_income_with_date() {
        let form: TransactionForm = serde_json::from_value(json!({
            "amount": 2500,
            "type": "income",
            "category": "Salary",
            "merchant": "Employer",
            "date": "2024-05-31T09:00:00+12:00",
        }))
        .unwrap();

        assert_eq!(form.kind, TransactionType::Income);
        assert_eq!(form.amount, 2500.0);
        assert_eq!(form.date, Some(datetime!(2024-05-31 09:00 +12:00)));
    }

    #[test]
    fn rejects_unknown_type() {
        let result = serde_json::from_value::<TransactionForm>(json!({
            "amount": 10.0,
            "type": "transfer",
            "category": "Dining",
        }));

        assert!(result.is_err());
    }

    #[test]
    fn parses_date_without_offset_as_utc() {
        let form: TransactionForm = serde_json::from_value(json!({
            "amount": 5,
            "category": "Dining",
            "date": "2024-05-31T09:00:00",
        }))
        .unwrap();

        assert_eq!(form.date, Some(datetime!(2024-05-31 09:00 UTC)));
    }

    #[test]
    fn parses_date_only_as_midnight_utc() {
        let form: TransactionForm = serde_json::from_value(json!({
            "amount": 5,
            "category": "Dining",
            "date": "2024-05-31",
        }))
        .unwrap();

        assert_eq!(form.date, Some(datetime!(2024-05-31 00:00 UTC)));
    }

    #[test]
    fn null_date_is_none() {
        let form: TransactionForm = serde_json::from_value(json!({
            "amount": 5,
            "category": "Dining",
            "date": null,
        }))
        .unwrap();

        assert_eq!(form.date, None);
    }

    #[test]
    fn rejects_unparseable_date() {
        let result = serde_json::from_value::<TransactionForm>(json!({
            "amount": 5,
            "category": "Dining",
            "date": "last tuesday",
        }));

        assert!(result.is_err());
    }

    #[test]
    fn category_is_free_text() {
        let form: TransactionForm =
            serde_json::from_value(json!({ "amount": 5, "category": "" })).unwrap();

        let builder = TransactionBuilder::try_from(form).unwrap();

        assert_eq!(builder.category, "");
    }

    #[test]
    fn builder_rejects_zero_amount() {
        let form: TransactionForm =
            serde_json::from_value(json!({ "amount": 0, "category": "Dining" })).unwrap();

        let result = TransactionBuilder::try_from(form);

        assert_eq!(result, Err(Error::NonPositiveAmount(0.0)));
    }
}
