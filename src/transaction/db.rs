//! Database operations for transactions.

use std::cmp::Reverse;

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    timestamp::{from_stored_text, to_stored_text},
    transaction::{EffectiveDate, Transaction, TransactionBuilder, UNCATEGORIZED_LABEL},
};

const SELECT_COLUMNS: &str =
    "SELECT id, amount, type, category, merchant, note, date, created_at FROM \"transaction\"";

/// Create a new transaction in the database from a builder.
///
/// The creation time is set to the current time, and a transaction without a
/// date is dated at its creation time.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let created_at = OffsetDateTime::now_utc();
    let date = builder.date.unwrap_or(created_at);

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, type, category, merchant, note, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, amount, type, category, merchant, note, date, created_at",
        )?
        .query_row(
            (
                builder.amount.as_f64(),
                builder.kind,
                builder.category.as_str(),
                builder.merchant,
                builder.note,
                to_stored_text(date),
                to_stored_text(created_at),
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve up to `limit` transactions, most recent effective date first.
///
/// Transactions without a valid effective date come last. Ties are ordered
/// with the most recently recorded transaction first.
pub fn get_transactions(limit: u32, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let mut transactions = connection
        .prepare(&format!("{SELECT_COLUMNS} ORDER BY id DESC;"))?
        .query_map([], map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()?;

    // Unparseable dates fall back to `created_at`. The sort is stable, so ties
    // keep the id order.
    transactions.sort_by_key(|transaction| {
        Reverse(match transaction.effective_date() {
            EffectiveDate::Valid(timestamp) => Some(timestamp),
            EffectiveDate::Unknown => None,
        })
    });
    transactions.truncate(limit as usize);

    Ok(transactions)
}

/// Retrieve every transaction in the order they were recorded.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!("{SELECT_COLUMNS} ORDER BY id ASC;"))?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Initialize the transaction table.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            amount REAL NOT NULL CHECK (amount > 0),
            type TEXT NOT NULL DEFAULT 'expense' CHECK (type IN ('expense', 'income')),
            category TEXT,
            merchant TEXT,
            note TEXT,
            date TEXT,
            created_at TEXT
        );",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
///
/// A missing category is read as [UNCATEGORIZED_LABEL], and timestamps that
/// are missing or cannot be parsed are read as `None`.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let category: Option<String> = row.get(3)?;
    let date: Option<String> = row.get(6)?;
    let created_at: Option<String> = row.get(7)?;

    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        kind: row.get(2)?,
        category: category.unwrap_or_else(|| UNCATEGORIZED_LABEL.to_owned()),
        merchant: row.get(4)?,
        note: row.get(5)?,
        date: date.as_deref().and_then(from_stored_text),
        created_at: created_at.as_deref().and_then(from_stored_text),
    })
}
