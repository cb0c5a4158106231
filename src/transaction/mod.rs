//! Recording and listing income and expense transactions.

mod create;
mod db;
mod domain;
mod list;

pub use create::create_transaction_endpoint;
pub use db::{
    create_transaction, create_transaction_table, get_all_transactions, get_transactions,
};
pub use domain::{
    Amount, EffectiveDate, Transaction, TransactionBuilder, TransactionType, UNCATEGORIZED_LABEL,
};
pub use list::list_transactions_endpoint;
