//! The endpoint for summarizing all transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    summary::{Summary, summarize},
    transaction::get_all_transactions,
};

/// The state needed for summarizing transactions.
#[derive(Debug, Clone)]
pub struct SummaryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Read every transaction from the store and summarize them.
pub(crate) fn load_summary(db_connection: &Mutex<Connection>) -> Result<Summary, Error> {
    let connection = db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let transactions = get_all_transactions(&connection)?;
    tracing::debug!("Summarizing {} transactions", transactions.len());

    Ok(summarize(&transactions))
}

/// Respond with the summary of all transactions.
pub async fn get_summary_endpoint(
    State(state): State<SummaryState>,
) -> Result<Json<Summary>, Error> {
    load_summary(&state.db_connection).map(Json)
}
