//! Transaction creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{Transaction, TransactionBuilder, create_transaction, domain::TransactionForm},
};

/// The state needed for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle a request to record a transaction.
///
/// The payload is validated before anything is written, and the created
/// transaction is only returned once the database has accepted it.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    payload: Result<Json<TransactionForm>, JsonRejection>,
) -> Result<Json<Transaction>, Error> {
    let Json(form) = payload.map_err(|rejection| Error::InvalidPayload(rejection.body_text()))?;
    let builder = TransactionBuilder::try_from(form)?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let transaction = create_transaction(builder, &connection)?;

    tracing::info!(
        "Created {} transaction {} for {} in {}",
        transaction.kind,
        transaction.id,
        transaction.amount,
        transaction.category
    );

    Ok(Json(transaction))
}
