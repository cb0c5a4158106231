//! Money Tracker is a backend for tracking personal income and expenses.
//!
//! This library provides a JSON REST API for recording categorized
//! transactions, summarizing them and deriving budgeting recommendations from
//! the summary.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod category;
mod currency;
mod database_id;
mod db;
mod endpoints;
mod health;
mod logging;
mod recommendation;
mod routing;
mod summary;
mod timestamp;
mod transaction;

pub use app_state::AppState;
pub use category::{
    Category, CategoryName, DEFAULT_CATEGORIES, NewCategory, create_category,
    ensure_default_categories, get_all_categories,
};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use recommendation::{Recommendation, RecommendationsResponse, recommend};
pub use routing::build_router;
pub use summary::{CategoryTotal, MonthlyTotals, Summary, UNKNOWN_MONTH, summarize};
pub use transaction::{
    Amount, EffectiveDate, Transaction, TransactionBuilder, TransactionType, UNCATEGORIZED_LABEL,
    create_transaction, get_all_transactions, get_transactions,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction amount was zero, negative or not a finite number.
    #[error("amount must be a positive number, got {0}")]
    NonPositiveAmount(f64),

    /// An empty string was used as a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// A category with the same name already exists in the store.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategory(String),

    /// The `limit` for listing transactions was zero.
    #[error("limit must be greater than zero")]
    InvalidLimit,

    /// The request body or query string could not be parsed into the expected
    /// shape, e.g. a required field is missing or `type` is not one of
    /// `expense` or `income`.
    ///
    /// The string holds the parser's description of the offending field.
    #[error("invalid request: {0}")]
    InvalidPayload(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NonPositiveAmount(_)
            | Error::EmptyCategoryName
            | Error::InvalidLimit
            | Error::InvalidPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::DuplicateCategory(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let detail = match &self {
            Error::DuplicateCategory(_) => "Category already exists".to_owned(),
            // Store errors are not intended to be shown to the client.
            Error::SqlError(_) | Error::DatabaseLockError => {
                tracing::error!("An unexpected error occurred: {}", self);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            error => error.to_string(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
