//! The endpoint for budgeting recommendations.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    recommendation::{Recommendation, recommend},
    summary::{Summary, load_summary},
};

/// The state needed for making recommendations.
#[derive(Debug, Clone)]
pub struct RecommendationsState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RecommendationsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The recommendations along with the summary they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationsResponse {
    /// The applicable recommendations in rule order.
    pub recommendations: Vec<Recommendation>,
    /// The summary of all transactions.
    pub summary: Summary,
}

/// Respond with recommendations computed from a fresh summary of all transactions.
pub async fn get_recommendations_endpoint(
    State(state): State<RecommendationsState>,
) -> Result<Json<RecommendationsResponse>, Error> {
    let summary = load_summary(&state.db_connection)?;
    let recommendations = recommend(&summary);

    Ok(Json(RecommendationsResponse {
        recommendations,
        summary,
    }))
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        AppState, endpoints,
        transaction::{Amount, Transaction, TransactionType, create_transaction},
    };

    use super::get_recommendations_endpoint;

    fn get_test_server() -> (TestServer, AppState) {
        let connection = Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(connection, None).expect("Could not create app state.");
        let app = Router::new()
            .route(endpoints::RECOMMENDATIONS, get(get_recommendations_endpoint))
            .with_state(state.clone());

        (
            TestServer::try_new(app).expect("Could not create test server."),
            state,
        )
    }

    fn add_transaction(state: &AppState, amount: f64, kind: TransactionType, category: &str) {
        create_transaction(
            Transaction::build(Amount::new(amount).unwrap(), category).kind(kind),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn empty_store_has_no_recommendations() {
        let (server, _) = get_test_server();

        let response = server.get(endpoints::RECOMMENDATIONS).await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["recommendations"], json!([]));
        assert_eq!(body["summary"]["count"], 0);
    }

    #[tokio::test]
    async fn recommendations_include_summary() {
        let (server, state) = get_test_server();
        add_transaction(&state, 1000.0, TransactionType::Income, "Salary");
        add_transaction(&state, 900.0, TransactionType::Expense, "Rent");

        let response = server.get(endpoints::RECOMMENDATIONS).await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["recommendations"][0]["title"], "Low savings rate");
        assert_eq!(body["recommendations"][0]["metric"], 10.0);
        assert_eq!(body["summary"]["net"], 100.0);
        assert_eq!(body["summary"]["count"], 2);
    }

    #[tokio::test]
    async fn recommendations_reflect_new_transactions() {
        let (server, state) = get_test_server();
        add_transaction(&state, 100.0, TransactionType::Expense, "Groceries");

        let before = server.get(endpoints::RECOMMENDATIONS).await.json::<Value>();
        add_transaction(&state, 5000.0, TransactionType::Income, "Salary");
        let after = server.get(endpoints::RECOMMENDATIONS).await.json::<Value>();

        assert_eq!(before["recommendations"][0]["title"], "High spend in Groceries");
        assert_eq!(after["recommendations"][0]["title"], "Healthy savings rate");
        assert_eq!(after["summary"]["count"], 2);
    }
}
