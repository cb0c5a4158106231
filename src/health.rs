//! Liveness and database diagnostics endpoints.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::{Value, json};

use crate::AppState;

/// The maximum number of table names listed by the diagnostics endpoint.
const MAX_LISTED_TABLES: usize = 10;
/// The maximum number of characters of an error message shown in diagnostics.
const MAX_ERROR_MESSAGE_LENGTH: usize = 80;

/// Respond with a fixed message so clients can check the server is up.
pub async fn get_root() -> Json<Value> {
    Json(json!({ "message": "Money Tracker Backend Running" }))
}

/// The state needed for the diagnostics endpoint.
#[derive(Debug, Clone)]
pub struct DiagnosticsState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub database_path: Option<String>,
}

impl FromRef<AppState> for DiagnosticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            database_path: state.database_path.clone(),
        }
    }
}

/// A description of the state of the server and its database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub backend: &'static str,
    pub database: String,
    pub database_path: Option<String>,
    pub connection_status: &'static str,
    pub tables: Vec<String>,
}

/// Describe the database connection.
///
/// Database problems are reported in the response body rather than as an
/// error status.
pub async fn get_diagnostics(State(state): State<DiagnosticsState>) -> Json<Diagnostics> {
    let (database, connection_status, tables) = match state.db_connection.lock() {
        Ok(connection) => match get_table_names(&connection) {
            Ok(tables) => ("Connected & Working".to_owned(), "Connected", tables),
            Err(error) => {
                tracing::warn!("Database diagnostics query failed: {error}");
                (
                    format!("Connected but Error: {}", truncate(&error.to_string())),
                    "Connected",
                    Vec::new(),
                )
            }
        },
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            ("Not Available".to_owned(), "Not Connected", Vec::new())
        }
    };

    Json(Diagnostics {
        backend: "Running",
        database,
        database_path: state.database_path,
        connection_status,
        tables,
    })
}

fn get_table_names(connection: &Connection) -> Result<Vec<String>, rusqlite::Error> {
    connection
        .prepare(
            "SELECT name FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            ORDER BY name
            LIMIT :limit",
        )?
        .query_map(&[(":limit", &(MAX_LISTED_TABLES as i64))], |row| row.get(0))?
        .collect()
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_MESSAGE_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{AppState, endpoints};

    use super::{get_diagnostics, get_root, truncate};

    fn get_test_server(state: AppState) -> TestServer {
        let app = Router::new()
            .route(endpoints::ROOT, get(get_root))
            .route(endpoints::DIAGNOSTICS, get(get_diagnostics))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn get_test_state() -> AppState {
        let connection = Connection::open_in_memory().expect("Could not open database in memory.");
        AppState::new(connection, None).expect("Could not create app state.")
    }

    #[tokio::test]
    async fn root_reports_running() {
        let server = get_test_server(get_test_state());

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Money Tracker Backend Running" }));
    }

    #[tokio::test]
    async fn diagnostics_lists_tables() {
        let mut state = get_test_state();
        state.database_path = Some("money_tracker.db".to_owned());
        let server = get_test_server(state);

        let response = server.get(endpoints::DIAGNOSTICS).await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "backend": "Running",
            "database": "Connected & Working",
            "database_path": "money_tracker.db",
            "connection_status": "Connected",
            "tables": ["category", "transaction"],
        }));
    }

    #[tokio::test]
    async fn diagnostics_lists_at_most_ten_tables() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for i in 0..12 {
                connection
                    .execute(&format!("CREATE TABLE extra_{i:02} (id INTEGER)"), ())
                    .unwrap();
            }
        }
        let server = get_test_server(state);

        let response = server.get(endpoints::DIAGNOSTICS).await;

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["tables"].as_array().unwrap().len(), 10);
        assert_eq!(body["database_path"], json!(null));
    }

    #[tokio::test]
    async fn diagnostics_reports_poisoned_lock() {
        let state = get_test_state();
        let db_connection = Arc::clone(&state.db_connection);
        let _ = thread::spawn(move || {
            let _guard = db_connection.lock().unwrap();
            panic!("poison the database lock");
        })
        .join();
        let server = get_test_server(state);

        let response = server.get(endpoints::DIAGNOSTICS).await;

        response.assert_status_ok();
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["database"], "Not Available");
        assert_eq!(body["connection_status"], "Not Connected");
        assert_eq!(body["tables"], json!([]));
    }

    #[test]
    fn truncate_limits_message_to_eighty_characters() {
        let message = "é".repeat(100);

        assert_eq!(truncate(&message).chars().count(), 80);
        assert_eq!(truncate("short"), "short");
    }
}
