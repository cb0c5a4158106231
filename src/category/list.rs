//! Category listing endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, ensure_default_categories, get_all_categories},
};

/// The state needed for listing categories.
#[derive(Debug, Clone)]
pub struct ListCategoriesState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListCategoriesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List all categories, adding the default categories first if there are none.
pub async fn list_categories_endpoint(
    State(state): State<ListCategoriesState>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    ensure_default_categories(&connection)?;
    let categories = get_all_categories(&connection)?;

    Ok(Json(categories))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;

    use crate::{category::create_category_table, endpoints};

    use super::{ListCategoriesState, list_categories_endpoint};

    /// A server over a store with an empty category table, i.e. one that
    /// skipped the seeding done by [crate::AppState::new].
    fn get_test_server_with_empty_store() -> TestServer {
        let connection = Connection::open_in_memory().expect("Could not open database in memory.");
        create_category_table(&connection).expect("Could not create category table.");
        let state = ListCategoriesState {
            db_connection: Arc::new(Mutex::new(connection)),
        };
        let app = Router::new()
            .route(endpoints::CATEGORIES, get(list_categories_endpoint))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn names(categories: &Value) -> Vec<&str> {
        categories
            .as_array()
            .unwrap()
            .iter()
            .map(|category| category["name"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn listing_empty_store_seeds_defaults() {
        let server = get_test_server_with_empty_store();

        let response = server.get(endpoints::CATEGORIES).await;

        response.assert_status_ok();
        let categories = response.json::<Value>();
        assert_eq!(
            names(&categories),
            ["Groceries", "Rent", "Transport", "Dining", "Salary"]
        );
        assert_eq!(categories[0]["icon"], "ShoppingCart");
        assert_eq!(categories[0]["color"], "emerald");
    }

    #[tokio::test]
    async fn listing_twice_seeds_once() {
        let server = get_test_server_with_empty_store();

        let first = server.get(endpoints::CATEGORIES).await.json::<Value>();
        let second = server.get(endpoints::CATEGORIES).await.json::<Value>();

        assert_eq!(second.as_array().unwrap().len(), 5);
        assert_eq!(first, second);
    }
}
