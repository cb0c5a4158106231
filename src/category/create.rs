//! Category creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, NewCategory, create_category},
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle a request to create a category.
///
/// Responds with the created category, or 400 if a category with the same
/// name already exists.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> Result<Json<Category>, Error> {
    let Json(new_category) =
        payload.map_err(|rejection| Error::InvalidPayload(rejection.body_text()))?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let category = create_category(new_category, &connection).inspect_err(|error| {
        tracing::warn!("Could not create category: {error}");
    })?;

    tracing::info!("Created category {} ({})", category.name, category.id);

    Ok(Json(category))
}
