//! Election list endpoints.

use axum::{extract::State, http::StatusCode, Json};

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{Election, StoredEntity};
use crate::AppState;

/// GET /election - List all stored elections.
pub async fn list_elections(State(state): State<AppState>) -> ApiResult<Vec<Election>> {
    Ok(Json(state.repo.load_all::<Election>().await?))
}

/// PUT /election - Replace the stored elections with the Civic API's list.
///
/// Child documents of the old elections are left in place.
pub async fn refresh_elections(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let response = state.civic.elections().await.map_err(|e| {
        tracing::error!("Election query failed: {}", e);
        AppError::UpstreamFetch("Could not query elections.".to_string())
    })?;

    // Map everything before touching the store
    let docs = response
        .elections
        .iter()
        .map(|payload| Election::from_payload(payload).map(|e| e.to_document()))
        .collect::<Result<Vec<_>, _>>()?;

    let keys = state.repo.replace_all(Election::KIND, &docs).await?;
    tracing::info!("Refreshed {} elections", keys.len());

    Ok(StatusCode::NO_CONTENT)
}
