//! Polling station lookup.

use axum::{
    extract::{Query, State},
    Json,
};

use super::{require_param, ApiResult, BallotQuery};
use crate::errors::AppError;
use crate::models::PollingStation;
use crate::AppState;

/// GET /polling-stations?electionId=&address= - Polling stations recorded on
/// an election.
///
/// Reads the stored election only; stations are recorded by `/info-cards`.
pub async fn get_polling_stations(
    State(state): State<AppState>,
    Query(query): Query<BallotQuery>,
) -> ApiResult<Vec<PollingStation>> {
    let election_id = require_param(query.election_id, "electionId")?;
    let address = require_param(query.address, "address")?;

    let election = state
        .repo
        .find_election(&election_id)
        .await?
        .ok_or_else(|| {
            tracing::info!("Election {} is not stored", election_id);
            AppError::NotFound(format!("Polling locations for {} were not found.", address))
        })?;

    Ok(Json(election.polling_stations))
}
