//! Info cards: the full ballot of an address.

use axum::{
    extract::{Query, State},
    Json,
};

use super::{require_param, ApiResult, BallotQuery};
use crate::ballot::{record_ballot, BallotDraft};
use crate::errors::AppError;
use crate::models::Election;
use crate::AppState;

/// GET /info-cards?electionId=&address= - Look up the ballot for an address,
/// record it on the election and return the updated election.
pub async fn get_info_cards(
    State(state): State<AppState>,
    Query(query): Query<BallotQuery>,
) -> ApiResult<Election> {
    let election_id = require_param(query.election_id, "electionId")?;
    let address = require_param(query.address, "address")?;

    let election = state
        .repo
        .find_election(&election_id)
        .await?
        .ok_or_else(|| AppError::election_not_found(&election_id))?;

    let voter_info = state.civic.voter_info(&address, &election_id).await?;
    let mut draft = BallotDraft::from_voter_info(&voter_info)?;

    if let Some(wevote) = &state.wevote {
        draft.enrich_candidates(wevote.as_ref()).await;
    }

    let election = record_ballot(&state.repo, election, draft).await?;
    Ok(Json(election))
}
