//! Ballot contents of an election.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use super::{require_param, ApiResult, BallotQuery};
use crate::errors::AppError;
use crate::models::{Contest, Referendum};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ContestsResponse {
    pub contests: Vec<Contest>,
    pub referendums: Vec<Referendum>,
}

/// GET /contests?electionId= - Contests and referendums linked to an election.
pub async fn get_contests(
    State(state): State<AppState>,
    Query(query): Query<BallotQuery>,
) -> ApiResult<ContestsResponse> {
    let election_id = require_param(query.election_id, "electionId")?;

    let election = state
        .repo
        .find_election(&election_id)
        .await?
        .ok_or_else(|| AppError::election_not_found(&election_id))?;

    let mut contests = Vec::with_capacity(election.contests.len());
    for key in &election.contests {
        match state.repo.load::<Contest>(*key).await? {
            Some(contest) => contests.push(contest),
            None => tracing::warn!(election = %election_id, key, "Contest document is missing"),
        }
    }

    let mut referendums = Vec::with_capacity(election.referendums.len());
    for key in &election.referendums {
        match state.repo.load::<Referendum>(*key).await? {
            Some(referendum) => referendums.push(referendum),
            None => {
                tracing::warn!(election = %election_id, key, "Referendum document is missing")
            }
        }
    }

    Ok(Json(ContestsResponse {
        contests,
        referendums,
    }))
}
