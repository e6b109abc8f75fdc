//! Voter deadlines endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::{require_param, ApiResult};
use crate::errors::AppError;
use crate::models::{lookup_state, Deadline};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DeadlinesQuery {
    pub state: Option<String>,
}

/// GET /deadlines?state= - FVAP voter deadlines for a state or territory.
pub async fn get_deadlines(
    State(state): State<AppState>,
    Query(query): Query<DeadlinesQuery>,
) -> ApiResult<Vec<Deadline>> {
    let requested = require_param(query.state, "state")?;

    let (code, name) = lookup_state(&requested)
        .ok_or_else(|| AppError::BadRequest(format!("State {} is not supported.", requested)))?;

    tracing::debug!("Fetching deadlines for {}", name);
    Ok(Json(state.deadlines.deadlines(code).await?))
}
