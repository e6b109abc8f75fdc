//! REST API module.
//!
//! One handler per route. Successful bodies are JSON; errors are plain text
//! (see [`AppError`]).

mod contests;
mod deadlines;
mod elections;
mod info_cards;
mod polling_stations;

pub use contests::*;
pub use deadlines::*;
pub use elections::*;
pub use info_cards::*;
pub use polling_stations::*;

use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;

/// Response type that can be either a JSON body or an error.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Query parameters accepted by the election-scoped routes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallotQuery {
    pub election_id: Option<String>,
    pub address: Option<String>,
}

/// Unwrap a query parameter, treating a blank value as missing.
pub fn require_param(value: Option<String>, name: &'static str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::ParameterMissing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_param() {
        assert_eq!(
            require_param(Some(" 2000 ".to_string()), "electionId").unwrap(),
            "2000"
        );
        assert!(matches!(
            require_param(Some(String::new()), "address"),
            Err(AppError::ParameterMissing("address"))
        ));
        assert!(matches!(
            require_param(None, "state"),
            Err(AppError::ParameterMissing("state"))
        ));
    }
}
