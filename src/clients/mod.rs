//! Outbound clients for the third-party election data providers.
//!
//! Each provider sits behind an `async_trait` so handlers can be exercised
//! against in-memory mocks, while the `Http*` implementations talk to the real
//! services over `reqwest`.

pub mod civic;
pub mod fvap;
pub mod wevote;

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use civic::{CivicApiClient, HttpCivicClient};
pub use fvap::{DeadlinesApiClient, HttpDeadlinesClient};
pub use wevote::{HttpWeVoteClient, WeVoteApiClient};

/// Errors that can occur when calling a provider.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Body could not be decoded into the expected payload
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Build the shared `reqwest` client with the configured request timeout.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Read the body of a response, failing on a non-success status.
async fn read_body(response: reqwest::Response) -> Result<String, FetchError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(FetchError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.text().await?)
}

/// Read and decode a JSON response body.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
    let body = read_body(response).await?;
    serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
}
