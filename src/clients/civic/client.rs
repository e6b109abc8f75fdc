//! Civic Information API client: the election list and per-address voter
//! info.

use async_trait::async_trait;

use super::types::{ElectionsResponse, VoterInfoResponse};
use crate::clients::{read_json, FetchError};

/// Operations against the Civic Information API.
#[async_trait]
pub trait CivicApiClient: Send + Sync {
    /// List the elections currently known to the API.
    async fn elections(&self) -> Result<ElectionsResponse, FetchError>;

    /// Look up contests and polling locations for an address in one election.
    async fn voter_info(
        &self,
        address: &str,
        election_id: &str,
    ) -> Result<VoterInfoResponse, FetchError>;
}

/// HTTP-based implementation of `CivicApiClient`.
pub struct HttpCivicClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpCivicClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CivicApiClient for HttpCivicClient {
    async fn elections(&self) -> Result<ElectionsResponse, FetchError> {
        let url = format!("{}/elections", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        read_json(response).await
    }

    async fn voter_info(
        &self,
        address: &str,
        election_id: &str,
    ) -> Result<VoterInfoResponse, FetchError> {
        let url = format!("{}/voterinfo", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("address", address),
                ("electionId", election_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        read_json(response).await
    }
}

#[cfg(test)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{CivicApiClient, ElectionsResponse, FetchError, VoterInfoResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock `CivicApiClient`. Results are cloned on every call; an unset
    /// result fails with a 404 status.
    #[derive(Default)]
    pub struct MockCivicClient {
        elections_result: Mutex<Option<Result<ElectionsResponse, u16>>>,
        voter_info_result: Mutex<Option<Result<VoterInfoResponse, u16>>>,
        voter_info_calls: Mutex<Vec<(String, String)>>,
        elections_calls: Mutex<usize>,
    }

    impl MockCivicClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// Set the result for `elections` calls. `Err` carries the HTTP status.
        pub fn set_elections_result(&self, result: Result<ElectionsResponse, u16>) {
            *self.elections_result.lock().unwrap() = Some(result);
        }

        /// Set the result for `voter_info` calls. `Err` carries the HTTP status.
        pub fn set_voter_info_result(&self, result: Result<VoterInfoResponse, u16>) {
            *self.voter_info_result.lock().unwrap() = Some(result);
        }

        /// Get all (address, election ID) pairs passed to `voter_info`.
        pub fn voter_info_calls(&self) -> Vec<(String, String)> {
            self.voter_info_calls.lock().unwrap().clone()
        }

        pub fn elections_calls(&self) -> usize {
            *self.elections_calls.lock().unwrap()
        }
    }

    fn status_error(status: u16) -> FetchError {
        FetchError::Status {
            status,
            message: "mock failure".to_string(),
        }
    }

    #[async_trait]
    impl CivicApiClient for MockCivicClient {
        async fn elections(&self) -> Result<ElectionsResponse, FetchError> {
            *self.elections_calls.lock().unwrap() += 1;

            match self.elections_result.lock().unwrap().clone() {
                Some(Ok(response)) => Ok(response),
                Some(Err(status)) => Err(status_error(status)),
                None => Err(status_error(404)),
            }
        }

        async fn voter_info(
            &self,
            address: &str,
            election_id: &str,
        ) -> Result<VoterInfoResponse, FetchError> {
            self.voter_info_calls
                .lock()
                .unwrap()
                .push((address.to_string(), election_id.to_string()));

            match self.voter_info_result.lock().unwrap().clone() {
                Some(Ok(response)) => Ok(response),
                Some(Err(status)) => Err(status_error(status)),
                None => Err(status_error(404)),
            }
        }
    }
}
