//! WeVoteUSA client, used to fill in candidate platform descriptions from
//! Ballotpedia summaries.

use async_trait::async_trait;
use serde::Deserialize;

use super::{read_json, FetchError};

/// Operations against the WeVote API.
#[async_trait]
pub trait WeVoteApiClient: Send + Sync {
    /// Ballotpedia summary of the best search hit for a candidate name.
    /// Returns an empty string when the name is blank or nothing matches.
    async fn platform_description(&self, candidate_name: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Deserialize)]
struct SearchAllResponse {
    #[serde(default)]
    search_results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    we_vote_id: String,
}

#[derive(Debug, Deserialize)]
struct BallotItemResponse {
    #[serde(default)]
    ballotpedia_candidate_summary: Option<String>,
}

/// HTTP-based implementation of `WeVoteApiClient`.
pub struct HttpWeVoteClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    voter_device_id: String,
}

impl HttpWeVoteClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
        voter_device_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            voter_device_id: voter_device_id.into(),
        }
    }

    async fn search_all(&self, candidate_name: &str) -> Result<SearchAllResponse, FetchError> {
        let url = format!("{}/searchAll/", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("csrfmiddlewaretoken", self.token.as_str()),
                ("text_from_search_field", candidate_name),
                ("voter_device_id", self.voter_device_id.as_str()),
            ])
            .send()
            .await?;

        read_json(response).await
    }

    async fn ballot_item(&self, we_vote_id: &str) -> Result<BallotItemResponse, FetchError> {
        let url = format!("{}/ballotItemRetrieve/", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("csrfmiddlewaretoken", self.token.as_str()),
                ("kind_of_ballot_item", "CANDIDATE"),
                ("ballot_item_id", ""),
                ("ballot_item_we_vote_id", we_vote_id),
            ])
            .send()
            .await?;

        read_json(response).await
    }
}

#[async_trait]
impl WeVoteApiClient for HttpWeVoteClient {
    async fn platform_description(&self, candidate_name: &str) -> Result<String, FetchError> {
        if candidate_name.trim().is_empty() {
            return Ok(String::new());
        }

        let search = self.search_all(candidate_name).await?;
        let Some(hit) = search.search_results.into_iter().next() else {
            tracing::debug!(candidate = %candidate_name, "No WeVote match");
            return Ok(String::new());
        };

        let item = self.ballot_item(&hit.we_vote_id).await?;
        Ok(item.ballotpedia_candidate_summary.unwrap_or_default())
    }
}
