//! FVAP voter deadlines API.
//!
//! FVAP publishes one `evag` XML document per state:
//!
//! ```xml
//! <evag schema-version="1.0">
//!   <deadline-dates>
//!     <election-date>...</election-date>
//!     <deadline-date>
//!       <rule>Received by</rule>
//!       <date>2020-10-27T00:00:00</date>
//!       <election-type>General Election</election-type>
//!       <voting-request-type>Ballot Request</voting-request-type>
//!     </deadline-date>
//!   </deadline-dates>
//! </evag>
//! ```

use async_trait::async_trait;
use serde::Deserialize;

use super::{read_body, FetchError};
use crate::models::Deadline;

/// Operations against the FVAP deadlines API.
#[async_trait]
pub trait DeadlinesApiClient: Send + Sync {
    /// Fetch the voter deadlines for a two-letter state code.
    async fn deadlines(&self, state: &str) -> Result<Vec<Deadline>, FetchError>;
}

/// HTTP-based implementation of `DeadlinesApiClient`.
pub struct HttpDeadlinesClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDeadlinesClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DeadlinesApiClient for HttpDeadlinesClient {
    async fn deadlines(&self, state: &str) -> Result<Vec<Deadline>, FetchError> {
        let url = format!("{}/{}/deadlines", self.base_url, state.to_uppercase());

        let response = self.client.get(&url).send().await?;
        let body = read_body(response).await?;

        parse_deadlines(&body)
    }
}

#[derive(Debug, Deserialize)]
struct Evag {
    #[serde(rename = "deadline-dates", default)]
    deadline_dates: DeadlineDates,
}

#[derive(Debug, Default, Deserialize)]
struct DeadlineDates {
    #[serde(rename = "deadline-date", default)]
    deadline_date: Vec<Deadline>,
}

/// Extract the `deadline-date` entries of an `evag` document, in document
/// order.
pub fn parse_deadlines(xml: &str) -> Result<Vec<Deadline>, FetchError> {
    let evag: Evag =
        quick_xml::de::from_str(xml).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(evag.deadline_dates.deadline_date)
}
