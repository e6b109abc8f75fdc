//! Election record, the root of the stored ballot graph.

use serde::{Deserialize, Serialize};

use super::document::{decode_document, require, to_document_without, Document, MappingError};
use super::{PollingStation, StoredEntity};
use crate::clients::civic::ElectionPayload;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Election {
    /// Store key. Not exposed; elections are addressed by `id`.
    #[serde(skip)]
    pub key: Option<i64>,
    /// Provider-assigned election ID.
    pub id: String,
    pub name: String,
    /// OCD division ID of the jurisdiction.
    pub scope: String,
    pub date: String,
    #[serde(default)]
    pub contests: Vec<i64>,
    #[serde(default)]
    pub referendums: Vec<i64>,
    #[serde(default)]
    pub polling_stations: Vec<PollingStation>,
}

impl Election {
    pub fn from_payload(payload: &ElectionPayload) -> Result<Self, MappingError> {
        let id = payload.id.trim().to_string();
        if id.is_empty() {
            return Err(MappingError::MissingField {
                record: "Election",
                field: "id",
            });
        }

        Ok(Self {
            key: None,
            id,
            name: require("Election", "name", payload.name.clone())?,
            scope: require("Election", "ocdDivisionId", payload.ocd_division_id.clone())?,
            date: require("Election", "electionDay", payload.election_day.clone())?,
            contests: Vec::new(),
            referendums: Vec::new(),
            polling_stations: Vec::new(),
        })
    }

    /// Append the results of one voter-info lookup. Keys already referenced
    /// are not repeated; stations are appended as-is.
    pub fn extend_ballot(
        &mut self,
        contests: impl IntoIterator<Item = i64>,
        referendums: impl IntoIterator<Item = i64>,
        polling_stations: impl IntoIterator<Item = PollingStation>,
    ) {
        push_unique(&mut self.contests, contests);
        push_unique(&mut self.referendums, referendums);
        self.polling_stations.extend(polling_stations);
    }
}

fn push_unique(keys: &mut Vec<i64>, new_keys: impl IntoIterator<Item = i64>) {
    for key in new_keys {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
}

impl StoredEntity for Election {
    const KIND: &'static str = "Election";

    fn to_document(&self) -> Document {
        to_document_without(self, &[])
    }

    fn from_document(key: i64, doc: Document) -> Result<Self, MappingError> {
        let election: Election = decode_document(Self::KIND, doc)?;
        Ok(Self {
            key: Some(key),
            ..election
        })
    }
}
