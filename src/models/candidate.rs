//! Candidate record: one person running in a contest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::document::{decode_document, require, to_document_without, Document, MappingError};
use super::StoredEntity;
use crate::clients::civic::CandidatePayload;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Store key, present once the candidate has been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub party_affiliation: String,
    #[serde(default)]
    pub campaign_site: String,
    #[serde(default)]
    pub platform_description: String,
    /// Channel type (e.g. "Twitter") to handle.
    #[serde(default)]
    pub channels: BTreeMap<String, String>,
}

impl Candidate {
    pub fn from_payload(payload: &CandidatePayload) -> Result<Self, MappingError> {
        let name = require("Candidate", "name", payload.name.clone())?;

        let mut channels = BTreeMap::new();
        for channel in &payload.channels {
            let kind = require("Candidate channel", "type", channel.kind.clone())?;
            let handle = require("Candidate channel", "id", channel.id.clone())?;
            channels.insert(kind, handle);
        }

        Ok(Self {
            id: None,
            name,
            party_affiliation: payload.party.clone().unwrap_or_default(),
            campaign_site: payload.candidate_url.clone().unwrap_or_default(),
            platform_description: String::new(),
            channels,
        })
    }
}

impl StoredEntity for Candidate {
    const KIND: &'static str = "Candidate";

    fn to_document(&self) -> Document {
        to_document_without(self, &["id"])
    }

    fn from_document(key: i64, doc: Document) -> Result<Self, MappingError> {
        let candidate: Candidate = decode_document(Self::KIND, doc)?;
        Ok(Self {
            id: Some(key),
            ..candidate
        })
    }
}
