//! Contest record: one office on the ballot.

use serde::{Deserialize, Serialize};

use super::document::{decode_document, require, to_document_without, Document, MappingError};
use super::{join_source_names, StoredEntity};
use crate::clients::civic::ContestPayload;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub office: String,
    /// Store keys of the candidates, in ballot order.
    #[serde(default)]
    pub candidates: Vec<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
}

impl Contest {
    /// Map the contest fields of a payload. Candidates are mapped and stored
    /// separately; their keys are attached with [`Contest::with_candidates`].
    pub fn from_payload(payload: &ContestPayload) -> Result<Self, MappingError> {
        let office = require("Contest", "office", payload.office.clone())?;
        let name = payload
            .ballot_title
            .clone()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| office.clone());

        Ok(Self {
            id: None,
            name,
            office,
            candidates: Vec::new(),
            description: String::new(),
            source: join_source_names(&payload.sources),
        })
    }

    pub fn with_candidates(self, candidates: Vec<i64>) -> Self {
        Self { candidates, ..self }
    }
}

impl StoredEntity for Contest {
    const KIND: &'static str = "Contest";

    fn to_document(&self) -> Document {
        to_document_without(self, &["id"])
    }

    fn from_document(key: i64, doc: Document) -> Result<Self, MappingError> {
        let contest: Contest = decode_document(Self::KIND, doc)?;
        Ok(Self {
            id: Some(key),
            ..contest
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_payload() {
        let payload: ContestPayload = serde_json::from_value(json!({
            "type": "General",
            "office": "Governor",
            "candidates": [{"name": "name1"}, {"name": "name2"}],
            "sources": [{"name": "Voter Information Project"}]
        }))
        .unwrap();

        let contest = Contest::from_payload(&payload).unwrap();
        assert_eq!(contest.name, "Governor");
        assert_eq!(contest.office, "Governor");
        assert_eq!(contest.description, "");
        assert_eq!(contest.source, "Voter Information Project");
        assert!(contest.candidates.is_empty());
    }

    #[test]
    fn test_ballot_title_names_contest() {
        let payload: ContestPayload = serde_json::from_value(json!({
            "office": "Assessor",
            "ballotTitle": "Los Angeles County Assessor"
        }))
        .unwrap();

        let contest = Contest::from_payload(&payload).unwrap();
        assert_eq!(contest.name, "Los Angeles County Assessor");
        assert_eq!(contest.office, "Assessor");
    }

    #[test]
    fn test_missing_office_fails() {
        let payload: ContestPayload = serde_json::from_value(json!({"type": "General"})).unwrap();
        assert!(matches!(
            Contest::from_payload(&payload),
            Err(MappingError::MissingField { field: "office", .. })
        ));
    }

    #[test]
    fn test_document_keeps_candidate_order() {
        let contest = Contest {
            id: None,
            name: "myFirstContest".to_string(),
            office: "Mayor".to_string(),
            candidates: vec![3, 1, 2],
            description: "This contest is important.".to_string(),
            source: String::new(),
        };

        let doc = contest.to_document();
        assert_eq!(doc["candidates"], json!([3, 1, 2]));

        let restored = Contest::from_document(7, doc).unwrap();
        assert_eq!(restored.id, Some(7));
        assert_eq!(restored.candidates, vec![3, 1, 2]);
        assert_eq!(restored.description, "This contest is important.");
    }

    #[test]
    fn test_from_document_rejects_non_numeric_candidates() {
        let doc = json!({"name": "x", "candidates": ["a"]})
            .as_object()
            .unwrap()
            .clone();
        assert!(matches!(
            Contest::from_document(1, doc),
            Err(MappingError::Malformed { .. })
        ));
    }
}
