//! Referendum record: a ballot measure, not tied to any office.

use serde::{Deserialize, Serialize};

use super::document::{decode_document, require, to_document_without, Document, MappingError};
use super::{join_source_names, StoredEntity};
use crate::clients::civic::ContestPayload;

/// `type` value the Civic API uses for ballot measures.
pub const REFERENDUM_CONTEST_TYPE: &str = "Referendum";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referendum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
    /// OCD division the measure applies to.
    #[serde(default)]
    pub division: String,
}

impl Referendum {
    pub fn is_referendum(payload: &ContestPayload) -> bool {
        payload.kind.as_deref() == Some(REFERENDUM_CONTEST_TYPE)
    }

    pub fn from_payload(payload: &ContestPayload) -> Result<Self, MappingError> {
        Ok(Self {
            id: None,
            title: require("Referendum", "referendumTitle", payload.referendum_title.clone())?,
            description: payload.referendum_subtitle.clone().unwrap_or_default(),
            source: join_source_names(&payload.sources),
            url: payload.referendum_url.clone().unwrap_or_default(),
            division: payload
                .district
                .as_ref()
                .and_then(|d| d.id.clone())
                .unwrap_or_default(),
        })
    }
}

impl StoredEntity for Referendum {
    const KIND: &'static str = "Referendum";

    fn to_document(&self) -> Document {
        to_document_without(self, &["id"])
    }

    fn from_document(key: i64, doc: Document) -> Result<Self, MappingError> {
        let referendum: Referendum = decode_document(Self::KIND, doc)?;
        Ok(Self {
            id: Some(key),
            ..referendum
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> ContestPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_payload_all_fields() {
        let p = payload(json!({
            "type": "Referendum",
            "referendumTitle": "Proposition 15",
            "referendumSubtitle": "Increases funding for schools",
            "referendumUrl": "https://example.org/prop15",
            "sources": [{"name": "Voter Information Project"}, {"name": "Ballotpedia"}],
            "district": {"name": "California", "id": "ocd-division/country:us/state:ca"}
        }));
        assert!(Referendum::is_referendum(&p));

        let referendum = Referendum::from_payload(&p).unwrap();
        assert_eq!(referendum.title, "Proposition 15");
        assert_eq!(referendum.description, "Increases funding for schools");
        assert_eq!(referendum.url, "https://example.org/prop15");
        assert_eq!(referendum.source, "Voter Information Project, Ballotpedia");
        assert_eq!(referendum.division, "ocd-division/country:us/state:ca");
    }

    #[test]
    fn test_optional_fields_default_empty() {
        let referendum = Referendum::from_payload(&payload(json!({
            "type": "Referendum",
            "referendumTitle": "Measure A"
        })))
        .unwrap();
        assert_eq!(referendum.description, "");
        assert_eq!(referendum.source, "");
        assert_eq!(referendum.url, "");
        assert_eq!(referendum.division, "");
    }

    #[test]
    fn test_missing_title_fails() {
        let err = Referendum::from_payload(&payload(json!({"type": "Referendum"}))).unwrap_err();
        assert!(matches!(
            err,
            MappingError::MissingField {
                field: "referendumTitle",
                ..
            }
        ));
    }

    #[test]
    fn test_office_contest_is_not_referendum() {
        assert!(!Referendum::is_referendum(&payload(json!({"type": "General"}))));
        assert!(!Referendum::is_referendum(&payload(json!({}))));
    }

    #[test]
    fn test_document_round_trip() {
        let referendum = Referendum {
            id: None,
            title: "myFirstReferendum".to_string(),
            description: "This is a referendum.".to_string(),
            source: "Voter Information Project".to_string(),
            url: "testUrl".to_string(),
            division: String::new(),
        };
        let restored = Referendum::from_document(5, referendum.to_document()).unwrap();
        assert_eq!(
            restored,
            Referendum {
                id: Some(5),
                ..referendum
            }
        );
    }
}
