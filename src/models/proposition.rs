//! Ballot positions and propositions.
//!
//! These records are part of the stored data model but no provider currently
//! populates them.

use serde::{Deserialize, Serialize};

use super::document::{decode_document, to_document_without, Document, MappingError};
use super::StoredEntity;

/// An office on the ballot together with the candidates running for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub candidates: Vec<i64>,
}

/// A ballot question with the candidates who endorse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub candidates: Vec<i64>,
}

impl StoredEntity for Position {
    const KIND: &'static str = "Position";

    fn to_document(&self) -> Document {
        to_document_without(self, &["id"])
    }

    fn from_document(key: i64, doc: Document) -> Result<Self, MappingError> {
        let position: Position = decode_document(Self::KIND, doc)?;
        Ok(Self {
            id: Some(key),
            ..position
        })
    }
}

impl StoredEntity for Proposition {
    const KIND: &'static str = "Proposition";

    fn to_document(&self) -> Document {
        to_document_without(self, &["id"])
    }

    fn from_document(key: i64, doc: Document) -> Result<Self, MappingError> {
        let proposition: Proposition = decode_document(Self::KIND, doc)?;
        Ok(Self {
            id: Some(key),
            ..proposition
        })
    }
}
