//! Document representation shared by every stored record.
//!
//! A document is a flat JSON object. Child records are stored as their own
//! documents and referenced from the parent by store key.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Property bag persisted in the document store.
pub type Document = Map<String, Value>;

/// Failure to turn a provider payload or a stored document into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A field the record cannot exist without was absent or blank.
    #[error("{record} is missing required field `{field}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    /// A property held a value of the wrong shape.
    #[error("malformed {record}: {message}")]
    Malformed {
        record: &'static str,
        message: String,
    },
}

/// A record that lives in the document store under a kind.
pub trait StoredEntity: Sized {
    /// Document kind, used to partition the store.
    const KIND: &'static str;

    /// Flatten the record into a document. The store key is never written.
    fn to_document(&self) -> Document;

    /// Rebuild a record from the document stored under `key`.
    fn from_document(key: i64, doc: Document) -> Result<Self, MappingError>;
}

/// Serialize a record into a document, dropping the listed properties.
pub(crate) fn to_document_without<T: Serialize>(value: &T, skipped: &[&str]) -> Document {
    let mut doc = match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Document::new(),
    };
    for property in skipped {
        doc.remove(*property);
    }
    doc
}

/// Deserialize a record from a document.
pub(crate) fn decode_document<T: DeserializeOwned>(
    record: &'static str,
    doc: Document,
) -> Result<T, MappingError> {
    serde_json::from_value(Value::Object(doc)).map_err(|e| MappingError::Malformed {
        record,
        message: e.to_string(),
    })
}

/// Unwrap a required provider value, treating blank strings as absent.
pub(crate) fn require(
    record: &'static str,
    field: &'static str,
    value: Option<String>,
) -> Result<String, MappingError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(MappingError::MissingField { record, field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("Candidate", "name", Some("  ".to_string())).is_err());
        assert_eq!(
            require("Candidate", "name", None),
            Err(MappingError::MissingField {
                record: "Candidate",
                field: "name"
            })
        );
        assert_eq!(
            require("Candidate", "name", Some("Jane".to_string())).unwrap(),
            "Jane"
        );
    }

    #[test]
    fn test_to_document_without_drops_properties() {
        let doc = to_document_without(&serde_json::json!({"id": 4, "name": "x"}), &["id"]);
        assert!(!doc.contains_key("id"));
        assert_eq!(doc["name"], "x");
    }
}
