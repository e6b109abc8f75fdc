//! Document store operations.
//!
//! Records are addressed by kind and numeric key. Bodies are opaque JSON to
//! SQLite; lookups by a body property scan every document of the kind.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Document, Election, StoredEntity};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== DOCUMENT OPERATIONS ====================

    /// Insert a document, or overwrite the one stored under `key`.
    /// Returns the document's key.
    pub async fn put(&self, kind: &str, key: Option<i64>, doc: &Document) -> Result<i64, AppError> {
        let body = serde_json::to_string(doc)?;
        let now = Utc::now().to_rfc3339();

        match key {
            None => {
                let result =
                    sqlx::query("INSERT INTO documents (kind, body, updated_at) VALUES (?, ?, ?)")
                        .bind(kind)
                        .bind(&body)
                        .bind(&now)
                        .execute(&self.pool)
                        .await?;
                Ok(result.last_insert_rowid())
            }
            Some(key) => {
                let result = sqlx::query(
                    "UPDATE documents SET body = ?, updated_at = ? WHERE key = ? AND kind = ?",
                )
                .bind(&body)
                .bind(&now)
                .bind(key)
                .bind(kind)
                .execute(&self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound(format!("{} {} not found", kind, key)));
                }
                Ok(key)
            }
        }
    }

    /// Get the document stored under `key`, if it exists and has this kind.
    pub async fn get(&self, kind: &str, key: i64) -> Result<Option<Document>, AppError> {
        let row = sqlx::query("SELECT body FROM documents WHERE key = ? AND kind = ?")
            .bind(key)
            .bind(kind)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(document_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// All documents of a kind, ordered by key.
    pub async fn query_all(&self, kind: &str) -> Result<Vec<(i64, Document)>, AppError> {
        let rows = sqlx::query("SELECT key, body FROM documents WHERE kind = ? ORDER BY key")
            .bind(kind)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| -> Result<(i64, Document), AppError> {
                Ok((row.get("key"), document_from_row(row)?))
            })
            .collect()
    }

    /// Delete a document.
    #[allow(dead_code)]
    pub async fn delete(&self, kind: &str, key: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE key = ? AND kind = ?")
            .bind(key)
            .bind(kind)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} {} not found", kind, key)));
        }

        Ok(())
    }

    /// Delete every document of a kind and insert `docs` in their place.
    /// Returns the new keys in input order.
    pub async fn replace_all(&self, kind: &str, docs: &[Document]) -> Result<Vec<i64>, AppError> {
        let now = Utc::now().to_rfc3339();
        let bodies = docs
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;

        // Use a transaction for atomicity
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM documents WHERE kind = ?")
            .bind(kind)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut keys = Vec::with_capacity(bodies.len());
        for body in &bodies {
            let result =
                sqlx::query("INSERT INTO documents (kind, body, updated_at) VALUES (?, ?, ?)")
                    .bind(kind)
                    .bind(body)
                    .bind(&now)
                    .execute(&mut *tx)
                    .await?;
            keys.push(result.last_insert_rowid());
        }

        tx.commit().await?;

        tracing::info!(kind, deleted, inserted = keys.len(), "Replaced documents");
        Ok(keys)
    }

    // ==================== TYPED OPERATIONS ====================

    /// Store a new record and return its key.
    pub async fn insert<T: StoredEntity>(&self, record: &T) -> Result<i64, AppError> {
        self.put(T::KIND, None, &record.to_document()).await
    }

    /// Overwrite the record stored under `key`.
    pub async fn save<T: StoredEntity>(&self, key: i64, record: &T) -> Result<(), AppError> {
        self.put(T::KIND, Some(key), &record.to_document()).await?;
        Ok(())
    }

    pub async fn load<T: StoredEntity>(&self, key: i64) -> Result<Option<T>, AppError> {
        match self.get(T::KIND, key).await? {
            Some(doc) => Ok(Some(T::from_document(key, doc)?)),
            None => Ok(None),
        }
    }

    pub async fn load_all<T: StoredEntity>(&self) -> Result<Vec<T>, AppError> {
        self.query_all(T::KIND)
            .await?
            .into_iter()
            .map(|(key, doc)| T::from_document(key, doc).map_err(AppError::from))
            .collect()
    }

    /// Find an election by its provider-assigned ID.
    pub async fn find_election(&self, election_id: &str) -> Result<Option<Election>, AppError> {
        for (key, doc) in self.query_all(Election::KIND).await? {
            if doc.get("id").and_then(|id| id.as_str()) == Some(election_id) {
                return Ok(Some(Election::from_document(key, doc)?));
            }
        }
        Ok(None)
    }
}

// ==================== HELPER FUNCTIONS ====================

fn document_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Document, AppError> {
    let body: String = row.get("body");
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use crate::models::Contest;
    use serde_json::json;
    use tempfile::TempDir;

    async fn test_repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .unwrap();
        (Repository::new(pool), temp_dir)
    }

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().unwrap().clone()
    }

    fn election(id: &str) -> Election {
        Election {
            key: None,
            id: id.to_string(),
            name: format!("Election {id}"),
            scope: "ocd-division/country:us".to_string(),
            date: "2020-11-03".to_string(),
            contests: Vec::new(),
            referendums: Vec::new(),
            polling_stations: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_put_get_overwrite() {
        let (repo, _dir) = test_repo().await;

        let key = repo.put("Thing", None, &doc(json!({"a": 1}))).await.unwrap();
        assert_eq!(repo.get("Thing", key).await.unwrap(), Some(doc(json!({"a": 1}))));

        let same = repo
            .put("Thing", Some(key), &doc(json!({"a": 2})))
            .await
            .unwrap();
        assert_eq!(same, key);
        assert_eq!(repo.get("Thing", key).await.unwrap(), Some(doc(json!({"a": 2}))));
    }

    #[tokio::test]
    async fn test_get_checks_kind() {
        let (repo, _dir) = test_repo().await;

        let key = repo.put("Thing", None, &doc(json!({}))).await.unwrap();
        assert_eq!(repo.get("Other", key).await.unwrap(), None);
        assert!(matches!(
            repo.put("Other", Some(key), &doc(json!({}))).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_query_all_in_key_order() {
        let (repo, _dir) = test_repo().await;

        let first = repo.put("Thing", None, &doc(json!({"n": 1}))).await.unwrap();
        repo.put("Other", None, &doc(json!({"n": 0}))).await.unwrap();
        let second = repo.put("Thing", None, &doc(json!({"n": 2}))).await.unwrap();

        let all = repo.query_all("Thing").await.unwrap();
        let keys: Vec<i64> = all.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![first, second]);
        assert_eq!(all[1].1["n"], 2);
    }

    #[tokio::test]
    async fn test_delete() {
        let (repo, _dir) = test_repo().await;

        let key = repo.put("Thing", None, &doc(json!({}))).await.unwrap();
        repo.delete("Thing", key).await.unwrap();
        assert_eq!(repo.get("Thing", key).await.unwrap(), None);

        let result = repo.delete("Thing", key).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_replace_all_leaves_other_kinds() {
        let (repo, _dir) = test_repo().await;

        let old = repo.insert(&election("1")).await.unwrap();
        let contest = repo.put("Contest", None, &doc(json!({"name": "c"}))).await.unwrap();

        let docs = vec![election("2").to_document(), election("3").to_document()];
        let keys = repo.replace_all(Election::KIND, &docs).await.unwrap();
        assert_eq!(keys.len(), 2);

        let elections: Vec<Election> = repo.load_all().await.unwrap();
        let ids: Vec<&str> = elections.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert_eq!(elections[0].key, Some(keys[0]));

        assert!(repo.get(Election::KIND, old).await.unwrap().is_none());
        assert!(repo.get("Contest", contest).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_election_by_id() {
        let (repo, _dir) = test_repo().await;

        repo.insert(&election("2000")).await.unwrap();
        let key = repo.insert(&election("9999")).await.unwrap();

        let found = repo.find_election("9999").await.unwrap().unwrap();
        assert_eq!(found.key, Some(key));
        assert_eq!(found.name, "Election 9999");

        assert!(repo.find_election("1234").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_typed_save_and_load() {
        let (repo, _dir) = test_repo().await;

        let contest = Contest {
            id: None,
            name: "Governor".to_string(),
            office: "Governor".to_string(),
            candidates: vec![1, 2, 3],
            description: String::new(),
            source: String::new(),
        };
        let key = repo.insert(&contest).await.unwrap();

        let loaded: Contest = repo.load(key).await.unwrap().unwrap();
        assert_eq!(loaded.id, Some(key));
        assert_eq!(loaded.candidates, vec![1, 2, 3]);

        repo.save(key, &contest.with_candidates(vec![4])).await.unwrap();
        let loaded: Contest = repo.load(key).await.unwrap().unwrap();
        assert_eq!(loaded.candidates, vec![4]);
    }
}
