use std::collections::HashSet;

use futures::future::join_all;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::certificate::{Certificate, CertificateIdentity, StoreId};
use crate::services::normalize::{normalize, search_keys};
use crate::stores::CertificateStores;

#[derive(Debug, FromRow)]
struct CertificateRow {
    id: String,
    data: sqlx::types::Json<Value>,
}

impl CertificateRow {
    fn into_certificate(self, store: StoreId) -> Certificate {
        normalize(store, self.id, &self.data.0)
    }
}

/// Certificate lookup façade over both stores.
///
/// All reads normalize into the canonical [`Certificate`] shape; writes take
/// raw documents so the stores stay schemaless.
pub struct CertificateRepository<'a> {
    stores: &'a CertificateStores,
}

impl<'a> CertificateRepository<'a> {
    pub fn new(stores: &'a CertificateStores) -> Self {
        Self { stores }
    }

    async fn query_field(&self, store: StoreId, key: &str, term: &str) -> Result<Vec<Certificate>> {
        let rows: Vec<CertificateRow> =
            sqlx::query_as("SELECT id, data FROM certificates WHERE data->>$1 = $2")
                .bind(key)
                .bind(term)
                .fetch_all(self.stores.pool(store))
                .await?;

        Ok(rows
            .into_iter()
            .map(|row| row.into_certificate(store))
            .collect())
    }

    /// Search every (store, field) pair concurrently and merge the results.
    ///
    /// A failed sub-query degrades to partial results instead of failing the
    /// whole search. An empty result is the not-found outcome, not an error.
    pub async fn search_by_term(&self, term: &str) -> Result<Vec<Certificate>> {
        let mut queries = Vec::new();
        for store in StoreId::ALL {
            for key in search_keys(store) {
                queries.push(self.query_field(store, key, term));
            }
        }

        let mut batches = Vec::new();
        for outcome in join_all(queries).await {
            match outcome {
                Ok(batch) => batches.push(batch),
                Err(err) => {
                    tracing::warn!("certificate sub-query failed, degrading to partial results: {err}");
                }
            }
        }

        Ok(dedup_certificates(batches.into_iter().flatten()))
    }

    /// Fetch by document id: athlos first, then provider. First hit wins.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Option<Certificate>> {
        for store in StoreId::ALL {
            let row: Option<CertificateRow> =
                sqlx::query_as("SELECT id, data FROM certificates WHERE id = $1")
                    .bind(id)
                    .fetch_optional(self.stores.pool(store))
                    .await?;

            if let Some(row) = row {
                return Ok(Some(row.into_certificate(store)));
            }
        }
        Ok(None)
    }

    /// Delete every certificate matching any of the athlete's search terms,
    /// across both stores. Best-effort and not transactional: individual
    /// failures are logged and skipped, and the count of deleted documents
    /// is returned.
    pub async fn delete_by_athlete(&self, identity: &CertificateIdentity) -> Result<u64> {
        let mut batches = Vec::new();
        for term in identity.terms() {
            batches.push(self.search_by_term(term).await?);
        }

        let mut deleted = 0u64;
        for (store, id) in delete_targets(batches) {
            match self.delete_document(store, &id).await {
                Ok(true) => deleted += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(
                        store = %store,
                        id = %id,
                        "failed to delete certificate, continuing: {err}"
                    );
                }
            }
        }

        Ok(deleted)
    }

    /// All certificates from both stores, normalized (admin view).
    pub async fn list_all(&self) -> Result<Vec<Certificate>> {
        let mut certificates = Vec::new();
        for store in StoreId::ALL {
            let rows: Vec<CertificateRow> =
                sqlx::query_as("SELECT id, data FROM certificates ORDER BY created_at")
                    .fetch_all(self.stores.pool(store))
                    .await?;
            certificates.extend(rows.into_iter().map(|row| row.into_certificate(store)));
        }
        Ok(certificates)
    }

    /// Insert a raw document and return its generated id.
    pub async fn insert(&self, store: StoreId, document: Value) -> Result<Certificate> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO certificates (id, data) VALUES ($1, $2)")
            .bind(&id)
            .bind(sqlx::types::Json(&document))
            .execute(self.stores.pool(store))
            .await?;

        Ok(normalize(store, id, &document))
    }

    pub async fn delete_by_id(&self, store: StoreId, id: &str) -> Result<()> {
        if self.delete_document(store, id).await? {
            Ok(())
        } else {
            Err(StorageError::NotFound)
        }
    }

    async fn delete_document(&self, store: StoreId, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM certificates WHERE id = $1")
            .bind(id)
            .execute(self.stores.pool(store))
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Distinct `(store, id)` pairs across per-term search batches. The same
/// document typically matches more than one identity term (university code
/// and email), and must be deleted exactly once.
fn delete_targets(batches: Vec<Vec<Certificate>>) -> Vec<(StoreId, String)> {
    let mut seen: HashSet<(StoreId, String)> = HashSet::new();
    let mut targets = Vec::new();
    for cert in batches.into_iter().flatten() {
        let target = (cert.store, cert.id);
        if seen.insert(target.clone()) {
            targets.push(target);
        }
    }
    targets
}

/// Merge normalized results in insertion order, keeping the first occurrence
/// of each `(store, id)`. Re-applying the merge is idempotent.
fn dedup_certificates(certificates: impl IntoIterator<Item = Certificate>) -> Vec<Certificate> {
    let mut seen: HashSet<(StoreId, String)> = HashSet::new();
    let mut distinct = Vec::new();
    for cert in certificates {
        if seen.insert((cert.store, cert.id.clone())) {
            distinct.push(cert);
        }
    }
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cert(store: StoreId, id: &str) -> Certificate {
        normalize(store, id.to_string(), &json!({ "name": id }))
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_per_store_and_id() {
        // Same document matched under two different search fields.
        let merged = dedup_certificates(vec![
            cert(StoreId::Provider, "doc-1"),
            cert(StoreId::Athlos, "doc-1"),
            cert(StoreId::Provider, "doc-1"),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].store, StoreId::Provider);
        assert_eq!(merged[1].store, StoreId::Athlos);
    }

    #[test]
    fn test_dedup_preserves_insertion_order() {
        let merged = dedup_certificates(vec![
            cert(StoreId::Athlos, "b"),
            cert(StoreId::Athlos, "a"),
            cert(StoreId::Athlos, "b"),
        ]);

        let ids: Vec<&str> = merged.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_delete_targets_count_two_certificates_across_stores() {
        // One athlete, certificates in both stores, matched once by
        // university code and again by email: two deletions, not four.
        let by_code = vec![cert(StoreId::Athlos, "doc-1"), cert(StoreId::Provider, "doc-2")];
        let by_email = vec![cert(StoreId::Athlos, "doc-1"), cert(StoreId::Provider, "doc-2")];

        let targets = delete_targets(vec![by_code, by_email]);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0], (StoreId::Athlos, "doc-1".to_string()));
        assert_eq!(targets[1], (StoreId::Provider, "doc-2".to_string()));
    }

    #[test]
    fn test_delete_targets_same_id_in_both_stores_is_two_documents() {
        let targets = delete_targets(vec![vec![
            cert(StoreId::Athlos, "doc-1"),
            cert(StoreId::Provider, "doc-1"),
        ]]);
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let once = dedup_certificates(vec![
            cert(StoreId::Athlos, "a"),
            cert(StoreId::Provider, "a"),
        ]);
        let twice = dedup_certificates(once.clone());
        assert_eq!(once.len(), twice.len());
    }
}
