use storage::{
    CertificateStores,
    error::Result,
    models::certificate::{Certificate, StoreId},
    repository::certificate::CertificateRepository,
};

/// Search by free-text term across every (store, field) pair.
pub async fn search_by_term(stores: &CertificateStores, term: &str) -> Result<Vec<Certificate>> {
    let repo = CertificateRepository::new(stores);
    repo.search_by_term(term).await
}

/// Exact fetch by document id, athlos store first.
pub async fn fetch_by_id(stores: &CertificateStores, id: &str) -> Result<Option<Certificate>> {
    let repo = CertificateRepository::new(stores);
    repo.fetch_by_id(id).await
}

/// Admin view over both stores.
pub async fn list_all(stores: &CertificateStores) -> Result<Vec<Certificate>> {
    let repo = CertificateRepository::new(stores);
    repo.list_all().await
}

pub async fn delete_certificate(stores: &CertificateStores, store: StoreId, id: &str) -> Result<()> {
    let repo = CertificateRepository::new(stores);
    repo.delete_by_id(store, id).await
}
