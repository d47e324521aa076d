use std::sync::Arc;

use storage::{CertificateStores, Database};

use crate::middleware::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub certs: CertificateStores,
    /// Shared client for fetching stored certificate binaries.
    pub http: reqwest::Client,
    pub limiter: Arc<RateLimiter>,
}
