use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::Result;
use crate::models::certificate::StoreId;

/// Primary store: athletes, events, team standings.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Handles for the two certificate stores, passed explicitly to the
/// certificate repository instead of being imported as ambient globals.
///
/// The "athlos" store keeps snake_case document keys; the "provider" store
/// was populated by an external certificate generator and uses
/// space-containing keys such as `"Full Name"` and `"SEARCH ID 1"`.
#[derive(Debug, Clone)]
pub struct CertificateStores {
    athlos: PgPool,
    provider: PgPool,
}

impl CertificateStores {
    pub async fn new(athlos_url: &str, provider_url: &str) -> Result<Self> {
        let athlos = PgPoolOptions::new()
            .max_connections(5)
            .connect(athlos_url)
            .await?;
        let provider = PgPoolOptions::new()
            .max_connections(5)
            .connect(provider_url)
            .await?;

        Ok(Self { athlos, provider })
    }

    pub fn pool(&self, store: StoreId) -> &PgPool {
        match store {
            StoreId::Athlos => &self.athlos,
            StoreId::Provider => &self.provider,
        }
    }

    /// Both stores share the same one-table layout.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./cert_migrations").run(&self.athlos).await?;
        sqlx::migrate!("./cert_migrations").run(&self.provider).await?;
        Ok(())
    }
}
