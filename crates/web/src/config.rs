use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Primary store: athletes, events, team standings.
    pub database_url: String,
    /// Athlos certificate store. Defaults to the primary database, matching
    /// the original deployment where both lived in one project.
    pub athlos_cert_database_url: String,
    /// External certificate-provider store (the one with spaced keys).
    pub provider_cert_database_url: String,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_secs: u64,
    /// Mounts the raw-insert/dump debug routes. Never enable in production.
    pub enable_debug_routes: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Cannot load DATABASE_URL env variable")?;

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            athlos_cert_database_url: std::env::var("ATHLOS_CERT_DATABASE_URL")
                .unwrap_or_else(|_| database_url.clone()),
            provider_cert_database_url: std::env::var("PROVIDER_CERT_DATABASE_URL")
                .context("Cannot load PROVIDER_CERT_DATABASE_URL env variable")?,
            database_url,
            rate_limit_max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            rate_limit_window_secs: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            enable_debug_routes: std::env::var("ENABLE_DEBUG_ROUTES")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}
