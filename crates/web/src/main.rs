use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use storage::{CertificateStores, Database};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use middleware::rate_limit::RateLimiter;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::certificates::handlers::search_certificates,
        features::certificates::handlers::search_certificates_by_body,
        features::certificates::handlers::list_certificates,
        features::certificates::handlers::archive_certificates,
        features::certificates::handlers::delete_certificate,
        features::athletes::handlers::list_athletes,
        features::athletes::handlers::register_athlete,
        features::athletes::handlers::advance_athlete_status,
        features::athletes::handlers::delete_athlete,
        features::athletes::handlers::upload_athletes,
        features::events::handlers::list_events,
        features::events::handlers::create_event,
        features::events::handlers::update_event,
        features::events::handlers::delete_event,
        features::events::handlers::advance_event_status,
        features::events::handlers::add_winner,
        features::events::handlers::remove_winner,
        features::teams::handlers::list_teams,
        features::teams::handlers::update_team,
        features::teams::handlers::init_default_teams,
        features::debug::handlers::dump_certificates,
        features::debug::handlers::insert_certificate,
    ),
    components(
        schemas(
            storage::dto::certificate::CertificateSearchBody,
            storage::dto::certificate::CreateCertificateRequest,
            storage::dto::certificate::CertificatesResponse,
            storage::dto::athlete::RegisterAthleteRequest,
            storage::dto::athlete::DeleteAthleteResponse,
            storage::dto::athlete::BulkUploadResponse,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::event::AddWinnerRequest,
            storage::dto::event::RemoveWinnerRequest,
            storage::dto::event::EventResponse,
            storage::dto::team::Medals,
            storage::dto::team::UpdateTeamRequest,
            storage::dto::team::TeamResponse,
            features::debug::handlers::DebugCertificatesResponse,
            storage::models::Athlete,
            storage::models::Event,
            storage::models::Winner,
            storage::models::Certificate,
            storage::models::StoreId,
        )
    ),
    tags(
        (name = "certificates", description = "Public certificate lookup and download"),
        (name = "athletes", description = "Athlete registration and admin endpoints"),
        (name = "events", description = "Event management endpoints"),
        (name = "teams", description = "Team standings endpoints"),
        (name = "debug", description = "Raw store access, disabled by default"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Athlos portal API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize primary database")?;
    db.run_migrations()
        .await
        .context("Failed to run primary migrations")?;
    tracing::info!("Primary database ready");

    let certs = CertificateStores::new(
        &config.athlos_cert_database_url,
        &config.provider_cert_database_url,
    )
    .await
    .context("Failed to initialize certificate stores")?;
    certs
        .run_migrations()
        .await
        .context("Failed to run certificate store migrations")?;
    tracing::info!("Certificate stores ready");

    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit_max_requests,
        Duration::from_secs(config.rate_limit_window_secs),
    ));

    let state = AppState {
        db,
        certs,
        http: reqwest::Client::new(),
        limiter: limiter.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut api = Router::new()
        .nest("/certificates", features::certificates::routes::routes(limiter))
        .nest("/athletes", features::athletes::routes::routes())
        .nest("/events", features::events::routes::routes())
        .nest("/teams", features::teams::routes::routes());

    if config.enable_debug_routes {
        tracing::warn!("Debug routes enabled, raw store access is exposed");
        api = api.nest("/debug", features::debug::routes::routes());
    }

    let app = Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app)
        .await
        .context("Server crashed")?;

    Ok(())
}
