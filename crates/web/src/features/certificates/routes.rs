use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use super::handlers::{
    archive_certificates, delete_certificate, list_certificates, search_certificates,
    search_certificates_by_body,
};
use crate::middleware::rate_limit::{self, RateLimiter};
use crate::state::AppState;

pub fn routes(limiter: Arc<RateLimiter>) -> Router<AppState> {
    // Only the public search is rate limited; admin listing, archive
    // building, and deletes are not.
    let search = Router::new()
        .route(
            "/",
            get(search_certificates).post(search_certificates_by_body),
        )
        .route_layer(middleware::from_fn_with_state(
            limiter,
            rate_limit::enforce,
        ));

    Router::new()
        .route("/all", get(list_certificates))
        .route("/archive", post(archive_certificates))
        .route("/:store/:id", delete(delete_certificate))
        .merge(search)
}
