use axum::{Router, routing::get};

use super::handlers::{dump_certificates, insert_certificate};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/certificates", get(dump_certificates).post(insert_certificate))
}
