use axum::{
    Router,
    routing::{delete, get, post},
};

use super::handlers::{
    advance_athlete_status, delete_athlete, list_athletes, register_athlete, upload_athletes,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_athletes).post(register_athlete))
        .route("/upload", post(upload_athletes))
        .route("/:id", delete(delete_athlete))
        .route("/:id/status/advance", post(advance_athlete_status))
}
