use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers::{init_default_teams, list_teams, update_team};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teams))
        .route("/init", post(init_default_teams))
        .route("/:id", put(update_team))
}
