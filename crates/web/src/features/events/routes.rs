use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers::{
    add_winner, advance_event_status, create_event, delete_event, list_events, remove_winner,
    update_event,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", put(update_event).delete(delete_event))
        .route("/:id/status/advance", post(advance_event_status))
        .route("/:id/winners", post(add_winner).delete(remove_winner))
}
