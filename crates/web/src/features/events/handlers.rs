use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use storage::dto::event::{
    AddWinnerRequest, CreateEventRequest, EventResponse, RemoveWinnerRequest, UpdateEventRequest,
};
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[derive(Debug, Deserialize, IntoParams)]
pub struct EventListQuery {
    /// Filter by lifecycle status, e.g. `completed` for the winners page.
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/events",
    params(EventListQuery),
    responses(
        (status = 200, description = "Events, winners sorted by position", body = Vec<EventResponse>)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Response, WebError> {
    let events = services::list_events(&state.db, query.status.as_deref()).await?;

    let response: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created with status upcoming", body = EventResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Response, WebError> {
    request.validate()?;

    let event = services::create_event(&state.db, &request).await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event id")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Response, WebError> {
    request.validate()?;

    let event = services::update_event(&state.db, id, &request).await?;
    Ok(Json(EventResponse::from(event)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event id")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_event(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{id}/status/advance",
    params(("id" = Uuid, Path, description = "Event id")),
    responses(
        (status = 200, description = "Status advanced one step, wrapping", body = EventResponse),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn advance_event_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let event = services::advance_status(&state.db, id).await?;
    Ok(Json(EventResponse::from(event)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{id}/winners",
    params(("id" = Uuid, Path, description = "Event id")),
    request_body = AddWinnerRequest,
    responses(
        (status = 200, description = "Winner appended", body = EventResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn add_winner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddWinnerRequest>,
) -> Result<Response, WebError> {
    request.validate()?;

    let event = services::add_winner(&state.db, id, request.into_winner()).await?;
    Ok(Json(EventResponse::from(event)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}/winners",
    params(("id" = Uuid, Path, description = "Event id")),
    request_body = RemoveWinnerRequest,
    responses(
        (status = 200, description = "Matching winners removed", body = EventResponse),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn remove_winner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RemoveWinnerRequest>,
) -> Result<Response, WebError> {
    let event =
        services::remove_winner(&state.db, id, &request.name, request.position).await?;
    Ok(Json(EventResponse::from(event)).into_response())
}
