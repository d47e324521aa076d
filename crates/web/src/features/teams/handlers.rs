use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::dto::team::{TeamResponse, UpdateTeamRequest};
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/teams",
    responses(
        (status = 200, description = "Team standings, highest points first", body = Vec<TeamResponse>)
    ),
    tag = "teams"
)]
pub async fn list_teams(State(state): State<AppState>) -> Result<Response, WebError> {
    let teams = services::list_teams(&state.db).await?;

    let response: Vec<TeamResponse> = teams.into_iter().map(TeamResponse::from).collect();
    Ok(Json(response).into_response())
}

#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    params(("id" = Uuid, Path, description = "Team id")),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Standing overwritten", body = TeamResponse),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTeamRequest>,
) -> Result<Response, WebError> {
    let team = services::update_team(&state.db, id, &request).await?;
    Ok(Json(TeamResponse::from(team)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams/init",
    responses(
        (status = 200, description = "Default teams created or reset to zero", body = Vec<TeamResponse>)
    ),
    tag = "teams"
)]
pub async fn init_default_teams(State(state): State<AppState>) -> Result<Response, WebError> {
    let teams = services::init_default_teams(&state.db).await?;

    let response: Vec<TeamResponse> = teams.into_iter().map(TeamResponse::from).collect();
    Ok(Json(response).into_response())
}
