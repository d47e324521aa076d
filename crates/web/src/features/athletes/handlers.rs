use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::athlete::{BulkUploadResponse, DeleteAthleteResponse, RegisterAthleteRequest};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/athletes",
    responses(
        (status = 200, description = "All registered athletes", body = Vec<storage::models::Athlete>)
    ),
    tag = "athletes"
)]
pub async fn list_athletes(State(state): State<AppState>) -> Result<Response, WebError> {
    let athletes = services::list_athletes(&state.db).await?;
    Ok(Json(athletes).into_response())
}

#[utoipa::path(
    post,
    path = "/api/athletes",
    request_body = RegisterAthleteRequest,
    responses(
        (status = 201, description = "Athlete registered", body = storage::models::Athlete),
        (status = 400, description = "Validation error")
    ),
    tag = "athletes"
)]
pub async fn register_athlete(
    State(state): State<AppState>,
    Json(request): Json<RegisterAthleteRequest>,
) -> Result<Response, WebError> {
    request.validate()?;

    let athlete = services::register_athlete(&state.db, &request).await?;
    Ok((StatusCode::CREATED, Json(athlete)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/athletes/{id}/status/advance",
    params(("id" = Uuid, Path, description = "Athlete id")),
    responses(
        (status = 200, description = "Status advanced one step", body = storage::models::Athlete),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn advance_athlete_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let athlete = services::advance_status(&state.db, id).await?;
    Ok(Json(athlete).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/athletes/{id}",
    params(("id" = Uuid, Path, description = "Athlete id")),
    responses(
        (status = 200, description = "Athlete deleted, cascade count reported", body = DeleteAthleteResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn delete_athlete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let deleted_certificates = services::delete_athlete(&state.db, &state.certs, id).await?;

    Ok(Json(DeleteAthleteResponse {
        id,
        deleted_certificates,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/athletes/upload",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Rows imported", body = BulkUploadResponse),
        (status = 400, description = "Missing or unreadable file")
    ),
    tag = "athletes"
)]
pub async fn upload_athletes(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, WebError> {
    let mut file: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(format!("Invalid upload: {e}")))?
    {
        if field.name() == Some("file") || file.is_none() {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| WebError::BadRequest(format!("Invalid upload: {e}")))?;
            file = Some(bytes.to_vec());
        }
    }

    let file = file.ok_or_else(|| WebError::BadRequest("No file provided".into()))?;
    let count = services::import_athletes(&state.db, &file).await?;

    Ok(Json(BulkUploadResponse {
        count,
        message: format!("{count} athletes uploaded successfully"),
    })
    .into_response())
}
