use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use storage::{
    dto::certificate::CreateCertificateRequest, models::certificate::Certificate,
    repository::certificate::CertificateRepository,
};
use utoipa::ToSchema;

use crate::error::WebError;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct DebugCertificatesResponse {
    pub certificates: Vec<Certificate>,
    pub total: usize,
    pub message: String,
}

/// Raw dump of both stores, for checking what the lookup actually sees.
#[utoipa::path(
    get,
    path = "/api/debug/certificates",
    responses(
        (status = 200, description = "Every certificate in both stores", body = DebugCertificatesResponse)
    ),
    tag = "debug"
)]
pub async fn dump_certificates(State(state): State<AppState>) -> Result<Response, WebError> {
    let repo = CertificateRepository::new(&state.certs);
    let certificates = repo.list_all().await?;

    let total = certificates.len();
    let response = DebugCertificatesResponse {
        certificates,
        total,
        message: format!("{total} certificates across both stores"),
    };
    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/debug/certificates",
    request_body = CreateCertificateRequest,
    responses(
        (status = 201, description = "Document inserted as-is", body = Certificate),
        (status = 400, description = "Malformed request")
    ),
    tag = "debug"
)]
pub async fn insert_certificate(
    State(state): State<AppState>,
    Json(request): Json<CreateCertificateRequest>,
) -> Result<Response, WebError> {
    if !request.data.is_object() {
        return Err(WebError::BadRequest(
            "certificate data must be a JSON object".to_string(),
        ));
    }

    let repo = CertificateRepository::new(&state.certs);
    let certificate = repo.insert(request.store, request.data).await?;

    Ok((StatusCode::CREATED, Json(certificate)).into_response())
}
