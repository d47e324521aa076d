use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use storage::{
    dto::certificate::{CertificateQuery, CertificateSearchBody, CertificatesResponse},
    models::certificate::{Certificate, StoreId},
};

use crate::error::WebError;
use crate::state::AppState;

use super::{archive, services};

#[utoipa::path(
    get,
    path = "/api/certificates",
    params(CertificateQuery),
    responses(
        (status = 200, description = "Matching certificates, normalized", body = CertificatesResponse),
        (status = 400, description = "Neither search term nor id given"),
        (status = 404, description = "No certificates found"),
        (status = 429, description = "Rate limit exceeded, Retry-After set")
    ),
    tag = "certificates"
)]
pub async fn search_certificates(
    State(state): State<AppState>,
    Query(params): Query<CertificateQuery>,
) -> Result<Response, WebError> {
    let certificates = match (params.university_code, params.id) {
        (Some(term), _) if !term.is_empty() => {
            tracing::debug!(%term, "searching certificates by term");
            services::search_by_term(&state.certs, &term).await?
        }
        (_, Some(id)) if !id.is_empty() => services::fetch_by_id(&state.certs, &id)
            .await?
            .into_iter()
            .collect(),
        _ => {
            return Err(WebError::BadRequest(
                "University code or certificate ID is required".into(),
            ));
        }
    };

    respond_with_results(certificates)
}

#[utoipa::path(
    post,
    path = "/api/certificates",
    request_body = CertificateSearchBody,
    responses(
        (status = 200, description = "Matching certificates, normalized", body = CertificatesResponse),
        (status = 400, description = "Missing search term"),
        (status = 404, description = "No certificates found"),
        (status = 429, description = "Rate limit exceeded, Retry-After set")
    ),
    tag = "certificates"
)]
pub async fn search_certificates_by_body(
    State(state): State<AppState>,
    Json(body): Json<CertificateSearchBody>,
) -> Result<Response, WebError> {
    if body.university_code.is_empty() {
        return Err(WebError::BadRequest("University code is required".into()));
    }

    let certificates = services::search_by_term(&state.certs, &body.university_code).await?;
    respond_with_results(certificates)
}

fn respond_with_results(certificates: Vec<Certificate>) -> Result<Response, WebError> {
    if certificates.is_empty() {
        return Err(WebError::NotFound(
            "No certificates found for this university code.".into(),
        ));
    }

    Ok(Json(CertificatesResponse { certificates }).into_response())
}

#[utoipa::path(
    get,
    path = "/api/certificates/all",
    responses(
        (status = 200, description = "Every certificate from both stores", body = CertificatesResponse)
    ),
    tag = "certificates"
)]
pub async fn list_certificates(State(state): State<AppState>) -> Result<Response, WebError> {
    let certificates = services::list_all(&state.certs).await?;
    Ok(Json(CertificatesResponse { certificates }).into_response())
}

#[utoipa::path(
    post,
    path = "/api/certificates/archive",
    request_body = CertificateSearchBody,
    responses(
        (status = 200, description = "Zip archive of every downloadable certificate",
         content_type = "application/zip"),
        (status = 404, description = "No certificates found")
    ),
    tag = "certificates"
)]
pub async fn archive_certificates(
    State(state): State<AppState>,
    Json(body): Json<CertificateSearchBody>,
) -> Result<Response, WebError> {
    if body.university_code.is_empty() {
        return Err(WebError::BadRequest("University code is required".into()));
    }

    let certificates = services::search_by_term(&state.certs, &body.university_code).await?;
    if certificates.is_empty() {
        return Err(WebError::NotFound(
            "No certificates found for this university code.".into(),
        ));
    }

    let requester = certificates[0].name.clone();
    let (bytes, report) = archive::build_archive(&state.http, &certificates).await?;

    tracing::info!(
        requester = %requester,
        archived = report.archived,
        skipped = report.skipped.len(),
        "built certificate archive"
    );

    let file_name = format!("{}_certificates.zip", sanitize_file_name(&requester));
    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
        (
            header::HeaderName::from_static("x-archive-skipped"),
            report.skipped.len().to_string(),
        ),
    ];

    Ok((headers, bytes).into_response())
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "certificates".to_string()
    } else {
        cleaned
    }
}

#[utoipa::path(
    delete,
    path = "/api/certificates/{store}/{id}",
    params(
        ("store" = String, Path, description = "Certificate store: athlos or provider"),
        ("id" = String, Path, description = "Document id")
    ),
    responses(
        (status = 204, description = "Certificate deleted"),
        (status = 400, description = "Unknown store"),
        (status = 404, description = "Certificate not found")
    ),
    tag = "certificates"
)]
pub async fn delete_certificate(
    State(state): State<AppState>,
    Path((store, id)): Path<(String, String)>,
) -> Result<Response, WebError> {
    let store: StoreId = store.parse().map_err(WebError::BadRequest)?;

    services::delete_certificate(&state.certs, store, &id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name_keeps_alphanumerics() {
        assert_eq!(sanitize_file_name("Asha Nair"), "Asha_Nair");
        assert_eq!(sanitize_file_name("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_file_name(""), "certificates");
    }

    #[test]
    fn test_empty_search_result_maps_to_not_found() {
        match respond_with_results(Vec::new()) {
            Err(WebError::NotFound(msg)) => assert!(msg.contains("No certificates found")),
            other => panic!("expected not-found, got {other:?}"),
        }
    }

    #[test]
    fn test_non_empty_search_result_is_ok() {
        let cert = Certificate {
            id: "doc-1".into(),
            store: StoreId::Athlos,
            name: "Asha Nair".into(),
            event_name: "100m".into(),
            certificate_id: "C1".into(),
            university_code: Some("PRP24CS001".into()),
            email: None,
            phone: None,
            download_url: None,
            file_name: None,
            file_format: None,
            certificate_base64: None,
        };
        assert!(respond_with_results(vec![cert]).is_ok());
    }
}
