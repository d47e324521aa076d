use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Registration payload. The event reference is free text on purpose:
/// registration sends a known event id, bulk upload may not.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAthleteRequest {
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,

    #[validate(length(min = 1, max = 64, message = "University code is required"))]
    pub university_code: String,

    #[validate(length(min = 1, max = 255, message = "Event is required"))]
    pub event: String,

    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, max = 32, message = "Phone number is required"))]
    pub phone_number: String,

    #[validate(length(min = 1, max = 16, message = "Sex is required"))]
    pub sex: String,

    #[serde(default, rename = "group")]
    pub group_name: Option<String>,
}

/// One athlete record parsed from a bulk-upload spreadsheet row, after
/// best-effort event matching.
#[derive(Debug, Clone)]
pub struct AthleteImportRow {
    pub full_name: String,
    pub university_code: String,
    pub event: String,
    pub event_name: String,
    pub event_category: String,
    pub email: String,
    pub phone_number: String,
    pub sex: String,
    pub group_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAthleteResponse {
    pub id: Uuid,
    /// Certificates removed by the best-effort cascade, across both stores.
    pub deleted_certificates: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkUploadResponse {
    pub count: usize,
    pub message: String,
}
