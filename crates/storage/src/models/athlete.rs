use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    pub id: Uuid,
    pub full_name: String,
    pub university_code: String,
    /// Event reference: the id of a known event, or the raw free-text value
    /// when bulk upload could not match one.
    pub event: String,
    pub event_name: String,
    pub event_category: String,
    pub email: String,
    pub phone_number: String,
    pub sex: String,
    #[serde(rename = "group")]
    pub group_name: String,
    /// Lifecycle status as stored. Usually one of the cycle values, but the
    /// bulk upload writes `pending` and nothing rejects other values.
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
}
