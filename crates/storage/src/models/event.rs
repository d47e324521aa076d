use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub event_code: String,
    pub max_participants: i32,
    pub status: String,
    /// Embedded winner list. Append order is preserved on write; ordering by
    /// podium position happens at response time.
    #[schema(value_type = Vec<Winner>)]
    pub winners: sqlx::types::Json<Vec<Winner>>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub name: String,
    pub group: String,
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_code: Option<String>,
}
