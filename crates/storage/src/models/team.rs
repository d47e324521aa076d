use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A team standing row. Fully admin-overwritten: points and medal counts are
/// not derived from results and nothing prevents negative values.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub id: Uuid,
    pub name: String,
    pub sector: String,
    pub points: i32,
    pub gold: i32,
    pub silver: i32,
    pub bronze: i32,
    pub updated_at: chrono::NaiveDateTime,
}

/// Teams seeded by the standings "initialize" action.
pub const DEFAULT_TEAMS: [&str; 4] = ["AGNI", "VAJRA", "RUDRA", "ASTRA"];
