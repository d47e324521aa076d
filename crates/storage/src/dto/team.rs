use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::team::TeamStanding;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Medals {
    pub gold: i32,
    pub silver: i32,
    pub bronze: i32,
}

/// Full overwrite of a standing row. No audit trail, no derivation from
/// results, and negative values are not rejected.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    pub sector: Option<String>,
    pub points: i32,
    pub medals: Medals,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub sector: String,
    pub points: i32,
    pub medals: Medals,
}

impl From<TeamStanding> for TeamResponse {
    fn from(team: TeamStanding) -> Self {
        Self {
            id: team.id,
            name: team.name,
            sector: team.sector,
            points: team.points,
            medals: Medals {
                gold: team.gold,
                silver: team.silver,
                bronze: team.bronze,
            },
        }
    }
}
