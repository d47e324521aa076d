use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::event::{Event, Winner};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 255, message = "Event name is required"))]
    pub name: String,

    #[validate(length(max = 255))]
    pub category: String,

    #[validate(length(max = 64))]
    pub event_code: String,

    #[serde(default = "default_max_participants")]
    pub max_participants: i32,
}

fn default_max_participants() -> i32 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 255))]
    pub category: Option<String>,

    #[validate(length(max = 64))]
    pub event_code: Option<String>,

    pub max_participants: Option<i32>,
}

/// Duplicate winners and arbitrary positions are accepted; the store does
/// not enforce podium invariants.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWinnerRequest {
    #[validate(length(min = 1, max = 255, message = "Winner name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "Group is required"))]
    pub group: String,

    pub position: i32,

    pub university_code: Option<String>,
}

impl AddWinnerRequest {
    pub fn into_winner(self) -> Winner {
        Winner {
            name: self.name,
            group: self.group,
            position: self.position,
            university_code: self.university_code.filter(|code| !code.is_empty()),
        }
    }
}

/// Winners are identified by (name, position) for removal. Every matching
/// entry is removed.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveWinnerRequest {
    pub name: String,
    pub position: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub event_code: String,
    pub max_participants: i32,
    pub status: String,
    /// Sorted by podium position for rendering; stored order is append order.
    pub winners: Vec<Winner>,
    pub created_at: chrono::NaiveDateTime,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        let mut winners = event.winners.0;
        winners.sort_by_key(|w| w.position);
        Self {
            id: event.id,
            name: event.name,
            category: event.category,
            event_code: event.event_code,
            max_participants: event.max_participants,
            status: event.status,
            winners,
            created_at: event.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn winner(name: &str, position: i32) -> Winner {
        Winner {
            name: name.into(),
            group: "AGNI".into(),
            position,
            university_code: None,
        }
    }

    #[test]
    fn test_response_sorts_winners_by_position() {
        let event = Event {
            id: Uuid::new_v4(),
            name: "100m".into(),
            category: "Track".into(),
            event_code: "T01".into(),
            max_participants: 100,
            status: "completed".into(),
            winners: sqlx::types::Json(vec![
                winner("bronze", 3),
                winner("gold", 1),
                winner("silver", 2),
            ]),
            created_at: chrono::NaiveDateTime::default(),
        };

        let response = EventResponse::from(event);
        let order: Vec<i32> = response.winners.iter().map(|w| w.position).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }
}
