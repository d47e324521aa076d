use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::event::{CreateEventRequest, UpdateEventRequest};
use crate::error::{Result, StorageError};
use crate::models::event::{Event, Winner};
use crate::models::status::LifecycleStatus;

const EVENT_COLUMNS: &str =
    "id, name, category, event_code, max_participants, status, winners, created_at";

pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Event>> {
        let events = match status {
            Some(status) => {
                sqlx::query_as(&format!(
                    "SELECT {EVENT_COLUMNS} FROM events WHERE status = $1 ORDER BY created_at"
                ))
                .bind(status)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(events)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        let event = sqlx::query_as(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    pub async fn create(&self, request: &CreateEventRequest) -> Result<Event> {
        let event = sqlx::query_as(&format!(
            "INSERT INTO events (name, category, event_code, max_participants, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&request.name)
        .bind(&request.category)
        .bind(&request.event_code)
        .bind(request.max_participants)
        .bind(LifecycleStatus::Upcoming.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(event)
    }

    /// Partial field update, last-write-wins. Winners are untouched here.
    pub async fn update(&self, id: Uuid, request: &UpdateEventRequest) -> Result<Event> {
        let existing = self.find_by_id(id).await?;

        let event = sqlx::query_as(&format!(
            "UPDATE events \
             SET name = $2, category = $3, event_code = $4, max_participants = $5 \
             WHERE id = $1 \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(request.name.as_deref().unwrap_or(&existing.name))
        .bind(request.category.as_deref().unwrap_or(&existing.category))
        .bind(request.event_code.as_deref().unwrap_or(&existing.event_code))
        .bind(request.max_participants.unwrap_or(existing.max_participants))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    pub async fn advance_status(&self, id: Uuid) -> Result<Event> {
        let current = self.find_by_id(id).await?;
        let next = LifecycleStatus::advance_from(&current.status);

        let event = sqlx::query_as(&format!(
            "UPDATE events SET status = $2 WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(next.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Append a winner via read-modify-write on the embedded list.
    /// Conflict policy is last-write-wins: concurrent admin edits overwrite
    /// each other.
    pub async fn add_winner(&self, id: Uuid, winner: Winner) -> Result<Event> {
        let mut winners = self.find_by_id(id).await?.winners.0;
        winners.push(winner);
        self.write_winners(id, winners).await
    }

    /// Remove winners matching (name, position), read-modify-write.
    pub async fn remove_winner(&self, id: Uuid, name: &str, position: i32) -> Result<Event> {
        let mut winners = self.find_by_id(id).await?.winners.0;
        winners.retain(|w| !(w.name == name && w.position == position));
        self.write_winners(id, winners).await
    }

    async fn write_winners(&self, id: Uuid, winners: Vec<Winner>) -> Result<Event> {
        let event = sqlx::query_as(&format!(
            "UPDATE events SET winners = $2 WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(sqlx::types::Json(winners))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
