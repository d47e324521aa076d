use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::athlete::{AthleteImportRow, RegisterAthleteRequest};
use crate::error::{Result, StorageError};
use crate::models::athlete::Athlete;
use crate::models::status::LifecycleStatus;

const ATHLETE_COLUMNS: &str = "id, full_name, university_code, event, event_name, event_category, \
     email, phone_number, sex, group_name, status, created_at";

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Athlete>> {
        let athletes = sqlx::query_as(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athletes ORDER BY created_at, full_name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(athletes)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Athlete> {
        let athlete = sqlx::query_as(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athletes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    /// Registration insert. New athletes start at the head of the cycle.
    pub async fn create(&self, request: &RegisterAthleteRequest) -> Result<Athlete> {
        let athlete = sqlx::query_as(&format!(
            "INSERT INTO athletes \
                 (full_name, university_code, event, email, phone_number, sex, group_name, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {ATHLETE_COLUMNS}"
        ))
        .bind(&request.full_name)
        .bind(&request.university_code)
        .bind(&request.event)
        .bind(&request.email)
        .bind(&request.phone_number)
        .bind(&request.sex)
        .bind(request.group_name.as_deref().unwrap_or("AGNI"))
        .bind(LifecycleStatus::Upcoming.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(athlete)
    }

    /// Bulk-upload insert: one row per spreadsheet line, committed together.
    /// Imported rows start as `pending` until an admin picks them up.
    pub async fn create_many(&self, rows: &[AthleteImportRow]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        for row in rows {
            sqlx::query(
                "INSERT INTO athletes \
                     (full_name, university_code, event, event_name, event_category, \
                      email, phone_number, sex, group_name, status) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending')",
            )
            .bind(&row.full_name)
            .bind(&row.university_code)
            .bind(&row.event)
            .bind(&row.event_name)
            .bind(&row.event_category)
            .bind(&row.email)
            .bind(&row.phone_number)
            .bind(&row.sex)
            .bind(&row.group_name)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(rows.len())
    }

    /// Advance the lifecycle status one step (wrapping), last-write-wins.
    pub async fn advance_status(&self, id: Uuid) -> Result<Athlete> {
        let current = self.find_by_id(id).await?;
        let next = LifecycleStatus::advance_from(&current.status);

        let athlete = sqlx::query_as(&format!(
            "UPDATE athletes SET status = $2 WHERE id = $1 RETURNING {ATHLETE_COLUMNS}"
        ))
        .bind(id)
        .bind(next.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM athletes WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
