use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::team::UpdateTeamRequest;
use crate::error::{Result, StorageError};
use crate::models::team::{DEFAULT_TEAMS, TeamStanding};

const TEAM_COLUMNS: &str = "id, name, sector, points, gold, silver, bronze, updated_at";

pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Standings view: ordered by points, highest first.
    pub async fn list(&self) -> Result<Vec<TeamStanding>> {
        let teams = sqlx::query_as(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams ORDER BY points DESC, name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<TeamStanding> {
        let team = sqlx::query_as(&format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(team)
    }

    /// Full overwrite of points and medal counts, last-write-wins.
    pub async fn update(&self, id: Uuid, request: &UpdateTeamRequest) -> Result<TeamStanding> {
        let existing = self.find_by_id(id).await?;

        let team = sqlx::query_as(&format!(
            "UPDATE teams \
             SET sector = $2, points = $3, gold = $4, silver = $5, bronze = $6, updated_at = now() \
             WHERE id = $1 \
             RETURNING {TEAM_COLUMNS}"
        ))
        .bind(id)
        .bind(request.sector.as_deref().unwrap_or(&existing.sector))
        .bind(request.points)
        .bind(request.medals.gold)
        .bind(request.medals.silver)
        .bind(request.medals.bronze)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(team)
    }

    /// Create or reset the four default teams to zero.
    pub async fn init_defaults(&self) -> Result<Vec<TeamStanding>> {
        for name in DEFAULT_TEAMS {
            let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM teams WHERE name = $1")
                .bind(name)
                .fetch_optional(self.pool)
                .await?;

            match existing {
                Some((id,)) => {
                    sqlx::query(
                        "UPDATE teams \
                         SET sector = 'Core', points = 0, gold = 0, silver = 0, bronze = 0, \
                             updated_at = now() \
                         WHERE id = $1",
                    )
                    .bind(id)
                    .execute(self.pool)
                    .await?;
                }
                None => {
                    sqlx::query("INSERT INTO teams (name, sector) VALUES ($1, 'Core')")
                        .bind(name)
                        .execute(self.pool)
                        .await?;
                }
            }
        }

        self.list().await
    }
}
