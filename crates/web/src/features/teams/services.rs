use storage::{
    Database, dto::team::UpdateTeamRequest, error::Result, models::team::TeamStanding,
    repository::team::TeamRepository,
};
use uuid::Uuid;

pub async fn list_teams(db: &Database) -> Result<Vec<TeamStanding>> {
    let repo = TeamRepository::new(db.pool());
    repo.list().await
}

pub async fn update_team(db: &Database, id: Uuid, request: &UpdateTeamRequest) -> Result<TeamStanding> {
    let repo = TeamRepository::new(db.pool());
    repo.update(id, request).await
}

pub async fn init_default_teams(db: &Database) -> Result<Vec<TeamStanding>> {
    let repo = TeamRepository::new(db.pool());
    repo.init_defaults().await
}
