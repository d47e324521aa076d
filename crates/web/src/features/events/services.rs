use storage::{
    Database,
    dto::event::{CreateEventRequest, UpdateEventRequest},
    error::Result,
    models::event::{Event, Winner},
    repository::event::EventRepository,
};
use uuid::Uuid;

pub async fn list_events(db: &Database, status: Option<&str>) -> Result<Vec<Event>> {
    let repo = EventRepository::new(db.pool());
    repo.list(status).await
}

pub async fn create_event(db: &Database, request: &CreateEventRequest) -> Result<Event> {
    let repo = EventRepository::new(db.pool());
    repo.create(request).await
}

pub async fn update_event(db: &Database, id: Uuid, request: &UpdateEventRequest) -> Result<Event> {
    let repo = EventRepository::new(db.pool());
    repo.update(id, request).await
}

pub async fn delete_event(db: &Database, id: Uuid) -> Result<()> {
    let repo = EventRepository::new(db.pool());
    repo.delete(id).await
}

pub async fn advance_status(db: &Database, id: Uuid) -> Result<Event> {
    let repo = EventRepository::new(db.pool());
    repo.advance_status(id).await
}

pub async fn add_winner(db: &Database, id: Uuid, winner: Winner) -> Result<Event> {
    let repo = EventRepository::new(db.pool());
    repo.add_winner(id, winner).await
}

pub async fn remove_winner(db: &Database, id: Uuid, name: &str, position: i32) -> Result<Event> {
    let repo = EventRepository::new(db.pool());
    repo.remove_winner(id, name, position).await
}
