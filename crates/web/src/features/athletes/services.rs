use std::collections::HashMap;

use storage::{
    CertificateStores, Database,
    dto::athlete::{AthleteImportRow, RegisterAthleteRequest},
    error::Result,
    models::athlete::Athlete,
    models::certificate::CertificateIdentity,
    models::event::Event,
    repository::{
        athlete::AthleteRepository, certificate::CertificateRepository, event::EventRepository,
    },
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn list_athletes(db: &Database) -> Result<Vec<Athlete>> {
    let repo = AthleteRepository::new(db.pool());
    repo.list().await
}

pub async fn register_athlete(db: &Database, request: &RegisterAthleteRequest) -> Result<Athlete> {
    let repo = AthleteRepository::new(db.pool());
    repo.create(request).await
}

pub async fn advance_status(db: &Database, id: Uuid) -> Result<Athlete> {
    let repo = AthleteRepository::new(db.pool());
    repo.advance_status(id).await
}

/// Delete an athlete and, best-effort, every certificate matching their
/// identity across both stores. Returns the certificate count; a failure
/// partway through leaves partial deletions, there is no rollback.
pub async fn delete_athlete(db: &Database, certs: &CertificateStores, id: Uuid) -> Result<u64> {
    let athletes = AthleteRepository::new(db.pool());
    let athlete = athletes.find_by_id(id).await?;

    let identity = CertificateIdentity {
        university_code: athlete.university_code,
        email: athlete.email,
        phone: athlete.phone_number,
    };

    let deleted = CertificateRepository::new(certs)
        .delete_by_athlete(&identity)
        .await?;

    athletes.delete(id).await?;
    Ok(deleted)
}

/// Import spreadsheet rows: parse CSV, match each row's free-text event
/// reference against known events, insert one athlete per row.
pub async fn import_athletes(db: &Database, csv_bytes: &[u8]) -> WebResult<usize> {
    let events = EventRepository::new(db.pool()).list(None).await?;
    let index = EventIndex::build(&events);

    let rows = parse_rows(csv_bytes, &index)?;
    if rows.is_empty() {
        return Err(WebError::BadRequest("Spreadsheet file is empty".into()));
    }

    let count = AthleteRepository::new(db.pool()).create_many(&rows).await?;
    Ok(count)
}

#[derive(Debug, Clone)]
struct EventRef {
    id: String,
    name: String,
    category: String,
}

/// Lookup of known events by lowercase name, code, or id, for best-effort
/// matching of the spreadsheet's free-text event column.
struct EventIndex {
    by_key: HashMap<String, EventRef>,
}

impl EventIndex {
    fn build(events: &[Event]) -> Self {
        let mut by_key = HashMap::new();
        for event in events {
            let entry = EventRef {
                id: event.id.to_string(),
                name: event.name.clone(),
                category: event.category.clone(),
            };
            for key in [&event.name, &event.event_code, &event.id.to_string()] {
                let key = key.trim().to_lowercase();
                if !key.is_empty() {
                    by_key.insert(key, entry.clone());
                }
            }
        }
        Self { by_key }
    }

    fn find(&self, raw: &str) -> Option<&EventRef> {
        self.by_key.get(&raw.trim().to_lowercase())
    }
}

/// Read one athlete per CSV row. Column headers are matched
/// case-insensitively against both spellings the original sheets used
/// (`fullName` and `Full Name`).
fn parse_rows(csv_bytes: &[u8], index: &EventIndex) -> WebResult<Vec<AthleteImportRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_bytes);

    let headers = reader
        .headers()
        .map_err(|e| WebError::BadRequest(format!("Unreadable spreadsheet: {e}")))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| WebError::BadRequest(format!("Unreadable spreadsheet row: {e}")))?;

        let raw_event = cell(&headers, &record, &["event", "Event"]);
        let (event, event_name, event_category) = match index.find(&raw_event) {
            Some(matched) => (
                matched.id.clone(),
                matched.name.clone(),
                matched.category.clone(),
            ),
            // No match: keep the raw string so nothing is silently dropped.
            None => (
                raw_event,
                cell(&headers, &record, &["eventName", "Event Name"]),
                cell(&headers, &record, &["eventCategory", "Event Category"]),
            ),
        };

        let group = cell(&headers, &record, &["group", "Group"]);
        rows.push(AthleteImportRow {
            full_name: cell(&headers, &record, &["fullName", "Full Name"]),
            university_code: cell(&headers, &record, &["universityCode", "University Code"]),
            event,
            event_name,
            event_category,
            email: cell(&headers, &record, &["email", "Email"]),
            phone_number: cell(&headers, &record, &["phoneNumber", "Phone Number"]),
            sex: cell(&headers, &record, &["sex", "Sex"]).to_lowercase(),
            group_name: if group.is_empty() { "AGNI".into() } else { group },
        });
    }

    Ok(rows)
}

fn cell(headers: &csv::StringRecord, record: &csv::StringRecord, keys: &[&str]) -> String {
    for key in keys {
        let found = headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(key));
        if let Some(idx) = found {
            if let Some(value) = record.get(idx) {
                if !value.is_empty() {
                    return value.to_string();
                }
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    fn event(name: &str, code: &str, category: &str) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            event_code: code.into(),
            max_participants: 100,
            status: "upcoming".into(),
            winners: Json(Vec::new()),
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_rows_match_events_by_name_case_insensitively() {
        let sprint = event("100m Sprint", "T01", "Track");
        let index = EventIndex::build(&[sprint.clone()]);

        let csv = b"Full Name,University Code,Event,Email,Phone Number,Sex\n\
                    Asha Nair,PRP24CS001,100M SPRINT,asha@example.com,9876543210,F\n";
        let rows = parse_rows(csv, &index).expect("parse");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event, sprint.id.to_string());
        assert_eq!(rows[0].event_name, "100m Sprint");
        assert_eq!(rows[0].event_category, "Track");
        assert_eq!(rows[0].full_name, "Asha Nair");
        assert_eq!(rows[0].sex, "f");
    }

    #[test]
    fn test_rows_match_events_by_code() {
        let jump = event("Long Jump", "F02", "Field");
        let index = EventIndex::build(&[jump.clone()]);

        let csv = b"fullName,event\nRahul K,f02\n";
        let rows = parse_rows(csv, &index).expect("parse");

        assert_eq!(rows[0].event, jump.id.to_string());
    }

    #[test]
    fn test_unmatched_event_falls_back_to_raw_string() {
        let index = EventIndex::build(&[]);

        let csv = b"fullName,event,eventName\nRahul K,Mystery Run,Mystery Run 2026\n";
        let rows = parse_rows(csv, &index).expect("parse");

        assert_eq!(rows[0].event, "Mystery Run");
        assert_eq!(rows[0].event_name, "Mystery Run 2026");
    }

    #[test]
    fn test_missing_group_defaults() {
        let index = EventIndex::build(&[]);

        let csv = b"fullName,event\nA,unknown\n";
        let rows = parse_rows(csv, &index).expect("parse");

        assert_eq!(rows[0].group_name, "AGNI");
    }
}
