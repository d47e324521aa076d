//! Normalization of heterogeneous certificate documents.
//!
//! The two certificate stores spell the same logical fields differently: the
//! athlos store uses snake_case keys (`search_id`, `certificate_base64`),
//! while the provider store uses the generator's spreadsheet-style keys
//! (`"Full Name"`, `"SEARCH ID 1"`). Instead of inline fallback chains at
//! every read site, one mapping table per store lists the physical key
//! candidates for each logical field, and a single pure function produces
//! the canonical [`Certificate`] shape.

use serde_json::Value;

use crate::models::certificate::{Certificate, StoreId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalField {
    Name,
    EventName,
    CertificateId,
    UniversityCode,
    Email,
    Phone,
    DownloadUrl,
    FileName,
    FileFormat,
    Payload,
}

/// (logical field, physical key candidates in priority order)
type FieldMap = &'static [(LogicalField, &'static [&'static str])];

const ATHLOS_FIELDS: FieldMap = &[
    (LogicalField::Name, &["name", "event_name"]),
    (LogicalField::EventName, &["event", "event_name"]),
    (LogicalField::CertificateId, &["certificate_id"]),
    (LogicalField::UniversityCode, &["search_id", "search_id1"]),
    (LogicalField::Email, &["email", "search_id1"]),
    (LogicalField::Phone, &["phone", "search_id2"]),
    (LogicalField::DownloadUrl, &["download_storage_url", "pdfUrl"]),
    (LogicalField::FileName, &["download_file_name"]),
    (LogicalField::FileFormat, &["download_file_format"]),
    (LogicalField::Payload, &["certificate_base64"]),
];

const PROVIDER_FIELDS: FieldMap = &[
    (LogicalField::Name, &["Full Name"]),
    (LogicalField::EventName, &["Event"]),
    (LogicalField::CertificateId, &["Certificate ID"]),
    (
        LogicalField::UniversityCode,
        &["University Code", "SEARCH ID 1"],
    ),
    (LogicalField::Email, &["Email"]),
    (LogicalField::Phone, &["Phone Number", "SEARCH ID 2"]),
    (LogicalField::DownloadUrl, &["download_storage_url"]),
    (LogicalField::FileName, &["download_file_name"]),
    (LogicalField::FileFormat, &["download_file_format"]),
    (LogicalField::Payload, &["certificate_base64"]),
];

/// Physical keys the search fan-out queries with equality, per store.
/// Three on athlos plus five on provider: eight (store, field) pairs total.
pub fn search_keys(store: StoreId) -> &'static [&'static str] {
    match store {
        StoreId::Athlos => &["search_id", "search_id1", "search_id2"],
        StoreId::Provider => &[
            "University Code",
            "SEARCH ID 1",
            "Email",
            "SEARCH ID 2",
            "Phone Number",
        ],
    }
}

fn field_map(store: StoreId) -> FieldMap {
    match store {
        StoreId::Athlos => ATHLOS_FIELDS,
        StoreId::Provider => PROVIDER_FIELDS,
    }
}

/// First candidate key holding a non-empty string value.
fn lookup(store: StoreId, doc: &Value, field: LogicalField) -> Option<String> {
    let candidates = field_map(store)
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, keys)| *keys)?;

    for key in candidates {
        match doc.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            // Documents are schemaless; numbers occasionally show up where
            // strings are expected (phone columns from spreadsheets).
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// Pure normalization from a store document to the canonical shape.
pub fn normalize(store: StoreId, id: String, doc: &Value) -> Certificate {
    Certificate {
        id,
        store,
        name: lookup(store, doc, LogicalField::Name).unwrap_or_else(|| "Unknown".into()),
        event_name: lookup(store, doc, LogicalField::EventName)
            .unwrap_or_else(|| "Unknown Event".into()),
        certificate_id: lookup(store, doc, LogicalField::CertificateId)
            .unwrap_or_else(|| "Unknown".into()),
        university_code: lookup(store, doc, LogicalField::UniversityCode),
        email: lookup(store, doc, LogicalField::Email),
        phone: lookup(store, doc, LogicalField::Phone),
        download_url: lookup(store, doc, LogicalField::DownloadUrl),
        file_name: lookup(store, doc, LogicalField::FileName),
        file_format: lookup(store, doc, LogicalField::FileFormat),
        certificate_base64: lookup(store, doc, LogicalField::Payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_athlos_document_normalizes_snake_case_keys() {
        let doc = json!({
            "name": "Asha Nair",
            "event": "100m Sprint",
            "certificate_id": "CERT-42",
            "search_id": "PRP24CS001",
            "search_id1": "asha@example.com",
            "search_id2": "9876543210",
            "certificate_base64": "aGVsbG8=",
        });

        let cert = normalize(StoreId::Athlos, "doc-1".into(), &doc);
        assert_eq!(cert.name, "Asha Nair");
        assert_eq!(cert.event_name, "100m Sprint");
        assert_eq!(cert.certificate_id, "CERT-42");
        assert_eq!(cert.university_code.as_deref(), Some("PRP24CS001"));
        assert_eq!(cert.email.as_deref(), Some("asha@example.com"));
        assert_eq!(cert.phone.as_deref(), Some("9876543210"));
        assert!(!cert.is_unavailable());
    }

    #[test]
    fn test_provider_search_id_1_maps_to_university_code() {
        // A record present only under the provider's "SEARCH ID 1" key must
        // still normalize with the university code filled in.
        let doc = json!({
            "Full Name": "Rahul K",
            "Event": "Long Jump",
            "SEARCH ID 1": "PRP24CS087",
        });

        let cert = normalize(StoreId::Provider, "doc-2".into(), &doc);
        assert_eq!(cert.university_code.as_deref(), Some("PRP24CS087"));
        assert_eq!(cert.name, "Rahul K");
    }

    #[test]
    fn test_provider_spaced_keys_win_over_fallbacks() {
        let doc = json!({
            "Full Name": "Meera S",
            "University Code": "PRP24EC031",
            "SEARCH ID 1": "ignored-when-primary-present",
            "Phone Number": "9000000000",
            "SEARCH ID 2": "9000000000",
        });

        let cert = normalize(StoreId::Provider, "doc-3".into(), &doc);
        assert_eq!(cert.university_code.as_deref(), Some("PRP24EC031"));
        assert_eq!(cert.phone.as_deref(), Some("9000000000"));
    }

    #[test]
    fn test_missing_fields_fall_back_to_unknown() {
        let cert = normalize(StoreId::Athlos, "doc-4".into(), &json!({}));
        assert_eq!(cert.name, "Unknown");
        assert_eq!(cert.event_name, "Unknown Event");
        assert_eq!(cert.certificate_id, "Unknown");
        assert!(cert.university_code.is_none());
        assert!(cert.is_unavailable());
    }

    #[test]
    fn test_numeric_phone_is_stringified() {
        let doc = json!({ "Full Name": "N", "Phone Number": 9876543210u64 });
        let cert = normalize(StoreId::Provider, "doc-5".into(), &doc);
        assert_eq!(cert.phone.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_eight_search_pairs_total() {
        let total: usize = StoreId::ALL.iter().map(|s| search_keys(*s).len()).sum();
        assert_eq!(total, 8);
    }
}
