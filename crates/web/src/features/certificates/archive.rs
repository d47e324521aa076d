use std::collections::HashMap;
use std::io::{Cursor, Write};

use futures::StreamExt;
use storage::models::certificate::Certificate;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{WebError, WebResult};

/// Bound on concurrent binary fetches. Purely a resource cap, not a
/// correctness requirement.
const MAX_CONCURRENT_FETCHES: usize = 4;

#[derive(Debug)]
pub struct ArchiveReport {
    pub archived: usize,
    /// File names that could not be included, with the reason.
    pub skipped: Vec<String>,
}

enum FileOutcome {
    Ready { name: String, bytes: Vec<u8> },
    Skipped(String),
}

/// Build one zip from whatever certificates can be resolved.
///
/// Per record: stored binary URL wins, embedded base64 payload is the
/// fallback, anything else is skipped as unavailable. Failures never abort
/// the batch; the archive contains exactly the successes.
pub async fn build_archive(
    client: &reqwest::Client,
    certificates: &[Certificate],
) -> WebResult<(Vec<u8>, ArchiveReport)> {
    // Build the fetch futures up front; a lazy map inside the stream does
    // not satisfy the handler's higher-ranked lifetime bound.
    let fetches: Vec<_> = certificates
        .iter()
        .map(|cert| resolve(client, cert))
        .collect();
    let outcomes: Vec<FileOutcome> = futures::stream::iter(fetches)
        .buffer_unordered(MAX_CONCURRENT_FETCHES)
        .collect()
        .await;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut used_names: HashMap<String, u32> = HashMap::new();
    let mut report = ArchiveReport {
        archived: 0,
        skipped: Vec::new(),
    };

    for outcome in outcomes {
        match outcome {
            FileOutcome::Ready { name, bytes } => {
                let entry_name = unique_name(&name, &mut used_names);
                writer
                    .start_file(&entry_name, SimpleFileOptions::default())
                    .map_err(|e| WebError::InternalServerError(format!("zip write failed: {e}")))?;
                writer
                    .write_all(&bytes)
                    .map_err(|e| WebError::InternalServerError(format!("zip write failed: {e}")))?;
                report.archived += 1;
            }
            FileOutcome::Skipped(reason) => {
                tracing::info!("skipping certificate in archive: {reason}");
                report.skipped.push(reason);
            }
        }
    }

    let cursor = writer
        .finish()
        .map_err(|e| WebError::InternalServerError(format!("zip finalize failed: {e}")))?;

    Ok((cursor.into_inner(), report))
}

async fn resolve(client: &reqwest::Client, cert: &Certificate) -> FileOutcome {
    let name = cert.download_file_name();

    if let Some(url) = &cert.download_url {
        match fetch_binary(client, url).await {
            Ok(bytes) => return FileOutcome::Ready { name, bytes },
            Err(err) => return FileOutcome::Skipped(format!("{name}: fetch failed ({err})")),
        }
    }

    if let Some(payload) = &cert.certificate_base64 {
        match decode_payload(payload) {
            Ok(bytes) => return FileOutcome::Ready { name, bytes },
            Err(err) => return FileOutcome::Skipped(format!("{name}: invalid payload ({err})")),
        }
    }

    FileOutcome::Skipped(format!("{name}: no stored file or embedded payload"))
}

async fn fetch_binary(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Decode an embedded payload, tolerating an optional `data:…;base64,` prefix.
fn decode_payload(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let cleaned = match payload.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, body)| body).unwrap_or(rest),
        None => payload,
    };
    base64::Engine::decode(&base64::engine::general_purpose::STANDARD, cleaned.trim())
}

/// Disambiguate repeated entry names with a numeric suffix before the
/// extension: `a.png`, `a_2.png`, `a_3.png`.
fn unique_name(name: &str, used: &mut HashMap<String, u32>) -> String {
    let count = used.entry(name.to_string()).or_insert(0);
    *count += 1;
    if *count == 1 {
        return name.to_string();
    }

    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{count}.{ext}"),
        None => format!("{name}_{count}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::models::certificate::StoreId;
    use zip::ZipArchive;

    fn cert(name: &str, payload: Option<&str>) -> Certificate {
        Certificate {
            id: name.to_string(),
            store: StoreId::Athlos,
            name: name.to_string(),
            event_name: "100m".into(),
            certificate_id: "C".into(),
            university_code: None,
            email: None,
            phone: None,
            download_url: None,
            file_name: Some(format!("{name}.png")),
            file_format: None,
            certificate_base64: payload.map(String::from),
        }
    }

    fn entry_names(bytes: &[u8]) -> Vec<String> {
        let archive = ZipArchive::new(Cursor::new(bytes.to_vec())).expect("valid zip");
        archive.file_names().map(String::from).collect()
    }

    #[tokio::test]
    async fn test_archive_contains_only_resolvable_certificates() {
        // "aGVsbG8=" is "hello"; the third record has nothing to download.
        let certs = vec![
            cert("first", Some("aGVsbG8=")),
            cert("second", Some("d29ybGQ=")),
            cert("third", None),
        ];

        let client = reqwest::Client::new();
        let (bytes, report) = build_archive(&client, &certs).await.expect("archive");

        assert_eq!(report.archived, 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].contains("third"));
        assert_eq!(entry_names(&bytes).len(), 2);
    }

    #[tokio::test]
    async fn test_archive_of_unavailable_certificates_is_empty_not_an_error() {
        let certs = vec![cert("only", None)];

        let client = reqwest::Client::new();
        let (bytes, report) = build_archive(&client, &certs).await.expect("archive");

        assert_eq!(report.archived, 0);
        assert_eq!(report.skipped.len(), 1);
        assert!(entry_names(&bytes).is_empty());
    }

    #[tokio::test]
    async fn test_data_url_prefix_is_stripped() {
        let certs = vec![cert("data", Some("data:image/png;base64,aGVsbG8="))];

        let client = reqwest::Client::new();
        let (bytes, report) = build_archive(&client, &certs).await.expect("archive");

        assert_eq!(report.archived, 1);

        let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
        let mut file = archive.by_index(0).expect("entry");
        let mut contents = Vec::new();
        std::io::Read::read_to_end(&mut file, &mut contents).expect("read entry");
        assert_eq!(contents, b"hello");
    }

    #[tokio::test]
    async fn test_invalid_payload_is_reported_not_fatal() {
        let certs = vec![
            cert("good", Some("aGVsbG8=")),
            cert("bad", Some("!!not-base64!!")),
        ];

        let client = reqwest::Client::new();
        let (_, report) = build_archive(&client, &certs).await.expect("archive");

        assert_eq!(report.archived, 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].contains("bad"));
    }

    #[test]
    fn test_duplicate_entry_names_get_suffixes() {
        let mut used = HashMap::new();
        assert_eq!(unique_name("a.png", &mut used), "a.png");
        assert_eq!(unique_name("a.png", &mut used), "a_2.png");
        assert_eq!(unique_name("a.png", &mut used), "a_3.png");
        assert_eq!(unique_name("noext", &mut used), "noext");
        assert_eq!(unique_name("noext", &mut used), "noext_2");
    }
}
