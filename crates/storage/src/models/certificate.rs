use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which certificate store a document came from. There is no canonical
/// identity across stores: a document is identified by `(store, id)` and
/// cross-store duplicates are not detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoreId {
    Athlos,
    Provider,
}

impl StoreId {
    pub const ALL: [StoreId; 2] = [StoreId::Athlos, StoreId::Provider];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Athlos => "athlos",
            Self::Provider => "provider",
        }
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoreId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "athlos" => Ok(Self::Athlos),
            "provider" => Ok(Self::Provider),
            other => Err(format!("unknown certificate store: {other}")),
        }
    }
}

/// Canonical certificate shape produced by the normalization service from
/// either store's document layout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub store: StoreId,
    pub name: String,
    pub event_name: String,
    pub certificate_id: String,
    pub university_code: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Stored binary location, when the generator uploaded one.
    pub download_url: Option<String>,
    pub file_name: Option<String>,
    pub file_format: Option<String>,
    /// Embedded payload fallback, possibly with a `data:` URL prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_base64: Option<String>,
}

impl Certificate {
    /// True when the download path has nothing to work with.
    pub fn is_unavailable(&self) -> bool {
        self.download_url.is_none() && self.certificate_base64.is_none()
    }

    pub fn download_file_name(&self) -> String {
        match &self.file_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{}_{}.png", self.name, self.event_name),
        }
    }
}

/// Search identity of an athlete, used for the cascading best-effort
/// certificate deletion.
#[derive(Debug, Clone)]
pub struct CertificateIdentity {
    pub university_code: String,
    pub email: String,
    pub phone: String,
}

impl CertificateIdentity {
    /// The distinct non-empty search terms, in search priority order.
    pub fn terms(&self) -> Vec<&str> {
        let mut terms = Vec::new();
        for term in [
            self.university_code.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
        ] {
            if !term.is_empty() && !terms.contains(&term) {
                terms.push(term);
            }
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_skips_empty_and_duplicate_terms() {
        let identity = CertificateIdentity {
            university_code: "PRP24CS087".into(),
            email: "".into(),
            phone: "PRP24CS087".into(),
        };
        assert_eq!(identity.terms(), vec!["PRP24CS087"]);
    }

    #[test]
    fn test_unavailable_when_no_url_and_no_payload() {
        let cert = Certificate {
            id: "c1".into(),
            store: StoreId::Athlos,
            name: "A".into(),
            event_name: "100m".into(),
            certificate_id: "X".into(),
            university_code: None,
            email: None,
            phone: None,
            download_url: None,
            file_name: None,
            file_format: None,
            certificate_base64: None,
        };
        assert!(cert.is_unavailable());
    }
}
