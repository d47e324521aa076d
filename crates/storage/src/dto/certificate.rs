use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::certificate::{Certificate, StoreId};

/// Query parameters for certificate lookup. One of the two must be present.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CertificateQuery {
    /// Free-text search term: university code, email, or phone.
    pub university_code: Option<String>,
    /// Exact document id.
    pub id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSearchBody {
    pub university_code: String,
}

/// Raw document insert. The document shape is deliberately unconstrained;
/// the target store decides which key convention the caller should follow.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCertificateRequest {
    #[serde(default = "default_store")]
    pub store: StoreId,
    pub data: serde_json::Value,
}

fn default_store() -> StoreId {
    StoreId::Athlos
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CertificatesResponse {
    pub certificates: Vec<Certificate>,
}
