// Request/response DTOs for the public surfaces

use backend_domain::{RefCode, ReportId, ReportKind, ReportRecord, ReportStatus};
use serde::{Deserialize, Serialize};

/// Raw submission form. Which fields are required depends on `kind`;
/// validation names the first missing or malformed one.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPayload {
    pub kind: ReportKind,
    // Owner fields, required for lost reports
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub booking_reference: Option<String>,
    // Contact, required for both kinds
    pub email: Option<String>,
    pub phone: Option<String>,
    // Item fields
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub additional_details: Option<String>,
    // Found reports carry the flight the item came off
    pub flight_number: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitReceipt {
    pub record_id: ReportId,
    pub ref_code: RefCode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitionRequest {
    pub event: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionResponse {
    pub status: ReportStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePayload {
    pub lost_id: ReportId,
    pub found_id: ReportId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionRequest {
    pub decision: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupQuery {
    pub kind: String,
    #[serde(rename = "ref")]
    pub ref_code: String,
}

/// Display subset exposed by the read-only lookup surface. No contact or
/// owner data leaks through here.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub id: ReportId,
    pub kind: ReportKind,
    pub ref_code: RefCode,
    pub status: ReportStatus,
    #[serde(rename = "type")]
    pub item_type: String,
    pub location: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&ReportRecord> for ReportView {
    fn from(record: &ReportRecord) -> Self {
        Self {
            id: record.id.clone(),
            kind: record.kind,
            ref_code: record.ref_code.clone(),
            status: record.status,
            item_type: record.item_type.clone(),
            location: record.location.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
