// Report entity
// A declared lost or found item moving through its lifecycle

use serde::{Deserialize, Serialize};

use crate::value_objects::{OwnerId, RefCode, ReportId, ReportKind, UserRef};

/// Lifecycle state of a report. The two open states are kind-dependent, as
/// are the two handoff terminals: lost items are recovered by their owner,
/// found items are returned to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    LostOpen,
    FoundOpen,
    Matched,
    Confirmed,
    Recovered,
    Returned,
    Closed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::LostOpen => "lost_open",
            ReportStatus::FoundOpen => "found_open",
            ReportStatus::Matched => "matched",
            ReportStatus::Confirmed => "confirmed",
            ReportStatus::Recovered => "recovered",
            ReportStatus::Returned => "returned",
            ReportStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-driven lifecycle event. There are no automatic timers; every move
/// is triggered by an operator, the resolution flow, or the external matcher
/// registering a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionEvent {
    Matched,
    Confirmed,
    Recovered,
    Returned,
    Closed,
}

impl TransitionEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionEvent::Matched => "matched",
            TransitionEvent::Confirmed => "confirmed",
            TransitionEvent::Recovered => "recovered",
            TransitionEvent::Returned => "returned",
            TransitionEvent::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "matched" => Some(TransitionEvent::Matched),
            "confirmed" => Some(TransitionEvent::Confirmed),
            "recovered" => Some(TransitionEvent::Recovered),
            "returned" => Some(TransitionEvent::Returned),
            "closed" => Some(TransitionEvent::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransitionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: ReportId,
    pub kind: ReportKind,
    /// Immutable once assigned, unique within the kind partition.
    pub ref_code: RefCode,
    pub status: ReportStatus,
    /// Present only for lost reports; the owner row created alongside.
    pub owner_ref: Option<OwnerId>,
    /// Opaque authenticated-user reference, lookup-only.
    pub user_ref: Option<UserRef>,
    pub item_type: String,
    pub description: String,
    pub location: String,
    pub colors: Vec<String>,
    pub additional_details: Option<String>,
    /// Found reports carry the flight the item was picked up from.
    pub flight_number: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ReportRecord {
    pub fn with_status(mut self, status: ReportStatus, updated_at: i64) -> Self {
        self.status = status;
        self.updated_at = updated_at;
        self
    }
}

/// Outbound payload for the external matcher. Fire-and-forget; any response
/// is discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchNotice {
    pub record_id: ReportId,
    pub kind: ReportKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ref: Option<UserRef>,
}
