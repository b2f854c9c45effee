// Match candidate entity
// A pairing proposed by the external matcher, resolved here

use serde::{Deserialize, Serialize};

use crate::value_objects::{MatchId, ReportId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Accepted => "accepted",
            MatchStatus::Rejected => "rejected",
        }
    }
}

/// Operator verdict on a pending candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchDecision {
    Accepted,
    Rejected,
}

impl MatchDecision {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "accepted" => Some(MatchDecision::Accepted),
            "rejected" => Some(MatchDecision::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub id: MatchId,
    pub lost_ref: ReportId,
    pub found_ref: ReportId,
    pub status: MatchStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
