// Report lifecycle
// The single source of truth for which status moves are legal

use crate::entities::{ReportStatus, TransitionEvent};
use crate::value_objects::ReportKind;

/// Start state for a freshly submitted report.
pub fn initial_status(kind: ReportKind) -> ReportStatus {
    match kind {
        ReportKind::Lost => ReportStatus::LostOpen,
        ReportKind::Found => ReportStatus::FoundOpen,
    }
}

/// The open state a report falls back to when a candidate pairing it is
/// rejected. Same as the initial state; rejection never downgrades a record
/// below open.
pub fn open_status(kind: ReportKind) -> ReportStatus {
    initial_status(kind)
}

/// Applies one lifecycle event. Returns `None` for illegal moves, leaving
/// the caller to reject without touching state.
///
/// Closed is terminal. The handoff terminals are kind-dependent: lost
/// reports are recovered, found reports are returned.
pub fn apply(kind: ReportKind, current: ReportStatus, event: TransitionEvent) -> Option<ReportStatus> {
    match (current, event) {
        (ReportStatus::LostOpen, TransitionEvent::Matched)
        | (ReportStatus::FoundOpen, TransitionEvent::Matched) => Some(ReportStatus::Matched),
        (ReportStatus::Matched, TransitionEvent::Confirmed) => Some(ReportStatus::Confirmed),
        (ReportStatus::Confirmed, TransitionEvent::Recovered) if kind == ReportKind::Lost => {
            Some(ReportStatus::Recovered)
        }
        (ReportStatus::Confirmed, TransitionEvent::Returned) if kind == ReportKind::Found => {
            Some(ReportStatus::Returned)
        }
        (current, TransitionEvent::Closed) if current != ReportStatus::Closed => {
            Some(ReportStatus::Closed)
        }
        _ => None,
    }
}

/// True when the report can still enter a new pairing.
pub fn accepts_candidate(status: ReportStatus) -> bool {
    matches!(status, ReportStatus::LostOpen | ReportStatus::FoundOpen)
}
