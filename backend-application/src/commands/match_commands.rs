use backend_domain::{
    lifecycle, MatchCandidate, MatchDecision, MatchId, MatchStatus, ReportId, ReportRecord,
    ReportStatus, StorageError, TransitionEvent,
};
use chrono::Utc;
use tracing::info;

use crate::dtos::CandidatePayload;
use crate::{AppError, AppState};

/// Ingests a pairing produced by the external matcher: a pending candidate
/// plus both records moving `open -> matched`, committed as one unit.
pub async fn register_candidate(
    state: &AppState,
    payload: CandidatePayload,
) -> Result<MatchCandidate, AppError> {
    let lost = load_report(state, &payload.lost_id).await?;
    let found = load_report(state, &payload.found_id).await?;

    if lost.kind != backend_domain::ReportKind::Lost {
        return Err(AppError::invalid_payload("lost_id", "not a lost report"));
    }
    if found.kind != backend_domain::ReportKind::Found {
        return Err(AppError::invalid_payload("found_id", "not a found report"));
    }
    if !lifecycle::accepts_candidate(lost.status) {
        return Err(AppError::invalid_transition(lost.status.as_str(), "matched"));
    }
    if !lifecycle::accepts_candidate(found.status) {
        return Err(AppError::invalid_transition(found.status.as_str(), "matched"));
    }

    let now = Utc::now().timestamp_millis();
    let candidate = MatchCandidate {
        id: MatchId::generate(),
        lost_ref: lost.id.clone(),
        found_ref: found.id.clone(),
        status: MatchStatus::Pending,
        created_at: now,
        updated_at: now,
    };
    let lost = lost.with_status(ReportStatus::Matched, now);
    let found = found.with_status(ReportStatus::Matched, now);

    state
        .matches
        .insert_candidate(&candidate, &lost, &found)
        .await?;

    info!(
        id = %candidate.id.0,
        lost = %lost.id.0,
        found = %found.id.0,
        "match candidate registered"
    );
    state.metrics.record_candidate();
    Ok(candidate)
}

/// Finalizes a pending candidate.
///
/// Acceptance confirms both records and the candidate atomically; rejection
/// discards the candidate and drops both records back to their open state,
/// never below it. Resolving a non-pending candidate is a policy rejection,
/// not an error in the store.
pub async fn resolve_match(
    state: &AppState,
    id: &MatchId,
    decision: MatchDecision,
) -> Result<(), AppError> {
    let candidate = match state.matches.get_candidate(id).await {
        Ok(Some(candidate)) => candidate,
        Ok(None) => return Err(AppError::MatchNotFound(id.0.clone())),
        Err(err) => return Err(err.into()),
    };
    if candidate.status != MatchStatus::Pending {
        return Err(AppError::invalid_transition(
            candidate.status.as_str(),
            decision_str(decision),
        ));
    }

    let lost = load_report(state, &candidate.lost_ref).await?;
    let found = load_report(state, &candidate.found_ref).await?;
    let now = Utc::now().timestamp_millis();

    let (candidate_status, lost_status, found_status) = match decision {
        MatchDecision::Accepted => {
            let lost_next = lifecycle::apply(lost.kind, lost.status, TransitionEvent::Confirmed)
                .ok_or_else(|| AppError::invalid_transition(lost.status.as_str(), "confirmed"))?;
            let found_next = lifecycle::apply(found.kind, found.status, TransitionEvent::Confirmed)
                .ok_or_else(|| AppError::invalid_transition(found.status.as_str(), "confirmed"))?;
            (MatchStatus::Accepted, lost_next, found_next)
        }
        MatchDecision::Rejected => (
            MatchStatus::Rejected,
            lifecycle::open_status(lost.kind),
            lifecycle::open_status(found.kind),
        ),
    };

    let mut resolved = candidate;
    resolved.status = candidate_status;
    resolved.updated_at = now;
    let lost = lost.with_status(lost_status, now);
    let found = found.with_status(found_status, now);

    match state.matches.commit_resolution(&resolved, &lost, &found).await {
        Ok(()) => {}
        Err(StorageError::NotFound { .. }) => {
            return Err(AppError::MatchNotFound(id.0.clone()));
        }
        Err(err) => return Err(err.into()),
    }

    info!(id = %id.0, decision = decision_str(decision), "match resolved");
    state.metrics.record_resolution();
    Ok(())
}

async fn load_report(state: &AppState, id: &ReportId) -> Result<ReportRecord, AppError> {
    state
        .reports
        .get_report(id)
        .await?
        .ok_or_else(|| AppError::RecordNotFound(id.0.clone()))
}

fn decision_str(decision: MatchDecision) -> &'static str {
    match decision {
        MatchDecision::Accepted => "accepted",
        MatchDecision::Rejected => "rejected",
    }
}
