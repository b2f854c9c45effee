use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::match_commands;
use backend_application::dtos::{CandidatePayload, ResolutionRequest};
use backend_application::AppState;
use backend_domain::{MatchCandidate, MatchDecision, MatchId};

use crate::error::HttpError;
use crate::middleware::authorize;

/// Ingest surface for the external matcher's proposed pairings.
pub async fn register_candidate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CandidatePayload>,
) -> Result<(StatusCode, Json<MatchCandidate>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let candidate = match_commands::register_candidate(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

pub async fn resolve_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ResolutionRequest>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let decision = MatchDecision::parse(&request.decision).ok_or_else(|| {
        HttpError::BadRequest(format!("unknown decision '{}'", request.decision))
    })?;
    match_commands::resolve_match(&state, &MatchId(id), decision).await?;
    Ok(StatusCode::NO_CONTENT)
}
