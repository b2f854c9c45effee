use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::report_commands;
use backend_application::dtos::{SubmitPayload, SubmitReceipt, TransitionRequest, TransitionResponse};
use backend_application::AppState;
use backend_domain::{ReportId, TransitionEvent};

use crate::error::HttpError;
use crate::middleware::{authorize, extract_user_ref};

pub async fn submit_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SubmitPayload>,
) -> Result<(StatusCode, Json<SubmitReceipt>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let user_ref = extract_user_ref(&headers);
    let receipt = report_commands::submit_report(&state, payload, user_ref).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub async fn transition_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let event = TransitionEvent::parse(&request.event)
        .ok_or_else(|| HttpError::BadRequest(format!("unknown event '{}'", request.event)))?;
    let status = report_commands::transition_report(&state, &ReportId(id), event).await?;
    Ok(Json(TransitionResponse { status }))
}
