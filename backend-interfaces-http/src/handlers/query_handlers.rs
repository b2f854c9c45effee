use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::dtos::{LookupQuery, ReportView};
use backend_application::queries::report_queries;
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::{authorize, extract_user_ref};

/// Public status lookup. Deliberately unauthenticated: a traveler holding a
/// reference code can check it without an account, and only display fields
/// come back.
pub async fn lookup_report(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<ReportView>, HttpError> {
    let view = report_queries::lookup_by_ref(&state, query).await?;
    Ok(Json(view))
}

pub async fn list_my_reports(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ReportView>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let user_ref = extract_user_ref(&headers)
        .ok_or_else(|| HttpError::BadRequest("missing X-User-Ref header".to_string()))?;
    let views = report_queries::list_by_user(&state, &user_ref).await?;
    Ok(Json(views))
}
