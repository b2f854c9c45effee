use backend_domain::{RefCode, ReportKind, UserRef};

use crate::dtos::{LookupQuery, ReportView};
use crate::{AppError, AppState};

/// Public status lookup by `(kind, ref_code)`. Pure read, display fields
/// only.
pub async fn lookup_by_ref(state: &AppState, query: LookupQuery) -> Result<ReportView, AppError> {
    let kind = ReportKind::parse(&query.kind)
        .ok_or_else(|| AppError::invalid_payload("kind", "must be 'lost' or 'found'"))?;

    let raw = query.ref_code.trim().to_uppercase();
    match RefCode::parse(&raw) {
        Some((code_kind, _)) if code_kind == kind => {}
        Some(_) => {
            return Err(AppError::invalid_payload(
                "ref",
                "reference prefix does not match kind",
            ))
        }
        None => return Err(AppError::invalid_payload("ref", "malformed reference code")),
    }

    let record = state
        .reports
        .find_by_ref(kind, &RefCode(raw.clone()))
        .await?
        .ok_or(AppError::RecordNotFound(raw))?;
    Ok(ReportView::from(&record))
}

/// Reports filed by one authenticated user, for the status-watch flow.
pub async fn list_by_user(
    state: &AppState,
    user_ref: &UserRef,
) -> Result<Vec<ReportView>, AppError> {
    let records = state.reports.list_by_user(user_ref).await?;
    Ok(records.iter().map(ReportView::from).collect())
}
