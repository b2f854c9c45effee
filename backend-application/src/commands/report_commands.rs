use backend_domain::{
    lifecycle, MatchNotice, OwnerId, OwnerRecord, ReportId, ReportKind, ReportRecord,
    ReportStatus, StorageError, TransitionEvent, UserRef,
};
use chrono::Utc;
use tracing::info;

use crate::dtos::{SubmitPayload, SubmitReceipt};
use crate::{AppError, AppState};

/// Creates a report with a guaranteed-unique reference code.
///
/// Order matters and is never reordered: owner row first (lost only), then
/// the counter transaction, then the report row. Only after the report row
/// is durable does the matcher notification get spawned; its outcome never
/// reaches the caller.
pub async fn submit_report(
    state: &AppState,
    payload: SubmitPayload,
    user_ref: Option<UserRef>,
) -> Result<SubmitReceipt, AppError> {
    let kind = payload.kind;
    let submission = validate(payload)?;
    let now = Utc::now().timestamp_millis();

    let owner_ref = match &submission.owner {
        Some(owner_fields) => {
            let owner = OwnerRecord {
                id: OwnerId::generate(),
                first_name: owner_fields.first_name.clone(),
                last_name: owner_fields.last_name.clone(),
                email: owner_fields.email.clone(),
                phone: owner_fields.phone.clone(),
                booking_reference: owner_fields.booking_reference.clone(),
                user_ref: user_ref.clone(),
                created_at: now,
            };
            state.owners.insert_owner(&owner).await.map_err(|err| {
                state.metrics.record_submit_error();
                AppError::from(err)
            })?;
            Some(owner.id)
        }
        None => None,
    };

    let ref_code = state.issuer.issue(kind).await.inspect_err(|_| {
        state.metrics.record_submit_error();
    })?;

    let record = ReportRecord {
        id: ReportId::generate(),
        kind,
        ref_code,
        status: lifecycle::initial_status(kind),
        owner_ref,
        user_ref: user_ref.clone(),
        item_type: submission.item_type,
        description: submission.description,
        location: submission.location,
        colors: submission.colors,
        additional_details: submission.additional_details,
        flight_number: submission.flight_number,
        contact_email: submission.contact_email,
        contact_phone: submission.contact_phone,
        created_at: now,
        updated_at: now,
    };

    // If this write fails after a successful issue, the code stays consumed.
    // Codes are unique and increasing, not gapless.
    state.reports.insert_report(&record).await.map_err(|err| {
        state.metrics.record_submit_error();
        AppError::from(err)
    })?;

    info!(id = %record.id.0, code = %record.ref_code, kind = %kind, "report submitted");
    state.metrics.record_submit();

    state.matcher.spawn_notify(
        state.config.clone(),
        MatchNotice {
            record_id: record.id.clone(),
            kind,
            description: normalized_description(&record),
            user_ref,
        },
    );

    Ok(SubmitReceipt {
        record_id: record.id,
        ref_code: record.ref_code,
    })
}

/// Applies one caller-driven lifecycle event to a record.
pub async fn transition_report(
    state: &AppState,
    id: &ReportId,
    event: TransitionEvent,
) -> Result<ReportStatus, AppError> {
    let record = state
        .reports
        .get_report(id)
        .await?
        .ok_or_else(|| AppError::RecordNotFound(id.0.clone()))?;

    let from = record.status;
    let next = lifecycle::apply(record.kind, from, event)
        .ok_or_else(|| AppError::invalid_transition(from.as_str(), event.as_str()))?;

    let updated = record.with_status(next, Utc::now().timestamp_millis());
    match state.reports.update_status(&updated).await {
        Ok(()) => {}
        Err(StorageError::NotFound { .. }) => {
            return Err(AppError::RecordNotFound(id.0.clone()));
        }
        Err(err) => return Err(err.into()),
    }

    info!(id = %id.0, from = %from, to = %next, "report transitioned");
    state.metrics.record_transition();
    Ok(next)
}

/// Text sent to the embedding service: one labelled line per populated
/// field, mirroring what the matcher indexes on.
pub fn normalized_description(record: &ReportRecord) -> String {
    let mut lines = vec![
        format!("Type: {}.", record.item_type),
        format!("Location: {}.", record.location),
    ];
    if let Some(flight) = &record.flight_number {
        lines.push(format!("Flight: {}.", flight));
    }
    if !record.colors.is_empty() {
        lines.push(format!("Colors: {}.", record.colors.join(", ")));
    }
    if !record.description.is_empty() {
        lines.push(format!("Description: {}.", record.description));
    }
    if let Some(details) = &record.additional_details {
        lines.push(format!("Details: {}.", details));
    }
    lines.join("\n")
}

#[derive(Debug)]
struct OwnerFields {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    booking_reference: String,
}

#[derive(Debug)]
struct Submission {
    owner: Option<OwnerFields>,
    item_type: String,
    location: String,
    description: String,
    colors: Vec<String>,
    additional_details: Option<String>,
    flight_number: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
}

/// Field-identified validation. Nothing is persisted before this passes.
fn validate(payload: SubmitPayload) -> Result<Submission, AppError> {
    let item_type = require_text(payload.item_type, "type")?;
    let location = require_text(payload.location, "location")?;
    let email = validate_email(require_text(payload.email, "email")?)?;
    let phone = validate_phone(require_text(payload.phone, "phone")?)?;

    let description = payload
        .description
        .map(|d| d.trim().to_string())
        .unwrap_or_default();
    let colors = payload
        .colors
        .into_iter()
        .filter_map(|c| {
            let trimmed = c.trim().to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect();
    let additional_details = payload
        .additional_details
        .and_then(|d| {
            let trimmed = d.trim().to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        });

    match payload.kind {
        ReportKind::Lost => {
            let owner = OwnerFields {
                first_name: require_text(payload.first_name, "first_name")?,
                last_name: require_text(payload.last_name, "last_name")?,
                booking_reference: validate_booking_reference(require_text(
                    payload.booking_reference,
                    "booking_reference",
                )?)?,
                email,
                phone,
            };
            Ok(Submission {
                owner: Some(owner),
                item_type,
                location,
                description,
                colors,
                additional_details,
                flight_number: None,
                contact_email: None,
                contact_phone: None,
            })
        }
        ReportKind::Found => Ok(Submission {
            owner: None,
            item_type,
            location,
            description,
            colors,
            additional_details,
            flight_number: Some(require_text(payload.flight_number, "flight_number")?),
            contact_email: Some(email),
            contact_phone: Some(phone),
        }),
    }
}

fn require_text(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::invalid_payload(field, "missing or empty"))
}

fn validate_email(raw: String) -> Result<String, AppError> {
    let email = raw.to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        return Err(AppError::invalid_payload("email", "not a valid address"));
    }
    Ok(email)
}

fn validate_phone(raw: String) -> Result<String, AppError> {
    let digits = raw.chars().filter(|c| c.is_ascii_digit()).count();
    let well_formed = raw
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    if digits < 6 || !well_formed {
        return Err(AppError::invalid_payload("phone", "not a valid phone number"));
    }
    Ok(raw)
}

fn validate_booking_reference(raw: String) -> Result<String, AppError> {
    let reference = raw.to_uppercase();
    if reference.len() != 6 || !reference.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::invalid_payload(
            "booking_reference",
            "must be exactly 6 alphanumeric characters",
        ));
    }
    Ok(reference)
}
