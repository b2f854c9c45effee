// End-to-end workflow tests over the real store: submission, lifecycle
// transitions, match resolution, and the atomicity guarantees around them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use backend_application::commands::{match_commands, report_commands};
use backend_application::dtos::{CandidatePayload, LookupQuery, SubmitPayload};
use backend_application::queries::report_queries;
use backend_application::{AppError, AppState, Metrics, SequenceIssuer};
use backend_domain::ports::{CounterStore, MatchRepository, OwnerRepository, ReportRepository};
use backend_domain::{
    MatchCandidate, MatchDecision, MatchId, MatchStatus, RefCode, ReportId, ReportKind,
    ReportRecord, ReportStatus, RuntimeConfig, StorageError, TransitionEvent, UserRef,
};
use backend_infrastructure::{MemoryStore, NullMatcherService};

fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        api_token: None,
        matcher_url: None,
        store_path: None,
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 5,
    }
}

fn state_over(store: Arc<MemoryStore>) -> AppState {
    AppState {
        config: runtime_config(),
        reports: store.clone(),
        owners: store.clone(),
        matches: store.clone(),
        matcher: Arc::new(NullMatcherService::new()),
        issuer: Arc::new(SequenceIssuer::new(store)),
        metrics: Arc::new(Metrics::default()),
    }
}

fn lost_payload() -> SubmitPayload {
    SubmitPayload {
        kind: ReportKind::Lost,
        first_name: Some("A".to_string()),
        last_name: Some("B".to_string()),
        booking_reference: Some("ABC123".to_string()),
        email: Some("a@b.com".to_string()),
        phone: Some("+212600000000".to_string()),
        item_type: Some("Bag".to_string()),
        location: Some("Gate 12".to_string()),
        description: None,
        colors: vec![],
        additional_details: None,
        flight_number: None,
    }
}

fn found_payload() -> SubmitPayload {
    SubmitPayload {
        kind: ReportKind::Found,
        first_name: None,
        last_name: None,
        booking_reference: None,
        email: Some("finder@example.com".to_string()),
        phone: Some("0600000000".to_string()),
        item_type: Some("Bag".to_string()),
        location: Some("Seat 14C".to_string()),
        description: Some("black bag under the seat".to_string()),
        colors: vec![],
        additional_details: None,
        flight_number: Some("AT201".to_string()),
    }
}

#[tokio::test]
async fn submit_lost_issues_first_code_and_opens_record() {
    let store = Arc::new(MemoryStore::new());
    let state = state_over(store.clone());

    let receipt = report_commands::submit_report(&state, lost_payload(), None)
        .await
        .unwrap();
    assert!(!receipt.record_id.0.is_empty());
    assert_eq!(receipt.ref_code.as_str(), "LST0001");

    let record = store.get_report(&receipt.record_id).await.unwrap().unwrap();
    assert_eq!(record.status, ReportStatus::LostOpen);
    assert_eq!(record.kind, ReportKind::Lost);

    // The owner row was created alongside and is linked from the record.
    let owner_id = record.owner_ref.clone().unwrap();
    let owner = store.get_owner(&owner_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(owner.booking_reference, "ABC123");
    assert_eq!(owner.email, "a@b.com");
}

#[tokio::test]
async fn sequential_lost_submissions_count_up() {
    let state = state_over(Arc::new(MemoryStore::new()));

    let first = report_commands::submit_report(&state, lost_payload(), None)
        .await
        .unwrap();
    let second = report_commands::submit_report(&state, lost_payload(), None)
        .await
        .unwrap();
    assert_eq!(first.ref_code.as_str(), "LST0001");
    assert_eq!(second.ref_code.as_str(), "LST0002");
}

#[tokio::test]
async fn submit_found_uses_its_own_counter() {
    let store = Arc::new(MemoryStore::new());
    let state = state_over(store.clone());

    let receipt = report_commands::submit_report(&state, found_payload(), None)
        .await
        .unwrap();
    assert_eq!(receipt.ref_code.as_str(), "FND0001");

    let record = store.get_report(&receipt.record_id).await.unwrap().unwrap();
    assert_eq!(record.status, ReportStatus::FoundOpen);
    assert_eq!(record.flight_number.as_deref(), Some("AT201"));
    assert!(record.owner_ref.is_none());
}

#[tokio::test]
async fn invalid_payload_persists_nothing() {
    let store = Arc::new(MemoryStore::new());
    let state = state_over(store.clone());

    let mut payload = lost_payload();
    payload.booking_reference = Some("BAD".to_string());
    let err = report_commands::submit_report(&state, payload, None)
        .await
        .unwrap_err();
    match err {
        AppError::InvalidPayload { field, .. } => assert_eq!(field, "booking_reference"),
        other => panic!("unexpected error: {other}"),
    }

    // Validation runs before any write: no counter row, no report row.
    assert!(store.load(ReportKind::Lost).await.unwrap().is_none());
    let looked_up = store
        .find_by_ref(ReportKind::Lost, &RefCode("LST0001".to_string()))
        .await
        .unwrap();
    assert!(looked_up.is_none());
}

/// Report repository wrapper that fails inserts on demand, leaving the
/// underlying store untouched.
struct FailingReports {
    inner: Arc<MemoryStore>,
    fail_insert: AtomicBool,
}

#[async_trait]
impl ReportRepository for FailingReports {
    async fn insert_report(&self, record: &ReportRecord) -> Result<(), StorageError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("injected insert failure".to_string()));
        }
        self.inner.insert_report(record).await
    }

    async fn get_report(&self, id: &ReportId) -> Result<Option<ReportRecord>, StorageError> {
        self.inner.get_report(id).await
    }

    async fn find_by_ref(
        &self,
        kind: ReportKind,
        ref_code: &RefCode,
    ) -> Result<Option<ReportRecord>, StorageError> {
        self.inner.find_by_ref(kind, ref_code).await
    }

    async fn list_by_user(&self, user_ref: &UserRef) -> Result<Vec<ReportRecord>, StorageError> {
        self.inner.list_by_user(user_ref).await
    }

    async fn update_status(&self, record: &ReportRecord) -> Result<(), StorageError> {
        self.inner.update_status(record).await
    }

    async fn ping(&self) -> Result<(), StorageError> {
        ReportRepository::ping(self.inner.as_ref()).await
    }
}

#[tokio::test]
async fn failed_report_write_consumes_the_code_but_leaves_no_record() {
    let store = Arc::new(MemoryStore::new());
    let failing = Arc::new(FailingReports {
        inner: store.clone(),
        fail_insert: AtomicBool::new(true),
    });
    let mut state = state_over(store.clone());
    state.reports = failing;

    let err = report_commands::submit_report(&state, lost_payload(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::StorageUnavailable(_)));

    // The counter transaction committed before the record write failed:
    // LST0001 is spent, but no record carries it.
    let counter = store.load(ReportKind::Lost).await.unwrap().unwrap();
    assert_eq!(counter.last_value, 1);
    let orphan = store
        .find_by_ref(ReportKind::Lost, &RefCode("LST0001".to_string()))
        .await
        .unwrap();
    assert!(orphan.is_none());
}

#[tokio::test]
async fn illegal_transition_is_rejected_and_state_kept() {
    let store = Arc::new(MemoryStore::new());
    let state = state_over(store.clone());

    let receipt = report_commands::submit_report(&state, lost_payload(), None)
        .await
        .unwrap();

    let err =
        report_commands::transition_report(&state, &receipt.record_id, TransitionEvent::Returned)
            .await
            .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));

    let record = store.get_report(&receipt.record_id).await.unwrap().unwrap();
    assert_eq!(record.status, ReportStatus::LostOpen);
}

#[tokio::test]
async fn closing_an_open_report_updates_the_stored_record() {
    let store = Arc::new(MemoryStore::new());
    let state = state_over(store.clone());

    let receipt = report_commands::submit_report(&state, lost_payload(), None)
        .await
        .unwrap();
    let status =
        report_commands::transition_report(&state, &receipt.record_id, TransitionEvent::Closed)
            .await
            .unwrap();
    assert_eq!(status, ReportStatus::Closed);

    let record = store.get_report(&receipt.record_id).await.unwrap().unwrap();
    assert_eq!(record.status, ReportStatus::Closed);
    assert!(record.updated_at >= record.created_at);
}

#[tokio::test]
async fn transition_on_unknown_id_is_record_not_found() {
    let state = state_over(Arc::new(MemoryStore::new()));
    let err = report_commands::transition_report(
        &state,
        &ReportId("missing".to_string()),
        TransitionEvent::Closed,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::RecordNotFound(_)));
}

async fn submit_pair(state: &AppState) -> (ReportId, ReportId) {
    let lost = report_commands::submit_report(state, lost_payload(), None)
        .await
        .unwrap();
    let found = report_commands::submit_report(state, found_payload(), None)
        .await
        .unwrap();
    (lost.record_id, found.record_id)
}

#[tokio::test]
async fn registering_a_candidate_matches_both_records() {
    let store = Arc::new(MemoryStore::new());
    let state = state_over(store.clone());
    let (lost_id, found_id) = submit_pair(&state).await;

    let candidate = match_commands::register_candidate(
        &state,
        CandidatePayload {
            lost_id: lost_id.clone(),
            found_id: found_id.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(candidate.status, MatchStatus::Pending);

    let lost = store.get_report(&lost_id).await.unwrap().unwrap();
    let found = store.get_report(&found_id).await.unwrap().unwrap();
    assert_eq!(lost.status, ReportStatus::Matched);
    assert_eq!(found.status, ReportStatus::Matched);

    // Matched records are out of the candidate pool.
    let err = match_commands::register_candidate(
        &state,
        CandidatePayload { lost_id, found_id },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));
}

#[tokio::test]
async fn accepting_a_match_confirms_both_records_then_handoff_completes() {
    let store = Arc::new(MemoryStore::new());
    let state = state_over(store.clone());
    let (lost_id, found_id) = submit_pair(&state).await;

    let candidate = match_commands::register_candidate(
        &state,
        CandidatePayload {
            lost_id: lost_id.clone(),
            found_id: found_id.clone(),
        },
    )
    .await
    .unwrap();

    match_commands::resolve_match(&state, &candidate.id, MatchDecision::Accepted)
        .await
        .unwrap();

    let lost = store.get_report(&lost_id).await.unwrap().unwrap();
    let found = store.get_report(&found_id).await.unwrap().unwrap();
    assert_eq!(lost.status, ReportStatus::Confirmed);
    assert_eq!(found.status, ReportStatus::Confirmed);
    let resolved = store.get_candidate(&candidate.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.status, MatchStatus::Accepted);

    // Kind-dependent handoff terminals.
    let status = report_commands::transition_report(&state, &lost_id, TransitionEvent::Recovered)
        .await
        .unwrap();
    assert_eq!(status, ReportStatus::Recovered);
    let status = report_commands::transition_report(&state, &found_id, TransitionEvent::Returned)
        .await
        .unwrap();
    assert_eq!(status, ReportStatus::Returned);
}

#[tokio::test]
async fn rejecting_a_match_reopens_both_records() {
    let store = Arc::new(MemoryStore::new());
    let state = state_over(store.clone());
    let (lost_id, found_id) = submit_pair(&state).await;

    let candidate = match_commands::register_candidate(
        &state,
        CandidatePayload {
            lost_id: lost_id.clone(),
            found_id: found_id.clone(),
        },
    )
    .await
    .unwrap();

    match_commands::resolve_match(&state, &candidate.id, MatchDecision::Rejected)
        .await
        .unwrap();

    let lost = store.get_report(&lost_id).await.unwrap().unwrap();
    let found = store.get_report(&found_id).await.unwrap().unwrap();
    assert_eq!(lost.status, ReportStatus::LostOpen);
    assert_eq!(found.status, ReportStatus::FoundOpen);

    // Both sides keep searching: a new candidate is accepted again.
    match_commands::register_candidate(&state, CandidatePayload { lost_id, found_id })
        .await
        .unwrap();
}

#[tokio::test]
async fn resolving_twice_is_a_policy_rejection() {
    let state = state_over(Arc::new(MemoryStore::new()));
    let (lost_id, found_id) = submit_pair(&state).await;

    let candidate =
        match_commands::register_candidate(&state, CandidatePayload { lost_id, found_id })
            .await
            .unwrap();
    match_commands::resolve_match(&state, &candidate.id, MatchDecision::Accepted)
        .await
        .unwrap();

    let err = match_commands::resolve_match(&state, &candidate.id, MatchDecision::Accepted)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));
}

#[tokio::test]
async fn resolving_unknown_match_is_match_not_found() {
    let state = state_over(Arc::new(MemoryStore::new()));
    let err = match_commands::resolve_match(
        &state,
        &MatchId("missing".to_string()),
        MatchDecision::Accepted,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::MatchNotFound(_)));
}

/// Match repository wrapper that fails the resolution commit on demand.
struct FailingMatches {
    inner: Arc<MemoryStore>,
    fail_commit: AtomicBool,
}

#[async_trait]
impl MatchRepository for FailingMatches {
    async fn get_candidate(&self, id: &MatchId) -> Result<Option<MatchCandidate>, StorageError> {
        self.inner.get_candidate(id).await
    }

    async fn insert_candidate(
        &self,
        candidate: &MatchCandidate,
        lost: &ReportRecord,
        found: &ReportRecord,
    ) -> Result<(), StorageError> {
        self.inner.insert_candidate(candidate, lost, found).await
    }

    async fn commit_resolution(
        &self,
        candidate: &MatchCandidate,
        lost: &ReportRecord,
        found: &ReportRecord,
    ) -> Result<(), StorageError> {
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("injected commit failure".to_string()));
        }
        self.inner.commit_resolution(candidate, lost, found).await
    }
}

#[tokio::test]
async fn failed_resolution_commit_changes_none_of_the_three_rows() {
    let store = Arc::new(MemoryStore::new());
    let failing = Arc::new(FailingMatches {
        inner: store.clone(),
        fail_commit: AtomicBool::new(false),
    });
    let mut state = state_over(store.clone());
    state.matches = failing.clone();

    let (lost_id, found_id) = submit_pair(&state).await;
    let candidate = match_commands::register_candidate(
        &state,
        CandidatePayload {
            lost_id: lost_id.clone(),
            found_id: found_id.clone(),
        },
    )
    .await
    .unwrap();

    failing.fail_commit.store(true, Ordering::SeqCst);
    let err = match_commands::resolve_match(&state, &candidate.id, MatchDecision::Accepted)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::StorageUnavailable(_)));

    // All three entities are exactly as they were before the call.
    let lost = store.get_report(&lost_id).await.unwrap().unwrap();
    let found = store.get_report(&found_id).await.unwrap().unwrap();
    let pending = store.get_candidate(&candidate.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(lost.status, ReportStatus::Matched);
    assert_eq!(found.status, ReportStatus::Matched);
    assert_eq!(pending.status, MatchStatus::Pending);
}

#[tokio::test]
async fn lookup_returns_display_fields_for_known_refs() {
    let state = state_over(Arc::new(MemoryStore::new()));
    let receipt = report_commands::submit_report(&state, lost_payload(), None)
        .await
        .unwrap();

    let view = report_queries::lookup_by_ref(
        &state,
        LookupQuery {
            kind: "lost".to_string(),
            ref_code: "lst0001".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(view.id, receipt.record_id);
    assert_eq!(view.status, ReportStatus::LostOpen);
    assert_eq!(view.item_type, "Bag");

    let err = report_queries::lookup_by_ref(
        &state,
        LookupQuery {
            kind: "found".to_string(),
            ref_code: "LST0001".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidPayload { field: "ref", .. }));

    let err = report_queries::lookup_by_ref(
        &state,
        LookupQuery {
            kind: "lost".to_string(),
            ref_code: "LST9999".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::RecordNotFound(_)));
}

#[tokio::test]
async fn list_by_user_filters_on_the_identity_reference() {
    let state = state_over(Arc::new(MemoryStore::new()));
    let user = UserRef("uid-1".to_string());

    report_commands::submit_report(&state, lost_payload(), Some(user.clone()))
        .await
        .unwrap();
    report_commands::submit_report(&state, lost_payload(), Some(UserRef("uid-2".to_string())))
        .await
        .unwrap();
    report_commands::submit_report(&state, found_payload(), None)
        .await
        .unwrap();

    let mine = report_queries::list_by_user(&state, &user).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].ref_code.as_str(), "LST0001");
}

#[tokio::test]
async fn failed_snapshot_write_leaves_memory_untouched() {
    let dir = std::env::temp_dir().join(format!("reclaim-snap-{}", uuid::Uuid::new_v4()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let path = dir.join("store.json").to_string_lossy().to_string();

    let store = Arc::new(MemoryStore::open(Some(&path)).await.unwrap());
    let state = state_over(store.clone());
    let (lost_id, found_id) = submit_pair(&state).await;
    let candidate = match_commands::register_candidate(
        &state,
        CandidatePayload {
            lost_id: lost_id.clone(),
            found_id: found_id.clone(),
        },
    )
    .await
    .unwrap();

    // Replace the snapshot directory with a plain file: every snapshot
    // write from here on fails with an I/O error.
    tokio::fs::remove_dir_all(&dir).await.unwrap();
    tokio::fs::write(&dir, b"in the way").await.unwrap();

    let err = match_commands::resolve_match(&state, &candidate.id, MatchDecision::Accepted)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::StorageUnavailable(_)));

    // The failed commit is invisible: all three rows read back unchanged.
    let lost = store.get_report(&lost_id).await.unwrap().unwrap();
    let found = store.get_report(&found_id).await.unwrap().unwrap();
    let pending = store.get_candidate(&candidate.id).await.unwrap().unwrap();
    assert_eq!(lost.status, ReportStatus::Matched);
    assert_eq!(found.status, ReportStatus::Matched);
    assert_eq!(pending.status, MatchStatus::Pending);

    // A submit that fails on the counter write consumes nothing either.
    let err = report_commands::submit_report(&state, found_payload(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::StorageUnavailable(_)));
    let counter = store.load(ReportKind::Found).await.unwrap().unwrap();
    assert_eq!(counter.last_value, 1);

    let _ = tokio::fs::remove_file(&dir).await;
}

#[tokio::test]
async fn snapshot_survives_a_reopen() {
    let path = std::env::temp_dir().join(format!("reclaim-store-{}.json", uuid::Uuid::new_v4()));
    let path_str = path.to_string_lossy().to_string();

    {
        let store = Arc::new(MemoryStore::open(Some(&path_str)).await.unwrap());
        let state = state_over(store);
        let receipt = report_commands::submit_report(&state, lost_payload(), None)
            .await
            .unwrap();
        assert_eq!(receipt.ref_code.as_str(), "LST0001");
    }

    let reopened = MemoryStore::open(Some(&path_str)).await.unwrap();
    let record = reopened
        .find_by_ref(ReportKind::Lost, &RefCode("LST0001".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, ReportStatus::LostOpen);
    // Counter survives too: the next issuance continues the sequence.
    let counter = reopened.load(ReportKind::Lost).await.unwrap().unwrap();
    assert_eq!(counter.last_value, 1);

    let _ = tokio::fs::remove_file(&path).await;
}
