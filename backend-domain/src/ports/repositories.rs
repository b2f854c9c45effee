use async_trait::async_trait;

use crate::entities::{CounterSnapshot, MatchCandidate, OwnerRecord, ReportRecord};
use crate::error::StorageError;
use crate::value_objects::{MatchId, OwnerId, RefCode, ReportId, ReportKind, UserRef};

/// Durable per-kind sequence counters.
///
/// The store only exposes a load plus a version-checked write; the retry
/// loop that turns these into an atomic increment lives in the issuer. A
/// failed `compare_and_swap` has no effect on the row.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Current snapshot of the counter row, `None` if the kind has never
    /// issued a code.
    async fn load(&self, kind: ReportKind) -> Result<Option<CounterSnapshot>, StorageError>;

    /// Write `next_value` if the row version still matches `expected`
    /// (`None` meaning the row must not exist yet, i.e. first issuance).
    /// Fails with `ConcurrentConflict` when another writer got there first.
    async fn compare_and_swap(
        &self,
        kind: ReportKind,
        expected: Option<i64>,
        next_value: u64,
    ) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert a freshly submitted record. Fails with `AlreadyExists` if the
    /// id or the (kind, ref_code) pair is taken.
    async fn insert_report(&self, record: &ReportRecord) -> Result<(), StorageError>;

    async fn get_report(&self, id: &ReportId) -> Result<Option<ReportRecord>, StorageError>;

    async fn find_by_ref(
        &self,
        kind: ReportKind,
        ref_code: &RefCode,
    ) -> Result<Option<ReportRecord>, StorageError>;

    /// All reports filed under an authenticated user, newest first.
    async fn list_by_user(&self, user_ref: &UserRef) -> Result<Vec<ReportRecord>, StorageError>;

    /// Overwrite status and updated_at of an existing record.
    async fn update_status(&self, record: &ReportRecord) -> Result<(), StorageError>;

    /// Cheap readiness probe against the backing store.
    async fn ping(&self) -> Result<(), StorageError>;
}

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    async fn insert_owner(&self, owner: &OwnerRecord) -> Result<(), StorageError>;
    async fn get_owner(&self, id: &OwnerId) -> Result<Option<OwnerRecord>, StorageError>;
}

/// Match candidates and the multi-record commits around them.
///
/// Both mutating operations touch a candidate plus the two reports it pairs;
/// implementations must make each call atomic, so all three rows become
/// visible together or not at all.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn get_candidate(&self, id: &MatchId) -> Result<Option<MatchCandidate>, StorageError>;

    /// Insert a pending candidate and persist the already-transitioned lost
    /// and found records in the same commit.
    async fn insert_candidate(
        &self,
        candidate: &MatchCandidate,
        lost: &ReportRecord,
        found: &ReportRecord,
    ) -> Result<(), StorageError>;

    /// Persist a resolved candidate together with both updated records.
    /// Fails with `NotFound` if the candidate vanished.
    async fn commit_resolution(
        &self,
        candidate: &MatchCandidate,
        lost: &ReportRecord,
        found: &ReportRecord,
    ) -> Result<(), StorageError>;
}
