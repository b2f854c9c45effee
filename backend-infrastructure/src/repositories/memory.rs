// In-process document store
// Backs all four collections behind one lock: multi-record commits are a
// single critical section. Every mutation validates completely, then stages
// its rows on a copy that only replaces the live collections after the
// snapshot write succeeds, so a failed call leaves all rows exactly as they
// were, including on snapshot I/O errors.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use backend_domain::ports::{CounterStore, MatchRepository, OwnerRepository, ReportRepository};
use backend_domain::{
    CounterSnapshot, MatchCandidate, MatchId, OwnerId, OwnerRecord, RefCode, ReportId, ReportKind,
    ReportRecord, StorageError, UserRef,
};

const COUNTERS: &str = "counters";
const OWNERS: &str = "owners";
const REPORTS: &str = "reports";
const MATCHES: &str = "matches";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CounterRow {
    last_value: u64,
    version: i64,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Collections {
    counters: HashMap<String, CounterRow>,
    owners: HashMap<String, OwnerRecord>,
    reports: HashMap<String, ReportRecord>,
    matches: HashMap<String, MatchCandidate>,
}

pub struct MemoryStore {
    inner: RwLock<Collections>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    /// Fresh store with no snapshot file.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Collections::default()),
            snapshot_path: None,
        }
    }

    /// Store backed by a JSON snapshot file, loaded if present and rewritten
    /// after every committed mutation.
    pub async fn open(path: Option<&str>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::new());
        };
        let snapshot_path = PathBuf::from(path);
        let collections = if snapshot_path.exists() {
            let content = tokio::fs::read_to_string(&snapshot_path).await?;
            serde_json::from_str(&content)?
        } else {
            Collections::default()
        };
        Ok(Self {
            inner: RwLock::new(collections),
            snapshot_path: Some(snapshot_path),
        })
    }

    // Called with the write lock held. The staged collections become the
    // live ones only once the snapshot write has succeeded; on error the
    // staged copy is dropped and readers keep seeing the pre-call rows.
    async fn commit(
        &self,
        live: &mut Collections,
        staged: Collections,
    ) -> Result<(), StorageError> {
        self.persist(&staged).await?;
        *live = staged;
        Ok(())
    }

    async fn persist(&self, collections: &Collections) -> Result<(), StorageError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        let content = serde_json::to_string(collections)
            .map_err(|err| StorageError::Backend(err.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|err| StorageError::Unavailable(err.to_string()))?;
            }
        }
        tokio::fs::write(path, content)
            .await
            .map_err(|err| StorageError::Unavailable(err.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn load(&self, kind: ReportKind) -> Result<Option<CounterSnapshot>, StorageError> {
        let collections = self.inner.read().await;
        Ok(collections.counters.get(kind.as_str()).map(|row| CounterSnapshot {
            last_value: row.last_value,
            version: row.version,
        }))
    }

    async fn compare_and_swap(
        &self,
        kind: ReportKind,
        expected: Option<i64>,
        next_value: u64,
    ) -> Result<(), StorageError> {
        let mut collections = self.inner.write().await;
        let key = kind.as_str();
        let row = match (collections.counters.get(key), expected) {
            (None, None) => CounterRow {
                last_value: next_value,
                version: 0,
            },
            (Some(current), Some(version)) if current.version == version => CounterRow {
                last_value: next_value,
                version: version + 1,
            },
            (None, Some(_)) => return Err(StorageError::not_found(COUNTERS, key)),
            (Some(_), None) => return Err(StorageError::already_exists(COUNTERS, key)),
            (Some(_), Some(_)) => return Err(StorageError::conflict(COUNTERS, key)),
        };
        let mut staged = collections.clone();
        staged.counters.insert(key.to_string(), row);
        self.commit(&mut collections, staged).await
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn insert_report(&self, record: &ReportRecord) -> Result<(), StorageError> {
        let mut collections = self.inner.write().await;
        if collections.reports.contains_key(&record.id.0) {
            return Err(StorageError::already_exists(REPORTS, record.id.0.clone()));
        }
        let duplicate_ref = collections
            .reports
            .values()
            .any(|existing| existing.kind == record.kind && existing.ref_code == record.ref_code);
        if duplicate_ref {
            return Err(StorageError::already_exists(
                REPORTS,
                record.ref_code.as_str().to_string(),
            ));
        }
        let mut staged = collections.clone();
        staged.reports.insert(record.id.0.clone(), record.clone());
        self.commit(&mut collections, staged).await
    }

    async fn get_report(&self, id: &ReportId) -> Result<Option<ReportRecord>, StorageError> {
        let collections = self.inner.read().await;
        Ok(collections.reports.get(&id.0).cloned())
    }

    async fn find_by_ref(
        &self,
        kind: ReportKind,
        ref_code: &RefCode,
    ) -> Result<Option<ReportRecord>, StorageError> {
        let collections = self.inner.read().await;
        Ok(collections
            .reports
            .values()
            .find(|record| record.kind == kind && record.ref_code == *ref_code)
            .cloned())
    }

    async fn list_by_user(&self, user_ref: &UserRef) -> Result<Vec<ReportRecord>, StorageError> {
        let collections = self.inner.read().await;
        let mut records: Vec<ReportRecord> = collections
            .reports
            .values()
            .filter(|record| record.user_ref.as_ref() == Some(user_ref))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn update_status(&self, record: &ReportRecord) -> Result<(), StorageError> {
        let mut collections = self.inner.write().await;
        let mut staged = collections.clone();
        let row = staged
            .reports
            .get_mut(&record.id.0)
            .ok_or_else(|| StorageError::not_found(REPORTS, record.id.0.clone()))?;
        row.status = record.status;
        row.updated_at = record.updated_at;
        self.commit(&mut collections, staged).await
    }

    async fn ping(&self) -> Result<(), StorageError> {
        let _ = self.inner.read().await;
        Ok(())
    }
}

#[async_trait]
impl OwnerRepository for MemoryStore {
    async fn insert_owner(&self, owner: &OwnerRecord) -> Result<(), StorageError> {
        let mut collections = self.inner.write().await;
        if collections.owners.contains_key(&owner.id.0) {
            return Err(StorageError::already_exists(OWNERS, owner.id.0.clone()));
        }
        let mut staged = collections.clone();
        staged.owners.insert(owner.id.0.clone(), owner.clone());
        self.commit(&mut collections, staged).await
    }

    async fn get_owner(&self, id: &OwnerId) -> Result<Option<OwnerRecord>, StorageError> {
        let collections = self.inner.read().await;
        Ok(collections.owners.get(&id.0).cloned())
    }
}

#[async_trait]
impl MatchRepository for MemoryStore {
    async fn get_candidate(&self, id: &MatchId) -> Result<Option<MatchCandidate>, StorageError> {
        let collections = self.inner.read().await;
        Ok(collections.matches.get(&id.0).cloned())
    }

    async fn insert_candidate(
        &self,
        candidate: &MatchCandidate,
        lost: &ReportRecord,
        found: &ReportRecord,
    ) -> Result<(), StorageError> {
        let mut collections = self.inner.write().await;
        if collections.matches.contains_key(&candidate.id.0) {
            return Err(StorageError::already_exists(MATCHES, candidate.id.0.clone()));
        }
        for report in [lost, found] {
            if !collections.reports.contains_key(&report.id.0) {
                return Err(StorageError::not_found(REPORTS, report.id.0.clone()));
            }
        }
        let mut staged = collections.clone();
        staged
            .matches
            .insert(candidate.id.0.clone(), candidate.clone());
        staged.reports.insert(lost.id.0.clone(), lost.clone());
        staged.reports.insert(found.id.0.clone(), found.clone());
        self.commit(&mut collections, staged).await
    }

    async fn commit_resolution(
        &self,
        candidate: &MatchCandidate,
        lost: &ReportRecord,
        found: &ReportRecord,
    ) -> Result<(), StorageError> {
        let mut collections = self.inner.write().await;
        if !collections.matches.contains_key(&candidate.id.0) {
            return Err(StorageError::not_found(MATCHES, candidate.id.0.clone()));
        }
        for report in [lost, found] {
            if !collections.reports.contains_key(&report.id.0) {
                return Err(StorageError::not_found(REPORTS, report.id.0.clone()));
            }
        }
        let mut staged = collections.clone();
        staged
            .matches
            .insert(candidate.id.0.clone(), candidate.clone());
        staged.reports.insert(lost.id.0.clone(), lost.clone());
        staged.reports.insert(found.id.0.clone(), found.clone());
        self.commit(&mut collections, staged).await
    }
}
